use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use rox::ast_printer::AstPrinter;
use rox::error::{Diagnostics, Reporter};
use rox::parser::Parser;
use rox::scanner::Scanner;
use rox::session::Lox;
use rox::token::Token;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Emit the token stream as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Parses a file as a program and prints the syntax tree of each statement
    Parse { filename: PathBuf },

    /// Runs a file as a Lox program, or starts the REPL when no file is given
    Run { filename: Option<PathBuf> },

    /// Starts an interactive prompt
    Repl,
}

/// Reads a file and decodes it as UTF‑8.
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    String::from_utf8(buf).context(format!("File {:?} is not valid UTF-8", filename))
}

fn init_logger() -> Result<()> {
    // Create or open the log file
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    // Module path and source line in front of every record
    Builder::new()
        .format(|buf, record| {
            let module = record.module_path().unwrap_or("<unnamed>");
            let module = module.strip_prefix("rox::").unwrap_or(module);
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn tokenize(filename: PathBuf, json: bool) -> Result<i32> {
    info!("Running Tokenize subcommand");
    let source = read_file(filename)?;
    let mut diagnostics = Diagnostics::echoing();
    let mut tokens: Vec<Token> = Vec::new();

    for result in Scanner::new(&source) {
        match result {
            Ok(token) => {
                debug!("Scanned token: {}", token);
                tokens.push(token);
            }
            Err(e) => diagnostics.error(e),
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &tokens).context("Failed to write tokens")?;
        writeln!(out)?;
    } else {
        for token in &tokens {
            writeln!(out, "{}", token)?;
        }
    }

    Ok(diagnostics.exit_code())
}

fn parse(filename: PathBuf) -> Result<i32> {
    info!("Running Parse subcommand");
    let source = read_file(filename)?;
    let mut diagnostics = Diagnostics::echoing();

    let tokens = rox::scanner::scan_tokens(&source, &mut diagnostics);
    let statements = Parser::new(&tokens, &mut diagnostics).parse();

    for stmt in &statements {
        let tree = AstPrinter::print_stmt(stmt);
        debug!("AST: {}", tree);
        println!("{}", tree);
    }

    Ok(diagnostics.exit_code())
}

fn run_file(filename: PathBuf) -> Result<i32> {
    info!("Running Run subcommand");
    let source = read_file(filename)?;

    let mut lox = Lox::new();
    lox.run(&source);

    Ok(lox.exit_code())
}

fn run_prompt() -> Result<i32> {
    info!("Starting REPL");
    let mut lox = Lox::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line).context("Failed to read from stdin")? == 0 {
            println!();
            break;
        }

        if let Some(shown) = lox.run_prompt_line(&line) {
            println!("{}", shown);
        }
    }

    info!("REPL finished");
    Ok(0)
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        Builder::new().filter_level(log::LevelFilter::Off).init();
    }

    info!("CLI arguments: {:?}", args);

    let code: i32 = match args.commands {
        Commands::Tokenize { filename, json } => tokenize(filename, json)?,
        Commands::Parse { filename } => parse(filename)?,
        Commands::Run {
            filename: Some(filename),
        } => run_file(filename)?,
        Commands::Run { filename: None } | Commands::Repl => run_prompt()?,
    };

    if code != 0 {
        debug!("Exiting with code {}", code);
        std::process::exit(code);
    }

    Ok(())
}
