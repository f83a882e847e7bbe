mod common;

#[cfg(test)]
mod session_tests {
    use super::common::{run_source, session};

    use rox::error::LoxError;

    #[test]
    fn test_session_01_exit_codes() {
        assert_eq!(run_source("print 1;").1, 0);
        assert_eq!(run_source("print 1").1, 2);
        assert_eq!(run_source("var @;").1, 2);
        assert_eq!(run_source("return 1;").1, 2);
        assert_eq!(run_source("print undefinedThing;").1, 3);
    }

    #[test]
    fn test_session_02_static_error_kinds() {
        let (mut lox, _) = session();
        lox.run("{ var a = a; }");

        let errors = lox.diagnostics().errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], LoxError::Resolve { .. }));
        assert_eq!(errors[0].line(), Some(1));
    }

    #[test]
    fn test_session_03_prompt_echoes_trailing_expression() {
        let (mut lox, buffer) = session();

        assert_eq!(lox.run_prompt_line("var a = 40;"), None);
        assert_eq!(lox.run_prompt_line("a + 2"), Some("= 42".to_string()));
        assert_eq!(lox.run_prompt_line("print a; \"done\""), Some("= done".to_string()));
        assert_eq!(buffer.contents(), "40\n");
    }

    #[test]
    fn test_session_04_prompt_keeps_state_across_lines() {
        let (mut lox, _) = session();

        lox.run_prompt_line("fun add(a, b) { return a + b; }");
        lox.run_prompt_line("class Box { init(v) { this.v = v; } }");
        assert_eq!(
            lox.run_prompt_line("add(Box(1).v, 2)"),
            Some("= 3".to_string())
        );
    }

    #[test]
    fn test_session_05_prompt_recovers_after_static_error() {
        let (mut lox, _) = session();

        assert_eq!(lox.run_prompt_line("var = ;"), None);
        assert!(!lox.diagnostics().had_error());
        assert_eq!(lox.run_prompt_line("1 + 1"), Some("= 2".to_string()));
    }

    #[test]
    fn test_session_06_prompt_runtime_error() {
        let (mut lox, _) = session();

        assert_eq!(lox.run_prompt_line("-\"x\""), None);
        assert!(lox.diagnostics().had_runtime_error());
        assert_eq!(lox.run_prompt_line("true"), Some("= true".to_string()));
    }

    #[test]
    fn test_session_07_closures_survive_their_line() {
        let (mut lox, buffer) = session();

        lox.run_prompt_line("fun make() { var n = 0; fun inc() { n = n + 1; return n; } return inc; }");
        lox.run_prompt_line("var c = make();");
        lox.run_prompt_line("c();");
        lox.run_prompt_line("print c();");

        assert_eq!(buffer.contents(), "2\n");
    }

    #[test]
    fn test_session_08_scope_restored_after_runtime_error() {
        let (mut lox, _) = session();

        assert_eq!(lox.run_prompt_line("{ var a = 1; nil(); }"), None);
        assert!(lox.diagnostics().had_runtime_error());
        assert_eq!(lox.run_prompt_line("var b = 2;"), None);
        assert_eq!(lox.run_prompt_line("b"), Some("= 2".to_string()));

        // The block's local did not leak into globals.
        assert_eq!(lox.run_prompt_line("a"), None);

        assert_eq!(lox.run_prompt_line("var g = 1;"), None);
        assert_eq!(lox.run_prompt_line("fun f() { nil(); } f();"), None);
        assert_eq!(lox.run_prompt_line("g = 5;"), None);
        assert_eq!(lox.run_prompt_line("g"), Some("= 5".to_string()));
        assert_eq!(lox.diagnostics().runtime_errors().len(), 3);
    }
}
