mod common;

#[cfg(test)]
mod parser_tests {
    use super::common::parse_source;

    use rox::ast::{Expr, Stmt};
    use rox::ast_printer::AstPrinter;
    use rox::error::Diagnostics;
    use rox::parser::Parser;
    use rox::scanner::scan_tokens;

    /// Parse `source` without errors and print each statement.
    fn printed(source: &str) -> Vec<String> {
        let (statements, errors) = parse_source(source);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        statements.iter().map(AstPrinter::print_stmt).collect()
    }

    fn errors_of(source: &str) -> Vec<String> {
        parse_source(source).1
    }

    #[test]
    fn test_parser_01_precedence() {
        assert_eq!(
            printed("print 1 + 2 * 3;"),
            vec!["(print (+ 1.0 (* 2.0 3.0)))"]
        );
        assert_eq!(
            printed("-a - -b == !c;"),
            vec!["(; (== (- (- a) (- b)) (! c)))"]
        );
        assert_eq!(
            printed("(1 + 2) * 3 >= 4;"),
            vec!["(; (>= (* (group (+ 1.0 2.0)) 3.0) 4.0))"]
        );
    }

    #[test]
    fn test_parser_02_logical_and_assignment_associativity() {
        assert_eq!(
            printed("a = b = c or d and e;"),
            vec!["(; (= a (= b (or c (and d e)))))"]
        );
    }

    #[test]
    fn test_parser_03_for_desugars_to_while() {
        assert_eq!(
            printed("for (var i = 0; i < 3; i = i + 1) print i;"),
            vec!["(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"]
        );
        assert_eq!(printed("for (;;) break;"), vec!["(while true (break))"]);
    }

    #[test]
    fn test_parser_04_calls_properties_and_classes() {
        assert_eq!(
            printed("a.b(1, 2).c = 3;"),
            vec!["(; (= (. (call (. a b) 1.0 2.0) c) 3.0))"]
        );
        assert_eq!(
            printed("class B < A { init(x) { this.x = x; } go() { return super.go(); } }"),
            vec![
                "(class B < A (method init (x) (; (= (. this x) x))) (method go () (return (call (super go)))))"
            ]
        );
    }

    #[test]
    fn test_parser_05_anonymous_function_expression() {
        assert_eq!(
            printed("var f = fun (a) { return a; };"),
            vec!["(var f (fun (a) (return a)))"]
        );
        assert_eq!(printed("fun named() {}"), vec!["(fun named ())"]);
    }

    #[test]
    fn test_parser_06_invalid_assignment_target() {
        let (statements, errors) = parse_source("a + b = c;");

        assert_eq!(
            errors,
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );
        // The left‑hand side is kept; the statement is not dropped.
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_parser_07_break_outside_loop() {
        assert_eq!(
            errors_of("break;"),
            vec!["[line 1] Error at 'break': Must be inside a loop to use 'break'."]
        );
        assert_eq!(
            errors_of("while (true) { fun f() { break; } }"),
            vec!["[line 1] Error at 'break': Must be inside a loop to use 'break'."]
        );
        assert!(errors_of("while (true) { if (x) break; }").is_empty());
    }

    #[test]
    fn test_parser_08_synchronize_reports_every_statement() {
        let (statements, errors) = parse_source("var = 1;\nprint 2;\nprint (3;\nvar ok = 4;");

        assert_eq!(
            errors,
            vec![
                "[line 1] Error at '=': Expect variable name.",
                "[line 3] Error at ';': Expect ')' after expression.",
            ]
        );
        assert_eq!(
            statements.iter().map(AstPrinter::print_stmt).collect::<Vec<_>>(),
            vec!["(print 2.0)", "(var ok 4.0)"]
        );
    }

    #[test]
    fn test_parser_09_error_at_end() {
        assert_eq!(
            errors_of("print 1"),
            vec!["[line 1] Error at end: Expect ';' after value."]
        );
        assert_eq!(
            errors_of("1 +;"),
            vec!["[line 1] Error at ';': Expect expression."]
        );
    }

    #[test]
    fn test_parser_10_argument_and_parameter_caps() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let call = format!("f({});", args.join(", "));
        assert_eq!(
            errors_of(&call),
            vec!["[line 1] Error at '255': Can't have more than 255 arguments."]
        );

        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let decl = format!("fun f({}) {{}}", params.join(", "));
        assert_eq!(
            errors_of(&decl),
            vec!["[line 1] Error at 'p255': Can't have more than 255 parameters."]
        );

        let ok: Vec<String> = (0..255).map(|i| i.to_string()).collect();
        assert!(errors_of(&format!("f({});", ok.join(", "))).is_empty());
    }

    #[test]
    fn test_parser_11_prompt_trailing_expression() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens("var a = 1; a + 2", &mut diagnostics);
        let prompt = Parser::new(&tokens, &mut diagnostics).parse_prompt();

        assert!(!diagnostics.had_error());
        assert_eq!(prompt.statements.len(), 1);
        assert!(matches!(prompt.statements[0], Stmt::Var { .. }));
        match &prompt.trailing {
            Some(expr @ Expr::Binary { .. }) => assert_eq!(AstPrinter::print(expr), "(+ a 2.0)"),
            other => panic!("expected trailing binary, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_12_prompt_without_trailing_expression() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens("print 1; 2;", &mut diagnostics);
        let prompt = Parser::new(&tokens, &mut diagnostics).parse_prompt();

        assert!(!diagnostics.had_error());
        assert_eq!(prompt.statements.len(), 2);
        assert!(prompt.trailing.is_none());
    }

    #[test]
    fn test_parser_13_variable_ids_are_distinct() {
        let (statements, _) = parse_source("a; a;");

        let ids: Vec<_> = statements
            .iter()
            .map(|stmt| match stmt {
                Stmt::Expression(Expr::Variable { id, .. }) => *id,
                other => panic!("unexpected {:?}", other),
            })
            .collect();

        assert_ne!(ids[0], ids[1]);
    }
}
