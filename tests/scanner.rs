#[cfg(test)]
mod scanner_tests {
    use rox::error::{Diagnostics, LoxError};
    use rox::scanner::*;
    use rox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len(), "tokens: {:?}", tokens);

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    fn assert_token_matches(
        result: &Result<Token, LoxError>,
        expected_type: TokenType,
        expected_lexeme: &str,
    ) {
        match result {
            Ok(token) => {
                assert_eq!(
                    token.token_type, expected_type,
                    "Expected token type {:?}, got {:?}",
                    expected_type, token.token_type
                );
                assert_eq!(
                    token.lexeme, expected_lexeme,
                    "Expected lexeme '{}', got '{}'",
                    expected_lexeme, token.lexeme
                );
            }
            Err(e) => panic!("Expected token but got error: {}", e),
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >= /",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "var forest = nil; break snake_case",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "forest"),
                (TokenType::EQUAL, "="),
                (TokenType::NIL, "nil"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::BREAK, "break"),
                (TokenType::IDENTIFIER, "snake_case"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_number_literals() {
        let tokens: Vec<Token> = Scanner::new("123 3.14 1.").filter_map(Result::ok).collect();

        // `1.` is NUMBER followed by DOT.
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0].to_string(), "NUMBER 123 123.0");
        assert_eq!(tokens[1].to_string(), "NUMBER 3.14 3.14");
        assert_eq!(tokens[2].to_string(), "NUMBER 1 1.0");
        assert_eq!(tokens[3].token_type, TokenType::DOT);
        assert_eq!(tokens[4].token_type, TokenType::EOF);
    }

    #[test]
    fn test_scanner_05_string_literal() {
        let tokens: Vec<Token> = Scanner::new("\"hello world\"")
            .filter_map(Result::ok)
            .collect();

        assert_eq!(tokens[0].lexeme, "\"hello world\"");
        assert_eq!(tokens[0].to_string(), "STRING \"hello world\" hello world");
        match &tokens[0].token_type {
            TokenType::STRING(s) => assert_eq!(s, "hello world"),
            other => panic!("expected STRING, got {:?}", other),
        }
    }

    #[test]
    fn test_scanner_06_unterminated_string() {
        let results: Vec<_> = Scanner::new("\"abc").collect();

        assert_eq!(results.len(), 2);
        match &results[0] {
            Err(e) => assert_eq!(e.to_string(), "[line 1] Error: Unterminated string."),
            Ok(t) => panic!("expected error, got {:?}", t),
        }
        assert_token_matches(&results[1], TokenType::EOF, "");
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let results: Vec<_> = Scanner::new(source).collect();

        // COMMA, DOT, error '$', LEFT_PAREN, error '#', EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(
            errors,
            vec![
                "[line 1] Error: Unexpected character: $",
                "[line 1] Error: Unexpected character: #",
            ]
        );
    }

    #[test]
    fn test_scanner_07_multibyte_unexpected_character() {
        let results: Vec<_> = Scanner::new("é+").collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_err());
        assert_token_matches(&results[1], TokenType::PLUS, "+");
        assert_token_matches(&results[2], TokenType::EOF, "");
    }

    #[test]
    fn test_scanner_08_comments_and_lines() {
        let source = "// leading comment\nvar a;\n\"two\nlines\"\nprint a; // trailing";
        let tokens: Vec<Token> = Scanner::new(source).filter_map(Result::ok).collect();

        let lines: Vec<(String, usize)> = tokens
            .iter()
            .map(|t| (t.lexeme.clone(), t.line))
            .collect();

        assert_eq!(
            lines,
            vec![
                ("var".to_string(), 2),
                ("a".to_string(), 2),
                (";".to_string(), 2),
                ("\"two\nlines\"".to_string(), 4),
                ("print".to_string(), 5),
                ("a".to_string(), 5),
                (";".to_string(), 5),
                ("".to_string(), 5),
            ]
        );
    }

    #[test]
    fn test_scanner_09_scan_tokens_reports_and_continues() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens("var @ x;", &mut diagnostics);

        assert!(diagnostics.had_error());
        assert_eq!(diagnostics.errors().len(), 1);
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens.last().map(|t| t.token_type.clone()), Some(TokenType::EOF));
    }

    #[test]
    fn test_scanner_10_empty_source_yields_only_eof() {
        let results: Vec<_> = Scanner::new("").collect();

        assert_eq!(results.len(), 1);
        assert_token_matches(&results[0], TokenType::EOF, "");
    }

    #[test]
    fn test_scanner_11_json_shape() {
        let tokens: Vec<Token> = Scanner::new("x").filter_map(Result::ok).collect();
        let json = serde_json::to_value(&tokens).expect("tokens serialize");

        assert_eq!(json[0]["lexeme"], "x");
        assert_eq!(json[0]["line"], 1);
        assert_eq!(json[0]["token_type"], "IDENTIFIER");
    }
}
