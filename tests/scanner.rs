#[cfg(test)]
mod scanner_tests {
    use rill::diagnostics::Reporter;
    use rill::scanner::Scanner;
    use rill::token::{Token, TokenType};

    fn scan(source: &str) -> (Vec<Token>, Reporter) {
        let reporter = Reporter::new();
        let tokens = Scanner::new(source, reporter.clone()).scan_tokens();

        (tokens, reporter)
    }

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let (tokens, reporter) = scan(source);

        assert!(
            !reporter.has_error(),
            "unexpected diagnostics: {:?}",
            reporter.take()
        );
        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn symbols() {
        assert_token_sequence(
            "({*.,+*});?:",
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
                (TokenType::SEMICOLON, ";"),
                (TokenType::QUESTION, "?"),
                (TokenType::COLON, ":"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn compound_operators() {
        assert_token_sequence(
            "+= -= *= /= == != <= >= = < >",
            &[
                (TokenType::PLUS_EQUAL, "+="),
                (TokenType::MINUS_EQUAL, "-="),
                (TokenType::STAR_EQUAL, "*="),
                (TokenType::SLASH_EQUAL, "/="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::EQUAL, "="),
                (TokenType::LESS, "<"),
                (TokenType::GREATER, ">"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_token_sequence(
            "let mut counter = nil; fn f() { return self; }",
            &[
                (TokenType::LET, "let"),
                (TokenType::MUT, "mut"),
                (TokenType::IDENTIFIER, "counter"),
                (TokenType::EQUAL, "="),
                (TokenType::NIL, "nil"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::FN, "fn"),
                (TokenType::IDENTIFIER, "f"),
                (TokenType::LEFT_PAREN, "("),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::RETURN, "return"),
                (TokenType::SELF, "self"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn loop_keywords() {
        assert_token_sequence(
            "while break continue for class static super",
            &[
                (TokenType::WHILE, "while"),
                (TokenType::BREAK, "break"),
                (TokenType::CONTINUE, "continue"),
                (TokenType::FOR, "for"),
                (TokenType::CLASS, "class"),
                (TokenType::STATIC, "static"),
                (TokenType::SUPER, "super"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn number_literals() {
        let (tokens, _) = scan("0 123 3.14 10.0");

        let values: Vec<f64> = tokens
            .iter()
            .filter_map(|t| match t.token_type {
                TokenType::NUMBER(n) => Some(n),
                _ => None,
            })
            .collect();

        assert_eq!(values, vec![0.0, 123.0, 3.14, 10.0]);
    }

    #[test]
    fn string_literals_both_delimiters() {
        let (tokens, reporter) = scan("\"double\" 'single'");

        assert!(!reporter.has_error());

        let strings: Vec<&str> = tokens
            .iter()
            .filter_map(|t| match &t.token_type {
                TokenType::STRING(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(strings, vec!["double", "single"]);

        // delimiters are kept in the lexeme but stripped from the literal
        assert_eq!(tokens[0].lexeme, "\"double\"");
        assert_eq!(tokens[1].lexeme, "'single'");
    }

    #[test]
    fn multiline_string_tracks_lines() {
        let (tokens, reporter) = scan("'a\nb'\nident");

        assert!(!reporter.has_error());

        // token after the string starts on line 3
        let ident = tokens
            .iter()
            .find(|t| t.token_type == TokenType::IDENTIFIER)
            .unwrap();
        assert_eq!(ident.position.line, 3);
        assert_eq!(ident.position.column, 0);
    }

    #[test]
    fn unterminated_string_is_reported() {
        let (tokens, reporter) = scan("'oops");

        assert!(reporter.has_error());
        assert!(reporter.take()[0].message.contains("Unterminated string"));

        // still EOF-terminated
        assert_eq!(tokens.last().unwrap().token_type, TokenType::EOF);
    }

    #[test]
    fn comments_are_skipped() {
        assert_token_sequence(
            "a // trailing\nb /* inline */ c",
            &[
                (TokenType::IDENTIFIER, "a"),
                (TokenType::IDENTIFIER, "b"),
                (TokenType::IDENTIFIER, "c"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn block_comments_do_not_nest() {
        // the first */ closes, so the trailing tokens are real
        assert_token_sequence(
            "/* outer /* inner */ x",
            &[(TokenType::IDENTIFIER, "x"), (TokenType::EOF, "")],
        );
    }

    #[test]
    fn unterminated_block_comment_is_reported() {
        let (tokens, reporter) = scan("/* never closed");

        assert!(reporter.has_error());
        assert!(reporter.take()[0].message.contains("Unterminated comment"));
        assert_eq!(tokens.last().unwrap().token_type, TokenType::EOF);
    }

    #[test]
    fn slash_is_still_division() {
        assert_token_sequence(
            "a / b",
            &[
                (TokenType::IDENTIFIER, "a"),
                (TokenType::SLASH, "/"),
                (TokenType::IDENTIFIER, "b"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn unexpected_characters_are_reported_and_skipped() {
        let (tokens, reporter) = scan(",.$(#");

        // scanning continued past both bad characters
        let kinds: Vec<&str> = tokens.iter().map(|t| t.token_type.name()).collect();
        assert_eq!(kinds, vec!["COMMA", "DOT", "LEFT_PAREN", "EOF"]);

        let diagnostics = reporter.take();
        assert_eq!(diagnostics.len(), 2);

        for diagnostic in &diagnostics {
            assert!(
                diagnostic.message.contains("Unexpected character"),
                "unexpected message: {}",
                diagnostic.message
            );
        }
    }

    #[test]
    fn positions_are_line_relative() {
        let (tokens, _) = scan("let a = 1;\n  let b = 2;");

        // `b` sits on line 2, column 6
        let b = tokens
            .iter()
            .find(|t| t.lexeme == "b")
            .expect("token 'b' scanned");

        assert_eq!(b.position.line, 2);
        assert_eq!(b.position.column, 6);
    }

    #[test]
    fn lexemes_round_trip_to_source_slices() {
        // single-line source: column doubles as a byte offset
        let source = "let mut x = 1.5 + 'str'; // done";
        let (tokens, reporter) = scan(source);

        assert!(!reporter.has_error());

        for token in tokens.iter().filter(|t| t.token_type != TokenType::EOF) {
            let start = token.position.column as usize;
            let end = start + token.lexeme.len();

            assert_eq!(
                &source[start..end],
                token.lexeme,
                "token {} does not round-trip",
                token
            );
        }
    }
}
