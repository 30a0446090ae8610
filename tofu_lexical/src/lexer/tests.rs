use proptest::{
    prelude::Arbitrary, prop_assert, prop_assert_eq, proptest, test_runner::TestCaseError,
};
use tofu_base::source_file::{Location, SourceElement, SourceFile};
use tofu_test::input::Input;

use super::Lexer;
use crate::{
    error::{Error, ErrorKind},
    input_stream::InputStream,
    token::{self, tests::WhiteSpaces, BinaryOperatorKind, KeywordKind, Token, UnaryOperatorKind},
};

fn lexer(source: &str) -> Lexer { Lexer::new(InputStream::new(SourceFile::anonymous(source))) }

fn tokenize(source: &str) -> Result<Vec<Token>, Error> { lexer(source).collect() }

fn first_error(source: &str) -> Error {
    let mut lexer = lexer(source);

    loop {
        if let Err(error) = lexer.next_token() {
            return error;
        }
    }
}

fn render(tokens: &[Token]) -> Vec<String> { tokens.iter().map(ToString::to_string).collect() }

#[test]
fn end_to_end() {
    let tokens = tokenize("{ $asd ( )) \"hi\" }").unwrap();

    assert!(matches!(tokens[0], Token::OpenTemplate(..)));
    assert_eq!(tokens[1].as_symbol().unwrap().name, "$asd");
    assert!(matches!(tokens[2], Token::OpenParenthesis(..)));
    assert!(matches!(tokens[3], Token::CloseParenthesis(..)));
    assert!(matches!(tokens[4], Token::CloseParenthesis(..)));
    assert_eq!(tokens[5].as_string().unwrap().value, "hi");
    assert!(matches!(tokens[6], Token::CloseTemplate(..)));
    assert_eq!(tokens.len(), 7);
}

#[test]
fn expression_with_every_category() {
    let tokens = tokenize("{ !(count >= 10.5) && name ?? 'anonymous' === undefined }").unwrap();

    assert_eq!(
        render(&tokens),
        [
            "{", "!", "(", "count", ">=", "10.5", ")", "&&", "name", "??", "\"anonymous\"", "===",
            "undefined", "}"
        ]
    );
    assert_eq!(
        tokens[1].as_unary_operator().unwrap().operator,
        UnaryOperatorKind::Not
    );
    assert_eq!(
        tokens[12].as_keyword().unwrap().keyword,
        KeywordKind::Undefined
    );
}

#[test]
fn locations_point_at_lexeme_start() {
    let tokens = tokenize("{ a\n  (b) }").unwrap();
    let locations = tokens.iter().map(SourceElement::location).collect::<Vec<_>>();

    assert_eq!(
        locations,
        [
            Location { line: 1, column: 1 },
            Location { line: 1, column: 3 },
            Location { line: 2, column: 3 },
            Location { line: 2, column: 4 },
            Location { line: 2, column: 5 },
            Location { line: 2, column: 7 },
        ]
    );
}

#[test]
fn whitespace_is_transparent() {
    let spaced = tokenize("{ ( a + 1 ) * \"x y\" }").unwrap();
    let packed = tokenize("{(a+1)*\"x y\"}").unwrap();

    assert_eq!(render(&spaced), render(&packed));
}

#[test]
fn longest_match() {
    let token = lexer("=== ").next_token().unwrap();
    assert_eq!(
        token.as_binary_operator().unwrap().operator,
        BinaryOperatorKind::HardEquals
    );

    let token = lexer("** ").next_token().unwrap();
    assert_eq!(
        token.as_binary_operator().unwrap().operator,
        BinaryOperatorKind::Exponent
    );

    let tokens = tokenize("{!==!}").unwrap();
    assert_eq!(
        tokens[1].as_binary_operator().unwrap().operator,
        BinaryOperatorKind::HardNotEquals
    );
    assert_eq!(
        tokens[2].as_unary_operator().unwrap().operator,
        UnaryOperatorKind::Not
    );
}

#[test]
fn every_operator_literal() {
    let token = lexer("! ").next_token().unwrap();
    assert_eq!(token.as_unary_operator().unwrap().operator.as_str(), "!");

    for operator in [
        "<", "<=", "==", "===", ">=", ">", "!=", "!==", "&&", "||", "^", "??", "+", "-", "*", "**",
        "/", "%",
    ] {
        let token = lexer(&format!("{operator}x")).next_token().unwrap();
        assert_eq!(token.as_binary_operator().unwrap().operator.as_str(), operator);
    }
}

#[test]
fn unknown_operator() {
    let error = lexer("= ").next_token().unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnknownOperator("=".to_string()));
    assert_eq!(error.to_string(), "Unknown operator \"=\" at line 1, column 2");

    let error = lexer("a & b").find_map(Result::err).unwrap();
    assert_eq!(error.kind, ErrorKind::UnknownOperator("&".to_string()));
}

#[test]
fn string_escapes() {
    let token = lexer(r#""a\nb""#).next_token().unwrap();
    assert_eq!(token.as_string().unwrap().value, "a\nb");

    let token = lexer(r"'\\'").next_token().unwrap();
    assert_eq!(token.as_string().unwrap().value, "\\");

    let token = lexer(r#"'\t\r\0\'\"'"#).next_token().unwrap();
    assert_eq!(token.as_string().unwrap().value, "\t\r\0'\"");
}

#[test]
fn string_delimiters() {
    let tokens = tokenize(r#"{ "it's" 'say "hi"' '' }"#).unwrap();

    assert_eq!(tokens[1].as_string().unwrap().value, "it's");
    assert_eq!(tokens[2].as_string().unwrap().value, "say \"hi\"");
    assert_eq!(tokens[3].as_string().unwrap().value, "");
}

#[test]
fn invalid_escape() {
    let error = lexer(r#""a\qb""#).next_token().unwrap_err();

    assert_eq!(error.kind, ErrorKind::InvalidEscape('q'));
    assert_eq!(error.location, Location { line: 1, column: 5 });
    assert_eq!(error.to_string(), r#"Invalid escape "\q" at line 1, column 5"#);
}

#[test]
fn unterminated_string() {
    let error = lexer("\"abc").next_token().unwrap_err();

    assert_eq!(error.kind, ErrorKind::UnexpectedEndOfInput);
    assert_eq!(error.location, Location { line: 1, column: 5 });

    let error = lexer("'abc\\'").next_token().unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnexpectedEndOfInput);
}

#[test]
#[allow(clippy::float_cmp)]
fn numbers() {
    let token = lexer("12.5 ").next_token().unwrap();
    assert_eq!(token.as_number().unwrap().value, 12.5);

    let token = lexer("7.)").next_token().unwrap();
    assert_eq!(token.as_number().unwrap().value, 7.0);

    let tokens = tokenize("{0012 3}").unwrap();
    assert_eq!(tokens[1].as_number().unwrap().value, 12.0);
    assert_eq!(tokens[2].as_number().unwrap().value, 3.0);
}

#[test]
fn unexpected_dot() {
    let error = lexer("1.2.3 ").next_token().unwrap_err();

    assert_eq!(error.kind, ErrorKind::UnexpectedDot);
    assert_eq!(error.to_string(), "Unexpected . at line 1, column 4");

    // the dot error wins even when the input ends right after it
    let error = lexer("1..").next_token().unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnexpectedDot);
}

#[test]
fn unknown_token() {
    let error = lexer("@").next_token().unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnknownToken);
    assert_eq!(error.location, Location::START);

    // `.` is a keyword literal but cannot start a token
    let error = lexer(" .").next_token().unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnknownToken);
    assert_eq!(error.location, Location { line: 1, column: 2 });
}

#[test]
fn keywords_and_symbols() {
    let tokens = tokenize("{ null undefined nullable _u $0 }").unwrap();

    assert_eq!(tokens[1].as_keyword().unwrap().keyword, KeywordKind::Null);
    assert_eq!(tokens[2].as_keyword().unwrap().keyword, KeywordKind::Undefined);
    assert_eq!(tokens[3].as_symbol().unwrap().name, "nullable");
    assert_eq!(tokens[4].as_symbol().unwrap().name, "_u");
    assert_eq!(tokens[5].as_symbol().unwrap().name, "$0");
}

#[test]
fn end_of_input_inside_tokens() {
    for (source, column) in [("{ abc", 6), ("42", 3), ("{ a +", 6), ("", 1), ("  \n", 1)] {
        let error = first_error(source);
        assert_eq!(error.kind, ErrorKind::UnexpectedEndOfInput, "source: {source:?}");
        assert_eq!(error.location.column, column, "source: {source:?}");
    }
}

#[test]
fn trailing_whitespace_is_not_the_end() {
    let mut lexer = lexer("{ a } ");

    for _ in 0..3 {
        lexer.next_token().unwrap();
    }

    assert!(!lexer.is_at_end());
    assert_eq!(
        lexer.next_token().unwrap_err().kind,
        ErrorKind::UnexpectedEndOfInput
    );
    assert!(lexer.is_at_end());
}

#[test]
fn unmatched_token() {
    let mut lexer = lexer("abc");
    let error = lexer.read_while(|character| character.is_ascii_digit()).unwrap_err();

    assert_eq!(error.kind, ErrorKind::UnmatchedToken);
    assert_eq!(lexer.input_stream().position(), 0);
}

#[test]
fn peek_is_idempotent() {
    let mut lexer = lexer("{ foo }");
    lexer.next_token().unwrap();

    let first = lexer.peek_token().clone();
    let consumed = lexer.input_stream().position();
    let second = lexer.peek_token().clone();

    assert_eq!(first, second);
    assert_eq!(lexer.input_stream().position(), consumed);

    assert_eq!(lexer.next_token(), first);
    assert_eq!(lexer.input_stream().position(), consumed);
    assert!(matches!(lexer.next_token(), Ok(Token::CloseTemplate(..))));
}

#[test]
fn peeked_error_is_returned_once() {
    let mut lexer = lexer("{ # }");
    lexer.next_token().unwrap();

    assert_eq!(
        lexer.peek_token().as_ref().unwrap_err().kind,
        ErrorKind::UnknownToken
    );
    assert_eq!(lexer.next_token().unwrap_err().kind, ErrorKind::UnknownToken);
}

#[test]
fn iteration_stops_after_first_error() {
    let mut lexer = lexer("{ ( # ) }");

    assert!(lexer.next().unwrap().is_ok());
    assert!(lexer.next().unwrap().is_ok());
    assert!(lexer.next().unwrap().is_err());
    assert!(lexer.next().is_none());
    assert!(lexer.next().is_none());
}

#[test]
fn diagnostic_names_the_failure() {
    let source_file = SourceFile::new("greeting", "{ 'hello\\x' }");
    let error = Lexer::new(InputStream::new(source_file.clone()))
        .find_map(Result::err)
        .unwrap();

    let rendered = error.diagnostic(&source_file).to_string();
    assert!(rendered.contains("Invalid escape \"\\x\""));
    assert!(rendered.contains("greeting:1:11"));
}

/// Advances `location` over `text` with the same rules as the input stream.
fn advance(location: &mut Location, text: &str) {
    for character in text.chars() {
        if character == '\n' {
            location.line += 1;
            location.column = 1;
        } else {
            location.column += 1;
        }
    }
}

proptest! {
    #[test]
    fn template_test(
        parts in proptest::collection::vec(
            (WhiteSpaces::arbitrary(), token::tests::Token::arbitrary()),
            0..12
        ),
        closing_space in WhiteSpaces::arbitrary(),
    ) {
        let mut source = String::from("{");
        let mut location = Location { line: 1, column: 2 };
        let mut expected = vec![token::tests::Token::OpenTemplate];
        let mut expected_locations = vec![Location::START];

        for (white_spaces, token) in &parts {
            let white_spaces = white_spaces.to_string();
            let token_text = token.to_string();

            advance(&mut location, &white_spaces);
            expected_locations.push(location);
            advance(&mut location, &token_text);

            source.push_str(&white_spaces);
            source.push_str(&token_text);
            expected.push(token.clone());
        }

        let closing_space = closing_space.to_string();
        advance(&mut location, &closing_space);
        expected_locations.push(location);
        source.push_str(&closing_space);
        source.push('}');
        expected.push(token::tests::Token::CloseTemplate);

        let tokens = tokenize(&source).map_err(|error| TestCaseError::fail(error.to_string()))?;

        (&expected).assert(tokens.as_slice())?;
        prop_assert_eq!(
            tokens.iter().map(SourceElement::location).collect::<Vec<_>>(),
            expected_locations
        );

        // the same tokens separated by single spaces lex the same way
        let single_spaced = expected
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let tokens = tokenize(&single_spaced)
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        (&expected).assert(tokens.as_slice())?;
    }

    #[test]
    fn peek_then_next_test(source in "\\{[ a-z0-9()!=<>+'\"]{0,24}\\}") {
        let mut peeking = lexer(&source);
        let mut plain = lexer(&source);

        loop {
            let peeked = peeking.peek_token().clone();
            let position = peeking.input_stream().position();
            let next = peeking.next_token();

            prop_assert_eq!(&peeked, &next);
            prop_assert_eq!(position, peeking.input_stream().position());
            prop_assert_eq!(&next, &plain.next_token());

            if next.is_err() || peeking.is_at_end() {
                break;
            }
        }

        prop_assert!(peeking.input_stream().position() <= source.chars().count());
    }
}
