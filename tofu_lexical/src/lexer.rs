//! Contains the [`Lexer`], which turns an [`InputStream`] into [`Token`]s.

use std::str::FromStr;

use getset::Getters;
use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use tofu_base::source_file::Location;

use crate::{
    error::{Error, ErrorKind},
    input_stream::InputStream,
    token::{
        BinaryOperator, BinaryOperatorKind, Keyword, KeywordKind, Number, StringLiteral, Symbol,
        Token, UnaryOperator, UnaryOperatorKind, ESCAPES,
    },
};

lazy_static! {
    /// Every operator literal, unary ones first. The operator scan narrows this table down.
    static ref OPERATOR_CANDIDATES: Vec<&'static str> = UnaryOperatorKind::iter()
        .map(UnaryOperatorKind::as_str)
        .chain(BinaryOperatorKind::iter().map(BinaryOperatorKind::as_str))
        .collect();
}

fn is_whitespace(character: char) -> bool { matches!(character, ' ' | '\t' | '\n' | '\r') }

fn is_symbol_start(character: char) -> bool {
    character.is_ascii_alphabetic() || character == '$' || character == '_'
}

fn is_symbol_body(character: char) -> bool {
    is_symbol_start(character) || character.is_ascii_digit()
}

fn is_operator_start(character: char) -> bool {
    OPERATOR_CANDIDATES
        .iter()
        .any(|operator| operator.starts_with(character))
}

/// Reads tokens out of an [`InputStream`] on demand, with one token of lookahead.
///
/// A failed scan is not rolled back: the characters it consumed stay consumed, and there is no
/// resynchronization. Callers should stop at the first error.
#[derive(Debug, Clone, Getters)]
pub struct Lexer {
    /// Gets the underlying input stream.
    #[get = "pub"]
    input_stream: InputStream,

    buffered: Option<Result<Token, Error>>,
    halted: bool,
}

impl Lexer {
    /// Creates a lexer reading from the given input stream.
    #[must_use]
    pub fn new(input_stream: InputStream) -> Self {
        Self {
            input_stream,
            buffered: None,
            halted: false,
        }
    }

    /// Returns the result of the next scan without consuming it.
    ///
    /// The result is buffered, so calling this again, or calling [`Self::next_token`] afterwards,
    /// does not scan the input a second time.
    pub fn peek_token(&mut self) -> &Result<Token, Error> {
        let result = match self.buffered.take() {
            Some(result) => result,
            None => self.read_next(),
        };

        self.buffered.insert(result)
    }

    /// Consumes the next token, taking the buffered one if [`Self::peek_token`] was called before.
    ///
    /// # Errors
    /// Returns an [`Error`] located at the input stream's cursor when the upcoming characters do not
    /// form a token. See [`ErrorKind`] for the possible reasons.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.buffered.take().unwrap_or_else(|| self.read_next())
    }

    /// Returns `true` if every character of the input has been consumed.
    ///
    /// This says nothing about whether another token exists: trailing whitespace keeps this `false`
    /// even though the next scan will fail with [`ErrorKind::UnexpectedEndOfInput`].
    #[must_use]
    pub fn is_at_end(&self) -> bool { self.input_stream.is_at_end() }

    fn error(&self, kind: ErrorKind) -> Error { self.input_stream.describe_error(kind) }

    /// Consumes characters as long as the predicate holds on the next one.
    ///
    /// Running out of input right after a consumed character is an error: every token must be
    /// followed by something.
    fn read_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> Result<String, Error> {
        let mut matched = String::new();

        while let Some(character) = self.input_stream.peek() {
            if !predicate(character) {
                break;
            }

            self.input_stream.next();
            matched.push(character);

            if self.input_stream.is_at_end() {
                return Err(self.error(ErrorKind::UnexpectedEndOfInput));
            }
        }

        if matched.is_empty() {
            return Err(self.error(ErrorKind::UnmatchedToken));
        }

        Ok(matched)
    }

    fn read_number(&mut self, location: Location) -> Result<Token, Error> {
        let mut has_dot = false;
        let mut second_dot = false;

        let matched = self.read_while(|character| {
            if character == '.' {
                second_dot = has_dot;
                has_dot = true;
                return !second_dot;
            }

            character.is_ascii_digit()
        });

        // the scan stopped right on the second dot
        if second_dot {
            return Err(self.error(ErrorKind::UnexpectedDot));
        }

        let value = matched?
            .parse::<f64>()
            .expect("digits with at most one dot always parse as a float");

        Ok(Token::Number(Number { location, value }))
    }

    fn read_string(&mut self, location: Location) -> Result<Token, Error> {
        let Some(end) = self.input_stream.next() else {
            return Err(self.error(ErrorKind::UnexpectedEndOfInput));
        };

        let mut value = String::new();
        let mut escaped = false;

        loop {
            let Some(character) = self.input_stream.next() else {
                return Err(self.error(ErrorKind::UnexpectedEndOfInput));
            };

            if escaped {
                let Some((_, replacement)) = ESCAPES.iter().find(|(name, _)| *name == character)
                else {
                    return Err(self.error(ErrorKind::InvalidEscape(character)));
                };

                value.push(*replacement);
                escaped = false;
            } else if character == '\\' {
                escaped = true;
            } else if character == end {
                break;
            } else {
                value.push(character);
            }
        }

        Ok(Token::String(StringLiteral { location, value }))
    }

    fn read_symbol(&mut self, location: Location) -> Result<Token, Error> {
        let name = self.read_while(is_symbol_body)?;

        Ok(KeywordKind::from_str(&name).map_or_else(
            |_| Token::Symbol(Symbol { location, name }),
            |keyword| Token::Keyword(Keyword { location, keyword }),
        ))
    }

    /// Matches the longest operator that the upcoming characters spell.
    ///
    /// At index `i`, only the candidates whose `i`-th character equals the next character survive;
    /// the scan stops once none does.
    fn read_operator(&mut self, location: Location) -> Result<Token, Error> {
        let mut remaining = OPERATOR_CANDIDATES.to_vec();
        let mut index = 0;

        let matched = self.read_while(|character| {
            remaining.retain(|operator| operator.chars().nth(index) == Some(character));
            index += 1;

            !remaining.is_empty()
        })?;

        if let Ok(operator) = BinaryOperatorKind::from_str(&matched) {
            Ok(Token::BinaryOperator(BinaryOperator { location, operator }))
        } else if let Ok(operator) = UnaryOperatorKind::from_str(&matched) {
            Ok(Token::UnaryOperator(UnaryOperator { location, operator }))
        } else {
            Err(self.error(ErrorKind::UnknownOperator(matched)))
        }
    }

    fn read_single(&mut self, token: Token) -> Token {
        self.input_stream.next();
        token
    }

    fn read_next(&mut self) -> Result<Token, Error> {
        let location = self.input_stream.location();

        match self.input_stream.peek() {
            Some('{') => return Ok(self.read_single(Token::OpenTemplate(location))),
            Some('}') => return Ok(self.read_single(Token::CloseTemplate(location))),
            _ => {}
        }

        // the run is optional; running out of input is reported right below
        let _ = self.read_while(is_whitespace);

        let Some(character) = self.input_stream.peek() else {
            return Err(self.error(ErrorKind::UnexpectedEndOfInput));
        };
        let location = self.input_stream.location();

        match character {
            '"' | '\'' => self.read_string(location),
            '0'..='9' => self.read_number(location),
            '(' => Ok(self.read_single(Token::OpenParenthesis(location))),
            ')' => Ok(self.read_single(Token::CloseParenthesis(location))),
            '{' => Ok(self.read_single(Token::OpenTemplate(location))),
            '}' => Ok(self.read_single(Token::CloseTemplate(location))),
            character if is_operator_start(character) => self.read_operator(location),
            character if is_symbol_start(character) => self.read_symbol(location),
            _ => Err(self.error(ErrorKind::UnknownToken)),
        }
    }
}

/// Yields tokens until the input is exhausted. The first error is yielded once and ends the
/// iteration.
impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted || (self.buffered.is_none() && self.is_at_end()) {
            return None;
        }

        let result = self.next_token();
        self.halted = result.is_err();

        Some(result)
    }
}

impl std::iter::FusedIterator for Lexer {}

#[cfg(test)]
mod tests;
