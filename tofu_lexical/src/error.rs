//! Contains all kinds of lexical errors that can occur while tokenizing a template expression.

use std::fmt::Display;

use derive_new::new;
use enum_as_inner::EnumAsInner;
use tofu_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::{Location, SourceElement, SourceFile},
};

/// Is an enumeration of the reasons a scan can fail.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, thiserror::Error)]
pub enum ErrorKind {
    /// The input ended in the middle of a token, or right after leading whitespace.
    #[error("Unexpected EOF")]
    UnexpectedEndOfInput,

    /// A read-while scan matched no character at all.
    #[error("Unmatched token")]
    UnmatchedToken,

    /// A number literal contains a second decimal point.
    #[error("Unexpected .")]
    UnexpectedDot,

    /// The matched operator run is neither a unary nor a binary operator.
    #[error("Unknown operator \"{0}\"")]
    UnknownOperator(String),

    /// The character cannot start any token.
    #[error("Unknown token")]
    UnknownToken,

    /// A backslash inside a string literal is followed by an unrecognized character.
    #[error("Invalid escape \"\\{0}\"")]
    InvalidEscape(char),
}

impl ErrorKind {
    fn help(&self) -> Option<&'static str> {
        match self {
            Self::UnexpectedEndOfInput => {
                Some("every token must be followed by another token or a closing `}`")
            }
            Self::UnmatchedToken | Self::UnknownOperator(..) => None,
            Self::UnexpectedDot => Some("a number may contain at most one decimal point"),
            Self::UnknownToken => Some("this character cannot start a token"),
            Self::InvalidEscape(..) => {
                Some(r#"recognized escapes are \n, \r, \t, \\, \', \" and \0"#)
            }
        }
    }
}

/// A lexical error together with the position of the input stream when it was raised.
///
/// The location is the cursor at the moment of failure, not the start of the failed token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error, new)]
#[error("{kind} at {location}")]
pub struct Error {
    /// The reason of the failure.
    pub kind: ErrorKind,

    /// Where the input stream stood when the failure was described.
    pub location: Location,
}

impl SourceElement for Error {
    fn location(&self) -> Location { self.location }
}

impl Error {
    /// Gets a displayable diagnostic that prints this error together with the offending line of
    /// the given source.
    #[must_use]
    pub fn diagnostic<'a>(&'a self, source_file: &'a SourceFile) -> Diagnostic<'a> {
        Diagnostic {
            error: self,
            source_file,
        }
    }
}

/// Renders an [`Error`] as a console diagnostic.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostic<'a> {
    error: &'a Error,
    source_file: &'a SourceFile,
}

impl Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, &self.error.kind),
            SourceCodeDisplay::new(
                self.source_file,
                self.error.location,
                self.error.kind.help()
            )
        )
    }
}
