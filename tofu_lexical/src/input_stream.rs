//! Contains the [`InputStream`], the character reader underneath the lexer.

use std::sync::Arc;

use getset::{CopyGetters, Getters};
use tofu_base::source_file::{Location, SourceFile};

use crate::error::{Error, ErrorKind};

/// Reads the characters of a source file one at a time while keeping track of the line and column
/// of the next unconsumed character.
///
/// The column increments after every consumed character; consuming a `\n` moves to column 1 of the
/// next line. Carriage returns are ordinary characters in this respect.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct InputStream {
    /// Gets the source file that the stream reads from.
    #[get = "pub"]
    source_file: Arc<SourceFile>,

    characters: Vec<char>,

    /// Gets the number of characters consumed so far.
    #[get_copy = "pub"]
    position: usize,

    /// Gets the location of the next character to be consumed.
    #[get_copy = "pub"]
    location: Location,
}

impl InputStream {
    /// Creates a stream positioned at the first character of the given source file.
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>) -> Self {
        let characters = source_file.content().chars().collect();

        Self {
            source_file,
            characters,
            position: 0,
            location: Location::START,
        }
    }

    /// Returns the next character without consuming it, or [`None`] at the end of the input.
    #[must_use]
    pub fn peek(&self) -> Option<char> { self.characters.get(self.position).copied() }

    /// Returns `true` if every character has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool { self.position >= self.characters.len() }

    /// Creates an [`Error`] of the given kind located at the current cursor.
    ///
    /// Callers that want to report the start of a token have to capture [`Self::location`] before
    /// scanning it.
    #[must_use]
    pub fn describe_error(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.location)
    }
}

impl Iterator for InputStream {
    type Item = char;

    /// Consumes the next character.
    fn next(&mut self) -> Option<Self::Item> {
        let character = self.peek()?;
        self.position += 1;

        if character == '\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }

        Some(character)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.characters.len() - self.position;
        (remaining, Some(remaining))
    }
}
