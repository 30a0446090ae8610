//! Contains the code related to the source text handed to the tokenizer.

use std::{fmt::Display, ops::Range, sync::Arc};

use derive_more::Display;
use getset::Getters;

/// Represents a template source held entirely in memory.
///
/// The content is immutable once created; every consumer shares it through an [`Arc`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct SourceFile {
    /// Gets the name used to refer to this source in diagnostics.
    #[get = "pub"]
    name: String,

    content: String,

    /// Byte ranges of every line, terminators included.
    lines: Vec<Range<usize>>,
}

impl SourceFile {
    /// Creates a new source file with the given display name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Arc<Self> {
        let content = content.into();
        let lines = get_line_byte_positions(&content);

        Arc::new(Self {
            name: name.into(),
            content,
            lines,
        })
    }

    /// Creates a source file named `<anonymous>` from the given displayable object.
    #[must_use]
    pub fn anonymous(display: impl Display) -> Arc<Self> {
        Self::new("<anonymous>", display.to_string())
    }

    /// Gets the full text of the source file.
    #[must_use]
    pub fn content(&self) -> &str { &self.content }

    /// Gets the line of the source file at the given line number, without its line terminator.
    ///
    /// The line number starts at 1.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        let range = self.lines.get(line.checked_sub(1)?)?;

        Some(self.content[range.clone()].trim_end_matches(['\n', '\r']))
    }

    /// Gets the number of lines in the source file.
    #[must_use]
    pub fn line_number(&self) -> usize { self.lines.len() }
}

/// Is a struct pointing to a particular character in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "line {}, column {}", line, column)]
pub struct Location {
    /// The line number of the location (starts at 1).
    pub line: usize,

    /// The column number of the location (starts at 1).
    pub column: usize,
}

impl Location {
    /// The location of the first character of any source.
    pub const START: Self = Self { line: 1, column: 1 };
}

impl Default for Location {
    fn default() -> Self { Self::START }
}

/// Represents an element that is located within a source file.
pub trait SourceElement {
    /// Gets the location of the first character of the element.
    fn location(&self) -> Location;
}

impl<T: SourceElement> SourceElement for Box<T> {
    fn location(&self) -> Location { self.as_ref().location() }
}

fn get_line_byte_positions(text: &str) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();
    let mut characters = text.char_indices().peekable();

    while let Some((byte, character)) = characters.next() {
        let end = match character {
            '\r' if matches!(characters.peek(), Some((_, '\n'))) => {
                characters.next();
                byte + 2
            }
            '\n' | '\r' => byte + 1,
            _ => continue,
        };

        results.push(current_position..end);
        current_position = end;
    }

    results.push(current_position..text.len());

    results
}
