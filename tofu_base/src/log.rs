//! Provides the types used to render messages and source excerpts to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::{Color, Style};

use crate::source_file::{Location, SourceFile};

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = Style::Bold.with(match self.severity {
            Severity::Error => Color::Red.with("[error]:"),
            Severity::Info => Color::Green.with("[info]:"),
            Severity::Warning => Color::Yellow.with("[warning]:"),
        });

        let message_part = Style::Bold.with(&self.display);

        write!(f, "{log_header} {message_part}")
    }
}

fn digits(number: usize) -> usize { number.checked_ilog10().map_or(1, |x| x as usize + 1) }

/// Structure implementing [`Display`] that prints the source line containing a location, with a
/// caret under the located character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The source that the location points into.
    pub source_file: &'a SourceFile,

    /// The location to be highlighted.
    pub location: Location,

    /// The help message printed next to the caret.
    pub help_display: Option<T>,
}

impl<'a, T: Display> SourceCodeDisplay<'a, T> {
    fn write_gutter(
        f: &mut std::fmt::Formatter<'_>,
        width: usize,
        line_number: Option<usize>,
    ) -> std::fmt::Result {
        match line_number {
            Some(number) => write!(
                f,
                "{}{:pad$} {} ",
                Style::Bold.with(Color::Cyan.with(number)),
                "",
                Style::Bold.with(Color::Cyan.with("┃")),
                pad = width - digits(number)
            ),
            None => write!(
                f,
                "{:width$} {} ",
                "",
                Style::Bold.with(Color::Cyan.with("┃"))
            ),
        }
    }

    fn write_line(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        width: usize,
        line_number: usize,
        highlight: Option<usize>,
    ) -> std::fmt::Result {
        let Some(line) = self.source_file.get_line(line_number) else {
            return Ok(());
        };

        Self::write_gutter(f, width, Some(line_number))?;

        for (index, character) in line.chars().enumerate() {
            let text = if character == '\t' {
                "    ".to_string()
            } else {
                character.to_string()
            };

            if highlight == Some(index + 1) {
                write!(
                    f,
                    "{}",
                    Style::Underline.with(Style::Bold.with(Color::Red.with(text)))
                )?;
            } else {
                write!(f, "{text}")?;
            }
        }

        writeln!(f)
    }
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Location { line, column } = self.location;
        let width = digits(line);

        writeln!(
            f,
            "{:width$}{} {}:{}:{}",
            "",
            Style::Bold.with(Color::Cyan.with("-->")),
            self.source_file.name(),
            line,
            column
        )?;

        Self::write_gutter(f, width, None)?;
        writeln!(f)?;

        if line > 1 {
            self.write_line(f, width, line - 1, None)?;
        }
        self.write_line(f, width, line, Some(column))?;

        // caret under the located character; tabs were widened to four columns above
        Self::write_gutter(f, width, None)?;
        let line_text = self.source_file.get_line(line).unwrap_or_default();
        let mut offset = 0;
        for character in line_text.chars().take(column.saturating_sub(1)) {
            offset += if character == '\t' { 4 } else { 1 };
        }
        offset += column
            .saturating_sub(1)
            .saturating_sub(line_text.chars().count());

        write!(
            f,
            "{:offset$}{}",
            "",
            Style::Bold.with(Color::Red.with("^"))
        )?;

        if let Some(help_display) = &self.help_display {
            write!(f, " {}: {help_display}", Style::Bold.with("help"))?;
        }

        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::{Message, Severity, SourceCodeDisplay};
    use crate::source_file::{Location, SourceFile};

    fn strip_escapes(text: &str) -> String {
        let mut result = String::new();
        let mut characters = text.chars();

        while let Some(character) = characters.next() {
            if character == '\x1B' {
                for terminator in characters.by_ref() {
                    if terminator == 'm' {
                        break;
                    }
                }
            } else {
                result.push(character);
            }
        }

        result
    }

    #[test]
    fn message_header() {
        let message = Message::new(Severity::Warning, "trailing input");
        assert_eq!(strip_escapes(&message.to_string()), "[warning]: trailing input");
    }

    #[test]
    fn caret_points_at_column() {
        let source_file = SourceFile::new("template", "{ a }\n{ 1.2.3 }");
        let display = SourceCodeDisplay::new(
            &source_file,
            Location { line: 2, column: 6 },
            Some("numbers take one decimal point"),
        );

        let rendered = strip_escapes(&display.to_string());
        let lines = rendered.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], " --> template:2:6");
        assert_eq!(lines[2], "1 ┃ { a }");
        assert_eq!(lines[3], "2 ┃ { 1.2.3 }");
        assert_eq!(lines[4], "  ┃      ^ help: numbers take one decimal point");
    }

    #[test]
    fn caret_past_end_of_line() {
        let source_file = SourceFile::new("template", "\"open");
        let display = SourceCodeDisplay::new(
            &source_file,
            Location { line: 1, column: 6 },
            Option::<i32>::None,
        );

        let rendered = strip_escapes(&display.to_string());
        assert_eq!(rendered.lines().last(), Some("  ┃      ^"));
    }

    #[test]
    fn display_is_a_copyable_value() {
        let source_file = SourceFile::new("template", "{ a }");
        let display = SourceCodeDisplay::new(&source_file, Location::START, Some("here"));
        let copy = display;

        assert_eq!(display, copy);
        assert_eq!(display.to_string(), copy.to_string());
    }
}
