//! Is a module containing the [`Token`] type and all of its related types.

use std::{collections::HashMap, fmt::Display, str::FromStr};

use enum_as_inner::EnumAsInner;
use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;
use tofu_base::source_file::{Location, SourceElement};

/// The escape sequences recognized inside string literals, as pairs of the character following
/// the backslash and the character it stands for.
pub const ESCAPES: [(char, char); 7] = [
    ('n', '\n'),
    ('r', '\r'),
    ('t', '\t'),
    ('\\', '\\'),
    ('\'', '\''),
    ('"', '"'),
    ('0', '\0'),
];

/// Is an enumeration representing keywords of the template-expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    Period,
    Null,
    Undefined,
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref STRING_KEYWORD_MAP: HashMap<&'static str, KeywordKind> =
                KeywordKind::iter().map(|keyword| (keyword.as_str(), keyword)).collect();
        }
        STRING_KEYWORD_MAP.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the string representation of the keyword as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Period => ".",
            Self::Null => "null",
            Self::Undefined => "undefined",
        }
    }
}

impl Display for KeywordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Is an error that is returned when a string cannot be parsed into an operator kind in [`FromStr`]
/// trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of operator.")]
pub struct OperatorParseError;

/// Is an enumeration of the prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum UnaryOperatorKind {
    /// `!`
    Not,
}

impl UnaryOperatorKind {
    /// Gets the string representation of the operator as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Not => "!",
        }
    }
}

impl FromStr for UnaryOperatorKind {
    type Err = OperatorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|operator| operator.as_str() == s)
            .ok_or(OperatorParseError)
    }
}

impl Display for UnaryOperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Is an enumeration of the infix operators. Bitwise operators are not part of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum BinaryOperatorKind {
    Less,
    LessOrEquals,
    SoftEquals,
    HardEquals,
    GreaterOrEquals,
    Greater,
    SoftNotEquals,
    HardNotEquals,
    And,
    Or,
    Xor,
    NullCoalescing,
    Add,
    Subtract,
    Multiply,
    Exponent,
    Divide,
    Modulo,
}

impl BinaryOperatorKind {
    /// Gets the string representation of the operator as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessOrEquals => "<=",
            Self::SoftEquals => "==",
            Self::HardEquals => "===",
            Self::GreaterOrEquals => ">=",
            Self::Greater => ">",
            Self::SoftNotEquals => "!=",
            Self::HardNotEquals => "!==",
            Self::And => "&&",
            Self::Or => "||",
            Self::Xor => "^",
            Self::NullCoalescing => "??",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Exponent => "**",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }
}

impl FromStr for BinaryOperatorKind {
    type Err = OperatorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref STRING_OPERATOR_MAP: HashMap<&'static str, BinaryOperatorKind> =
                BinaryOperatorKind::iter()
                    .map(|operator| (operator.as_str(), operator))
                    .collect();
        }
        STRING_OPERATOR_MAP.get(s).copied().ok_or(OperatorParseError)
    }
}

impl Display for BinaryOperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Is an enumeration containing all kinds of tokens of the template-expression language.
///
/// Every variant knows the [`Location`] of its first character.
#[derive(Debug, Clone, PartialEq, EnumAsInner)]
pub enum Token {
    /// `{`
    OpenTemplate(Location),

    /// `}`
    CloseTemplate(Location),

    /// `(`
    OpenParenthesis(Location),

    /// `)`
    CloseParenthesis(Location),

    /// A number literal.
    Number(Number),

    /// A quoted string literal.
    String(StringLiteral),

    /// A reserved word.
    Keyword(Keyword),

    /// A name that is not a keyword.
    Symbol(Symbol),

    /// A prefix operator.
    UnaryOperator(UnaryOperator),

    /// An infix operator.
    BinaryOperator(BinaryOperator),
}

impl SourceElement for Token {
    fn location(&self) -> Location {
        match self {
            Self::OpenTemplate(location)
            | Self::CloseTemplate(location)
            | Self::OpenParenthesis(location)
            | Self::CloseParenthesis(location) => *location,
            Self::Number(token) => token.location,
            Self::String(token) => token.location,
            Self::Keyword(token) => token.location,
            Self::Symbol(token) => token.location,
            Self::UnaryOperator(token) => token.location,
            Self::BinaryOperator(token) => token.location,
        }
    }
}

/// Renders the token back to source text that lexes to an equal token.
impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenTemplate(..) => f.write_str("{"),
            Self::CloseTemplate(..) => f.write_str("}"),
            Self::OpenParenthesis(..) => f.write_str("("),
            Self::CloseParenthesis(..) => f.write_str(")"),
            Self::Number(token) => write!(f, "{}", token.value),
            Self::String(token) => Display::fmt(token, f),
            Self::Keyword(token) => Display::fmt(&token.keyword, f),
            Self::Symbol(token) => f.write_str(&token.name),
            Self::UnaryOperator(token) => Display::fmt(&token.operator, f),
            Self::BinaryOperator(token) => Display::fmt(&token.operator, f),
        }
    }
}

/// Represents a number literal; all numbers are 64-bit floating point values.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Number {
    /// Is the location of the first digit.
    pub location: Location,

    /// Is the parsed value of the literal.
    pub value: f64,
}

/// Represents a string literal enclosed in either `"` or `'`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringLiteral {
    /// Is the location of the opening quote.
    pub location: Location,

    /// Is the content of the literal with every escape sequence resolved.
    pub value: String,
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("\"")?;

        for character in self.value.chars() {
            match ESCAPES.iter().find(|(_, escaped)| *escaped == character) {
                Some((name, _)) => write!(f, "\\{name}")?,
                None => write!(f, "{character}")?,
            }
        }

        f.write_str("\"")
    }
}

/// Represents a contiguous sequence of characters that are reserved for a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keyword {
    /// Is the location of the first character of the keyword.
    pub location: Location,

    /// Is the [`KeywordKind`] that the token represents.
    pub keyword: KeywordKind,
}

/// Represents a name made of ASCII letters, digits, `$` and `_`, not starting with a digit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    /// Is the location of the first character of the symbol.
    pub location: Location,

    /// Is the name exactly as written, `$` included.
    pub name: String,
}

/// Represents a prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnaryOperator {
    /// Is the location of the first character of the operator.
    pub location: Location,

    /// Is the operator that the token represents.
    pub operator: UnaryOperatorKind,
}

/// Represents an infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BinaryOperator {
    /// Is the location of the first character of the operator.
    pub location: Location,

    /// Is the operator that the token represents.
    pub operator: BinaryOperatorKind,
}
