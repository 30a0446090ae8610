//! Contains the [`TokenStream`] struct.

use std::sync::Arc;

use derive_more::Deref;
use tofu_base::{diagnostic::Handler, source_file::SourceFile};

use crate::{error::Error, input_stream::InputStream, lexer::Lexer, token::Token};

/// Is the list of tokens read from a whole source file.
///
/// Tokenization stops at the first lexical error, so the list holds every token read before it.
#[derive(Debug, Clone, PartialEq, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Tokenizes the given source code.
    ///
    /// This function calls [`Lexer::next_token()`] repeatedly until the source is exhausted. The
    /// first error encountered is sent to the `handler` and ends the tokenization.
    #[must_use]
    pub fn tokenize(source_file: &Arc<SourceFile>, handler: &dyn Handler<Error>) -> Self {
        let mut lexer = Lexer::new(InputStream::new(source_file.clone()));
        let mut tokens = Vec::new();

        while !lexer.is_at_end() {
            match lexer.next_token() {
                Ok(token) => tokens.push(token),
                Err(error) => {
                    handler.receive(error);
                    break;
                }
            }
        }

        Self { tokens }
    }

    /// Consumes the [`TokenStream`] and returns the underlying vector of tokens.
    #[must_use]
    pub fn into_vec(self) -> Vec<Token> { self.tokens }
}
