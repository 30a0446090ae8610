//! This crate implements the lexical analysis of Tofu template expressions. A template expression
//! lives between `{` and `}` and is made of numbers, quoted strings, symbols, keywords, operators
//! and parentheses.
//!
//! The entry point is [`lexer::Lexer`], which reads an [`input_stream::InputStream`] one token at a
//! time. [`token_stream::TokenStream`] drives a lexer to completion when the whole sequence is
//! wanted at once.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod error;
pub mod input_stream;
pub mod lexer;
pub mod token;
pub mod token_stream;
