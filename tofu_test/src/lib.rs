//! Shared helpers for the property based test suites of the Tofu crates.

#![deny(missing_docs, missing_debug_implementations, clippy::all)]

pub mod input;
