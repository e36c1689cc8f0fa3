//! Error types and error handling for the lexer.
//!
//! This module defines the lexical errors raised while scanning. It includes:
//!
//! - Error structures with source position information
//! - One variant per kind of rejected input, carrying the offending text
//! - The `line L, column C: message, found 'text'` display format
//! - Source snippets with a caret under the offending character

pub mod errors;
