//! Lexical analysis module for ASL.
//!
//! This module contains the lexer (scanner) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization by explicit dispatch on the character at the cursor
//! - Recognition of reserved words, identifiers, literals, and operators
//! - Line/column tracking for error reporting
//! - Comments and whitespace, emitted on the hidden channel

pub mod lexer;
pub mod literals;
pub mod tokens;
