//! Lexical analysis for gust source text.
//!
//! The scanner converts source code into a stream of tokens on demand.
//! It handles:
//!
//! - Recognition of keywords, identifiers, integer and string literals
//! - Greedy resolution of multi-character operators with one character of lookahead
//! - Single-line (`#`) and block (`## ... ##`) comments, skipped or emitted
//! - Token positions for error reporting

pub mod lexer;
pub mod tokens;
