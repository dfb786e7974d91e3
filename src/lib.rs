//! Scanner for the Spartie teaching language.
//!
//! Turns source text into a flat list of [`Token`]s for a downstream parser. Whitespace and
//! `//` comments are dropped; the first lexical error stops the scan.

use culpa::throws;

pub mod error;
pub mod scanner;
pub mod token;

pub use {
    error::ScanError,
    scanner::Scanner,
    token::{SourcePosition, Token, TokenType},
};

/// Scan `source` into tokens.
#[throws(ScanError)]
pub fn scan(source: &str) -> Vec<Token<'_>> {
    Scanner::new(source).scan()?
}
