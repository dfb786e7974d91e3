use {
    miette::{Diagnostic, SourceSpan},
    thiserror::Error,
};

/// Fatal lexical errors. Scanning stops at the first one.
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum ScanError {
    #[error("Unexpected character '{character}' at {offset}")]
    #[diagnostic(
        code(spartie::scan::unexpected_character),
        help("identifiers are ASCII letters only; numbers take a single decimal point")
    )]
    UnexpectedCharacter {
        line: usize,
        character: char,
        offset: usize,
        #[label("no token starts with this character")]
        span: SourceSpan,
    },
    #[error("Expected a closing: '\"', but none found.")]
    #[diagnostic(code(spartie::scan::unterminated_string))]
    UnterminatedString {
        line: usize,
        offset: usize,
        #[label("string opened here")]
        span: SourceSpan,
    },
}

impl ScanError {
    pub fn unexpected_character(line: usize, character: char, offset: usize) -> Self {
        ScanError::UnexpectedCharacter {
            line,
            character,
            offset,
            span: (offset, character.len_utf8()).into(),
        }
    }

    pub fn unterminated_string(line: usize, offset: usize) -> Self {
        ScanError::UnterminatedString {
            line,
            offset,
            span: (offset, 1).into(),
        }
    }

    /// Line the failing token started on.
    pub fn line(&self) -> usize {
        match self {
            ScanError::UnexpectedCharacter { line, .. } => *line,
            ScanError::UnterminatedString { line, .. } => *line,
        }
    }

    /// Byte offset of the offending character.
    pub fn offset(&self) -> usize {
        match self {
            ScanError::UnexpectedCharacter { offset, .. } => *offset,
            ScanError::UnterminatedString { offset, .. } => *offset,
        }
    }
}
