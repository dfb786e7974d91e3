use {
    crate::{
        error::ScanError,
        token::{SourcePosition, Token, TokenType},
    },
    culpa::{throw, throws},
    std::iter::FusedIterator,
    tracing::{debug, trace},
};

/// What a recognizer claims at the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Recognized {
    /// Token type and the number of bytes it spans.
    Token(TokenType, usize),
    UnterminatedString,
}

/// Looks at the unscanned remainder of the source. `None` means "not mine, try the next one".
type Recognizer = fn(&str) -> Option<Recognized>;

/// Tried in this order for every token; the first claim wins.
const RECOGNIZERS: [Recognizer; 6] = [
    single_character,
    comparison,
    divide_or_comment,
    string,
    number,
    identifier_or_keyword,
];

/// Current scanner state for iterating over the source input.
pub struct Scanner<'src> {
    source: &'src str,
    line: usize,    // Line of the character under the cursor
    current: usize, // Byte position inside the utf8 source
    failed: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            line: 1,
            current: 0,
            failed: false,
        }
    }

    /// Scan the whole input, dropping whitespace and comments.
    #[throws(ScanError)]
    pub fn scan(self) -> Vec<Token<'src>> {
        let tokens = self
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|error| debug!(%error, line = error.line(), "scan failed"))?;
        debug!(count = tokens.len(), "scan complete");
        tokens
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Run the recognizer chain once at the cursor. May return an `Ignore` token.
    #[throws(ScanError)]
    fn next_token(&mut self) -> Token<'src> {
        let start = self.current;
        let line = self.line;
        let rest = &self.source[start..];

        let (kind, len) = match RECOGNIZERS.iter().find_map(|recognize| recognize(rest)) {
            Some(Recognized::Token(kind, len)) => (kind, len),
            Some(Recognized::UnterminatedString) => {
                throw!(ScanError::unterminated_string(line, start))
            }
            None => {
                let character = rest.chars().next().unwrap_or('\0');
                throw!(ScanError::unexpected_character(line, character, start))
            }
        };

        let matched = &rest[..len];
        self.current += len;
        self.line += matched.bytes().filter(|&b| b == b'\n').count();

        let lexeme = match kind {
            // Skip " " around the string value.
            TokenType::String => &matched[1..len - 1],
            _ => matched,
        };
        let token = Token::new(
            kind,
            lexeme,
            SourcePosition {
                line,
                span: start..self.current,
            },
        );
        if kind != TokenType::Ignore {
            trace!(line, kind = %kind, lexeme, "token");
        }
        token
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Result<Token<'src>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.failed && !self.is_at_end() {
            match self.next_token() {
                Ok(token) if token.kind == TokenType::Ignore => continue,
                Ok(token) => return Some(Ok(token)),
                Err(error) => {
                    self.failed = true;
                    return Some(Err(error));
                }
            }
        }
        None
    }
}

impl FusedIterator for Scanner<'_> {}

fn followed_by(bytes: &[u8], expected: u8) -> bool {
    bytes.get(1) == Some(&expected)
}

fn single_character(rest: &str) -> Option<Recognized> {
    let bytes = rest.as_bytes();
    let kind = match *bytes.first()? {
        b' ' | b'\n' => TokenType::Ignore,
        b'+' => TokenType::Add,
        b'-' => TokenType::Subtract,
        b'*' => TokenType::Multiply,
        b';' => TokenType::Semicolon,
        b'{' => TokenType::LeftBrace,
        b'}' => TokenType::RightBrace,
        b'(' => TokenType::LeftParen,
        b')' => TokenType::RightParen,
        b',' => TokenType::Comma,
        // `==` and `!=` belong to the comparison tier.
        b'=' if !followed_by(bytes, b'=') => TokenType::Assign,
        b'!' if !followed_by(bytes, b'=') => TokenType::Not,
        _ => return None,
    };
    Some(Recognized::Token(kind, 1))
}

fn comparison(rest: &str) -> Option<Recognized> {
    let bytes = rest.as_bytes();
    let (kind, len) = match (*bytes.first()?, followed_by(bytes, b'=')) {
        (b'|', _) => (TokenType::Or, 1),
        (b'&', _) => (TokenType::And, 1),
        (b'<', true) => (TokenType::LessEqual, 2),
        (b'<', false) => (TokenType::LessThan, 1),
        (b'>', true) => (TokenType::GreaterEqual, 2),
        (b'>', false) => (TokenType::GreaterThan, 1),
        (b'!', true) => (TokenType::NotEqual, 2),
        (b'=', true) => (TokenType::Equivalent, 2),
        _ => return None,
    };
    Some(Recognized::Token(kind, len))
}

fn divide_or_comment(rest: &str) -> Option<Recognized> {
    let bytes = rest.as_bytes();
    if *bytes.first()? != b'/' {
        return None;
    }
    if !followed_by(bytes, b'/') {
        return Some(Recognized::Token(TokenType::Divide, 1));
    }
    // The newline stays behind so the single-character tier counts it.
    let len = bytes
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(bytes.len());
    Some(Recognized::Token(TokenType::Ignore, len))
}

fn string(rest: &str) -> Option<Recognized> {
    let bytes = rest.as_bytes();
    if *bytes.first()? != b'"' {
        return None;
    }
    Some(match bytes[1..].iter().position(|&b| b == b'"') {
        Some(inner) => Recognized::Token(TokenType::String, inner + 2),
        None => Recognized::UnterminatedString,
    })
}

fn number(rest: &str) -> Option<Recognized> {
    let bytes = rest.as_bytes();
    if !bytes.first()?.is_ascii_digit() {
        return None;
    }
    let mut seen_decimal_point = false;
    let len = bytes
        .iter()
        .take_while(|&&b| match b {
            b'0'..=b'9' => true,
            b'.' if !seen_decimal_point => {
                seen_decimal_point = true;
                true
            }
            _ => false,
        })
        .count();
    Some(Recognized::Token(TokenType::Number, len))
}

fn identifier_or_keyword(rest: &str) -> Option<Recognized> {
    let len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    if len == 0 {
        return None;
    }
    let kind = TokenType::keyword(&rest[..len]).unwrap_or(TokenType::Identifier);
    Some(Recognized::Token(kind, len))
}
