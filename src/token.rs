use {maplit::hashmap, std::collections::HashMap, std::sync::OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Single-character tokens.
    Add,
    Subtract,
    Multiply,
    Divide,
    Assign,
    Not,
    Semicolon,
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    Comma,

    // Comparison and logic.
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    Equivalent,
    NotEqual,
    And,
    Or,

    // Literals
    String,
    Number,
    Identifier,

    // Keywords
    KwIf,
    KwElse,
    KwFor,
    KwWhile,
    KwTrue,
    KwFalse,
    KwFun,
    KwReturn,
    KwVar,
    KwPrint,
    KwNull,

    /// Whitespace, newlines and comments. Never leaves the scanner.
    Ignore,
}

static KEYWORDS: OnceLock<HashMap<&'static str, TokenType>> = OnceLock::new();

fn keywords() -> &'static HashMap<&'static str, TokenType> {
    KEYWORDS.get_or_init(|| {
        hashmap! {
            "if" => TokenType::KwIf,
            "else" => TokenType::KwElse,
            "for" => TokenType::KwFor,
            "while" => TokenType::KwWhile,
            "true" => TokenType::KwTrue,
            "false" => TokenType::KwFalse,
            "fun" => TokenType::KwFun,
            "return" => TokenType::KwReturn,
            "var" => TokenType::KwVar,
            "print" => TokenType::KwPrint,
            "null" => TokenType::KwNull,
        }
    })
}

impl TokenType {
    /// Exact-match keyword lookup.
    pub fn keyword(word: &str) -> Option<TokenType> {
        keywords().get(word).copied()
    }

    pub fn is_keyword(&self) -> bool {
        keywords().values().any(|kw| kw == self)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Add => "ADD",
            TokenType::Subtract => "SUBTRACT",
            TokenType::Multiply => "MULTIPLY",
            TokenType::Divide => "DIVIDE",
            TokenType::Assign => "ASSIGN",
            TokenType::Not => "NOT",
            TokenType::Semicolon => "SEMICOLON",
            TokenType::LeftBrace => "LEFT_BRACE",
            TokenType::RightBrace => "RIGHT_BRACE",
            TokenType::LeftParen => "LEFT_PAREN",
            TokenType::RightParen => "RIGHT_PAREN",
            TokenType::Comma => "COMMA",
            TokenType::LessThan => "LESS_THAN",
            TokenType::LessEqual => "LESS_EQUAL",
            TokenType::GreaterThan => "GREATER_THAN",
            TokenType::GreaterEqual => "GREATER_EQUAL",
            TokenType::Equivalent => "EQUIVALENT",
            TokenType::NotEqual => "NOT_EQUAL",
            TokenType::And => "AND",
            TokenType::Or => "OR",
            TokenType::String => "STRING",
            TokenType::Number => "NUMBER",
            TokenType::Identifier => "IDENTIFIER",
            TokenType::KwIf => "IF",
            TokenType::KwElse => "ELSE",
            TokenType::KwFor => "FOR",
            TokenType::KwWhile => "WHILE",
            TokenType::KwTrue => "TRUE",
            TokenType::KwFalse => "FALSE",
            TokenType::KwFun => "FUN",
            TokenType::KwReturn => "RETURN",
            TokenType::KwVar => "VAR",
            TokenType::KwPrint => "PRINT",
            TokenType::KwNull => "NULL",
            TokenType::Ignore => "IGNORE",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePosition {
    pub line: usize,
    /// Byte range of the whole match, string quotes included.
    pub span: std::ops::Range<usize>,
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}..{}]", self.line, self.span.start, self.span.end)
    }
}

/// A classified slice of the source. The lexeme borrows from the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenType,
    pub lexeme: &'src str,
    pub position: SourcePosition,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenType, lexeme: &'src str, position: SourcePosition) -> Self {
        Self {
            kind,
            lexeme,
            position,
        }
    }

    pub fn line(&self) -> usize {
        self.position.line
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.kind, self.lexeme, self.position.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_exact() {
        assert_eq!(TokenType::keyword("while"), Some(TokenType::KwWhile));
        assert_eq!(TokenType::keyword("null"), Some(TokenType::KwNull));
        assert_eq!(TokenType::keyword("iffy"), None);
        assert_eq!(TokenType::keyword("If"), None);
        assert_eq!(TokenType::keyword("nil"), None);
    }

    #[test]
    fn keyword_classification() {
        assert!(TokenType::KwReturn.is_keyword());
        assert!(!TokenType::Identifier.is_keyword());
        assert!(!TokenType::And.is_keyword());
    }

    #[test]
    fn display_uses_screaming_names() {
        assert_eq!(TokenType::LessEqual.to_string(), "LESS_EQUAL");
        assert_eq!(TokenType::KwPrint.to_string(), "PRINT");

        let token = Token::new(
            TokenType::Identifier,
            "x",
            SourcePosition {
                line: 3,
                span: 10..11,
            },
        );
        assert_eq!(token.to_string(), "IDENTIFIER x 3");
        assert_eq!(token.position.to_string(), "[3:10..11]");
    }
}
