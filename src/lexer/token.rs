use serde::{Deserialize, Serialize};

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// Creates an end-of-input token at the given position
    pub fn eof(line: usize, column: usize) -> Self {
        Token::new(TokenKind::Eof, String::new(), line, column)
    }

    /// Human-readable description used in diagnostics
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Identifier => format!("identifier '{}'", self.lexeme),
            TokenKind::Number => format!("number '{}'", self.lexeme),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

/// All token kinds of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Keywords
    /// `Program` keyword
    Program,
    /// `int` type keyword
    Int,
    /// `float` type keyword
    Float,
    /// `void` type keyword
    Void,
    /// `if` keyword
    If,
    /// `else` keyword
    Else,
    /// `while` keyword
    While,

    // Literals and names
    /// Identifier
    Identifier,
    /// Numeric literal (integer or decimal)
    Number,

    // Operators
    /// Plus operator (+)
    Plus,
    /// Minus operator (-)
    Minus,
    /// Star operator (*)
    Star,
    /// Slash operator (/)
    Slash,
    /// Less than operator (<)
    Lt,
    /// Less than or equal operator (<=)
    LtEq,
    /// Greater than operator (>)
    Gt,
    /// Greater than or equal operator (>=)
    GtEq,
    /// Equality operator (==)
    EqEq,
    /// Inequality operator (!=)
    NotEq,
    /// Assignment operator (=)
    Assign,

    // Delimiters
    /// Semicolon
    Semicolon,
    /// Comma
    Comma,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Left bracket [
    LeftBracket,
    /// Right bracket ]
    RightBracket,
    /// Left brace {
    LeftBrace,
    /// Right brace }
    RightBrace,

    // Special
    /// End of input marker
    Eof,
}

impl TokenKind {
    /// Get keyword kind from an identifier-shaped word
    pub fn keyword(s: &str) -> Option<TokenKind> {
        match s {
            "Program" => Some(TokenKind::Program),
            "int" => Some(TokenKind::Int),
            "float" => Some(TokenKind::Float),
            "void" => Some(TokenKind::Void),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "while" => Some(TokenKind::While),
            _ => None,
        }
    }

    /// Check if token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Program
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Void
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
        )
    }

    /// `int`, `float` or `void`
    pub fn is_type_keyword(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float | TokenKind::Void)
    }

    /// `+` or `-`
    pub fn is_addop(&self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus)
    }

    /// `*` or `/`
    pub fn is_mulop(&self) -> bool {
        matches!(self, TokenKind::Star | TokenKind::Slash)
    }

    /// One of the six relational operators
    pub fn is_relop(&self) -> bool {
        matches!(
            self,
            TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::GtEq
                | TokenKind::EqEq
                | TokenKind::NotEq
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let text = match self {
            TokenKind::Program => "'Program'",
            TokenKind::Int => "'int'",
            TokenKind::Float => "'float'",
            TokenKind::Void => "'void'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Lt => "'<'",
            TokenKind::LtEq => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::GtEq => "'>='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Assign => "'='",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}
