use std::fmt;

/// Source location for error reporting.
///
/// Both fields are 0-based. `column` counts tokens on the row, not
/// characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub row: usize,
    pub column: usize,
}

/// Token kinds produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Letters, with `.` allowed after the first letter.
    Identifier,
    /// Run of decimal digits.
    Number,
    Colon,
    Tab,
    Space,
    Newline,
    Hash,
    Equals,
    LessThan,
    Dollar,
    LeftParen,
    RightParen,
    /// A `.` that does not continue an identifier.
    Period,
    /// `'...'`, ended by the closing quote or a newline.
    SingleQuoteLiteral,
    /// `"..."`, ended by the closing quote or a newline.
    DoubleQuoteLiteral,
    EndOfInput,
}

impl TokenKind {
    /// Human-readable name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::Colon => "':'",
            Self::Tab => "tab",
            Self::Space => "space",
            Self::Newline => "newline",
            Self::Hash => "'#'",
            Self::Equals => "'='",
            Self::LessThan => "'<'",
            Self::Dollar => "'$'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Period => "'.'",
            Self::SingleQuoteLiteral => "single-quoted literal",
            Self::DoubleQuoteLiteral => "double-quoted literal",
            Self::EndOfInput => "end of input",
        }
    }

    /// Classify a character that always forms a token on its own.
    pub(crate) const fn punctuation(ch: char) -> Option<Self> {
        let kind = match ch {
            '\n' => Self::Newline,
            '\t' => Self::Tab,
            ' ' => Self::Space,
            ':' => Self::Colon,
            '#' => Self::Hash,
            '=' => Self::Equals,
            '$' => Self::Dollar,
            '(' => Self::LeftParen,
            ')' => Self::RightParen,
            '.' => Self::Period,
            '<' => Self::LessThan,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The lexeme. Quoted literals hold their contents without quotes.
    pub text: String,
    /// Bytes of input consumed to produce this token.
    pub byte_length: usize,
    pub span: Span,
}

impl Token {
    /// The end-of-input marker at `span`.
    #[must_use]
    pub const fn end_of_input(span: Span) -> Self {
        Self {
            kind: TokenKind::EndOfInput,
            text: String::new(),
            byte_length: 0,
            span,
        }
    }
}
