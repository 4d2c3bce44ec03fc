use std::fmt;
use std::str::Chars;

use crate::token::{Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
    /// Input ended before the closing quote or the end of the line.
    UnterminatedLiteral { quote: char },
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {ch:?}")
            }
            Self::UnterminatedLiteral { quote } => {
                write!(f, "unterminated {quote}-quoted literal")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at row {}, column {}", span.row, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokenize a whole rule file into a sequence of tokens.
///
/// The trailing `EndOfInput` token is not included.
///
/// # Errors
///
/// Returns `LexError` on unrecognized characters or unterminated
/// literals.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(input).collect()
}

/// Pull-based tokenizer: one token per call to [`Tokenizer::next_token`].
///
/// Scanning identifiers and numbers reads one character past the lexeme;
/// that character is held in a one-element pushback buffer and served
/// by the next read.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    chars: Chars<'a>,
    pushback: Option<char>,
    row: usize,
    column: usize,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        Self {
            chars: input.chars(),
            pushback: None,
            row: 0,
            column: 0,
            finished: false,
        }
    }

    /// Produce the next token. At end of input this keeps returning an
    /// `EndOfInput` token.
    ///
    /// # Errors
    ///
    /// Returns `LexError` on a character that cannot start a token or
    /// on a literal cut short by end of input.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        let Some(ch) = self.read() else {
            return Ok(Token::end_of_input(span));
        };

        let token = match ch {
            '\r' => {
                let mut byte_length = 1;
                match self.read() {
                    Some('\n') => byte_length += 1,
                    Some(other) => self.unread(other),
                    None => {}
                }
                Token {
                    kind: TokenKind::Newline,
                    text: "\n".to_string(),
                    byte_length,
                    span,
                }
            }
            '\'' | '"' => self.read_literal(ch, span)?,
            _ => {
                if let Some(kind) = TokenKind::punctuation(ch) {
                    Token {
                        kind,
                        text: ch.to_string(),
                        byte_length: ch.len_utf8(),
                        span,
                    }
                } else if ch.is_alphabetic() {
                    // `.` joins letters into one identifier: `foo.bar`
                    self.read_while(TokenKind::Identifier, ch, span, |c| {
                        c.is_alphabetic() || c == '.'
                    })
                } else if ch.is_ascii_digit() {
                    self.read_while(TokenKind::Number, ch, span, |c| c.is_ascii_digit())
                } else {
                    return Err(LexError {
                        kind: LexErrorKind::UnexpectedCharacter(ch),
                        span,
                    });
                }
            }
        };

        if token.kind == TokenKind::Newline {
            self.row += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        Ok(token)
    }

    /// Position the next token will be reported at.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span {
            row: self.row,
            column: self.column,
        }
    }

    fn read(&mut self) -> Option<char> {
        self.pushback.take().or_else(|| self.chars.next())
    }

    fn unread(&mut self, ch: char) {
        debug_assert!(self.pushback.is_none(), "pushback holds one character");
        self.pushback = Some(ch);
    }

    /// Maximal munch: take `first` and every following character that
    /// `accept` allows.
    fn read_while(
        &mut self,
        kind: TokenKind,
        first: char,
        span: Span,
        accept: impl Fn(char) -> bool,
    ) -> Token {
        let mut text = String::from(first);
        while let Some(ch) = self.read() {
            if !accept(ch) {
                self.unread(ch);
                break;
            }
            text.push(ch);
        }

        Token {
            kind,
            byte_length: text.len(),
            text,
            span,
        }
    }

    fn read_literal(&mut self, quote: char, span: Span) -> Result<Token, LexError> {
        let kind = if quote == '\'' {
            TokenKind::SingleQuoteLiteral
        } else {
            TokenKind::DoubleQuoteLiteral
        };

        let mut text = String::new();
        loop {
            match self.read() {
                None => {
                    return Err(LexError {
                        kind: LexErrorKind::UnterminatedLiteral { quote },
                        span,
                    });
                }
                Some(ch) if ch == quote => break,
                // the line break stays in the input as its own token
                Some(ch @ ('\n' | '\r')) => {
                    self.unread(ch);
                    break;
                }
                Some(ch) => text.push(ch),
            }
        }

        Ok(Token {
            kind,
            byte_length: quote.len_utf8() + text.len(),
            text,
            span,
        })
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.kind == TokenKind::EndOfInput => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
