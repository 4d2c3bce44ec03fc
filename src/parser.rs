use std::fmt;

use tracing::{debug, info, warn};

use crate::Error;
use crate::ast::{CommandLine, Expression, Identifier, Node, Program, Target, VariableReference};
use crate::config::Config;
use crate::lexer::{LexError, Tokenizer};
use crate::token::{Span, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token that the current production does not allow.
    UnexpectedToken {
        found: TokenKind,
        expected: Vec<TokenKind>,
    },
    /// Rule head that is neither an identifier nor a variable.
    InvalidTargetHead { found: String },
    /// `name = ...` while running in strict mode.
    UnsupportedAssignment { name: String },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected } => {
                write!(f, "unexpected {found}")?;
                if !expected.is_empty() {
                    let names: Vec<_> = expected.iter().map(|k| k.name()).collect();
                    write!(f, ", expected {}", names.join(" or "))?;
                }
                Ok(())
            }
            Self::InvalidTargetHead { found } => {
                write!(
                    f,
                    "target name must be an identifier or variable, got '{found}'"
                )
            }
            Self::UnsupportedAssignment { name } => {
                write!(f, "variable assignment is not supported: {name}")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at row {}, column {}", span.row, span.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    /// Token kinds that would have been accepted at the error position.
    #[must_use]
    pub fn expected(&self) -> &[TokenKind] {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, .. } => expected,
            _ => &[],
        }
    }
}

/// Anything that hands out tokens one at a time.
pub trait TokenSource {
    /// Next token; `EndOfInput` once the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns `LexError` when the underlying text cannot be tokenized.
    fn next_token(&mut self) -> Result<Token, LexError>;
}

impl TokenSource for Tokenizer<'_> {
    fn next_token(&mut self) -> Result<Token, LexError> {
        Tokenizer::next_token(self)
    }
}

/// Token source over an already tokenized slice.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }
}

impl TokenSource for TokenCursor<'_> {
    fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(token) = self.tokens.get(self.pos) {
            self.pos += 1;
            return Ok(token.clone());
        }
        let span = self.tokens.last().map_or_else(Span::default, |last| {
            if last.kind == TokenKind::Newline {
                Span {
                    row: last.span.row + 1,
                    column: 0,
                }
            } else {
                Span {
                    row: last.span.row,
                    column: last.span.column + 1,
                }
            }
        });
        Ok(Token::end_of_input(span))
    }
}

/// Parse a token slice into a `Program`.
///
/// # Errors
///
/// Returns `Error::Parse` on grammar violations.
pub fn parse(tokens: &[Token]) -> Result<Program, Error> {
    let mut program = Program::default();
    program.build(&mut TokenCursor::new(tokens))?;
    Ok(program)
}

impl Program {
    /// Append every statement read from `source` to the tree.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or grammar error; nothing after it is
    /// parsed.
    pub fn build<S: TokenSource>(&mut self, source: &mut S) -> Result<(), Error> {
        self.build_with(source, &Config::default())
    }

    /// Like [`Program::build`] with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or grammar error.
    pub fn build_with<S: TokenSource>(
        &mut self,
        source: &mut S,
        config: &Config,
    ) -> Result<(), Error> {
        Parser::new(source, config).statements(self)
    }
}

// program       := { statement }
// statement     := target | assignment | comment line | ignored token
// target        := term ':' prerequisites { TAB recipe }
// assignment    := term '=' ...
// prerequisites := { SPACE | term } NEWLINE
// recipe        := { SPACE | term } NEWLINE
// term          := IDENTIFIER | variable
// variable      := '$' ( '(' IDENTIFIER ')' | '<' )
struct Parser<'a, S> {
    source: &'a mut S,
    config: &'a Config,
    pending: Option<Token>,
}

impl<'a, S: TokenSource> Parser<'a, S> {
    const fn new(source: &'a mut S, config: &'a Config) -> Self {
        Self {
            source,
            config,
            pending: None,
        }
    }

    fn statements(&mut self, program: &mut Program) -> Result<(), Error> {
        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::EndOfInput => return Ok(()),
                TokenKind::Newline => {}
                TokenKind::Identifier | TokenKind::Dollar => {
                    let head_span = token.span;
                    let head = self.term(token)?;
                    let next = self.skip_spaces()?;
                    match next.kind {
                        TokenKind::Colon => {
                            let target = self.target(head, head_span)?;
                            program.tree.push(Node::Target(target));
                        }
                        TokenKind::Equals => self.assignment(&head, head_span)?,
                        TokenKind::Hash => self.skip_line(next)?,
                        _ => {
                            debug!(
                                found = %next.kind,
                                row = next.span.row,
                                column = next.span.column,
                                "term not followed by ':' or '='"
                            );
                            // the following token is dropped; end of input
                            // still has to end the loop
                            if next.kind == TokenKind::EndOfInput {
                                self.push_back(next);
                            }
                        }
                    }
                }
                TokenKind::Number
                | TokenKind::SingleQuoteLiteral
                | TokenKind::DoubleQuoteLiteral => {
                    let next = self.skip_spaces()?;
                    if next.kind == TokenKind::Colon {
                        return Err(ParseError {
                            kind: ParseErrorKind::InvalidTargetHead { found: token.text },
                            span: token.span,
                        }
                        .into());
                    }
                    info!(kind = %token.kind, row = token.span.row, "ignoring token");
                    self.push_back(next);
                }
                TokenKind::Hash => {
                    info!(row = token.span.row, "ignoring comment line");
                    self.skip_line(token)?;
                }
                _ => {
                    info!(
                        kind = %token.kind,
                        row = token.span.row,
                        column = token.span.column,
                        "ignoring token"
                    );
                }
            }
        }
    }

    fn target(&mut self, head: Expression, head_span: Span) -> Result<Target, Error> {
        if !head.is_term() {
            return Err(ParseError {
                kind: ParseErrorKind::InvalidTargetHead {
                    found: head.value().into_owned(),
                },
                span: head_span,
            }
            .into());
        }

        let prerequisites = self.line()?;

        let mut recipe = Vec::new();
        loop {
            let token = self.next()?;
            if token.kind != TokenKind::Tab {
                self.push_back(token);
                break;
            }
            recipe.push(CommandLine { terms: self.line()? });
        }

        Ok(Target {
            head,
            prerequisites,
            recipe,
            expanded: false,
        })
    }

    fn assignment(&mut self, head: &Expression, head_span: Span) -> Result<(), Error> {
        let name = head.name().unwrap_or_default().to_string();
        if self.config.strict {
            return Err(ParseError {
                kind: ParseErrorKind::UnsupportedAssignment { name },
                span: head_span,
            }
            .into());
        }
        warn!(
            name = %name,
            row = head_span.row,
            "variable assignment is not supported, skipping"
        );
        let next = self.next()?;
        self.skip_line(next)
    }

    /// Terms up to the end of the line. Spaces separate terms; any
    /// other token is an error.
    fn line(&mut self) -> Result<Vec<Expression>, Error> {
        let mut terms = Vec::new();
        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::Newline => break,
                TokenKind::EndOfInput => {
                    self.push_back(token);
                    break;
                }
                TokenKind::Space => {}
                TokenKind::Identifier | TokenKind::Dollar => terms.push(self.term(token)?),
                found => {
                    return Err(unexpected(
                        found,
                        token.span,
                        &[
                            TokenKind::Identifier,
                            TokenKind::Dollar,
                            TokenKind::Space,
                            TokenKind::Newline,
                        ],
                    ));
                }
            }
        }
        Ok(terms)
    }

    fn term(&mut self, token: Token) -> Result<Expression, Error> {
        match token.kind {
            TokenKind::Identifier => Ok(Identifier { name: token.text }.into()),
            TokenKind::Dollar => Ok(self.variable()?.into()),
            found => Err(unexpected(
                found,
                token.span,
                &[TokenKind::Identifier, TokenKind::Dollar],
            )),
        }
    }

    /// Called after `$`.
    fn variable(&mut self) -> Result<VariableReference, Error> {
        let token = self.next()?;
        match token.kind {
            TokenKind::LessThan => Ok(VariableReference::all_prerequisites()),
            TokenKind::LeftParen => {
                let name = self.next()?;
                if name.kind != TokenKind::Identifier {
                    return Err(unexpected(name.kind, name.span, &[TokenKind::Identifier]));
                }
                let close = self.next()?;
                if close.kind != TokenKind::RightParen {
                    return Err(unexpected(close.kind, close.span, &[TokenKind::RightParen]));
                }
                Ok(VariableReference::named(&name.text))
            }
            found => Err(unexpected(
                found,
                token.span,
                &[TokenKind::LeftParen, TokenKind::LessThan],
            )),
        }
    }

    /// Discard tokens through the end of the line that `token` is on.
    fn skip_line(&mut self, mut token: Token) -> Result<(), Error> {
        loop {
            match token.kind {
                TokenKind::Newline => return Ok(()),
                TokenKind::EndOfInput => {
                    self.push_back(token);
                    return Ok(());
                }
                _ => token = self.next()?,
            }
        }
    }

    fn skip_spaces(&mut self) -> Result<Token, Error> {
        loop {
            let token = self.next()?;
            if token.kind != TokenKind::Space {
                return Ok(token);
            }
        }
    }

    fn next(&mut self) -> Result<Token, Error> {
        if let Some(token) = self.pending.take() {
            return Ok(token);
        }
        Ok(self.source.next_token()?)
    }

    fn push_back(&mut self, token: Token) {
        debug_assert!(self.pending.is_none(), "pushback holds one token");
        self.pending = Some(token);
    }
}

fn unexpected(found: TokenKind, span: Span, expected: &[TokenKind]) -> Error {
    ParseError {
        kind: ParseErrorKind::UnexpectedToken {
            found,
            expected: expected.to_vec(),
        },
        span,
    }
    .into()
}
