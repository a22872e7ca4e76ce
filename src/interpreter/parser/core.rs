use tracing::debug;

use crate::{
    ast::{Identifier, Program},
    error::SyntaxError,
    interpreter::lexer::{Keyword, Lexer, Position, Side, Token, TokenClass, TokenKind},
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Parses a whole program.
///
/// This is the entry point for parsing. Tokens are pulled from the lexer one
/// at a time; the parser never holds more than one token of lookahead.
///
/// # Parameters
/// - `source`: Program text.
///
/// # Returns
/// The parsed [`Program`], or the first [`SyntaxError`] found.
///
/// # Example
/// ```
/// use pseudokod::interpreter::parser::core::parse;
///
/// let program = parse("x <- 1\nwypisz x").unwrap();
/// assert_eq!(program.body.len(), 2);
///
/// let error = parse("x 1").unwrap_err();
/// assert!(error.message.contains("oczekiwano: <-"));
/// ```
pub fn parse(source: &str) -> ParseResult<Program> {
    let mut parser = Parser::new(source)?;
    let program = parser.program()?;

    debug!(statements = program.body.len(), "parsed program");
    Ok(program)
}

/// Recursive-descent parser over a pull-based [`Lexer`].
///
/// Productions are spread over the sibling modules as `impl Parser` blocks.
pub struct Parser {
    pub(super) lexer:             Lexer,
    pub(super) lookahead:         Option<Token>,
    /// Whether consuming the previous token moved the lexer onto a new line.
    pub(super) crossed_line:      bool,
    pub(super) indentation_level: usize,
    /// Depth of `funkcja` bodies being parsed; `zwróć` is legal only above 0.
    pub(super) defining_function: usize,
    /// Depth of call argument lists being parsed.
    pub(super) consuming_call:    usize,
}

impl Parser {
    /// Creates a parser and reads the first token.
    ///
    /// # Errors
    /// Returns a [`SyntaxError`] if the first token cannot be lexed.
    pub fn new(source: &str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let lookahead = lexer.next_token()?;

        Ok(Self { lexer,
                  lookahead,
                  crossed_line: false,
                  indentation_level: 0,
                  defining_function: 0,
                  consuming_call: 0 })
    }

    /// Parses statements separated by newlines until the input ends.
    pub fn program(&mut self) -> ParseResult<Program> {
        let mut body = Vec::new();

        while self.lookahead.is_some() {
            body.extend(self.statement()?);

            if self.lookahead.is_some() {
                self.consume(TokenClass::NewLine, None)?;
            }
        }

        Ok(Program { body })
    }

    /// Consumes the lookahead if it belongs to `class`.
    ///
    /// `expected` overrides the description of what was expected in the error
    /// message; it defaults to the description of `class`.
    ///
    /// # Errors
    /// An end-of-input error at the last consumed character if there is no
    /// lookahead, or an unexpected-token error at the lookahead otherwise.
    pub(super) fn consume(&mut self,
                          class: TokenClass,
                          expected: Option<&str>)
                          -> ParseResult<Token> {
        let expected = expected.unwrap_or_else(|| class.describe());

        let Some(token) = self.lookahead.take() else {
            return Err(self.error_at_last_char(format!("Nieoczekiwany koniec wejścia, oczekiwano: \
                                                        {expected}.")));
        };

        if token.kind.class() != class {
            let error = SyntaxError::new(format!("Nieoczekiwany token: {}, oczekiwano: {expected}.",
                                                 token.kind.class().describe()),
                                         token.position);
            self.lookahead = Some(token);
            return Err(error);
        }

        self.crossed_line = self.lexer.crossed_line();
        self.lookahead = self.lexer.next_token()?;
        Ok(token)
    }

    /// Consumes one side of a parenthesis or bracket pair.
    pub(super) fn consume_delimiter(&mut self,
                                    class: TokenClass,
                                    side: Side)
                                    -> ParseResult<Token> {
        let symbol = |side: Side| match (class, side) {
            (TokenClass::Bracket, Side::Open) => "[",
            (TokenClass::Bracket, Side::Close) => "]",
            (_, Side::Open) => "(",
            (_, Side::Close) => ")",
        };

        let token = self.consume(class, Some(symbol(side)))?;
        match token.kind {
            TokenKind::Parenthesis(found) | TokenKind::Bracket(found) if found != side => {
                Err(SyntaxError::new(format!("Nieoczekiwany token: {}, oczekiwano: {}.",
                                             symbol(found),
                                             symbol(side)),
                                     token.position))
            },
            _ => Ok(token),
        }
    }

    /// Consumes a specific keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<Token> {
        let token = self.consume(TokenClass::Keyword, Some(keyword.as_str()))?;

        let found = match &token.kind {
            TokenKind::Keyword(found) => *found,
            other => {
                return Err(SyntaxError::new(format!("Nieoczekiwany token: {}, oczekiwano: \
                                                     {keyword}.",
                                                    other.class().describe()),
                                            token.position));
            },
        };

        if found != keyword {
            return Err(SyntaxError::new(format!("Nieoczekiwane słowo kluczowe: {found}, \
                                                 oczekiwano: {keyword}."),
                                        token.position));
        }
        Ok(token)
    }

    /// Consumes an identifier token.
    pub(super) fn identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.consume(TokenClass::Identifier, None)?;

        match token.kind {
            TokenKind::Identifier(name) => Ok(Identifier::new(name, token.position)),
            other => Err(SyntaxError::new(format!("Nieoczekiwany token: {}, oczekiwano: zmienna.",
                                                  other.class().describe()),
                                          token.position)),
        }
    }

    /// Returns `true` if the lookahead belongs to `class`.
    pub(super) fn check(&self, class: TokenClass) -> bool {
        self.lookahead.as_ref().is_some_and(|token| token.kind.class() == class)
    }

    /// Returns `true` if the lookahead is exactly `kind`.
    pub(super) fn check_kind(&self, kind: &TokenKind) -> bool {
        self.lookahead.as_ref().is_some_and(|token| token.kind == *kind)
    }

    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.lookahead.as_ref().is_some_and(|token| token.is_keyword(keyword))
    }

    /// Position of the lookahead, or of the lexer cursor at end of input.
    pub(super) fn lookahead_position(&self) -> Position {
        self.lookahead.as_ref().map_or_else(|| self.lexer.position(), |token| token.position)
    }

    /// Rewinds the lexer to `position` and re-reads the lookahead.
    pub(super) fn rewind(&mut self, position: Position, newline: bool) -> ParseResult<()> {
        self.lexer.set_back(position, newline);
        self.lookahead = self.lexer.next_token()?;
        Ok(())
    }

    /// Builds an error located at the last consumed character rather than one
    /// past it.
    pub(super) fn error_at_last_char(&mut self, message: impl Into<String>) -> SyntaxError {
        self.lexer.step_back();
        SyntaxError::new(message, self.lexer.position())
    }
}
