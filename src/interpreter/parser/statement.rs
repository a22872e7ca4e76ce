use crate::{
    ast::{FunctionDef, Identifier, Statement, Target},
    error::SyntaxError,
    interpreter::{
        lexer::{Keyword, Side, TokenClass, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

impl Parser {
    /// Parses one statement.
    ///
    /// Returns `None` when the lookahead is a newline (an empty logical line)
    /// or the input has ended.
    ///
    /// Grammar:
    /// ```text
    /// statement := assignment | call | for | while | if | function | return | print
    /// ```
    ///
    /// # Errors
    /// `Nieoczekiwane wcięcie.` for indentation where no block is open, and
    /// an unexpected-token error for anything that cannot start a statement.
    pub(super) fn statement(&mut self) -> ParseResult<Option<Statement>> {
        let Some(token) = &self.lookahead else {
            return Ok(None);
        };

        match &token.kind {
            TokenKind::NewLine => Ok(None),
            TokenKind::Indentation => Err(SyntaxError::new("Nieoczekiwane wcięcie.", token.position)),
            TokenKind::Identifier(_) => self.assignment_or_call().map(Some),
            TokenKind::Keyword(keyword) => {
                let keyword = *keyword;
                self.keyword_statement(keyword).map(Some)
            },
            other => Err(SyntaxError::new(format!("Nieoczekiwany token: {}.", other.class().describe()),
                                          token.position)),
        }
    }

    fn keyword_statement(&mut self, keyword: Keyword) -> ParseResult<Statement> {
        match keyword {
            Keyword::For => self.for_loop(),
            Keyword::While => self.while_loop(),
            Keyword::If => self.if_statement(),
            Keyword::Function => self.function(),
            Keyword::Return => self.return_statement(),
            Keyword::Print => self.print(),
            other => Err(SyntaxError::new(format!("Nieoczekiwane słowo kluczowe: {other}."),
                                          self.lookahead_position())),
        }
    }

    /// An identifier followed by `(` is a call; anything else must be an
    /// assignment.
    fn assignment_or_call(&mut self) -> ParseResult<Statement> {
        let name = self.identifier()?;

        if self.check_kind(&TokenKind::Parenthesis(Side::Open)) {
            return Ok(Statement::Call(self.call(name)?));
        }

        self.assignment(name)
    }

    /// Parses `name <- value` or `name[index] <- value`.
    fn assignment(&mut self, name: Identifier) -> ParseResult<Statement> {
        if self.lookahead.is_none() {
            return Err(self.error_at_last_char("Nieoczekiwany koniec wejścia, oczekiwano: <-."));
        }

        let index = if self.check(TokenClass::Bracket) {
            Some(self.bracket()?.0)
        } else {
            None
        };

        let arrow = self.consume(TokenClass::Keyword, Some("<-"))?;
        if !arrow.is_keyword(Keyword::Assign) {
            return Err(SyntaxError::new("Po zmiennej musi wystąpić operator przypisania <-.",
                                        arrow.position));
        }

        let value = self.expression()?;
        let target = match index {
            Some(index) => Target::Element { array: name, index },
            None => Target::Variable(name),
        };

        Ok(Statement::Assignment { target, value })
    }

    /// Parses `dla i = start, second, ..., end wykonuj` and its block.
    fn for_loop(&mut self) -> ParseResult<Statement> {
        let keyword = self.expect_keyword(Keyword::For)?;
        let variable = self.identifier()?;
        self.expect_keyword(Keyword::Equals)?;

        let start = self.expression()?;
        self.consume(TokenClass::Comma, None)?;
        let second = self.expression()?;
        self.consume(TokenClass::Comma, None)?;
        self.consume(TokenClass::Ellipsis, None)?;
        self.consume(TokenClass::Comma, None)?;
        let end = self.expression()?;
        self.expect_keyword(Keyword::Do)?;

        let body = self.block()?;

        Ok(Statement::For { variable,
                            start,
                            second,
                            end,
                            body,
                            position: keyword.position })
    }

    fn while_loop(&mut self) -> ParseResult<Statement> {
        let keyword = self.expect_keyword(Keyword::While)?;
        let condition = self.expression()?;
        self.expect_keyword(Keyword::Do)?;

        let body = self.block()?;

        Ok(Statement::While { condition,
                              body,
                              position: keyword.position })
    }

    /// Parses `jeżeli condition to`, its block and an optional
    /// `w przeciwnym razie` block.
    fn if_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.expect_keyword(Keyword::If)?;
        let condition = self.expression()?;
        self.expect_keyword(Keyword::Then)?;

        let then_branch = self.block()?;

        let else_branch = if self.check_keyword(Keyword::Else) {
            self.expect_keyword(Keyword::Else)?;
            Some(self.block()?)
        } else {
            None
        };

        Ok(Statement::If { condition,
                           then_branch,
                           else_branch,
                           position: keyword.position })
    }

    /// Parses `funkcja name(a, b)` and its body.
    fn function(&mut self) -> ParseResult<Statement> {
        let keyword = self.expect_keyword(Keyword::Function)?;
        let name = self.identifier()?;
        let params = self.parameter_list()?;

        self.defining_function += 1;
        let body = self.block()?;
        self.defining_function -= 1;

        Ok(Statement::Function(FunctionDef { name,
                                             params,
                                             body: body.into(),
                                             position: keyword.position }))
    }

    fn parameter_list(&mut self) -> ParseResult<Vec<Identifier>> {
        self.consume_delimiter(TokenClass::Parenthesis, Side::Open)?;

        let mut params = Vec::new();
        while !self.check(TokenClass::Parenthesis) {
            params.push(self.identifier()?);

            if !self.check(TokenClass::Parenthesis) {
                self.consume(TokenClass::Comma, None)?;
            }
        }

        self.consume_delimiter(TokenClass::Parenthesis, Side::Close)?;
        Ok(params)
    }

    /// Parses `zwróć` with an optional value. Only legal inside a function
    /// body.
    fn return_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.expect_keyword(Keyword::Return)?;

        if self.defining_function == 0 {
            return Err(SyntaxError::new("Słowo kluczowe ZWRÓĆ poza funkcją.", keyword.position));
        }

        let value = if self.lookahead.is_none() || self.check(TokenClass::NewLine) {
            None
        } else {
            Some(self.expression()?)
        };

        Ok(Statement::Return { value,
                               position: keyword.position })
    }

    fn print(&mut self) -> ParseResult<Statement> {
        let keyword = self.expect_keyword(Keyword::Print)?;
        let value = self.expression()?;

        Ok(Statement::Print { value,
                              position: keyword.position })
    }
}
