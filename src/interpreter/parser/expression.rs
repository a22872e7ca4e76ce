use crate::{
    ast::{Call, Expr, Identifier, Literal},
    error::SyntaxError,
    interpreter::{
        lexer::{Position, Side, TokenClass, TokenKind},
        parser::{
            core::{ParseResult, Parser},
            precedence::{Item, reduce},
        },
    },
};

impl Parser {
    /// Parses an expression.
    ///
    /// Tokens are gathered into a flat list until something that cannot
    /// continue an expression shows up: a keyword, a comma, a newline, a
    /// closing bracket, or a closing parenthesis that ends a call argument.
    /// Calls and index brackets are parsed recursively while gathering; the
    /// list is then grouped and reduced by [`reduce`].
    ///
    /// # Errors
    /// - End of input before the first token.
    /// - A token that cannot appear in an expression.
    /// - Unbalanced parentheses.
    /// - Anything [`reduce`] rejects.
    pub(super) fn expression(&mut self) -> ParseResult<Expr> {
        if self.lookahead.is_none() {
            return Err(self.error_at_last_char("Nieoczekiwany koniec wejścia, oczekiwano: \
                                                wyrażenie."));
        }

        let start = self.lookahead_position();
        let mut items = Vec::new();
        let mut depth = 0_isize;

        while let Some(token) = &self.lookahead {
            let position = token.position;

            match token.kind.clone() {
                TokenKind::Number(n) => {
                    self.consume(TokenClass::Number, None)?;
                    items.push(Item::Operand(Expr::Literal { value: Literal::Number(n),
                                                             position }));
                },
                TokenKind::Text(s) => {
                    self.consume(TokenClass::Text, None)?;
                    items.push(Item::Operand(Expr::Literal { value: Literal::Text(s),
                                                             position }));
                },
                TokenKind::Bool(b) => {
                    self.consume(TokenClass::Bool, None)?;
                    items.push(Item::Operand(Expr::Literal { value: Literal::Bool(b),
                                                             position }));
                },
                TokenKind::Operator(op) => {
                    self.consume(TokenClass::Operator, None)?;
                    items.push(Item::Operator(op, position));
                },
                TokenKind::Identifier(name) => {
                    self.consume(TokenClass::Identifier, None)?;
                    items.push(Item::Operand(Expr::Variable(Identifier::new(name, position))));
                },
                TokenKind::Parenthesis(Side::Open) => {
                    if let Some(Item::Operand(Expr::Variable(callee))) = items.pop_if(|item| {
                        matches!(item, Item::Operand(Expr::Variable(_)))
                    }) {
                        items.push(Item::Operand(Expr::Call(self.call(callee)?)));
                    } else {
                        self.consume(TokenClass::Parenthesis, None)?;
                        depth += 1;
                        items.push(Item::Open(position));
                    }
                },
                TokenKind::Parenthesis(Side::Close) => {
                    self.consume(TokenClass::Parenthesis, None)?;
                    depth -= 1;
                    items.push(Item::Close(position));
                },
                TokenKind::Bracket(Side::Close) => {
                    return Err(SyntaxError::new("Oczekiwano wyrażenia, znaleziono: ].", position));
                },
                TokenKind::Bracket(Side::Open) => {
                    let (index, position) = self.bracket()?;
                    items.push(Item::Index(index, position));
                },
                other => {
                    return Err(SyntaxError::new(format!("Nieoczekiwany token: {}.",
                                                        other.class().describe()),
                                                position));
                },
            }

            if self.expression_ends(depth) {
                break;
            }
        }

        if depth > 0 {
            let message = format!("Oczekiwano zamknięcia nawiasu okrągłego, znaleziono: {}.",
                                  self.lookahead
                                      .as_ref()
                                      .map_or("koniec wejścia", |token| token.kind.class().describe()));

            if let Some(token) = &self.lookahead {
                return Err(SyntaxError::new(message, token.position));
            }
            return Err(self.error_at_last_char(message));
        }

        reduce(items, start)
    }

    fn expression_ends(&self, depth: isize) -> bool {
        if self.crossed_line {
            return true;
        }
        let Some(token) = &self.lookahead else {
            return true;
        };

        match token.kind {
            TokenKind::Keyword(_)
            | TokenKind::Comma
            | TokenKind::NewLine
            | TokenKind::Bracket(Side::Close) => true,
            TokenKind::Parenthesis(Side::Close) => self.consuming_call > 0 && depth == 0,
            _ => false,
        }
    }

    /// Parses the argument list of a call whose name has been consumed.
    ///
    /// A closing parenthesis ends an argument only when it is not matched by
    /// an opening one inside that argument, so `f((1 + 2) * 3)` works.
    pub(super) fn call(&mut self, callee: Identifier) -> ParseResult<Call> {
        self.consuming_call += 1;
        let open = self.consume_delimiter(TokenClass::Parenthesis, Side::Open)?;

        let mut arguments = Vec::new();
        if !self.check_kind(&TokenKind::Parenthesis(Side::Close)) {
            loop {
                arguments.push(self.expression()?);

                let Some(token) = &self.lookahead else {
                    return Err(self.error_at_last_char("Nieoczekiwany koniec wejścia, oczekiwano: \
                                                        nawias okrągły."));
                };
                if token.kind == TokenKind::Parenthesis(Side::Close) {
                    break;
                }

                self.consume(TokenClass::Comma, None)?;

                if let Some(token) = &self.lookahead
                   && token.kind == TokenKind::Parenthesis(Side::Close)
                {
                    return Err(SyntaxError::new("Oczekiwano wyrażenia, znaleziono: nawias okrągły.",
                                                token.position));
                }
            }
        }

        self.consume_delimiter(TokenClass::Parenthesis, Side::Close)?;
        self.consuming_call -= 1;

        Ok(Call { callee,
                  arguments,
                  position: open.position })
    }

    /// Parses `[index]` and returns the index expression with the position of
    /// the `[`.
    pub(super) fn bracket(&mut self) -> ParseResult<(Expr, Position)> {
        let open = self.consume_delimiter(TokenClass::Bracket, Side::Open)?;
        let index = self.expression()?;
        self.consume_delimiter(TokenClass::Bracket, Side::Close)?;

        Ok((index, open.position))
    }
}
