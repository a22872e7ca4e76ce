use crate::{
    ast::Block,
    error::SyntaxError,
    interpreter::{
        lexer::{Keyword, TokenClass},
        parser::core::{ParseResult, Parser},
    },
};

impl Parser {
    /// Parses an indented block.
    ///
    /// A block starts with a newline and continues while lines carry at
    /// least the block's indentation depth. Each block raises the expected
    /// depth by one.
    ///
    /// When a line turns out to be indented less, the parser rewinds the
    /// lexer to the newline in front of it, so the enclosing block sees that
    /// newline again. A `w przeciwnym razie` line is left in place for the
    /// `jeżeli` that owns it: the one whose block is exactly one level deeper
    /// than the line's indentation.
    ///
    /// Lines holding only an indented comment are skipped.
    ///
    /// # Errors
    /// `Oczekiwano bloku kodu.` for a block without statements, and
    /// `Nieoczekiwane wcięcie.` for a line indented deeper than the block.
    pub(super) fn block(&mut self) -> ParseResult<Block> {
        let Some(first) = &self.lookahead else {
            return Err(self.error_at_last_char("Oczekiwano bloku kodu."));
        };

        let mut before_newline = first.position;
        self.consume(TokenClass::NewLine, None)?;
        self.indentation_level += 1;

        let mut statements = Vec::new();
        let mut line_depth = 0;

        while self.check(TokenClass::Indentation) {
            let line_start = self.lookahead_position();
            let mut depth = 0;
            let mut extra = None;

            while self.check(TokenClass::Indentation) {
                let indent = self.consume(TokenClass::Indentation, None)?;

                if depth < self.indentation_level {
                    depth += 1;
                } else {
                    extra.get_or_insert(indent.position);
                }
            }
            line_depth = depth;

            if self.lookahead.is_none() {
                break;
            }
            if self.check(TokenClass::NewLine) {
                before_newline = self.lookahead_position();
                self.consume(TokenClass::NewLine, None)?;
                line_depth = 0;
                continue;
            }

            if depth < self.indentation_level {
                self.rewind(line_start, false)?;
                break;
            }
            if let Some(position) = extra {
                return Err(SyntaxError::new("Nieoczekiwane wcięcie.", position));
            }

            statements.extend(self.statement()?);
            line_depth = self.indentation_level;

            if self.lookahead.is_some() && !self.check_keyword(Keyword::Else) {
                before_newline = self.lookahead_position();
                self.consume(TokenClass::NewLine, None)?;
                line_depth = 0;
            }
        }

        let else_belongs_here =
            self.check_keyword(Keyword::Else) && line_depth + 1 >= self.indentation_level;

        if self.lookahead.is_some() && !else_belongs_here {
            self.rewind(before_newline, true)?;
        }

        if statements.is_empty() {
            return Err(self.error_at_last_char("Oczekiwano bloku kodu."));
        }

        self.indentation_level -= 1;
        Ok(Block { statements })
    }
}
