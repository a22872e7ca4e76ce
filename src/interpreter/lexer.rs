use std::fmt;

use logos::Logos;

use crate::error::SyntaxError;

/// Number of spaces that make up one indentation level.
pub const INDENT_WIDTH: usize = 4;

/// A zero-based location in the source text.
///
/// Columns count characters (Unicode scalar values), not bytes. User-facing
/// messages render both fields 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based line number.
    pub line:   usize,
    /// Zero-based column number.
    pub column: usize,
}

impl Position {
    /// Creates a position from a zero-based line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Which side of a pair of delimiters a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// `(` or `[`
    Open,
    /// `)` or `]`
    Close,
}

/// Keywords, including the assignment arrow and the `=` of a `dla` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `<-`
    Assign,
    /// `=`
    Equals,
    /// `dla`
    For,
    /// `dopóki`
    While,
    /// `jeżeli`
    If,
    /// `to`
    Then,
    /// `w przeciwnym razie`
    Else,
    /// `wykonuj`
    Do,
    /// `wypisz`
    Print,
    /// `funkcja`
    Function,
    /// `zwróć`
    Return,
}

impl Keyword {
    /// Returns the keyword as written in source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "<-",
            Self::Equals => "=",
            Self::For => "dla",
            Self::While => "dopóki",
            Self::If => "jeżeli",
            Self::Then => "to",
            Self::Else => "w przeciwnym razie",
            Self::Do => "wykonuj",
            Self::Print => "wypisz",
            Self::Function => "funkcja",
            Self::Return => "zwróć",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `div`
    IntDiv,
    /// `mod`
    Mod,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `oraz`
    And,
    /// `lub`
    Or,
    /// `nie`
    Not,
}

impl Operator {
    /// Returns the operator as written in source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "div",
            Self::Mod => "mod",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::And => "oraz",
            Self::Or => "lub",
            Self::Not => "nie",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload-free class of a token, used when a production expects "any
/// token of this kind" and for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Indentation,
    Identifier,
    Parenthesis,
    Bracket,
    Comma,
    Keyword,
    Number,
    Text,
    Bool,
    Operator,
    Ellipsis,
    NewLine,
}

impl TokenClass {
    /// Returns the Polish description used in syntax errors.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Indentation => "wcięcie",
            Self::Identifier => "zmienna",
            Self::Parenthesis => "nawias okrągły",
            Self::Bracket => "nawias kwadratowy",
            Self::Comma => "przecinek",
            Self::Keyword => "słowo kluczowe",
            Self::Number => "liczba",
            Self::Text => "napis",
            Self::Bool => "boolean",
            Self::Operator => "operator",
            Self::Ellipsis => "trzy kropki",
            Self::NewLine => "nowa linia",
        }
    }
}

/// A token together with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// One level of indentation (four spaces at the start of a line).
    Indentation,
    /// `[_a-zA-Z][_a-zA-Z0-9]*`
    Identifier(String),
    /// `(` or `)`
    Parenthesis(Side),
    /// `[` or `]`
    Bracket(Side),
    /// `,`
    Comma,
    /// A keyword.
    Keyword(Keyword),
    /// A numeric literal such as `42` or `3.14`.
    Number(f64),
    /// A string literal, without its quotes.
    Text(String),
    /// `PRAWDA` or `FAŁSZ`.
    Bool(bool),
    /// An operator.
    Operator(Operator),
    /// `...`
    Ellipsis,
    /// A logical line break before a non-blank, non-comment line.
    NewLine,
}

impl TokenKind {
    /// Returns the class of this token.
    #[must_use]
    pub const fn class(&self) -> TokenClass {
        match self {
            Self::Indentation => TokenClass::Indentation,
            Self::Identifier(_) => TokenClass::Identifier,
            Self::Parenthesis(_) => TokenClass::Parenthesis,
            Self::Bracket(_) => TokenClass::Bracket,
            Self::Comma => TokenClass::Comma,
            Self::Keyword(_) => TokenClass::Keyword,
            Self::Number(_) => TokenClass::Number,
            Self::Text(_) => TokenClass::Text,
            Self::Bool(_) => TokenClass::Bool,
            Self::Operator(_) => TokenClass::Operator,
            Self::Ellipsis => TokenClass::Ellipsis,
            Self::NewLine => TokenClass::NewLine,
        }
    }
}

/// A token and where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was recognised.
    pub kind:     TokenKind,
    /// Where it starts.
    pub position: Position,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub const fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Returns `true` if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

/// Everything that can be recognised within the remainder of a single line,
/// apart from string literals, which need the line-crossing cursor logic.
#[derive(Logos, Debug, Clone, PartialEq)]
enum Lexeme {
    #[regex(r"\s+")]
    Whitespace,
    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token("...")]
    Ellipsis,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<-")]
    Assign,
    #[token("=")]
    Equals,
    #[token("dla")]
    For,
    #[token("dopóki")]
    While,
    #[token("jeżeli")]
    If,
    #[token("to")]
    Then,
    #[token("w przeciwnym razie")]
    Else,
    #[token("wykonuj")]
    Do,
    #[token("wypisz")]
    Print,
    #[token("funkcja")]
    Function,
    #[token("zwróć")]
    Return,
    #[token("PRAWDA", |_| true)]
    #[token("FAŁSZ", |_| false)]
    Bool(bool),
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("div")]
    IntDiv,
    #[token("mod")]
    Mod,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("oraz")]
    And,
    #[token("lub")]
    Or,
    #[token("nie")]
    Not,
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
    #[regex(r"[_a-zA-Z][_a-zA-Z0-9]*", |lex| lex.slice().to_string())]
    Identifier(String),
}

impl Lexeme {
    /// Word-like lexemes must not run straight into an identifier character.
    const fn needs_word_boundary(&self) -> bool {
        matches!(self,
                 Self::For
                 | Self::While
                 | Self::If
                 | Self::Then
                 | Self::Else
                 | Self::Do
                 | Self::Print
                 | Self::Function
                 | Self::Return
                 | Self::Bool(_)
                 | Self::IntDiv
                 | Self::Mod
                 | Self::And
                 | Self::Or
                 | Self::Not
                 | Self::Number(_))
    }

    fn into_kind(self) -> Option<TokenKind> {
        let kind = match self {
            Self::Whitespace | Self::Comment => return None,
            Self::LBracket => TokenKind::Bracket(Side::Open),
            Self::RBracket => TokenKind::Bracket(Side::Close),
            Self::Comma => TokenKind::Comma,
            Self::Ellipsis => TokenKind::Ellipsis,
            Self::LParen => TokenKind::Parenthesis(Side::Open),
            Self::RParen => TokenKind::Parenthesis(Side::Close),
            Self::Assign => TokenKind::Keyword(Keyword::Assign),
            Self::Equals => TokenKind::Keyword(Keyword::Equals),
            Self::For => TokenKind::Keyword(Keyword::For),
            Self::While => TokenKind::Keyword(Keyword::While),
            Self::If => TokenKind::Keyword(Keyword::If),
            Self::Then => TokenKind::Keyword(Keyword::Then),
            Self::Else => TokenKind::Keyword(Keyword::Else),
            Self::Do => TokenKind::Keyword(Keyword::Do),
            Self::Print => TokenKind::Keyword(Keyword::Print),
            Self::Function => TokenKind::Keyword(Keyword::Function),
            Self::Return => TokenKind::Keyword(Keyword::Return),
            Self::Bool(b) => TokenKind::Bool(b),
            Self::EqualEqual => TokenKind::Operator(Operator::Equal),
            Self::BangEqual => TokenKind::Operator(Operator::NotEqual),
            Self::Plus => TokenKind::Operator(Operator::Add),
            Self::Minus => TokenKind::Operator(Operator::Sub),
            Self::Star => TokenKind::Operator(Operator::Mul),
            Self::Slash => TokenKind::Operator(Operator::Div),
            Self::IntDiv => TokenKind::Operator(Operator::IntDiv),
            Self::Mod => TokenKind::Operator(Operator::Mod),
            Self::LessEqual => TokenKind::Operator(Operator::LessEqual),
            Self::GreaterEqual => TokenKind::Operator(Operator::GreaterEqual),
            Self::Less => TokenKind::Operator(Operator::Less),
            Self::Greater => TokenKind::Operator(Operator::Greater),
            Self::And => TokenKind::Operator(Operator::And),
            Self::Or => TokenKind::Operator(Operator::Or),
            Self::Not => TokenKind::Operator(Operator::Not),
            Self::Number(n) => TokenKind::Number(n),
            Self::Identifier(name) => TokenKind::Identifier(name),
        };
        Some(kind)
    }
}

/// Outcome of recognising one lexeme: either a token or skippable content,
/// each with its length in characters.
enum Step {
    Skip(usize),
    Emit(TokenKind, usize),
}

/// Splits source text into lines the way the lexer sees them.
///
/// Only the first tab of every line is replaced by four spaces; later tabs
/// are left alone and lex as ordinary whitespace.
///
/// # Example
/// ```
/// use pseudokod::interpreter::lexer::source_lines;
///
/// let lines = source_lines("a\n\tb\t\nc");
/// assert_eq!(lines, vec!["a", "    b\t", "c"]);
/// ```
#[must_use]
pub fn source_lines(source: &str) -> Vec<String> {
    source.split('\n')
          .map(|line| line.replacen('\t', "    ", 1))
          .collect()
}

/// A pull-based, line-aware tokenizer.
///
/// The lexer walks a cursor `(line, column)` over the pre-split source. It
/// emits [`TokenKind::NewLine`] when the cursor crosses into a non-blank,
/// non-comment line, and [`TokenKind::Indentation`] for each run of four
/// spaces directly after such a newline (or after another indentation token).
/// Any other leading spaces are plain whitespace.
///
/// The parser may rewind the cursor to an earlier token position with
/// [`Lexer::set_back`], and may move it one character back with
/// [`Lexer::step_back`] to report errors at the last consumed character.
#[derive(Debug, Clone)]
pub struct Lexer {
    lines:             Vec<String>,
    line:              usize,
    column:            usize,
    crossed_line:      bool,
    after_newline:     bool,
    after_indentation: bool,
}

impl Lexer {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self { lines:             source_lines(source),
               line:              0,
               column:            0,
               crossed_line:      false,
               after_newline:     true,
               after_indentation: false, }
    }

    /// Returns the current cursor position.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns `true` if the last cursor movement crossed a line boundary.
    #[must_use]
    pub const fn crossed_line(&self) -> bool {
        self.crossed_line
    }

    /// Returns `true` while the cursor has not run past the last line.
    ///
    /// An entirely empty source has no tokens at all.
    #[must_use]
    pub fn has_more_tokens(&self) -> bool {
        self.line < self.lines.len() && !(self.lines.len() == 1 && self.lines[0].is_empty())
    }

    /// Moves the cursor back to `position`.
    ///
    /// When `newline` is set, the next call to [`Lexer::next_token`] treats
    /// the cursor as having just crossed a line boundary, so a rewind to the
    /// start of a line re-emits its [`TokenKind::NewLine`].
    pub fn set_back(&mut self, position: Position, newline: bool) {
        self.line = position.line;
        self.set_column(position.column);

        if newline {
            self.crossed_line = true;
        }
    }

    /// Moves the cursor one character back, onto the end of the previous line
    /// if it sits at a line start.
    pub fn step_back(&mut self) {
        if self.column > 0 {
            self.set_column(self.column - 1);
        } else if self.line > 0 {
            self.line -= 1;
            self.column = self.line_length(self.line);
            self.crossed_line = false;
        }
    }

    /// Produces the next token, or `None` at the end of input.
    ///
    /// # Errors
    /// Returns a [`SyntaxError`] for an unterminated string literal or for
    /// text that matches no token (including non-ASCII letters in
    /// identifiers).
    pub fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        loop {
            if !self.has_more_tokens() {
                return Ok(None);
            }

            let position = self.position();
            let text = &self.lines[self.line];

            if self.crossed_line && !text.trim().is_empty() && !text.starts_with('#') {
                self.crossed_line = false;
                self.after_newline = true;

                return Ok(Some(Token::new(TokenKind::NewLine, position)));
            }

            if text.is_empty() {
                self.advance(1);
                continue;
            }

            if self.rest().starts_with(&" ".repeat(INDENT_WIDTH))
               && (self.after_newline || self.after_indentation)
            {
                self.advance(INDENT_WIDTH);
                self.after_newline = false;
                self.after_indentation = true;

                return Ok(Some(Token::new(TokenKind::Indentation, position)));
            }

            self.after_newline = false;
            self.after_indentation = false;

            if self.rest().starts_with('"') {
                return self.string_literal(position).map(Some);
            }

            match self.lexeme(position)? {
                Step::Skip(length) => self.advance(length),
                Step::Emit(kind, length) => {
                    self.advance(length);
                    return Ok(Some(Token::new(kind, position)));
                },
            }
        }
    }

    fn line_length(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |text| text.chars().count())
    }

    /// Places the cursor at `column` of the current line, wrapping onto the
    /// next line (and flagging the crossing) when `column` is past its end.
    fn set_column(&mut self, column: usize) {
        if self.line >= self.lines.len() {
            return;
        }

        if self.line_length(self.line) <= column {
            self.line += 1;
            self.column = 0;
            self.crossed_line = true;
        } else {
            self.column = column;
            self.crossed_line = false;
        }
    }

    fn advance(&mut self, count: usize) {
        self.set_column(self.column + count);
    }

    /// The unread remainder of the current line.
    fn rest(&self) -> &str {
        let Some(text) = self.lines.get(self.line) else {
            return "";
        };
        let offset = text.char_indices()
                         .nth(self.column)
                         .map_or(text.len(), |(offset, _)| offset);

        &text[offset..]
    }

    fn lexeme(&self, position: Position) -> Result<Step, SyntaxError> {
        let rest = self.rest();
        let mut lexer = Lexeme::lexer(rest);

        let Some(Ok(lexeme)) = lexer.next() else {
            return Err(self.unknown_token(position));
        };

        let span = lexer.span();
        let length = rest[span.clone()].chars().count();
        let next = rest[span.end..].chars().next();

        if lexeme.needs_word_boundary() && next.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(self.unknown_token(position));
        }
        if lexeme == Lexeme::Return && next.is_some_and(|c| c != ' ') {
            return Err(self.unknown_token(position));
        }

        Ok(match lexeme.into_kind() {
            Some(kind) => Step::Emit(kind, length),
            None => Step::Skip(length),
        })
    }

    fn string_literal(&mut self, position: Position) -> Result<Token, SyntaxError> {
        let mut content = String::new();
        self.advance(1);

        loop {
            if self.crossed_line {
                return Err(self.unterminated_string());
            }
            let Some(c) = self.rest().chars().next() else {
                return Err(self.unterminated_string());
            };
            if c == '"' {
                break;
            }

            content.push(c);
            self.advance(1);
        }

        self.advance(1);
        Ok(Token::new(TokenKind::Text(content), position))
    }

    fn unterminated_string(&mut self) -> SyntaxError {
        let at_end = !self.has_more_tokens();
        self.step_back();

        let message = if at_end {
            "Nieoczekiwany koniec wejścia. Oczekiwano zamknięcia napisu."
        } else {
            "Nieoczekiwany koniec linii. Oczekiwano zamknięcia napisu."
        };
        SyntaxError::new(message, self.position())
    }

    fn unknown_token(&self, position: Position) -> SyntaxError {
        SyntaxError::new(format!("Nieoczekiwany token: {}. Nie używaj polskich znaków w nazwach \
                                  zmiennych.",
                                 self.rest()),
                         position)
    }
}
