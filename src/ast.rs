use std::rc::Rc;

use crate::interpreter::lexer::Position;

/// A parsed program: the top-level statement list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Statements in source order.
    pub body: Vec<Statement>,
}

/// An indented block of statements.
///
/// The parser never produces an empty block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements in source order.
    pub statements: Vec<Statement>,
}

/// A name together with where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The symbol.
    pub name:     String,
    /// Position of the first character of the symbol.
    pub position: Position,
}

impl Identifier {
    /// Creates an identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self { name: name.into(),
               position }
    }
}

/// A literal constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A numeric literal.
    Number(f64),
    /// A string literal.
    Text(String),
    /// `PRAWDA` or `FAŁSZ`.
    Bool(bool),
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `nie`: logical negation of truthiness.
    Not,
    /// A unary minus applied to something other than a numeric literal.
    Negate,
}

/// Binary operators, from tightest to loosest tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Mul,
    Div,
    IntDiv,
    Mod,
    Add,
    Sub,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

impl BinaryOperator {
    /// Returns `true` for `> < >= <=`.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Greater | Self::Less | Self::GreaterEqual | Self::LessEqual)
    }
}

/// A call such as `sufit(x / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The called name.
    pub callee:    Identifier,
    /// Argument expressions in order.
    pub arguments: Vec<Expr>,
    /// Position of the opening parenthesis.
    pub position:  Position,
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant.
    Literal {
        /// The value.
        value:    Literal,
        /// Where it was written.
        position: Position,
    },
    /// A variable reference.
    Variable(Identifier),
    /// `nie x` or `-x`.
    Unary {
        /// The operator.
        op:       UnaryOperator,
        /// The operand.
        operand:  Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// `left op right`.
    Binary {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// `target[index]` on an array or a string.
    Index {
        /// The indexed expression.
        target:   Box<Self>,
        /// The index expression.
        index:    Box<Self>,
        /// Position of the `[`.
        position: Position,
    },
    /// A call used for its value.
    Call(Call),
}

impl Expr {
    /// Returns the position used when reporting errors about this expression.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Literal { position, .. }
            | Self::Unary { position, .. }
            | Self::Binary { position, .. }
            | Self::Index { position, .. } => *position,
            Self::Variable(identifier) => identifier.position,
            Self::Call(call) => call.position,
        }
    }

    /// Returns the name used for this expression in runtime messages: the
    /// variable or callee name where there is one.
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::Variable(identifier) => &identifier.name,
            Self::Call(call) => &call.callee.name,
            Self::Index { target, .. } => target.subject(),
            _ => "wyrażenie",
        }
    }
}

/// The left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// `x <- …`
    Variable(Identifier),
    /// `T[i] <- …`
    Element {
        /// The array or string variable.
        array: Identifier,
        /// The index expression.
        index: Expr,
    },
}

/// A user function definition.
///
/// The body is reference counted so that defining the function at runtime
/// does not copy it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The function name.
    pub name:     Identifier,
    /// Parameter names in order.
    pub params:   Vec<Identifier>,
    /// The function body.
    pub body:     Rc<Block>,
    /// Position of the `funkcja` keyword.
    pub position: Position,
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `x <- value` or `T[i] <- value`.
    Assignment {
        /// What is assigned.
        target: Target,
        /// The assigned expression.
        value:  Expr,
    },
    /// A call whose result is discarded.
    Call(Call),
    /// `dopóki condition wykonuj` + block.
    While {
        /// Loop condition, evaluated before every iteration.
        condition: Expr,
        /// Loop body.
        body:      Block,
        /// Position of `dopóki`.
        position:  Position,
    },
    /// `dla variable = start, second, ..., end wykonuj` + block.
    For {
        /// The loop variable.
        variable: Identifier,
        /// First value.
        start:    Expr,
        /// Second value; the step is `second - start`.
        second:   Expr,
        /// Inclusive bound.
        end:      Expr,
        /// Loop body.
        body:     Block,
        /// Position of `dla`.
        position: Position,
    },
    /// `jeżeli condition to` + block, with an optional else block.
    If {
        /// The condition.
        condition:   Expr,
        /// Executed when the condition holds.
        then_branch: Block,
        /// Executed otherwise.
        else_branch: Option<Block>,
        /// Position of `jeżeli`.
        position:    Position,
    },
    /// `funkcja name(params)` + block.
    Function(FunctionDef),
    /// `zwróć` with an optional value.
    Return {
        /// The returned expression, if any.
        value:    Option<Expr>,
        /// Position of `zwróć`.
        position: Position,
    },
    /// `wypisz value`.
    Print {
        /// The printed expression.
        value:    Expr,
        /// Position of `wypisz`.
        position: Position,
    },
}
