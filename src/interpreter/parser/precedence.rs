use std::mem;

use crate::{
    ast::{BinaryOperator, Expr, Literal, UnaryOperator},
    error::SyntaxError,
    interpreter::{
        lexer::{Operator, Position},
        parser::core::ParseResult,
    },
};

/// One element of a flattened expression.
pub(super) enum Item {
    /// A literal, variable, call or already parsed subexpression.
    Operand(Expr),
    /// An operator token.
    Operator(Operator, Position),
    /// `(` that opens a group.
    Open(Position),
    /// `)` that closes a group.
    Close(Position),
    /// `[index]` applying to the operand on its left.
    Index(Expr, Position),
}

/// An element of one parenthesised level, after grouping.
enum Node {
    Operand(Expr),
    Operator(Operator, Position),
    Index(Expr, Position),
}

impl Node {
    fn position(&self) -> Position {
        match self {
            Self::Operand(expr) => expr.position(),
            Self::Operator(_, position) | Self::Index(_, position) => *position,
        }
    }
}

const MULTIPLICATIVE: &[BinaryOperator] = &[BinaryOperator::Mul,
                                            BinaryOperator::Div,
                                            BinaryOperator::IntDiv,
                                            BinaryOperator::Mod];
const ADDITIVE: &[BinaryOperator] = &[BinaryOperator::Add, BinaryOperator::Sub];
const COMPARISON: &[BinaryOperator] = &[BinaryOperator::Greater,
                                        BinaryOperator::Less,
                                        BinaryOperator::GreaterEqual,
                                        BinaryOperator::LessEqual,
                                        BinaryOperator::Equal,
                                        BinaryOperator::NotEqual];

/// Groups a flat expression by its parentheses and reduces every group.
///
/// Groups are collected with an explicit stack: `(` suspends the list being
/// built, `)` reduces the finished group to a single operand and appends it
/// to the suspended list.
///
/// # Parameters
/// - `items`: The flattened expression.
/// - `start`: Position of its first token, used for errors about the whole
///   expression.
pub(super) fn reduce(items: Vec<Item>, start: Position) -> ParseResult<Expr> {
    let mut current = Vec::new();
    let mut suspended: Vec<(Position, Vec<Node>)> = Vec::new();

    for item in items {
        match item {
            Item::Operand(expr) => current.push(Node::Operand(expr)),
            Item::Operator(op, position) => current.push(Node::Operator(op, position)),
            Item::Index(index, position) => current.push(Node::Index(index, position)),
            Item::Open(position) => suspended.push((position, mem::take(&mut current))),
            Item::Close(position) => {
                let Some((open, parent)) = suspended.pop() else {
                    return Err(SyntaxError::new("Nieoczekiwany token: nawias okrągły.", position));
                };
                let group = mem::replace(&mut current, parent);
                current.push(Node::Operand(reduce_level(group, open)?));
            },
        }
    }

    if let Some((open, _)) = suspended.pop() {
        return Err(SyntaxError::new("Oczekiwano zamknięcia nawiasu okrągłego, znaleziono: koniec \
                                     wejścia.",
                                    open));
    }

    reduce_level(current, start)
}

/// Reduces one parenthesis-free level to a single expression.
///
/// Tiers, tightest first: indexing, unary minus, `* / div mod`, `+ -`,
/// comparisons, `nie`, `oraz`, `lub`. Binary tiers fold left to right; the
/// prefix operators fold right to left so they can be stacked.
fn reduce_level(nodes: Vec<Node>, position: Position) -> ParseResult<Expr> {
    if nodes.is_empty() {
        return Err(SyntaxError::new("Oczekiwano wyrażenia, znaleziono: nawias okrągły.", position));
    }

    let mut nodes = fold_index(nodes)?;
    fold_prefix(&mut nodes, Operator::Sub, is_unary_minus, negate)?;
    fold_binary(&mut nodes, MULTIPLICATIVE)?;
    fold_binary(&mut nodes, ADDITIVE)?;
    fold_binary(&mut nodes, COMPARISON)?;
    fold_prefix(&mut nodes, Operator::Not, |_, _| true, |operand, position| {
        Expr::Unary { op: UnaryOperator::Not,
                      operand: Box::new(operand),
                      position }
    })?;
    fold_binary(&mut nodes, &[BinaryOperator::And])?;
    fold_binary(&mut nodes, &[BinaryOperator::Or])?;

    into_single(nodes)
}

fn fold_index(nodes: Vec<Node>) -> ParseResult<Vec<Node>> {
    let mut folded = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            Node::Index(index, position) => {
                let Some(Node::Operand(target)) = folded.pop() else {
                    return Err(missing_operand("[]", position));
                };
                folded.push(Node::Operand(Expr::Index { target: Box::new(target),
                                                        index: Box::new(index),
                                                        position }));
            },
            other => folded.push(other),
        }
    }

    Ok(folded)
}

/// A `-` is unary when nothing that could be its left operand precedes it.
fn is_unary_minus(nodes: &[Node], i: usize) -> bool {
    i == 0 || matches!(nodes[i - 1], Node::Operator(..))
}

/// A numeric literal absorbs the sign; anything else is negated at runtime.
fn negate(operand: Expr, position: Position) -> Expr {
    match operand {
        Expr::Literal { value: Literal::Number(n),
                        .. } => Expr::Literal { value: Literal::Number(-n),
                                                position },
        operand => Expr::Unary { op: UnaryOperator::Negate,
                                 operand: Box::new(operand),
                                 position },
    }
}

fn fold_prefix(nodes: &mut Vec<Node>,
               operator: Operator,
               applies: fn(&[Node], usize) -> bool,
               build: fn(Expr, Position) -> Expr)
               -> ParseResult<()> {
    let mut i = nodes.len();

    while i > 0 {
        i -= 1;

        let &Node::Operator(op, position) = &nodes[i] else {
            continue;
        };
        if op != operator || !applies(nodes, i) {
            continue;
        }

        let Some(operand) = take_operand(nodes, i + 1) else {
            return Err(missing_operand(op.as_str(), position));
        };
        nodes[i] = Node::Operand(build(operand, position));
    }

    Ok(())
}

fn fold_binary(nodes: &mut Vec<Node>, tier: &[BinaryOperator]) -> ParseResult<()> {
    let mut i = 0;

    while i < nodes.len() {
        let &Node::Operator(op, position) = &nodes[i] else {
            i += 1;
            continue;
        };
        let Some(binary) = binary_operator(op).filter(|b| tier.contains(b)) else {
            i += 1;
            continue;
        };

        if i == 0 {
            return Err(missing_operand(op.as_str(), position));
        }
        let Some(right) = take_operand(nodes, i + 1) else {
            return Err(missing_operand(op.as_str(), position));
        };
        let Some(left) = take_operand(nodes, i - 1) else {
            return Err(missing_operand(op.as_str(), position));
        };

        nodes[i - 1] = Node::Operand(Expr::Binary { left: Box::new(left),
                                                    op: binary,
                                                    right: Box::new(right),
                                                    position });
    }

    Ok(())
}

/// Removes and returns the operand at `index`, leaving anything else alone.
fn take_operand(nodes: &mut Vec<Node>, index: usize) -> Option<Expr> {
    if !matches!(nodes.get(index), Some(Node::Operand(_))) {
        return None;
    }

    match nodes.remove(index) {
        Node::Operand(expr) => Some(expr),
        _ => None,
    }
}

const fn binary_operator(op: Operator) -> Option<BinaryOperator> {
    let binary = match op {
        Operator::Mul => BinaryOperator::Mul,
        Operator::Div => BinaryOperator::Div,
        Operator::IntDiv => BinaryOperator::IntDiv,
        Operator::Mod => BinaryOperator::Mod,
        Operator::Add => BinaryOperator::Add,
        Operator::Sub => BinaryOperator::Sub,
        Operator::Greater => BinaryOperator::Greater,
        Operator::Less => BinaryOperator::Less,
        Operator::GreaterEqual => BinaryOperator::GreaterEqual,
        Operator::LessEqual => BinaryOperator::LessEqual,
        Operator::Equal => BinaryOperator::Equal,
        Operator::NotEqual => BinaryOperator::NotEqual,
        Operator::And => BinaryOperator::And,
        Operator::Or => BinaryOperator::Or,
        Operator::Not => return None,
    };
    Some(binary)
}

fn missing_operand(op: &str, position: Position) -> SyntaxError {
    SyntaxError::new(format!("Brak operandu dla operatora {op}."), position)
}

/// Checks that reduction left exactly one operand.
///
/// Leftovers mean two operands sat next to each other, as in `x y` or
/// `1 "a"`.
fn into_single(mut nodes: Vec<Node>) -> ParseResult<Expr> {
    if nodes.len() > 1 {
        for (i, node) in nodes.iter().enumerate() {
            if i % 2 == 1
               && let Node::Operand(Expr::Variable(identifier)) = node
            {
                return Err(SyntaxError::new(format!("Nieoczekiwana zmienna: {}.", identifier.name),
                                            identifier.position));
            }
        }
        return Err(SyntaxError::new("Nieoczekiwane wyrażenie.", nodes[1].position()));
    }

    match nodes.pop() {
        Some(Node::Operand(expr)) => Ok(expr),
        Some(node) => Err(SyntaxError::new("Nieoczekiwane wyrażenie.", node.position())),
        None => Err(SyntaxError::new("Nieoczekiwane wyrażenie.", Position::default())),
    }
}
