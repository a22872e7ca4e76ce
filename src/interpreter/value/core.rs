use std::{cell::RefCell, fmt, ptr, rc::Rc};

use crate::{
    ast::Block,
    error::BuiltinError,
    interpreter::value::printed::Printed,
};

/// Shared, mutable array storage.
///
/// Arrays are aliased on assignment (`a <- T` makes `a` and `T` the same
/// array), so the storage is reference counted.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Signature of a native builtin implementation.
pub type BuiltinFn = fn(&[Value]) -> Result<Value, BuiltinError>;

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    /// A double precision number. The language has no separate integer type.
    Number(f64),
    /// A string.
    Text(String),
    /// `PRAWDA` or `FAŁSZ`.
    Bool(bool),
    /// A mutable, shared array of values.
    Array(ArrayRef),
    /// A builtin or user defined function.
    Function(Callable),
}

/// The coarse type used by `==` and `!=`: both operands must share it.
///
/// Arrays and functions are both objects and compare by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    Number,
    Text,
    Bool,
    Object,
}

/// Something that can be called.
#[derive(Debug, Clone)]
pub enum Callable {
    /// A native function from the builtin table.
    Builtin(&'static Builtin),
    /// A function defined with `funkcja`.
    User(Rc<UserFunction>),
}

/// A native function available in every run.
pub struct Builtin {
    /// Name under which the builtin is bound in the global frame.
    pub name:   &'static str,
    /// Parameter names; their count is the arity.
    pub params: &'static [&'static str],
    /// The implementation.
    pub func:   BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
         .field("name", &self.name)
         .field("params", &self.params)
         .finish_non_exhaustive()
    }
}

/// A function defined by the program.
#[derive(Debug)]
pub struct UserFunction {
    /// The name it was defined under.
    pub name:   String,
    /// Parameter names in order.
    pub params: Vec<String>,
    /// The body, shared with the AST.
    pub body:   Rc<Block>,
}

impl Callable {
    /// Number of arguments the callable takes.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Builtin(builtin) => builtin.params.len(),
            Self::User(function) => function.params.len(),
        }
    }

    fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Builtin(a), Self::Builtin(b)) => ptr::eq(*a, *b),
            (Self::User(a), Self::User(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A starting binding supplied by the host.
///
/// Unlike [`Value`], this type owns plain data only and is `Send`, so it can
/// be handed to the thread that runs the program.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Array(Vec<Self>),
}

impl From<f64> for InitialValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for InitialValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for InitialValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for InitialValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Self>> From<Vec<T>> for InitialValue {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(v)))
    }
}

impl From<InitialValue> for Value {
    fn from(v: InitialValue) -> Self {
        match v {
            InitialValue::Number(n) => Self::Number(n),
            InitialValue::Text(s) => Self::Text(s),
            InitialValue::Bool(b) => Self::Bool(b),
            InitialValue::Array(items) => items.into_iter().map(Self::from).collect::<Vec<_>>().into(),
        }
    }
}

impl Value {
    /// Returns the class `==` and `!=` use to decide comparability.
    #[must_use]
    pub const fn type_class(&self) -> TypeClass {
        match self {
            Self::Number(_) => TypeClass::Number,
            Self::Text(_) => TypeClass::Text,
            Self::Bool(_) => TypeClass::Bool,
            Self::Array(_) | Self::Function(_) => TypeClass::Object,
        }
    }

    /// Truthiness as used by `nie`.
    ///
    /// `0`, `NaN`, the empty string and `FAŁSZ` are falsy; everything else,
    /// including every array and function, is truthy.
    ///
    /// # Example
    /// ```
    /// use pseudokod::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::from(vec![]).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::Array(_) | Self::Function(_) => true,
        }
    }

    /// Strict equality.
    ///
    /// Numbers compare by value (so `NaN` is unequal to itself), strings by
    /// content, booleans by value, arrays and functions by identity. Values
    /// of different classes are never equal; the evaluator rejects such
    /// comparisons before getting here.
    #[must_use]
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => a.same_as(b),
            _ => false,
        }
    }

    /// Takes the snapshot `wypisz` records.
    ///
    /// A boolean at the top level is rendered into its literal text; nested
    /// values keep their kind.
    #[must_use]
    pub fn to_printed(&self) -> Printed {
        match self {
            Self::Bool(true) => Printed::Text("PRAWDA".to_string()),
            Self::Bool(false) => Printed::Text("FAŁSZ".to_string()),
            _ => self.snapshot(&mut Vec::new()),
        }
    }

    /// Deep-copies the value. An array that contains itself is cut off at
    /// the repeated reference, which renders as an empty item.
    fn snapshot(&self, path: &mut Vec<*const RefCell<Vec<Self>>>) -> Printed {
        match self {
            Self::Number(n) => Printed::Number(*n),
            Self::Text(s) => Printed::Text(s.clone()),
            Self::Bool(b) => Printed::Bool(*b),
            Self::Function(_) => Printed::Function,
            Self::Array(items) => {
                let key = Rc::as_ptr(items);
                if path.contains(&key) {
                    return Printed::Text(String::new());
                }

                path.push(key);
                let copy = items.borrow().iter().map(|item| item.snapshot(path)).collect();
                path.pop();

                Printed::Array(copy)
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_printed())
    }
}
