use std::fmt;

use crate::util::num::format_number;

/// One printed item, detached from the interpreter's values.
///
/// `Display` renders the item the way the output panel shows it: numbers
/// like JavaScript's `Number#toString`, booleans as `PRAWDA`/`FAŁSZ`,
/// strings without quotes and arrays as `[a, b, c]`.
///
/// # Example
/// ```
/// use pseudokod::interpreter::value::printed::Printed;
///
/// let item = Printed::Array(vec![Printed::Number(1.0),
///                                Printed::Bool(true),
///                                Printed::Text("ala".into())]);
/// assert_eq!(item.to_string(), "[1, PRAWDA, ala]");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Printed {
    /// A number.
    Number(f64),
    /// A string. Printed booleans also end up here at the top level.
    Text(String),
    /// A boolean nested inside an array.
    Bool(bool),
    /// An array snapshot.
    Array(Vec<Self>),
    /// A function value.
    Function,
}

impl fmt::Display for Printed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => f.write_str(s),
            Self::Bool(true) => f.write_str("PRAWDA"),
            Self::Bool(false) => f.write_str("FAŁSZ"),
            Self::Function => f.write_str("<funkcja>"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
        }
    }
}
