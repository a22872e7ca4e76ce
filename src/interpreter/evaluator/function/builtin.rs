use crate::{
    error::BuiltinError,
    interpreter::value::core::Value,
    util::num::{format_number, length_to_f64},
};

/// Rounds a number up.
///
/// # Example
/// ```
/// use pseudokod::interpreter::{evaluator::function::builtin::sufit, value::core::Value};
///
/// let r = sufit(&[Value::Number(2.3)]).unwrap();
/// assert!(r.strict_eq(&Value::Number(3.0)));
///
/// assert!(sufit(&[Value::Bool(true)]).is_err());
/// ```
pub fn sufit(args: &[Value]) -> Result<Value, BuiltinError> {
    match args {
        [Value::Number(n)] => Ok(Value::Number(n.ceil())),
        _ => Err(BuiltinError::new("Argumentem funkcji sufit musi być liczba.")),
    }
}

/// Rounds a number down.
pub fn podloga(args: &[Value]) -> Result<Value, BuiltinError> {
    match args {
        [Value::Number(n)] => Ok(Value::Number(n.floor())),
        _ => Err(BuiltinError::new("Argumentem funkcji podloga musi być liczba.")),
    }
}

/// Returns the number of elements of an array or characters of a string.
///
/// # Example
/// ```
/// use pseudokod::interpreter::{evaluator::function::builtin::dl, value::core::Value};
///
/// let r = dl(&[Value::from("żółw")]).unwrap();
/// assert!(r.strict_eq(&Value::Number(4.0)));
/// ```
pub fn dl(args: &[Value]) -> Result<Value, BuiltinError> {
    match args {
        [Value::Array(items)] => Ok(Value::Number(length_to_f64(items.borrow().len()))),
        [Value::Text(text)] => Ok(Value::Number(length_to_f64(text.chars().count()))),
        _ => Err(BuiltinError::new("Argumentem funkcji dl musi być tablica lub napis.")),
    }
}

/// Converts a number into its printed text.
pub fn napis(args: &[Value]) -> Result<Value, BuiltinError> {
    match args {
        [Value::Number(n)] => Ok(Value::Text(format_number(*n))),
        _ => Err(BuiltinError::new("Argumentem funkcji napis musi być liczba.")),
    }
}
