use thiserror::Error;

use crate::InitialValue;

/// A starting binding that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The text has no `=` separating the name from the value.
    #[error("Niepoprawna definicja zmiennej: {0}. Oczekiwano nazwa=wartość.")]
    MissingEquals(String),
    /// The name is not a valid identifier of the language.
    #[error("Niepoprawna nazwa zmiennej: {0}.")]
    InvalidName(String),
}

/// Parses the value of a starting binding.
///
/// - Text containing a comma, or wrapped in `[ ]`, is an array whose
///   comma-separated pieces are parsed as scalars.
/// - `PRAWDA` and `FAŁSZ` are booleans.
/// - A decimal number such as `-3` or `2.5` is a number.
/// - Text wrapped in double quotes is a string without the quotes.
/// - Anything else is a string as written, after trimming.
///
/// # Example
/// ```
/// use pseudokod::{InitialValue, harness::bindings::parse_value};
///
/// assert_eq!(parse_value("10"), InitialValue::Number(10.0));
/// assert_eq!(parse_value("1, PRAWDA, ala"),
///            InitialValue::Array(vec![InitialValue::Number(1.0),
///                                     InitialValue::Bool(true),
///                                     InitialValue::Text("ala".into())]));
/// assert_eq!(parse_value("\"1, 2\""), InitialValue::Text("1, 2".into()));
/// ```
#[must_use]
pub fn parse_value(text: &str) -> InitialValue {
    let text = text.trim();

    if let Some(quoted) = unquote(text) {
        return InitialValue::Text(quoted.to_string());
    }

    if let Some(inner) = text.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        if inner.trim().is_empty() {
            return InitialValue::Array(Vec::new());
        }
        return InitialValue::Array(inner.split(',').map(parse_scalar).collect());
    }

    if text.contains(',') {
        return InitialValue::Array(text.split(',').map(parse_scalar).collect());
    }

    parse_scalar(text)
}

/// Parses `name=value`.
///
/// # Errors
/// [`BindingError::MissingEquals`] without an `=`, and
/// [`BindingError::InvalidName`] when the name is not an identifier.
///
/// # Example
/// ```
/// use pseudokod::{InitialValue, harness::bindings::parse_binding};
///
/// let (name, value) = parse_binding("n=10").unwrap();
/// assert_eq!(name, "n");
/// assert_eq!(value, InitialValue::Number(10.0));
///
/// assert!(parse_binding("żółw=1").is_err());
/// ```
pub fn parse_binding(text: &str) -> Result<(String, InitialValue), BindingError> {
    let Some((name, value)) = text.split_once('=') else {
        return Err(BindingError::MissingEquals(text.to_string()));
    };

    let name = name.trim();
    if !is_identifier(name) {
        return Err(BindingError::InvalidName(name.to_string()));
    }

    Ok((name.to_string(), parse_value(value)))
}

fn parse_scalar(piece: &str) -> InitialValue {
    let piece = piece.trim();

    match piece {
        "PRAWDA" => InitialValue::Bool(true),
        "FAŁSZ" => InitialValue::Bool(false),
        _ if is_decimal(piece) => piece.parse().map_or_else(|_| InitialValue::Text(piece.to_string()),
                                                            InitialValue::Number),
        _ => InitialValue::Text(unquote(piece).unwrap_or(piece).to_string()),
    }
}

/// Strips one pair of surrounding double quotes, if the text has exactly
/// those two.
fn unquote(text: &str) -> Option<&str> {
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .filter(|inner| !inner.contains('"'))
}

/// `-?\d+(\.\d+)?`, the number syntax of the language plus a sign.
fn is_decimal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "0"));

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && all_digits(fraction)
}

fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();

    bytes.next().is_some_and(|b| b == b'_' || b.is_ascii_alphabetic())
    && bytes.all(|b| b == b'_' || b.is_ascii_alphanumeric())
}
