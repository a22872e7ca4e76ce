/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;

/// Renders a number the way the language prints it.
///
/// Integral values are printed without a fractional part, negative zero is
/// printed as `0`, and the non-finite values use the spellings `NaN`,
/// `Infinity` and `-Infinity`. Everything else uses the shortest
/// representation that round-trips, switching to exponent notation
/// (`1e+21`, `1e-7`) below `1e-6` and from `1e21` up.
///
/// # Example
/// ```
/// use pseudokod::util::num::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(1.0 / 0.0), "Infinity");
/// assert_eq!(format_number(1e23), "1e+23");
/// assert_eq!(format_number(-2.5e-7), "-2.5e-7");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }

    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        },
        _ => scientific,
    }
}

/// Converts a user-facing index into a zero-based slot.
///
/// The language lets the host choose the first valid index (the *origin*)
/// separately for arrays and strings. This subtracts the origin and checks
/// that the result is a non-negative integer that fits in `usize`.
///
/// The returned slot is not checked against any length; callers compare it
/// with the length of the indexed value themselves.
///
/// # Parameters
/// - `index`: The evaluated index expression.
/// - `origin`: First valid index for the indexed kind.
///
/// # Returns
/// `Some(slot)` for a usable slot, `None` if the index is fractional,
/// non-finite, below the origin or absurdly large.
///
/// # Example
/// ```
/// use pseudokod::util::num::index_to_slot;
///
/// assert_eq!(index_to_slot(1.0, 1), Some(0));
/// assert_eq!(index_to_slot(3.0, 0), Some(3));
/// assert_eq!(index_to_slot(0.0, 1), None);
/// assert_eq!(index_to_slot(1.5, 0), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn index_to_slot(index: f64, origin: i64) -> Option<usize> {
    let slot = index - origin as f64;

    if !slot.is_finite() || slot.fract() != 0.0 || slot < 0.0 || slot > MAX_SAFE_INT {
        return None;
    }

    usize::try_from(slot as u64).ok()
}

/// Converts a length into an `f64`, saturating at [`MAX_SAFE_INT`].
///
/// Lengths of arrays and strings never come near `2^53`, so the saturation
/// only exists to keep the conversion total.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn length_to_f64(length: usize) -> f64 {
    u64::try_from(length).map_or(MAX_SAFE_INT, |n| (n as f64).min(MAX_SAFE_INT))
}
