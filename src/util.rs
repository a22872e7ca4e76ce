/// Numeric helpers.
///
/// Rendering of numbers for output, conversion of user-facing indices into
/// zero-based slots (taking the configured origin into account) and safe
/// length conversions.
pub mod num;
