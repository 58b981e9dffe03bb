/// Console formatting helpers shared by the `Display` impls
use std::fmt;

/// Digits printed after the decimal point when the formatter has no precision.
pub const DEFAULT_PRECISION: usize = 6;

/// Precision requested by `{:.N}`, falling back to [`DEFAULT_PRECISION`].
pub(crate) fn precision(f: &fmt::Formatter<'_>) -> usize {
    f.precision().unwrap_or(DEFAULT_PRECISION)
}

/// Write `label: value` pairs separated by spaces, e.g. `x: 1.000 y: 2.000`.
pub(crate) fn write_fields(
    f: &mut fmt::Formatter<'_>,
    fields: &[(&str, f32)],
) -> fmt::Result {
    let digits = precision(f);
    for (i, (label, value)) in fields.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{label}: {value:.digits$}")?;
    }
    Ok(())
}
