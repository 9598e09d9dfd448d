//! Column grid arithmetic.
//!
//! Column widths are percentages quantized to `100 / MAX_COLUMNS` steps.
//! Widths measured from the DOM are never exact (49.995% instead of 50%), so
//! every width passes through [`accepted_column_width`] before it is stored.

/// Maximum number of columns in a column group.
pub const MAX_COLUMNS: u32 = 6;

/// Distance from a grid value within which a width still snaps onto it.
const SNAP_TOLERANCE: f64 = 0.1;

/// Decimal places kept for widths that are not whole numbers.
const WIDTH_PRECISION: i32 = 8;

/// Get the maximum columns allowed
pub fn max_columns() -> u32 {
    MAX_COLUMNS
}

/// Get the smallest column width possible (one grid unit)
pub fn smallest_column_width() -> f64 {
    accepted_column_width(rounded_column_width(100.0 / f64::from(max_columns())))
}

/// Snap a raw percentage onto the column grid.
///
/// Grid values are tried from the widest down, so the first one within
/// tolerance wins. Returns `0.0` when no grid value is close enough; callers
/// must treat that as a failed snap, never as a width.
pub fn accepted_column_width(width: f64) -> f64 {
    for i in (1..=max_columns()).rev() {
        let percentage = grid_percentage(i);
        if width > percentage - SNAP_TOLERANCE && width < percentage + SNAP_TOLERANCE {
            return percentage;
        }
    }
    tracing::trace!(width, "width does not snap to the column grid");
    0.0
}

/// Round a width to 8 decimal places, leaving whole numbers untouched.
pub fn rounded_column_width(width: f64) -> f64 {
    if width.fract() != 0.0 {
        round_to(width, WIDTH_PRECISION)
    } else {
        width
    }
}

/// Width of `units` grid units, in its canonical rounded form.
pub fn grid_percentage(units: u32) -> f64 {
    rounded_column_width(100.0 / f64::from(max_columns()) * f64::from(units))
}

/// Store representation of a width (`"50%"`, `"16.66666667%"`).
pub fn format_width(width: f64) -> String {
    format!("{width}%")
}

/// Parse the leading number of a stored width value.
///
/// Trailing units are ignored, so `"33.33333333%"` and `"33.33333333"` both
/// read as `33.33333333`.
pub fn parse_width(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let numeric_len = trimmed
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .map_or(trimmed.len(), |(i, _)| i);

    let mut candidate = trimmed.get(..numeric_len)?;
    while !candidate.is_empty() {
        if let Ok(width) = candidate.parse::<f64>() {
            return width.is_finite().then_some(width);
        }
        candidate = candidate.get(..candidate.len() - 1)?;
    }
    None
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round a delta to the precision widths are stored at.
pub(crate) fn round_delta(value: f64) -> f64 {
    round_to(value, WIDTH_PRECISION)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_smallest_column_width() {
        assert_eq!(smallest_column_width(), 16.66666667);
    }

    #[test]
    fn test_grid_percentages() {
        assert_eq!(grid_percentage(1), 16.66666667);
        assert_eq!(grid_percentage(2), 33.33333333);
        assert_eq!(grid_percentage(3), 50.0);
        assert_eq!(grid_percentage(4), 66.66666667);
        assert_eq!(grid_percentage(5), 83.33333333);
        assert_eq!(grid_percentage(6), 100.0);
    }

    #[test]
    fn test_accepts_rounding_noise() {
        assert_eq!(accepted_column_width(49.995), 50.0);
        assert_eq!(accepted_column_width(50.09), 50.0);
        assert_eq!(accepted_column_width(33.3), 33.33333333);
    }

    #[test]
    fn test_rejects_off_grid() {
        assert_eq!(accepted_column_width(10.0), 0.0);
        assert_eq!(accepted_column_width(50.2), 0.0);
        assert_eq!(accepted_column_width(0.0), 0.0);
        assert_eq!(accepted_column_width(-16.66666667), 0.0);
    }

    #[test]
    fn test_rounded_column_width() {
        assert_eq!(rounded_column_width(25.0), 25.0);
        assert_eq!(rounded_column_width(100.0 / 3.0), 33.33333333);
        assert_eq!(rounded_column_width(12.123456789), 12.12345679);
    }

    #[test]
    fn test_format_width() {
        assert_eq!(format_width(50.0), "50%");
        assert_eq!(format_width(16.66666667), "16.66666667%");
    }

    #[test]
    fn test_parse_width() {
        assert_eq!(parse_width("50%"), Some(50.0));
        assert_eq!(parse_width(" 33.33333333%"), Some(33.33333333));
        assert_eq!(parse_width("100"), Some(100.0));
        assert_eq!(parse_width("12.5e"), Some(12.5));
        assert_eq!(parse_width("auto"), None);
        assert_eq!(parse_width(""), None);
    }
}
