//! Significant-figure display formatting.
//!
//! Values are shown with a fixed number of significant figures, switching to
//! `mantissa e±exponent` form when the decimal magnitude is `>= 4` or `< -2`.
//! [`parse_formatted`] recovers a float from either form.

/// Significant figures used for every displayed summary value.
pub const DISPLAY_SIG_FIGS: usize = 5;

/// Literal used for an exact zero.
pub const ZERO_DISPLAY: &str = "0.0000";

/// Formats `value` with `sig_figs` significant figures.
///
/// Non-finite values are rendered with their standard `Display` form.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub fn format_significant(value: f64, sig_figs: usize) -> String {
    if value == 0.0 {
        return ZERO_DISPLAY.to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;

    if !(-2..4).contains(&magnitude) {
        let mantissa = value / 10f64.powi(magnitude);
        let decimals = sig_figs.saturating_sub(1);
        return format!("{mantissa:.decimals$}e{magnitude:+}");
    }

    // magnitude is in [-2, 4) here, so the subtraction stays small
    let decimals = (sig_figs as i32 - magnitude - 1).max(0) as usize;
    format!("{value:.decimals$}")
}

/// Formats with [`DISPLAY_SIG_FIGS`].
#[must_use]
pub fn format_display(value: f64) -> String {
    format_significant(value, DISPLAY_SIG_FIGS)
}

/// Best-effort numeric recovery of a formatted value.
///
/// Returns `None` when the text is not a number.
pub fn parse_formatted(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Like [`parse_formatted`] but yields `0.0` for unparseable text.
#[must_use]
pub fn parse_formatted_or_zero(text: &str) -> f64 {
    parse_formatted(text).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_literal() {
        assert_eq!(format_display(0.0), "0.0000");
        assert_eq!(format_display(-0.0), "0.0000");
    }

    #[test]
    fn test_fixed_notation() {
        assert_eq!(format_display(12.345), "12.345");
        assert_eq!(format_display(1.0), "1.0000");
        assert_eq!(format_display(-0.5), "-0.50000");
        assert_eq!(format_display(0.0123), "0.012300");
        assert_eq!(format_display(1234.5678), "1234.6");
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(format_display(123_456.0), "1.2346e+5");
        assert_eq!(format_display(0.001), "1.0000e-3");
        assert_eq!(format_display(-25_000.0), "-2.5000e+4");
        assert_eq!(format_significant(123_456.0, 3), "1.23e+5");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_display(f64::NAN), "NaN");
        assert_eq!(format_display(f64::INFINITY), "inf");
    }

    #[test]
    fn test_parse_both_forms() {
        assert_relative_eq!(parse_formatted("1.2346e+5").unwrap(), 123_460.0);
        assert_relative_eq!(parse_formatted(" 12.345 ").unwrap(), 12.345);
        assert!(parse_formatted("N/A").is_none());
        assert!(parse_formatted_or_zero("N/A").abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_trip_within_display_precision() {
        for &v in &[0.01234, 0.5, 3.141_59, -7.25, 42.0, 999.99, 5_432.1] {
            let back = parse_formatted(&format_display(v)).unwrap();
            assert_relative_eq!(back, v, max_relative = 1e-4);
        }
    }
}
