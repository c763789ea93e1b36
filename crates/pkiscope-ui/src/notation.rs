//! Number formatting for prediction results.

/// Precision used for the linear-scale Ki value.
pub const DEFAULT_KI_PRECISION: usize = 3;

/// Precision used for the log-scale pKi value.
pub const P_KI_PRECISION: usize = 2;

/// Format `value` as `"<mantissa> × 10^<exponent>"` with the mantissa rounded
/// to `decimals` places.
///
/// Zero (either sign) is rendered as `"0"`. Non-finite values have no
/// exponent and are rendered as-is (`NaN`, `inf`, `-inf`).
///
/// The mantissa is rounded after normalisation, so values just below a power
/// of ten can produce a mantissa of `10.000`. Ties round away from zero.
///
/// Subnormals small enough that `10^exponent` underflows to zero get an
/// infinite mantissa: `5e-324` renders as `"inf × 10^-324"`.
pub fn format_to_power_notation(value: f64, decimals: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let exponent = value.abs().log10().floor() as i32;
    let mantissa = value / 10f64.powf(exponent as f64);
    format!("{} × 10^{}", to_fixed(mantissa, decimals), exponent)
}

/// Format a pKi value for display.
pub fn format_p_ki(value: f64) -> String {
    to_fixed(value, P_KI_PRECISION)
}

/// Fixed-point formatting with ties rounded away from zero.
///
/// `{:.N}` alone rounds exact ties to even (`7.125` -> `7.12`).
fn to_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return format!("{:.*}", decimals, value);
    }
    format!("{:.*}", decimals, scaled.round() / scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_is_literal_for_any_precision() {
        for decimals in 0..8 {
            assert_eq!(format_to_power_notation(0.0, decimals), "0");
        }
        assert_eq!(format_to_power_notation(-0.0, 3), "0");
    }

    #[test]
    fn test_positive_exponent() {
        assert_eq!(format_to_power_notation(1234.0, 2), "1.23 × 10^3");
    }

    #[test]
    fn test_negative_exponent() {
        assert_eq!(format_to_power_notation(0.0005, 3), "5.000 × 10^-4");
    }

    #[test]
    fn test_unit_range() {
        assert_eq!(format_to_power_notation(7.5, DEFAULT_KI_PRECISION), "7.500 × 10^0");
        assert_eq!(format_to_power_notation(1.0, 1), "1.0 × 10^0");
    }

    #[test]
    fn test_negative_value_keeps_sign() {
        assert_eq!(format_to_power_notation(-250.0, 1), "-2.5 × 10^2");
    }

    #[test]
    fn test_ki_from_typical_pki() {
        // Ki = 10^(9 - pKi) nM; pKi 7.25 -> ~56.23 nM
        let ki = 10f64.powf(9.0 - 7.25);
        assert_eq!(format_to_power_notation(ki, DEFAULT_KI_PRECISION), "5.623 × 10^1");
        assert_eq!(format_p_ki(7.25), "7.25");
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert_eq!(format_to_power_notation(f64::NAN, 3), "NaN");
        assert_eq!(format_to_power_notation(f64::INFINITY, 3), "inf");
        assert_eq!(format_to_power_notation(f64::NEG_INFINITY, 3), "-inf");
    }

    #[test]
    fn test_zero_decimals() {
        assert_eq!(format_to_power_notation(420.0, 0), "4 × 10^2");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_p_ki(7.125), "7.13");
        assert_eq!(format_to_power_notation(112.5, 2), "1.13 × 10^2");
        assert_eq!(format_to_power_notation(250.0, 0), "3 × 10^2");
        assert_eq!(format_to_power_notation(-250.0, 0), "-3 × 10^2");
    }

    #[test]
    fn test_subnormal_underflows_to_infinite_mantissa() {
        assert_eq!(format_to_power_notation(5e-324, 3), "inf × 10^-324");
    }
}
