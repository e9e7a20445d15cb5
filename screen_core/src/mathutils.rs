//! Numeric helpers shared by the calculation stages.
//!
//! All comparisons between derived lengths, masses and torques go through the
//! tolerant predicates below (absolute tolerance [`STD_ACCURACY`]), never
//! through raw `<`/`==` on f64. Floors to whole millimetres are plain floors:
//! a length computed as 11.999999999999998 mm is 11 mm.

use crate::units::{mm, to_mm};

/// Standard gravity, m/s²
pub const GRAV_ACC: f64 = 9.80665;

/// Absolute tolerance for float comparisons
pub const STD_ACCURACY: f64 = 1e-6;

/// `a == b` within [`STD_ACCURACY`]
pub fn is_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= STD_ACCURACY
}

/// `large > small` and not within tolerance of each other
pub fn is_more(large: f64, small: f64) -> bool {
    !is_equal(large, small) && large > small
}

/// `large >= small` within tolerance
pub fn is_more_eq(large: f64, small: f64) -> bool {
    large > small || is_equal(large, small)
}

/// `small < large` and not within tolerance of each other
pub fn is_less(small: f64, large: f64) -> bool {
    !is_equal(small, large) && small < large
}

/// `small <= large` within tolerance
pub fn is_less_eq(small: f64, large: f64) -> bool {
    small < large || is_equal(small, large)
}

/// Round a length in metres down to whole millimetres (result in metres).
pub fn floor_to_mm(meters: f64) -> f64 {
    mm(to_mm(meters).floor())
}

/// Integer millimetre table key for a length in metres, floor-rounded.
///
/// Returns `None` for negative or non-finite lengths.
pub fn floor_mm_key(meters: f64) -> Option<u32> {
    let key = to_mm(meters).floor();
    (0.0..=f64::from(u32::MAX)).contains(&key).then_some(key as u32)
}

/// Integer millimetre key for a value given in millimetres, only when the
/// value is a whole number of millimetres.
pub fn exact_mm_key(millimeters: f64) -> Option<u32> {
    let nearest = millimeters.round();
    if is_equal(nearest, millimeters) {
        u32::try_from(nearest as i64).ok()
    } else {
        None
    }
}

/// Round to a fixed number of decimals.
///
/// Works on the exact binary value, so 0.175 (stored slightly below) gives
/// 0.17 where scaling by 100 and rounding would give 0.18. Exact ties go to
/// even.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Nearest odd integer.
///
/// Rounds half away from zero first. If that lands on an even number, steps
/// one unit toward the side the real value lies on; an exact even input
/// steps up (toward +∞ for +0 residual).
pub fn nearest_odd(value: f64) -> i64 {
    let rounded = value.round();
    let mut result = rounded as i64;
    if result.rem_euclid(2) == 0 {
        result += 1f64.copysign(value - rounded) as i64;
    }
    result
}

/// Nearest even integer, same tie-break policy as [`nearest_odd`].
pub fn nearest_even(value: f64) -> i64 {
    let rounded = value.round();
    let mut result = rounded as i64;
    if result.rem_euclid(2) != 0 {
        result += 1f64.copysign(value - rounded) as i64;
    }
    result
}

/// Shortest general format with 6 significant digits.
///
/// Trailing zeros are stripped; exponent notation is used below 1e-4 and
/// from 1e6 up. This is the format the equation file expects for lengths.
pub fn format_general(value: f64) -> String {
    const PRECISION: i32 = 6;

    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }

    let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_trailing_zeros(&mantissa), sign, exponent.abs())
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value))
    }
}

fn strip_trailing_zeros(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerant_comparisons() {
        assert!(is_equal(1.0, 1.0 + 1e-7));
        assert!(!is_more(1.0 + 1e-7, 1.0));
        assert!(is_more_eq(1.0 - 1e-7, 1.0));
        assert!(is_less(0.5, 1.0));
        assert!(is_less_eq(1.0 + 1e-7, 1.0));
    }

    #[test]
    fn test_floor_to_mm() {
        assert!((floor_to_mm(0.891_3) - 0.891).abs() < 1e-12);
        assert!((floor_to_mm(0.006_040_8) - 0.006).abs() < 1e-12);
        assert!((floor_to_mm(0.011_999_999_999_999_998) - 0.011).abs() < 1e-12);
    }

    #[test]
    fn test_mm_keys() {
        assert_eq!(floor_mm_key(0.012_72), Some(12));
        assert_eq!(floor_mm_key(0.014 - 2e-18), Some(13));
        assert_eq!(floor_mm_key(0.003 * 4.0 - 1e-18), Some(11));
        assert_eq!(floor_mm_key(-0.001), None);
        assert_eq!(floor_mm_key(f64::NAN), None);
        assert_eq!(exact_mm_key(6.0), Some(6));
        assert_eq!(exact_mm_key(5.5), None);
    }

    #[test]
    fn test_round_to() {
        assert!((round_to(0.283_333, 2) - 0.28).abs() < 1e-12);
        assert!((round_to(0.221_25, 3) - 0.221).abs() < 1e-12);
        assert_eq!(round_to(0.35 / 2.0, 2), 0.17);
    }

    #[test]
    fn test_nearest_odd() {
        assert_eq!(nearest_odd(4.2), 5);
        assert_eq!(nearest_odd(3.8), 3);
        assert_eq!(nearest_odd(5.0), 5);
        assert_eq!(nearest_odd(6.0), 7);
        assert_eq!(nearest_odd(-4.2), -5);
    }

    #[test]
    fn test_nearest_even() {
        assert_eq!(nearest_even(4.9), 4);
        assert_eq!(nearest_even(5.1), 6);
        assert_eq!(nearest_even(8.0), 8);
        assert_eq!(nearest_even(-2.6), -2);
    }

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(930.000_000_000_000_1), "930");
        assert_eq!(format_general(413.5), "413.5");
        assert_eq!(format_general(375.666_666_666), "375.667");
        assert_eq!(format_general(280.000_000_000_000_06), "280");
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(1_234_567.0), "1.23457e+06");
        assert_eq!(format_general(0.000_012_5), "1.25e-05");
    }
}
