//! Numeric coercion of display values and formatting of sums

use lazy_regex::regex_find;

/// Coerce a display value to a number
///
/// Parses the longest numeric literal at the start of `text` (after leading
/// whitespace): an optional sign followed by `Infinity` or by digits with an
/// optional decimal point and exponent. Anything that does not start with such
/// a literal, including error tokens and the empty string, coerces to `0`.
///
/// # Examples
/// ```
/// use tally_sheets_formula::leading_number;
///
/// assert_eq!(leading_number("42"), 42.0);
/// assert_eq!(leading_number(" 12.5kg"), 12.5);
/// assert_eq!(leading_number("-.5"), -0.5);
/// assert_eq!(leading_number("#REF!"), 0.0);
/// assert_eq!(leading_number("Revenue"), 0.0);
/// ```
pub fn leading_number(text: &str) -> f64 {
    let text = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

    let Some(literal) = regex_find!(
        r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)",
        text
    ) else {
        return 0.0;
    };

    match literal.parse::<f64>() {
        Ok(n) if !n.is_nan() => n,
        _ => 0.0,
    }
}

/// Format a sum as its display string
///
/// Whole numbers print without a fractional part, other values with the
/// shortest digits that round-trip. Magnitudes of `1e21` and above or below
/// `1e-6` use exponent notation with an explicit sign (`1e+21`, `1.5e-7`).
///
/// # Examples
/// ```
/// use tally_sheets_formula::format_number;
///
/// assert_eq!(format_number(15.0), "15");
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(1e21), "1e+21");
/// ```
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    if (1e-6..1e21).contains(&n.abs()) {
        return format!("{n}");
    }

    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_leading_number_plain() {
        assert_eq!(leading_number("0"), 0.0);
        assert_eq!(leading_number("1000"), 1000.0);
        assert_eq!(leading_number("-3"), -3.0);
        assert_eq!(leading_number("+7.25"), 7.25);
        assert_eq!(leading_number("5."), 5.0);
        assert_eq!(leading_number(".5"), 0.5);
        assert_eq!(leading_number("1e3"), 1000.0);
        assert_eq!(leading_number("2.5E-1"), 0.25);
    }

    #[test]
    fn test_leading_number_takes_prefix() {
        assert_eq!(leading_number("12abc"), 12.0);
        assert_eq!(leading_number("2.75.1"), 2.75);
        assert_eq!(leading_number("1e"), 1.0);
        assert_eq!(leading_number("1e+"), 1.0);
        assert_eq!(leading_number("7 apples"), 7.0);
        assert_eq!(leading_number("\t\n 8"), 8.0);
        assert_eq!(leading_number("1,000"), 1.0);
    }

    #[test]
    fn test_leading_number_failures_are_zero() {
        assert_eq!(leading_number(""), 0.0);
        assert_eq!(leading_number("   "), 0.0);
        assert_eq!(leading_number("x"), 0.0);
        assert_eq!(leading_number("-"), 0.0);
        assert_eq!(leading_number("."), 0.0);
        assert_eq!(leading_number("$5"), 0.0);
        assert_eq!(leading_number("#REF!"), 0.0);
        assert_eq!(leading_number("#NAME?"), 0.0);
        assert_eq!(leading_number("NaN"), 0.0);
        assert_eq!(leading_number("infinity"), 0.0);
    }

    #[test]
    fn test_leading_number_infinity() {
        assert_eq!(leading_number("Infinity"), f64::INFINITY);
        assert_eq!(leading_number("-Infinity and beyond"), f64::NEG_INFINITY);
        assert_eq!(leading_number("1e400"), f64::INFINITY);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(3700.0), "3700");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_number_exponent_forms() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e30), "-2.5e+30");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    proptest! {
        #[test]
        fn prop_leading_number_never_nan(text in "\\PC*") {
            prop_assert!(!leading_number(&text).is_nan());
        }

        #[test]
        fn prop_formatted_sums_coerce_back(
            n in prop::num::f64::POSITIVE
                | prop::num::f64::NEGATIVE
                | prop::num::f64::NORMAL
                | prop::num::f64::ZERO
        ) {
            prop_assert_eq!(leading_number(&format_number(n)), n);
        }
    }
}
