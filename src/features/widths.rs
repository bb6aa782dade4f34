//! CALS column width arithmetic
//!
//! A small algebra over the CALS width micro-syntax:
//! `<proportion>*[+<fixed>px]`, `<fixed>px`, or a bare `*` meaning `1*`.
//! Used when merging or splitting spanning cells and when converting widths
//! to percentages for a host layout engine.
//!
//! Field extraction uses two independent patterns: the proportional part is
//! the number sitting immediately before a `*` (at the start of the string or
//! after a `+`), the fixed part is the number sitting immediately before
//! `px`. A string like `20px*` therefore carries a fixed part of 20 and no
//! proportional part at all.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PROPORTION_PATTERN: Regex =
        Regex::new(r"(?:^|\+)\s*([0-9]+(?:\.[0-9]+)?)?\*").unwrap();
    static ref FIXED_PATTERN: Regex = Regex::new(r"([0-9]+(?:\.[0-9]+)?)px").unwrap();
}

/// Decomposed CALS width
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParsedWidth {
    /// The `N` of `N*`; a bare `*` is exactly `1*`
    pub proportion: Option<f64>,
    /// The `M` of `Mpx`
    pub fixed: Option<f64>,
}

impl ParsedWidth {
    pub fn is_empty(&self) -> bool {
        self.proportion.is_none() && self.fixed.is_none()
    }

    /// A width that carries only a proportional part
    pub fn is_pure_proportion(&self) -> bool {
        self.proportion.is_some() && self.fixed.is_none()
    }
}

/// Decompose a width string into its proportional and fixed parts
pub fn parse_width(width: &str) -> ParsedWidth {
    let width = width.trim();
    let proportion = PROPORTION_PATTERN.captures(width).map(|caps| {
        caps.get(1)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(1.0)
    });
    let fixed = FIXED_PATTERN
        .captures(width)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok());
    ParsedWidth { proportion, fixed }
}

/// Render a decomposed width back to string form
///
/// Parts that sum to zero are omitted; a width with neither part renders as
/// the empty string.
fn render_width(proportion: f64, fixed: f64) -> String {
    let mut out = String::new();
    if proportion != 0.0 {
        out.push_str(&format_number(proportion));
        out.push('*');
    }
    if fixed != 0.0 {
        if !out.is_empty() {
            out.push('+');
        }
        out.push_str(&format_number(fixed));
        out.push_str("px");
    }
    out
}

/// Sum two widths, proportional and fixed parts independently
pub fn add_widths(a: &str, b: &str) -> String {
    let pa = parse_width(a);
    let pb = parse_width(b);
    let proportion = pa.proportion.unwrap_or(0.0) + pb.proportion.unwrap_or(0.0);
    let fixed = pa.fixed.unwrap_or(0.0) + pb.fixed.unwrap_or(0.0);
    render_width(proportion, fixed)
}

/// Divide each present part of a width by two
///
/// Used when a spanning cell is split back into its columns.
pub fn halve_width(width: &str) -> String {
    let parsed = parse_width(width);
    render_width(
        parsed.proportion.unwrap_or(0.0) / 2.0,
        parsed.fixed.unwrap_or(0.0) / 2.0,
    )
}

/// Percentage of one column's proportional part over all columns' parts
///
/// Columns with fixed-only widths contribute nothing to the basis;
/// proportional and fixed widths are never mixed into one ratio.
pub fn width_to_percentage(width: &str, all_widths: &[String]) -> String {
    let proportion = parse_width(width).proportion.unwrap_or(0.0);
    let total: f64 = all_widths
        .iter()
        .map(|w| parse_width(w).proportion.unwrap_or(0.0))
        .sum();
    if total == 0.0 {
        return "0%".to_string();
    }
    format!("{}%", format_number(proportion / total * 100.0))
}

/// Normalize purely proportional widths to fractions summing to 1
///
/// Any width that is not pure-proportional makes the whole sequence fall
/// back to a uniform equal split.
pub fn to_proportion_fractions(widths: &[String]) -> Vec<f64> {
    if widths.is_empty() {
        return Vec::new();
    }
    let uniform = vec![1.0 / widths.len() as f64; widths.len()];

    let mut proportions = Vec::with_capacity(widths.len());
    for width in widths {
        let parsed = parse_width(width);
        if !parsed.is_pure_proportion() {
            return uniform;
        }
        proportions.push(parsed.proportion.unwrap_or(1.0));
    }
    let total: f64 = proportions.iter().sum();
    if total == 0.0 {
        return uniform;
    }
    proportions.iter().map(|p| p / total).collect()
}

/// Render fractions as smallest-integer-ratio `N*` widths
///
/// Fractions are scaled to whole percentages and reduced by their greatest
/// common divisor, so `[0.2, 0.2, 0.6]` becomes `["1*", "1*", "3*"]`.
pub fn from_proportion_fractions(fractions: &[f64]) -> Vec<String> {
    let percents: Vec<i64> = fractions
        .iter()
        .map(|f| (f * 100.0).round() as i64)
        .collect();
    let divisor = percents.iter().fold(0, |acc, &p| gcd(acc, p.abs()));
    percents
        .iter()
        .map(|&p| {
            if divisor == 0 {
                "1*".to_string()
            } else {
                format!("{}*", p / divisor)
            }
        })
        .collect()
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Shortest decimal form of a number: no trailing zeros, no `.0`
fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_proportional() {
        assert_eq!(parse_width("1*").proportion, Some(1.0));
        assert_eq!(parse_width("1.3*").proportion, Some(1.3));
        assert_eq!(parse_width("*").proportion, Some(1.0));
        assert_eq!(parse_width("1*").fixed, None);
    }

    #[test]
    fn test_parse_fixed() {
        let parsed = parse_width("25px");
        assert_eq!(parsed.proportion, None);
        assert_eq!(parsed.fixed, Some(25.0));
    }

    #[test]
    fn test_parse_combined() {
        let parsed = parse_width("2*+10px");
        assert_eq!(parsed.proportion, Some(2.0));
        assert_eq!(parsed.fixed, Some(10.0));

        let bare_star_offset = parse_width("*+10px");
        assert_eq!(bare_star_offset.proportion, Some(1.0));
        assert_eq!(bare_star_offset.fixed, Some(10.0));
    }

    #[test]
    fn test_parse_px_before_star_has_no_proportion() {
        // The digits sit next to "px", not next to "*", so only the fixed
        // field matches.
        let parsed = parse_width("20px*");
        assert_eq!(parsed.proportion, None);
        assert_eq!(parsed.fixed, Some(20.0));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_width("wide").is_empty());
        assert!(parse_width("").is_empty());
    }

    #[test]
    fn test_add_proportional() {
        assert_eq!(add_widths("1*", "1.3*"), "2.3*");
        assert_eq!(add_widths("*", "1.3*"), "2.3*");
        assert_eq!(add_widths("2*", "3*"), "5*");
    }

    #[test]
    fn test_add_fixed() {
        assert_eq!(add_widths("10px", "30px"), "40px");
        assert_eq!(add_widths("10px", "20px*"), "30px");
    }

    #[test]
    fn test_add_mixed_keeps_parts_independent() {
        assert_eq!(add_widths("2*+10px", "5px"), "2*+15px");
        assert_eq!(add_widths("1*", "10px"), "1*+10px");
    }

    #[test]
    fn test_add_empty_operands() {
        assert_eq!(add_widths("", ""), "");
        assert_eq!(add_widths("1*", ""), "1*");
    }

    #[test]
    fn test_halve() {
        assert_eq!(halve_width("2*"), "1*");
        assert_eq!(halve_width("1*"), "0.5*");
        assert_eq!(halve_width("30px"), "15px");
        assert_eq!(halve_width("2*+10px"), "1*+5px");
    }

    #[test]
    fn test_to_percentage() {
        let all = vec!["1*".to_string(), "1*".to_string(), "2*".to_string()];
        assert_eq!(width_to_percentage("1*", &all), "25%");
        assert_eq!(width_to_percentage("2*", &all), "50%");
    }

    #[test]
    fn test_to_percentage_fixed_contributes_nothing() {
        let all = vec!["1*".to_string(), "10px".to_string(), "1*".to_string()];
        assert_eq!(width_to_percentage("10px", &all), "0%");
        assert_eq!(width_to_percentage("1*", &all), "50%");
    }

    #[test]
    fn test_to_proportion_fractions() {
        let widths = vec!["1*".to_string(), "1*".to_string(), "2*".to_string()];
        assert_eq!(to_proportion_fractions(&widths), vec![0.25, 0.25, 0.5]);
    }

    #[test]
    fn test_to_proportion_fractions_fallback_uniform() {
        let widths = vec!["1*".to_string(), "10px".to_string()];
        assert_eq!(to_proportion_fractions(&widths), vec![0.5, 0.5]);
    }

    #[test]
    fn test_from_proportion_fractions_gcd_reduced() {
        assert_eq!(
            from_proportion_fractions(&[0.2, 0.2, 0.6]),
            vec!["1*", "1*", "3*"]
        );
        assert_eq!(
            from_proportion_fractions(&[0.25, 0.25, 0.5]),
            vec!["1*", "1*", "2*"]
        );
    }

    #[test]
    fn test_round_trip_fractions() {
        let widths = vec!["1*".to_string(), "1*".to_string(), "3*".to_string()];
        let fractions = to_proportion_fractions(&widths);
        assert_eq!(from_proportion_fractions(&fractions), widths);
    }
}
