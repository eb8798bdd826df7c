//! Typed interpretation of raw directive values.
//!
//! Scalar helpers (`parse_bool`, `parse_float_or`, `parse_tick_policy`) never
//! fail: they fall back to a default. Compound values used for physical
//! sizing return a [`ValueError`] so the caller can move on to the next
//! sizing mode.

use stackplot_core::{geometry::Insets, scene::TickPolicy};

use crate::error::ValueError;

/// Separators tried in order when splitting a `width,height` pair.
const PAIR_SEPARATORS: [char; 4] = [',', ';', 'x', ' '];

/// Separators tried in order when splitting a four-value margin list.
const LIST_SEPARATORS: [char; 3] = [',', ';', ' '];

/// Returns true iff the value is one of `on`, `yes`, `true` (any case).
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "yes" | "true"
    )
}

/// Returns false only for `off` (any case); everything else enables.
pub fn parse_switch(value: &str) -> bool {
    !value.trim().eq_ignore_ascii_case("off")
}

/// Parses a float, returning `default` on any failure.
pub fn parse_float_or(value: &str, default: f64) -> f64 {
    value.trim().parse().unwrap_or(default)
}

/// Parses a number that may use a decimal comma (`7,2` reads as `7.2`).
pub fn parse_decimal(value: &str) -> Result<f64, ValueError> {
    let text = value.trim();
    if text.is_empty() {
        return Err(ValueError::Empty);
    }
    text.replace(',', ".")
        .parse()
        .map_err(|_| ValueError::Number(text.to_string()))
}

/// Parses a tick mode.
///
/// `off`/`none` disable ticks, an empty value, `on` or `auto` defer to the
/// surface, and a positive number sets a fixed interval. Anything else is
/// treated as `auto`.
pub fn parse_tick_policy(value: &str) -> TickPolicy {
    let text = value.trim().to_ascii_lowercase();
    match text.as_str() {
        "off" | "none" => TickPolicy::Off,
        "" | "on" | "auto" => TickPolicy::Auto,
        _ => match text.parse::<f64>() {
            Ok(interval) if interval.is_finite() && interval > 0.0 => TickPolicy::Fixed(interval),
            _ => TickPolicy::Auto,
        },
    }
}

/// Parses axis limits written as two comma-separated floats.
pub fn parse_limits(value: &str) -> Result<(f64, f64), ValueError> {
    let mut parts = value.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => {
            let parse = |s: &str| {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| ValueError::Number(s.trim().to_string()))
            };
            Ok((parse(a)?, parse(b)?))
        }
        _ => Err(ValueError::Malformed {
            value: value.to_string(),
            expected: "two comma-separated numbers",
        }),
    }
}

/// Removes a `cm` unit and normalizes the `×` sign to `x`.
fn strip_cm(value: &str) -> String {
    value
        .to_ascii_lowercase()
        .replace("cm", " ")
        .replace('×', "x")
        .trim()
        .to_string()
}

fn split_once_on(text: &str, separator: char) -> Option<(&str, &str)> {
    if separator == ' ' {
        text.split_once(char::is_whitespace)
    } else {
        text.split_once(separator)
    }
}

/// Parses a `width,height` pair in centimeters.
///
/// Accepts `,` `;` `x` `×` or whitespace as separator and decimal commas in
/// the numbers. Separators are tried in that order and the first split that
/// yields two numbers wins, so `7,2;7,2` reads as `7.2 × 7.2`.
pub fn parse_pair_cm(value: &str) -> Result<(f64, f64), ValueError> {
    let text = strip_cm(value);
    if text.is_empty() {
        return Err(ValueError::Empty);
    }

    PAIR_SEPARATORS
        .iter()
        .filter_map(|&separator| split_once_on(&text, separator))
        .find_map(|(a, b)| Some((parse_decimal(a).ok()?, parse_decimal(b).ok()?)))
        .ok_or_else(|| ValueError::Malformed {
            value: value.to_string(),
            expected: "a width and a height",
        })
}

/// Parses margins written as `left,right,top,bottom` in centimeters.
pub fn parse_margins_cm(value: &str) -> Result<Insets, ValueError> {
    let text = strip_cm(value);
    if text.is_empty() {
        return Err(ValueError::Empty);
    }

    let parse_list = |separator: char| -> Option<Vec<f64>> {
        let parts: Vec<&str> = if separator == ' ' {
            text.split_whitespace().collect()
        } else {
            text.split(separator)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect()
        };
        if parts.len() != 4 {
            return None;
        }
        parts.into_iter().map(|p| parse_decimal(p).ok()).collect()
    };

    LIST_SEPARATORS
        .iter()
        .filter(|&&separator| separator == ' ' || text.contains(separator))
        .find_map(|&separator| parse_list(separator))
        .map(|v| Insets::new(v[2], v[1], v[3], v[0]))
        .ok_or_else(|| ValueError::Malformed {
            value: value.to_string(),
            expected: "four margins (left, right, top, bottom)",
        })
}

/// Parses a legacy `width,height` figure size in inches.
///
/// `auto` and empty values are reported as [`ValueError::Empty`].
pub fn parse_figsize_inches(value: &str) -> Result<(f64, f64), ValueError> {
    let text = value.trim().to_ascii_lowercase();
    if text.is_empty() || text == "auto" {
        return Err(ValueError::Empty);
    }
    let parts: Vec<&str> = text
        .split([',', ';', ' '])
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [w, h, ..] => {
            let parse = |s: &str| s.parse::<f64>().map_err(|_| ValueError::Number(s.to_string()));
            Ok((parse(w)?, parse(h)?))
        }
        _ => Err(ValueError::Malformed {
            value: value.to_string(),
            expected: "a width and a height",
        }),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("on"));
        assert!(parse_bool(" YES "));
        assert!(parse_bool("True"));
        assert!(!parse_bool("1"));
        assert!(!parse_bool("off"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_parse_switch() {
        assert!(parse_switch("on"));
        assert!(parse_switch("whatever"));
        assert!(!parse_switch("OFF"));
    }

    #[test]
    fn test_parse_float_or() {
        assert_eq!(parse_float_or(" 2.5 ", 1.0), 2.5);
        assert_eq!(parse_float_or("abc", 1.0), 1.0);
        assert_eq!(parse_float_or("", -1.0), -1.0);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("7,2"), Ok(7.2));
        assert_eq!(parse_decimal("0.6"), Ok(0.6));
        assert_eq!(parse_decimal("  "), Err(ValueError::Empty));
        assert!(parse_decimal("1,2,3").is_err());
    }

    #[test]
    fn test_parse_tick_policy() {
        assert_eq!(parse_tick_policy("off"), TickPolicy::Off);
        assert_eq!(parse_tick_policy("None"), TickPolicy::Off);
        assert_eq!(parse_tick_policy(""), TickPolicy::Auto);
        assert_eq!(parse_tick_policy("on"), TickPolicy::Auto);
        assert_eq!(parse_tick_policy("auto"), TickPolicy::Auto);
        assert_eq!(parse_tick_policy("2.5"), TickPolicy::Fixed(2.5));
        assert_eq!(parse_tick_policy("bogus"), TickPolicy::Auto);
        assert_eq!(parse_tick_policy("0"), TickPolicy::Auto);
        assert_eq!(parse_tick_policy("-5"), TickPolicy::Auto);
    }

    #[test]
    fn test_parse_limits() {
        assert_eq!(parse_limits("10,80"), Ok((10.0, 80.0)));
        assert_eq!(parse_limits(" 0 , 10 "), Ok((0.0, 10.0)));
        assert!(parse_limits("10").is_err());
        assert!(parse_limits("1,2,3").is_err());
        assert!(parse_limits("a,b").is_err());
    }

    #[test]
    fn test_parse_pair_cm_separators() {
        assert_eq!(parse_pair_cm("7.2,7.2"), Ok((7.2, 7.2)));
        assert_eq!(parse_pair_cm("9;7"), Ok((9.0, 7.0)));
        assert_eq!(parse_pair_cm("9 x 7"), Ok((9.0, 7.0)));
        assert_eq!(parse_pair_cm("9×7 cm"), Ok((9.0, 7.0)));
        assert_eq!(parse_pair_cm("9   7"), Ok((9.0, 7.0)));
        assert_eq!(parse_pair_cm("7.2, 7.2"), Ok((7.2, 7.2)));
    }

    #[test]
    fn test_parse_pair_cm_decimal_comma() {
        let (w, h) = parse_pair_cm("7,2;8,5").unwrap();
        assert_approx_eq!(f64, w, 7.2);
        assert_approx_eq!(f64, h, 8.5);
    }

    #[test]
    fn test_parse_pair_cm_errors() {
        assert_eq!(parse_pair_cm(""), Err(ValueError::Empty));
        assert!(parse_pair_cm("7.2").is_err());
        assert!(parse_pair_cm("wide,tall").is_err());
    }

    #[test]
    fn test_parse_margins_cm() {
        let margins = parse_margins_cm("0.6,0.1,0.1,1.2").unwrap();
        assert_eq!(margins.left(), 0.6);
        assert_eq!(margins.right(), 0.1);
        assert_eq!(margins.top(), 0.1);
        assert_eq!(margins.bottom(), 1.2);

        let margins = parse_margins_cm("0,6;0,1;0,1;1,2").unwrap();
        assert_approx_eq!(f64, margins.left(), 0.6);
        assert_approx_eq!(f64, margins.bottom(), 1.2);

        let margins = parse_margins_cm("1 2 3 4 cm").unwrap();
        assert_eq!(margins.left(), 1.0);
        assert_eq!(margins.bottom(), 4.0);
    }

    #[test]
    fn test_parse_margins_cm_errors() {
        assert_eq!(parse_margins_cm(" "), Err(ValueError::Empty));
        assert!(parse_margins_cm("1,2,3").is_err());
        assert!(parse_margins_cm("1,2,3,x").is_err());
    }

    #[test]
    fn test_parse_figsize_inches() {
        assert_eq!(parse_figsize_inches("6,4"), Ok((6.0, 4.0)));
        assert_eq!(parse_figsize_inches("6; 4"), Ok((6.0, 4.0)));
        assert_eq!(parse_figsize_inches("auto"), Err(ValueError::Empty));
        assert!(parse_figsize_inches("6").is_err());
    }
}
