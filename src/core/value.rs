//! Resistance value parsing
//!
//! A value on the command line is an arithmetic expression with an optional
//! trailing one-letter SI prefix: "10k", "2.2M", "10+2.2k". `parse_unit`
//! handles the interactive-prompt case where a physical unit may be cuddled
//! against the number ("123Pa") or separated by a space ("123 Pa").

use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

use crate::core::eval;

/// SI prefixes likely to appear on resistance values.
pub static SI_PREFIXES: Lazy<HashMap<char, i32>> = Lazy::new(|| {
    HashMap::from([
        ('n', -9),
        ('u', -6),
        ('m', -3),
        ('k', 3),
        ('M', 6),
        ('G', 9),
        ('T', 12),
    ])
});

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("'{0}' is not recognized as a resistance value")]
    BadExpression(String),
    #[error("'{0}' must have only two fields")]
    BadUnitSplit(String),
    #[error("empty value")]
    Empty,
}

/// Power-of-ten factor for a prefix letter, if it is one we know.
pub fn prefix_factor(c: char) -> Option<f64> {
    SI_PREFIXES.get(&c).map(|&p| 10f64.powi(p))
}

/// Convert an expression with an optional SI suffix to ohms.
///
/// Whitespace is stripped first (the target may arrive as several CLI
/// words), then a trailing known prefix letter is popped and the remainder
/// is evaluated as an arithmetic expression.
pub fn parse_value(text: &str) -> Result<f64, ValueError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(ValueError::Empty);
    }
    let (body, factor) = match compact.chars().last().and_then(prefix_factor) {
        Some(factor) => (&compact[..compact.len() - 1], factor),
        None => (compact.as_str(), 1.0),
    };
    let value =
        eval::eval(body).map_err(|_| ValueError::BadExpression(text.trim().to_string()))?;
    Ok(value * factor)
}

/// Split a token into (number text, unit text).
///
/// With a space the token must be exactly two fields. Without one, scan from
/// the right collecting non-digit, non-decimal-point characters as the unit
/// until the number is hit; digits therefore cannot appear in the unit.
pub fn parse_unit(text: &str) -> Result<(String, String), ValueError> {
    let s = text.trim();
    if s.contains(' ') {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(ValueError::BadUnitSplit(s.to_string()));
        }
        return Ok((fields[0].to_string(), fields[1].to_string()));
    }
    let mut unit: Vec<char> = Vec::new();
    let mut num: Vec<char> = Vec::new();
    let mut in_number = false;
    for c in s.chars().rev() {
        if in_number {
            num.push(c);
        } else if c.is_ascii_digit() || c == '.' {
            num.push(c);
            in_number = true;
        } else {
            unit.push(c);
        }
    }
    num.reverse();
    unit.reverse();
    Ok((
        num.into_iter().collect(),
        unit.into_iter().collect::<String>().trim().to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values() {
        assert_eq!(parse_value("47").unwrap(), 47.0);
        assert_eq!(parse_value("22.3e3").unwrap(), 22300.0);
    }

    #[test]
    fn test_si_suffixes() {
        assert_eq!(parse_value("10k").unwrap(), 10_000.0);
        assert_eq!(parse_value("2.2M").unwrap(), 2_200_000.0);
        assert!((parse_value("470m").unwrap() - 0.47).abs() < 1e-15);
        assert_eq!(parse_value("1G").unwrap(), 1e9);
    }

    #[test]
    fn test_expression_with_suffix() {
        // The suffix scales the whole evaluated expression.
        assert_eq!(parse_value("10+2.2k").unwrap(), 12_200.0);
        assert_eq!(parse_value("10 + 2.2 k").unwrap(), 12_200.0);
    }

    #[test]
    fn test_unsupported_prefix_fails() {
        let err = parse_value("10x").unwrap_err();
        assert_eq!(err, ValueError::BadExpression("10x".to_string()));
    }

    #[test]
    fn test_empty_fails() {
        assert_eq!(parse_value("   "), Err(ValueError::Empty));
    }

    #[test]
    fn test_parse_unit_cuddled() {
        assert_eq!(
            parse_unit("123Pa").unwrap(),
            ("123".to_string(), "Pa".to_string())
        );
        assert_eq!(
            parse_unit("1.5mm").unwrap(),
            ("1.5".to_string(), "mm".to_string())
        );
    }

    #[test]
    fn test_parse_unit_spaced() {
        assert_eq!(
            parse_unit("1.23e4 Pa").unwrap(),
            ("1.23e4".to_string(), "Pa".to_string())
        );
        assert!(parse_unit("1 2 Pa").is_err());
    }

    #[test]
    fn test_parse_unit_bare_number() {
        assert_eq!(
            parse_unit("250").unwrap(),
            ("250".to_string(), String::new())
        );
    }
}
