//! Resistor catalogs
//!
//! A catalog is the flat pool of resistance values the searches draw from:
//! either an on-hand inventory (the builtin list below, or a file given
//! with -c) or a standard EIA decade series generated across decades
//! -1 through 7.

use anyhow::{ensure, Context, Result};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::render::{columnize, SCREEN_WIDTH};
use crate::core::sigfig::sig;
use crate::core::value::SI_PREFIXES;

/// On-hand resistor inventory. Edit to match the parts drawer, or point -c
/// at a file in the same whitespace-separated format.
pub const ON_HAND: &str = "\
0.025 0.2 0.27 0.33

1 2.2 4.6 8.3

10.1 12 14.7 15 17.8 22 27 28.4 30 31.6 33 35 38.4 46.3 50 55.5 61.8 67 75
78 81

100 110 115 121 150 162 170 178 196 215 220 237 268 270 287 316 330 349 388
465 500 513 546 563 617 680 750 808 822 980

1k 1.1k 1.18k 1.21k 1.33k 1.47k 1.5k 1.62k 1.78k 1.96k 2.16k 2.2k 2.37k
2.61k 2.72k 3k 3.16k 3.3k 3.47k 3.82k 4.64k 5k 5.53k 6.8k 6.84k 8k 8.3k 9.09k

10k 11.8k 12.1k 13.3k 15k 16.2k 17.8k 18k 19.5k 20k 22k 26.2k 33k 39k 42.4k
46k 51k 55k 67k 75k 82k

100k 120k 147k 162k 170k 180k 220k 263k 330k 390k 422k 460k 464k 560k 674k 820k

1M 1.2M 1.5M 1.7M 1.9M 2.2M 2.4M 2.6M 2.8M 3.2M 4M 4.8M 5.6M 6M 8.7M 10M
16M 23.5M";

/// Decades spanned when generating an EIA series catalog (0.1 ohm up
/// through the 10M decade, boundary included).
pub const DECADES: std::ops::RangeInclusive<i32> = -1..=7;

static E6: [f64; 6] = [1.0, 1.5, 2.2, 3.3, 4.7, 6.8];

static E12: [f64; 12] = [
    1.0, 1.2, 1.5, 1.8, 2.2, 2.7, 3.3, 3.9, 4.7, 5.6, 6.8, 8.2,
];

static E24: [f64; 24] = [
    1.0, 1.1, 1.2, 1.3, 1.5, 1.6, 1.8, 2.0, 2.2, 2.4, 2.7, 3.0, 3.3, 3.6, 3.9, 4.3, 4.7, 5.1,
    5.6, 6.2, 6.8, 7.5, 8.2, 9.1,
];

static E48: [f64; 48] = [
    1.00, 1.05, 1.10, 1.15, 1.21, 1.27, 1.33, 1.40, 1.47, 1.54, 1.62, 1.69, 1.78, 1.87, 1.96,
    2.05, 2.15, 2.26, 2.37, 2.49, 2.61, 2.74, 2.87, 3.01, 3.16, 3.32, 3.48, 3.65, 3.83, 4.02,
    4.22, 4.42, 4.64, 4.87, 5.11, 5.36, 5.62, 5.90, 6.19, 6.49, 6.81, 7.15, 7.50, 7.87, 8.25,
    8.66, 9.09, 9.53,
];

static E96: [f64; 96] = [
    1.00, 1.02, 1.05, 1.07, 1.10, 1.13, 1.15, 1.18, 1.21, 1.24, 1.27, 1.30, 1.33, 1.37, 1.40,
    1.43, 1.47, 1.50, 1.54, 1.58, 1.62, 1.65, 1.69, 1.74, 1.78, 1.82, 1.87, 1.91, 1.96, 2.00,
    2.05, 2.10, 2.16, 2.21, 2.26, 2.32, 2.37, 2.43, 2.49, 2.55, 2.61, 2.67, 2.74, 2.80, 2.87,
    2.94, 3.01, 3.09, 3.16, 3.24, 3.32, 3.40, 3.48, 3.57, 3.65, 3.74, 3.83, 3.92, 4.02, 4.12,
    4.22, 4.32, 4.42, 4.53, 4.64, 4.75, 4.87, 4.99, 5.11, 5.23, 5.36, 5.49, 5.62, 5.76, 5.90,
    6.04, 6.19, 6.34, 6.49, 6.65, 6.81, 6.98, 7.15, 7.32, 7.50, 7.68, 7.87, 8.06, 8.25, 8.45,
    8.66, 8.87, 9.09, 9.31, 9.53, 9.76,
];

/// EIA preferred mantissa values per series size.
pub static EIA: Lazy<BTreeMap<u32, &'static [f64]>> = Lazy::new(|| {
    BTreeMap::from([
        (6, &E6[..]),
        (12, &E12[..]),
        (24, &E24[..]),
        (48, &E48[..]),
        (96, &E96[..]),
    ])
});

/// An immutable pool of strictly positive resistance values in ohms.
/// Order is whatever the source supplied; the searches treat it as an
/// unordered multiset.
#[derive(Debug, Clone)]
pub struct Catalog {
    values: Vec<f64>,
}

impl Catalog {
    /// The builtin on-hand inventory.
    pub fn builtin() -> Result<Self> {
        Self::from_text(ON_HAND)
    }

    /// Parse a whitespace-separated on-hand list with optional SI suffixes.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut values = Vec::new();
        for token in text.split_whitespace() {
            values.push(parse_token(token)?);
        }
        ensure!(!values.is_empty(), "catalog contains no resistor values");
        Self::new(values)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {}", path.display()))?;
        Self::from_text(&text)
            .with_context(|| format!("bad catalog file {}", path.display()))
    }

    /// One value per (mantissa, decade) pair of an EIA series.
    pub fn eia(series: u32) -> Result<Self> {
        let mantissas = EIA.get(&series).copied().with_context(|| {
            format!("E{} is not an EIA series (use 6, 12, 24, 48 or 96)", series)
        })?;
        let mut values = Vec::with_capacity(mantissas.len() * 9);
        for power in DECADES {
            for &m in mantissas {
                values.push(m * 10f64.powi(power));
            }
        }
        Self::new(values)
    }

    fn new(values: Vec<f64>) -> Result<Self> {
        for &v in &values {
            ensure!(
                v > 0.0 && v.is_finite(),
                "resistor value {} is not strictly positive",
                v
            );
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Exact value membership (used for the exact-match short circuit).
    pub fn contains(&self, r: f64) -> bool {
        self.values.iter().any(|&v| v == r)
    }
}

/// One on-hand token: a float, optionally with a one-letter SI suffix.
/// A trailing non-digit that is not a known prefix fails, naming the token.
fn parse_token(token: &str) -> Result<f64> {
    let last = token.chars().last().context("empty catalog token")?;
    if last.is_ascii_digit() {
        return token
            .parse::<f64>()
            .with_context(|| format!("'{}' is not a resistance value", token));
    }
    let power = SI_PREFIXES
        .get(&last)
        .copied()
        .with_context(|| format!("'{}': '{}' is not a supported SI prefix", token, last))?;
    let mantissa: f64 = token[..token.len() - last.len_utf8()]
        .parse()
        .with_context(|| format!("'{}' is not a resistance value", token))?;
    Ok(mantissa * 10f64.powi(power))
}

/// The `list` command: print the active on-hand inventory and the EIA
/// series tables.
pub fn run_list(catalog_file: Option<&Path>) -> Result<()> {
    let on_hand = match catalog_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {}", path.display()))?,
        None => ON_HAND.to_string(),
    };
    println!("On-hand resistors:\n");
    println!("{}", on_hand.trim_end());
    println!("{}", "-".repeat(70));
    println!("EIA resistance series:");
    for (&series, mantissas) in EIA.iter() {
        println!("E{}:", series);
        let digits = if series < 48 { 2 } else { 3 };
        let cells: Vec<String> = mantissas.iter().map(|&m| sig(m, digits)).collect();
        for row in columnize(&cells, SCREEN_WIDTH) {
            println!("  {}", row);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() > 100);
        assert!(catalog.contains(0.025));
        assert!(catalog.contains(10_000.0)); // 10k
        assert!(catalog.contains(23_500_000.0)); // 23.5M
    }

    #[test]
    fn test_never_empty() {
        let catalog = Catalog::from_text("10").unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.len(), 1);
        // An all-whitespace source fails instead of building an empty pool.
        assert!(Catalog::from_text("  \n ").is_err());
    }

    #[test]
    fn test_from_text_suffixes() {
        let catalog = Catalog::from_text("10 2.2k 1M 500m").unwrap();
        assert_eq!(catalog.values(), &[10.0, 2200.0, 1_000_000.0, 0.5]);
    }

    #[test]
    fn test_bad_suffix_names_token() {
        let err = Catalog::from_text("10 22x").unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("22x"), "got: {}", msg);
        assert!(msg.contains("SI prefix"), "got: {}", msg);
    }

    #[test]
    fn test_exponent_notation_token() {
        let catalog = Catalog::from_text("22.3e3").unwrap();
        assert_eq!(catalog.values(), &[22_300.0]);
    }

    #[test]
    fn test_nonpositive_rejected() {
        assert!(Catalog::from_text("10 -5 20").is_err());
        assert!(Catalog::from_text("0").is_err());
    }

    #[test]
    fn test_eia_span() {
        let catalog = Catalog::eia(12).unwrap();
        // 12 mantissas across decades -1..=7.
        assert_eq!(catalog.len(), 12 * 9);
        let min = catalog.values().iter().cloned().fold(f64::MAX, f64::min);
        let max = catalog.values().iter().cloned().fold(f64::MIN, f64::max);
        assert!((min - 0.1).abs() < 1e-12);
        assert!((max - 8.2e7).abs() < 1.0);
    }

    #[test]
    fn test_eia_unknown_series() {
        assert!(Catalog::eia(10).is_err());
    }

    #[test]
    fn test_eia_contains_exact_decade_values() {
        let catalog = Catalog::eia(12).unwrap();
        assert!(catalog.contains(1000.0));
    }
}
