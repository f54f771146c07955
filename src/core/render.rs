//! Report table helpers
//!
//! Every search prints a fixed-column text table: a signed percent-deviation
//! column, resistor values in engineering notation, and a connection or
//! ratio column. Zero-deviation rows are highlighted.

use colored::Colorize;

use crate::core::sigfig::sig;

/// Screen width the `list` command wraps its columns to.
pub const SCREEN_WIDTH: usize = 80;

/// Formatting knobs carried into every report.
#[derive(Debug, Clone, Copy)]
pub struct ReportStyle {
    /// Significant digits for resistor values (1-15).
    pub digits: usize,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self { digits: 4 }
    }
}

/// Signed percent-deviation cell. Non-negative deviations get a leading
/// space so the sign column lines up.
pub fn pct_cell(dev: f64, digits: usize) -> String {
    let mut s = sig(dev, digits);
    if dev >= 0.0 {
        s.insert(0, ' ');
    }
    s
}

/// Center `s` in a field of `width` columns (left-biased on odd padding).
pub fn center(s: &str, width: usize) -> String {
    if s.len() >= width {
        return s.to_string();
    }
    let pad = width - s.len();
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(pad - left))
}

/// Print a table row, highlighting exact (zero-deviation) matches.
pub fn print_row(line: &str, exact: bool) {
    if exact {
        println!("{}", line.yellow());
    } else {
        println!("{}", line);
    }
}

/// Wrap short strings into aligned columns within `width` screen columns.
pub fn columnize(items: &[String], width: usize) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }
    let cell = items.iter().map(|s| s.len()).max().unwrap_or(0) + 2;
    let per_row = (width / cell).max(1);
    items
        .chunks(per_row)
        .map(|chunk| {
            chunk
                .iter()
                .map(|s| format!("{:<width$}", s, width = cell))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_cell_sign_alignment() {
        assert_eq!(pct_cell(0.0, 2), " 0");
        assert_eq!(pct_cell(66.6667, 2), " 67");
        assert_eq!(pct_cell(-66.6667, 2), "-67");
    }

    #[test]
    fn test_pct_cell_honors_digits() {
        assert_eq!(pct_cell(-4.7619047, 4), "-4.762");
        assert_eq!(pct_cell(-4.7619047, 2), "-4.8");
    }

    #[test]
    fn test_center() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("abc", 6), " abc  ");
        assert_eq!(center("toolong", 3), "toolong");
    }

    #[test]
    fn test_columnize_wraps() {
        let items: Vec<String> = (0..6).map(|i| format!("v{}", i)).collect();
        let rows = columnize(&items, 12);
        // Cell width is 4, so three cells per row.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "v0  v1  v2");
    }

    #[test]
    fn test_columnize_empty() {
        assert!(columnize(&[], 80).is_empty());
    }
}
