//! Quotient search: resistor pairs with a given ratio.

use anyhow::{ensure, Result};
use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::core::render::{center, pct_cell, print_row, ReportStyle};
use crate::core::sigfig::{eng_si, sig};
use crate::search::{within, SearchOpts};

/// One accepted pair: achieved ratio is numerator / denominator.
#[derive(Debug, Clone, Copy)]
pub struct QuotientMatch {
    pub ratio: f64,
    pub numerator: f64,
    pub denominator: f64,
}

/// Distinct unordered pairs only: a value against itself always gives 1,
/// which a valid target ratio can never be.
pub fn find(catalog: &Catalog, ratio: f64, tol: f64) -> Vec<QuotientMatch> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();
    let mut push = |rat: f64, num: f64, den: f64| {
        if seen.insert((rat.to_bits(), num.to_bits(), den.to_bits())) {
            found.push(QuotientMatch {
                ratio: rat,
                numerator: num,
                denominator: den,
            });
        }
    };
    let values = catalog.values();
    for (i, &r1) in values.iter().enumerate() {
        for &r2 in &values[i + 1..] {
            let q = r1 / r2;
            if within(q, ratio, tol) {
                push(q, r1, r2);
            } else if within(1.0 / q, ratio, tol) {
                push(1.0 / q, r2, r1);
            }
        }
    }
    found.sort_by(|a, b| {
        a.ratio
            .total_cmp(&b.ratio)
            .then(a.numerator.total_cmp(&b.numerator))
            .then(a.denominator.total_cmp(&b.denominator))
    });
    found
}

/// The `quotient` command.
pub fn run(
    ratio_text: &str,
    catalog: &Catalog,
    opts: SearchOpts,
    style: ReportStyle,
) -> Result<()> {
    let ratio: f64 = ratio_text
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' is not a valid ratio", ratio_text))?;
    ensure!(ratio > 0.0, "quotient ratio must be > 0");
    // Every pair satisfies a quotient of 1 one way or the other.
    ensure!(ratio != 1.0, "quotient cannot be 1");

    let mut matches = find(catalog, ratio, opts.tolerance);
    if matches.is_empty() {
        println!("No resistor combinations that meet tolerance");
        return Ok(());
    }
    let clipped = matches.len() > opts.limit;
    if clipped {
        matches.sort_by(|a, b| {
            (a.ratio - ratio)
                .abs()
                .total_cmp(&(b.ratio - ratio).abs())
                .then(a.ratio.total_cmp(&b.ratio))
        });
        matches.truncate(opts.limit);
        matches.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));
    }
    println!(
        "Desired ratio = {}, tolerance = {}%",
        ratio_text.trim(),
        sig(opts.tolerance * 100.0, 2)
    );
    if clipped {
        println!("Closest {} matches shown", opts.limit);
    }
    println!();
    println!("% dev from");
    println!("desired ratio       R1           R2");
    println!("-------------   ----------   ----------");
    for m in &matches {
        let dev = 100.0 * (m.ratio - ratio) / ratio;
        let line = format!(
            "   {:<10}   {}   {}",
            pct_cell(dev, 2),
            center(&eng_si(m.numerator, style.digits), 10),
            center(&eng_si(m.denominator, style.digits), 10)
        );
        print_row(&line, dev == 0.0);
    }
    Ok(())
}
