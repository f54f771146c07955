//! Voltage divider searches, chain analysis, and closed-form design.

use anyhow::{bail, ensure, Context, Result};
use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::core::render::{center, pct_cell, print_row, ReportStyle};
use crate::core::sigfig::{eng_si, sig};
use crate::core::value::parse_value;
use crate::search::{within, SearchOpts, TotalConstraint};

/// One accepted divider pair. `top` is the resistor the achieved ratio
/// refers to (the tap drop is top / (top + bottom)).
#[derive(Debug, Clone, Copy)]
pub struct DividerMatch {
    pub ratio: f64,
    pub top: f64,
    pub bottom: f64,
}

fn consider(
    found: &mut Vec<DividerMatch>,
    seen: &mut HashSet<(u64, u64, u64)>,
    ratio: f64,
    tol: f64,
    total: Option<TotalConstraint>,
    r1: f64,
    r2: f64,
) {
    let sum = r1 + r2;
    if let Some(tc) = total {
        if !within(sum, tc.resistance, tc.tolerance) {
            return;
        }
    }
    let mut push = |rat: f64, top: f64, bottom: f64| {
        if seen.insert((rat.to_bits(), top.to_bits(), bottom.to_bits())) {
            found.push(DividerMatch { ratio: rat, top, bottom });
        }
    };
    let rat1 = r1 / sum;
    let rat2 = r2 / sum;
    if within(rat1, ratio, tol) {
        push(rat1, r1, r2);
    } else if within(rat2, ratio, tol) {
        push(rat2, r2, r1);
    }
}

/// All pairs (self-pairs included) whose divider ratio is within tolerance,
/// sorted by achieved ratio ascending.
pub fn find(catalog: &Catalog, ratio: f64, opts: SearchOpts) -> Vec<DividerMatch> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();
    let values = catalog.values();
    for (i, &r1) in values.iter().enumerate() {
        for &r2 in &values[i..] {
            consider(
                &mut found,
                &mut seen,
                ratio,
                opts.tolerance,
                opts.total,
                r1,
                r2,
            );
        }
    }
    found.sort_by(|a, b| {
        a.ratio
            .total_cmp(&b.ratio)
            .then(a.top.total_cmp(&b.top))
            .then(a.bottom.total_cmp(&b.bottom))
    });
    found
}

/// The `divider` command.
pub fn run(
    ratio_text: &str,
    ratio: f64,
    catalog: &Catalog,
    opts: SearchOpts,
    style: ReportStyle,
) -> Result<()> {
    ensure!(ratio > 0.0, "divider ratio must be > 0");
    let mut matches = find(catalog, ratio, opts);
    if matches.is_empty() {
        println!("No divider can be made");
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
        matches.sort_by(|a, b| {
            a.ratio
                .total_cmp(&b.ratio)
                .then(a.top.total_cmp(&b.top))
                .then(a.bottom.total_cmp(&b.bottom))
        });
    }
    println!(
        "Voltage divider with ratio = {}, tolerance = {}%",
        ratio_text.trim(),
        sig(opts.tolerance * 100.0, 2)
    );
    if clipped {
        println!("Closest {} matches shown", opts.limit);
    }
    println!();
    println!("% dev from");
    println!("desired ratio       R1           R2      Total Res.");
    println!("-------------   ----------   ----------  ----------");
    for m in &matches {
        let dev = 100.0 * (m.ratio - ratio) / ratio;
        let line = format!(
            "   {:<10}   {}   {}   {}",
            pct_cell(dev, style.digits),
            center(&eng_si(m.top, style.digits), 10),
            center(&eng_si(m.bottom, style.digits), 10),
            center(&eng_si(m.top + m.bottom, style.digits), 10)
        );
        print_row(&line, dev == 0.0);
    }
    Ok(())
}

/// The `divider-total` command: total resistance and tap ratios of a
/// literal resistor chain, top of the string first.
pub fn run_chain(tokens: &[String], style: ReportStyle) -> Result<()> {
    ensure!(tokens.len() >= 2, "need at least two resistances");
    let mut values = Vec::with_capacity(tokens.len());
    for token in tokens {
        let v = parse_value(token)?;
        ensure!(v > 0.0, "resistance '{}' must be > 0", token);
        values.push(v);
    }
    let total: f64 = values.iter().sum();
    println!("String of voltage dividers:");
    println!("  Resistors given:");
    for token in tokens {
        println!("     {}", token);
    }
    println!("  Total resistance = {}", eng_si(total, style.digits));
    println!("  Divider ratios:");
    for i in 1..values.len() {
        let tap: f64 = values[i..].iter().sum::<f64>() / total;
        println!("  {:2}   {}", i, sig(tap, 4));
    }
    Ok(())
}

/// Closed-form multi-tap divider: ratios in (0,1) sorted descending and
/// augmented with 1 and 0 give R_i = R * (rho[i-1] - rho[i]), one resistor
/// per gap, n+1 in all.
pub fn design(total: f64, ratios: &[f64]) -> Result<Vec<f64>> {
    ensure!(total > 0.0, "total resistance must be > 0");
    ensure!(!ratios.is_empty(), "need at least one ratio");
    for &rho in ratios {
        ensure!(rho > 0.0, "ratios must all be > 0");
        ensure!(rho < 1.0, "ratios must all be < 1");
    }
    let mut rho: Vec<f64> = ratios.to_vec();
    rho.sort_by(|a, b| b.total_cmp(a));
    rho.insert(0, 1.0);
    rho.push(0.0);
    Ok((1..rho.len()).map(|i| total * (rho[i - 1] - rho[i])).collect())
}

/// The `design-divider` command.
pub fn run_design(total_text: &str, ratio_texts: &[String], style: ReportStyle) -> Result<()> {
    let total = parse_value(total_text)?;
    let mut ratios = Vec::with_capacity(ratio_texts.len());
    for text in ratio_texts {
        match text.parse::<f64>() {
            Ok(r) => ratios.push(r),
            Err(_) => bail!("couldn't get ratio from '{}'", text),
        }
    }
    let resistors = design(total, &ratios)?;
    ratios.sort_by(|a, b| b.total_cmp(a));

    println!("Resistors                   Ratio");
    println!("--------------------        ----------");
    for (i, r) in resistors.iter().enumerate() {
        let label = format!("R{} = {}", i + 1, eng_si(*r, style.digits));
        if i + 1 < resistors.len() {
            println!("  {:<26} {}", label, sig(ratios[i], 4));
        } else {
            println!("  {}", label);
        }
    }
    println!("Total resistance = {}", eng_si(total, style.digits));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ConnectionFilter;

    fn opts(tol: f64, total: Option<TotalConstraint>) -> SearchOpts {
        SearchOpts {
            tolerance: tol,
            limit: 30,
            filter: ConnectionFilter::All,
            total,
        }
    }

    #[test]
    fn test_self_pairs_give_half_ratio() {
        let catalog = Catalog::from_text("10 20 30").unwrap();
        let matches = find(&catalog, 0.5, opts(0.0, None));
        // Each catalog value paired with itself hits 0.5 exactly.
        assert_eq!(matches.len(), 3);
        for m in &matches {
            assert_eq!(m.ratio, 0.5);
            assert_eq!(m.top, m.bottom);
        }
    }

    #[test]
    fn test_pair_ratios_sum_to_one() {
        let catalog = Catalog::from_text("10 20 30 47").unwrap();
        for m in find(&catalog, 0.4, opts(0.5, None)) {
            let complement = m.bottom / (m.top + m.bottom);
            assert!((m.ratio + complement - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sorted_by_ratio() {
        let catalog = Catalog::from_text("10 22 47 100").unwrap();
        let matches = find(&catalog, 0.4, opts(0.5, None));
        assert!(matches.windows(2).all(|w| w[0].ratio <= w[1].ratio));
    }

    #[test]
    fn test_total_constraint_rejects_sums() {
        let catalog = Catalog::from_text("10 20 30").unwrap();
        let constraint = TotalConstraint {
            resistance: 20.0,
            tolerance: 0.01,
        };
        let matches = find(&catalog, 0.5, opts(0.0, Some(constraint)));
        // Only the (10,10) self-pair totals 20.
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].top, 10.0);
        assert_eq!(matches[0].bottom, 10.0);
    }

    #[test]
    fn test_design_even_split() {
        // total=100, ratios=[0.5] -> two 50 ohm resistors.
        let resistors = design(100.0, &[0.5]).unwrap();
        assert_eq!(resistors, vec![50.0, 50.0]);
    }

    #[test]
    fn test_design_sums_to_total() {
        let resistors = design(1000.0, &[0.2, 0.75, 0.5]).unwrap();
        assert_eq!(resistors.len(), 4);
        let sum: f64 = resistors.iter().sum();
        assert!((sum - 1000.0).abs() < 1e-9);
        assert!(resistors.iter().all(|&r| r > 0.0));
    }

    #[test]
    fn test_design_rejects_bad_ratios() {
        assert!(design(100.0, &[]).is_err());
        assert!(design(100.0, &[0.0]).is_err());
        assert!(design(100.0, &[1.0]).is_err());
        assert!(design(100.0, &[1.5]).is_err());
        assert!(design(0.0, &[0.5]).is_err());
    }

    #[test]
    fn test_chain_requires_two() {
        assert!(run_chain(&["10k".to_string()], ReportStyle::default()).is_err());
    }
}
