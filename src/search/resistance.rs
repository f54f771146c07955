//! Resistance pair search: series/parallel/exact matches for a target.

use anyhow::{ensure, Result};

use crate::catalog::Catalog;
use crate::core::render::{center, pct_cell, print_row, ReportStyle};
use crate::core::sigfig::{eng_si, sig};
use crate::search::{
    rank_truncate, sort_combinations, within, Combination, CombinationSet, Connection, SearchOpts,
};

/// Test the series and parallel values of one unordered pair.
fn consider(set: &mut CombinationSet, target: f64, tol: f64, r1: f64, r2: f64) -> Result<()> {
    let series = r1 + r2;
    if within(series, target, tol) {
        set.insert(Combination {
            value: series,
            conn: Connection::Series,
            r1,
            r2,
        });
    }
    let parallel = 1.0 / (1.0 / r1 + 1.0 / r2);
    ensure!(
        parallel.is_finite(),
        "parallel combination of {} and {} is not finite",
        r1,
        r2
    );
    if within(parallel, target, tol) {
        set.insert(Combination {
            value: parallel,
            conn: Connection::Parallel,
            r1,
            r2,
        });
    }
    Ok(())
}

/// All combinations within tolerance, sorted by achieved value. An exact
/// catalog hit short-circuits the pair enumeration. Self-pairs are
/// legitimate: R in series with itself is 2R, in parallel R/2.
pub fn find(catalog: &Catalog, target: f64, tol: f64) -> Result<Vec<Combination>> {
    let mut set = CombinationSet::default();
    if catalog.contains(target) {
        set.insert(Combination {
            value: target,
            conn: Connection::Exact,
            r1: target,
            r2: target,
        });
        return Ok(set.into_sorted());
    }
    let values = catalog.values();
    for (i, &r1) in values.iter().enumerate() {
        for &r2 in &values[i..] {
            consider(&mut set, target, tol, r1, r2)?;
        }
    }
    Ok(set.into_sorted())
}

/// The `resistor` command.
pub fn run(
    raw_target: &str,
    target: f64,
    catalog: &Catalog,
    opts: SearchOpts,
    style: ReportStyle,
) -> Result<()> {
    ensure!(target > 0.0, "desired resistance must be > 0");
    let mut results = find(catalog, target, opts.tolerance)?;
    if results.is_empty() {
        println!("No resistor combinations that meet tolerance");
        return Ok(());
    }
    let clipped = rank_truncate(&mut results, target, opts.limit);
    sort_combinations(&mut results);

    println!(
        "Desired resistance = {} = {}, tolerance = {}%",
        raw_target.trim(),
        sig(target, style.digits),
        sig(opts.tolerance * 100.0, 2)
    );
    if clipped {
        println!("Closest {} matches shown", opts.limit);
    }
    println!();
    println!("% dev from");
    println!("desired res.        R1           R2      Connection");
    println!("-------------   ----------   ----------  ----------");
    for c in &results {
        if !opts.filter.keeps(c.conn) {
            continue;
        }
        let dev = c.pct_dev(target);
        let r1 = center(&eng_si(c.r1, style.digits), 10);
        let line = if c.conn == Connection::Exact {
            format!("   {:<10}   {}                {}", pct_cell(dev, 2), r1, c.conn.label())
        } else {
            format!(
                "   {:<10}   {}   {}   {}",
                pct_cell(dev, 2),
                r1,
                center(&eng_si(c.r2, style.digits), 10),
                c.conn.label()
            )
        };
        print_row(&line, dev == 0.0);
    }
    Ok(())
}
