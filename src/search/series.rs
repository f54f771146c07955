//! Greedy series build-up toward a target resistance.

use anyhow::{ensure, Result};

use crate::catalog::Catalog;
use crate::core::render::ReportStyle;
use crate::core::sigfig::{eng_si, sig};

/// Greedy approximation, largest values first: keep adding the current
/// resistor while the running sum stays at or under the target, otherwise
/// drop it from consideration and move on. A resistor may be taken more
/// than once; there is no backtracking, so the result is not an optimal
/// subset sum.
pub fn build(catalog: &Catalog, target: f64) -> Vec<f64> {
    let mut pool: Vec<f64> = catalog.values().to_vec();
    pool.sort_by(|a, b| b.total_cmp(a));
    let mut used = Vec::new();
    let mut sum = 0.0;
    let mut i = 0;
    while i < pool.len() {
        if sum + pool[i] <= target {
            used.push(pool[i]);
            sum += pool[i];
        } else {
            i += 1;
        }
    }
    used
}

/// The `build-series` command.
pub fn run(
    raw_target: &str,
    target: f64,
    catalog: &Catalog,
    style: ReportStyle,
) -> Result<()> {
    ensure!(target > 0.0, "desired resistance must be > 0");
    let used = build(catalog, target);
    if used.is_empty() {
        println!("No resistor fits under {}", raw_target.trim());
        return Ok(());
    }
    let sum: f64 = used.iter().sum();
    println!("Sum = {}", eng_si(sum, style.digits));
    println!("  Resistor     % of total");
    let mut running = 0.0;
    for &r in &used {
        running += r;
        println!(
            "  {:<10}   {}",
            eng_si(r, style.digits),
            sig(100.0 * running / target, 6)
        );
    }
    Ok(())
}
