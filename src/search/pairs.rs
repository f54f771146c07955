//! Cross combinations of two measured resistor groups against a target.

use anyhow::{ensure, Context, Result};
use std::path::Path;
use std::str::FromStr;

use crate::core::render::ReportStyle;
use crate::core::sigfig::sig;

/// Deviations smaller than this are reported as exactly zero.
const ZERO_SNAP: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairMode {
    Series,
    Parallel,
}

impl PairMode {
    fn label(self) -> &'static str {
        match self {
            PairMode::Series => "series",
            PairMode::Parallel => "parallel",
        }
    }
}

impl FromStr for PairMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "s" | "series" => Ok(PairMode::Series),
            "p" | "parallel" => Ok(PairMode::Parallel),
            _ => anyhow::bail!("mode must be 'series' or 'parallel', got '{}'", s),
        }
    }
}

/// The two measured groups from the input file.
#[derive(Debug)]
pub struct PairGroups {
    pub first: Vec<f64>,
    pub second: Vec<f64>,
}

/// One value per line, a blank line between the two groups. Both groups
/// must be non-empty and the same size.
pub fn parse_groups(text: &str) -> Result<PairGroups> {
    let mut first = Vec::new();
    let mut second = Vec::new();
    let mut in_first = true;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            in_first = false;
            continue;
        }
        let v: f64 = line
            .parse()
            .with_context(|| format!("'{}' is not a resistance value", line))?;
        ensure!(v > 0.0, "resistance {} is not strictly positive", v);
        if in_first {
            first.push(v);
        } else {
            second.push(v);
        }
    }
    ensure!(
        !first.is_empty() && !second.is_empty(),
        "missing blank line separating the two resistor groups"
    );
    ensure!(
        first.len() == second.len(),
        "the two resistor groups must have the same number of values \
         (got {} and {})",
        first.len(),
        second.len()
    );
    Ok(PairGroups { first, second })
}

#[derive(Debug, Clone, Copy)]
pub struct PairResult {
    pub pct_dev: f64,
    pub value: f64,
    pub r1: f64,
    pub r2: f64,
}

/// Every cross combination, sorted by percent deviation ascending so the
/// best match prints first.
pub fn combine(groups: &PairGroups, target: f64, mode: PairMode) -> Result<Vec<PairResult>> {
    ensure!(target > 0.0, "target value must be > 0");
    let mut results = Vec::with_capacity(groups.first.len() * groups.second.len());
    for &a in &groups.first {
        for &b in &groups.second {
            let value = match mode {
                PairMode::Series => a + b,
                PairMode::Parallel => {
                    let p = 1.0 / (1.0 / a + 1.0 / b);
                    ensure!(
                        p.is_finite(),
                        "parallel combination of {} and {} is not finite",
                        a,
                        b
                    );
                    p
                }
            };
            let mut pct_dev = 100.0 * (value - target) / target;
            if pct_dev.abs() < ZERO_SNAP {
                pct_dev = 0.0;
            }
            results.push(PairResult {
                pct_dev,
                value,
                r1: a,
                r2: b,
            });
        }
    }
    results.sort_by(|x, y| {
        x.pct_dev
            .total_cmp(&y.pct_dev)
            .then(x.value.total_cmp(&y.value))
    });
    Ok(results)
}

/// The `pairs` command.
pub fn run(file: &Path, target_text: &str, mode: PairMode, style: ReportStyle) -> Result<()> {
    let target: f64 = target_text
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' is not a valid target value", target_text))?;
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read resistor file {}", file.display()))?;
    let groups = parse_groups(&text)
        .with_context(|| format!("bad resistor file {}", file.display()))?;
    let results = combine(&groups, target, mode)?;

    println!("Model = {}", mode.label());
    println!("File  = {}", file.display());
    println!();
    println!("% dev from");
    println!("mean value      Resistance          R1               R2");
    println!("----------      ----------      -------------   -------------");
    for r in &results {
        println!(
            "{:>9}%      {:<10}      {:<13}   {:<13}",
            sig(r.pct_dev, 2),
            sig(r.value, style.digits),
            sig(r.r1, style.digits),
            sig(r.r2, style.digits)
        );
    }
    Ok(())
}
