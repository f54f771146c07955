//! benchcalc - bench calculators for electronics and machining hobbyists
//!
//! benchcalc provides:
//! - Resistor pair search (series/parallel/exact) over an on-hand or EIA catalog
//! - Voltage divider search, chain analysis, and closed-form divider design
//! - Deviation reports for measured resistor groups and a greedy series build-up
//! - A ball-turning coordinate table for the lathe

use anyhow::Result;
use clap::Parser;

mod catalog;
mod cli;
mod core;
mod search;
mod shop;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
