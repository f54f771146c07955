//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, ensure, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::core::render::ReportStyle;
use crate::core::value::parse_value;
use crate::search::{ConnectionFilter, SearchOpts, TotalConstraint};

/// benchcalc - bench calculators for electronics and machining hobbyists.
#[derive(Parser, Debug)]
#[command(name = "benchcalc")]
#[command(
    author,
    version,
    about,
    long_about = r#"benchcalc searches a catalog of resistor values for combinations that
approximate a target resistance, ratio, or voltage divider, and prints a
ranked text table. It also bundles a few closed-form bench calculators.

The catalog is the builtin on-hand inventory unless -c points at a file or
-e selects an EIA decade series.

Examples:
    benchcalc resistor 12.2k
    benchcalc -e 24 -t 0.5 resistor "10+2.2" k
    benchcalc divider 0.35 -r 10k:5
    benchcalc quotient 3.3
    benchcalc pairs measured.txt 15 series
    benchcalc ball 1.25 20
"#
)]
pub struct Cli {
    /// Search tolerance in percent.
    #[arg(
        short = 't',
        long,
        global = true,
        default_value_t = 1.0,
        value_name = "PCT",
        long_help = "Search tolerance in percent (default 1).\n\n\
For the divider search this bounds the ratio; for the resistor pair search,\n\
combinations within this band of the desired value are printed."
    )]
    pub tolerance: f64,

    /// Limit search output to this many entries.
    #[arg(
        short = 'n',
        long,
        global = true,
        default_value_t = 30,
        value_name = "N",
        long_help = "Limit search output to the N entries closest to the target\n\
(by relative deviation). A note is printed when results were clipped."
    )]
    pub limit: usize,

    /// Significant digits in reports (1-15).
    #[arg(
        short = 'd',
        long,
        global = true,
        default_value_t = 4,
        value_name = "N"
    )]
    pub digits: usize,

    /// On-hand catalog file to search instead of the builtin inventory.
    #[arg(
        short = 'c',
        long,
        global = true,
        value_name = "FILE",
        long_help = "On-hand catalog file to search instead of the builtin inventory.\n\n\
Whitespace-separated values of the forms 22.3, 22.3k, 22.3M, or the usual\n\
floating point exponential notation such as 22.3e3."
    )]
    pub catalog: Option<PathBuf>,

    /// Search an EIA decade series instead of the on-hand catalog.
    #[arg(
        short = 'e',
        long,
        global = true,
        value_name = "N",
        long_help = "Search an EIA decade series instead of the on-hand catalog.\n\n\
Allowed series: 6, 12, 24, 48, 96 (E6 through E96), generated from 0.1 ohm\n\
through the 10M decade."
    )]
    pub series: Option<u32>,

    /// Only show series combinations.
    #[arg(short = 's', long, global = true)]
    pub series_only: bool,

    /// Only show parallel combinations.
    #[arg(short = 'p', long, global = true)]
    pub parallel_only: bool,

    /// Divider search only: required total resistance, as TOTAL:PCT.
    #[arg(
        short = 'r',
        long,
        global = true,
        value_name = "TOTAL:PCT",
        long_help = "For the divider search only: required total resistance of the pair\n\
with its own percent tolerance, e.g. -r 10k:5. Pairs whose sum falls outside\n\
this band are rejected before the ratio test."
    )]
    pub total: Option<String>,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find resistor pairs approximating a target resistance.
    #[command(
        long_about = "Find pairs of catalog resistors that realize the desired resistance in\n\
series or parallel, within the search tolerance. An exact catalog value is\n\
reported as such. The value may be an arithmetic expression with an optional\n\
SI suffix.\n\n\
Examples:\n\
  benchcalc resistor 12.2k\n\
  benchcalc -t 5 -e 12 resistor 47\n"
    )]
    Resistor {
        /// Target resistance (expression, optional SI suffix).
        #[arg(value_name = "VALUE", num_args = 1..)]
        value: Vec<String>,
    },

    /// Greedy series build-up toward a target resistance.
    #[command(
        long_about = "Pick catalog resistors, largest first, so their series sum approaches\n\
the desired value from below. This is a greedy approximation, not an optimal\n\
subset-sum solve. Each selection is reported with the cumulative percent of\n\
the target.\n\n\
Example:\n\
  benchcalc build-series 123.4k\n"
    )]
    BuildSeries {
        /// Target resistance (expression, optional SI suffix).
        #[arg(value_name = "VALUE", num_args = 1..)]
        value: Vec<String>,
    },

    /// Find resistor pairs approximating a voltage-divider ratio.
    #[command(
        long_about = "Find pairs whose divider ratio R1/(R1+R2) is within the search\n\
tolerance of the desired ratio. Use -r TOTAL:PCT to also constrain the total\n\
resistance of the pair.\n\n\
Examples:\n\
  benchcalc divider 0.35\n\
  benchcalc divider 0.35 -r 10k:5\n"
    )]
    Divider {
        /// Desired divider ratio (0 < ratio).
        #[arg(value_name = "RATIO")]
        ratio: String,
    },

    /// Total resistance and tap ratios of a literal resistor chain.
    #[command(
        long_about = "Print the total resistance and the per-junction divider ratios of a\n\
string of resistors used e.g. as the front end of a voltmeter. Values are\n\
listed from the top of the string down.\n\n\
Example:\n\
  benchcalc divider-total 9M 900k 90k 10k\n"
    )]
    DividerTotal {
        /// Chain resistors, top first (at least two).
        #[arg(value_name = "R", num_args = 2..)]
        resistors: Vec<String>,
    },

    /// Design a multi-tap divider from its total resistance and tap ratios.
    #[command(
        long_about = "Compute the n+1 resistor values realizing a divider with the given\n\
total resistance and n tap ratios (each strictly between 0 and 1).\n\n\
Example:\n\
  benchcalc design-divider 10k 0.9 0.5 0.1\n"
    )]
    DesignDivider {
        /// Total resistance of the divider.
        #[arg(id = "design_total", value_name = "TOTAL")]
        total: String,

        /// Tap ratios, each in (0, 1).
        #[arg(value_name = "RATIO", num_args = 1..)]
        ratios: Vec<String>,
    },

    /// Find resistor pairs with a given ratio.
    #[command(
        long_about = "Find distinct pairs whose quotient R1/R2 (either orientation) is\n\
within the search tolerance of the desired ratio. A ratio of exactly 1 is\n\
rejected: every pair satisfies it.\n\n\
Example:\n\
  benchcalc quotient 3.3\n"
    )]
    Quotient {
        /// Desired ratio (> 0, not 1).
        #[arg(value_name = "RATIO")]
        ratio: String,
    },

    /// Print the on-hand catalog and the standard EIA series.
    List,

    /// Cross combinations of two measured groups against a target.
    #[command(
        long_about = "Read two equal-size groups of measured resistances from FILE (one\n\
value per line, a blank line between the groups) and report every cross\n\
combination's deviation from TARGET, best match first.\n\n\
Example:\n\
  benchcalc pairs measured.txt 15 series\n"
    )]
    Pairs {
        /// Input file: one value per line, blank line between groups.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target resistance in ohms.
        #[arg(value_name = "TARGET")]
        target: String,

        /// Combination model.
        #[arg(value_name = "MODE", value_parser = ["series", "parallel", "s", "p"])]
        mode: String,
    },

    /// Ball-turning coordinate table for the lathe.
    #[command(
        long_about = "Print the carriage/crossfeed coordinate table for cutting a spherical\n\
shape of outside diameter OD in STEPS equal crossfeed steps. Dimensions are\n\
printed in inches and mm. Omitted arguments are prompted for.\n\n\
Example:\n\
  benchcalc ball 1.25 20\n"
    )]
    Ball {
        /// Ball outside diameter in inches.
        #[arg(value_name = "OD")]
        diameter: Option<f64>,

        /// Number of crossfeed steps.
        #[arg(value_name = "STEPS")]
        steps: Option<u32>,
    },
}

/// Parse the -r TOTAL:PCT constraint.
fn parse_total_constraint(s: Option<&str>) -> Result<Option<TotalConstraint>> {
    let Some(s) = s else { return Ok(None) };
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        bail!("invalid -r value. Expected 'TOTAL:PCT', got '{}'", s);
    }
    let resistance = parse_value(parts[0])
        .with_context(|| format!("invalid -r total resistance: '{}'", parts[0]))?;
    let pct: f64 = parts[1]
        .parse()
        .with_context(|| format!("invalid -r tolerance: '{}'", parts[1]))?;
    ensure!(resistance > 0.0, "-r: total resistance must be > 0");
    ensure!(pct > 0.0, "-r: percent tolerance must be > 0");
    Ok(Some(TotalConstraint {
        resistance,
        tolerance: pct / 100.0,
    }))
}

fn load_catalog(cli: &Cli) -> Result<Catalog> {
    if let Some(series) = cli.series {
        Catalog::eia(series)
    } else if let Some(path) = &cli.catalog {
        Catalog::from_file(path)
    } else {
        Catalog::builtin()
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    ensure!(
        (1..=15).contains(&cli.digits),
        "-d must be between 1 and 15"
    );
    ensure!(cli.tolerance > 0.0, "-t: percent tolerance must be > 0");
    ensure!(cli.limit >= 1, "-n must be an integer > 0");
    ensure!(
        !(cli.series_only && cli.parallel_only),
        "use at most one of --series-only and --parallel-only"
    );

    let style = ReportStyle { digits: cli.digits };
    let opts = SearchOpts {
        tolerance: cli.tolerance / 100.0,
        limit: cli.limit,
        filter: if cli.series_only {
            ConnectionFilter::SeriesOnly
        } else if cli.parallel_only {
            ConnectionFilter::ParallelOnly
        } else {
            ConnectionFilter::All
        },
        total: parse_total_constraint(cli.total.as_deref())?,
    };

    match &cli.command {
        Commands::Resistor { value } => {
            let raw = value.join(" ");
            let target = parse_value(&raw)?;
            crate::search::resistance::run(&raw, target, &load_catalog(&cli)?, opts, style)
        }

        Commands::BuildSeries { value } => {
            let raw = value.join(" ");
            let target = parse_value(&raw)?;
            crate::search::series::run(&raw, target, &load_catalog(&cli)?, style)
        }

        Commands::Divider { ratio } => {
            let rho: f64 = ratio
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("'{}' is not a valid ratio", ratio))?;
            crate::search::divider::run(ratio, rho, &load_catalog(&cli)?, opts, style)
        }

        Commands::DividerTotal { resistors } => {
            crate::search::divider::run_chain(resistors, style)
        }

        Commands::DesignDivider { total, ratios } => {
            crate::search::divider::run_design(total, ratios, style)
        }

        Commands::Quotient { ratio } => {
            crate::search::quotient::run(ratio, &load_catalog(&cli)?, opts, style)
        }

        Commands::List => crate::catalog::run_list(cli.catalog.as_deref()),

        Commands::Pairs { file, target, mode } => {
            crate::search::pairs::run(file, target, mode.parse()?, style)
        }

        Commands::Ball { diameter, steps } => crate::shop::ball::run(*diameter, *steps),
    }
}
