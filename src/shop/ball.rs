//! Ball-turning coordinate table for the lathe
//!
//! Approximate-step method: feed the crossfeed in equal dy steps and
//! compute how far to move the carriage for each step, from the
//! first-quadrant circle equation x = sqrt(r^2 - y^2). The table lists, per
//! step, the longitudinal position and the crossfeed depth (doubled, to
//! correct from radius to diameter), in inches and mm.

use anyhow::{ensure, Result};
use std::io::{self, BufRead, Write};

use crate::core::prompt::{NumberPrompt, PromptOutcome};

const IN_TO_MM: f64 = 25.4;

/// (longitudinal, crossfeed-diameter) coordinates for steps 1..=n.
pub fn table(diameter: f64, steps: u32) -> Vec<(f64, f64)> {
    let r = diameter / 2.0;
    let dy = r / steps as f64;
    (1..=steps)
        .map(|k| {
            let k = k as f64;
            let x = (2.0 * r * k * dy - k * k * dy * dy).sqrt();
            let y = r - k * dy;
            (x, 2.0 * (r - y))
        })
        .collect()
}

/// The `ball` command. Missing arguments are prompted for.
pub fn run(diameter: Option<f64>, steps: Option<u32>) -> Result<()> {
    let (diameter, steps) = match (diameter, steps) {
        (Some(d), Some(n)) => (d, n),
        _ => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            match prompt_missing(diameter, steps, &mut stdin.lock(), &mut stdout.lock())? {
                Some(pair) => pair,
                None => return Ok(()),
            }
        }
    };
    ensure!(diameter > 0.0, "ball diameter must be > 0");
    ensure!(steps > 0, "number of steps must be > 0");

    let r = diameter / 2.0;
    let dy = r / steps as f64;
    println!(
        "Ball diameter  = {:.3} inches = {:.2} mm",
        diameter,
        IN_TO_MM * diameter
    );
    println!(
        "Crossfeed step = {:.3} inches = {:.2} mm",
        dy,
        IN_TO_MM * dy
    );
    println!();
    println!("         Longitudinal            Crossfeed");
    println!("Num     inches     mm         inches     mm");
    println!("---     ------   ------       ------   ------");
    for (k, (x, y)) in table(diameter, steps).iter().enumerate() {
        println!(
            "{:3}  {:9.3}{:9.2}    {:9.3}{:9.2}",
            k + 1,
            x,
            IN_TO_MM * x,
            y,
            IN_TO_MM * y
        );
    }
    Ok(())
}

/// Prompt for whichever of the two arguments was not given. Returns None
/// when the user quits.
fn prompt_missing(
    diameter: Option<f64>,
    steps: Option<u32>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<(f64, u32)>> {
    let diameter = match diameter {
        Some(d) => d,
        None => {
            let prompt = NumberPrompt {
                low: Some(0.0),
                low_open: true,
                ..Default::default()
            };
            match prompt.read("Ball diameter (inches)? ", input, output)? {
                PromptOutcome::Value(v, _) => v,
                PromptOutcome::Quit => return Ok(None),
            }
        }
    };
    let steps = match steps {
        Some(n) => n,
        None => {
            let prompt = NumberPrompt {
                low: Some(1.0),
                integer: true,
                ..Default::default()
            };
            match prompt.read("Number of steps? ", input, output)? {
                PromptOutcome::Value(v, _) => v as u32,
                PromptOutcome::Quit => return Ok(None),
            }
        }
    };
    Ok(Some((diameter, steps)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_table_endpoints() {
        let rows = table(2.0, 4);
        assert_eq!(rows.len(), 4);
        // Last step reaches the full radius: x = r, crossfeed = diameter.
        let (x, y) = rows[3];
        assert!((x - 1.0).abs() < 1e-12);
        assert!((y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_table_is_monotonic() {
        let rows = table(1.5, 10);
        assert!(rows.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 < w[1].1));
    }

    #[test]
    fn test_table_on_circle() {
        // Every (x, y) pair satisfies x^2 + (r - y/2)^2 = r^2.
        let d = 3.0;
        let r = d / 2.0;
        for (x, y) in table(d, 7) {
            let yk = r - y / 2.0;
            assert!((x * x + yk * yk - r * r).abs() < 1e-9);
        }
    }

    #[test]
    fn test_prompts_for_missing_arguments() {
        let mut input = Cursor::new(b"1.25\n5\n".to_vec());
        let mut output = Vec::new();
        let got = prompt_missing(None, None, &mut input, &mut output).unwrap();
        assert_eq!(got, Some((1.25, 5)));
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Ball diameter"));
        assert!(text.contains("Number of steps"));
    }

    #[test]
    fn test_quit_aborts_prompting() {
        let mut input = Cursor::new(b"q\n".to_vec());
        let mut output = Vec::new();
        let got = prompt_missing(None, None, &mut input, &mut output).unwrap();
        assert_eq!(got, None);
    }
}
