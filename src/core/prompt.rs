//! Interactive number prompt
//!
//! Keeps asking until an acceptable number is entered. Input arrives on an
//! injected reader/writer pair so tests can drive it with a `Cursor`. The
//! user may type arithmetic expressions, append a physical unit when
//! `use_unit` is set, press return to take the default, or quit with q/Q.

use anyhow::{bail, Result};
use std::io::{BufRead, Write};

use crate::core::eval;
use crate::core::value::parse_unit;

#[derive(Debug, Clone)]
pub struct NumberPrompt {
    /// Returned when the user just presses return.
    pub default: Option<f64>,
    pub low: Option<f64>,
    pub high: Option<f64>,
    /// Open (strict) instead of closed bound at the low/high end.
    pub low_open: bool,
    pub high_open: bool,
    /// Require an integral value.
    pub integer: bool,
    /// Accept a trailing unit and return it alongside the number.
    pub use_unit: bool,
    /// Let q/Q abandon the prompt.
    pub allow_quit: bool,
}

impl Default for NumberPrompt {
    fn default() -> Self {
        Self {
            default: None,
            low: None,
            high: None,
            low_open: false,
            high_open: false,
            integer: false,
            use_unit: false,
            allow_quit: true,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum PromptOutcome {
    /// The accepted number and its unit string (empty unless `use_unit`).
    Value(f64, String),
    Quit,
}

impl NumberPrompt {
    pub fn read(
        &self,
        msg: &str,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<PromptOutcome> {
        loop {
            write!(output, "{}", msg)?;
            if let Some(d) = self.default {
                write!(output, "[{}] ", d)?;
            }
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                match self.default {
                    Some(d) => return Ok(PromptOutcome::Value(d, String::new())),
                    None => bail!("end of input while prompting for a number"),
                }
            }
            let entry = line.trim();
            if entry.is_empty() {
                match self.default {
                    Some(d) => return Ok(PromptOutcome::Value(d, String::new())),
                    None => {
                        writeln!(output, "A value is required")?;
                        continue;
                    }
                }
            }
            if self.allow_quit && (entry == "q" || entry == "Q") {
                return Ok(PromptOutcome::Quit);
            }

            let (number_text, unit) = if self.use_unit {
                match parse_unit(entry) {
                    Ok(split) => split,
                    Err(e) => {
                        writeln!(output, "{}", e)?;
                        continue;
                    }
                }
            } else {
                (entry.to_string(), String::new())
            };

            let x = match eval::eval(&number_text) {
                Ok(v) => v,
                Err(_) => {
                    writeln!(output, "'{}' is not a valid number", number_text)?;
                    continue;
                }
            };
            if self.integer && x.fract() != 0.0 {
                writeln!(output, "'{}' is not a valid integer", number_text)?;
                continue;
            }
            if !self.accepts(x) {
                writeln!(output, "{}", self.range_message())?;
                continue;
            }
            return Ok(PromptOutcome::Value(x, unit));
        }
    }

    fn accepts(&self, x: f64) -> bool {
        if let Some(lo) = self.low {
            if (self.low_open && x <= lo) || (!self.low_open && x < lo) {
                return false;
            }
        }
        if let Some(hi) = self.high {
            if (self.high_open && x >= hi) || (!self.high_open && x > hi) {
                return false;
            }
        }
        true
    }

    fn range_message(&self) -> String {
        let mut parts = Vec::new();
        if let Some(lo) = self.low {
            parts.push(format!(
                "number {} {}",
                if self.low_open { ">" } else { ">=" },
                lo
            ));
        }
        if let Some(hi) = self.high {
            parts.push(format!(
                "number {} {}",
                if self.high_open { "<" } else { "<=" },
                hi
            ));
        }
        format!("Error: must have {}", parts.join(" and "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt_with(p: &NumberPrompt, input: &str) -> (Result<PromptOutcome>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = p.read("n? ", &mut reader, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_plain_number() {
        let p = NumberPrompt::default();
        let (r, _) = prompt_with(&p, "42\n");
        assert_eq!(r.unwrap(), PromptOutcome::Value(42.0, String::new()));
    }

    #[test]
    fn test_expression_accepted() {
        let p = NumberPrompt::default();
        let (r, _) = prompt_with(&p, "2*(3+4)\n");
        assert_eq!(r.unwrap(), PromptOutcome::Value(14.0, String::new()));
    }

    #[test]
    fn test_default_on_empty_line() {
        let p = NumberPrompt {
            default: Some(1.5),
            ..Default::default()
        };
        let (r, _) = prompt_with(&p, "\n");
        assert_eq!(r.unwrap(), PromptOutcome::Value(1.5, String::new()));
    }

    #[test]
    fn test_quit() {
        let p = NumberPrompt::default();
        let (r, _) = prompt_with(&p, "q\n");
        assert_eq!(r.unwrap(), PromptOutcome::Quit);
    }

    #[test]
    fn test_reprompts_until_in_range() {
        let p = NumberPrompt {
            low: Some(0.0),
            low_open: true,
            ..Default::default()
        };
        let (r, out) = prompt_with(&p, "-1\n0\n2.5\n");
        assert_eq!(r.unwrap(), PromptOutcome::Value(2.5, String::new()));
        assert!(out.contains("must have number > 0"));
    }

    #[test]
    fn test_integer_required() {
        let p = NumberPrompt {
            integer: true,
            ..Default::default()
        };
        let (r, out) = prompt_with(&p, "2.5\n3\n");
        assert_eq!(r.unwrap(), PromptOutcome::Value(3.0, String::new()));
        assert!(out.contains("not a valid integer"));
    }

    #[test]
    fn test_unit_returned() {
        let p = NumberPrompt {
            use_unit: true,
            ..Default::default()
        };
        let (r, _) = prompt_with(&p, "123Pa\n");
        assert_eq!(r.unwrap(), PromptOutcome::Value(123.0, "Pa".to_string()));
    }

    #[test]
    fn test_eof_without_default_fails() {
        let p = NumberPrompt::default();
        let (r, _) = prompt_with(&p, "");
        assert!(r.is_err());
    }
}
