//! Safe arithmetic expression evaluator
//!
//! Resistance values on the command line may be small expressions such as
//! "10+2.2" or "3*(1.5)". This is a plain recursive-descent evaluator over
//! `+ - * / ( )`, unary sign, float literals (exponent notation included),
//! and the constants `pi` and `e`. Anything else is rejected, as is a
//! non-finite result. It evaluates numbers only; there is no way to reach
//! general code execution from here.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("trailing input after expression: '{0}'")]
    Trailing(String),
    #[error("unknown name '{0}'")]
    UnknownName(String),
    #[error("'{0}' is not a valid number")]
    BadNumber(String),
    #[error("expression does not evaluate to a finite number")]
    NonFinite,
}

/// Evaluate an arithmetic expression to a finite f64.
pub fn eval(src: &str) -> Result<f64, EvalError> {
    let mut p = Parser {
        src: src.as_bytes(),
        pos: 0,
    };
    p.skip_ws();
    let value = p.expr()?;
    p.skip_ws();
    if p.pos < p.src.len() {
        return Err(EvalError::Trailing(
            String::from_utf8_lossy(&p.src[p.pos..]).into_owned(),
        ));
    }
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.bump();
        }
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut acc = self.term()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some(b'+') => {
                    self.bump();
                    acc += self.term()?;
                }
                Some(b'-') => {
                    self.bump();
                    acc -= self.term()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut acc = self.factor()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some(b'*') => {
                    self.bump();
                    acc *= self.factor()?;
                }
                Some(b'/') => {
                    self.bump();
                    acc /= self.factor()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        self.skip_ws();
        match self.peek() {
            Some(b'+') => {
                self.bump();
                self.factor()
            }
            Some(b'-') => {
                self.bump();
                Ok(-self.factor()?)
            }
            Some(b'(') => {
                self.bump();
                let inner = self.expr()?;
                self.skip_ws();
                match self.peek() {
                    Some(b')') => {
                        self.bump();
                        Ok(inner)
                    }
                    Some(c) => Err(EvalError::UnexpectedChar(c as char)),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(c) if c.is_ascii_digit() || c == b'.' => self.number(),
            Some(c) if c.is_ascii_alphabetic() => self.constant(),
            Some(c) => Err(EvalError::UnexpectedChar(c as char)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == b'.') {
            self.bump();
        }
        // Optional exponent part, only if it is actually well-formed;
        // otherwise leave the 'e' for the constant/trailing checks.
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let mark = self.pos;
            self.bump();
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.bump();
            }
            if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.bump();
                }
            } else {
                self.pos = mark;
            }
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        text.parse::<f64>().map_err(|_| EvalError::BadNumber(text))
    }

    fn constant(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.bump();
        }
        let name = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        match name.as_str() {
            "pi" => Ok(std::f64::consts::PI),
            "e" => Ok(std::f64::consts::E),
            _ => Err(EvalError::UnknownName(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_arithmetic() {
        assert_eq!(eval("10+2.2").unwrap(), 12.2);
        assert_eq!(eval("2*3+4").unwrap(), 10.0);
        assert_eq!(eval("2+3*4").unwrap(), 14.0);
        assert_eq!(eval("10/4").unwrap(), 2.5);
    }

    #[test]
    fn test_parentheses_and_sign() {
        assert_eq!(eval("(1+2)*3/2").unwrap(), 4.5);
        assert_eq!(eval("-4.7").unwrap(), -4.7);
        assert_eq!(eval("-(2+3)").unwrap(), -5.0);
        assert_eq!(eval("+2").unwrap(), 2.0);
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(eval("22.3e3").unwrap(), 22300.0);
        assert_eq!(eval("1e-2").unwrap(), 0.01);
        assert_eq!(eval("1E2").unwrap(), 100.0);
    }

    #[test]
    fn test_constants() {
        assert!((eval("2*pi").unwrap() - 2.0 * std::f64::consts::PI).abs() < 1e-12);
        assert!((eval("e").unwrap() - std::f64::consts::E).abs() < 1e-12);
        assert_eq!(eval("foo"), Err(EvalError::UnknownName("foo".to_string())));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(eval("").is_err());
        assert!(eval("10x").is_err());
        assert!(eval("2**3").is_err());
        assert!(eval("(1+2").is_err());
        assert!(eval("1+2)").is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(eval("1/0"), Err(EvalError::NonFinite));
    }

    #[test]
    fn test_whitespace_tolerated() {
        assert_eq!(eval("  1 + 2 * 3  ").unwrap(), 7.0);
    }
}
