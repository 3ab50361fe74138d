//! Plain-text infix format for polynomials.
//!
//! Output looks like `3*x^2*y - y^2 + 1`. The parser accepts the same
//! language plus parentheses, unary minus and powers of parenthesised
//! sub-expressions, so any printed polynomial reads back to itself.

use super::{BiPoly, UPoly};
use crate::error::{MathError, Result};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::str::FromStr;

/// Write one signed term. `first` controls the leading separator.
fn write_term(
    f: &mut fmt::Formatter<'_>,
    c: &BigInt,
    monomial: &str,
    first: bool,
) -> fmt::Result {
    let negative = c.is_negative();
    match (first, negative) {
        (true, true) => write!(f, "-")?,
        (true, false) => {}
        (false, true) => write!(f, " - ")?,
        (false, false) => write!(f, " + ")?,
    }
    let magnitude = c.abs();
    if monomial.is_empty() {
        write!(f, "{}", magnitude)
    } else if magnitude.is_one() {
        write!(f, "{}", monomial)
    } else {
        write!(f, "{}*{}", magnitude, monomial)
    }
}

fn power(var: char, k: usize) -> String {
    match k {
        0 => String::new(),
        1 => var.to_string(),
        _ => format!("{}^{}", var, k),
    }
}

/// Write a univariate polynomial in the variable `var`.
pub fn write_univariate(f: &mut fmt::Formatter<'_>, p: &UPoly, var: char) -> fmt::Result {
    if p.is_zero() {
        return write!(f, "0");
    }
    let mut first = true;
    for (k, c) in p.coeffs().iter().enumerate().rev() {
        if c.is_zero() {
            continue;
        }
        write_term(f, c, &power(var, k), first)?;
        first = false;
    }
    Ok(())
}

/// Write a bivariate polynomial, highest `y` power first.
pub fn write_bivariate(f: &mut fmt::Formatter<'_>, p: &BiPoly) -> fmt::Result {
    if p.is_zero() {
        return write!(f, "0");
    }
    let mut first = true;
    for (j, cj) in p.coeffs().iter().enumerate().rev() {
        for (i, c) in cj.coeffs().iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let monomial = match (power('x', i), power('y', j)) {
                (a, b) if a.is_empty() => b,
                (a, b) if b.is_empty() => a,
                (a, b) => format!("{}*{}", a, b),
            };
            write_term(f, c, &monomial, first)?;
            first = false;
        }
    }
    Ok(())
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> MathError {
        MathError::Parse {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.input.get(self.pos).is_some_and(u8::is_ascii_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.input.get(self.pos).copied()
    }

    fn eat(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn integer(&mut self) -> Result<BigInt> {
        self.skip_whitespace();
        let start = self.pos;
        while self.input.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected an integer"));
        }
        let digits = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.error("invalid digits"))?;
        BigInt::from_str(digits).map_err(|_| self.error("invalid integer"))
    }

    fn expr(&mut self) -> Result<BiPoly> {
        let mut acc = if self.eat(b'-') {
            -self.term()?
        } else {
            self.eat(b'+');
            self.term()?
        };
        loop {
            if self.eat(b'+') {
                acc = &acc + &self.term()?;
            } else if self.eat(b'-') {
                acc = &acc - &self.term()?;
            } else {
                return Ok(acc);
            }
        }
    }

    fn term(&mut self) -> Result<BiPoly> {
        let mut acc = self.factor()?;
        while self.eat(b'*') {
            acc = &acc * &self.factor()?;
        }
        Ok(acc)
    }

    fn factor(&mut self) -> Result<BiPoly> {
        let base = self.primary()?;
        if !self.eat(b'^') {
            return Ok(base);
        }
        let exponent = self
            .integer()?
            .to_u32()
            .ok_or_else(|| self.error("exponent too large"))?;
        let mut acc = BiPoly::one();
        for _ in 0..exponent {
            acc = &acc * &base;
        }
        Ok(acc)
    }

    fn primary(&mut self) -> Result<BiPoly> {
        match self.peek() {
            Some(b'x') => {
                self.pos += 1;
                Ok(BiPoly::x())
            }
            Some(b'y') => {
                self.pos += 1;
                Ok(BiPoly::y())
            }
            Some(b'(') => {
                self.pos += 1;
                let inner = self.expr()?;
                if !self.eat(b')') {
                    return Err(self.error("expected ')'"));
                }
                Ok(inner)
            }
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.primary()?)
            }
            Some(c) if c.is_ascii_digit() => {
                Ok(BiPoly::from_x_poly(UPoly::constant(self.integer()?)))
            }
            Some(c) => Err(self.error(format!("unexpected character '{}'", c as char))),
            None => Err(self.error("unexpected end of input")),
        }
    }
}

/// Parse a polynomial in `x` and `y`.
pub fn parse_bivariate(input: &str) -> Result<BiPoly> {
    let mut parser = Parser::new(input);
    let p = parser.expr()?;
    if parser.peek().is_some() {
        return Err(parser.error("trailing input"));
    }
    Ok(p)
}

impl FromStr for BiPoly {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self> {
        parse_bivariate(s)
    }
}
