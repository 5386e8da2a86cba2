//! Arithmetic combinators: symbol construction and forward/tangent rules.

use crate::derivative::Derivative;
use crate::errors::Result;
use crate::node::Node;
use crate::operand::Operand;
use crate::session::Session;

/// A binary operator on nodes.
pub trait BinOp {
    /// Infix text placed between the operand symbols.
    const SYMBOL: &'static str;
    /// Commutative operators sort their operand symbols.
    const COMMUTATIVE: bool;
    /// Forward trace.
    fn eval(l: f64, r: f64) -> f64;
    /// Tangent trace.
    fn tangent(l: &Node, r: &Node) -> Result<Derivative>;
}

#[derive(Clone, Copy, Debug)]
/// Addition.
pub struct AddOp;
impl BinOp for AddOp {
    const SYMBOL: &'static str = "+";
    const COMMUTATIVE: bool = true;
    #[inline]
    fn eval(l: f64, r: f64) -> f64 {
        l + r
    }
    fn tangent(l: &Node, r: &Node) -> Result<Derivative> {
        l.derivative().zip_with(r.derivative(), |dl, dr| dl + dr)
    }
}

#[derive(Clone, Copy, Debug)]
/// Subtraction.
pub struct SubOp;
impl BinOp for SubOp {
    const SYMBOL: &'static str = "-";
    const COMMUTATIVE: bool = false;
    #[inline]
    fn eval(l: f64, r: f64) -> f64 {
        l - r
    }
    fn tangent(l: &Node, r: &Node) -> Result<Derivative> {
        l.derivative().zip_with(r.derivative(), |dl, dr| dl - dr)
    }
}

#[derive(Clone, Copy, Debug)]
/// Multiplication (product rule).
pub struct MulOp;
impl BinOp for MulOp {
    const SYMBOL: &'static str = "*";
    const COMMUTATIVE: bool = true;
    #[inline]
    fn eval(l: f64, r: f64) -> f64 {
        l * r
    }
    fn tangent(l: &Node, r: &Node) -> Result<Derivative> {
        let (a, b) = (l.value(), r.value());
        l.derivative()
            .zip_with(r.derivative(), |da, db| a * db + b * da)
    }
}

#[derive(Clone, Copy, Debug)]
/// Division (quotient rule).
pub struct DivOp;
impl BinOp for DivOp {
    const SYMBOL: &'static str = "/";
    const COMMUTATIVE: bool = false;
    #[inline]
    fn eval(l: f64, r: f64) -> f64 {
        l / r
    }
    fn tangent(l: &Node, r: &Node) -> Result<Derivative> {
        let (a, b) = (l.value(), r.value());
        l.derivative()
            .zip_with(r.derivative(), |da, db| (da * b - a * db) / (b * b))
    }
}

#[derive(Clone, Copy, Debug)]
/// Power with variable base and exponent.
///
/// `d(a^b) = a^b * (b' ln a + a' b / a)`, evaluated as
/// `a' b a^(b-1) + b' a^b ln a`. The logarithmic term is skipped wherever
/// `b' = 0`, and a zero exponent contributes no base term, so integer
/// exponents on negative bases and `x**0` at `x = 0` stay finite.
/// Fractional exponents below 1 at a zero base still give an infinite slope.
pub struct PowOp;
impl BinOp for PowOp {
    const SYMBOL: &'static str = "**";
    const COMMUTATIVE: bool = false;
    #[inline]
    fn eval(l: f64, r: f64) -> f64 {
        l.powf(r)
    }
    fn tangent(l: &Node, r: &Node) -> Result<Derivative> {
        let (a, b) = (l.value(), r.value());
        let d_base = if b == 0.0 { 0.0 } else { b * a.powf(b - 1.0) };
        let d_exp = a.powf(b) * a.ln();
        l.derivative().zip_with(r.derivative(), |da, db| {
            let mut t = da * d_base;
            if db != 0.0 {
                t += db * d_exp;
            }
            t
        })
    }
}

/// Canonical symbol of `l <op> r`.
pub fn binary_symbol<O: BinOp>(l: &str, r: &str) -> String {
    if O::COMMUTATIVE && r < l {
        format!("({r}{}{l})", O::SYMBOL)
    } else {
        format!("({l}{}{r})", O::SYMBOL)
    }
}

impl Session {
    /// Applies a binary operator: canonicalise, look up, coerce, compute.
    pub fn binary<O: BinOp>(
        &self,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
    ) -> Result<Node> {
        let (lhs, rhs) = (lhs.into(), rhs.into());
        self.check_owned(&lhs)?;
        self.check_owned(&rhs)?;
        let symbol = binary_symbol::<O>(&lhs.symbol(), &rhs.symbol());
        self.memoize(symbol, |s| {
            let l = s.coerce(lhs)?;
            let r = s.coerce(rhs)?;
            Ok((O::eval(l.value(), r.value()), O::tangent(&l, &r)?))
        })
    }

    pub fn add(&self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Node> {
        self.binary::<AddOp>(lhs, rhs)
    }

    pub fn sub(&self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Node> {
        self.binary::<SubOp>(lhs, rhs)
    }

    pub fn mul(&self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Node> {
        self.binary::<MulOp>(lhs, rhs)
    }

    pub fn div(&self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Node> {
        self.binary::<DivOp>(lhs, rhs)
    }

    pub fn pow(&self, base: impl Into<Operand>, exponent: impl Into<Operand>) -> Result<Node> {
        self.binary::<PowOp>(base, exponent)
    }

    /// Negation, symbol `-x`.
    pub fn neg(&self, x: impl Into<Operand>) -> Result<Node> {
        let x = x.into();
        self.check_owned(&x)?;
        let symbol = format!("-{}", x.symbol());
        self.memoize(symbol, |s| {
            let x = s.coerce(x)?;
            Ok((-x.value(), x.derivative().map(|d| -d)))
        })
    }
}
