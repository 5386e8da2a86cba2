//! Elementary function library.
//!
//! Each primitive is a [`UnOp`] rule: a name for the symbol `name(x)`, an
//! optional domain check, the forward value and the chain-ruled tangent
//! `f'(x) * dx`. All of them are reachable both as [`Session`] methods,
//! which accept bare literals, and as [`Node`] methods.

use crate::domain;
use crate::errors::Result;
use crate::node::Node;
use crate::operand::{Numeral, Operand};
use crate::session::Session;

/// A unary elementary function.
pub trait UnOp {
    /// Function name used in the symbol.
    const NAME: &'static str;
    /// Rejects arguments outside the domain.
    fn check(_x: f64) -> Result<()> {
        Ok(())
    }
    /// Forward trace `f(x)`.
    fn eval(x: f64) -> f64;
    /// Tangent trace `f'(x) * d` for one derivative component `d`.
    fn tangent(x: f64, d: f64) -> f64;
}

macro_rules! un_op {
    ($name:ident, $sym:literal, $doc:expr, $eval:expr, $tangent:expr $(, check = $check:path)?) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug)]
        pub struct $name;
        impl UnOp for $name {
            const NAME: &'static str = $sym;
            $(
                #[inline]
                fn check(x: f64) -> Result<()> {
                    $check(x)
                }
            )?
            #[inline]
            fn eval(x: f64) -> f64 {
                $eval(x)
            }
            #[inline]
            fn tangent(x: f64, d: f64) -> f64 {
                $tangent(x, d)
            }
        }
    };
}

un_op!(
    SqrtOp,
    "sqrt",
    "Square root.",
    f64::sqrt,
    |x: f64, d: f64| d / (2.0 * x.sqrt()),
    check = domain::check_sqrt
);
un_op!(
    LnOp,
    "ln",
    "Natural logarithm.",
    f64::ln,
    |x: f64, d: f64| d / x,
    check = domain::check_log
);
un_op!(
    ExpOp,
    "exp",
    "Exponential.",
    f64::exp,
    |x: f64, d: f64| d * x.exp()
);
un_op!(
    SinOp,
    "sin",
    "Sine.",
    f64::sin,
    |x: f64, d: f64| d * x.cos()
);
un_op!(
    CosOp,
    "cos",
    "Cosine.",
    f64::cos,
    |x: f64, d: f64| -d * x.sin()
);
un_op!(
    TanOp,
    "tan",
    "Tangent.",
    f64::tan,
    |x: f64, d: f64| d / x.cos().powi(2),
    check = domain::check_tan
);
un_op!(
    ArcsinOp,
    "arcsin",
    "Inverse sine.",
    f64::asin,
    |x: f64, d: f64| d / (1.0 - x * x).sqrt(),
    check = domain::check_arcsin
);
un_op!(
    ArccosOp,
    "arccos",
    "Inverse cosine.",
    f64::acos,
    |x: f64, d: f64| -d / (1.0 - x * x).sqrt(),
    check = domain::check_arccos
);
un_op!(
    ArctanOp,
    "arctan",
    "Inverse tangent.",
    f64::atan,
    |x: f64, d: f64| d / (1.0 + x * x)
);
un_op!(
    SinhOp,
    "sinh",
    "Hyperbolic sine.",
    f64::sinh,
    |x: f64, d: f64| d * x.cosh()
);
un_op!(
    CoshOp,
    "cosh",
    "Hyperbolic cosine.",
    f64::cosh,
    |x: f64, d: f64| d * x.sinh()
);
un_op!(
    TanhOp,
    "tanh",
    "Hyperbolic tangent.",
    f64::tanh,
    |x: f64, d: f64| d * (1.0 - x.tanh().powi(2))
);
un_op!(
    LogisticOp,
    "logistic",
    "Logistic sigmoid.",
    sigmoid,
    |x: f64, d: f64| {
        let s = sigmoid(x);
        d * s * (1.0 - s)
    }
);

/// `1 / (1 + e^-x)`, never exponentiating a large positive number.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

impl Session {
    /// Applies an elementary function: canonicalise `name(x)`, look up,
    /// validate, coerce, compute. Validation happens before a literal is
    /// turned into a leaf, so a rejected call registers nothing.
    pub fn apply<O: UnOp>(&self, x: impl Into<Operand>) -> Result<Node> {
        let x = x.into();
        self.check_owned(&x)?;
        let symbol = format!("{}({})", O::NAME, x.symbol());
        self.memoize(symbol, |s| {
            O::check(x.value())?;
            let x = s.coerce(x)?;
            let v = x.value();
            Ok((O::eval(v), x.derivative().map(|d| O::tangent(v, d))))
        })
    }

    /// Logarithm to `base`, symbol `log<base>(x)`. The base must exceed 1.
    ///
    /// There is no default base: the natural logarithm is [`Session::ln`].
    /// Passing [`std::f64::consts::E`] gives the same value and derivative
    /// under a different symbol, `log2.718281828459045(x)`.
    pub fn log(&self, x: impl Into<Operand>, base: impl Into<Numeral>) -> Result<Node> {
        let base = base.into();
        let b = base.as_f64();
        domain::check_log_base(b)?;
        let x = x.into();
        self.check_owned(&x)?;
        let symbol = format!("log{}({})", base, x.symbol());
        self.memoize(symbol, |s| {
            domain::check_log(x.value())?;
            let x = s.coerce(x)?;
            let v = x.value();
            Ok((v.log(b), x.derivative().map(|d| d / (v * b.ln()))))
        })
    }

    /// `base ** exponent` as a function call; same node as [`Session::pow`].
    pub fn power(
        &self,
        base: impl Into<Operand>,
        exponent: impl Into<Operand>,
    ) -> Result<Node> {
        let (base, exponent) = (base.into(), exponent.into());
        self.check_owned(&base)?;
        self.check_owned(&exponent)?;
        let symbol = format!("({}**{})", base.symbol(), exponent.symbol());
        if let Some(hit) = self.lookup(&symbol) {
            return Ok(hit);
        }
        let base = self.coerce(base)?;
        self.pow(base, exponent)
    }
}

macro_rules! elementary_fns {
    ($($f:ident => $op:ident),* $(,)?) => {
        impl Session {
            $(
                #[doc = concat!("`", stringify!($f), "(x)`; see [`", stringify!($op), "`].")]
                pub fn $f(&self, x: impl Into<Operand>) -> Result<Node> {
                    self.apply::<$op>(x)
                }
            )*
        }

        impl Node {
            $(
                #[doc = concat!("`", stringify!($f), "(self)`.")]
                pub fn $f(&self) -> Result<Node> {
                    self.session()?.apply::<$op>(self)
                }
            )*
        }
    };
}

elementary_fns!(
    sqrt => SqrtOp,
    ln => LnOp,
    exp => ExpOp,
    sin => SinOp,
    cos => CosOp,
    tan => TanOp,
    arcsin => ArcsinOp,
    arccos => ArccosOp,
    arctan => ArctanOp,
    sinh => SinhOp,
    cosh => CoshOp,
    tanh => TanhOp,
    logistic => LogisticOp,
);

impl Node {
    /// `log<base>(self)`.
    pub fn log(&self, base: impl Into<Numeral>) -> Result<Node> {
        self.session()?.log(self, base)
    }

    /// `(self**exponent)` through the function form.
    pub fn power(&self, exponent: impl Into<Operand>) -> Result<Node> {
        self.session()?.power(self, exponent)
    }
}
