use std::fmt;

use crate::errors::ADError;
use crate::node::Node;

use super::{Numeral, Operand};

impl Numeral {
    #[inline]
    /// Returns the literal as a 64-bit float.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Numeral::Int(i) => i as f64,
            Numeral::Float(f) => f,
        }
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeral::Int(i) => write!(f, "{i}"),
            // `Debug` keeps the trailing `.0` on integral floats.
            Numeral::Float(v) => write!(f, "{v:?}"),
        }
    }
}

macro_rules! numeral_from {
    ($variant:ident, $as:ty; $($t:ty),*) => {
        $(
            impl From<$t> for Numeral {
                #[inline]
                fn from(v: $t) -> Self {
                    Numeral::$variant(v as $as)
                }
            }
        )*
    };
}

numeral_from!(Int, i64; i8, i16, i32, i64, u8, u16, u32);
numeral_from!(Float, f64; f32, f64);

impl TryFrom<&str> for Numeral {
    type Error = ADError;
    /// Strings are never numerals, even when they spell one.
    fn try_from(_: &str) -> Result<Self, Self::Error> {
        Err(ADError::TypeError {
            found: "str".into(),
            attribute: "value",
        })
    }
}

impl TryFrom<String> for Numeral {
    type Error = ADError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Numeral::try_from(s.as_str())
    }
}

impl TryFrom<Vec<f64>> for Numeral {
    type Error = ADError;
    fn try_from(_: Vec<f64>) -> Result<Self, Self::Error> {
        Err(ADError::TypeError {
            found: "list".into(),
            attribute: "value",
        })
    }
}

impl TryFrom<&[f64]> for Numeral {
    type Error = ADError;
    fn try_from(_: &[f64]) -> Result<Self, Self::Error> {
        Err(ADError::TypeError {
            found: "list".into(),
            attribute: "value",
        })
    }
}

impl Operand {
    /// Returns the symbol this operand contributes to a combined expression.
    pub fn symbol(&self) -> String {
        match self {
            Operand::Literal(n) => n.to_string(),
            Operand::Node(node) => node.symbol().to_owned(),
        }
    }

    #[inline]
    /// Returns the operand's current numeric value.
    pub fn value(&self) -> f64 {
        match self {
            Operand::Literal(n) => n.as_f64(),
            Operand::Node(node) => node.value(),
        }
    }
}

macro_rules! operand_from_literal {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                #[inline]
                fn from(v: $t) -> Self {
                    Operand::Literal(v.into())
                }
            }
        )*
    };
}

operand_from_literal!(Numeral, i8, i16, i32, i64, u8, u16, u32, f32, f64);

impl From<Node> for Operand {
    #[inline]
    fn from(n: Node) -> Self {
        Operand::Node(n)
    }
}

impl From<&Node> for Operand {
    #[inline]
    fn from(n: &Node) -> Self {
        Operand::Node(n.clone())
    }
}
