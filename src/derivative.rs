//! Tangent values carried by nodes: a plain scalar or a directional vector.

use std::fmt;

use ndarray::{Array1, Zip};

use crate::errors::{ADError, Result};
use crate::operand::Numeral;

/// The derivative part of a node.
///
/// A scalar is the ordinary derivative with respect to one implicit free
/// variable. A vector holds one partial derivative per free variable and is
/// produced by seeding a leaf. A scalar meeting a vector is broadcast over
/// every component, which is how literals (scalar zero) mix with seeded
/// leaves; two vectors must have the same length.
#[derive(Clone, Debug, PartialEq)]
pub enum Derivative {
    Scalar(f64),
    Vector(Array1<f64>),
}

impl Derivative {
    /// The derivative of every literal.
    pub const ZERO: Derivative = Derivative::Scalar(0.0);

    /// Number of components, or `None` for a scalar.
    pub fn dim(&self) -> Option<usize> {
        match self {
            Derivative::Scalar(_) => None,
            Derivative::Vector(v) => Some(v.len()),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Derivative::Scalar(d) => *d == 0.0,
            Derivative::Vector(v) => v.iter().all(|d| *d == 0.0),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Derivative::Scalar(d) => Some(*d),
            Derivative::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Array1<f64>> {
        match self {
            Derivative::Scalar(_) => None,
            Derivative::Vector(v) => Some(v),
        }
    }

    /// Copies the components out; a scalar becomes a one-element vector.
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Derivative::Scalar(d) => vec![*d],
            Derivative::Vector(v) => v.to_vec(),
        }
    }

    /// Applies `f` to every component.
    pub fn map<F>(&self, f: F) -> Derivative
    where
        F: Fn(f64) -> f64,
    {
        match self {
            Derivative::Scalar(d) => Derivative::Scalar(f(*d)),
            Derivative::Vector(v) => Derivative::Vector(v.mapv(f)),
        }
    }

    /// Combines two derivatives component-wise, broadcasting scalars.
    pub fn zip_with<F>(&self, other: &Derivative, f: F) -> Result<Derivative>
    where
        F: Fn(f64, f64) -> f64,
    {
        use Derivative::*;
        let out = match (self, other) {
            (Scalar(a), Scalar(b)) => Scalar(f(*a, *b)),
            (Scalar(a), Vector(v)) => Vector(v.mapv(|b| f(*a, b))),
            (Vector(v), Scalar(b)) => Vector(v.mapv(|a| f(a, *b))),
            (Vector(u), Vector(v)) => {
                if u.len() != v.len() {
                    return Err(ADError::ShapeMismatch {
                        left: u.len(),
                        right: v.len(),
                    });
                }
                Vector(Zip::from(u).and(v).map_collect(|&a, &b| f(a, b)))
            }
        };
        Ok(out)
    }

    /// Scales a seed vector by this derivative, producing a directional derivative.
    pub fn seeded(&self, seed: &Array1<f64>) -> Result<Derivative> {
        Derivative::Vector(seed.clone()).zip_with(self, |s, d| d * s)
    }
}

impl Default for Derivative {
    fn default() -> Self {
        Derivative::ZERO
    }
}

impl fmt::Display for Derivative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Derivative::Scalar(d) => write!(f, "{d}"),
            Derivative::Vector(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! scalar_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Derivative {
                #[inline]
                fn from(d: $t) -> Self {
                    Derivative::Scalar(d as f64)
                }
            }
        )*
    };
}

scalar_from!(i8, i16, i32, i64, u8, u16, u32, f32, f64);

impl From<Numeral> for Derivative {
    fn from(n: Numeral) -> Self {
        Derivative::Scalar(n.as_f64())
    }
}

impl From<Array1<f64>> for Derivative {
    fn from(v: Array1<f64>) -> Self {
        Derivative::Vector(v)
    }
}

impl From<Vec<f64>> for Derivative {
    fn from(v: Vec<f64>) -> Self {
        Derivative::Vector(Array1::from(v))
    }
}

impl From<&[f64]> for Derivative {
    fn from(v: &[f64]) -> Self {
        Derivative::Vector(Array1::from(v.to_vec()))
    }
}

impl TryFrom<&str> for Derivative {
    type Error = ADError;
    fn try_from(_: &str) -> Result<Self> {
        Err(ADError::TypeError {
            found: "str".into(),
            attribute: "derivative",
        })
    }
}

impl TryFrom<String> for Derivative {
    type Error = ADError;
    fn try_from(s: String) -> Result<Self> {
        Derivative::try_from(s.as_str())
    }
}
