//! Forward-mode automatic differentiation primitives.
//!
//! Expressions are built from leaves and combinators on a [`Session`]. Every
//! result is a [`Node`] carrying its value and its derivative, both computed
//! in the same forward pass. Nodes are memoized by their canonical symbol, so
//! structurally identical sub-expressions (including `a+b` versus `b+a`) are
//! computed once per session.
//!
//! ```
//! use rust_fad::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let s = Session::new();
//! let x = s.variable("x", std::f64::consts::PI)?;
//! let f = (x.sin()? + &x)?;
//!
//! assert_eq!(f.symbol(), "(sin(x)+x)");
//! assert!((f.value() - std::f64::consts::PI).abs() < 1e-12);
//! assert!(f.derivative().as_scalar().unwrap().abs() < 1e-12);
//! # Ok(())
//! # }
//! ```
//!
//! Seeded leaves carry directional derivatives, which stack into a Jacobian
//! through [`VectorFunction`].

pub mod derivative;
pub mod domain;
pub mod elementary;
pub mod errors;
pub mod node;
pub mod operand;
pub mod ops;
pub mod prelude;
pub mod session;
pub mod vector_function;
mod overloads;

pub use derivative::Derivative;
pub use errors::{ADError, Result};
pub use node::Node;
pub use operand::{Numeral, Operand};
pub use session::{Session, SessionConfig};
pub use vector_function::VectorFunction;
