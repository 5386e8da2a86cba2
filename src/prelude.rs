//! Glob-import for the common surface.

pub use crate::derivative::Derivative;
pub use crate::errors::{ADError, Result};
pub use crate::node::Node;
pub use crate::operand::{Numeral, Operand};
pub use crate::session::{Session, SessionConfig};
pub use crate::vector_function::VectorFunction;
