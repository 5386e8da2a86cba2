//! Error types for the forward-mode differentiation crate.

use std::convert::Infallible;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
/// Error variants for node construction and elementary-function evaluation.
pub enum ADError {
    #[error("Unsupported type '{found}' for {attribute} attribute in Node")]
    /// A value or derivative was supplied with a type that cannot be stored on a node.
    TypeError {
        /// Name of the offending input type.
        found: String,
        /// Which node attribute was being set (`value` or `derivative`).
        attribute: &'static str,
    },
    #[error("Value '{value}' is not within the domain of {domain}")]
    /// An elementary function was applied outside its admissible domain.
    DomainError {
        /// The rejected input value.
        value: f64,
        /// Human-readable description of the violated domain.
        domain: String,
    },
    #[error("Derivative shapes do not match: vector of length {left} against vector of length {right}")]
    /// Two seeded derivatives of different dimension met in one expression.
    ShapeMismatch { left: usize, right: usize },
    #[error("No node with symbol '{0}' in the registry")]
    /// Lookup of a symbol that has not been registered.
    NodeNotFound(String),
    #[error("A vector function needs at least one node")]
    /// A vector function was built from an empty list.
    EmptyVectorFunction,
    #[error("The session that created this node has been dropped")]
    /// A node tried to build a new expression after its session went away.
    SessionDropped,
    #[error("Node '{0}' belongs to a different session")]
    /// A node built by one session was passed to another.
    SessionMismatch(String),
}

impl ADError {
    pub(crate) fn domain(value: f64, domain: impl Into<String>) -> Self {
        ADError::DomainError {
            value,
            domain: domain.into(),
        }
    }
}

impl From<Infallible> for ADError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, ADError>;
