//! Computation nodes: the immutable (symbol, value, derivative) triples that
//! every combinator produces.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::derivative::Derivative;
use crate::errors::{ADError, Result};
use crate::operand::Operand;
use crate::session::{Session, Shared};

struct NodeData {
    symbol: String,
    value: f64,
    derivative: Derivative,
    session: Weak<Shared>,
}

/// A shared handle to one point of a computation graph.
///
/// Cloning is cheap and keeps the identity of the underlying node, so two
/// handles obtained for the same symbol from one session satisfy
/// [`Node::ptr_eq`]. The node only weakly refers back to its session; the
/// session's registry is the owning side.
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    pub(crate) fn new(
        symbol: String,
        value: f64,
        derivative: Derivative,
        session: Weak<Shared>,
    ) -> Self {
        Node(Arc::new(NodeData {
            symbol,
            value,
            derivative,
            session,
        }))
    }

    #[inline]
    /// Canonical textual form of the expression; the memoization key.
    pub fn symbol(&self) -> &str {
        &self.0.symbol
    }

    #[inline]
    /// Forward trace: the expression's value at the point set by its leaves.
    pub fn value(&self) -> f64 {
        self.0.value
    }

    #[inline]
    /// Tangent trace: scalar derivative or directional derivative vector.
    pub fn derivative(&self) -> &Derivative {
        &self.0.derivative
    }

    /// Returns `true` when both handles point at the same node instance.
    pub fn ptr_eq(a: &Node, b: &Node) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// The session that built this node.
    pub fn session(&self) -> Result<Session> {
        self.0
            .session
            .upgrade()
            .map(Session::from_shared)
            .ok_or(ADError::SessionDropped)
    }

    #[inline]
    pub(crate) fn belongs_to(&self, session: &Session) -> bool {
        Weak::ptr_eq(&self.0.session, &session.downgrade())
    }

    /// `self + rhs`; the symbol sorts both operands.
    pub fn try_add(&self, rhs: impl Into<Operand>) -> Result<Node> {
        self.session()?.add(self, rhs)
    }

    /// `lhs + self`, for a literal written on the left.
    pub fn try_radd(&self, lhs: impl Into<Operand>) -> Result<Node> {
        self.session()?.add(lhs, self)
    }

    /// `self - rhs`.
    pub fn try_sub(&self, rhs: impl Into<Operand>) -> Result<Node> {
        self.session()?.sub(self, rhs)
    }

    /// `lhs - self`.
    pub fn try_rsub(&self, lhs: impl Into<Operand>) -> Result<Node> {
        self.session()?.sub(lhs, self)
    }

    /// `self * rhs`; the symbol sorts both operands.
    pub fn try_mul(&self, rhs: impl Into<Operand>) -> Result<Node> {
        self.session()?.mul(self, rhs)
    }

    /// `lhs * self`.
    pub fn try_rmul(&self, lhs: impl Into<Operand>) -> Result<Node> {
        self.session()?.mul(lhs, self)
    }

    /// `self / rhs`.
    pub fn try_div(&self, rhs: impl Into<Operand>) -> Result<Node> {
        self.session()?.div(self, rhs)
    }

    /// `lhs / self`.
    pub fn try_rdiv(&self, lhs: impl Into<Operand>) -> Result<Node> {
        self.session()?.div(lhs, self)
    }

    /// `self ** exponent`.
    pub fn try_pow(&self, exponent: impl Into<Operand>) -> Result<Node> {
        self.session()?.pow(self, exponent)
    }

    /// `base ** self`.
    pub fn try_rpow(&self, base: impl Into<Operand>) -> Result<Node> {
        self.session()?.pow(base, self)
    }

    /// `-self`.
    pub fn try_neg(&self) -> Result<Node> {
        self.session()?.neg(self)
    }
}

impl PartialEq for Node {
    /// Nodes are equal when symbol, value and derivative all match.
    fn eq(&self, other: &Self) -> bool {
        self.symbol() == other.symbol()
            && self.value() == other.value()
            && self.derivative() == other.derivative()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node({},{},{})",
            self.symbol(),
            self.value(),
            self.derivative()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_symbol_and_debug_is_triple() {
        let s = Session::new();
        let x = s.node("x", 3.0, 1.0).unwrap();
        let f = x.sin().unwrap().try_add(&x).unwrap();
        assert_eq!(f.to_string(), "(sin(x)+x)");
        assert_eq!(format!("{:?}", x), "Node(x,3,1)");
    }

    #[test]
    fn equality_compares_all_three_parts() {
        let a = Session::new();
        let b = Session::new();
        let x = a.node("x", 2.0, 1.0).unwrap();
        let same = b.node("x", 2.0, 1.0).unwrap();
        let other_value = b.node("y", 2.0, 1.0).unwrap();
        assert_eq!(x, same);
        assert!(!Node::ptr_eq(&x, &same));
        assert_ne!(x, other_value);
    }

    #[test]
    fn node_outliving_its_session_cannot_build() {
        let x = {
            let s = Session::new();
            s.node("x", 1.0, 1.0).unwrap()
        };
        assert_eq!(x.value(), 1.0);
        assert_eq!(x.try_add(1).unwrap_err(), ADError::SessionDropped);
    }
}
