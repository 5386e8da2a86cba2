//! Literal numerals and the operand type accepted by every combinator.

use crate::node::Node;

/// A raw numeric literal.
///
/// Integers and floats evaluate identically; the distinction is kept only so
/// that literal symbols render the way they were written (`sqrt(9)` versus
/// `sqrt(9.0)`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Numeral {
    Int(i64),
    Float(f64),
}

/// An argument to a combinator: either a bare literal or an existing node.
///
/// Literals are normalised into zero-derivative leaf nodes at the combinator
/// boundary, after the result symbol has been looked up.
#[derive(Clone, Debug)]
pub enum Operand {
    Literal(Numeral),
    Node(Node),
}

#[path = "operand_impl.rs"]
mod operand_impl;
