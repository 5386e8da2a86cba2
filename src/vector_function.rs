//! Read-only projection of several nodes into value vector and Jacobian.

use ndarray::{Array1, Array2};

use crate::derivative::Derivative;
use crate::errors::{ADError, Result};
use crate::node::Node;

/// Collects the component functions of `F: Rᵐ → Rⁿ`.
///
/// ```
/// use rust_fad::prelude::*;
///
/// let s = Session::new();
/// let xs = s.variables(&[("x", 2.0), ("y", 3.0)]).unwrap();
/// let (x, y) = (&xs[0], &xs[1]);
/// let f = VectorFunction::new(vec![
///     (x + y).unwrap(),
///     (x - (2i32 * y).unwrap()).unwrap(),
/// ])
/// .unwrap();
///
/// assert_eq!(f.symbol(), "['(x+y)' '(x-(2*y))']");
/// assert_eq!(f.value().to_vec(), vec![5.0, -4.0]);
/// let j = f.jacobian().unwrap();
/// assert_eq!(j.row(1).to_vec(), vec![1.0, -2.0]);
/// ```
#[derive(Clone, Debug)]
pub struct VectorFunction {
    functions: Vec<Node>,
}

impl VectorFunction {
    pub fn new(functions: Vec<Node>) -> Result<Self> {
        if functions.is_empty() {
            return Err(ADError::EmptyVectorFunction);
        }
        Ok(VectorFunction { functions })
    }

    pub fn functions(&self) -> &[Node] {
        &self.functions
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// The component symbols, rendered as a quoted, space-separated list.
    pub fn symbol(&self) -> String {
        let quoted: Vec<String> = self
            .functions
            .iter()
            .map(|f| format!("'{}'", f.symbol()))
            .collect();
        format!("[{}]", quoted.join(" "))
    }

    pub fn value(&self) -> Array1<f64> {
        self.functions.iter().map(Node::value).collect()
    }

    /// One row per component function, one column per free variable.
    ///
    /// Scalar derivatives are broadcast across the row; with no vector
    /// derivatives at all the Jacobian is a single column. Vector rows of
    /// differing length fail with [`ADError::ShapeMismatch`].
    pub fn jacobian(&self) -> Result<Array2<f64>> {
        let cols = self
            .functions
            .iter()
            .find_map(|f| f.derivative().dim())
            .unwrap_or(1);
        let mut jac = Array2::zeros((self.functions.len(), cols));
        for (mut row, f) in jac.rows_mut().into_iter().zip(&self.functions) {
            match f.derivative() {
                Derivative::Scalar(d) => row.fill(*d),
                Derivative::Vector(v) if v.len() == cols => row.assign(v),
                Derivative::Vector(v) => {
                    return Err(ADError::ShapeMismatch {
                        left: cols,
                        right: v.len(),
                    })
                }
            }
        }
        Ok(jac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use ndarray::array;

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(
            VectorFunction::new(Vec::new()),
            Err(ADError::EmptyVectorFunction)
        ));
    }

    #[test]
    fn scalar_to_vector_gives_a_column() {
        let s = Session::new();
        let x = s.node("x", 2, 1).unwrap();
        let f = VectorFunction::new(vec![x.sin().unwrap(), x.cos().unwrap(), x.exp().unwrap()])
            .unwrap();
        assert_eq!(f.symbol(), "['sin(x)' 'cos(x)' 'exp(x)']");
        let j = f.jacobian().unwrap();
        assert_eq!(j.dim(), (3, 1));
        assert_eq!(j.column(0).to_vec(), vec![2f64.cos(), -2f64.sin(), 2f64.exp()]);
    }

    #[test]
    fn constant_component_broadcasts_zero_row() {
        let s = Session::new();
        let xs = s.variables(&[("a", 1.0), ("b", 2.0)]).unwrap();
        let c = s.constant(7).unwrap();
        let f = VectorFunction::new(vec![xs[0].clone(), c]).unwrap();
        assert_eq!(f.jacobian().unwrap(), array![[1.0, 0.0], [0.0, 0.0]]);
    }

    #[test]
    fn rows_of_different_width_fail() {
        let s = Session::new();
        let a = s.seeded_node("a", 1.0, 1.0, vec![1.0, 0.0]).unwrap();
        let b = s.seeded_node("b", 1.0, 1.0, vec![0.0, 0.0, 1.0]).unwrap();
        let f = VectorFunction::new(vec![a, b]).unwrap();
        assert_eq!(
            f.jacobian().unwrap_err(),
            ADError::ShapeMismatch { left: 2, right: 3 }
        );
    }
}
