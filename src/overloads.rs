//! `std::ops` sugar over the fallible combinators.
//!
//! Every operator yields `Result<Node>`; chain with `?`.

use std::ops::*;

use crate::errors::Result;
use crate::node::Node;

macro_rules! impl_bin_ops_node {
    ($Lhs:ty, $Rhs:ty) => {
        impl Add<$Rhs> for $Lhs {
            type Output = Result<Node>;
            fn add(self, rhs: $Rhs) -> Self::Output {
                self.try_add(rhs)
            }
        }
        impl Sub<$Rhs> for $Lhs {
            type Output = Result<Node>;
            fn sub(self, rhs: $Rhs) -> Self::Output {
                self.try_sub(rhs)
            }
        }
        impl Mul<$Rhs> for $Lhs {
            type Output = Result<Node>;
            fn mul(self, rhs: $Rhs) -> Self::Output {
                self.try_mul(rhs)
            }
        }
        impl Div<$Rhs> for $Lhs {
            type Output = Result<Node>;
            fn div(self, rhs: $Rhs) -> Self::Output {
                self.try_div(rhs)
            }
        }
    };
}

impl_bin_ops_node!(&Node, &Node);
impl_bin_ops_node!(&Node, Node);
impl_bin_ops_node!(Node, &Node);
impl_bin_ops_node!(Node, Node);

macro_rules! impl_bin_ops_literal {
    ($($lit:ty),*) => {
        $(
            impl_bin_ops_node!(&Node, $lit);
            impl_bin_ops_node!(Node, $lit);

            /* literal on the left ------------------------------------ */
            impl Add<&Node> for $lit {
                type Output = Result<Node>;
                fn add(self, rhs: &Node) -> Self::Output {
                    rhs.try_radd(self)
                }
            }
            impl Add<Node> for $lit {
                type Output = Result<Node>;
                fn add(self, rhs: Node) -> Self::Output {
                    rhs.try_radd(self)
                }
            }
            impl Sub<&Node> for $lit {
                type Output = Result<Node>;
                fn sub(self, rhs: &Node) -> Self::Output {
                    rhs.try_rsub(self)
                }
            }
            impl Sub<Node> for $lit {
                type Output = Result<Node>;
                fn sub(self, rhs: Node) -> Self::Output {
                    rhs.try_rsub(self)
                }
            }
            impl Mul<&Node> for $lit {
                type Output = Result<Node>;
                fn mul(self, rhs: &Node) -> Self::Output {
                    rhs.try_rmul(self)
                }
            }
            impl Mul<Node> for $lit {
                type Output = Result<Node>;
                fn mul(self, rhs: Node) -> Self::Output {
                    rhs.try_rmul(self)
                }
            }
            impl Div<&Node> for $lit {
                type Output = Result<Node>;
                fn div(self, rhs: &Node) -> Self::Output {
                    rhs.try_rdiv(self)
                }
            }
            impl Div<Node> for $lit {
                type Output = Result<Node>;
                fn div(self, rhs: Node) -> Self::Output {
                    rhs.try_rdiv(self)
                }
            }
        )*
    };
}

impl_bin_ops_literal!(f64, i32, i64);

impl Neg for &Node {
    type Output = Result<Node>;
    fn neg(self) -> Self::Output {
        self.try_neg()
    }
}

impl Neg for Node {
    type Output = Result<Node>;
    fn neg(self) -> Self::Output {
        self.try_neg()
    }
}

#[cfg(test)]
mod tests {
    use crate::derivative::Derivative;
    use crate::errors::Result;
    use crate::session::Session;

    #[test]
    fn operators_chain_with_question_mark() -> Result<()> {
        let s = Session::new();
        let x = s.node("x", 2, 1)?;
        let y = s.node("y", 3, 1)?;
        let f = ((&x + &y)? - (2i32 * &y)?)?;
        assert_eq!(f.symbol(), "((x+y)-(2*y))");
        assert_eq!(f.value(), -1.0);
        assert_eq!(f.derivative(), &Derivative::Scalar(0.0));
        Ok(())
    }

    #[test]
    fn literal_on_either_side() -> Result<()> {
        let s = Session::new();
        let x = s.node("x", 4.0, 1.0)?;
        assert_eq!((&x / 2.0)?.symbol(), "(x/2.0)");
        assert_eq!((2.0 / &x)?.symbol(), "(2.0/x)");
        assert_eq!((1i32 - &x)?.value(), -3.0);
        assert_eq!((-&x)?.symbol(), "-x");
        assert_eq!((x.clone() * 3i64)?.symbol(), "(3*x)");
        Ok(())
    }
}
