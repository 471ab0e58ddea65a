//! Operator overloads for [`Scalar`].
//!
//! `+`, `-`, `*` and unary `-` cannot leave their domain and return a `Scalar` directly.
//! `/` can (division by zero) and returns `Result<Scalar, MesogradError>`. Literal `f64`
//! operands are wrapped as constant leaves.

use super::{Scalar, ScalarOp};
use crate::error::MesogradError;
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_infallible_binary {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait<&Scalar> for &Scalar {
            type Output = Scalar;
            fn $method(self, rhs: &Scalar) -> Scalar {
                Scalar::record($op, vec![self.clone(), rhs.clone()])
            }
        }

        impl $trait<Scalar> for Scalar {
            type Output = Scalar;
            fn $method(self, rhs: Scalar) -> Scalar {
                Scalar::record($op, vec![self, rhs])
            }
        }

        impl $trait<&Scalar> for Scalar {
            type Output = Scalar;
            fn $method(self, rhs: &Scalar) -> Scalar {
                Scalar::record($op, vec![self, rhs.clone()])
            }
        }

        impl $trait<Scalar> for &Scalar {
            type Output = Scalar;
            fn $method(self, rhs: Scalar) -> Scalar {
                Scalar::record($op, vec![self.clone(), rhs])
            }
        }

        impl $trait<f64> for &Scalar {
            type Output = Scalar;
            fn $method(self, rhs: f64) -> Scalar {
                Scalar::record($op, vec![self.clone(), Scalar::constant(rhs)])
            }
        }

        impl $trait<f64> for Scalar {
            type Output = Scalar;
            fn $method(self, rhs: f64) -> Scalar {
                Scalar::record($op, vec![self, Scalar::constant(rhs)])
            }
        }

        impl $trait<&Scalar> for f64 {
            type Output = Scalar;
            fn $method(self, rhs: &Scalar) -> Scalar {
                Scalar::record($op, vec![Scalar::constant(self), rhs.clone()])
            }
        }

        impl $trait<Scalar> for f64 {
            type Output = Scalar;
            fn $method(self, rhs: Scalar) -> Scalar {
                Scalar::record($op, vec![Scalar::constant(self), rhs])
            }
        }
    };
}

impl_infallible_binary!(Add, add, ScalarOp::Add);
impl_infallible_binary!(Sub, sub, ScalarOp::Sub);
impl_infallible_binary!(Mul, mul, ScalarOp::Mul);

impl Neg for &Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar::record(ScalarOp::Neg, vec![self.clone()])
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar::record(ScalarOp::Neg, vec![self])
    }
}

macro_rules! impl_div {
    ($lhs:ty, $rhs:ty, |$a:ident, $b:ident| $parents:expr) => {
        impl Div<$rhs> for $lhs {
            type Output = Result<Scalar, MesogradError>;
            fn div(self, rhs: $rhs) -> Self::Output {
                let ($a, $b) = (self, rhs);
                Scalar::apply(ScalarOp::Div, $parents)
            }
        }
    };
}

impl_div!(&Scalar, &Scalar, |a, b| vec![a.clone(), b.clone()]);
impl_div!(Scalar, Scalar, |a, b| vec![a, b]);
impl_div!(Scalar, &Scalar, |a, b| vec![a, b.clone()]);
impl_div!(&Scalar, Scalar, |a, b| vec![a.clone(), b]);
impl_div!(&Scalar, f64, |a, b| vec![a.clone(), Scalar::constant(b)]);
impl_div!(Scalar, f64, |a, b| vec![a, Scalar::constant(b)]);
impl_div!(f64, &Scalar, |a, b| vec![Scalar::constant(a), b.clone()]);
impl_div!(f64, Scalar, |a, b| vec![Scalar::constant(a), b]);
