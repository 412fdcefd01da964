// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! `+ - * /` and unary minus for symbolic functions and plain numbers.
//! Every operator only builds a node: `&f + 1.0`, `2.0 * f`, `f / g` ...
use crate::taylor::symbolic_function::{Operand, SymbolicFunction};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// all owned/borrowed combinations of function ⊕ function and function ⊕ f64
macro_rules! symbolic_binop {
    ($imp:ident, $method:ident, $build:path) => {
        impl $imp<SymbolicFunction> for SymbolicFunction {
            type Output = SymbolicFunction;
            fn $method(self, rhs: SymbolicFunction) -> SymbolicFunction {
                $build(Operand::from(self), Operand::from(rhs))
            }
        }
        impl $imp<&SymbolicFunction> for SymbolicFunction {
            type Output = SymbolicFunction;
            fn $method(self, rhs: &SymbolicFunction) -> SymbolicFunction {
                $build(Operand::from(self), Operand::from(rhs))
            }
        }
        impl $imp<SymbolicFunction> for &SymbolicFunction {
            type Output = SymbolicFunction;
            fn $method(self, rhs: SymbolicFunction) -> SymbolicFunction {
                $build(Operand::from(self), Operand::from(rhs))
            }
        }
        impl $imp<&SymbolicFunction> for &SymbolicFunction {
            type Output = SymbolicFunction;
            fn $method(self, rhs: &SymbolicFunction) -> SymbolicFunction {
                $build(Operand::from(self), Operand::from(rhs))
            }
        }
        impl $imp<f64> for SymbolicFunction {
            type Output = SymbolicFunction;
            fn $method(self, rhs: f64) -> SymbolicFunction {
                $build(Operand::from(self), Operand::Scalar(rhs))
            }
        }
        impl $imp<f64> for &SymbolicFunction {
            type Output = SymbolicFunction;
            fn $method(self, rhs: f64) -> SymbolicFunction {
                $build(Operand::from(self), Operand::Scalar(rhs))
            }
        }
        impl $imp<SymbolicFunction> for f64 {
            type Output = SymbolicFunction;
            fn $method(self, rhs: SymbolicFunction) -> SymbolicFunction {
                $build(Operand::Scalar(self), Operand::from(rhs))
            }
        }
        impl $imp<&SymbolicFunction> for f64 {
            type Output = SymbolicFunction;
            fn $method(self, rhs: &SymbolicFunction) -> SymbolicFunction {
                $build(Operand::Scalar(self), Operand::from(rhs))
            }
        }
    };
}

symbolic_binop!(Add, add, SymbolicFunction::added);
symbolic_binop!(Sub, sub, SymbolicFunction::subtracted);
symbolic_binop!(Mul, mul, SymbolicFunction::multiplied);
// f / g = f * reciprocal(g); panics on division by the number 0.0
symbolic_binop!(Div, div, SymbolicFunction::divided);

impl Neg for SymbolicFunction {
    type Output = SymbolicFunction;

    fn neg(self) -> SymbolicFunction {
        SymbolicFunction::multiplied(Operand::Scalar(-1.0), Operand::from(self))
    }
}

impl Neg for &SymbolicFunction {
    type Output = SymbolicFunction;

    fn neg(self) -> SymbolicFunction {
        SymbolicFunction::multiplied(Operand::Scalar(-1.0), Operand::from(self))
    }
}
