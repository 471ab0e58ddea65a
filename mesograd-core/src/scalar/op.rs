use crate::activation::Activation;
use crate::error::MesogradError;
use crate::numeric::{check_domain, check_finite, pow_domain};
use std::fmt;

/// The primitive that produced a scalar node, with any parameter its gradient rule needs.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarOp {
    Leaf,
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    /// `a ** exponent` with a constant exponent.
    Pow { exponent: f64 },
    Exp,
    Ln,
    Sqrt,
    Activation(Activation),
}

impl ScalarOp {
    pub fn arity(&self) -> usize {
        match self {
            ScalarOp::Leaf => 0,
            ScalarOp::Add | ScalarOp::Sub | ScalarOp::Mul | ScalarOp::Div => 2,
            _ => 1,
        }
    }

    /// Forward rule, without domain checks.
    pub(crate) fn eval(&self, inputs: &[f64]) -> f64 {
        match self {
            ScalarOp::Leaf => inputs.first().copied().unwrap_or(0.0),
            ScalarOp::Add => inputs[0] + inputs[1],
            ScalarOp::Sub => inputs[0] - inputs[1],
            ScalarOp::Mul => inputs[0] * inputs[1],
            ScalarOp::Div => inputs[0] / inputs[1],
            ScalarOp::Neg => -inputs[0],
            ScalarOp::Pow { exponent } => inputs[0].powf(*exponent),
            ScalarOp::Exp => inputs[0].exp(),
            ScalarOp::Ln => inputs[0].ln(),
            ScalarOp::Sqrt => inputs[0].sqrt(),
            ScalarOp::Activation(act) => act.apply(inputs[0]),
        }
    }

    /// Forward rule with the domain checks of division, power, logarithm, square root and
    /// exponential.
    pub(crate) fn eval_checked(&self, inputs: &[f64]) -> Result<f64, MesogradError> {
        let name = self.kernel_name();
        match self {
            ScalarOp::Div => check_domain(name, inputs[1], |b| b != 0.0)?,
            ScalarOp::Pow { exponent } => {
                check_domain(name, inputs[0], |a| pow_domain(a, *exponent))?
            }
            ScalarOp::Ln => check_domain(name, inputs[0], |a| a > 0.0)?,
            ScalarOp::Sqrt => check_domain(name, inputs[0], |a| a >= 0.0)?,
            _ => {}
        }
        let output = self.eval(inputs);
        let reported = match self {
            ScalarOp::Div => inputs[1],
            _ => inputs.first().copied().unwrap_or(output),
        };
        check_finite(name, reported, output)
    }

    /// Operation name reported by domain errors, shared with the tensor kernels.
    fn kernel_name(&self) -> &'static str {
        match self {
            ScalarOp::Leaf => "leaf",
            ScalarOp::Add => "add",
            ScalarOp::Sub => "sub",
            ScalarOp::Mul => "mul",
            ScalarOp::Div => "div",
            ScalarOp::Neg => "neg",
            ScalarOp::Pow { .. } => "pow",
            ScalarOp::Exp => "exp",
            ScalarOp::Ln => "ln",
            ScalarOp::Sqrt => "sqrt",
            ScalarOp::Activation(_) => "activation",
        }
    }

    /// Vector-Jacobian product: the contribution of `grad` (the output's gradient) to each
    /// operand's gradient, in operand order.
    pub(crate) fn local_gradients(&self, inputs: &[f64], output: f64, grad: f64) -> Vec<f64> {
        match self {
            ScalarOp::Leaf => Vec::new(),
            ScalarOp::Add => vec![grad, grad],
            ScalarOp::Sub => vec![grad, -grad],
            ScalarOp::Mul => vec![grad * inputs[1], grad * inputs[0]],
            ScalarOp::Div => {
                let (a, b) = (inputs[0], inputs[1]);
                vec![grad / b, -grad * a / (b * b)]
            }
            ScalarOp::Neg => vec![-grad],
            ScalarOp::Pow { exponent } => {
                if *exponent == 0.0 {
                    vec![0.0]
                } else {
                    vec![grad * exponent * inputs[0].powf(exponent - 1.0)]
                }
            }
            ScalarOp::Exp => vec![grad * output],
            ScalarOp::Ln => vec![grad / inputs[0]],
            ScalarOp::Sqrt => vec![grad / (2.0 * output)],
            ScalarOp::Activation(act) => vec![grad * act.derivative(inputs[0], output)],
        }
    }
}

impl fmt::Display for ScalarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarOp::Leaf => write!(f, "Leaf"),
            ScalarOp::Add => write!(f, "Add"),
            ScalarOp::Sub => write!(f, "Sub"),
            ScalarOp::Mul => write!(f, "Mul"),
            ScalarOp::Div => write!(f, "Div"),
            ScalarOp::Neg => write!(f, "Neg"),
            ScalarOp::Pow { exponent } => write!(f, "Pow[{}]", exponent),
            ScalarOp::Exp => write!(f, "Exp"),
            ScalarOp::Ln => write!(f, "Ln"),
            ScalarOp::Sqrt => write!(f, "Sqrt"),
            ScalarOp::Activation(act) => write!(f, "{}", act),
        }
    }
}
