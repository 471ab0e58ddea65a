//! Linear algebra: tensordot-style contraction, matmul and 2-D transpose.

pub mod matmul;
pub mod transpose;

pub use matmul::{contract_op, matmul_op};
pub use transpose::transpose_op;
