//! Matrix Kernel: Dense Linear Algebra over ℤ and 𝔽₂
//!
//! Both boundary-operator fields use the same rectangular row-major
//! layout. Over 𝔽₂ rows are bit-packed into `u64` words and elimination
//! is word-wise XOR. Over ℤ the entries live in an `Array2<i64>` and all
//! elimination is by elementary integer operations (swap, negate, add an
//! integer multiple), so no fractions ever appear.
//!
//! The integer side additionally records the column operations that bring
//! a matrix to column echelon form, because homology needs to replay them
//! as inverse row operations on the next boundary (`image_in_kernel`).

mod bool_matrix;
mod int_matrix;

pub use bool_matrix::BitMatrix;
pub use int_matrix::{column_echelon, image_in_kernel, rank_int, smith_normal_form, ColOp};
