//! Simplicial Homology: Integer Groups and 𝔽₂ Betti Numbers
//!
//! Two code paths with very different costs:
//!
//! - `homology_int` computes H_k(·; ℤ) exactly, torsion included, by
//!   expressing im ∂ₖ₊₁ in a lattice basis of ker ∂ₖ and reading the
//!   Smith Normal Form diagonal of the result.
//! - `homology_bool` computes only the Betti numbers over 𝔽₂ from the
//!   ranks of the boundary matrices: βₖ = #k-simplices − rₖ − rₖ₊₁.
//!   On large complexes this is dramatically cheaper and is the path to
//!   prefer when torsion does not matter.
//!
//! The per-dimension computations are independent; with
//! `TdaOptions::parallel` they run on the rayon pool. Outputs do not
//! depend on the degree of parallelism.

use ndarray::Array2;
use rayon::prelude::*;

use crate::complex::{boundary_operators_bool, boundary_operators_int, SimplicialComplex};
use crate::config::TdaOptions;
use crate::error::TdaError;
use crate::matrix::{image_in_kernel, smith_normal_form};

/// H_k as a list of cyclic orders: each entry > 1 is a ℤ/kℤ summand,
/// each 0 a free ℤ summand. Trivial factors are dropped.
fn cyclic_orders(
    sc: &SimplicialComplex,
    bounds: &[Array2<i64>],
    k: usize,
) -> Result<Vec<i64>, TdaError> {
    let dim = sc.dim();
    // ∂₀ and ∂_{dim+1} are the empty maps; feeding them through the same
    // kernel/image machinery reproduces the end-of-chain special cases.
    let low_zero;
    let a = if k == 0 {
        low_zero = Array2::zeros((0, sc.layer_size(0)));
        &low_zero
    } else {
        &bounds[k - 1]
    };
    let high_zero;
    let b = if k == dim {
        high_zero = Array2::zeros((sc.layer_size(k), 0));
        &high_zero
    } else {
        &bounds[k]
    };

    let img = image_in_kernel(a, b)?;
    let kernel_dim = img.nrows();
    let diag = smith_normal_form(&img)?;
    let rank = diag.iter().filter(|&&d| d != 0).count();

    let mut orders: Vec<i64> = diag.into_iter().filter(|&d| d > 1).collect();
    orders.extend(std::iter::repeat(0).take(kernel_dim - rank));
    Ok(orders)
}

/// Integer homology of every dimension, serial, default options.
pub fn homology_int(sc: &SimplicialComplex) -> Result<Vec<Vec<i64>>, TdaError> {
    homology_int_with(sc, &TdaOptions::default())
}

/// Integer homology H_0 … H_dim as lists of cyclic orders.
pub fn homology_int_with(
    sc: &SimplicialComplex,
    opts: &TdaOptions,
) -> Result<Vec<Vec<i64>>, TdaError> {
    let bounds = boundary_operators_int(sc);
    let ks: Vec<usize> = (0..=sc.dim()).collect();
    if opts.parallel {
        ks.par_iter().map(|&k| cyclic_orders(sc, &bounds, k)).collect()
    } else {
        ks.iter().map(|&k| cyclic_orders(sc, &bounds, k)).collect()
    }
}

/// Betti numbers over 𝔽₂, serial, default options.
pub fn homology_bool(sc: &SimplicialComplex) -> Vec<usize> {
    homology_bool_with(sc, &TdaOptions::default())
}

/// Betti numbers β_0 … β_dim over 𝔽₂ from boundary ranks.
pub fn homology_bool_with(sc: &SimplicialComplex, opts: &TdaOptions) -> Vec<usize> {
    let bounds = boundary_operators_bool(sc);
    let ranks: Vec<usize> = if opts.parallel {
        bounds.par_iter().map(|m| m.rank()).collect()
    } else {
        bounds.iter().map(|m| m.rank()).collect()
    };
    let rank_of = |k: usize| {
        if k == 0 || k > sc.dim() {
            0
        } else {
            ranks[k - 1]
        }
    };
    (0..=sc.dim())
        .map(|k| sc.layer_size(k) - rank_of(k) - rank_of(k + 1))
        .collect()
}
