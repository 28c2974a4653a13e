//! Integer Matrix Reductions: Echelon, Kernel Bases, Smith Normal Form
//!
//! Everything here works by elementary integer operations only (swap,
//! negate, add an integer multiple of one row/column to another), so the
//! reductions stay exact. Entry growth is the price; every multiply and
//! add is checked and an overflow surfaces as [`TdaError::Overflow`]
//! rather than wrapping.
//!
//! ## Why column operations are logged
//!
//! Homology needs the image of ∂ₖ₊₁ expressed in a basis of ker ∂ₖ.
//! Bringing ∂ₖ to column echelon form multiplies it on the right by a
//! unimodular E; the zero columns of ∂ₖ·E name a lattice basis of the
//! kernel. Rewriting ∂ₖ₊₁ into that basis means multiplying it on the
//! left by E⁻¹, which is exactly the recorded column operations replayed
//! as inverse row operations, in order.

use ndarray::Array2;

use crate::error::TdaError;

/// One elementary column operation, recorded during echelon reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColOp {
    /// Exchange two columns.
    Swap(usize, usize),
    /// Multiply a column by −1.
    Negate(usize),
    /// `col[dst] += factor * col[src]`.
    AddMul { src: usize, dst: usize, factor: i64 },
}

fn swap_cols(m: &mut Array2<i64>, a: usize, b: usize) {
    if a == b {
        return;
    }
    for i in 0..m.nrows() {
        m.swap([i, a], [i, b]);
    }
}

fn swap_rows(m: &mut Array2<i64>, a: usize, b: usize) {
    if a == b {
        return;
    }
    for j in 0..m.ncols() {
        m.swap([a, j], [b, j]);
    }
}

fn negate_col(m: &mut Array2<i64>, c: usize) -> Result<(), TdaError> {
    for i in 0..m.nrows() {
        m[[i, c]] = m[[i, c]].checked_neg().ok_or(TdaError::Overflow)?;
    }
    Ok(())
}

fn negate_row(m: &mut Array2<i64>, r: usize) -> Result<(), TdaError> {
    for j in 0..m.ncols() {
        m[[r, j]] = m[[r, j]].checked_neg().ok_or(TdaError::Overflow)?;
    }
    Ok(())
}

/// `col[dst] += factor * col[src]`, checked.
fn col_addmul(m: &mut Array2<i64>, dst: usize, src: usize, factor: i64) -> Result<(), TdaError> {
    for i in 0..m.nrows() {
        let add = m[[i, src]].checked_mul(factor).ok_or(TdaError::Overflow)?;
        m[[i, dst]] = m[[i, dst]].checked_add(add).ok_or(TdaError::Overflow)?;
    }
    Ok(())
}

/// `row[dst] += factor * row[src]`, checked.
fn row_addmul(m: &mut Array2<i64>, dst: usize, src: usize, factor: i64) -> Result<(), TdaError> {
    for j in 0..m.ncols() {
        let add = m[[src, j]].checked_mul(factor).ok_or(TdaError::Overflow)?;
        m[[dst, j]] = m[[dst, j]].checked_add(add).ok_or(TdaError::Overflow)?;
    }
    Ok(())
}

fn nonzero_columns(m: &Array2<i64>) -> usize {
    (0..m.ncols())
        .filter(|&j| (0..m.nrows()).any(|i| m[[i, j]] != 0))
        .count()
}

/// Reduce `m` to column echelon form in place and return the operations
/// applied, in order.
///
/// After the call the nonzero columns come first, each with its topmost
/// nonzero entry positive and in a strictly lower row than the previous
/// column's; the remaining columns are zero. The operation log is the
/// change of basis needed by [`image_in_kernel`].
pub fn column_echelon(m: &mut Array2<i64>) -> Result<Vec<ColOp>, TdaError> {
    let (rows, cols) = m.dim();
    let mut ops = Vec::new();
    let mut next = 0usize;

    for r in 0..rows {
        if next == cols {
            break;
        }
        // Euclidean sweep: move the minimum-|entry| column to the pivot
        // slot and reduce the others modulo it, until row r carries at
        // most one nonzero among the active columns.
        loop {
            let mut min: Option<(usize, u64)> = None;
            for j in next..cols {
                let v = m[[r, j]].unsigned_abs();
                if v != 0 && min.map_or(true, |(_, best)| v < best) {
                    min = Some((j, v));
                }
            }
            let Some((jmin, _)) = min else { break };
            if jmin != next {
                swap_cols(m, jmin, next);
                ops.push(ColOp::Swap(jmin, next));
            }
            let pivot = m[[r, next]];
            let mut remainder = false;
            for j in next + 1..cols {
                let e = m[[r, j]];
                if e == 0 {
                    continue;
                }
                let q = e.checked_div(pivot).ok_or(TdaError::Overflow)?;
                if q != 0 {
                    col_addmul(m, j, next, -q)?;
                    ops.push(ColOp::AddMul { src: next, dst: j, factor: -q });
                }
                if m[[r, j]] != 0 {
                    remainder = true;
                }
            }
            if !remainder {
                break;
            }
        }
        if m[[r, next]] != 0 {
            if m[[r, next]] < 0 {
                negate_col(m, next)?;
                ops.push(ColOp::Negate(next));
            }
            next += 1;
        }
    }
    Ok(ops)
}

/// Rank of an integer matrix (number of nonzero echelon columns).
pub fn rank_int(m: &Array2<i64>) -> Result<usize, TdaError> {
    let mut work = m.clone();
    column_echelon(&mut work)?;
    Ok(nonzero_columns(&work))
}

/// Express the image of `b` in a lattice basis of the kernel of `a`.
///
/// `a` is ∂ₖ (rows = (k−1)-simplices, columns = k-simplices) and `b` is
/// ∂ₖ₊₁; the shapes must chain. The column operations that bring `a` to
/// echelon form are replayed on `b` as inverse row operations, after
/// which the rows of `b` sitting at the zero columns of the echelon `a`
/// are the image coordinates in the kernel basis.
pub fn image_in_kernel(a: &Array2<i64>, b: &Array2<i64>) -> Result<Array2<i64>, TdaError> {
    assert_eq!(
        a.ncols(),
        b.nrows(),
        "boundary shapes do not chain: a is {}x{}, b is {}x{}",
        a.nrows(),
        a.ncols(),
        b.nrows(),
        b.ncols()
    );

    let mut ech = a.clone();
    let ops = column_echelon(&mut ech)?;
    let rank = nonzero_columns(&ech);

    let mut coords = b.clone();
    for op in &ops {
        match *op {
            ColOp::Swap(i, j) => swap_rows(&mut coords, i, j),
            ColOp::Negate(i) => negate_row(&mut coords, i)?,
            // The column op was col[dst] += f*col[src]; its inverse acts on
            // rows as row[src] -= f*row[dst].
            ColOp::AddMul { src, dst, factor } => row_addmul(&mut coords, src, dst, -factor)?,
        }
    }

    // Rows paired with independent echelon columns carry no image when
    // ∂ₖ∘∂ₖ₊₁ = 0.
    debug_assert!(
        (0..rank).all(|i| (0..coords.ncols()).all(|j| coords[[i, j]] == 0)),
        "image of the higher boundary escapes the kernel"
    );

    let kernel_dim = a.ncols() - rank;
    let mut out = Array2::zeros((kernel_dim, b.ncols()));
    for (i, row) in (rank..a.ncols()).enumerate() {
        for j in 0..b.ncols() {
            out[[i, j]] = coords[[row, j]];
        }
    }
    Ok(out)
}

/// Smith Normal Form diagonal of an integer matrix.
///
/// Returns `min(rows, cols)` non-negative entries d₁ | d₂ | … | d_r
/// followed by zeros. A 1 is the trivial factor, k > 1 stands for ℤ/kℤ
/// and 0 for a free ℤ summand.
pub fn smith_normal_form(m: &Array2<i64>) -> Result<Vec<i64>, TdaError> {
    let mut w = m.clone();
    let (rows, cols) = w.dim();
    let n = rows.min(cols);
    let mut diag = vec![0i64; n];

    let mut t = 0;
    while t < n {
        // Pivot of minimum absolute value in the trailing submatrix.
        let mut pivot: Option<(usize, usize, u64)> = None;
        for i in t..rows {
            for j in t..cols {
                let v = w[[i, j]].unsigned_abs();
                if v != 0 && pivot.map_or(true, |(_, _, best)| v < best) {
                    pivot = Some((i, j, v));
                }
            }
        }
        let Some((pi, pj, _)) = pivot else { break };
        swap_rows(&mut w, pi, t);
        swap_cols(&mut w, pj, t);

        // Clear the pivot column and row by division with remainder. Any
        // remainder is strictly smaller than the pivot, so re-picking the
        // minimum terminates.
        let mut dirty = false;
        for i in t + 1..rows {
            let e = w[[i, t]];
            if e == 0 {
                continue;
            }
            let q = e.checked_div(w[[t, t]]).ok_or(TdaError::Overflow)?;
            if q != 0 {
                row_addmul(&mut w, i, t, -q)?;
            }
            if w[[i, t]] != 0 {
                dirty = true;
            }
        }
        for j in t + 1..cols {
            let e = w[[t, j]];
            if e == 0 {
                continue;
            }
            let q = e.checked_div(w[[t, t]]).ok_or(TdaError::Overflow)?;
            if q != 0 {
                col_addmul(&mut w, j, t, -q)?;
            }
            if w[[t, j]] != 0 {
                dirty = true;
            }
        }
        if dirty {
            continue;
        }

        // Divisibility: d_t must divide everything that follows. Folding
        // an offending row into the pivot row makes the next clearing
        // pass produce gcd(d_t, offender), strictly smaller.
        let d = w[[t, t]];
        let mut offender = None;
        'scan: for i in t + 1..rows {
            for j in t + 1..cols {
                if w[[i, j]].checked_rem(d).is_some_and(|r| r != 0) {
                    offender = Some(i);
                    break 'scan;
                }
            }
        }
        if let Some(i) = offender {
            row_addmul(&mut w, t, i, 1)?;
            continue;
        }

        diag[t] = d.checked_abs().ok_or(TdaError::Overflow)?;
        t += 1;
    }
    Ok(diag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn snf_two_by_two() {
        let m = array![[2i64, 4], [6, 8]];
        assert_eq!(smith_normal_form(&m).unwrap(), vec![2, 4]);
    }

    #[test]
    fn snf_needs_divisibility_fix() {
        // diag(2, 3) is not in normal form; the invariant factors are 1, 6.
        let m = array![[2i64, 0], [0, 3]];
        assert_eq!(smith_normal_form(&m).unwrap(), vec![1, 6]);
    }

    #[test]
    fn snf_rectangular() {
        let m = array![[1i64, 2, 3], [4, 5, 6]];
        // gcd of entries is 1; gcd of 2x2 minors is 3.
        assert_eq!(smith_normal_form(&m).unwrap(), vec![1, 3]);
    }

    #[test]
    fn snf_zero_and_identity() {
        assert_eq!(smith_normal_form(&Array2::zeros((3, 2))).unwrap(), vec![0, 0]);
        assert_eq!(smith_normal_form(&Array2::eye(3)).unwrap(), vec![1, 1, 1]);
        assert_eq!(smith_normal_form(&Array2::zeros((0, 5))).unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn snf_negative_entries() {
        let m = array![[-2i64, 0], [0, -4]];
        assert_eq!(smith_normal_form(&m).unwrap(), vec![2, 4]);
    }

    #[test]
    fn rank_counts_independent_columns() {
        let m = array![[1i64, 0, 1], [0, 1, 1], [1, 1, 2]];
        // Third column is the sum of the first two.
        assert_eq!(rank_int(&m).unwrap(), 2);
        assert_eq!(rank_int(&Array2::zeros((4, 4))).unwrap(), 0);
        assert_eq!(rank_int(&Array2::<i64>::eye(4)).unwrap(), 4);
    }

    #[test]
    fn echelon_orders_pivots() {
        let mut m = array![[0i64, 2], [3, 1]];
        column_echelon(&mut m).unwrap();
        // Column 0 must own the topmost pivot, positive.
        assert!(m[[0, 0]] > 0);
        assert_eq!(m[[0, 1]], 0);
    }

    #[test]
    fn echelon_ops_replay_reproduces_reduction() {
        let orig = array![[2i64, 4, 6], [1, 3, 5], [0, 2, 4]];
        let mut ech = orig.clone();
        let ops = column_echelon(&mut ech).unwrap();
        // Replaying the log on a fresh copy must land on the same matrix.
        let mut replay = orig.clone();
        for op in &ops {
            match *op {
                ColOp::Swap(a, b) => swap_cols(&mut replay, a, b),
                ColOp::Negate(c) => negate_col(&mut replay, c).unwrap(),
                ColOp::AddMul { src, dst, factor } => {
                    col_addmul(&mut replay, dst, src, factor).unwrap()
                }
            }
        }
        assert_eq!(replay, ech);
    }

    #[test]
    fn image_in_kernel_filled_triangle() {
        // ∂₁ and ∂₂ of a filled triangle: the boundary of the 2-simplex
        // generates the whole cycle lattice, so the quotient is trivial.
        let d1 = array![[0i64, -1, -1], [-1, 0, 1], [1, 1, 0]];
        let d2 = array![[1i64], [-1], [1]];
        let img = image_in_kernel(&d1, &d2).unwrap();
        assert_eq!(img.dim(), (1, 1));
        assert_eq!(smith_normal_form(&img).unwrap(), vec![1]);
    }

    #[test]
    fn image_in_kernel_empty_boundary() {
        // With no 2-simplices the image is the zero submodule of a
        // 2-dimensional kernel.
        let d1 = array![[0i64, -1, -1, -1], [-1, 0, 1, 0], [1, 1, 0, 1]];
        let d2 = Array2::zeros((4, 0));
        let img = image_in_kernel(&d1, &d2).unwrap();
        assert_eq!(img.dim(), (2, 0));
    }

    #[test]
    fn overflow_is_reported() {
        let m = array![[i64::MAX, 1], [1, i64::MAX]];
        assert_eq!(smith_normal_form(&m), Err(TdaError::Overflow));
    }
}
