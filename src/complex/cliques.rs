//! Maximal Clique Enumeration
//!
//! Bron–Kerbosch with pivoting over an adjacency predicate. The
//! Vietoris–Rips builder feeds it the thresholded distance graph; every
//! maximal clique becomes a top simplex of the complex.
//!
//! Contract: every maximal clique is returned exactly once (isolated
//! vertices show up as singletons); the order is unspecified.

/// Enumerate all maximal cliques of the graph on `[0, n_verts)` whose
/// edges are given by the symmetric predicate `adj`.
pub fn maximal_cliques(n_verts: usize, adj: impl Fn(usize, usize) -> bool) -> Vec<Vec<usize>> {
    if n_verts == 0 {
        return Vec::new();
    }
    // Materialize sorted neighbor lists once; the predicate may be an
    // arbitrary metric evaluation.
    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n_verts];
    for i in 0..n_verts {
        for j in i + 1..n_verts {
            if adj(i, j) {
                neighbors[i].push(j);
                neighbors[j].push(i);
            }
        }
    }

    let mut out = Vec::new();
    let mut current = Vec::new();
    let candidates: Vec<usize> = (0..n_verts).collect();
    expand(&neighbors, &mut current, candidates, Vec::new(), &mut out);
    out
}

fn is_neighbor(neighbors: &[Vec<usize>], u: usize, v: usize) -> bool {
    neighbors[u].binary_search(&v).is_ok()
}

fn expand(
    neighbors: &[Vec<usize>],
    current: &mut Vec<usize>,
    mut candidates: Vec<usize>,
    mut excluded: Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if candidates.is_empty() && excluded.is_empty() {
        let mut clique = current.clone();
        clique.sort_unstable();
        out.push(clique);
        return;
    }

    // Pivot on the vertex covering the most candidates; only vertices it
    // misses need their own branch.
    let pivot = candidates
        .iter()
        .chain(excluded.iter())
        .copied()
        .max_by_key(|&u| candidates.iter().filter(|&&v| is_neighbor(neighbors, u, v)).count())
        .expect("candidate or excluded set is non-empty");

    let branches: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&v| !is_neighbor(neighbors, pivot, v))
        .collect();

    for v in branches {
        current.push(v);
        let next_candidates = candidates
            .iter()
            .copied()
            .filter(|&u| is_neighbor(neighbors, v, u))
            .collect();
        let next_excluded = excluded
            .iter()
            .copied()
            .filter(|&u| is_neighbor(neighbors, v, u))
            .collect();
        expand(neighbors, current, next_candidates, next_excluded, out);
        current.pop();
        candidates.retain(|&u| u != v);
        excluded.push(v);
    }
}
