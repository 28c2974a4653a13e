//! Vietoris–Rips Complex Construction
//!
//! The Vietoris–Rips complex at scale s contains a simplex for every
//! vertex set with all pairwise distances strictly below s. Rather than
//! enumerating simplices dimension by dimension, the builder thresholds
//! the distance graph, asks Bron–Kerbosch for its maximal cliques, and
//! closes them downward; every clique face is again a clique.
//!
//! Strict `<` is the edge predicate throughout the library.

use ndarray::Array2;

use crate::complex::{maximal_cliques, SimplicialComplex};
use crate::config::TdaOptions;
use crate::error::TdaError;

/// A complete weighted graph caching all pairwise distances.
///
/// This is the "fast" representation: O(N²) memory, one metric
/// evaluation per pair ever.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    weights: Array2<f64>,
}

impl WeightedGraph {
    /// Evaluate the metric on every pair. A NaN distance is a user error.
    pub fn from_points<T, M>(metric: M, points: &[T]) -> Result<Self, TdaError>
    where
        M: Fn(&T, &T) -> f64,
    {
        let n = points.len();
        let mut weights = Array2::zeros((n, n));
        for i in 0..n {
            for j in i + 1..n {
                let d = metric(&points[i], &points[j]);
                if d.is_nan() {
                    return Err(TdaError::NonMetricDistance { i, j });
                }
                weights[[i, j]] = d;
                weights[[j, i]] = d;
            }
        }
        Ok(Self { weights })
    }

    pub fn n_vertices(&self) -> usize {
        self.weights.nrows()
    }

    /// Cached distance between vertices i and j.
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[[i, j]]
    }
}

/// Euclidean distance between two coordinate slices.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "points live in different dimensions");
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Build the Vietoris–Rips complex at `scale` with default options.
pub fn vr_complex<T, M>(scale: f64, metric: M, points: &[T]) -> Result<SimplicialComplex, TdaError>
where
    M: Fn(&T, &T) -> f64,
{
    vr_complex_with(scale, metric, points, &TdaOptions::default())
}

/// Build the Vietoris–Rips complex at `scale`.
///
/// An empty point set yields the empty complex; that is not an error.
pub fn vr_complex_with<T, M>(
    scale: f64,
    metric: M,
    points: &[T],
    opts: &TdaOptions,
) -> Result<SimplicialComplex, TdaError>
where
    M: Fn(&T, &T) -> f64,
{
    let n = points.len();
    if n == 0 {
        return Ok(SimplicialComplex::empty(0));
    }

    if opts.cache_distances {
        let graph = WeightedGraph::from_points(metric, points)?;
        return Ok(vr_complex_from_graph(scale, &graph));
    }

    // Light path: evaluate the metric once per pair into a bit of
    // adjacency, never storing the distances themselves.
    let mut adjacent = vec![false; n * n];
    for i in 0..n {
        for j in i + 1..n {
            let d = metric(&points[i], &points[j]);
            if d.is_nan() {
                return Err(TdaError::NonMetricDistance { i, j });
            }
            if d < scale {
                adjacent[i * n + j] = true;
                adjacent[j * n + i] = true;
            }
        }
    }
    let cliques = maximal_cliques(n, |i, j| adjacent[i * n + j]);
    Ok(SimplicialComplex::from_maximal(n, &cliques))
}

/// Vietoris–Rips complex at `scale` over an already-cached graph.
pub fn vr_complex_from_graph(scale: f64, graph: &WeightedGraph) -> SimplicialComplex {
    let n = graph.n_vertices();
    let cliques = maximal_cliques(n, |i, j| graph.weight(i, j) < scale);
    SimplicialComplex::from_maximal(n, &cliques)
}
