//! Vietoris–Rips Filtrations
//!
//! A filtration indexes every simplex of the complex built at the
//! *largest* scale with the step at which it first appears: index 0 is
//! the finest complex (smallest scale), index m−1 the coarsest. A
//! simplex enters as soon as all of its edges are shorter than the
//! current scale, so its index is the number of scales that still
//! exclude its longest edge.
//!
//! After indexing, every layer is sorted by index (stably, so ties keep
//! their construction order) and all face links are rewritten to the
//! post-sort positions; the persistence engine consumes layers in
//! exactly this normalized form.

use crate::complex::{
    vr_complex_from_graph, vr_complex_with, SimplicialComplex, WeightedGraph,
};
use crate::config::TdaOptions;
use crate::error::TdaError;

/// A simplex annotated with the filtration step at which it enters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredSimplex {
    pub idx: usize,
    pub verts: Vec<usize>,
    pub faces: Vec<usize>,
}

/// A filtered complex, in one of the two supported shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filtration {
    /// All vertices are present from step 0 and stay implicit;
    /// `layers[0]` holds the edges.
    Simple {
        n_vertices: usize,
        layers: Vec<Vec<FilteredSimplex>>,
    },
    /// `layers[0]` is an explicit vertex layer (empty `verts`/`faces`),
    /// so vertices may enter at any step. Edge `verts` refer to
    /// positions in that layer.
    General { layers: Vec<Vec<FilteredSimplex>> },
}

impl Filtration {
    pub fn n_vertices(&self) -> usize {
        match self {
            Filtration::Simple { n_vertices, .. } => *n_vertices,
            Filtration::General { layers } => layers.first().map_or(0, Vec::len),
        }
    }

    /// Entry step of vertex `v`.
    pub fn vertex_idx(&self, v: usize) -> usize {
        match self {
            Filtration::Simple { .. } => 0,
            Filtration::General { layers } => layers[0][v].idx,
        }
    }

    /// The layers of dimension ≥ 1, edges first.
    pub fn simplex_layers(&self) -> &[Vec<FilteredSimplex>] {
        match self {
            Filtration::Simple { layers, .. } => layers,
            Filtration::General { layers } => {
                if layers.is_empty() {
                    &[]
                } else {
                    &layers[1..]
                }
            }
        }
    }

    /// Highest simplex dimension present.
    pub fn dim(&self) -> usize {
        self.simplex_layers().len()
    }

    /// Check the ordering invariants, aborting on the first violation.
    pub fn validate(&self) {
        let n = self.n_vertices();
        if let Filtration::General { layers } = self {
            if let Some(verts) = layers.first() {
                for v in verts {
                    assert!(
                        v.verts.is_empty() && v.faces.is_empty(),
                        "vertex layer entries must carry no links"
                    );
                }
                assert!(
                    verts.windows(2).all(|w| w[0].idx <= w[1].idx),
                    "vertex layer not sorted by filtration index"
                );
            }
        }
        let layers = self.simplex_layers();
        for (li, layer) in layers.iter().enumerate() {
            assert!(
                layer.windows(2).all(|w| w[0].idx <= w[1].idx),
                "layer not sorted by filtration index"
            );
            for s in layer {
                assert_eq!(s.verts.len(), li + 2, "simplex in wrong layer");
                assert!(s.verts.iter().all(|&v| v < n), "simplex vertex out of range");
                if li == 0 {
                    assert!(s.faces.is_empty(), "edge carries face links");
                    for &v in &s.verts {
                        assert!(
                            self.vertex_idx(v) <= s.idx,
                            "edge enters before one of its endpoints"
                        );
                    }
                } else {
                    assert_eq!(s.faces.len(), s.verts.len(), "face links missing");
                    assert!(
                        s.faces.windows(2).all(|w| w[0] >= w[1]),
                        "face links not sorted descending"
                    );
                    for &f in &s.faces {
                        assert!(f < layers[li - 1].len(), "face index out of range");
                        assert!(
                            layers[li - 1][f].idx <= s.idx,
                            "simplex enters before one of its faces"
                        );
                    }
                }
            }
        }
    }
}

pub(crate) fn validate_scales(scales: &[f64]) -> Result<(), TdaError> {
    for t in 1..scales.len() {
        // Also trips on NaN.
        if !(scales[t] < scales[t - 1]) {
            return Err(TdaError::AscendingScales { position: t });
        }
    }
    Ok(())
}

fn diameter(verts: &[usize], dist: &impl Fn(usize, usize) -> f64) -> f64 {
    let mut best = 0.0;
    for (a, &u) in verts.iter().enumerate() {
        for &v in &verts[a + 1..] {
            let d = dist(u, v);
            if d > best {
                best = d;
            }
        }
    }
    best
}

/// Build a Vietoris–Rips filtration with default options.
pub fn vr_filtration<T, M>(
    scales: &[f64],
    metric: M,
    points: &[T],
) -> Result<Filtration, TdaError>
where
    M: Fn(&T, &T) -> f64,
{
    vr_filtration_with(scales, metric, points, &TdaOptions::default())
}

/// Build a Vietoris–Rips filtration from a strictly descending scale
/// list.
///
/// The complex is constructed once, at `scales[0]`; the remaining scales
/// only assign entry steps. An empty scale list (or point set) yields
/// the empty filtration.
pub fn vr_filtration_with<T, M>(
    scales: &[f64],
    metric: M,
    points: &[T],
    opts: &TdaOptions,
) -> Result<Filtration, TdaError>
where
    M: Fn(&T, &T) -> f64,
{
    validate_scales(scales)?;
    if scales.is_empty() || points.is_empty() {
        return Ok(Filtration::Simple { n_vertices: 0, layers: Vec::new() });
    }

    if opts.cache_distances {
        let graph = WeightedGraph::from_points(&metric, points)?;
        let sc = vr_complex_from_graph(scales[0], &graph);
        Ok(assign_and_sort(scales, sc, &|i, j| graph.weight(i, j)))
    } else {
        let sc = vr_complex_with(scales[0], &metric, points, opts)?;
        Ok(assign_and_sort(scales, sc, &|i, j| metric(&points[i], &points[j])))
    }
}

/// Filtration over a complex already built at `scales[0]`, with edge
/// lengths served by the cached graph.
pub fn filtration_from_complex(
    scales: &[f64],
    sc: SimplicialComplex,
    graph: &WeightedGraph,
) -> Result<Filtration, TdaError> {
    validate_scales(scales)?;
    assert_eq!(
        graph.n_vertices(),
        sc.n_vertices,
        "weighted graph and complex disagree on the vertex count"
    );
    if scales.is_empty() {
        return Ok(Filtration::Simple { n_vertices: 0, layers: Vec::new() });
    }
    Ok(assign_and_sort(scales, sc, &|i, j| graph.weight(i, j)))
}

fn assign_and_sort(
    scales: &[f64],
    sc: SimplicialComplex,
    dist: &impl Fn(usize, usize) -> f64,
) -> Filtration {
    let m = scales.len();
    let n_vertices = sc.n_vertices;

    let diameters: Vec<Vec<f64>> = sc
        .layers
        .iter()
        .map(|layer| layer.iter().map(|s| diameter(&s.verts, dist)).collect())
        .collect();

    let mut layers: Vec<Vec<FilteredSimplex>> = sc
        .layers
        .into_iter()
        .map(|layer| {
            layer
                .into_iter()
                .map(|s| FilteredSimplex { idx: 0, verts: s.verts, faces: s.faces })
                .collect()
        })
        .collect();

    // Descending sweep: step t pairs with the ascending threshold
    // s_{m-t}, so a simplex ends up counting the scales that exclude
    // its longest edge. Simplices still at 0 belong to the finest
    // complex.
    for t in (1..m).rev() {
        let threshold = scales[m - t];
        for (k, layer) in layers.iter_mut().enumerate() {
            for (pos, s) in layer.iter_mut().enumerate() {
                if s.idx == 0 && diameters[k][pos] >= threshold {
                    s.idx = t;
                }
            }
        }
    }

    // Sort every layer by entry step, then point the layer above at the
    // new positions.
    for k in 0..layers.len() {
        let mut order: Vec<usize> = (0..layers[k].len()).collect();
        order.sort_by_key(|&i| layers[k][i].idx);
        let mut perm = vec![0usize; order.len()];
        for (new, &old) in order.iter().enumerate() {
            perm[old] = new;
        }
        layers[k].sort_by_key(|s| s.idx);
        if k + 1 < layers.len() {
            for s in &mut layers[k + 1] {
                for f in &mut s.faces {
                    *f = perm[*f];
                }
                s.faces.sort_unstable_by(|a, b| b.cmp(a));
            }
        }
    }

    Filtration::Simple { n_vertices, layers }
}
