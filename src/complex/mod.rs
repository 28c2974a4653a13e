//! Simplicial Complexes: Arena-Indexed Simplices by Dimension
//!
//! A complex stores its simplices in one array per dimension, and a
//! simplex names its codimension-1 faces by *position* in the next-lower
//! array rather than by pointer. That keeps the face graph acyclic and
//! makes the renumbering done by the filtration sort a cheap permutation.
//!
//! `layers[0]` holds the edges; vertices are implicit (there are
//! `n_vertices` of them, numbered from 0). `layers[k]` holds the
//! (k+1)-dimensional simplices, so the dimension of the complex equals
//! `layers.len()`.

mod cliques;
mod boundary;
mod rips;

pub use boundary::{boundary_operators_bool, boundary_operators_int};
pub use cliques::maximal_cliques;
pub use rips::{euclidean, vr_complex, vr_complex_from_graph, vr_complex_with, WeightedGraph};

use std::collections::HashMap;

/// A simplex of dimension ≥ 1: its vertex indices in ascending order and
/// the positions of its codimension-1 faces in the next-lower layer.
///
/// `faces[i]` is the face obtained by removing `verts[i]`; the integer
/// boundary reads its sign convention off that ordering. Edges keep
/// `faces` empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplex {
    pub verts: Vec<usize>,
    pub faces: Vec<usize>,
}

impl Simplex {
    /// A simplex with no face links yet. Vertices must be ascending.
    pub fn new(verts: Vec<usize>) -> Self {
        assert!(
            verts.windows(2).all(|w| w[0] < w[1]),
            "simplex vertices must be strictly ascending"
        );
        Self { verts, faces: Vec::new() }
    }

    /// Dimension (= number of vertices − 1).
    pub fn dim(&self) -> usize {
        self.verts.len() - 1
    }
}

/// A simplicial complex: vertex count plus one simplex array per
/// dimension, edges first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplicialComplex {
    pub n_vertices: usize,
    pub layers: Vec<Vec<Simplex>>,
}

impl SimplicialComplex {
    /// The complex on `n_vertices` vertices with no higher simplices.
    pub fn empty(n_vertices: usize) -> Self {
        Self { n_vertices, layers: Vec::new() }
    }

    /// Highest simplex dimension present (0 for a pure vertex set).
    pub fn dim(&self) -> usize {
        self.layers.len()
    }

    /// Number of k-dimensional simplices.
    pub fn layer_size(&self, k: usize) -> usize {
        if k == 0 {
            self.n_vertices
        } else {
            self.layers.get(k - 1).map_or(0, Vec::len)
        }
    }

    /// Euler characteristic Σₖ (−1)ᵏ · #k-simplices.
    pub fn euler_characteristic(&self) -> i64 {
        (0..=self.dim())
            .map(|k| {
                let count = self.layer_size(k) as i64;
                if k % 2 == 0 {
                    count
                } else {
                    -count
                }
            })
            .sum()
    }

    /// Build the downward closure of a family of maximal simplices.
    ///
    /// Singletons are dropped (isolated vertices carry no simplex); every
    /// proper face of dimension ≥ 1 is generated, deduplicated, and
    /// linked. This is the closure step of the Vietoris–Rips builder,
    /// exposed so that hand-made complexes (triangulated surfaces, torsion
    /// examples) can enter the homology pipeline.
    pub fn from_maximal(n_vertices: usize, maximal: &[Vec<usize>]) -> Self {
        let mut cliques: Vec<Vec<usize>> = maximal
            .iter()
            .filter(|c| c.len() >= 2)
            .cloned()
            .collect();
        for c in &mut cliques {
            c.sort_unstable();
            assert!(
                c.windows(2).all(|w| w[0] < w[1]),
                "maximal simplex repeats a vertex"
            );
            assert!(
                c.iter().all(|&v| v < n_vertices),
                "maximal simplex names a vertex beyond n_vertices"
            );
        }

        let top = cliques.iter().map(Vec::len).max().unwrap_or(0);
        if top < 2 {
            return Self::empty(n_vertices);
        }

        let mut layers: Vec<Vec<Simplex>> = vec![Vec::new(); top - 1];
        let mut seen: Vec<HashMap<Vec<usize>, usize>> = vec![HashMap::new(); top - 1];

        // Seed every layer with the maximal simplices of that size.
        for verts in cliques {
            let layer = verts.len() - 2;
            if !seen[layer].contains_key(&verts) {
                seen[layer].insert(verts.clone(), layers[layer].len());
                layers[layer].push(Simplex { verts, faces: Vec::new() });
            }
        }

        // Walk top-down, appending each simplex's codimension-1 faces to
        // the layer below and recording where they landed. `faces[i]`
        // ends up naming the face with `verts[i]` removed.
        for upper in (1..layers.len()).rev() {
            let (lower_part, upper_part) = layers.split_at_mut(upper);
            let lower = &mut lower_part[upper - 1];
            let known = &mut seen[upper - 1];
            for simplex in upper_part[0].iter_mut() {
                for i in 0..simplex.verts.len() {
                    let mut face = simplex.verts.clone();
                    face.remove(i);
                    let pos = match known.get(&face) {
                        Some(&pos) => pos,
                        None => {
                            let pos = lower.len();
                            lower.push(Simplex { verts: face.clone(), faces: Vec::new() });
                            known.insert(face, pos);
                            pos
                        }
                    };
                    simplex.faces.push(pos);
                }
            }
        }

        Self { n_vertices, layers }
    }

    /// Check the structural invariants, aborting on the first violation.
    ///
    /// Verifies vertex ranges, face-link shape, the closure property
    /// (every codimension-1 face present and pointed to in removal
    /// order), and uniqueness within each layer.
    pub fn validate(&self) {
        for (li, layer) in self.layers.iter().enumerate() {
            let mut seen: HashMap<&[usize], usize> = HashMap::new();
            for (pos, s) in layer.iter().enumerate() {
                assert_eq!(s.verts.len(), li + 2, "simplex in wrong layer");
                assert!(
                    s.verts.windows(2).all(|w| w[0] < w[1]),
                    "simplex vertices not strictly ascending"
                );
                assert!(
                    s.verts.iter().all(|&v| v < self.n_vertices),
                    "simplex vertex out of range"
                );
                assert!(
                    seen.insert(s.verts.as_slice(), pos).is_none(),
                    "duplicate simplex within a layer"
                );
                if li == 0 {
                    assert!(s.faces.is_empty(), "edge carries face links");
                } else {
                    assert_eq!(
                        s.faces.len(),
                        s.verts.len(),
                        "face links missing for a higher simplex"
                    );
                    let below = &self.layers[li - 1];
                    for (i, &f) in s.faces.iter().enumerate() {
                        assert!(f < below.len(), "face index out of range");
                        let mut expect = s.verts.clone();
                        expect.remove(i);
                        assert_eq!(
                            below[f].verts, expect,
                            "face link does not match the removed vertex"
                        );
                    }
                }
            }
        }
    }
}
