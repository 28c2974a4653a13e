//! Persistence Engine: Barcodes by Incremental Column Reduction
//!
//! The standard persistence algorithm over 𝔽₂, dimension by dimension.
//! For every k-simplex, in filtration order, its boundary chain is
//! reduced against the chains stored so far: while the chain's pivot
//! slot is occupied, XOR the stored chain in. An emptied chain marks
//! its simplex as the creator of a k-dimensional feature; a surviving
//! chain pairs its pivot face with the current simplex and emits a
//! finite bar. Creators whose slot never fills are essential and get an
//! infinite bar.
//!
//! Two details carry the algorithm:
//!
//! - Boundary chains keep only *marked* faces. An unmarked face was
//!   itself paired while reducing, and its contribution cancels by
//!   construction; dropping it up front is what makes the reduction
//!   near-linear in practice.
//! - The sequential order within a dimension is load-bearing: each
//!   reduction depends on slots filled by earlier simplices, so this
//!   loop is never parallelized.
//!
//! Reference: Edelsbrunner, Letscher, Zomorodian (2002), "Topological
//! Persistence and Simplification".

mod barcode;
mod chain;

pub use barcode::{Bar, Extended};
pub use chain::BitChain;

use crate::error::TdaError;
use crate::filtration::{validate_scales, Filtration};

/// Barcodes of every dimension, births and deaths given as filtration
/// indices.
///
/// Bars whose birth equals their death are dropped. The filtration must
/// satisfy the ordering invariants produced by the builder; violations
/// abort.
pub fn index_barcodes(filtration: &Filtration) -> Vec<Vec<Bar<usize>>> {
    filtration.validate();
    let n = filtration.n_vertices();
    if n == 0 {
        return Vec::new();
    }
    let layers = filtration.simplex_layers();
    let dim = layers.len();

    let filt = |k: usize, pos: usize| -> usize {
        if k == 0 {
            filtration.vertex_idx(pos)
        } else {
            layers[k - 1][pos].idx
        }
    };
    let size = |k: usize| -> usize {
        if k == 0 {
            n
        } else {
            layers[k - 1].len()
        }
    };

    let mut bars: Vec<Vec<Bar<usize>>> = vec![Vec::new(); dim + 1];
    // marked[k]: creators among the k-simplices. Vertices have empty
    // boundaries, so every vertex is a creator.
    let mut marked: Vec<Vec<bool>> = Vec::with_capacity(dim + 1);
    marked.push(vec![true; n]);
    // slots[k][p]: the reduced chain whose pivot is the k-simplex at
    // position p, once some (k+1)-simplex has claimed it.
    let mut slots: Vec<Vec<Option<BitChain>>> = (0..=dim)
        .map(|k| {
            let mut column = Vec::new();
            column.resize_with(size(k), || None);
            column
        })
        .collect();

    for k in 1..=dim {
        let layer = &layers[k - 1];
        let lower = size(k - 1);
        let mut marked_k = vec![false; layer.len()];

        for (pos, simplex) in layer.iter().enumerate() {
            // Boundary chain, restricted to marked faces. Edges name
            // their endpoints directly; higher simplices their face
            // links.
            let mut chain = BitChain::empty(lower);
            if k == 1 {
                for &v in &simplex.verts {
                    if marked[0][v] {
                        chain.insert(v);
                    }
                }
            } else {
                for &face in &simplex.faces {
                    if marked[k - 1][face] {
                        chain.insert(face);
                    }
                }
            }

            while let Some(p) = chain.low() {
                match &slots[k - 1][p] {
                    Some(stored) => chain.xor_assign(stored),
                    None => break,
                }
            }

            match chain.low() {
                None => marked_k[pos] = true,
                Some(p) => {
                    let birth = filt(k - 1, p);
                    let death = simplex.idx;
                    slots[k - 1][p] = Some(chain);
                    if birth != death {
                        bars[k - 1].push(Bar::new(birth, Extended::Finite(death)));
                    }
                }
            }
        }
        marked.push(marked_k);
    }

    // Marked simplices whose slot stayed empty were never paired: their
    // features survive to the end of the filtration.
    for k in 0..=dim {
        for pos in 0..size(k) {
            if marked[k][pos] && slots[k][pos].is_none() {
                bars[k].push(Bar::new(filt(k, pos), Extended::Infinity));
            }
        }
    }
    bars
}

/// Barcodes with births and deaths mapped back to scales.
///
/// Index i corresponds to `scales[m−1−i]`: the filtration counts up
/// from the finest complex while the scales were given descending.
pub fn scale_barcodes(
    scales: &[f64],
    filtration: &Filtration,
) -> Result<Vec<Vec<Bar<f64>>>, TdaError> {
    validate_scales(scales)?;
    let m = scales.len();
    let to_scale = |idx: usize| -> f64 {
        assert!(idx < m, "filtration index outside the scale list");
        scales[m - 1 - idx]
    };
    let bars = index_barcodes(filtration);
    Ok(bars
        .into_iter()
        .map(|dim_bars| {
            dim_bars
                .into_iter()
                .map(|bar| Bar::new(to_scale(bar.birth), bar.death.map(to_scale)))
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::euclidean;
    use crate::filtration::{vr_filtration, FilteredSimplex};

    fn metric(a: &Vec<f64>, b: &Vec<f64>) -> f64 {
        euclidean(a, b)
    }

    fn circle(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                vec![angle.cos(), angle.sin()]
            })
            .collect()
    }

    #[test]
    fn two_isolated_points_are_two_essential_components() {
        let points = vec![vec![0.0], vec![10.0]];
        let f = vr_filtration(&[5.0, 1.0], metric, &points).unwrap();
        let bars = index_barcodes(&f);
        assert_eq!(bars.len(), 1);
        assert_eq!(
            bars[0],
            vec![
                Bar::new(0, Extended::Infinity),
                Bar::new(0, Extended::Infinity),
            ]
        );
    }

    #[test]
    fn merging_pair_leaves_one_component() {
        let points = vec![vec![0.0], vec![3.0]];
        let f = vr_filtration(&[5.0, 1.0], metric, &points).unwrap();
        let bars = index_barcodes(&f);
        assert_eq!(bars.len(), 2);
        assert_eq!(
            bars[0],
            vec![
                Bar::new(0, Extended::Finite(1)),
                Bar::new(0, Extended::Infinity),
            ]
        );
        assert!(bars[1].is_empty());
    }

    #[test]
    fn zero_length_bars_are_dropped() {
        // With a single scale everything enters at step 0, so the merge
        // bar has no length and disappears.
        let points = vec![vec![0.0], vec![3.0]];
        let f = vr_filtration(&[5.0], metric, &points).unwrap();
        let bars = index_barcodes(&f);
        assert_eq!(bars[0], vec![Bar::new(0, Extended::Infinity)]);
    }

    #[test]
    fn square_loop_is_born_when_the_cycle_closes() {
        let points = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 1.0],
        ];
        let f = vr_filtration(&[2.0, 1.2, 0.5], metric, &points).unwrap();
        let bars = index_barcodes(&f);
        assert_eq!(bars.len(), 4);

        let finite: Vec<&Bar<usize>> = bars[0].iter().filter(|b| !b.is_essential()).collect();
        assert_eq!(finite.len(), 3);
        assert!(finite.iter().all(|b| b.birth == 0 && b.death == Extended::Finite(1)));
        assert_eq!(bars[0].iter().filter(|b| b.is_essential()).count(), 1);

        // The loop exists once the fourth side closes the square (step 1)
        // and dies when the diagonals let triangles fill it (step 2).
        assert_eq!(bars[1], vec![Bar::new(1, Extended::Finite(2))]);
        assert!(bars[2].is_empty());
        assert!(bars[3].is_empty());
    }

    #[test]
    fn circle_sample_has_one_long_loop() {
        let f = vr_filtration(&[3.0, 0.6, 0.1], metric, &circle(12)).unwrap();
        let bars = index_barcodes(&f);

        // Twelve components at step 0; the adjacent edges at step 1
        // merge eleven of them and close the cycle.
        let finite: Vec<&Bar<usize>> = bars[0].iter().filter(|b| !b.is_essential()).collect();
        assert_eq!(finite.len(), 11);
        assert!(finite.iter().all(|b| b.birth == 0 && b.death == Extended::Finite(1)));
        assert_eq!(bars[0].iter().filter(|b| b.is_essential()).count(), 1);

        assert_eq!(bars[1], vec![Bar::new(1, Extended::Finite(2))]);

        // At step 2 the complex is a full simplex: everything higher is
        // born and buried in the same step.
        for dim_bars in &bars[2..] {
            assert!(dim_bars.is_empty());
        }
    }

    #[test]
    fn scale_barcodes_reverse_the_scale_list() {
        let f = vr_filtration(&[3.0, 0.6, 0.1], metric, &circle(12)).unwrap();
        let bars = scale_barcodes(&[3.0, 0.6, 0.1], &f).unwrap();

        let finite: Vec<&Bar<f64>> = bars[0].iter().filter(|b| !b.is_essential()).collect();
        assert!(finite.iter().all(|b| b.birth == 0.1 && b.death == Extended::Finite(0.6)));
        assert_eq!(bars[1], vec![Bar::new(0.6, Extended::Finite(3.0))]);
    }

    #[test]
    fn essential_component_count_matches_final_components() {
        // Two filled triangles far apart: two components forever.
        let mut points = circle(3);
        for p in circle(3) {
            points.push(vec![p[0] + 100.0, p[1]]);
        }
        let f = vr_filtration(&[2.0, 0.5], metric, &points).unwrap();
        let bars = index_barcodes(&f);
        assert_eq!(bars[0].iter().filter(|b| b.is_essential()).count(), 2);
        // Each triangle loop fills in the same step it appears.
        assert!(bars[1].is_empty());
    }

    #[test]
    fn noisy_circle_keeps_its_loop() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        use rand_distr::{Distribution, Normal};

        // Radial jitter small enough that nearest-neighbor chords stay
        // below 0.7 and all longer chords above it.
        let mut rng = StdRng::seed_from_u64(7);
        let normal = Normal::new(0.0, 0.02).unwrap();
        let points: Vec<Vec<f64>> = (0..12)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * i as f64 / 12.0;
                let jitter: f64 = normal.sample(&mut rng);
                let radius: f64 = 1.0 + jitter.clamp(-0.05, 0.05);
                vec![radius * angle.cos(), radius * angle.sin()]
            })
            .collect();

        let f = vr_filtration(&[3.0, 0.7, 0.1], metric, &points).unwrap();
        let bars = index_barcodes(&f);

        let finite: Vec<&Bar<usize>> = bars[0].iter().filter(|b| !b.is_essential()).collect();
        assert_eq!(finite.len(), 11);
        assert!(finite.iter().all(|b| b.birth == 0 && b.death == Extended::Finite(1)));
        assert_eq!(bars[0].iter().filter(|b| b.is_essential()).count(), 1);
        assert_eq!(bars[1], vec![Bar::new(1, Extended::Finite(2))]);
    }

    #[test]
    fn general_shape_with_late_vertices() {
        // v0, v1 present from the start, v2 enters at step 1. The edges
        // close a triangle at step 2 that nothing ever fills.
        let vertex = |idx| FilteredSimplex { idx, verts: vec![], faces: vec![] };
        let edge = |idx, a, b| FilteredSimplex { idx, verts: vec![a, b], faces: vec![] };
        let f = Filtration::General {
            layers: vec![
                vec![vertex(0), vertex(0), vertex(1)],
                vec![edge(1, 0, 1), edge(2, 1, 2), edge(2, 0, 2)],
            ],
        };
        let bars = index_barcodes(&f);
        assert_eq!(bars.len(), 2);
        assert_eq!(
            bars[0],
            vec![
                Bar::new(0, Extended::Finite(1)),
                Bar::new(1, Extended::Finite(2)),
                Bar::new(0, Extended::Infinity),
            ]
        );
        assert_eq!(bars[1], vec![Bar::new(2, Extended::Infinity)]);
    }

    #[test]
    fn empty_filtration_has_no_barcodes() {
        let f = vr_filtration(&[], metric, &circle(4)).unwrap();
        assert!(index_barcodes(&f).is_empty());
        assert!(scale_barcodes(&[], &f).unwrap().is_empty());
    }
}
