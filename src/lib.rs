//! # tda-rips
//!
//! Topological data analysis on point clouds: Vietoris–Rips
//! filtrations, persistence barcodes, and simplicial homology.
//!
//! ## Pipeline
//!
//! Given a finite point set with a distance function, the library
//! identifies connected components, loops, voids and higher holes, and
//! tracks how long each feature persists as the notion of "closeness"
//! is relaxed:
//!
//! 1. **Complex construction** (`complex`): threshold the distance
//!    graph at a scale, enumerate its maximal cliques (Bron–Kerbosch)
//!    and close them downward into a simplicial complex.
//!
//! 2. **Homology** (`homology`): read the boundary operators off the
//!    complex and compute either the exact integer groups (torsion
//!    included) via Smith Normal Form, or just the Betti numbers over
//!    𝔽₂ from boundary ranks, which is far cheaper.
//!
//! 3. **Filtration** (`filtration`): with a descending list of scales,
//!    index every simplex of the coarsest complex by the step at which
//!    it first appears.
//!
//! 4. **Persistence** (`persistence`): reduce the filtered boundary
//!    matrix incrementally over 𝔽₂ and report per-dimension barcodes,
//!    as filtration indices or mapped back to scales.
//!
//! ## Coefficients
//!
//! Integer homology reports each H_k as a list of cyclic orders (0 for
//! a free ℤ summand, k > 1 for ℤ/kℤ); the 𝔽₂ path reports Betti
//! numbers only. No other coefficient rings are supported.
//!
//! ## Concurrency
//!
//! All computations are pure functions of their inputs. The
//! per-dimension reductions in homology are independent and run on the
//! rayon pool when [`TdaOptions::parallel`] is set; results never
//! depend on the degree of parallelism. The persistence reduction
//! itself is inherently sequential and always runs on the caller's
//! thread.
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Edelsbrunner, Letscher, Zomorodian, "Topological Persistence and
//!   Simplification", Discrete & Computational Geometry (2002)
//! - Zomorodian & Carlsson, "Computing Persistent Homology" (2005)

pub mod complex;
pub mod config;
pub mod error;
pub mod filtration;
pub mod homology;
pub mod matrix;
pub mod persistence;

// Configuration and errors
pub use config::TdaOptions;
pub use error::TdaError;

// Complex construction and boundary operators
pub use complex::{
    boundary_operators_bool,
    boundary_operators_int,
    euclidean,
    maximal_cliques,
    vr_complex,
    vr_complex_from_graph,
    vr_complex_with,
    Simplex,
    SimplicialComplex,
    WeightedGraph,
};

// Homology over ℤ and 𝔽₂
pub use homology::{homology_bool, homology_bool_with, homology_int, homology_int_with};

// Filtrations
pub use filtration::{
    filtration_from_complex,
    vr_filtration,
    vr_filtration_with,
    FilteredSimplex,
    Filtration,
};

// Persistence barcodes
pub use persistence::{index_barcodes, scale_barcodes, Bar, BitChain, Extended};

// Matrix kernel (shared by boundaries, homology and persistence)
pub use matrix::{column_echelon, image_in_kernel, rank_int, smith_normal_form, BitMatrix, ColOp};
