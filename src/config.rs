//! Library-Wide Configuration
//!
//! One small knob set, passed to the `_with` entry points. The defaults
//! favor speed on point clouds that fit in memory.

/// Options accepted by the builders and homology drivers.
#[derive(Debug, Clone, Copy)]
pub struct TdaOptions {
    /// Precompute all pairwise distances into a weighted graph ("fast")
    /// instead of re-evaluating the metric on demand ("light"). Trades
    /// O(N²) memory for metric calls; outputs are identical.
    pub cache_distances: bool,
    /// Reduce independent matrices (per-dimension ranks and Smith forms)
    /// on the rayon pool. Outputs are identical to the serial path.
    pub parallel: bool,
}

impl Default for TdaOptions {
    fn default() -> Self {
        Self {
            cache_distances: true,
            parallel: false,
        }
    }
}
