//! Barcodes and the Extended Number Line
//!
//! A barcode records when a topological feature appears and when it
//! disappears. Essential features never die, so death values live in
//! the extended line: every finite value, plus an `Infinity` greater
//! than all of them.

use std::fmt;

/// A value extended with a maximal element.
///
/// The derived ordering is the intended one: `Finite(a) < Finite(b)`
/// iff `a < b`, and `Finite(_) < Infinity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Extended<T> {
    Finite(T),
    Infinity,
}

impl<T> Extended<T> {
    pub fn is_finite(&self) -> bool {
        matches!(self, Extended::Finite(_))
    }

    /// Apply `f` to the finite payload, keeping `Infinity` fixed.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extended<U> {
        match self {
            Extended::Finite(v) => Extended::Finite(f(v)),
            Extended::Infinity => Extended::Infinity,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Extended<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extended::Finite(v) => v.fmt(f),
            Extended::Infinity => write!(f, "inf"),
        }
    }
}

/// One bar of a persistence barcode: birth step/scale and death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bar<T> {
    pub birth: T,
    pub death: Extended<T>,
}

impl<T> Bar<T> {
    pub fn new(birth: T, death: Extended<T>) -> Self {
        Self { birth, death }
    }

    /// An essential feature: born, never dies.
    pub fn is_essential(&self) -> bool {
        !self.death.is_finite()
    }
}

impl<T: fmt::Display> fmt::Display for Bar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.birth, self.death)
    }
}
