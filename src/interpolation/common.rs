//! Common utilities for interpolation algorithms.

/// Clamp an index to valid bounds
pub fn clamp_index(index: f64, size: usize) -> f64 {
    index.max(0.0).min((size - 1) as f64)
}

/// Clamp a possibly negative neighbour index to `[0, size)`.
#[inline]
pub fn clamp_neighbor(index: isize, size: usize) -> usize {
    index.clamp(0, size as isize - 1) as usize
}

/// Get the weight for linear interpolation
#[inline]
pub fn linear_weight(fraction: f64) -> (f64, f64) {
    (1.0 - fraction, fraction)
}
