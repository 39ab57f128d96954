//! Nearest neighbor interpolation.
//!
//! This method selects the value of the nearest grid point.
//! It's the simplest interpolation method, offering the fastest
//! performance but with less smooth results compared to higher-order methods.

use super::common::clamp_index;
use super::Interpolator;
use crate::element::Element;
use crate::grid::Grid;

/// Nearest neighbor interpolator
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestInterpolator;

impl Interpolator for NearestInterpolator {
    #[inline]
    fn sample<T: Element>(&self, grid: &Grid<'_, T>, x: f64, y: f64) -> T {
        // Round to the nearest grid point, then clamp into the grid
        let col = clamp_index(x.round(), grid.cols()) as usize;
        let row = clamp_index(y.round(), grid.rows()) as usize;
        grid.at(row, col)
    }

    fn name(&self) -> &str {
        "nearest"
    }
}
