//! Bilinear interpolation.
//!
//! This method performs linear interpolation in two dimensions using
//! the four nearest grid points.

use super::common::{clamp_neighbor, linear_weight};
use super::Interpolator;
use crate::element::Element;
use crate::grid::Grid;

/// Bilinear interpolator
#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearInterpolator;

impl Interpolator for BilinearInterpolator {
    #[inline]
    fn sample<T: Element>(&self, grid: &Grid<'_, T>, x: f64, y: f64) -> T {
        let fx0 = x.floor();
        let fy0 = y.floor();
        let (wx0, wx1) = linear_weight(x - fx0);
        let (wy0, wy1) = linear_weight(y - fy0);

        // Replicate the last row/column for the far neighbours
        let x0 = clamp_neighbor(fx0 as isize, grid.cols());
        let y0 = clamp_neighbor(fy0 as isize, grid.rows());
        let x1 = clamp_neighbor(x0 as isize + 1, grid.cols());
        let y1 = clamp_neighbor(y0 as isize + 1, grid.rows());

        let value = wx0 * wy0 * grid.at(y0, x0).as_f64()
            + wx1 * wy0 * grid.at(y0, x1).as_f64()
            + wx0 * wy1 * grid.at(y1, x0).as_f64()
            + wx1 * wy1 * grid.at(y1, x1).as_f64();

        T::from_f64(value)
    }

    fn name(&self) -> &str {
        "bilinear"
    }
}
