//! Bicubic interpolation.
//!
//! This method uses 16 surrounding grid points to produce smoother
//! interpolation results than bilinear. The kernel is Keys' cubic
//! convolution with `a = -0.5` (Catmull-Rom), which passes through the
//! grid points. Neighbours outside the grid replicate the edge.

use super::common::clamp_neighbor;
use super::Interpolator;
use crate::element::Element;
use crate::grid::Grid;

const A: f64 = -0.5;

/// Cubic convolution kernel weight at distance `t` from a grid point.
#[inline]
fn cubic_weight(t: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((A * t - 5.0 * A) * t + 8.0 * A) * t - 4.0 * A
    } else {
        0.0
    }
}

/// Bicubic interpolator
#[derive(Debug, Clone, Copy, Default)]
pub struct BicubicInterpolator;

impl Interpolator for BicubicInterpolator {
    fn sample<T: Element>(&self, grid: &Grid<'_, T>, x: f64, y: f64) -> T {
        let fx0 = x.floor();
        let fy0 = y.floor();
        let dx = x - fx0;
        let dy = y - fy0;
        let x0 = fx0 as isize;
        let y0 = fy0 as isize;

        let wx = [
            cubic_weight(dx + 1.0),
            cubic_weight(dx),
            cubic_weight(1.0 - dx),
            cubic_weight(2.0 - dx),
        ];
        let wy = [
            cubic_weight(dy + 1.0),
            cubic_weight(dy),
            cubic_weight(1.0 - dy),
            cubic_weight(2.0 - dy),
        ];

        let mut value = 0.0;
        for (j, wyj) in wy.iter().enumerate() {
            let row = clamp_neighbor(y0 + j as isize - 1, grid.rows());
            let mut row_value = 0.0;
            for (i, wxi) in wx.iter().enumerate() {
                let col = clamp_neighbor(x0 + i as isize - 1, grid.cols());
                row_value += wxi * grid.at(row, col).as_f64();
            }
            value += wyj * row_value;
        }

        T::from_f64(value)
    }

    fn name(&self) -> &str {
        "bicubic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kernel_partition_of_unity() {
        for dx in [0.0, 0.1, 0.5, 0.9] {
            let sum = cubic_weight(dx + 1.0)
                + cubic_weight(dx)
                + cubic_weight(1.0 - dx)
                + cubic_weight(2.0 - dx);
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        }
        assert_relative_eq!(cubic_weight(0.0), 1.0);
        assert_relative_eq!(cubic_weight(1.0), 0.0);
        assert_relative_eq!(cubic_weight(2.0), 0.0);
    }

    #[test]
    fn test_exact_at_grid_points() {
        let data: Vec<f64> = (0..25).map(|i| ((i * 7) % 11) as f64).collect();
        let grid = Grid::new(&data, 5, 5, 5).unwrap();
        for r in 0..5 {
            for c in 0..5 {
                assert_relative_eq!(
                    BicubicInterpolator.sample(&grid, c as f64, r as f64),
                    grid.at(r, c),
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_reproduces_linear_ramp_in_interior() {
        let data: Vec<f64> = (0..36).map(|i| (i % 6) as f64 * 2.0).collect();
        let grid = Grid::new(&data, 6, 6, 6).unwrap();
        assert_relative_eq!(BicubicInterpolator.sample(&grid, 2.5, 2.5), 5.0, epsilon = 1e-12);
        assert_relative_eq!(BicubicInterpolator.sample(&grid, 1.25, 3.0), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_grid_at_edges() {
        let data = vec![4.0f32; 9];
        let grid = Grid::new(&data, 3, 3, 3).unwrap();
        assert_relative_eq!(BicubicInterpolator.sample(&grid, 2.7, 2.7), 4.0, epsilon = 1e-6);
        assert_relative_eq!(BicubicInterpolator.sample(&grid, 0.2, 0.0), 4.0, epsilon = 1e-6);
    }
}
