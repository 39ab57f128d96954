//! Synthetic source rasters with known patterns.

#![allow(dead_code)]

use tilewarp::GeoBounds;

/// Longitude and latitude of the sample at `(row, col)` of an
/// equirectangular grid covering `bounds`.
pub fn sample_position(
    bounds: &GeoBounds,
    rows: usize,
    cols: usize,
    row: usize,
    col: usize,
) -> (f64, f64) {
    let lng = bounds.lng_west + (bounds.lng_east - bounds.lng_west) * col as f64 / cols as f64;
    let lat = bounds.lat_north - (bounds.lat_north - bounds.lat_south) * row as f64 / rows as f64;
    (lng, lat)
}

/// Row-major grid whose samples are `f(lng, lat)`.
pub fn grid_from_fn<F>(bounds: &GeoBounds, rows: usize, cols: usize, f: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> f64,
{
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let (lng, lat) = sample_position(bounds, rows, cols, row, col);
            data.push(f(lng, lat));
        }
    }
    data
}

/// Smooth global field with structure in both axes.
pub fn smooth_field(lng: f64, lat: f64) -> f64 {
    (lng.to_radians() * 3.0).sin() * 50.0 + lat * 2.0 + 300.0
}

/// All zeros except a single peak at `(row, col)`.
pub fn peak_grid(rows: usize, cols: usize, row: usize, col: usize, peak: f64) -> Vec<f64> {
    let mut data = vec![0.0; rows * cols];
    data[row * cols + col] = peak;
    data
}

/// Copy a row-major grid into a padded buffer with `stride` samples per row.
pub fn pad_rows<T: Copy>(data: &[T], cols: usize, stride: usize, fill: T) -> Vec<T> {
    let rows = data.len() / cols;
    let mut padded = vec![fill; rows * stride];
    for (row, chunk) in data.chunks(cols).enumerate() {
        padded[row * stride..row * stride + cols].copy_from_slice(chunk);
    }
    padded
}
