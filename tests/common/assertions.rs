//! Assertion helpers for comparing rasters.

#![allow(dead_code)]

/// Assert two float buffers are bit-for-bit identical.
pub fn assert_bitwise_eq(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "buffer lengths differ");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(
            a.to_bits(),
            e.to_bits(),
            "buffers differ at index {}: {} vs {}",
            i,
            a,
            e
        );
    }
}

/// Row and column of the largest value in a row-major buffer.
pub fn argmax(data: &[f64], cols: usize) -> (usize, usize) {
    let (idx, _) = data
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best), (i, &v)| {
            if v > best {
                (i, v)
            } else {
                (best_i, best)
            }
        });
    (idx / cols, idx % cols)
}

/// Extract columns `[col_start, col_start + width)` of a row-major buffer.
pub fn column_window(data: &[f64], cols: usize, col_start: usize, width: usize) -> Vec<f64> {
    data.chunks(cols)
        .flat_map(|row| row[col_start..col_start + width].iter().copied())
        .collect()
}
