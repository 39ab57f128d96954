//! Non-owning strided 2-D views over raster memory.
//!
//! A grid never allocates or frees: it borrows a flat buffer owned by the
//! caller and addresses it as `row * stride + col`. `stride` may exceed
//! `cols` to allow padded rows.

use ndarray::{ArrayView2, ArrayViewMut2};

use crate::error::{Result, TilewarpError};

/// Smallest buffer length that holds every addressable cell, or `None` if
/// it does not fit in `usize`.
fn required_len(stride: usize, rows: usize, cols: usize) -> Option<usize> {
    rows.checked_sub(1)?.checked_mul(stride)?.checked_add(cols)
}

fn check_shape(len: usize, stride: usize, rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(TilewarpError::geometry(format!(
            "grid must have at least one row and column, got {}x{}",
            rows, cols
        )));
    }
    if stride < cols {
        return Err(TilewarpError::geometry(format!(
            "stride ({}) must be >= cols ({})",
            stride, cols
        )));
    }
    let required = required_len(stride, rows, cols).ok_or_else(|| {
        TilewarpError::geometry(format!(
            "{} rows with stride {} overflow the address space",
            rows, stride
        ))
    })?;
    if len < required {
        return Err(TilewarpError::geometry(format!(
            "buffer of {} elements is too short for {} rows x {} cols with stride {} (needs {})",
            len, rows, cols, stride, required
        )));
    }
    Ok(())
}

/// Read-only grid view.
#[derive(Debug, Clone, Copy)]
pub struct Grid<'a, T> {
    data: &'a [T],
    stride: usize,
    rows: usize,
    cols: usize,
}

impl<'a, T: Copy> Grid<'a, T> {
    /// Wrap `data` as a `rows` x `cols` grid whose rows start `stride`
    /// elements apart.
    pub fn new(data: &'a [T], stride: usize, rows: usize, cols: usize) -> Result<Self> {
        check_shape(data.len(), stride, rows, cols)?;
        Ok(Self {
            data,
            stride,
            rows,
            cols,
        })
    }

    /// View a standard-layout (row-major, contiguous) ndarray.
    pub fn from_array(view: ArrayView2<'a, T>) -> Result<Self> {
        let (rows, cols) = view.dim();
        let data = view.to_slice().ok_or_else(|| {
            TilewarpError::geometry("source array must be contiguous in row-major order")
        })?;
        Self::new(data, cols, rows, cols)
    }

    /// View the first `cols` columns of a standard-layout ndarray whose
    /// remaining columns are row padding. The array's width is the stride.
    pub fn from_padded_array(view: ArrayView2<'a, T>, cols: usize) -> Result<Self> {
        let (rows, stride) = view.dim();
        let data = view.to_slice().ok_or_else(|| {
            TilewarpError::geometry("source array must be contiguous in row-major order")
        })?;
        Self::new(data, stride, rows, cols)
    }

    /// Value at `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.stride + col]
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }
}

/// Writable grid view.
#[derive(Debug)]
pub struct GridMut<'a, T> {
    data: &'a mut [T],
    stride: usize,
    rows: usize,
    cols: usize,
}

impl<'a, T: Copy> GridMut<'a, T> {
    pub fn new(data: &'a mut [T], stride: usize, rows: usize, cols: usize) -> Result<Self> {
        check_shape(data.len(), stride, rows, cols)?;
        Ok(Self {
            data,
            stride,
            rows,
            cols,
        })
    }

    /// View a standard-layout ndarray.
    pub fn from_array(view: ArrayViewMut2<'a, T>) -> Result<Self> {
        let (rows, cols) = view.dim();
        let data = view.into_slice().ok_or_else(|| {
            TilewarpError::geometry("target array must be contiguous in row-major order")
        })?;
        Self::new(data, cols, rows, cols)
    }

    /// Writable counterpart of [`Grid::from_padded_array`].
    pub fn from_padded_array(view: ArrayViewMut2<'a, T>, cols: usize) -> Result<Self> {
        let (rows, stride) = view.dim();
        let data = view.into_slice().ok_or_else(|| {
            TilewarpError::geometry("target array must be contiguous in row-major order")
        })?;
        Self::new(data, stride, rows, cols)
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.stride + col]
    }

    /// Mutable reference to the cell at `(row, col)`. Writes go straight to
    /// the backing buffer.
    #[inline]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.data[row * self.stride + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        *self.at_mut(row, col) = value;
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Disjoint mutable row slices, each exactly `cols` long. Padding cells
    /// between rows are not reachable through them.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> + '_ {
        let cols = self.cols;
        self.data
            .chunks_mut(self.stride)
            .take(self.rows)
            .map(move |row| &mut row[..cols])
    }

    /// Split the grid into disjoint spans of at most `max_len` cells, in
    /// row-major order. Each item is `(row, first_col, cells)`; a span never
    /// crosses a row boundary.
    pub fn spans_mut(&mut self, max_len: usize) -> Vec<(usize, usize, &mut [T])> {
        let max_len = max_len.max(1);
        let mut spans = Vec::with_capacity(self.rows * self.cols.div_ceil(max_len));
        for (row, cells) in self.rows_mut().enumerate() {
            for (i, span) in cells.chunks_mut(max_len).enumerate() {
                spans.push((row, i * max_len, span));
            }
        }
        spans
    }

    /// Reborrow as a read-only view.
    pub fn as_grid(&self) -> Grid<'_, T> {
        Grid {
            data: &*self.data,
            stride: self.stride,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{s, Array2};

    #[test]
    fn test_strided_addressing() {
        // 2 rows x 3 cols with one padding element per row
        let data = [1.0, 2.0, 3.0, -1.0, 4.0, 5.0, 6.0];
        let grid = Grid::new(&data, 4, 2, 3).unwrap();
        assert_eq!(grid.at(0, 0), 1.0);
        assert_eq!(grid.at(0, 2), 3.0);
        assert_eq!(grid.at(1, 0), 4.0);
        assert_eq!(grid.at(1, 2), 6.0);
    }

    #[test]
    fn test_shape_validation() {
        let data = [0.0f64; 6];
        assert!(Grid::new(&data, 3, 2, 3).is_ok());
        assert!(Grid::new(&data, 2, 2, 3).is_err()); // stride < cols
        assert!(Grid::new(&data, 4, 2, 3).is_err()); // needs 7 elements
        assert!(Grid::new(&data, 3, 0, 3).is_err());
        assert!(Grid::new(&data, 3, 2, 0).is_err());
    }

    #[test]
    fn test_writes_reach_buffer() {
        let mut data = vec![0i32; 8];
        {
            let mut grid = GridMut::new(&mut data, 4, 2, 3).unwrap();
            grid.set(1, 2, 7);
            *grid.at_mut(0, 1) = 3;
            assert_eq!(grid.at(1, 2), 7);
            assert_eq!(grid.as_grid().at(0, 1), 3);
        }
        assert_eq!(data, vec![0, 3, 0, 0, 0, 0, 7, 0]);
    }

    #[test]
    fn test_rows_mut_skips_padding() {
        let mut data = vec![0u8; 7];
        let mut grid = GridMut::new(&mut data, 4, 2, 3).unwrap();
        for row in grid.rows_mut() {
            assert_eq!(row.len(), 3);
            row.fill(9);
        }
        assert_eq!(data, vec![9, 9, 9, 0, 9, 9, 9]);
    }

    #[test]
    fn test_shape_overflow_rejected() {
        let data = [0.0f64; 4];
        assert!(matches!(
            Grid::new(&data, usize::MAX, 3, 1),
            Err(TilewarpError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_spans_split_long_rows() {
        let mut data = vec![0u16; 2 * 12 + 10];
        let mut grid = GridMut::new(&mut data, 12, 3, 10).unwrap();

        let spans = grid.spans_mut(4);
        let layout: Vec<(usize, usize, usize)> = spans
            .iter()
            .map(|(row, col, cells)| (*row, *col, cells.len()))
            .collect();
        assert_eq!(
            layout,
            vec![
                (0, 0, 4),
                (0, 4, 4),
                (0, 8, 2),
                (1, 0, 4),
                (1, 4, 4),
                (1, 8, 2),
                (2, 0, 4),
                (2, 4, 4),
                (2, 8, 2),
            ]
        );

        for (row, col, cells) in spans {
            for (i, cell) in cells.iter_mut().enumerate() {
                *cell = (row * 100 + col + i) as u16;
            }
        }
        assert_eq!(grid.at(1, 9), 109);
        assert_eq!(grid.at(2, 4), 204);
        // Padding after row 0 is untouched
        assert_eq!(data[10], 0);
        assert_eq!(data[11], 0);
    }

    #[test]
    fn test_spans_keep_short_rows_whole() {
        let mut data = vec![0i32; 6];
        let mut grid = GridMut::new(&mut data, 3, 2, 3).unwrap();
        let spans = grid.spans_mut(256);
        assert_eq!(spans.len(), 2);
        assert!(spans.iter().all(|(_, col, cells)| *col == 0 && cells.len() == 3));
    }

    #[test]
    fn test_from_padded_array() {
        // 3 rows x 4 cols of data plus 2 padding columns
        let mut arr = Array2::from_shape_fn((3, 6), |(r, c)| {
            if c < 4 {
                (r * 10 + c) as f64
            } else {
                -1.0
            }
        });
        {
            let grid = Grid::from_padded_array(arr.view(), 4).unwrap();
            assert_eq!(grid.stride(), 6);
            assert_eq!(grid.cols(), 4);
            assert_eq!(grid.at(2, 3), 23.0);
        }
        assert!(Grid::from_padded_array(arr.view(), 7).is_err());

        {
            let mut grid = GridMut::from_padded_array(arr.view_mut(), 4).unwrap();
            for row in grid.rows_mut() {
                row.fill(5.0);
            }
        }
        assert_eq!(arr[(1, 3)], 5.0);
        assert_eq!(arr[(1, 4)], -1.0);
        assert_eq!(arr[(2, 5)], -1.0);
    }

    #[test]
    fn test_from_array_view() {
        let arr = Array2::from_shape_fn((4, 5), |(r, c)| (r * 10 + c) as f64);
        let grid = Grid::from_array(arr.view()).unwrap();
        assert_eq!(grid.stride(), 5);
        assert_eq!(grid.at(3, 4), 34.0);

        // A column window of a wider array is not contiguous
        assert!(Grid::from_array(arr.slice(s![1..3, 1..4])).is_err());

        // Transposed views are not row-major
        assert!(Grid::from_array(arr.t()).is_err());
    }

    #[test]
    fn test_grid_mut_from_array() {
        let mut arr = Array2::<f32>::zeros((2, 2));
        {
            let mut grid = GridMut::from_array(arr.view_mut()).unwrap();
            grid.set(1, 0, 2.5);
        }
        assert_eq!(arr[(1, 0)], 2.5);
    }
}
