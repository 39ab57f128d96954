//! Parallel reprojection of a lat/lng source grid into a projected tile.
//!
//! For every target pixel the engine finds its position in the full
//! projected image, reverse-projects it to longitude/latitude, maps that into
//! the source grid and interpolates. Pixels outside the source coverage get
//! the element type's no-data value.
//!
//! The target is cut into disjoint mutable spans of at most `chunk_size`
//! pixels (short rows stay whole and are grouped instead), so each cell is
//! written by exactly one task and the output does not depend on
//! scheduling.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::element::Element;
use crate::error::{Result, TilewarpError};
use crate::geometry::{GeoBounds, TilePlacement};
use crate::grid::{Grid, GridMut};
use crate::interpolation::{
    BicubicInterpolator, BilinearInterpolator, InterpolationMethod, Interpolator,
    NearestInterpolator,
};
use crate::projection::{get_projection, Mollweide, Projection, ProjectionKind, WebMercator};

/// Default minimum number of pixels handed to one parallel task.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Tuning knobs for a reprojection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Size of a dedicated worker pool. `None` uses the global rayon pool,
    /// `Some(1)` runs on the calling thread.
    pub workers: Option<usize>,

    /// Minimum number of pixels per parallel task.
    pub chunk_size: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            workers: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl EngineOptions {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(TilewarpError::InvalidParameter {
                param: "chunk_size".to_string(),
                message: "chunk size must be at least 1".to_string(),
            });
        }
        if self.workers == Some(0) {
            return Err(TilewarpError::InvalidParameter {
                param: "workers".to_string(),
                message: "worker count must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Outcome of a reprojection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStats {
    /// Target pixels written.
    pub pixels: usize,
    /// Pixels written as no-data because they fell outside the source.
    pub no_data: usize,
}

/// Fill a run of target pixels starting at `(row, first_col)`. Returns the
/// number of no-data pixels written.
#[inline]
#[allow(clippy::too_many_arguments)]
fn fill_span<P, I, T>(
    projection: &P,
    interpolator: &I,
    source: &Grid<'_, T>,
    bounds: &GeoBounds,
    placement: &TilePlacement,
    row: usize,
    first_col: usize,
    cells: &mut [T],
) -> usize
where
    P: Projection + ?Sized,
    I: Interpolator,
    T: Element,
{
    let src_cols = source.cols() as f64;
    let src_rows = source.rows() as f64;
    let mut no_data = 0;

    for (i, cell) in cells.iter_mut().enumerate() {
        let (x_norm, y_norm) = placement.normalized(first_col + i, row);
        let (lng, lat) = projection.reverse(x_norm, y_norm);
        let (src_x, src_y) = bounds.to_source_normalized(lng, lat);

        *cell = if GeoBounds::contains_normalized(src_x, src_y) {
            interpolator.sample(source, src_x * src_cols, src_y * src_rows)
        } else {
            no_data += 1;
            T::no_data()
        };
    }

    no_data
}

/// Reproject `source`, covering `bounds`, into `target`, which sits at
/// `placement` within the full projected image.
///
/// Runs on the current rayon pool. Rows longer than `chunk_size` are split
/// into `chunk_size` spans; shorter rows are grouped so that each task covers
/// at least `chunk_size` pixels. Inputs are assumed valid; use [`reproject`]
/// for the checked entry point.
pub fn project<P, I, T>(
    projection: &P,
    interpolator: &I,
    source: &Grid<'_, T>,
    bounds: &GeoBounds,
    target: &mut GridMut<'_, T>,
    placement: &TilePlacement,
    chunk_size: usize,
) -> ProjectStats
where
    P: Projection + ?Sized,
    I: Interpolator,
    T: Element,
{
    let pixels = target.rows() * target.cols();
    let chunk_size = chunk_size.max(1);
    let span_len = chunk_size.min(target.cols());
    let spans_per_task = chunk_size.div_ceil(span_len);

    let no_data = target
        .spans_mut(span_len)
        .into_par_iter()
        .with_min_len(spans_per_task)
        .map(|(row, first_col, cells)| {
            fill_span(
                projection,
                interpolator,
                source,
                bounds,
                placement,
                row,
                first_col,
                cells,
            )
        })
        .sum();

    ProjectStats { pixels, no_data }
}

/// Same as [`project`] but on the calling thread only.
pub fn project_sequential<P, I, T>(
    projection: &P,
    interpolator: &I,
    source: &Grid<'_, T>,
    bounds: &GeoBounds,
    target: &mut GridMut<'_, T>,
    placement: &TilePlacement,
) -> ProjectStats
where
    P: Projection + ?Sized,
    I: Interpolator,
    T: Element,
{
    let pixels = target.rows() * target.cols();
    let no_data = target
        .rows_mut()
        .enumerate()
        .map(|(row, cells)| {
            fill_span(projection, interpolator, source, bounds, placement, row, 0, cells)
        })
        .sum();

    ProjectStats { pixels, no_data }
}

fn run_with_interpolator<P, I, T>(
    projection: &P,
    interpolator: &I,
    source: &Grid<'_, T>,
    bounds: &GeoBounds,
    target: &mut GridMut<'_, T>,
    placement: &TilePlacement,
    options: &EngineOptions,
) -> Result<ProjectStats>
where
    P: Projection,
    I: Interpolator,
    T: Element,
{
    match options.workers {
        Some(1) => Ok(project_sequential(
            projection,
            interpolator,
            source,
            bounds,
            target,
            placement,
        )),
        Some(workers) => {
            let pool = ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("tilewarp-worker-{}", i))
                .build()
                .map_err(|e| TilewarpError::ThreadPool {
                    message: e.to_string(),
                })?;
            Ok(pool.install(|| {
                project(
                    projection,
                    interpolator,
                    source,
                    bounds,
                    target,
                    placement,
                    options.chunk_size,
                )
            }))
        }
        None => Ok(project(
            projection,
            interpolator,
            source,
            bounds,
            target,
            placement,
            options.chunk_size,
        )),
    }
}

fn run_with_projection<P, T>(
    projection: &P,
    method: InterpolationMethod,
    source: &Grid<'_, T>,
    bounds: &GeoBounds,
    target: &mut GridMut<'_, T>,
    placement: &TilePlacement,
    options: &EngineOptions,
) -> Result<ProjectStats>
where
    P: Projection,
    T: Element,
{
    match method {
        InterpolationMethod::Nearest => run_with_interpolator(
            projection,
            &NearestInterpolator,
            source,
            bounds,
            target,
            placement,
            options,
        ),
        InterpolationMethod::Bilinear => run_with_interpolator(
            projection,
            &BilinearInterpolator,
            source,
            bounds,
            target,
            placement,
            options,
        ),
        InterpolationMethod::Bicubic => run_with_interpolator(
            projection,
            &BicubicInterpolator,
            source,
            bounds,
            target,
            placement,
            options,
        ),
    }
}

/// Checked reprojection entry point.
///
/// Resolves `projection_id` first and fails with
/// [`TilewarpError::UnknownProjection`] without touching `target` if it is
/// not recognised. Bounding box, placement and options are validated before
/// the parallel pass; grid shapes are validated when the grids are built.
/// A tile that reaches past the total image size is allowed and logged.
pub fn reproject<T: Element>(
    source: &Grid<'_, T>,
    bounds: &GeoBounds,
    target: &mut GridMut<'_, T>,
    placement: &TilePlacement,
    projection_id: &str,
    method: InterpolationMethod,
    options: &EngineOptions,
) -> Result<ProjectStats> {
    let projection = get_projection(projection_id)?;
    bounds.validate()?;
    placement.validate()?;
    options.validate()?;

    if placement.exceeds(target.cols(), target.rows()) {
        warn!(
            x_origin = placement.x_origin,
            y_origin = placement.y_origin,
            x_total = placement.x_total,
            y_total = placement.y_total,
            tile_cols = target.cols(),
            tile_rows = target.rows(),
            "Tile extends past the full image; affected pixels may be no-data"
        );
    }

    debug!(
        projection = projection.id(),
        method = method.name(),
        source_rows = source.rows(),
        source_cols = source.cols(),
        source_stride = source.stride(),
        target_rows = target.rows(),
        target_cols = target.cols(),
        target_stride = target.stride(),
        ?bounds,
        ?placement,
        "Starting reprojection"
    );

    let start = Instant::now();
    let stats = match projection {
        ProjectionKind::WebMercator => run_with_projection(
            &WebMercator,
            method,
            source,
            bounds,
            target,
            placement,
            options,
        ),
        ProjectionKind::Mollweide => run_with_projection(
            &Mollweide, method, source, bounds, target, placement, options,
        ),
    }?;

    info!(
        projection = projection.id(),
        method = method.name(),
        pixels = stats.pixels,
        no_data = stats.no_data,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Reprojection completed"
    );

    Ok(stats)
}
