//! File-backed rasters.
//!
//! A raster file is a flat run of little-endian samples of one
//! [`DataFormat`], laid out row by row with `stride` samples between row
//! starts. The source file is only read. The target file is read, updated in
//! place (padding samples keep their values) and written back; a missing
//! target file is created with `rows * stride` no-data samples.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::element::{DataFormat, Element};
use crate::engine::{reproject, ProjectStats};
use crate::error::{Result, TilewarpError};
use crate::geometry::{GeoBounds, TilePlacement};
use crate::grid::{Grid, GridMut};
use crate::interpolation::{get_interpolator, InterpolationMethod};
use crate::logging::log_reprojection_stats;
use crate::projection::get_projection;

/// Location and layout of a raster file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterDescriptor {
    pub path: PathBuf,
    pub stride: usize,
    pub rows: usize,
    pub cols: usize,
}

impl RasterDescriptor {
    pub fn new(path: impl Into<PathBuf>, stride: usize, rows: usize, cols: usize) -> Self {
        Self {
            path: path.into(),
            stride,
            rows,
            cols,
        }
    }

    /// A descriptor without row padding.
    pub fn contiguous(path: impl Into<PathBuf>, rows: usize, cols: usize) -> Self {
        Self::new(path, cols, rows, cols)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(TilewarpError::geometry(format!(
                "{}: raster must have at least one row and column, got {}x{}",
                self.path.display(),
                self.rows,
                self.cols
            )));
        }
        if self.stride < self.cols {
            return Err(TilewarpError::geometry(format!(
                "{}: stride ({}) must be >= cols ({})",
                self.path.display(),
                self.stride,
                self.cols
            )));
        }
        if self.allocated_elements().is_none() {
            return Err(TilewarpError::geometry(format!(
                "{}: {} rows with stride {} overflow the address space",
                self.path.display(),
                self.rows,
                self.stride
            )));
        }
        Ok(())
    }

    /// Minimum number of samples the file must hold.
    pub fn required_elements(&self) -> usize {
        self.rows
            .saturating_sub(1)
            .saturating_mul(self.stride)
            .saturating_add(self.cols)
    }

    /// Samples in a freshly created file: `rows * stride`.
    fn allocated_elements(&self) -> Option<usize> {
        self.rows.checked_mul(self.stride)
    }
}

/// Decode a whole raster file.
pub fn read_raster<T: Element>(desc: &RasterDescriptor) -> Result<Vec<T>> {
    desc.validate()?;
    let bytes = std::fs::read(&desc.path)?;

    if bytes.len() % T::SIZE != 0 {
        return Err(TilewarpError::Storage {
            message: format!(
                "{}: size {} is not a multiple of the {}-byte sample size",
                desc.path.display(),
                bytes.len(),
                T::SIZE
            ),
        });
    }

    let count = bytes.len() / T::SIZE;
    if count < desc.required_elements() {
        return Err(TilewarpError::Storage {
            message: format!(
                "{}: holds {} samples but {} rows x {} cols with stride {} needs {}",
                desc.path.display(),
                count,
                desc.rows,
                desc.cols,
                desc.stride,
                desc.required_elements()
            ),
        });
    }

    debug!(path = %desc.path.display(), samples = count, "Read raster");
    Ok(bytes.chunks_exact(T::SIZE).map(T::read_le).collect())
}

/// Encode samples and write them to `path`, replacing its contents.
pub fn write_raster<T: Element>(path: &Path, data: &[T]) -> Result<()> {
    let mut bytes = Vec::with_capacity(data.len() * T::SIZE);
    for value in data {
        value.write_le(&mut bytes);
    }
    std::fs::write(path, bytes)?;
    debug!(path = %path.display(), samples = data.len(), "Wrote raster");
    Ok(())
}

/// Reproject one tile between raster files.
///
/// The projection, data format and interpolation method are all resolved
/// before any file is opened, so an unknown name never touches the target.
pub fn reproject_files(
    source: &RasterDescriptor,
    bounds: &GeoBounds,
    target: &RasterDescriptor,
    placement: &TilePlacement,
    projection_id: &str,
    config: &EngineConfig,
) -> Result<ProjectStats> {
    let projection = get_projection(projection_id)?;
    let format = DataFormat::parse(&config.data_format)?;
    let method = get_interpolator(&config.interpolation_method)?;
    source.validate()?;
    target.validate()?;
    bounds.validate()?;
    placement.validate()?;

    info!(
        source = %source.path.display(),
        target = %target.path.display(),
        projection = projection.id(),
        format = format.name(),
        method = method.name(),
        "Reprojecting tile"
    );

    let start = Instant::now();
    let stats = match format {
        DataFormat::Float64 => {
            reproject_typed::<f64>(source, bounds, target, placement, projection_id, method, config)
        }
        DataFormat::Float32 => {
            reproject_typed::<f32>(source, bounds, target, placement, projection_id, method, config)
        }
        DataFormat::Int32 => {
            reproject_typed::<i32>(source, bounds, target, placement, projection_id, method, config)
        }
        DataFormat::Int16 => {
            reproject_typed::<i16>(source, bounds, target, placement, projection_id, method, config)
        }
        DataFormat::UInt16 => {
            reproject_typed::<u16>(source, bounds, target, placement, projection_id, method, config)
        }
        DataFormat::UInt8 => {
            reproject_typed::<u8>(source, bounds, target, placement, projection_id, method, config)
        }
    }?;

    log_reprojection_stats(
        projection.id(),
        method.name(),
        format.name(),
        (source.rows, source.cols),
        (target.rows, target.cols),
        &stats,
        start,
    );

    Ok(stats)
}

fn reproject_typed<T: Element>(
    source: &RasterDescriptor,
    bounds: &GeoBounds,
    target: &RasterDescriptor,
    placement: &TilePlacement,
    projection_id: &str,
    method: InterpolationMethod,
    config: &EngineConfig,
) -> Result<ProjectStats> {
    let src_data = read_raster::<T>(source)?;
    let mut dst_data = if target.path.exists() {
        read_raster::<T>(target)?
    } else {
        vec![T::no_data(); target.rows.saturating_mul(target.stride)]
    };

    let stats = {
        let src_grid = Grid::new(&src_data, source.stride, source.rows, source.cols)?;
        let mut dst_grid = GridMut::new(&mut dst_data, target.stride, target.rows, target.cols)?;
        reproject(
            &src_grid,
            bounds,
            &mut dst_grid,
            placement,
            projection_id,
            method,
            &config.options(),
        )?
    };

    write_raster(&target.path, &dst_data)?;
    Ok(stats)
}
