//! # tilewarp
//!
//! Reprojects a tile of a geographic (latitude/longitude) raster into a tile
//! of another map projection, at any resolution and at any pixel offset
//! within a conceptually larger projected world image.
//!
//! ## Architecture
//!
//! - **Grid**: non-owning strided 2-D views over caller-owned buffers
//! - **Projection**: reverse mapping from projected image position to lng/lat
//!   (Web Mercator, Mollweide)
//! - **Interpolation**: sampling a grid at fractional positions (nearest,
//!   bilinear, bicubic)
//! - **Engine**: the parallel per-pixel sweep combining the above
//! - **Storage**: raw raster files for the command-line tool

pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod interpolation;
pub mod logging;
pub mod projection;
pub mod storage;

pub use config::{Config, EngineConfig, ReprojectJob};
pub use element::{DataFormat, Element};
pub use engine::{project, reproject, EngineOptions, ProjectStats};
pub use error::{Result, TilewarpError};
pub use geometry::{GeoBounds, TilePlacement};
pub use grid::{Grid, GridMut};
pub use interpolation::{InterpolationMethod, Interpolator};
pub use logging::{
    generate_operation_id, init_tracing, log_error, log_operation_end, log_operation_start,
    log_reprojection_stats, log_timed_operation,
};
pub use projection::{Projection, ProjectionKind};
pub use storage::{reproject_files, RasterDescriptor};
