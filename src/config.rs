//! Configuration management for tilewarp.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)
//!
//! Engine settings are layered; the raster files, bounding box and tile
//! placement of a run only come from the command line (or environment).

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::element::DataFormat;
use crate::engine::{EngineOptions, DEFAULT_CHUNK_SIZE};
use crate::error::{Result, TilewarpError};
use crate::geometry::{GeoBounds, TilePlacement};
use crate::interpolation::InterpolationMethod;
use crate::storage::RasterDescriptor;

/// Command-line arguments for tilewarp
#[derive(Parser, Debug)]
#[command(name = "tilewarp")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Source raster file (lat/lng grid)
    #[arg(long)]
    pub source: PathBuf,

    /// Samples between the starts of consecutive source rows (defaults to --source-cols)
    #[arg(long)]
    pub source_stride: Option<usize>,

    /// Number of source rows
    #[arg(long)]
    pub source_rows: usize,

    /// Number of source columns
    #[arg(long)]
    pub source_cols: usize,

    /// Source extent as "south,north,west,east" in degrees
    #[arg(long, allow_hyphen_values = true, default_value = "-90,90,-180,180")]
    pub bbox: String,

    /// Target raster file; created if it does not exist
    #[arg(long)]
    pub target: PathBuf,

    /// Samples between the starts of consecutive target rows (defaults to --target-cols)
    #[arg(long)]
    pub target_stride: Option<usize>,

    /// Number of target rows
    #[arg(long)]
    pub target_rows: usize,

    /// Number of target columns
    #[arg(long)]
    pub target_cols: usize,

    /// Tile placement as "x,y,total_width,total_height" in pixels
    /// (defaults to the target being the whole image)
    #[arg(long)]
    pub tile: Option<String>,

    /// Projection identifier (epsg:3857, mollweide)
    #[arg(short = 'P', long, env = "TILEWARP_PROJECTION", default_value = "epsg:3857")]
    pub projection: String,

    /// Sample format of both rasters
    #[arg(short, long, env = "TILEWARP_FORMAT")]
    pub format: Option<String>,

    /// Interpolation method (nearest, bilinear, bicubic)
    #[arg(short, long, env = "TILEWARP_METHOD")]
    pub method: Option<String>,

    /// Number of worker threads
    #[arg(short, long, env = "TILEWARP_WORKERS")]
    pub workers: Option<usize>,

    /// Minimum pixels per parallel task
    #[arg(long, env = "TILEWARP_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "TILEWARP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TILEWARP_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Reprojection engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of worker threads (None = rayon's default, one per CPU core)
    #[serde(default)]
    pub workers: Option<usize>,

    /// Minimum pixels per parallel task
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Default interpolation method
    #[serde(default = "default_interpolation")]
    pub interpolation_method: String,

    /// Sample format of raster files
    #[serde(default = "default_data_format")]
    pub data_format: String,
}

impl EngineConfig {
    pub fn options(&self) -> EngineOptions {
        EngineOptions {
            workers: self.workers,
            chunk_size: self.chunk_size,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Engine configuration
    #[serde(default)]
    pub engine: EngineConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// One tile reprojection request.
#[derive(Debug, Clone, PartialEq)]
pub struct ReprojectJob {
    pub source: RasterDescriptor,
    pub bounds: GeoBounds,
    pub target: RasterDescriptor,
    pub placement: TilePlacement,
    pub projection: String,
}

impl ReprojectJob {
    /// Build the request from parsed arguments.
    pub fn from_args(args: &Args) -> Result<Self> {
        let source = RasterDescriptor::new(
            &args.source,
            args.source_stride.unwrap_or(args.source_cols),
            args.source_rows,
            args.source_cols,
        );
        let target = RasterDescriptor::new(
            &args.target,
            args.target_stride.unwrap_or(args.target_cols),
            args.target_rows,
            args.target_cols,
        );
        let bounds: GeoBounds = args.bbox.parse()?;
        let placement = match &args.tile {
            Some(tile) => tile.parse()?,
            None => TilePlacement::full(args.target_cols, args.target_rows),
        };

        Ok(Self {
            source,
            bounds,
            target,
            placement,
            projection: args.projection.clone(),
        })
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, ReprojectJob)> {
        let args = Args::parse();
        Self::from_args(&args)
    }

    /// Layer the config file and arguments over the defaults.
    pub fn from_args(args: &Args) -> Result<(Self, ReprojectJob)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if args.workers.is_some() {
            config.engine.workers = args.workers;
        }
        if let Some(chunk_size) = args.chunk_size {
            config.engine.chunk_size = chunk_size;
        }
        if let Some(method) = &args.method {
            config.engine.interpolation_method = method.clone();
        }
        if let Some(format) = &args.format {
            config.engine.data_format = format.clone();
        }
        if let Some(log_level) = &args.log_level {
            config.log_level = log_level.clone();
        }

        let job = ReprojectJob::from_args(args)?;
        Ok((config, job))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.engine.workers.is_some() {
            self.engine.workers = other.engine.workers;
        }
        self.engine.chunk_size = other.engine.chunk_size;
        self.engine.interpolation_method = other.engine.interpolation_method;
        self.engine.data_format = other.engine.data_format;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(TilewarpError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        // Validate interpolation method
        if InterpolationMethod::from_name(&self.engine.interpolation_method).is_none() {
            return Err(TilewarpError::Config {
                message: format!(
                    "Invalid interpolation method: {}. Must be one of: nearest, bilinear, bicubic",
                    self.engine.interpolation_method
                ),
            });
        }

        // Validate data format
        if DataFormat::from_name(&self.engine.data_format).is_none() {
            return Err(TilewarpError::Config {
                message: format!(
                    "Invalid data format: {}. Must be one of: float64, float32, int32, int16, uint16, uint8",
                    self.engine.data_format
                ),
            });
        }

        self.engine
            .options()
            .validate()
            .map_err(|e| TilewarpError::Config {
                message: e.to_string(),
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: None,
            chunk_size: default_chunk_size(),
            interpolation_method: default_interpolation(),
            data_format: default_data_format(),
        }
    }
}

// Default value functions for serde
fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_interpolation() -> String {
    "bilinear".to_string()
}

fn default_data_format() -> String {
    "float64".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
