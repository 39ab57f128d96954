//! Interpolation strategies for sampling a grid at fractional positions.
//!
//! Coordinates are `(x, y)` = (column, row) with grid points at integral
//! positions, so sampling at `(c as f64, r as f64)` returns `grid.at(r, c)`.
//! Strategies are chosen once per reprojection and monomorphised into the
//! pixel loop.

pub mod bicubic;
pub mod bilinear;
pub mod common;
pub mod nearest;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::{Result, TilewarpError};
use crate::grid::Grid;

pub use bicubic::BicubicInterpolator;
pub use bilinear::BilinearInterpolator;
pub use nearest::NearestInterpolator;

/// Trait for interpolation methods
pub trait Interpolator: Send + Sync {
    /// Sample `grid` at fractional column `x` and row `y`, expected to lie in
    /// `[0, cols) x [0, rows)`. Neighbours past the last row or column are
    /// clamped to it.
    fn sample<T: Element>(&self, grid: &Grid<'_, T>, x: f64, y: f64) -> T;

    /// Get the name of this interpolation method
    fn name(&self) -> &str;
}

/// Available interpolation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    Nearest,
    Bilinear,
    Bicubic,
}

impl InterpolationMethod {
    /// Parse from a string name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "nearest" => Some(Self::Nearest),
            "bilinear" => Some(Self::Bilinear),
            "bicubic" | "cubic" => Some(Self::Bicubic),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
            Self::Bicubic => "bicubic",
        }
    }
}

impl Default for InterpolationMethod {
    fn default() -> Self {
        Self::Bilinear
    }
}

/// Get an interpolation method by name
pub fn get_interpolator(name: &str) -> Result<InterpolationMethod> {
    InterpolationMethod::from_name(name).ok_or_else(|| TilewarpError::InvalidParameter {
        param: "interpolation".to_string(),
        message: format!("Unknown interpolation method: {}", name),
    })
}
