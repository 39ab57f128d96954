//! Reverse map projections.
//!
//! A projection maps a normalized position `(x, y)` in `[0, 1) x [0, 1)`
//! of the *whole* projected world image back to longitude/latitude in
//! degrees. `y = 0` is the top (north) edge of the image.

pub mod mollweide;
pub mod web_mercator;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TilewarpError};

pub use mollweide::Mollweide;
pub use web_mercator::WebMercator;

/// Trait for reverse projections. Implementations are pure functions of
/// their input.
pub trait Projection: Send + Sync {
    /// Reverse-project normalized image coordinates to `(lng, lat)` in
    /// degrees. Positions the projection does not cover may return NaN.
    fn reverse(&self, x: f64, y: f64) -> (f64, f64);

    /// Canonical identifier of this projection.
    fn id(&self) -> &'static str;
}

/// Supported projections, resolved from an identifier before any work is
/// done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    WebMercator,
    Mollweide,
}

impl ProjectionKind {
    /// Resolve a projection identifier. Unknown identifiers yield `None`;
    /// there is no default projection.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "epsg:3857" | "epsg:900913" | "webmercator" | "web_mercator" => {
                Some(Self::WebMercator)
            }
            "mollweide" | "esri:54009" => Some(Self::Mollweide),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::WebMercator => WebMercator.id(),
            Self::Mollweide => Mollweide.id(),
        }
    }

    /// Reverse-project through the concrete projection.
    #[inline]
    pub fn reverse(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Self::WebMercator => WebMercator.reverse(x, y),
            Self::Mollweide => Mollweide.reverse(x, y),
        }
    }
}

/// Get a projection by identifier
pub fn get_projection(id: &str) -> Result<ProjectionKind> {
    ProjectionKind::from_id(id).ok_or_else(|| TilewarpError::UnknownProjection { id: id.to_string() })
}
