//! Geographic extent of the source raster and placement of the target tile.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Result, TilewarpError};

/// Lat/lng extent covered by an equirectangular source grid, in degrees.
/// Row 0 of the source is the northern edge and column 0 the western edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lat_south: f64,
    pub lat_north: f64,
    pub lng_west: f64,
    pub lng_east: f64,
}

impl GeoBounds {
    pub fn new(lat_south: f64, lat_north: f64, lng_west: f64, lng_east: f64) -> Result<Self> {
        let bounds = Self {
            lat_south,
            lat_north,
            lng_west,
            lng_east,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// The whole globe: -90..90 latitude, -180..180 longitude.
    pub fn global() -> Self {
        Self {
            lat_south: -90.0,
            lat_north: 90.0,
            lng_west: -180.0,
            lng_east: 180.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let values = [self.lat_south, self.lat_north, self.lng_west, self.lng_east];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(TilewarpError::geometry(format!(
                "bounding box values must be finite: {:?}",
                self
            )));
        }
        if self.lat_north <= self.lat_south {
            return Err(TilewarpError::geometry(format!(
                "lat_north ({}) must be greater than lat_south ({})",
                self.lat_north, self.lat_south
            )));
        }
        if self.lng_east <= self.lng_west {
            return Err(TilewarpError::geometry(format!(
                "lng_east ({}) must be greater than lng_west ({})",
                self.lng_east, self.lng_west
            )));
        }
        Ok(())
    }

    /// Map a geographic position to normalized source coordinates, where
    /// `(0, 0)` is the north-west corner and `(1, 1)` the south-east corner.
    #[inline]
    pub fn to_source_normalized(&self, lng: f64, lat: f64) -> (f64, f64) {
        let x = (lng - self.lng_west) / (self.lng_east - self.lng_west);
        let y = 1.0 - (lat - self.lat_south) / (self.lat_north - self.lat_south);
        (x, y)
    }

    /// Whether normalized source coordinates fall in `[0, 1) x [0, 1)`.
    /// NaN coordinates are outside.
    #[inline]
    pub fn contains_normalized(x: f64, y: f64) -> bool {
        (0.0..1.0).contains(&x) && (0.0..1.0).contains(&y)
    }
}

impl FromStr for GeoBounds {
    type Err = TilewarpError;

    /// Parse `"south,north,west,east"`.
    fn from_str(s: &str) -> Result<Self> {
        let values = parse_list::<f64>(s, "bbox", 4)?;
        GeoBounds::new(values[0], values[1], values[2], values[3])
    }
}

/// Position of the target tile within the full projected image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub x_origin: usize,
    pub y_origin: usize,
    pub x_total: usize,
    pub y_total: usize,
}

impl TilePlacement {
    pub fn new(x_origin: usize, y_origin: usize, x_total: usize, y_total: usize) -> Result<Self> {
        let placement = Self {
            x_origin,
            y_origin,
            x_total,
            y_total,
        };
        placement.validate()?;
        Ok(placement)
    }

    /// A tile that is the whole image.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            x_origin: 0,
            y_origin: 0,
            x_total: width,
            y_total: height,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.x_total == 0 || self.y_total == 0 {
            return Err(TilewarpError::geometry(format!(
                "total image size must be non-zero, got {}x{}",
                self.x_total, self.y_total
            )));
        }
        Ok(())
    }

    /// Whether a `cols` x `rows` tile at this origin reaches past the total
    /// image size.
    pub fn exceeds(&self, cols: usize, rows: usize) -> bool {
        let past = |origin: usize, len: usize, total: usize| {
            origin.checked_add(len).map_or(true, |end| end > total)
        };
        past(self.x_origin, cols, self.x_total) || past(self.y_origin, rows, self.y_total)
    }

    /// Normalized position of tile pixel `(col, row)` within the full image.
    /// Summed in `f64` so any origin is accepted.
    #[inline]
    pub fn normalized(&self, col: usize, row: usize) -> (f64, f64) {
        (
            (col as f64 + self.x_origin as f64) / self.x_total as f64,
            (row as f64 + self.y_origin as f64) / self.y_total as f64,
        )
    }
}

impl FromStr for TilePlacement {
    type Err = TilewarpError;

    /// Parse `"x,y,total_width,total_height"`.
    fn from_str(s: &str) -> Result<Self> {
        let values = parse_list::<usize>(s, "tile", 4)?;
        TilePlacement::new(values[0], values[1], values[2], values[3])
    }
}

fn parse_list<T: FromStr>(s: &str, param: &str, expected: usize) -> Result<Vec<T>> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != expected {
        return Err(TilewarpError::InvalidParameter {
            param: param.to_string(),
            message: format!("expected {} comma-separated values, got '{}'", expected, s),
        });
    }
    parts
        .iter()
        .map(|part| {
            part.parse::<T>().map_err(|_| TilewarpError::InvalidParameter {
                param: param.to_string(),
                message: format!("invalid value: {}", part),
            })
        })
        .collect()
}
