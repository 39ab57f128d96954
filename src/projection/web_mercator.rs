//! Spherical Web Mercator (EPSG:3857).
//!
//! inverse: λ = 360·x - 180, φ = atan(sinh(π·(1 - 2y)))
//!
//! The image is square in the projected plane and clips at about ±85.05°.

use std::f64::consts::PI;

use super::Projection;

#[derive(Debug, Clone, Copy, Default)]
pub struct WebMercator;

impl Projection for WebMercator {
    #[inline]
    fn reverse(&self, x: f64, y: f64) -> (f64, f64) {
        let lng = x * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
        (lng, lat)
    }

    fn id(&self) -> &'static str {
        "epsg:3857"
    }
}
