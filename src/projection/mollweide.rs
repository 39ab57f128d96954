//! Mollweide equal-area pseudo-cylindrical projection on the unit sphere.
//!
//! inverse: θ = asin(y / R√2), φ = asin((2θ + sin 2θ) / π),
//!          λ = λ₀ + π·x / (2R√2·cos θ)
//!
//! Both normalized axes are rescaled to `[-2R√2, 2R√2)`, so the ellipse
//! fills the full width and the middle half of the height of a square
//! image. The plane's y axis points down the image, hence the negated
//! latitude: north is at the top. Positions outside the ellipse come out
//! as NaN latitude or |longitude| > 180.

use std::f64::consts::{PI, SQRT_2};

use super::Projection;

const R: f64 = 1.0;
const LAMBDA0: f64 = 0.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Mollweide;

impl Projection for Mollweide {
    #[inline]
    fn reverse(&self, x: f64, y: f64) -> (f64, f64) {
        let r_sqrt2 = R * SQRT_2;
        let x = x * (4.0 * r_sqrt2) - 2.0 * r_sqrt2;
        let y = y * (4.0 * r_sqrt2) - 2.0 * r_sqrt2;

        let theta = (y / r_sqrt2).asin();
        let phi = ((2.0 * theta + (2.0 * theta).sin()) / PI).asin();
        let lambda = LAMBDA0 + (PI * x) / (2.0 * r_sqrt2 * theta.cos());

        (lambda.to_degrees(), -phi.to_degrees())
    }

    fn id(&self) -> &'static str {
        "mollweide"
    }
}
