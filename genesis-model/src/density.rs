use std::convert::Infallible;

use crate::TimeModel;

/// Density as a function of simulation time.
///
/// The density is the product of two factors:
///
/// - the projection factor `S(t) = 1 / (1 + sin²(ω·t))`, bounded in `[0.5, 1]`
/// - the dimension expansion factor `D(t) = 1 + α·t²`
///
/// The shape volume is taken to be one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeDensity {
    pub alpha: f64,
    pub omega: f64,
}

impl TimeDensity {
    /// Creates a density model with the given expansion rate and angular frequency.
    #[must_use]
    pub fn new(alpha: f64, omega: f64) -> Self {
        Self { alpha, omega }
    }

    /// Returns the projection factor `S(t) = 1 / (1 + sin²(ω·t))`.
    #[must_use]
    pub fn projection_factor(&self, t: f64) -> f64 {
        1.0 / (1.0 + (self.omega * t).sin().powi(2))
    }

    /// Returns the dimension expansion factor `D(t) = 1 + α·t²`.
    #[must_use]
    pub fn expansion_factor(&self, t: f64) -> f64 {
        1.0 + self.alpha * t * t
    }

    /// Returns the density `ρ(t) = S(t)·D(t)`.
    #[must_use]
    pub fn density(&self, t: f64) -> f64 {
        self.projection_factor(t) * self.expansion_factor(t)
    }

    /// Returns the time curvature `1 / ρ(t)`.
    #[must_use]
    pub fn curvature(&self, t: f64) -> f64 {
        time_curvature(self.density(t))
    }
}

impl TimeModel for TimeDensity {
    type Error = Infallible;

    fn evaluate(&self, time: f64) -> Result<f64, Self::Error> {
        Ok(self.density(time))
    }
}

/// Evaluates the time-density model at time `t`.
#[must_use]
pub fn time_density(t: f64, alpha: f64, omega: f64) -> f64 {
    TimeDensity::new(alpha, omega).density(t)
}

/// Returns the time curvature, the inverse of a time density.
#[must_use]
pub fn time_curvature(density: f64) -> f64 {
    1.0 / density
}

/// Newtonian gravitational constant [m³ kg⁻¹ s⁻²].
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

/// Speed of light [m/s], rounded as in the time-dilation comparisons.
pub const SPEED_OF_LIGHT: f64 = 3.0e8;

/// Returns the gravitational time dilation factor `sqrt(1 − 2GM / (r·c²))`.
///
/// `radius` is in meters and `mass` in kilograms. The factor is zero at the
/// Schwarzschild radius and NaN inside it.
#[must_use]
pub fn gravitational_time_dilation(radius: f64, mass: f64) -> f64 {
    (1.0 - 2.0 * GRAVITATIONAL_CONSTANT * mass / (radius * SPEED_OF_LIGHT * SPEED_OF_LIGHT)).sqrt()
}
