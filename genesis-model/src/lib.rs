//! Closed-form scalar models of the Genesis Sphere time-density geometry.
//!
//! This crate holds the pure math used to initialize a hydrodynamics block:
//!
//! - [`TimeDensity`] — density as the product of a projection factor and a
//!   dimension expansion factor
//! - [`TemporalFlowRatio`] — a dimensionless modulator of time flow that
//!   vanishes near `t = 0` and tends to one far from it
//! - [`gravitational_time_dilation`] — the Schwarzschild clock-rate factor the
//!   time density is compared against
//! - [`TimeRange`] and [`sample`] — evenly spaced evaluation of any pair of
//!   [`TimeModel`]s

mod density;
mod flow_ratio;
mod model;
mod sample;

pub use density::{
    GRAVITATIONAL_CONSTANT, SPEED_OF_LIGHT, TimeDensity, gravitational_time_dilation,
    time_curvature, time_density,
};
pub use flow_ratio::{TemporalFlowRatio, temporal_flow_ratio};
pub use model::TimeModel;
pub use sample::{EvaluationError, Sample, SampleError, TimeRange, sample};
