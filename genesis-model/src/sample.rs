use thiserror::Error;

use crate::{TimeModel, time_curvature};

/// An inclusive range of evenly spaced simulation times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    start: f64,
    end: f64,
    count: usize,
}

/// Errors that can occur when validating a [`TimeRange`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SampleError {
    #[error("range bounds must be finite, got [{start}, {end}]")]
    NotFinite { start: f64, end: f64 },

    #[error("range start ({start}) must be less than its end ({end})")]
    Empty { start: f64, end: f64 },

    #[error("at least two samples are required, got {0}")]
    TooFewSamples(usize),
}

impl TimeRange {
    /// Creates a validated time range.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is non-finite, if `start >= end`,
    /// or if fewer than two samples are requested.
    pub fn new(start: f64, end: f64, count: usize) -> Result<Self, SampleError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SampleError::NotFinite { start, end });
        }
        if start >= end {
            return Err(SampleError::Empty { start, end });
        }
        if count < 2 {
            return Err(SampleError::TooFewSamples(count));
        }

        Ok(Self { start, end, count })
    }

    /// Returns the spacing between consecutive times.
    #[must_use]
    pub fn step(&self) -> f64 {
        (self.end - self.start) / (self.count - 1) as f64
    }

    /// Iterates over the sample times, including both endpoints.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        let last = self.count - 1;
        let step = self.step();
        (0..self.count).map(move |n| {
            // Pin the final point so rounding never overshoots the end.
            if n == last {
                self.end
            } else {
                self.start + step * n as f64
            }
        })
    }
}

/// Both models evaluated at a single time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub time: f64,
    pub density: f64,
    pub curvature: f64,
    pub flow_ratio: f64,
}

/// A model failed while sampling.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("density model failed at t = {time}")]
    Density {
        time: f64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("flow-ratio model failed at t = {time}")]
    FlowRatio {
        time: f64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Evaluates a density model and a flow-ratio model at every time in `range`.
///
/// # Errors
///
/// Stops at the first time either model fails to evaluate.
pub fn sample<D, F>(
    range: &TimeRange,
    density: &D,
    flow_ratio: &F,
) -> Result<Vec<Sample>, EvaluationError>
where
    D: TimeModel,
    F: TimeModel,
{
    range
        .times()
        .map(|time| {
            let rho = density
                .evaluate(time)
                .map_err(|err| EvaluationError::Density {
                    time,
                    source: Box::new(err),
                })?;
            let ratio = flow_ratio
                .evaluate(time)
                .map_err(|err| EvaluationError::FlowRatio {
                    time,
                    source: Box::new(err),
                })?;

            Ok(Sample {
                time,
                density: rho,
                curvature: time_curvature(rho),
                flow_ratio: ratio,
            })
        })
        .collect()
}
