use std::convert::Infallible;

use crate::TimeModel;

/// Temporal flow ratio, modeling how time flow slows near a singularity.
///
/// `F(t) = 1 / (1 + β / (|t| + ε))`
///
/// For `β ≥ 0` and `ε > 0` the ratio lies in `(0, 1]`, equals `ε / (β + ε)` at
/// `t = 0` and approaches one as `|t|` grows.
/// The caller is responsible for keeping `ε` strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemporalFlowRatio {
    pub beta: f64,
    pub epsilon: f64,
}

impl TemporalFlowRatio {
    /// Creates a flow-ratio model with the given strength and softening.
    #[must_use]
    pub fn new(beta: f64, epsilon: f64) -> Self {
        Self { beta, epsilon }
    }

    /// Returns the flow ratio at time `t`.
    #[must_use]
    pub fn ratio(&self, t: f64) -> f64 {
        1.0 / (1.0 + self.beta / (t.abs() + self.epsilon))
    }

    /// Returns the closed-form value at `t = 0`, `ε / (β + ε)`.
    #[must_use]
    pub fn at_origin(&self) -> f64 {
        self.epsilon / (self.beta + self.epsilon)
    }
}

impl TimeModel for TemporalFlowRatio {
    type Error = Infallible;

    fn evaluate(&self, time: f64) -> Result<f64, Self::Error> {
        Ok(self.ratio(time))
    }
}

/// Evaluates the temporal flow ratio at time `t`.
#[must_use]
pub fn temporal_flow_ratio(t: f64, beta: f64, epsilon: f64) -> f64 {
    TemporalFlowRatio::new(beta, epsilon).ratio(t)
}
