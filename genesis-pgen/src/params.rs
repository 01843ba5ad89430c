use genesis_model::{TemporalFlowRatio, TimeDensity};
use thiserror::Error;

/// Errors raised by a parameter store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// The stored value could not be interpreted as a real number.
    #[error("parameter `{block}/{name}` is not a real number: `{value}`")]
    NotAReal {
        block: String,
        name: String,
        value: String,
    },

    /// The store itself failed, for example a host-side lookup error.
    #[error("parameter store unavailable: {0}")]
    Unavailable(String),
}

/// A store of named real parameters, grouped into blocks.
///
/// Mirrors the host's lookup contract: if `block/name` is present its value is
/// returned, otherwise `default` is recorded in the store and returned.
pub trait ParameterInput {
    /// Returns the real value at `block/name`, inserting `default` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored value exists but is not a real number,
    /// or if the store cannot be accessed.
    fn get_or_add_real(
        &mut self,
        block: &str,
        name: &str,
        default: f64,
    ) -> Result<f64, ParameterError>;
}

impl<P: ParameterInput + ?Sized> ParameterInput for &mut P {
    fn get_or_add_real(
        &mut self,
        block: &str,
        name: &str,
        default: f64,
    ) -> Result<f64, ParameterError> {
        (**self).get_or_add_real(block, name, default)
    }
}

/// Parameters of the time-density problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProblemParameters {
    /// Dimension expansion rate.
    pub alpha: f64,
    /// Angular frequency of the projection factor.
    pub omega: f64,
    /// Strength of the temporal flow modulation.
    pub beta: f64,
    /// Softening of the flow ratio near `t = 0`.
    pub epsilon: f64,
    /// Base pressure, modulated by the flow ratio.
    pub pressure: f64,
    /// Ratio of specific heats.
    pub gamma: f64,
}

impl Default for ProblemParameters {
    fn default() -> Self {
        Self {
            alpha: 0.01,
            omega: 1.0,
            beta: 0.5,
            epsilon: 0.001,
            pressure: 1.0,
            gamma: 5.0 / 3.0,
        }
    }
}

/// A suspicious parameter value.
///
/// Warnings never stop the generator; values are used as given.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParameterWarning {
    #[error("`{name}` is not finite ({value})")]
    NotFinite { name: &'static str, value: f64 },

    #[error("alpha is negative ({0}); density is no longer monotonic in |t|")]
    NegativeAlpha(f64),

    #[error("beta is negative ({0}); flow ratio may leave (0, 1)")]
    NegativeBeta(f64),

    #[error("epsilon is not strictly positive ({0}); flow ratio is undefined at t = 0")]
    NonPositiveEpsilon(f64),

    #[error("gamma must exceed one ({0}); internal energy is not well defined")]
    GammaNotAboveOne(f64),
}

impl ProblemParameters {
    /// Reads the parameters from `pin`, inserting defaults for missing keys.
    ///
    /// Values are read in the order `problem/alpha`, `problem/omega`,
    /// `problem/beta`, `problem/epsilon`, `problem/pressure`, `hydro/gamma`.
    /// No range checking happens here; see [`ProblemParameters::check`].
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the parameter store.
    pub fn read<P: ParameterInput + ?Sized>(pin: &mut P) -> Result<Self, ParameterError> {
        let defaults = Self::default();

        Ok(Self {
            alpha: pin.get_or_add_real("problem", "alpha", defaults.alpha)?,
            omega: pin.get_or_add_real("problem", "omega", defaults.omega)?,
            beta: pin.get_or_add_real("problem", "beta", defaults.beta)?,
            epsilon: pin.get_or_add_real("problem", "epsilon", defaults.epsilon)?,
            pressure: pin.get_or_add_real("problem", "pressure", defaults.pressure)?,
            gamma: pin.get_or_add_real("hydro", "gamma", defaults.gamma)?,
        })
    }

    /// Lists values outside the range where the models are well behaved.
    #[must_use]
    pub fn check(&self) -> Vec<ParameterWarning> {
        let mut warnings = Vec::new();

        for (name, value) in self.named() {
            if !value.is_finite() {
                warnings.push(ParameterWarning::NotFinite { name, value });
            }
        }
        if self.alpha < 0.0 {
            warnings.push(ParameterWarning::NegativeAlpha(self.alpha));
        }
        if self.beta < 0.0 {
            warnings.push(ParameterWarning::NegativeBeta(self.beta));
        }
        if self.epsilon <= 0.0 {
            warnings.push(ParameterWarning::NonPositiveEpsilon(self.epsilon));
        }
        if self.gamma <= 1.0 {
            warnings.push(ParameterWarning::GammaNotAboveOne(self.gamma));
        }

        warnings
    }

    /// Returns the density model configured by these parameters.
    #[must_use]
    pub fn density_model(&self) -> TimeDensity {
        TimeDensity::new(self.alpha, self.omega)
    }

    /// Returns the flow-ratio model configured by these parameters.
    #[must_use]
    pub fn flow_ratio_model(&self) -> TemporalFlowRatio {
        TemporalFlowRatio::new(self.beta, self.epsilon)
    }

    fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("alpha", self.alpha),
            ("omega", self.omega),
            ("beta", self.beta),
            ("epsilon", self.epsilon),
            ("pressure", self.pressure),
            ("gamma", self.gamma),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    use approx::assert_relative_eq;

    /// A store that records every lookup and never holds malformed values.
    #[derive(Default)]
    struct Recording {
        values: HashMap<(String, String), f64>,
        lookups: Vec<String>,
    }

    impl ParameterInput for Recording {
        fn get_or_add_real(
            &mut self,
            block: &str,
            name: &str,
            default: f64,
        ) -> Result<f64, ParameterError> {
            self.lookups.push(format!("{block}/{name}"));
            Ok(*self
                .values
                .entry((block.to_string(), name.to_string()))
                .or_insert(default))
        }
    }

    struct Broken;

    impl ParameterInput for Broken {
        fn get_or_add_real(&mut self, _: &str, _: &str, _: f64) -> Result<f64, ParameterError> {
            Err(ParameterError::Unavailable("host store closed".into()))
        }
    }

    #[test]
    fn defaults_are_inserted_and_returned() {
        let mut store = Recording::default();
        let params = ProblemParameters::read(&mut store).unwrap();

        assert_eq!(params, ProblemParameters::default());
        assert_relative_eq!(params.gamma, 5.0 / 3.0);
        assert_eq!(
            store.lookups,
            [
                "problem/alpha",
                "problem/omega",
                "problem/beta",
                "problem/epsilon",
                "problem/pressure",
                "hydro/gamma",
            ]
        );
        assert_eq!(store.values.len(), 6);
        assert_eq!(store.values[&("hydro".to_string(), "gamma".to_string())], 5.0 / 3.0);
    }

    #[test]
    fn stored_values_take_precedence() {
        let mut store = Recording::default();
        store
            .values
            .insert(("problem".into(), "beta".into()), 2.0);
        store
            .values
            .insert(("hydro".into(), "gamma".into()), 1.4);

        let params = ProblemParameters::read(&mut store).unwrap();
        assert_eq!(params.beta, 2.0);
        assert_eq!(params.gamma, 1.4);
        assert_eq!(params.alpha, 0.01);
    }

    #[test]
    fn store_errors_propagate() {
        let err = ProblemParameters::read(&mut Broken).unwrap_err();
        assert_eq!(err, ParameterError::Unavailable("host store closed".into()));
    }

    #[test]
    fn defaults_raise_no_warnings() {
        assert!(ProblemParameters::default().check().is_empty());
    }

    #[test]
    fn out_of_range_values_are_flagged_but_kept() {
        let params = ProblemParameters {
            alpha: -1.0,
            beta: -0.5,
            epsilon: 0.0,
            gamma: 1.0,
            pressure: f64::NAN,
            ..ProblemParameters::default()
        };

        let warnings = params.check();
        assert_eq!(warnings.len(), 5);
        assert!(matches!(
            warnings[0],
            ParameterWarning::NotFinite {
                name: "pressure",
                ..
            }
        ));
        assert!(warnings.contains(&ParameterWarning::NegativeAlpha(-1.0)));
        assert!(warnings.contains(&ParameterWarning::NegativeBeta(-0.5)));
        assert!(warnings.contains(&ParameterWarning::NonPositiveEpsilon(0.0)));
        assert!(warnings.contains(&ParameterWarning::GammaNotAboveOne(1.0)));
        assert_eq!(params.alpha, -1.0);
    }
}
