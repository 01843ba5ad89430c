use std::fmt;

use log::{debug, info, warn};

use crate::{ConservedBlock, ParameterError, ParameterInput, ProblemParameters, Variable};

/// Scale applied to the flow ratio to obtain the x-momentum.
pub const VELOCITY_SCALE: f64 = 0.1;

/// The uniform conserved state written into every cell of a block.
///
/// All quantities are evaluated once, at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialState {
    pub time: f64,
    pub flow_ratio: f64,
    pub density: f64,
    pub momentum_x: f64,
    pub momentum_y: f64,
    pub momentum_z: f64,
    pub energy: f64,
    internal_energy: f64,
    kinetic_energy: f64,
}

impl InitialState {
    /// Evaluates the models at `time` and derives the conserved state.
    ///
    /// The total energy is `p·F / (γ − 1) + ½·ρ·(0.1·F)²`, where `F` is the
    /// flow ratio.
    #[must_use]
    pub fn new(params: &ProblemParameters, time: f64) -> Self {
        let density = params.density_model().density(time);
        let flow_ratio = params.flow_ratio_model().ratio(time);
        let velocity = flow_ratio * VELOCITY_SCALE;

        let internal_energy = params.pressure * flow_ratio / (params.gamma - 1.0);
        let kinetic_energy = 0.5 * density * velocity.powi(2);

        Self {
            time,
            flow_ratio,
            density,
            momentum_x: velocity,
            momentum_y: 0.0,
            momentum_z: 0.0,
            energy: internal_energy + kinetic_energy,
            internal_energy,
            kinetic_energy,
        }
    }

    /// Returns the internal energy density term, `p·F / (γ − 1)`.
    #[must_use]
    pub fn internal_energy(&self) -> f64 {
        self.internal_energy
    }

    /// Returns the kinetic energy term, `½·ρ·(0.1·F)²`.
    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        self.kinetic_energy
    }

    /// Writes this state into every active cell of `block`.
    pub fn fill<B: ConservedBlock + ?Sized>(&self, block: &mut B) {
        let b = block.bounds();
        for k in b.ks..=b.ke {
            for j in b.js..=b.je {
                for i in b.is..=b.ie {
                    block.set(Variable::Density, k, j, i, self.density);
                    block.set(Variable::MomentumX, k, j, i, self.momentum_x);
                    block.set(Variable::MomentumY, k, j, i, self.momentum_y);
                    block.set(Variable::MomentumZ, k, j, i, self.momentum_z);
                    block.set(Variable::Energy, k, j, i, self.energy);
                }
            }
        }
    }
}

/// Problem generator for the time-density model.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeDensityProblem;

impl TimeDensityProblem {
    /// Initializes `block` at simulation time `time`.
    ///
    /// Parameters are read from `pin` (defaults are inserted for missing keys),
    /// suspicious values are logged but used as given, and the uniform state is
    /// written into every active cell.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the parameter store. The block is left
    /// untouched in that case.
    pub fn generate<P, B>(
        &self,
        pin: &mut P,
        block: &mut B,
        time: f64,
    ) -> Result<Report, ParameterError>
    where
        P: ParameterInput + ?Sized,
        B: ConservedBlock + ?Sized,
    {
        let parameters = ProblemParameters::read(pin)?;
        for warning in parameters.check() {
            warn!("{warning}");
        }

        let state = InitialState::new(&parameters, time);
        let report = Report { parameters, state };
        info!("{report}");

        let bounds = block.bounds();
        debug!(
            "filling {} cells in k={}..={}, j={}..={}, i={}..={}",
            bounds.cells(),
            bounds.ks,
            bounds.ke,
            bounds.js,
            bounds.je,
            bounds.is,
            bounds.ie
        );
        state.fill(block);

        Ok(report)
    }
}

/// The resolved parameters and derived state of one generator call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub parameters: ProblemParameters,
    pub state: InitialState,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.parameters;
        writeln!(f, "Time-Density Model Parameters:")?;
        writeln!(f, "  time = {}", self.state.time)?;
        writeln!(f, "  alpha = {}", p.alpha)?;
        writeln!(f, "  omega = {}", p.omega)?;
        writeln!(f, "  beta = {}", p.beta)?;
        writeln!(f, "  epsilon = {}", p.epsilon)?;
        writeln!(f, "  pressure = {}", p.pressure)?;
        writeln!(f, "  gamma = {}", p.gamma)?;
        write!(f, "  flow_ratio = {}", self.state.flow_ratio)
    }
}
