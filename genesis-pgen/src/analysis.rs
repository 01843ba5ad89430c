use std::fmt;

use crate::{ConservedBlock, NHYDRO, ProblemParameters, Variable};

/// Aggregate statistics over the active cells of a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockSummary {
    pub cells: usize,
    pub mean_density: f64,
    pub mean_momentum_x: f64,
    pub mean_energy: f64,
    /// Mean gas pressure, `(γ − 1)·(E − ½·|m|²/ρ)`, as the hydro solver sees it.
    pub mean_pressure: f64,
    /// Root-mean-square speed `|m|/ρ` over the cells.
    pub rms_velocity: f64,
    min: [f64; NHYDRO],
    max: [f64; NHYDRO],
}

impl BlockSummary {
    /// Summarizes the active cells of `block` using ratio of specific heats `gamma`.
    ///
    /// The means of a block without active cells are NaN.
    #[must_use]
    pub fn of<B: ConservedBlock + ?Sized>(block: &B, gamma: f64) -> Self {
        let mut min = [f64::INFINITY; NHYDRO];
        let mut max = [f64::NEG_INFINITY; NHYDRO];
        let mut sums = [0.0; NHYDRO];
        let mut pressure_sum = 0.0;
        let mut speed_squared_sum = 0.0;

        let bounds = block.bounds();
        for (k, j, i) in bounds.iter() {
            let u = Variable::ALL.map(|var| block.get(var, k, j, i));
            for (n, value) in u.iter().enumerate() {
                min[n] = min[n].min(*value);
                max[n] = max[n].max(*value);
                sums[n] += value;
            }

            let [rho, m1, m2, m3, energy] = u;
            let momentum_squared = m1 * m1 + m2 * m2 + m3 * m3;
            pressure_sum += (gamma - 1.0) * (energy - 0.5 * momentum_squared / rho);
            speed_squared_sum += momentum_squared / (rho * rho);
        }

        let cells = bounds.cells();
        let count = cells as f64;

        Self {
            cells,
            mean_density: sums[Variable::Density.index()] / count,
            mean_momentum_x: sums[Variable::MomentumX.index()] / count,
            mean_energy: sums[Variable::Energy.index()] / count,
            mean_pressure: pressure_sum / count,
            rms_velocity: (speed_squared_sum / count).sqrt(),
            min,
            max,
        }
    }

    /// Returns the smallest value of `var` over the active cells.
    #[must_use]
    pub fn min(&self, var: Variable) -> f64 {
        self.min[var.index()]
    }

    /// Returns the largest value of `var` over the active cells.
    #[must_use]
    pub fn max(&self, var: Variable) -> f64 {
        self.max[var.index()]
    }

    /// Returns `true` if every variable varies by at most `tolerance` across the block.
    #[must_use]
    pub fn is_uniform(&self, tolerance: f64) -> bool {
        Variable::ALL
            .iter()
            .all(|&var| self.max(var) - self.min(var) <= tolerance)
    }
}

/// Block statistics compared against the closed-form model at a given time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TheoryComparison {
    pub time: f64,
    pub mean_density: f64,
    pub density_theory: f64,
    /// Relative density error in percent.
    pub error_percent: f64,
    pub flow_ratio: f64,
    /// Pressure `p·F` the block was initialized with.
    pub initial_pressure: f64,
    pub mean_pressure: f64,
    /// Mean block pressure scaled by the flow ratio, `⟨p⟩·F`.
    pub modulated_pressure: f64,
    /// RMS block velocity scaled by the flow ratio, `v_rms·F`.
    pub modulated_velocity: f64,
}

impl TheoryComparison {
    #[must_use]
    pub fn new(summary: &BlockSummary, params: &ProblemParameters, time: f64) -> Self {
        let density_theory = params.density_model().density(time);
        let flow_ratio = params.flow_ratio_model().ratio(time);
        let error_percent =
            (summary.mean_density - density_theory).abs() / density_theory * 100.0;

        Self {
            time,
            mean_density: summary.mean_density,
            density_theory,
            error_percent,
            flow_ratio,
            initial_pressure: params.pressure * flow_ratio,
            mean_pressure: summary.mean_pressure,
            modulated_pressure: summary.mean_pressure * flow_ratio,
            modulated_velocity: summary.rms_velocity * flow_ratio,
        }
    }
}

impl fmt::Display for TheoryComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time-Density Theory Comparison (t = {}):", self.time)?;
        writeln!(f, "  mean density   = {}", self.mean_density)?;
        writeln!(f, "  theory density = {}", self.density_theory)?;
        writeln!(f, "  error          = {:.6}%", self.error_percent)?;
        writeln!(f, "  flow ratio     = {}", self.flow_ratio)?;
        writeln!(f, "  p * flow ratio = {}", self.initial_pressure)?;
        writeln!(f, "  mean pressure  = {}", self.mean_pressure)?;
        writeln!(f, "  modulated p    = {}", self.modulated_pressure)?;
        write!(f, "  modulated v    = {}", self.modulated_velocity)
    }
}

/// Largest `v²/c²` admitted when computing a Lorentz factor.
const MAX_SPEED_SQUARED: f64 = 0.9999;

/// Special-relativistic view of a block, in units where `c = 1`.
///
/// Each cell's speed is `|m|/ρ` and its Lorentz factor is
/// `1 / sqrt(1 − min(v², 0.9999))`, so superluminal cells cap at `γ = 100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativisticSummary {
    pub cells: usize,
    pub max_velocity: f64,
    pub max_gamma: f64,
    pub mean_gamma: f64,
    pub mean_density: f64,
}

impl RelativisticSummary {
    #[must_use]
    pub fn of<B: ConservedBlock + ?Sized>(block: &B) -> Self {
        let mut max_velocity = f64::NEG_INFINITY;
        let mut max_gamma = f64::NEG_INFINITY;
        let mut gamma_sum = 0.0;
        let mut density_sum = 0.0;

        let bounds = block.bounds();
        for (k, j, i) in bounds.iter() {
            let [rho, m1, m2, m3, _] = Variable::ALL.map(|var| block.get(var, k, j, i));
            let speed = (m1 * m1 + m2 * m2 + m3 * m3).sqrt() / rho;
            let gamma = lorentz_factor(speed);

            max_velocity = max_velocity.max(speed);
            max_gamma = max_gamma.max(gamma);
            gamma_sum += gamma;
            density_sum += rho;
        }

        let cells = bounds.cells();
        let count = cells as f64;

        Self {
            cells,
            max_velocity,
            max_gamma,
            mean_gamma: gamma_sum / count,
            mean_density: density_sum / count,
        }
    }
}

impl fmt::Display for RelativisticSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Relativistic Effects ({} cells):", self.cells)?;
        writeln!(f, "  mean density   = {:e}", self.mean_density)?;
        writeln!(f, "  max velocity   = {:.6}", self.max_velocity)?;
        writeln!(f, "  mean dilation  = {:.6}", self.mean_gamma)?;
        write!(f, "  max dilation   = {:.6}", self.max_gamma)
    }
}

fn lorentz_factor(speed: f64) -> f64 {
    1.0 / (1.0 - (speed * speed).min(MAX_SPEED_SQUARED)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{InitialState, MeshBlock};

    fn filled(params: &ProblemParameters, time: f64) -> (MeshBlock, InitialState) {
        let mut block = MeshBlock::new(6, 5, 4, 2).unwrap();
        let state = InitialState::new(params, time);
        state.fill(&mut block);
        (block, state)
    }

    #[test]
    fn summary_of_fresh_block() {
        let params = ProblemParameters::default();
        let (block, state) = filled(&params, 2.0);
        let summary = BlockSummary::of(&block, params.gamma);

        assert_eq!(summary.cells, 120);
        assert!(summary.is_uniform(0.0));
        assert_relative_eq!(summary.mean_density, state.density, max_relative = 1e-12);
        assert_relative_eq!(summary.mean_momentum_x, state.momentum_x, max_relative = 1e-12);
        assert_relative_eq!(summary.mean_energy, state.energy, max_relative = 1e-12);
        assert_eq!(summary.min(Variable::MomentumY), 0.0);
        assert_eq!(summary.max(Variable::MomentumZ), 0.0);
    }

    #[test]
    fn pressure_is_recovered_where_density_is_one() {
        let params = ProblemParameters {
            pressure: 3.0,
            ..ProblemParameters::default()
        };
        let (block, state) = filled(&params, 0.0);
        let summary = BlockSummary::of(&block, params.gamma);

        assert_relative_eq!(
            summary.mean_pressure,
            params.pressure * state.flow_ratio,
            max_relative = 1e-12
        );
    }

    #[test]
    fn solver_pressure_differs_when_density_is_not_one() {
        // The fill adds ½·ρ·v² while the solver removes ½·m²/ρ with m = v.
        let params = ProblemParameters::default();
        let (block, state) = filled(&params, 2.0);
        let summary = BlockSummary::of(&block, params.gamma);

        let v = state.momentum_x;
        let rho = state.density;
        let expected = params.pressure * state.flow_ratio
            + (params.gamma - 1.0) * 0.5 * v * v * (rho - 1.0 / rho);
        assert_relative_eq!(summary.mean_pressure, expected, max_relative = 1e-12);
    }

    #[test]
    fn non_uniform_block_is_detected() {
        let params = ProblemParameters::default();
        let (mut block, state) = filled(&params, 1.0);
        let b = block.bounds();
        block.set(Variable::Density, b.ks, b.js, b.is, state.density + 0.5);

        let summary = BlockSummary::of(&block, params.gamma);
        assert!(!summary.is_uniform(1e-3));
        assert_relative_eq!(
            summary.max(Variable::Density) - summary.min(Variable::Density),
            0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn comparison_with_theory() {
        let params = ProblemParameters::default();
        let (block, state) = filled(&params, 2.0);
        let summary = BlockSummary::of(&block, params.gamma);

        let exact = TheoryComparison::new(&summary, &params, 2.0);
        assert_relative_eq!(exact.density_theory, state.density);
        assert!(exact.error_percent < 1e-10);
        assert_relative_eq!(exact.initial_pressure, state.flow_ratio);
        assert_relative_eq!(
            exact.modulated_pressure,
            summary.mean_pressure * state.flow_ratio,
            max_relative = 1e-12
        );

        // Against a later time the density has drifted from the block's.
        let later = TheoryComparison::new(&summary, &params, 3.0);
        let theory = params.density_model().density(3.0);
        assert_relative_eq!(
            later.error_percent,
            (state.density - theory).abs() / theory * 100.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn velocity_is_momentum_over_density() {
        let params = ProblemParameters::default();
        let (block, state) = filled(&params, 2.0);
        let summary = BlockSummary::of(&block, params.gamma);
        let speed = state.momentum_x / state.density;

        assert_relative_eq!(summary.rms_velocity, speed, max_relative = 1e-12);

        let comparison = TheoryComparison::new(&summary, &params, 2.0);
        assert_relative_eq!(
            comparison.modulated_velocity,
            speed * state.flow_ratio,
            max_relative = 1e-12
        );
    }

    #[test]
    fn rms_velocity_weights_fast_cells() {
        let mut block = MeshBlock::new(2, 1, 1, 0).unwrap();
        for (i, m) in [(0, 3.0), (1, 4.0)] {
            block.set(Variable::Density, 0, 0, i, 1.0);
            block.set(Variable::MomentumY, 0, 0, i, m);
        }

        let summary = BlockSummary::of(&block, 1.4);
        assert_relative_eq!(summary.rms_velocity, 12.5_f64.sqrt());
    }

    #[test]
    fn relativistic_summary_of_fresh_block() {
        let params = ProblemParameters::default();
        let (block, state) = filled(&params, 2.0);
        let rel = RelativisticSummary::of(&block);

        let v = state.momentum_x / state.density;
        let gamma = 1.0 / (1.0 - v * v).sqrt();
        assert_eq!(rel.cells, 120);
        assert_relative_eq!(rel.max_velocity, v, max_relative = 1e-12);
        assert_relative_eq!(rel.max_gamma, gamma, max_relative = 1e-12);
        assert_relative_eq!(rel.mean_gamma, gamma, max_relative = 1e-12);
        assert_relative_eq!(rel.mean_density, state.density, max_relative = 1e-12);
    }

    #[test]
    fn lorentz_factor_is_capped_for_superluminal_cells() {
        let mut block = MeshBlock::new(2, 1, 1, 0).unwrap();
        block.set(Variable::Density, 0, 0, 0, 1.0);
        block.set(Variable::Density, 0, 0, 1, 2.0);
        block.set(Variable::MomentumX, 0, 0, 1, 4.0);

        let rel = RelativisticSummary::of(&block);
        assert_relative_eq!(rel.max_velocity, 2.0);
        assert_relative_eq!(rel.max_gamma, 100.0, max_relative = 1e-9);
        assert_relative_eq!(rel.mean_gamma, 50.5, max_relative = 1e-9);
        assert_relative_eq!(rel.mean_density, 1.5);
    }
}
