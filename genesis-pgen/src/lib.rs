//! Time-density problem generator for mesh-based hydrodynamics.
//!
//! The generator reads its parameters from a host-provided store, evaluates
//! the [`genesis_model`] density and flow-ratio models once, and broadcasts
//! the resulting conserved state across a mesh block.
//!
//! The host boundary is expressed as two traits:
//!
//! - [`ParameterInput`] — "get a real value or insert the default"
//! - [`ConservedBlock`] — a writable view of one block's conserved variables
//!
//! [`InputFile`] and [`MeshBlock`] are reference implementations of both, so
//! the generator can run outside of a host.

mod analysis;
mod block;
mod generator;
mod input;
mod params;

pub use analysis::{BlockSummary, RelativisticSummary, TheoryComparison};
pub use block::{BlockError, ConservedBlock, IndexBounds, MeshBlock, NHYDRO, Variable};
pub use generator::{InitialState, Report, TimeDensityProblem, VELOCITY_SCALE};
pub use input::{InputError, InputFile};
pub use params::{ParameterError, ParameterInput, ParameterWarning, ProblemParameters};
