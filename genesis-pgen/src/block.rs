use ndarray::{Array4, ArrayView3, s};
use thiserror::Error;

/// Number of conserved hydrodynamic variables.
pub const NHYDRO: usize = 5;

/// A conserved hydrodynamic variable, in host storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    Density,
    MomentumX,
    MomentumY,
    MomentumZ,
    Energy,
}

impl Variable {
    /// All variables in storage order.
    pub const ALL: [Variable; NHYDRO] = [
        Variable::Density,
        Variable::MomentumX,
        Variable::MomentumY,
        Variable::MomentumZ,
        Variable::Energy,
    ];

    /// Returns the storage index (`IDN`, `IM1`, `IM2`, `IM3`, `IEN`).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Variable::Density => 0,
            Variable::MomentumX => 1,
            Variable::MomentumY => 2,
            Variable::MomentumZ => 3,
            Variable::Energy => 4,
        }
    }
}

/// Inclusive index bounds of the active cells of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBounds {
    pub is: usize,
    pub ie: usize,
    pub js: usize,
    pub je: usize,
    pub ks: usize,
    pub ke: usize,
}

impl IndexBounds {
    /// Returns the number of active cells.
    ///
    /// An axis whose end lies before its start contributes no cells.
    #[must_use]
    pub fn cells(&self) -> usize {
        (self.ie + 1).saturating_sub(self.is)
            * (self.je + 1).saturating_sub(self.js)
            * (self.ke + 1).saturating_sub(self.ks)
    }

    /// Iterates over `(k, j, i)` with `i` varying fastest.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize)> + use<> {
        let Self {
            is,
            ie,
            js,
            je,
            ks,
            ke,
        } = *self;

        (ks..=ke).flat_map(move |k| (js..=je).flat_map(move |j| (is..=ie).map(move |i| (k, j, i))))
    }
}

/// A writable view of one mesh block's conserved variables.
///
/// Implementations own the storage; callers address cells by variable and
/// `(k, j, i)` within [`ConservedBlock::bounds`].
/// Indices outside the allocated storage are a caller bug and may panic.
pub trait ConservedBlock {
    /// Returns the bounds of the active (non-ghost) cells.
    fn bounds(&self) -> IndexBounds;

    /// Returns the value of `var` in cell `(k, j, i)`.
    fn get(&self, var: Variable, k: usize, j: usize, i: usize) -> f64;

    /// Sets the value of `var` in cell `(k, j, i)`.
    fn set(&mut self, var: Variable, k: usize, j: usize, i: usize, value: f64);
}

/// Errors that can occur when allocating a [`MeshBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("block must have at least one cell along x{axis}")]
    NoCells { axis: usize },

    #[error("a block with nx3 > 1 must also have nx2 > 1")]
    MissingSecondDimension,
}

/// A mesh block of conserved variables with ghost zones.
///
/// Storage is a `(NHYDRO, nk, nj, ni)` array.
/// Ghost zones surround the active cells along each direction that has more
/// than one cell; a direction with a single cell has no ghosts and index zero.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBlock {
    u: Array4<f64>,
    bounds: IndexBounds,
}

impl MeshBlock {
    /// Allocates a zeroed block of `nx1 × nx2 × nx3` active cells.
    ///
    /// # Errors
    ///
    /// Returns an error if any direction has no cells, or if the block is
    /// three-dimensional without a second dimension.
    pub fn new(nx1: usize, nx2: usize, nx3: usize, nghost: usize) -> Result<Self, BlockError> {
        for (axis, n) in [(1, nx1), (2, nx2), (3, nx3)] {
            if n == 0 {
                return Err(BlockError::NoCells { axis });
            }
        }
        if nx3 > 1 && nx2 == 1 {
            return Err(BlockError::MissingSecondDimension);
        }

        let (is, ie, ni) = axis_extent(nx1, nghost, true);
        let (js, je, nj) = axis_extent(nx2, nghost, nx2 > 1);
        let (ks, ke, nk) = axis_extent(nx3, nghost, nx3 > 1);

        Ok(Self {
            u: Array4::zeros((NHYDRO, nk, nj, ni)),
            bounds: IndexBounds {
                is,
                ie,
                js,
                je,
                ks,
                ke,
            },
        })
    }

    /// Returns the full conserved array, ghost zones included.
    #[must_use]
    pub fn conserved(&self) -> &Array4<f64> {
        &self.u
    }

    /// Returns the active cells of one variable.
    #[must_use]
    pub fn active(&self, var: Variable) -> ArrayView3<'_, f64> {
        let b = self.bounds;
        self.u
            .slice(s![var.index(), b.ks..=b.ke, b.js..=b.je, b.is..=b.ie])
    }
}

impl ConservedBlock for MeshBlock {
    fn bounds(&self) -> IndexBounds {
        self.bounds
    }

    fn get(&self, var: Variable, k: usize, j: usize, i: usize) -> f64 {
        self.u[[var.index(), k, j, i]]
    }

    fn set(&mut self, var: Variable, k: usize, j: usize, i: usize, value: f64) {
        self.u[[var.index(), k, j, i]] = value;
    }
}

/// Returns `(start, end, allocated)` for one direction.
fn axis_extent(n: usize, nghost: usize, with_ghosts: bool) -> (usize, usize, usize) {
    if with_ghosts {
        (nghost, nghost + n - 1, n + 2 * nghost)
    } else {
        (0, 0, 1)
    }
}
