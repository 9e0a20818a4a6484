//! Lorenz-3 and Lorenz-40 right-hand sides.

use ndarray::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ExpectedLen;
use crate::rk4::rk4_step_fixed;
use crate::Dynamics;

/// The classical three-variable Lorenz system with σ = 10, ρ = 28, β = 8/3.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lorenz3;

impl Lorenz3 {
    pub const SIGMA: f64 = 10.;
    pub const RHO: f64 = 28.;
    pub const BETA: f64 = 8. / 3.;
    /// Number of state variables.
    pub const LEN: usize = 3;

    /// Derivative of `y`.
    pub fn deriv(y: &[f64; 3]) -> [f64; 3] {
        [
            Self::SIGMA * (y[1] - y[0]),
            (Self::RHO - y[2]) * y[0] - y[1],
            y[0] * y[1] - Self::BETA * y[2],
        ]
    }

    /// Advances `y` by one RK4 step of length `dt`, entirely on the stack.
    pub fn step(dt: f64, y: &[f64; 3]) -> [f64; 3] {
        rk4_step_fixed(|_t, y| Self::deriv(y), 0., y, dt)
    }
}

impl Dynamics for Lorenz3 {
    fn name(&self) -> &'static str {
        "Lorenz-3"
    }

    fn expected_len(&self) -> ExpectedLen {
        ExpectedLen::Exactly(Self::LEN)
    }

    fn rhs(&self, _t: f64, y: ArrayView1<'_, f64>, mut dy: ArrayViewMut1<'_, f64>) {
        let d = Self::deriv(&[y[0], y[1], y[2]]);
        dy[0] = d[0];
        dy[1] = d[1];
        dy[2] = d[2];
    }
}

/// Returns the ring neighbours `(im2, im1, ip1)` of variable `i` out of `n`,
/// i.e. the indices `i - 2`, `i - 1` and `i + 1` modulo `n`.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn ring_neighbours(i: usize, n: usize) -> (usize, usize, usize) {
    let ip1 = (i + 1) % n;
    let im1 = (i + n - 1) % n;
    let im2 = (i + 2 * n - 2) % n;
    (im2, im1, ip1)
}

/// The cyclic Lorenz-40 model with forcing `F`:
///
/// ```text
/// dy[i] = (y[i+1] - y[i-2]) * y[i-1] - y[i] + F
/// ```
///
/// with indices taken modulo the state length. Any length of at least
/// [`Lorenz40::MIN_LEN`] is accepted; 40 is the conventional choice.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lorenz40 {
    forcing: f64,
}

impl Lorenz40 {
    /// Smallest ring on which `i - 2`, `i - 1`, `i` and `i + 1` are distinct.
    pub const MIN_LEN: usize = 4;

    pub fn new(forcing: f64) -> Lorenz40 {
        Lorenz40 { forcing }
    }

    pub fn forcing(&self) -> f64 {
        self.forcing
    }
}

impl Dynamics for Lorenz40 {
    fn name(&self) -> &'static str {
        "Lorenz-40"
    }

    fn expected_len(&self) -> ExpectedLen {
        ExpectedLen::AtLeast(Self::MIN_LEN)
    }

    fn rhs(&self, _t: f64, y: ArrayView1<'_, f64>, mut dy: ArrayViewMut1<'_, f64>) {
        let n = y.len();
        debug_assert_eq!(dy.len(), n);
        for i in 0..n {
            let (im2, im1, ip1) = ring_neighbours(i, n);
            dy[i] = (y[ip1] - y[im2]) * y[im1] - y[i] + self.forcing;
        }
    }
}

/// A model chosen at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Model {
    Lorenz3(Lorenz3),
    Lorenz40(Lorenz40),
}

impl Model {
    pub fn lorenz3() -> Model {
        Model::Lorenz3(Lorenz3)
    }

    pub fn lorenz40(forcing: f64) -> Model {
        Model::Lorenz40(Lorenz40::new(forcing))
    }
}

impl From<Lorenz3> for Model {
    fn from(model: Lorenz3) -> Model {
        Model::Lorenz3(model)
    }
}

impl From<Lorenz40> for Model {
    fn from(model: Lorenz40) -> Model {
        Model::Lorenz40(model)
    }
}

impl Dynamics for Model {
    fn name(&self) -> &'static str {
        match self {
            Model::Lorenz3(m) => m.name(),
            Model::Lorenz40(m) => m.name(),
        }
    }

    fn expected_len(&self) -> ExpectedLen {
        match self {
            Model::Lorenz3(m) => m.expected_len(),
            Model::Lorenz40(m) => m.expected_len(),
        }
    }

    fn rhs(&self, t: f64, y: ArrayView1<'_, f64>, dy: ArrayViewMut1<'_, f64>) {
        match self {
            Model::Lorenz3(m) => m.rhs(t, y, dy),
            Model::Lorenz40(m) => m.rhs(t, y, dy),
        }
    }
}

