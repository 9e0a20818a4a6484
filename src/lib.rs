//! Fixed-step classical Runge–Kutta (RK4) integration of the Lorenz-3 and
//! Lorenz-40 models, stepping every member of an ensemble independently.
//!
//! ```
//! use ndarray_lorenz_rk4::{advance_l40, Ensemble};
//!
//! // Two members of a 4-variable Lorenz-40 ring, stored as columns.
//! let x = Ensemble::from_columns(4, 2, vec![1., 2., 3., 4., 4., 3., 2., 1.]).unwrap();
//! let x1 = advance_l40(0.05, &x, 8.).unwrap();
//! assert_eq!(x1.dim(), (4, 2));
//! ```

pub mod advance;
pub mod ensemble;
pub mod error;
pub mod models;
pub mod rk4;

use ndarray::prelude::*;

pub use crate::advance::{
    advance, advance_ensemble, advance_l3, advance_l40, rk4_step_l3, rk4_step_l40,
};
#[cfg(feature = "parallel")]
pub use crate::advance::par_advance_ensemble;
pub use crate::ensemble::Ensemble;
pub use crate::error::{Error, ExpectedLen};
pub use crate::models::{Lorenz3, Lorenz40, Model};
pub use crate::rk4::{rk4_step, Rk4};

/// Right-hand side of a system `dy/dt = f(t, y)`.
pub trait Dynamics {
    /// Name used in errors and diagnostics.
    fn name(&self) -> &'static str;

    /// Number of state variables the system accepts.
    fn expected_len(&self) -> ExpectedLen;

    /// Fills in `dy` with the derivative of `y` at time offset `t`.
    ///
    /// `y` and `dy` must have a length admitted by `expected_len`; use
    /// `check_len` before evaluating untrusted states.
    fn rhs(&self, t: f64, y: ArrayView1<'_, f64>, dy: ArrayViewMut1<'_, f64>);

    /// Returns an error if a state of `len` variables is invalid for the
    /// system.
    fn check_len(&self, len: usize) -> Result<(), Error> {
        let expected = self.expected_len();
        if expected.admits(len) {
            Ok(())
        } else {
            Err(Error::InvalidDimension {
                model: self.name(),
                expected,
                found: len,
            })
        }
    }
}
