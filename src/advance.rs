//! Advancing single states and ensembles by one RK4 step.
//!
//! Every call performs exactly one step spanning `[0, dt]`. Dimensions are
//! checked before any work is done, so a failing call never produces partial
//! output.

use ndarray::prelude::*;
use tracing::debug;

use crate::ensemble::Ensemble;
use crate::error::{try_zeroed_vec, Error};
use crate::models::{Lorenz3, Lorenz40};
use crate::rk4::Rk4;
use crate::Dynamics;

/// Advances one state by a step of length `dt`.
pub fn advance<D>(dynamics: &D, y: ArrayView1<'_, f64>, dt: f64) -> Result<Array1<f64>, Error>
where
    D: Dynamics + ?Sized,
{
    let n = y.len();
    dynamics.check_len(n)?;
    let mut rk = Rk4::try_new(n)?;
    let mut y_new = Array1::from(try_zeroed_vec(n, 1)?);
    rk.step_into(|t, y, dy| dynamics.rhs(t, y, dy), 0., dt, y, y_new.view_mut());
    Ok(y_new)
}

/// Advances every member of `x` by a step of length `dt`.
///
/// Members are independent: column `j` of the result is exactly what
/// [`advance`] returns for column `j` of `x`.
pub fn advance_ensemble<D>(dynamics: &D, dt: f64, x: &Ensemble) -> Result<Ensemble, Error>
where
    D: Dynamics + ?Sized,
{
    let (n, m) = x.dim();
    dynamics.check_len(n)?;
    debug!(model = dynamics.name(), n, m, dt, "advancing ensemble");

    let mut out = Ensemble::try_zeros(n, m)?;
    let mut rk = Rk4::try_new(n)?;
    for (y, y_new) in x.columns().zip(out.columns_mut()) {
        rk.step_into(|t, y, dy| dynamics.rhs(t, y, dy), 0., dt, y, y_new);
    }
    Ok(out)
}

/// Like [`advance_ensemble`], but steps members on the rayon thread pool.
///
/// Each worker owns its own scratch storage; if it cannot be allocated the
/// call fails without output. The result is identical to the serial version.
#[cfg(feature = "parallel")]
pub fn par_advance_ensemble<D>(dynamics: &D, dt: f64, x: &Ensemble) -> Result<Ensemble, Error>
where
    D: Dynamics + Sync + ?Sized,
{
    use ndarray::parallel::prelude::*;

    let (n, m) = x.dim();
    dynamics.check_len(n)?;
    debug!(model = dynamics.name(), n, m, dt, "advancing ensemble in parallel");

    let mut out = Ensemble::try_zeros(n, m)?;
    x.columns()
        .into_par_iter()
        .zip(out.columns_mut().into_par_iter())
        .try_for_each_init(
            || Rk4::try_new(n),
            |rk, (y, y_new)| {
                let rk = rk.as_mut().map_err(|err| err.clone())?;
                rk.step_into(|t, y, dy| dynamics.rhs(t, y, dy), 0., dt, y, y_new);
                Ok::<(), Error>(())
            },
        )?;
    Ok(out)
}

/// One Lorenz-3 step of a single state, which must have exactly 3 variables.
pub fn rk4_step_l3(dt: f64, y0: ArrayView1<'_, f64>) -> Result<Array1<f64>, Error> {
    Lorenz3.check_len(y0.len())?;
    let y1 = Lorenz3::step(dt, &[y0[0], y0[1], y0[2]]);
    Ok(Array1::from(y1.to_vec()))
}

/// One Lorenz-40 step of a single state with forcing `forcing`.
pub fn rk4_step_l40(dt: f64, y0: ArrayView1<'_, f64>, forcing: f64) -> Result<Array1<f64>, Error> {
    advance(&Lorenz40::new(forcing), y0, dt)
}

/// Lorenz-3 step of every member of `x`, which must have 3 rows.
pub fn advance_l3(dt: f64, x: &Ensemble) -> Result<Ensemble, Error> {
    advance_ensemble(&Lorenz3, dt, x)
}

/// Lorenz-40 step of every member of `x` with forcing `forcing`.
pub fn advance_l40(dt: f64, x: &Ensemble, forcing: f64) -> Result<Ensemble, Error> {
    advance_ensemble(&Lorenz40::new(forcing), dt, x)
}
