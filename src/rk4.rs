//! Classical fourth-order Runge–Kutta stepping.

use ndarray::prelude::*;

use crate::error::{try_zeroed_vec, Error};

/// Rows of scratch storage: four stage derivatives plus the intermediate
/// state at which the next stage is evaluated.
const SCRATCH_ROWS: usize = 5;
/// Row holding the intermediate state.
const STAGE_STATE: usize = 4;

/// Scratch storage for single RK4 steps of a fixed state length.
///
/// A workspace can be reused for any number of steps, and holds no state
/// that influences the next step. Concurrent steps each need their own
/// workspace.
#[derive(Clone, Debug)]
pub struct Rk4 {
    /// Storage for the stages and intermediate state, shape `(5, len)`.
    k: Array2<f64>,
}

impl Rk4 {
    /// Creates a workspace for states of `len` variables.
    pub fn new(len: usize) -> Rk4 {
        Rk4 {
            k: Array2::zeros((SCRATCH_ROWS, len)),
        }
    }

    /// Like [`Rk4::new`], but reports allocation failure as an error.
    pub fn try_new(len: usize) -> Result<Rk4, Error> {
        let data = try_zeroed_vec(SCRATCH_ROWS, len)?;
        let k = Array2::from_shape_vec((SCRATCH_ROWS, len), data).map_err(|_| {
            Error::SizeOverflow {
                rows: SCRATCH_ROWS,
                cols: len,
            }
        })?;
        Ok(Rk4 { k })
    }

    /// Number of state variables the workspace is sized for.
    pub fn len(&self) -> usize {
        self.k.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stage derivatives `k1..k4` of the most recent step, one per row.
    pub fn stages(&self) -> ArrayView2<'_, f64> {
        self.k.slice(s![..STAGE_STATE, ..])
    }

    /// Performs one RK4 step of length `h` starting at time `t`.
    ///
    /// Calling `fun(t, y, deriv_y)` should fill in `deriv_y` with the
    /// derivative of `y` at time `t`. The stages are evaluated at `t`,
    /// `t + h/2` (twice) and `t + h`. The new state is written to `y_new`.
    ///
    /// # Panics
    ///
    /// Panics if `y` or `y_new` do not have `self.len()` elements.
    pub fn step_into<F>(
        &mut self,
        mut fun: F,
        t: f64,
        h: f64,
        y: ArrayView1<'_, f64>,
        mut y_new: ArrayViewMut1<'_, f64>,
    ) where
        F: FnMut(f64, ArrayView1<'_, f64>, ArrayViewMut1<'_, f64>),
    {
        assert_eq!(y.len(), self.len(), "state length does not match workspace");
        assert_eq!(y_new.len(), self.len(), "output length does not match workspace");

        let h2 = h / 2.;
        let (mut k1, mut k2, mut k3, mut k4, mut yy) = self.k.multi_slice_mut((
            s![0, ..],
            s![1, ..],
            s![2, ..],
            s![3, ..],
            s![STAGE_STATE, ..],
        ));

        fun(t, y, k1.view_mut());
        azip!((yy in &mut yy, &y in &y, &k in &k1) *yy = y + h2 * k);
        fun(t + h2, yy.view(), k2.view_mut());
        azip!((yy in &mut yy, &y in &y, &k in &k2) *yy = y + h2 * k);
        fun(t + h2, yy.view(), k3.view_mut());
        azip!((yy in &mut yy, &y in &y, &k in &k3) *yy = y + h * k);
        fun(t + h, yy.view(), k4.view_mut());

        azip!((
            y_new in &mut y_new,
            &y in &y,
            &k1 in &k1,
            &k2 in &k2,
            &k3 in &k3,
            &k4 in &k4,
        ) {
            *y_new = y + h * (k1 + 2. * (k2 + k3) + k4) / 6.;
        });
    }
}

/// Performs one RK4 step of length `h` from `(t, y0)` and returns the new
/// state.
///
/// This allocates a fresh workspace; use [`Rk4`] directly to step many states
/// of the same length.
pub fn rk4_step<F>(fun: F, t: f64, y0: ArrayView1<'_, f64>, h: f64) -> Array1<f64>
where
    F: FnMut(f64, ArrayView1<'_, f64>, ArrayViewMut1<'_, f64>),
{
    let mut rk = Rk4::new(y0.len());
    let mut y1 = Array1::zeros(y0.len());
    rk.step_into(fun, t, h, y0, y1.view_mut());
    y1
}

/// RK4 step for states whose length is known at compile time.
///
/// All scratch lives on the stack. The arithmetic is the same as
/// [`Rk4::step_into`], so both produce identical results.
pub fn rk4_step_fixed<F, const N: usize>(mut fun: F, t: f64, y: &[f64; N], h: f64) -> [f64; N]
where
    F: FnMut(f64, &[f64; N]) -> [f64; N],
{
    let h2 = h / 2.;
    let mut yy = [0.; N];

    let k1 = fun(t, y);
    for i in 0..N {
        yy[i] = y[i] + h2 * k1[i];
    }
    let k2 = fun(t + h2, &yy);
    for i in 0..N {
        yy[i] = y[i] + h2 * k2[i];
    }
    let k3 = fun(t + h2, &yy);
    for i in 0..N {
        yy[i] = y[i] + h * k3[i];
    }
    let k4 = fun(t + h, &yy);

    let mut y_new = [0.; N];
    for i in 0..N {
        y_new[i] = y[i] + h * (k1[i] + 2. * (k2[i] + k3[i]) + k4[i]) / 6.;
    }
    y_new
}
