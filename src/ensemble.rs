//! Ensembles of state vectors stored as the columns of an `n × m` array.

use ndarray::iter::{AxisIter, AxisIterMut};
use ndarray::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{try_zeroed_vec, Error};

/// `m` states of `n` variables each, one member per column.
///
/// Members are laid out column-major, so each member is contiguous in
/// memory when the ensemble is built through this type's constructors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ensemble {
    members: Array2<f64>,
}

impl Ensemble {
    /// Creates an ensemble from column-major data, where member `j` occupies
    /// `data[j * n..(j + 1) * n]`.
    pub fn from_columns(n: usize, m: usize, data: Vec<f64>) -> Result<Ensemble, Error> {
        let found = data.len();
        if n.checked_mul(m) != Some(found) {
            return Err(Error::DataLength { n, m, found });
        }
        let members = Array2::from_shape_vec((n, m).f(), data)
            .map_err(|_| Error::DataLength { n, m, found })?;
        Ok(Ensemble { members })
    }

    /// Creates an ensemble from members that must all have `n` variables.
    pub fn from_members<'a, I>(n: usize, members: I) -> Result<Ensemble, Error>
    where
        I: IntoIterator<Item = ArrayView1<'a, f64>>,
    {
        let mut data = Vec::new();
        let mut m = 0;
        for (member, y) in members.into_iter().enumerate() {
            if y.len() != n {
                return Err(Error::MemberLength {
                    member,
                    expected: n,
                    found: y.len(),
                });
            }
            data.extend(y.iter().cloned());
            m += 1;
        }
        Ensemble::from_columns(n, m, data)
    }

    /// Creates a single-member ensemble.
    pub fn from_state(y: ArrayView1<'_, f64>) -> Ensemble {
        Ensemble {
            members: y.insert_axis(Axis(1)).to_owned(),
        }
    }

    /// Zeroed `n × m` ensemble, reporting allocation failure as an error.
    pub(crate) fn try_zeros(n: usize, m: usize) -> Result<Ensemble, Error> {
        let data = try_zeroed_vec(n, m)?;
        Ensemble::from_columns(n, m, data)
    }

    /// Number of state variables per member.
    pub fn n_vars(&self) -> usize {
        self.members.nrows()
    }

    /// Number of members.
    pub fn n_members(&self) -> usize {
        self.members.ncols()
    }

    /// `(n_vars, n_members)`.
    pub fn dim(&self) -> (usize, usize) {
        self.members.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.n_members()`.
    pub fn column(&self, i: usize) -> ArrayView1<'_, f64> {
        self.members.column(i)
    }

    /// Iterator over the members in order.
    pub fn columns(&self) -> AxisIter<'_, f64, Ix1> {
        self.members.axis_iter(Axis(1))
    }

    pub(crate) fn columns_mut(&mut self) -> AxisIterMut<'_, f64, Ix1> {
        self.members.axis_iter_mut(Axis(1))
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.members.view()
    }

    pub fn into_array(self) -> Array2<f64> {
        self.members
    }

    /// Flat column-major data, the inverse of [`Ensemble::from_columns`].
    pub fn into_column_major(self) -> Vec<f64> {
        let t = self.members.reversed_axes();
        if t.is_standard_layout() {
            t.into_raw_vec()
        } else {
            t.iter().cloned().collect()
        }
    }
}

impl From<Array2<f64>> for Ensemble {
    fn from(members: Array2<f64>) -> Ensemble {
        Ensemble { members }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_members() {
        let x = Ensemble::from_columns(3, 2, vec![1., 2., 3., 4., 5., 6.]).unwrap();
        assert_eq!(x.dim(), (3, 2));
        assert_eq!(x.column(0), aview1(&[1., 2., 3.]));
        assert_eq!(x.column(1), aview1(&[4., 5., 6.]));
        assert_eq!(x.columns().count(), 2);
    }

    #[test]
    fn column_major_roundtrip_from_row_major_array() {
        let x = Ensemble::from(array![[1., 4.], [2., 5.], [3., 6.]]);
        assert_eq!(x.into_column_major(), vec![1., 2., 3., 4., 5., 6.]);
    }

    #[test]
    fn wrong_data_length() {
        match Ensemble::from_columns(3, 2, vec![0.; 5]) {
            Err(Error::DataLength { n: 3, m: 2, found: 5 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn members_must_share_length() {
        let a = array![1., 2., 3.];
        let b = array![1., 2.];
        match Ensemble::from_members(3, vec![a.view(), b.view()]) {
            Err(Error::MemberLength {
                member: 1,
                expected: 3,
                found: 2,
            }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn empty_ensemble() {
        let x = Ensemble::from_members(40, Vec::new()).unwrap();
        assert_eq!(x.dim(), (40, 0));
        assert!(x.is_empty());
    }

    #[test]
    fn zeros_report_overflow_and_exhaustion() {
        match Ensemble::try_zeros(usize::MAX, 2) {
            Err(Error::SizeOverflow {
                rows: usize::MAX,
                cols: 2,
            }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        // The element count fits in usize, the byte count does not.
        let m = usize::MAX / 16;
        match Ensemble::try_zeros(4, m) {
            Err(Error::Allocation { len, .. }) => assert_eq!(len, 4 * m),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn single_state() {
        let x = Ensemble::from_state(aview1(&[1., 2., 3., 4.]));
        assert_eq!(x.dim(), (4, 1));
        assert_eq!(x.column(0), aview1(&[1., 2., 3., 4.]));
    }
}
