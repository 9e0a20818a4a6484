extern crate ndarray;
extern crate ndarray_lorenz_rk4;

use ndarray::prelude::*;

use ndarray_lorenz_rk4::models::ring_neighbours;
use ndarray_lorenz_rk4::{Dynamics, Error, ExpectedLen, Lorenz3, Lorenz40, Model};

fn eval<D: Dynamics>(dynamics: &D, y: ArrayView1<f64>) -> Array1<f64> {
    let mut dy = Array1::zeros(y.len());
    dynamics.rhs(0., y, dy.view_mut());
    dy
}

#[test]
fn lorenz3_rhs() {
    let dy = eval(&Lorenz3, aview1(&[1., 1., 1.]));
    assert_eq!(dy, array![0., 26., 1. - 8. / 3.]);
    assert_eq!(Lorenz3::deriv(&[1., 2., 0.]), [10., 26., 2.]);
}

#[test]
fn lorenz3_fixed_point_at_origin() {
    assert_eq!(Lorenz3::deriv(&[0., 0., 0.]), [0., 0., 0.]);
}

#[test]
fn ring_neighbours_wrap_backwards() {
    assert_eq!(ring_neighbours(0, 4), (2, 3, 1));
    assert_eq!(ring_neighbours(1, 4), (3, 0, 2));
    assert_eq!(ring_neighbours(3, 4), (1, 2, 0));
    assert_eq!(ring_neighbours(20, 40), (18, 19, 21));
    assert_eq!(ring_neighbours(39, 40), (37, 38, 0));
}

#[test]
fn lorenz40_rhs() {
    let dy = eval(&Lorenz40::new(8.), aview1(&[1., 2., 3., 4.]));
    // dy[0] = (y[1] - y[2]) * y[3] - y[0] + F
    assert_eq!(dy, array![3., 5., 11., 1.]);
}

#[test]
fn lorenz40_uniform_state_is_stationary() {
    let f = 8.;
    let dy = eval(&Lorenz40::new(f), Array1::from_elem(40, f).view());
    assert!(dy.iter().all(|&d| d == 0.));
}

#[test]
fn time_offset_has_no_effect() {
    let model = Model::lorenz40(8.);
    let y = array![0.5, -1., 2., 0.25, 3.];
    let mut dy0 = Array1::zeros(5);
    let mut dy1 = Array1::zeros(5);
    model.rhs(0., y.view(), dy0.view_mut());
    model.rhs(123.4, y.view(), dy1.view_mut());
    assert_eq!(dy0, dy1);
}

#[test]
fn model_delegates() {
    assert_eq!(Model::lorenz3().name(), "Lorenz-3");
    assert_eq!(Model::from(Lorenz40::new(1.)).name(), "Lorenz-40");
    assert_eq!(Model::lorenz3().expected_len(), ExpectedLen::Exactly(3));
    assert_eq!(Model::lorenz40(8.).expected_len(), ExpectedLen::AtLeast(4));
    assert_eq!(Lorenz40::new(8.).forcing(), 8.);
}

#[test]
fn dimension_checks() {
    assert!(Lorenz3.check_len(3).is_ok());
    assert!(Lorenz40::new(8.).check_len(4).is_ok());
    assert!(Lorenz40::new(8.).check_len(40).is_ok());

    match Lorenz3.check_len(4) {
        Err(Error::InvalidDimension {
            model: "Lorenz-3",
            expected: ExpectedLen::Exactly(3),
            found: 4,
        }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    match Lorenz40::new(8.).check_len(3) {
        Err(Error::InvalidDimension {
            expected: ExpectedLen::AtLeast(4),
            found: 3,
            ..
        }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn dimension_error_message() {
    let err = Lorenz3.check_len(2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid dimension for Lorenz-3: expected exactly 3 state variables, found 2"
    );
}

#[cfg(feature = "serde")]
#[test]
fn model_from_json() {
    let model: Model = serde_json::from_str(r#"{"lorenz40":{"forcing":8.0}}"#).unwrap();
    assert_eq!(model, Model::lorenz40(8.));
    let json = serde_json::to_string(&Model::lorenz40(8.)).unwrap();
    assert_eq!(json, r#"{"lorenz40":{"forcing":8.0}}"#);
}
