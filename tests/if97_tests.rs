//! IF97 물성 제공자 회귀 테스트. 기준값은 IAPWS-IF97 증기표 값을 사용한다.
use steam_relief_sizing::steam::if97::{
    saturation_pressure_bar_abs_from_temp_c, saturation_temp_c_from_pressure_bar_abs,
};
use steam_relief_sizing::steam::{Iapws97, PropertyError, SteamPropertyProvider};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn saturation_temperature_at_one_atmosphere() {
    let t = Iapws97.tsat_p(1.01325).expect("tsat");
    assert_close("Tsat(1 atm)", t, 99.974, 1e-4);
}

#[test]
fn saturation_line_round_trips() {
    // T = 500 K → p ≈ 2.639 MPa
    let p = saturation_pressure_bar_abs_from_temp_c(500.0 - 273.15).expect("psat");
    assert_close("Psat(500K)", p, 26.39, 1e-3);
    let t = saturation_temp_c_from_pressure_bar_abs(p).expect("tsat");
    assert_close("Tsat(Psat)", t, 226.85, 1e-6);
}

#[test]
fn superheated_enthalpy_and_inverse() {
    // 10 bar(a), 250 °C → h ≈ 2942.6 kJ/kg
    let h = Iapws97.h_pt(10.0, 250.0).expect("h_pt");
    assert_close("h(10 bar, 250 C)", h, 2942.6, 1e-3);
    let t = Iapws97.t_ph(10.0, h).expect("t_ph");
    assert_close("T(p, h)", t, 250.0, 1e-4);
}

#[test]
fn wet_steam_quality() {
    // 10 bar(a): hf = 762.68, hg = 2777.12 kJ/kg
    let h = 762.68 + 0.5 * (2777.12 - 762.68);
    let x = Iapws97.x_ph(10.0, h).expect("x_ph");
    assert_close("x", x, 0.5, 1e-2);
}

#[test]
fn out_of_range_pressure_is_an_error() {
    assert!(matches!(
        Iapws97.tsat_p(250.0),
        Err(PropertyError::OutOfRange(_))
    ));
    assert!(Iapws97.h_pt(-1.0, 100.0).is_err());
    assert!(Iapws97.h_pt(f64::NAN, 100.0).is_err());
}
