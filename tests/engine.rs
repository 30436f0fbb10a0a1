//! 재계산 연쇄, 알림 순서, 순환 차단 테스트. 물성은 호출 횟수를 세는 가짜 제공자로 대신한다.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use approx::assert_relative_eq;
use steam_relief_sizing::sizing::{
    classify, ChangeEvent, CorrectionFactorGrid, EngineSettings, PhaseState, PropertyValue,
    ValveSizingEngine, ENTHALPY_UNSET,
};
use steam_relief_sizing::steam::{PropertyError, SteamPropertyProvider};

/// h = 2000 + 2T, T = (h - 2000) / 2, Tsat = 100 + p
struct FakeSteam {
    h_pt_calls: Cell<usize>,
    x_ph_calls: Cell<usize>,
    t_ph_calls: Cell<usize>,
    tsat_calls: Cell<usize>,
    quality: Cell<f64>,
    fail: Cell<bool>,
}

impl FakeSteam {
    fn new() -> Self {
        Self {
            h_pt_calls: Cell::new(0),
            x_ph_calls: Cell::new(0),
            t_ph_calls: Cell::new(0),
            tsat_calls: Cell::new(0),
            quality: Cell::new(1.0),
            fail: Cell::new(false),
        }
    }

    fn reset_counts(&self) {
        self.h_pt_calls.set(0);
        self.x_ph_calls.set(0);
        self.t_ph_calls.set(0);
        self.tsat_calls.set(0);
    }

    fn call(&self, counter: &Cell<usize>, value: f64) -> Result<f64, PropertyError> {
        counter.set(counter.get() + 1);
        if self.fail.get() {
            Err(PropertyError::Unavailable("offline".into()))
        } else {
            Ok(value)
        }
    }
}

impl SteamPropertyProvider for FakeSteam {
    fn h_pt(&self, _p: f64, t: f64) -> Result<f64, PropertyError> {
        self.call(&self.h_pt_calls, 2000.0 + 2.0 * t)
    }

    fn x_ph(&self, _p: f64, _h: f64) -> Result<f64, PropertyError> {
        self.call(&self.x_ph_calls, self.quality.get())
    }

    fn t_ph(&self, _p: f64, h: f64) -> Result<f64, PropertyError> {
        self.call(&self.t_ph_calls, (h - 2000.0) / 2.0)
    }

    fn tsat_p(&self, p: f64) -> Result<f64, PropertyError> {
        self.call(&self.tsat_calls, 100.0 + p)
    }
}

fn unity_grid() -> CorrectionFactorGrid {
    CorrectionFactorGrid::new(
        vec![0.0, 5000.0],
        vec![-500.0, 2000.0],
        vec![vec![1.0, 1.0], vec![1.0, 1.0]],
    )
    .expect("grid")
}

type Log = Rc<RefCell<Vec<ChangeEvent>>>;

fn record<P: SteamPropertyProvider>(engine: &mut ValveSizingEngine<P>) -> Log {
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    engine.subscribe(move |event| sink.borrow_mut().push(*event));
    log
}

fn names(log: &Log) -> Vec<&'static str> {
    log.borrow().iter().map(|e| e.property.name()).collect()
}

/// 상류 10 bar(a), 5 kg/s 로 준비된 엔진.
fn ready_engine(fake: &FakeSteam) -> ValveSizingEngine<&FakeSteam> {
    let mut engine = ValveSizingEngine::new(unity_grid(), fake);
    engine.set_upstream_pressure(10.0);
    engine.set_mass_flow(5.0);
    fake.reset_counts();
    engine
}

#[test]
fn temperature_edit_recomputes_ksh_and_enthalpy() {
    let fake = FakeSteam::new();
    let mut engine = ready_engine(&fake);
    let log = record(&mut engine);

    engine.set_temperature(250.0);

    let s = engine.state();
    assert_eq!(s.temperature_c, 250.0);
    assert_eq!(s.enthalpy_kj_per_kg, 2500.0);
    assert_eq!(s.vapour_quality, 1.0);
    assert_eq!(s.ksh, 1.0);
    assert!(!s.is_saturated);
    assert_eq!(fake.h_pt_calls.get(), 1);
    assert_eq!(fake.x_ph_calls.get(), 1);
    assert_eq!(fake.t_ph_calls.get(), 0);
    assert_eq!(
        names(&log),
        [
            "temperature",
            "enthalpy",
            "vapour_quality",
            "ksh",
            "discharge_area",
            "is_saturated"
        ]
    );
}

#[test]
fn repeated_temperature_edit_is_idempotent() {
    let fake = FakeSteam::new();
    let mut engine = ready_engine(&fake);
    let log = record(&mut engine);

    engine.set_temperature(300.0);
    let first_state = engine.state().clone();
    let first_events: Vec<ChangeEvent> = log.borrow_mut().drain(..).collect();

    engine.set_temperature(300.0);
    let second_events: Vec<ChangeEvent> = log.borrow().clone();

    assert_eq!(engine.state(), &first_state);
    assert_eq!(first_events, second_events);
}

#[test]
fn manual_enthalpy_does_not_feed_back_into_enthalpy() {
    let fake = FakeSteam::new();
    let mut engine = ready_engine(&fake);
    let log = record(&mut engine);

    engine.set_enthalpy(2600.0);

    let s = engine.state();
    assert_eq!(fake.h_pt_calls.get(), 0);
    assert_eq!(fake.t_ph_calls.get(), 1);
    assert_eq!(s.enthalpy_kj_per_kg, 2600.0);
    assert_eq!(s.temperature_c, 300.0);
    assert!(!engine.enthalpy_set_manually());
    assert_eq!(
        names(&log),
        [
            "enthalpy",
            "temperature",
            "vapour_quality",
            "ksh",
            "discharge_area",
            "is_saturated"
        ]
    );
}

#[test]
fn manual_enthalpy_guard_is_single_shot() {
    let fake = FakeSteam::new();
    let mut engine = ready_engine(&fake);

    engine.set_enthalpy(2600.0);
    fake.reset_counts();
    engine.set_temperature(200.0);

    assert_eq!(fake.h_pt_calls.get(), 1);
    assert_eq!(engine.state().enthalpy_kj_per_kg, 2400.0);
}

#[test]
fn nan_enthalpy_is_stored_as_unset_sentinel() {
    let fake = FakeSteam::new();
    let mut engine = ready_engine(&fake);
    engine.set_temperature(250.0);
    fake.reset_counts();

    engine.set_enthalpy(f64::NAN);

    let s = engine.state();
    assert_eq!(s.enthalpy_kj_per_kg, ENTHALPY_UNSET);
    assert!(s.vapour_quality.is_nan());
    assert_eq!(s.temperature_c, 250.0);
    assert!(s.is_saturated);
    assert_eq!(fake.t_ph_calls.get(), 0);
    assert_eq!(fake.x_ph_calls.get(), 0);
}

#[test]
fn infinite_enthalpy_is_stored_as_unset_sentinel() {
    for value in [f64::INFINITY, f64::NEG_INFINITY] {
        let fake = FakeSteam::new();
        let mut engine = ready_engine(&fake);
        engine.set_temperature(250.0);
        fake.reset_counts();
        let log = record(&mut engine);

        engine.set_enthalpy(value);

        let s = engine.state();
        assert_eq!(s.enthalpy_kj_per_kg, ENTHALPY_UNSET, "input {value}");
        assert!(s.vapour_quality.is_nan());
        assert_eq!(s.temperature_c, 250.0);
        assert!(s.is_saturated);
        assert!(!engine.enthalpy_set_manually());
        assert_eq!(fake.x_ph_calls.get(), 0);
        assert_eq!(fake.t_ph_calls.get(), 0);
        assert_eq!(
            names(&log),
            ["enthalpy", "vapour_quality", "discharge_area", "is_saturated"]
        );
        let published = log.borrow()[0].value;
        assert_eq!(published, PropertyValue::Number(ENTHALPY_UNSET));
    }
}

#[test]
fn provider_failure_degrades_without_panicking() {
    let fake = FakeSteam::new();
    let mut engine = ready_engine(&fake);
    fake.quality.set(0.5);
    engine.set_temperature(250.0);
    assert_eq!(engine.state().vapour_quality, 0.5);
    fake.fail.set(true);
    let log = record(&mut engine);

    engine.set_temperature(300.0);
    assert_eq!(engine.state().enthalpy_kj_per_kg, ENTHALPY_UNSET);
    assert!(engine.state().vapour_quality.is_nan());
    assert!(engine.state().discharge_area_mm2.is_finite());
    assert_eq!(
        names(&log),
        [
            "temperature",
            "enthalpy",
            "vapour_quality",
            "ksh",
            "discharge_area",
            "is_saturated"
        ]
    );

    engine.set_enthalpy(2600.0);
    let s = engine.state();
    assert!(s.vapour_quality.is_nan());
    assert!(s.temperature_c.is_nan());
    assert!(s.ksh.is_nan());
    assert!(s.discharge_area_mm2.is_nan());

    engine.set_saturation_temperature();
    assert!(engine.state().temperature_c.is_nan());
    assert!(engine.state().is_saturated);
}

#[test]
fn kn_outside_correlation_makes_area_nan() {
    let fake = FakeSteam::new();
    let mut engine = ready_engine(&fake);
    let log = record(&mut engine);

    // 230 bar(a) ≈ 3336 psia
    engine.set_upstream_pressure(230.0);

    assert!(engine.state().kn.is_nan());
    assert!(engine.state().discharge_area_mm2.is_nan());
    assert_eq!(fake.h_pt_calls.get(), 0);
    assert_eq!(fake.x_ph_calls.get(), 0);
    assert_eq!(
        names(&log),
        [
            "upstream_pressure",
            "kn",
            "ksh",
            "discharge_area",
            "is_saturated"
        ]
    );
}

#[test]
fn set_pressure_drives_upstream_pressure_and_enthalpy() {
    let fake = FakeSteam::new();
    let mut engine = ready_engine(&fake);
    engine.set_temperature(200.0);
    fake.reset_counts();
    let log = record(&mut engine);

    engine.set_set_pressure(9.0);

    let s = engine.state();
    assert_relative_eq!(s.upstream_pressure_bar_abs, (9.0 + 1.01) * 1.10, max_relative = 1e-12);
    assert_eq!(s.kn, 1.0);
    assert_eq!(s.enthalpy_kj_per_kg, 2400.0);
    assert_eq!(fake.h_pt_calls.get(), 1);
    assert_eq!(
        names(&log),
        [
            "set_pressure",
            "upstream_pressure",
            "enthalpy",
            "vapour_quality",
            "kn",
            "ksh",
            "discharge_area",
            "is_saturated"
        ]
    );
}

#[test]
fn configured_atmosphere_and_overpressure_are_used() {
    let fake = FakeSteam::new();
    let settings = EngineSettings {
        atmospheric_pressure_kpa: 101.325,
        allowable_overpressure: 1.21,
        ..EngineSettings::default()
    };
    let mut engine = ValveSizingEngine::with_settings(unity_grid(), &fake, settings);
    engine.set_set_pressure(10.0);
    assert_relative_eq!(
        engine.state().upstream_pressure_bar_abs,
        (10.0 + 1.01325) * 1.21,
        max_relative = 1e-12
    );
}

#[test]
fn discharge_area_override_does_not_cascade() {
    let fake = FakeSteam::new();
    let mut engine = ready_engine(&fake);
    engine.set_temperature(250.0);
    fake.reset_counts();
    let before = engine.state().clone();
    let log = record(&mut engine);

    engine.set_discharge_area(1234.0);

    assert_eq!(engine.state().discharge_area_mm2, 1234.0);
    assert_eq!(engine.state().ksh, before.ksh);
    assert_eq!(engine.state().enthalpy_kj_per_kg, before.enthalpy_kj_per_kg);
    assert_eq!(fake.h_pt_calls.get() + fake.x_ph_calls.get(), 0);
    assert_eq!(names(&log), ["discharge_area"]);
    assert_eq!(log.borrow()[0].value, PropertyValue::Number(1234.0));
}

#[test]
fn saturation_temperature_forces_saturated_phase() {
    let fake = FakeSteam::new();
    let mut engine = ready_engine(&fake);
    let log = record(&mut engine);

    engine.set_saturation_temperature();

    let s = engine.state();
    assert_eq!(s.temperature_c, 110.0);
    assert_eq!(s.vapour_quality, 1.0);
    assert!(s.is_saturated);
    assert_eq!(fake.tsat_calls.get(), 1);
    let events = log.borrow();
    assert_eq!(events.first().map(|e| e.property.name()), Some("temperature"));
    assert_eq!(events.last().map(|e| e.value), Some(PropertyValue::Flag(true)));
}

#[test]
fn end_to_end_area_for_5_kg_per_s_at_10_bar_abs() {
    let fake = FakeSteam::new();
    let mut engine = ValveSizingEngine::new(unity_grid(), &fake);

    engine.set_set_pressure(10.0 / 1.1 - 1.01);
    engine.set_mass_flow(5.0);

    let s = engine.state();
    assert_relative_eq!(s.upstream_pressure_bar_abs, 10.0, max_relative = 1e-12);
    assert_eq!((s.kd, s.kb, s.kc, s.kn, s.ksh), (0.975, 1.0, 1.0, 1.0, 1.0));

    let w_lb_h = 5.0 * 3600.0 / 0.453592;
    let p1_psia = 10.0 / 0.0689476;
    let a_in2 = w_lb_h / (51.5 * p1_psia * 0.975);
    assert_relative_eq!(s.discharge_area_mm2, a_in2 * 645.16, max_relative = 1e-9);
    assert_relative_eq!(s.discharge_area_mm2, 3_515.457_6, max_relative = 1e-6);
}

#[test]
fn factor_edits_rescale_the_area() {
    let fake = FakeSteam::new();
    let mut engine = ready_engine(&fake);
    let base = engine.state().discharge_area_mm2;
    let log = record(&mut engine);

    engine.set_kd(0.65);
    engine.set_kc(0.9);

    assert_relative_eq!(
        engine.state().discharge_area_mm2,
        base * 0.975 / (0.65 * 0.9),
        max_relative = 1e-12
    );
    assert_eq!(
        names(&log),
        [
            "kd",
            "discharge_area",
            "is_saturated",
            "kc",
            "discharge_area",
            "is_saturated"
        ]
    );
}

#[test]
fn unsubscribed_handlers_are_not_called() {
    let fake = FakeSteam::new();
    let mut engine = ready_engine(&fake);
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    let id = engine.subscribe(move |_| c.set(c.get() + 1));

    engine.set_mass_flow(6.0);
    assert_eq!(count.get(), 3);
    assert!(engine.unsubscribe(id));
    assert!(!engine.unsubscribe(id));
    engine.set_mass_flow(7.0);
    assert_eq!(count.get(), 3);
    assert_eq!(engine.subscriber_count(), 0);
}

#[test]
fn phase_classification() {
    assert_eq!(classify(ENTHALPY_UNSET, 1.0), PhaseState::Saturated);
    assert_eq!(classify(1770.0, 0.5), PhaseState::Saturated);
    assert_eq!(classify(2943.0, 1.0), PhaseState::Superheated);
    assert_eq!(classify(500.0, 0.0), PhaseState::Superheated);
    assert_eq!(classify(2943.0, f64::NAN), PhaseState::Superheated);
}
