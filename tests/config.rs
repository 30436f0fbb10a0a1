//! 설정 파일 로드/저장 테스트.
use std::fs;
use std::path::PathBuf;

use steam_relief_sizing::app::{run_size, InletCondition, SizeRequest};
use steam_relief_sizing::config::{load_or_default, Config};
use steam_relief_sizing::units::{AreaUnit, PressureUnit};

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "steam_relief_sizing_{}_{name}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("temp dir");
    dir.join("config.toml")
}

#[test]
fn missing_config_is_created_with_defaults() {
    let path = temp_path("defaults");
    let _ = fs::remove_file(&path);

    let cfg = load_or_default(&path).expect("load");

    assert_eq!(cfg, Config::default());
    assert!(path.exists());
    assert_eq!(cfg.sizing.kd, 0.975);
    assert_eq!(cfg.sizing.atmospheric_pressure_kpa, 101.0);
    assert_eq!(cfg.sizing.allowable_overpressure, 1.10);
}

#[test]
fn saved_config_round_trips() {
    let path = temp_path("roundtrip");
    let mut cfg = Config::default();
    cfg.sizing.kd = 0.62;
    cfg.display.pressure = PressureUnit::Psi;
    cfg.display.area = AreaUnit::SquareInch;
    cfg.save(&path).expect("save");

    let loaded = load_or_default(&path).expect("load");
    assert_eq!(loaded, cfg);
    assert_eq!(loaded.engine_settings().kd, 0.62);
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let path = temp_path("partial");
    fs::write(&path, "[sizing]\nkc = 0.9\n").expect("write");

    let cfg = load_or_default(&path).expect("load");
    assert_eq!(cfg.sizing.kc, 0.9);
    assert_eq!(cfg.sizing.kd, 0.975);
    assert!(cfg.ksh_table.is_none());
}

#[test]
fn missing_table_file_is_reported() {
    let cfg = Config {
        ksh_table: Some(PathBuf::from("/nonexistent/ksh.toml")),
        ..Config::default()
    };
    let request = SizeRequest {
        set_pressure_bar_g: 10.0,
        mass_flow_kg_per_s: 1.0,
        inlet: InletCondition::Temperature(250.0),
        kd: None,
        kb: None,
        kc: None,
    };
    assert!(run_size(&cfg, &request).is_err());
}

#[test]
fn size_request_with_builtin_table() {
    let request = SizeRequest {
        set_pressure_bar_g: 10.0,
        mass_flow_kg_per_s: 2.0,
        inlet: InletCondition::Temperature(300.0),
        kd: None,
        kb: None,
        kc: None,
    };
    let state = run_size(&Config::default(), &request).expect("size");
    assert!(state.discharge_area_mm2.is_finite() && state.discharge_area_mm2 > 0.0);
    assert!(state.ksh < 1.0 && state.ksh > 0.8, "ksh={}", state.ksh);
    assert!(!state.is_saturated);
}
