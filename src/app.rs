use std::sync::Arc;

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::sizing::{GridError, ValveSizingEngine, ValveSizingState};
use crate::steam::Iapws97;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 보정계수 표 오류
    #[error("KSH 표 오류: {0}")]
    Grid(#[from] GridError),
}

/// 입구 증기 조건을 무엇으로 지정할지.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InletCondition {
    /// 온도 [°C]
    Temperature(f64),
    /// 비엔탈피 [kJ/kg]
    Enthalpy(f64),
    /// 상류 압력의 포화온도
    Saturated,
}

/// 일괄 사이징 요청. 보정계수가 `None`이면 설정값을 쓴다.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeRequest {
    pub set_pressure_bar_g: f64,
    pub mass_flow_kg_per_s: f64,
    pub inlet: InletCondition,
    pub kd: Option<f64>,
    pub kb: Option<f64>,
    pub kc: Option<f64>,
}

/// 설정의 표와 상수로 IF97 기반 엔진을 만든다.
pub fn build_engine(config: &Config) -> Result<ValveSizingEngine<Iapws97>, AppError> {
    let grid = Arc::new(config.load_grid()?);
    Ok(ValveSizingEngine::with_settings(
        grid,
        Iapws97,
        config.engine_settings(),
    ))
}

/// 사용자가 입력하는 순서(보정계수 → 압력 → 유량 → 입구 조건)대로 값을 넣고 정착된 상태를 돌려준다.
pub fn run_size(config: &Config, request: &SizeRequest) -> Result<ValveSizingState, AppError> {
    let mut engine = build_engine(config)?;
    if let Some(kd) = request.kd {
        engine.set_kd(kd);
    }
    if let Some(kb) = request.kb {
        engine.set_kb(kb);
    }
    if let Some(kc) = request.kc {
        engine.set_kc(kc);
    }
    engine.set_set_pressure(request.set_pressure_bar_g);
    engine.set_mass_flow(request.mass_flow_kg_per_s);
    match request.inlet {
        InletCondition::Temperature(t) => engine.set_temperature(t),
        InletCondition::Enthalpy(h) => engine.set_enthalpy(h),
        InletCondition::Saturated => engine.set_saturation_temperature(),
    }
    Ok(engine.state().clone())
}

/// 대화형 편집 루프를 실행한다. 각 편집의 변경 알림을 바로 출력한다.
pub fn run_interactive(config: &Config) -> Result<(), AppError> {
    let mut engine = build_engine(config)?;
    let display = config.display.clone();
    engine.subscribe(move |event| ui_cli::print_event(event, &display));
    loop {
        match ui_cli::main_menu()? {
            MenuChoice::SetPressure => {
                let v = ui_cli::read_f64("설정 압력 [bar(g)]: ")?;
                engine.set_set_pressure(v);
            }
            MenuChoice::Temperature => {
                let v = ui_cli::read_f64("입구 온도 [°C]: ")?;
                engine.set_temperature(v);
            }
            MenuChoice::SaturationTemperature => engine.set_saturation_temperature(),
            MenuChoice::Enthalpy => {
                let v = ui_cli::read_f64("비엔탈피 [kJ/kg]: ")?;
                engine.set_enthalpy(v);
            }
            MenuChoice::MassFlow => {
                let v = ui_cli::read_f64("분출 유량 [kg/s]: ")?;
                engine.set_mass_flow(v);
            }
            MenuChoice::Factors => {
                let (kd, kb, kc) = ui_cli::read_factors(engine.state())?;
                engine.set_kd(kd);
                engine.set_kb(kb);
                engine.set_kc(kc);
            }
            MenuChoice::Summary => ui_cli::print_state(engine.state(), &config.display),
            MenuChoice::Exit => break,
        }
    }
    Ok(())
}
