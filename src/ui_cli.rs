use std::io::{self, Write};

use crate::app::AppError;
use crate::config::DisplayUnits;
use crate::sizing::{ChangeEvent, PhaseState, Property, PropertyValue, ValveSizingState};
use crate::units::*;

/// 대화형 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SetPressure,
    Temperature,
    SaturationTemperature,
    Enthalpy,
    MassFlow,
    Factors,
    Summary,
    Exit,
}

/// 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu() -> Result<MenuChoice, AppError> {
    println!("\n=== API 520 증기 안전밸브 사이징 ===");
    println!("1) 설정 압력   2) 입구 온도   3) 포화 온도 적용");
    println!("4) 비엔탈피    5) 분출 유량   6) Kd/Kb/Kc");
    println!("7) 결과 요약   0) 종료");
    loop {
        let sel = read_line("메뉴 선택: ")?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::SetPressure),
            "2" => return Ok(MenuChoice::Temperature),
            "3" => return Ok(MenuChoice::SaturationTemperature),
            "4" => return Ok(MenuChoice::Enthalpy),
            "5" => return Ok(MenuChoice::MassFlow),
            "6" => return Ok(MenuChoice::Factors),
            "7" => return Ok(MenuChoice::Summary),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("잘못된 입력입니다. 다시 선택하세요."),
        }
    }
}

/// 빈 입력이면 현재 값을 유지하며 Kd/Kb/Kc를 읽는다.
pub fn read_factors(state: &ValveSizingState) -> Result<(f64, f64, f64), AppError> {
    let kd = read_f64_or(&format!("Kd [{}]: ", state.kd), state.kd)?;
    let kb = read_f64_or(&format!("Kb [{}]: ", state.kb), state.kb)?;
    let kc = read_f64_or(&format!("Kc [{}]: ", state.kc), state.kc)?;
    Ok((kd, kb, kc))
}

pub fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

pub fn read_f64(prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}

fn read_f64_or(prompt: &str, current: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        if s.trim().is_empty() {
            return Ok(current);
        }
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}

/// NaN은 빈 칸으로 표시한다.
fn fmt_value(v: f64, precision: usize) -> String {
    if v.is_nan() {
        "-".to_string()
    } else {
        format!("{v:.precision$}")
    }
}

/// 알림 하나를 표시 단위로 환산해 출력한다.
pub fn print_event(event: &ChangeEvent, display: &DisplayUnits) {
    let PropertyValue::Number(v) = event.value else {
        println!("  {:<18} {}", event.property.name(), event.value);
        return;
    };
    let (shown, unit) = match event.property {
        Property::Temperature => (
            convert_temperature(v, TemperatureUnit::Celsius, display.temperature),
            display.temperature.symbol(),
        ),
        Property::SetPressure | Property::UpstreamPressure => (
            convert_pressure(v, PressureUnit::Bar, display.pressure),
            display.pressure.symbol(),
        ),
        Property::MassFlow => (
            convert_mass_flow(v, MassFlowUnit::KilogramPerSecond, display.mass_flow),
            display.mass_flow.symbol(),
        ),
        Property::DischargeArea => (
            convert_area(v, AreaUnit::SquareMillimeter, display.area),
            display.area.symbol(),
        ),
        Property::Enthalpy => (v, "kJ/kg"),
        _ => (v, ""),
    };
    println!(
        "  {:<18} {} {unit}",
        event.property.name(),
        fmt_value(shown, 4)
    );
}

/// 정착된 상태 전체를 출력한다.
pub fn print_state(state: &ValveSizingState, display: &DisplayUnits) {
    let p_unit = display.pressure;
    let t_unit = display.temperature;
    println!(
        "설정 압력: {} {}(g)",
        fmt_value(
            convert_pressure(state.set_pressure_bar_g, PressureUnit::Bar, p_unit),
            3
        ),
        p_unit.symbol()
    );
    println!(
        "상류 분출 압력: {} {}(a)",
        fmt_value(
            convert_pressure(state.upstream_pressure_bar_abs, PressureUnit::Bar, p_unit),
            3
        ),
        p_unit.symbol()
    );
    println!(
        "입구 온도: {} {}",
        fmt_value(
            convert_temperature(state.temperature_c, TemperatureUnit::Celsius, t_unit),
            2
        ),
        t_unit.symbol()
    );
    println!(
        "비엔탈피: {} kJ/kg, 건도: {}",
        fmt_value(state.enthalpy_kj_per_kg, 1),
        fmt_value(state.vapour_quality, 3)
    );
    println!(
        "분출 유량: {} {}",
        fmt_value(
            convert_mass_flow(
                state.mass_flow_kg_per_s,
                MassFlowUnit::KilogramPerSecond,
                display.mass_flow
            ),
            3
        ),
        display.mass_flow.symbol()
    );
    println!(
        "Kd={} Kb={} Kc={} KN={} KSH={}",
        fmt_value(state.kd, 3),
        fmt_value(state.kb, 3),
        fmt_value(state.kc, 3),
        fmt_value(state.kn, 4),
        fmt_value(state.ksh, 4)
    );
    let phase = match state.phase() {
        PhaseState::Saturated => "포화",
        PhaseState::Superheated => "과열",
    };
    println!("상태: {phase}");
    println!(
        "요구 분출 면적: {} {}",
        fmt_value(
            convert_area(
                state.discharge_area_mm2,
                AreaUnit::SquareMillimeter,
                display.area
            ),
            2
        ),
        display.area.symbol()
    );
}
