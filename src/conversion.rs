//! 엔진 경계에서 사용하는 SI ↔ 야드파운드 환산과 단위 문자열 해석.

use thiserror::Error;

use crate::units::*;

/// 단위 문자열 해석 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
    /// 절대압이 필요한 곳에 게이지압 단위가 주어짐
    #[error("절대압 단위가 필요합니다: {0}")]
    GaugePressure(String),
}

/// bar(abs) → psia.
pub fn bar_abs_to_psia(p_bar_abs: f64) -> f64 {
    convert_pressure(p_bar_abs, PressureUnit::Bar, PressureUnit::Psi)
}

/// °C → °F.
pub fn celsius_to_fahrenheit(t_c: f64) -> f64 {
    convert_temperature(t_c, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit)
}

/// kg/s → lb/h.
pub fn kg_per_s_to_lb_per_h(w_kg_s: f64) -> f64 {
    convert_mass_flow(
        w_kg_s,
        MassFlowUnit::KilogramPerSecond,
        MassFlowUnit::PoundPerHour,
    )
}

/// in² → mm².
pub fn square_inch_to_square_mm(a_in2: f64) -> f64 {
    convert_area(a_in2, AreaUnit::SquareInch, AreaUnit::SquareMillimeter)
}

/// 절대압 단위 문자열을 해석한다. 게이지압 표기(barg, psig)는 받지 않는다.
pub fn parse_pressure_unit(s: &str) -> Result<PressureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "bar" | "bara" => Ok(PressureUnit::Bar),
        "kpa" | "kilopascal" => Ok(PressureUnit::KiloPascal),
        "mpa" | "megapascal" => Ok(PressureUnit::MegaPascal),
        "kg/cm2" | "kgf/cm2" => Ok(PressureUnit::KgPerCm2),
        "psi" | "psia" => Ok(PressureUnit::Psi),
        "barg" | "psig" => Err(ConversionError::GaugePressure(s.to_string())),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_temperature_unit(s: &str) -> Result<TemperatureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
        "c" | "celsius" | "°c" => Ok(TemperatureUnit::Celsius),
        "f" | "fahrenheit" | "°f" => Ok(TemperatureUnit::Fahrenheit),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_pressure_units_are_rejected() {
        assert!(matches!(
            parse_pressure_unit("barg"),
            Err(ConversionError::GaugePressure(_))
        ));
        assert!(matches!(
            parse_pressure_unit(" PSIG "),
            Err(ConversionError::GaugePressure(_))
        ));
        assert_eq!(parse_pressure_unit("bara").ok(), Some(PressureUnit::Bar));
        assert_eq!(parse_pressure_unit("psia").ok(), Some(PressureUnit::Psi));
    }
}
