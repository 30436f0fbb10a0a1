use serde::{Deserialize, Serialize};

/// 압력 단위. 내부 기준은 bar이며 게이지/절대 구분은 호출 측이 유지한다.
///
/// 스케일만 변환하므로 절대압은 절대압으로, 게이지압은 게이지압으로 남는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Bar,
    KiloPascal,
    MegaPascal,
    KgPerCm2,
    Psi,
}

const PSI_TO_BAR: f64 = 0.0689476;

/// 주어진 압력을 bar로 변환한다.
pub fn to_bar(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Bar => value,
        PressureUnit::KiloPascal => value / 100.0,
        PressureUnit::MegaPascal => value * 10.0,
        PressureUnit::KgPerCm2 => value * 0.980665,
        PressureUnit::Psi => value * PSI_TO_BAR,
    }
}

/// bar 값을 원하는 단위로 변환한다.
pub fn from_bar(value_bar: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Bar => value_bar,
        PressureUnit::KiloPascal => value_bar * 100.0,
        PressureUnit::MegaPascal => value_bar / 10.0,
        PressureUnit::KgPerCm2 => value_bar / 0.980665,
        PressureUnit::Psi => value_bar / PSI_TO_BAR,
    }
}

/// 압력을 원하는 단위로 변환한다.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    from_bar(to_bar(value, from), to)
}

impl PressureUnit {
    /// 출력용 단위 표기.
    pub fn symbol(self) -> &'static str {
        match self {
            PressureUnit::Bar => "bar",
            PressureUnit::KiloPascal => "kPa",
            PressureUnit::MegaPascal => "MPa",
            PressureUnit::KgPerCm2 => "kg/cm²",
            PressureUnit::Psi => "psi",
        }
    }
}
