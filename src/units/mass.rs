use serde::{Deserialize, Serialize};

/// 질량유량 단위. 내부 기준은 kg/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassFlowUnit {
    KilogramPerSecond,
    KilogramPerHour,
    TonnePerHour,
    PoundPerHour,
}

const KG_PER_LB: f64 = 0.453592;

fn to_kg_per_s(value: f64, unit: MassFlowUnit) -> f64 {
    match unit {
        MassFlowUnit::KilogramPerSecond => value,
        MassFlowUnit::KilogramPerHour => value / 3600.0,
        MassFlowUnit::TonnePerHour => value * 1000.0 / 3600.0,
        MassFlowUnit::PoundPerHour => value * KG_PER_LB / 3600.0,
    }
}

fn from_kg_per_s(value: f64, unit: MassFlowUnit) -> f64 {
    match unit {
        MassFlowUnit::KilogramPerSecond => value,
        MassFlowUnit::KilogramPerHour => value * 3600.0,
        MassFlowUnit::TonnePerHour => value * 3600.0 / 1000.0,
        MassFlowUnit::PoundPerHour => value * 3600.0 / KG_PER_LB,
    }
}

/// 질량유량을 변환한다.
pub fn convert_mass_flow(value: f64, from: MassFlowUnit, to: MassFlowUnit) -> f64 {
    from_kg_per_s(to_kg_per_s(value, from), to)
}

impl MassFlowUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            MassFlowUnit::KilogramPerSecond => "kg/s",
            MassFlowUnit::KilogramPerHour => "kg/h",
            MassFlowUnit::TonnePerHour => "t/h",
            MassFlowUnit::PoundPerHour => "lb/h",
        }
    }
}
