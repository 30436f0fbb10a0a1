use serde::{Deserialize, Serialize};

/// 엔탈피가 아직 정해지지 않았음을 나타내는 값 [kJ/kg].
pub const ENTHALPY_UNSET: f64 = 0.0;

/// 분출 증기의 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseState {
    Saturated,
    Superheated,
}

/// 엔탈피와 건도로 상태를 판정한다. 이력은 두지 않는다.
pub fn classify(enthalpy_kj_per_kg: f64, vapour_quality: f64) -> PhaseState {
    if enthalpy_kj_per_kg == ENTHALPY_UNSET || (vapour_quality > 0.0 && vapour_quality < 1.0) {
        PhaseState::Saturated
    } else {
        PhaseState::Superheated
    }
}
