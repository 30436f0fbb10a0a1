//! API 520 증기 분출 면적 식 (Napier).
//!
//! `A = W / (51.5 · P1 · Kd · Kb · Kc · KN · KSH)`
//! - W: lb/h, P1: psia, A: in²

/// Napier 식 상수 (lb/h, psia, in² 기준)
pub const NAPIER_CONSTANT: f64 = 51.5;

/// 면적 식 입력. 모든 값은 야드파운드 단위로 환산된 상태여야 한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingInputs {
    /// 요구 분출 유량 [lb/h]
    pub mass_flow_lb_per_h: f64,
    /// 상류 분출 압력 [psia]
    pub upstream_pressure_psia: f64,
    /// 유효 토출계수
    pub kd: f64,
    /// 배압 보정계수
    pub kb: f64,
    /// 파열판 조합 보정계수
    pub kc: f64,
    /// Napier 압력 보정계수
    pub kn: f64,
    /// 과열 보정계수
    pub ksh: f64,
}

impl SizingInputs {
    fn all_finite(&self) -> bool {
        [
            self.mass_flow_lb_per_h,
            self.upstream_pressure_psia,
            self.kd,
            self.kb,
            self.kc,
            self.kn,
            self.ksh,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// 요구 분출 면적 [in²]. 비유한 입력, 0인 분모, 비유한 결과는 모두 NaN이 된다.
pub fn required_area_sq_in(inputs: &SizingInputs) -> f64 {
    if !inputs.all_finite() {
        return f64::NAN;
    }
    let denominator = NAPIER_CONSTANT
        * inputs.upstream_pressure_psia
        * inputs.kd
        * inputs.kb
        * inputs.kc
        * inputs.kn
        * inputs.ksh;
    if denominator == 0.0 || !denominator.is_finite() {
        return f64::NAN;
    }
    let area = inputs.mass_flow_lb_per_h / denominator;
    if area.is_finite() {
        area
    } else {
        f64::NAN
    }
}
