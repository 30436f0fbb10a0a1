//! IAPWS-IF97 기반 증기 물성 제공자. 단상 물성은 seuif97 크레이트로 위임하고
//! 포화온도는 Region 4 포화선 식을 뉴턴법으로 역산한다.
//! 입력: 압력(bar, 절대), 온도(°C), 비엔탈피(kJ/kg)

use seuif97::{ph, pt, OH, OT, OX};

use super::provider::{PropertyError, SteamPropertyProvider};

// ---------------- Region 4 (포화) ----------------
const P4_STAR_MPA: f64 = 22.064;
const T4_STAR_K: f64 = 647.096;
const R4_N: [f64; 6] = [
    -7.859_517_83,
    1.844_082_59,
    -11.786_649_7,
    22.680_741_1,
    -15.961_871_9,
    1.801_225_02,
];
/// IF97 전체 유효 압력 상한 [bar abs]
const P_MAX_BAR: f64 = 1000.0;
const P_CRIT_BAR: f64 = P4_STAR_MPA * 10.0;

/// seuif97로 계산하는 IAPWS-IF97 물성 제공자.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iapws97;

fn check_pressure(p_bar_abs: f64) -> Result<f64, PropertyError> {
    if !p_bar_abs.is_finite() || p_bar_abs <= 0.0 || p_bar_abs > P_MAX_BAR {
        return Err(PropertyError::OutOfRange("압력은 0~1000 bar(abs) 범위여야 합니다."));
    }
    Ok(p_bar_abs / 10.0)
}

fn finite(value: f64, what: &'static str) -> Result<f64, PropertyError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PropertyError::OutOfRange(what))
    }
}

impl SteamPropertyProvider for Iapws97 {
    fn h_pt(&self, p_bar_abs: f64, t_c: f64) -> Result<f64, PropertyError> {
        let p_mpa = check_pressure(p_bar_abs)?;
        if !t_c.is_finite() {
            return Err(PropertyError::OutOfRange("온도가 유한한 값이 아닙니다."));
        }
        finite(pt(p_mpa, t_c, OH), "IF97 h(p,T) 계산 실패")
    }

    fn x_ph(&self, p_bar_abs: f64, h_kj_per_kg: f64) -> Result<f64, PropertyError> {
        let p_mpa = check_pressure(p_bar_abs)?;
        finite(ph(p_mpa, h_kj_per_kg, OX), "IF97 x(p,h) 계산 실패")
    }

    fn t_ph(&self, p_bar_abs: f64, h_kj_per_kg: f64) -> Result<f64, PropertyError> {
        let p_mpa = check_pressure(p_bar_abs)?;
        finite(ph(p_mpa, h_kj_per_kg, OT), "IF97 T(p,h) 계산 실패")
    }

    fn tsat_p(&self, p_bar_abs: f64) -> Result<f64, PropertyError> {
        saturation_temp_c_from_pressure_bar_abs(p_bar_abs)
    }
}

// ln(p_sat / p*) = (T*/T) Σ n_i θ^e_i
const R4_EXP: [f64; 6] = [1.0, 1.5, 3.0, 3.5, 4.0, 7.5];

fn region4_sum(theta: f64) -> f64 {
    R4_N.iter()
        .zip(R4_EXP)
        .map(|(n, e)| n * theta.powf(e))
        .sum()
}

fn region4_sum_dtheta(theta: f64) -> f64 {
    R4_N.iter()
        .zip(R4_EXP)
        .map(|(n, e)| n * e * theta.powf(e - 1.0))
        .sum()
}

/// 포화압력(bar abs) - 입력 온도는 °C.
pub fn saturation_pressure_bar_abs_from_temp_c(t_c: f64) -> Result<f64, PropertyError> {
    let t_k = t_c + 273.15;
    if !(t_k > 273.15 - 1e-9 && t_k <= T4_STAR_K) {
        return Err(PropertyError::OutOfRange(
            "IF97 Region4 유효 범위를 벗어났습니다 (0~373.946°C)",
        ));
    }
    let theta = 1.0 - t_k / T4_STAR_K;
    let p_mpa = P4_STAR_MPA * ((T4_STAR_K / t_k) * region4_sum(theta)).exp();
    Ok(p_mpa * 10.0)
}

/// 포화온도(°C) - 입력 압력은 bar abs.
pub fn saturation_temp_c_from_pressure_bar_abs(p_bar_abs: f64) -> Result<f64, PropertyError> {
    if !p_bar_abs.is_finite() || p_bar_abs <= 0.0 || p_bar_abs > P_CRIT_BAR {
        return Err(PropertyError::OutOfRange(
            "포화 압력은 0~220.64 bar(abs) 범위여야 합니다.",
        ));
    }
    let target = (p_bar_abs / 10.0 / P4_STAR_MPA).ln();
    let mut t_k = 373.15_f64;
    for _ in 0..50 {
        let theta = 1.0 - t_k / T4_STAR_K;
        let sum = region4_sum(theta);
        let f = (T4_STAR_K / t_k) * sum - target;
        // dθ/dT = -1/T*
        let dfd_t = -(T4_STAR_K / t_k.powi(2)) * sum - region4_sum_dtheta(theta) / t_k;
        let delta = f / dfd_t;
        t_k = (t_k - delta).clamp(273.15, T4_STAR_K);
        if delta.abs() < 1e-8 {
            return Ok(t_k - 273.15);
        }
    }
    Err(PropertyError::OutOfRange("포화온도 역계산이 수렴하지 않았습니다."))
}
