//! Napier 식 압력 보정계수 KN.

/// KN이 1.0인 상한 압력 [psia]
pub const KN_UNITY_LIMIT_PSIA: f64 = 1500.0;
/// KN 상관식이 정의된 상한 압력 [psia]
pub const KN_MAX_PSIA: f64 = 3200.0;

/// 상류 분출 압력(psia)에 대한 KN. 3200 psia 초과 영역은 정의되지 않아 NaN을 돌려준다.
pub fn kn_factor(p_psia: f64) -> f64 {
    if p_psia.is_nan() {
        f64::NAN
    } else if p_psia <= KN_UNITY_LIMIT_PSIA {
        1.0
    } else if p_psia <= KN_MAX_PSIA {
        (0.1906 * p_psia - 1000.0) / (0.2292 * p_psia - 1061.0)
    } else {
        f64::NAN
    }
}
