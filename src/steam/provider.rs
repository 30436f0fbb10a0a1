//! 증기 물성 서비스 계약.
//!
//! 엔진은 압력(bar abs), 온도(°C), 비엔탈피(kJ/kg)만 주고받으며 물성이 어디서
//! 어떻게 계산되는지는 알지 못한다. 구현체는 느린 외부 호출이어도 된다.

use thiserror::Error;

/// 물성 조회 실패.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// 입력이 상관식의 유효 범위를 벗어남
    #[error("물성 계산 범위를 벗어남: {0}")]
    OutOfRange(&'static str),
    /// 외부 서비스를 사용할 수 없음
    #[error("물성 서비스를 사용할 수 없음: {0}")]
    Unavailable(String),
}

/// 엔진이 소비하는 네 가지 증기 물성 연산.
pub trait SteamPropertyProvider {
    /// 압력·온도 → 비엔탈피 [kJ/kg]
    fn h_pt(&self, p_bar_abs: f64, t_c: f64) -> Result<f64, PropertyError>;

    /// 압력·비엔탈피 → 건도 [-]. 단상 영역에서는 0~1 밖의 값이나 경계값을 돌려줄 수 있다.
    fn x_ph(&self, p_bar_abs: f64, h_kj_per_kg: f64) -> Result<f64, PropertyError>;

    /// 압력·비엔탈피 → 온도 [°C]
    fn t_ph(&self, p_bar_abs: f64, h_kj_per_kg: f64) -> Result<f64, PropertyError>;

    /// 압력 → 포화온도 [°C]
    fn tsat_p(&self, p_bar_abs: f64) -> Result<f64, PropertyError>;
}

impl<P: SteamPropertyProvider + ?Sized> SteamPropertyProvider for &P {
    fn h_pt(&self, p_bar_abs: f64, t_c: f64) -> Result<f64, PropertyError> {
        (**self).h_pt(p_bar_abs, t_c)
    }

    fn x_ph(&self, p_bar_abs: f64, h_kj_per_kg: f64) -> Result<f64, PropertyError> {
        (**self).x_ph(p_bar_abs, h_kj_per_kg)
    }

    fn t_ph(&self, p_bar_abs: f64, h_kj_per_kg: f64) -> Result<f64, PropertyError> {
        (**self).t_ph(p_bar_abs, h_kj_per_kg)
    }

    fn tsat_p(&self, p_bar_abs: f64) -> Result<f64, PropertyError> {
        (**self).tsat_p(p_bar_abs)
    }
}
