//! 사이징에 필요한 물리량의 단위 정의 및 변환 모듈.
//!
//! 엔진 내부는 SI 계열(bar, °C, kg/s, mm²)로 값을 보관하고, API 520 식과
//! 보정계수 표는 야드파운드 계열(psia, °F, lb/h, in²)을 사용한다.

pub mod area;
pub mod mass;
pub mod pressure;
pub mod temperature;

pub use area::{convert_area, AreaUnit};
pub use mass::{convert_mass_flow, MassFlowUnit};
pub use pressure::{convert_pressure, PressureUnit};
pub use temperature::{convert_temperature, TemperatureUnit};
