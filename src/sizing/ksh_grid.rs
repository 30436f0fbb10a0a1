//! 과열 보정계수(KSH) 표와 2차원 선형 보간.
//!
//! 행은 압력(psia), 열은 온도(°F) 분기점이다. 표 밖의 입력은 가장 가까운
//! 구간의 직선을 연장해 외삽한다.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::conversion::{bar_abs_to_psia, celsius_to_fahrenheit};

/// API 520 과열 보정계수 표(psia × °F).
const API520_KSH_TOML: &str = include_str!("../../data/ksh.toml");

/// 보정계수 표 생성/로드 오류.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("표 파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("표 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{axis} 축 분기점이 유한한 오름차순이 아닙니다 (index {index})")]
    UnorderedAxis { axis: &'static str, index: usize },
    #[error("값 행 개수 {rows}가 압력 분기점 개수 {expected}와 다릅니다")]
    RowCount { rows: usize, expected: usize },
    #[error("{row}번째 행의 값 개수 {len}가 온도 분기점 개수 {expected}와 다릅니다")]
    ColumnCount {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// 표 파일 형식.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridFile {
    pressures_psia: Vec<f64>,
    temperatures_f: Vec<f64>,
    values: Vec<Vec<f64>>,
}

/// 불변 2차원 보정계수 표.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionFactorGrid {
    pressures: Vec<f64>,
    temperatures: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl CorrectionFactorGrid {
    /// 분기점과 값 행렬로 표를 만든다. `values[i][j]`는 `pressures[i]`, `temperatures[j]`의 값이다.
    ///
    /// 축은 감소하지 않아야 한다. 중복 분기점은 허용되며 보간 시 퇴화 구간으로 처리된다.
    pub fn new(
        pressures_psia: Vec<f64>,
        temperatures_f: Vec<f64>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, GridError> {
        check_axis("pressure", &pressures_psia)?;
        check_axis("temperature", &temperatures_f)?;
        if values.len() != pressures_psia.len() {
            return Err(GridError::RowCount {
                rows: values.len(),
                expected: pressures_psia.len(),
            });
        }
        if let Some((row, r)) = values
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != temperatures_f.len())
        {
            return Err(GridError::ColumnCount {
                row,
                len: r.len(),
                expected: temperatures_f.len(),
            });
        }
        Ok(Self {
            pressures: pressures_psia,
            temperatures: temperatures_f,
            values,
        })
    }

    /// 내장 API 520 KSH 표.
    pub fn api520() -> Self {
        // 내장 리소스는 테스트로 검증되므로 파싱 실패 시 빈 표로 대체해 조회가 NaN을 내도록 한다.
        Self::from_toml_str(API520_KSH_TOML).unwrap_or_else(|err| {
            warn!(%err, "내장 KSH 표를 읽지 못했습니다");
            Self {
                pressures: Vec::new(),
                temperatures: Vec::new(),
                values: Vec::new(),
            }
        })
    }

    /// TOML 문자열에서 표를 읽는다.
    pub fn from_toml_str(content: &str) -> Result<Self, GridError> {
        let file: GridFile = toml::from_str(content)?;
        Self::new(file.pressures_psia, file.temperatures_f, file.values)
    }

    /// TOML 표 파일을 읽는다.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn pressures_psia(&self) -> &[f64] {
        &self.pressures
    }

    pub fn temperatures_f(&self) -> &[f64] {
        &self.temperatures
    }

    /// 압력(psia)·온도(°F)에서 보정계수를 보간한다. 구간을 찾지 못하면 NaN.
    pub fn lookup(&self, pressure_psia: f64, temperature_f: f64) -> f64 {
        let (Some((ip0, ip1)), Some((it0, it1))) = (
            bracket(&self.pressures, pressure_psia),
            bracket(&self.temperatures, temperature_f),
        ) else {
            return f64::NAN;
        };
        let (p0, p1) = (self.pressures[ip0], self.pressures[ip1]);
        let low_t = lerp(
            p0,
            p1,
            pressure_psia,
            self.values[ip0][it0],
            self.values[ip1][it0],
        );
        let high_t = lerp(
            p0,
            p1,
            pressure_psia,
            self.values[ip0][it1],
            self.values[ip1][it1],
        );
        lerp(
            self.temperatures[it0],
            self.temperatures[it1],
            temperature_f,
            low_t,
            high_t,
        )
    }

    /// 압력(bar abs)·온도(°C) 입력으로 조회한다.
    pub fn lookup_si(&self, pressure_bar_abs: f64, temperature_c: f64) -> f64 {
        self.lookup(
            bar_abs_to_psia(pressure_bar_abs),
            celsius_to_fahrenheit(temperature_c),
        )
    }
}

fn check_axis(axis: &'static str, points: &[f64]) -> Result<(), GridError> {
    if let Some(index) = points.iter().position(|v| !v.is_finite()) {
        return Err(GridError::UnorderedAxis { axis, index });
    }
    match points.windows(2).position(|w| w[1] < w[0]) {
        Some(i) => Err(GridError::UnorderedAxis { axis, index: i + 1 }),
        None => Ok(()),
    }
}

/// `axis[lo] <= x <= axis[hi]`인 인접 분기점 쌍. 범위 밖이면 첫/마지막 구간을 쓴다.
fn bracket(axis: &[f64], x: f64) -> Option<(usize, usize)> {
    let n = axis.len();
    if n < 2 || !x.is_finite() {
        return None;
    }
    if x < axis[0] {
        return Some((0, 1));
    }
    if x > axis[n - 1] {
        return Some((n - 2, n - 1));
    }
    axis.windows(2)
        .position(|w| w[0] <= x && x <= w[1])
        .map(|i| (i, i + 1))
}

/// 1차원 선형 보간. 두 분기점이 같으면 나눗셈 없이 하한 값을 돌려준다.
/// 분기점 위의 입력은 표 값을 그대로 돌려준다.
fn lerp(x0: f64, x1: f64, x: f64, y0: f64, y1: f64) -> f64 {
    if x0 == x1 || x == x0 {
        return y0;
    }
    if x == x1 {
        return y1;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_clamps_to_end_intervals() {
        let axis = [1.0, 2.0, 4.0];
        assert_eq!(bracket(&axis, 0.5), Some((0, 1)));
        assert_eq!(bracket(&axis, 9.0), Some((1, 2)));
        assert_eq!(bracket(&axis, 2.0), Some((0, 1)));
        assert_eq!(bracket(&axis, 3.0), Some((1, 2)));
    }

    #[test]
    fn bracket_needs_two_points() {
        assert_eq!(bracket(&[], 1.0), None);
        assert_eq!(bracket(&[1.0], 1.0), None);
        assert_eq!(bracket(&[1.0, 2.0], f64::NAN), None);
    }

    #[test]
    fn lerp_degenerate_interval_returns_low_value() {
        assert_eq!(lerp(3.0, 3.0, 3.0, 0.8, 0.9), 0.8);
        assert_eq!(lerp(0.0, 10.0, 2.5, 1.0, 2.0), 1.25);
    }
}
