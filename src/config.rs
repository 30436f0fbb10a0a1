use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::sizing::engine::{
    EngineSettings, ALLOWABLE_OVERPRESSURE, ATMOSPHERIC_PRESSURE_KPA, DEFAULT_KB, DEFAULT_KC,
    DEFAULT_KD,
};
use crate::sizing::{CorrectionFactorGrid, GridError};
use crate::units::*;

/// 설정 파일 기본 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 사이징 기본값. 세션 시작 시 엔진 상태의 Kd/Kb/Kc 초기값이 된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingDefaults {
    /// 유효 토출계수 (파열판 단독 사용 시 0.62)
    pub kd: f64,
    /// 배압 보정계수 (벨로우즈형일 때만 1 미만)
    pub kb: f64,
    /// 상류 파열판 조합 보정계수 (파열판 조합 시 0.9)
    pub kc: f64,
    /// 대기압 [kPa]
    pub atmospheric_pressure_kpa: f64,
    /// 허용 과압 배율
    pub allowable_overpressure: f64,
}

impl Default for SizingDefaults {
    fn default() -> Self {
        Self {
            kd: DEFAULT_KD,
            kb: DEFAULT_KB,
            kc: DEFAULT_KC,
            atmospheric_pressure_kpa: ATMOSPHERIC_PRESSURE_KPA,
            allowable_overpressure: ALLOWABLE_OVERPRESSURE,
        }
    }
}

impl From<&SizingDefaults> for EngineSettings {
    fn from(value: &SizingDefaults) -> Self {
        EngineSettings {
            atmospheric_pressure_kpa: value.atmospheric_pressure_kpa,
            allowable_overpressure: value.allowable_overpressure,
            kd: value.kd,
            kb: value.kb,
            kc: value.kc,
        }
    }
}

/// 결과 출력 단위. 엔진 내부 단위와는 무관하다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayUnits {
    pub pressure: PressureUnit,
    pub temperature: TemperatureUnit,
    pub mass_flow: MassFlowUnit,
    pub area: AreaUnit,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            pressure: PressureUnit::Bar,
            temperature: TemperatureUnit::Celsius,
            mass_flow: MassFlowUnit::KilogramPerSecond,
            area: AreaUnit::SquareMillimeter,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sizing: SizingDefaults,
    pub display: DisplayUnits,
    /// 내장 API 520 표 대신 사용할 KSH 표 파일(TOML)
    pub ksh_table: Option<PathBuf>,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::debug!(path = %path.display(), "기본 설정 파일 생성");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings::from(&self.sizing)
    }

    /// 설정된 KSH 표를 읽는다. 지정이 없으면 내장 표를 쓴다.
    pub fn load_grid(&self) -> Result<CorrectionFactorGrid, GridError> {
        match &self.ksh_table {
            Some(path) => CorrectionFactorGrid::from_path(path),
            None => Ok(CorrectionFactorGrid::api520()),
        }
    }
}
