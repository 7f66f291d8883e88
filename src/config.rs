use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cost::VehicleFinancialInput;
use crate::report::NumberFormat;

/// 기본 설정 파일 이름.
pub const CONFIG_FILE: &str = "config.toml";

/// `[defaults]` 테이블에서 허용하는 키.
const DEFAULT_FIELDS: &[&str] = &[
    "net_income",
    "vehicle_price",
    "distance_per_month",
    "fuel_efficiency",
    "fuel_price",
    "monthly_maintenance",
    "annual_insurance",
    "annual_tax_rate_percent",
    "annual_depreciation_rate_percent",
];

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/pt-br/en-us)
    pub language: String,
    /// 추가 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// 거리 단위 라벨(km, mi 등). 계산에는 쓰이지 않는다.
    pub distance_unit: String,
    /// 통화/숫자 표시 형식
    pub number_format: NumberFormat,
    /// 입력 폼 기본값. 빠진 키는 내장 기본값으로 채운다.
    #[serde(deserialize_with = "defaults_table")]
    pub defaults: VehicleFinancialInput,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            distance_unit: "km".into(),
            number_format: NumberFormat::default(),
            defaults: VehicleFinancialInput::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// `--config`로 받은 경로, 없으면 작업 디렉터리의 config.toml.
pub fn resolve_path(cli_path: Option<&Path>) -> PathBuf {
    cli_path.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf)
}

/// 지정한 경로의 설정을 로드하거나, 없으면 기본 설정을 그 경로에 저장한 뒤 반환한다.
/// 파싱에 실패하면 파일을 건드리지 않고 오류를 돌려준다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        load_from(path)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        tracing::info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(cfg)
}

/// 차량 한 대의 입력값을 담은 TOML 파일을 읽는다. 아홉 값이 모두 있어야 한다.
pub fn load_input_file(path: &Path) -> Result<VehicleFinancialInput, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

impl Config {
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }
}

fn defaults_table<'de, D>(deserializer: D) -> Result<VehicleFinancialInput, D::Error>
where
    D: Deserializer<'de>,
{
    let table = BTreeMap::<String, f64>::deserialize(deserializer)?;
    let mut input = VehicleFinancialInput::default();
    for (key, value) in table {
        let slot = match key.as_str() {
            "net_income" => &mut input.net_income,
            "vehicle_price" => &mut input.vehicle_price,
            "distance_per_month" => &mut input.distance_per_month,
            "fuel_efficiency" => &mut input.fuel_efficiency,
            "fuel_price" => &mut input.fuel_price,
            "monthly_maintenance" => &mut input.monthly_maintenance,
            "annual_insurance" => &mut input.annual_insurance,
            "annual_tax_rate_percent" => &mut input.annual_tax_rate_percent,
            "annual_depreciation_rate_percent" => &mut input.annual_depreciation_rate_percent,
            other => return Err(de::Error::unknown_field(other, DEFAULT_FIELDS)),
        };
        *slot = value;
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_defaults_table_keeps_builtin_values() {
        let cfg: Config = toml::from_str("[defaults]\nnet_income = 6500\n").expect("parse");
        assert_eq!(cfg.defaults.net_income, 6500.0);
        assert_eq!(cfg.defaults.vehicle_price, 90000.0);
        assert_eq!(cfg.defaults.fuel_price, 5.90);
    }

    #[test]
    fn unknown_defaults_key_is_rejected() {
        let err = toml::from_str::<Config>("[defaults]\nincome = 1.0\n").unwrap_err();
        assert!(err.to_string().contains("income"));
    }

    #[test]
    fn resolve_path_prefers_cli_argument() {
        assert_eq!(resolve_path(None), PathBuf::from(CONFIG_FILE));
        assert_eq!(
            resolve_path(Some(Path::new("/tmp/custom.toml"))),
            PathBuf::from("/tmp/custom.toml")
        );
    }
}
