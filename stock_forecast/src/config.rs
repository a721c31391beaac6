//! Pipeline configuration
//!
//! Loaded from JSON; every field has a default so partial files are fine.

use crate::error::{ForecastError, Result};
use crate::models::additive::{AdditiveConfig, AdditiveSeasonalModel};
use crate::models::holt::{HoltConfig, HoltLinearModel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Forecast horizons offered to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizonPreset {
    #[default]
    #[serde(rename = "1 year")]
    OneYear,
    #[serde(rename = "2 years")]
    TwoYears,
    #[serde(rename = "3 years")]
    ThreeYears,
    #[serde(rename = "5 years")]
    FiveYears,
}

impl HorizonPreset {
    pub const ALL: [HorizonPreset; 4] = [
        HorizonPreset::OneYear,
        HorizonPreset::TwoYears,
        HorizonPreset::ThreeYears,
        HorizonPreset::FiveYears,
    ];

    /// Horizon length in calendar days
    pub fn days(&self) -> usize {
        match self {
            HorizonPreset::OneYear => 365,
            HorizonPreset::TwoYears => 730,
            HorizonPreset::ThreeYears => 1095,
            HorizonPreset::FiveYears => 1825,
        }
    }

    fn years(&self) -> usize {
        match self {
            HorizonPreset::OneYear => 1,
            HorizonPreset::TwoYears => 2,
            HorizonPreset::ThreeYears => 3,
            HorizonPreset::FiveYears => 5,
        }
    }
}

impl fmt::Display for HorizonPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.years() {
            1 => write!(f, "1 year"),
            n => write!(f, "{} years", n),
        }
    }
}

impl FromStr for HorizonPreset {
    type Err = ForecastError;

    /// Accepts `1y`, `1 year`, `2 years`, `5yr` and similar
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect();
        let digits: String = normalized.chars().take_while(|c| c.is_ascii_digit()).collect();
        let unit = &normalized[digits.len()..];

        if !matches!(unit, "y" | "yr" | "yrs" | "year" | "years") {
            return Err(ForecastError::InvalidParameter(format!(
                "Unknown horizon '{}', expected one of 1 year, 2 years, 3 years, 5 years",
                s
            )));
        }

        HorizonPreset::ALL
            .into_iter()
            .find(|p| digits.parse::<usize>().ok() == Some(p.years()))
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "Unsupported horizon '{}', expected one of 1 year, 2 years, 3 years, 5 years",
                    s
                ))
            })
    }
}

/// Parse a horizon given either as a preset or as a plain number of days
pub fn parse_horizon_days(s: &str) -> Result<usize> {
    match s.trim().parse::<usize>() {
        Ok(days) => Ok(days),
        Err(_) => s.parse::<HorizonPreset>().map(|p| p.days()),
    }
}

/// Which forecasting model a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    #[default]
    Additive,
    Holt,
}

impl FromStr for ModelKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "additive" | "prophet" => Ok(ModelKind::Additive),
            "holt" => Ok(ModelKind::Holt),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unknown model '{}', expected 'additive' or 'holt'",
                other
            ))),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub model: ModelKind,
    pub additive: AdditiveConfig,
    pub holt: HoltConfig,
    pub default_horizon: HorizonPreset,
}

impl ForecastConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ForecastConfig =
            serde_json::from_str(json).map_err(|e| ForecastError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every model section, whichever model is selected
    pub fn validate(&self) -> Result<()> {
        self.additive_model()?;
        self.holt_model()?;
        Ok(())
    }

    /// The additive model described by this configuration
    pub fn additive_model(&self) -> Result<AdditiveSeasonalModel> {
        AdditiveSeasonalModel::new(self.additive.clone()).map_err(Self::as_config_error)
    }

    /// The Holt model described by this configuration
    pub fn holt_model(&self) -> Result<HoltLinearModel> {
        HoltLinearModel::new(self.holt.clone()).map_err(Self::as_config_error)
    }

    fn as_config_error(err: ForecastError) -> ForecastError {
        match err {
            ForecastError::InvalidParameter(msg) => ForecastError::Config(msg),
            other => other,
        }
    }
}
