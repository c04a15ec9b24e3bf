//! Engine configuration
//!
//! Every tunable constant the engine and simulator depend on lives here and is
//! passed in explicitly at construction time.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir
//!    (~/.local/share/fleetmargin/config/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! The fixed-cost allocation basis has no built-in default. A config without
//! `[allocation] basis_km` loads, but fails validation.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Largest supported currency precision
const MAX_MINOR_UNITS: u32 = 10;

/// Margin thresholds for the risk ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Margin (%) below which a job is high risk
    #[serde(with = "rust_decimal::serde::float")]
    pub high_below_pct: Decimal,
    /// Margin (%) below which a job is medium risk
    #[serde(with = "rust_decimal::serde::float")]
    pub medium_below_pct: Decimal,
    /// Fuel share of total cost above which low risk is raised to medium
    #[serde(with = "rust_decimal::serde::float")]
    pub fuel_dominance_ratio: Decimal,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_below_pct: dec!(5),
            medium_below_pct: dec!(15),
            fuel_dominance_ratio: dec!(0.5),
        }
    }
}

/// Assumptions used by the scenario simulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAssumptions {
    /// Fraction of total cost assumed to be fuel
    #[serde(with = "rust_decimal::serde::float")]
    pub fuel_cost_share: Decimal,
    /// Revenue per added truck, scaled by the baseline revenue/cost ratio
    #[serde(with = "rust_decimal::serde::float")]
    pub per_truck_revenue: Decimal,
    /// Monthly fixed cost per added truck when the delta leaves it unset
    #[serde(with = "rust_decimal::serde::float")]
    pub truck_monthly_fixed_cost: Decimal,
}

impl Default for ScenarioAssumptions {
    fn default() -> Self {
        Self {
            fuel_cost_share: dec!(0.35),
            per_truck_revenue: dec!(500),
            truck_monthly_fixed_cost: dec!(3000),
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Assumed average monthly km per truck for fixed-cost allocation
    #[serde(with = "rust_decimal::serde::float_option")]
    pub allocation_basis_km: Option<Decimal>,
    pub risk: RiskThresholds,
    pub scenario: ScenarioAssumptions,
    /// Currency minor-unit precision (decimal places)
    pub minor_units: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allocation_basis_km: None,
            risk: RiskThresholds::default(),
            scenario: ScenarioAssumptions::default(),
            minor_units: 2,
        }
    }
}

impl EngineConfig {
    /// Load configuration (explicit path or override first, then default)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::Configuration(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                ))
            })?,
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => fs::read_to_string(&default_path)
                    .map_err(|e| {
                        Error::Configuration(format!(
                            "Failed to read config {}: {}",
                            default_path.display(),
                            e
                        ))
                    })?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }

    /// Embedded default configuration
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Config with the given allocation basis and all other values at defaults
    pub fn with_allocation_basis(basis_km: Decimal) -> Self {
        Self {
            allocation_basis_km: Some(basis_km),
            ..Default::default()
        }
    }

    /// The allocation basis, failing if it is missing or not positive
    pub fn allocation_basis(&self) -> Result<Decimal> {
        match self.allocation_basis_km {
            None => Err(Error::Configuration(
                "allocation basis_km is not set; it must be configured explicitly".to_string(),
            )),
            Some(basis) if basis <= Decimal::ZERO => Err(Error::Configuration(format!(
                "allocation basis_km must be positive, got {}",
                basis
            ))),
            Some(basis) => Ok(basis),
        }
    }

    /// Check every constant is present and within range
    pub fn validate(&self) -> Result<()> {
        self.allocation_basis()?;
        self.validate_risk()?;
        self.validate_scenario()?;
        self.validate_currency()
    }

    /// Check the currency precision only
    pub fn validate_currency(&self) -> Result<()> {
        if self.minor_units > MAX_MINOR_UNITS {
            return Err(Error::Configuration(format!(
                "currency minor_units must be at most {}, got {}",
                MAX_MINOR_UNITS, self.minor_units
            )));
        }
        Ok(())
    }

    /// Check the risk thresholds only
    pub fn validate_risk(&self) -> Result<()> {
        let risk = &self.risk;
        if risk.high_below_pct < Decimal::ZERO {
            return Err(Error::Configuration(format!(
                "risk high_below_pct must not be negative, got {}",
                risk.high_below_pct
            )));
        }
        if risk.medium_below_pct < risk.high_below_pct {
            return Err(Error::Configuration(format!(
                "risk medium_below_pct ({}) must not be below high_below_pct ({})",
                risk.medium_below_pct, risk.high_below_pct
            )));
        }
        if risk.fuel_dominance_ratio <= Decimal::ZERO || risk.fuel_dominance_ratio > Decimal::ONE
        {
            return Err(Error::Configuration(format!(
                "risk fuel_dominance_ratio must be in (0, 1], got {}",
                risk.fuel_dominance_ratio
            )));
        }
        Ok(())
    }

    /// Check the scenario assumptions only
    pub fn validate_scenario(&self) -> Result<()> {
        let scenario = &self.scenario;
        if scenario.fuel_cost_share < Decimal::ZERO || scenario.fuel_cost_share > Decimal::ONE {
            return Err(Error::Configuration(format!(
                "scenario fuel_cost_share must be in [0, 1], got {}",
                scenario.fuel_cost_share
            )));
        }
        if scenario.per_truck_revenue < Decimal::ZERO {
            return Err(Error::Configuration(format!(
                "scenario per_truck_revenue must not be negative, got {}",
                scenario.per_truck_revenue
            )));
        }
        if scenario.truck_monthly_fixed_cost < Decimal::ZERO {
            return Err(Error::Configuration(format!(
                "scenario truck_monthly_fixed_cost must not be negative, got {}",
                scenario.truck_monthly_fixed_cost
            )));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("fleetmargin").join("config").join("engine.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    allocation: Option<RawAllocation>,
    risk: Option<RawRisk>,
    scenario: Option<RawScenario>,
    currency: Option<RawCurrency>,
}

#[derive(Debug, Deserialize)]
struct RawAllocation {
    basis_km: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawRisk {
    high_below_pct: Option<Decimal>,
    medium_below_pct: Option<Decimal>,
    fuel_dominance_ratio: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawScenario {
    fuel_cost_share: Option<Decimal>,
    per_truck_revenue: Option<Decimal>,
    truck_monthly_fixed_cost: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawCurrency {
    minor_units: Option<u32>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Configuration(format!("Invalid config TOML: {}", e)))?;

    let mut config = EngineConfig::default();

    if let Some(allocation) = raw.allocation {
        config.allocation_basis_km = allocation.basis_km;
    }

    if let Some(risk) = raw.risk {
        if let Some(high) = risk.high_below_pct {
            config.risk.high_below_pct = high;
        }
        if let Some(medium) = risk.medium_below_pct {
            config.risk.medium_below_pct = medium;
        }
        if let Some(ratio) = risk.fuel_dominance_ratio {
            config.risk.fuel_dominance_ratio = ratio;
        }
    }

    if let Some(scenario) = raw.scenario {
        if let Some(share) = scenario.fuel_cost_share {
            config.scenario.fuel_cost_share = share;
        }
        if let Some(revenue) = scenario.per_truck_revenue {
            config.scenario.per_truck_revenue = revenue;
        }
        if let Some(fixed) = scenario.truck_monthly_fixed_cost {
            config.scenario.truck_monthly_fixed_cost = fixed;
        }
    }

    if let Some(currency) = raw.currency {
        if let Some(minor_units) = currency.minor_units {
            config.minor_units = minor_units;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.allocation_basis_km, Some(dec!(8800)));
        assert_eq!(config.risk, RiskThresholds::default());
        assert_eq!(config.scenario.fuel_cost_share, dec!(0.35));
        assert_eq!(config.minor_units, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_basis_is_configuration_error() {
        let config = parse_config("[risk]\nhigh_below_pct = 3\n").unwrap();
        assert_eq!(config.allocation_basis_km, None);
        assert_eq!(config.risk.high_below_pct, dec!(3));
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_non_positive_basis_rejected() {
        for basis in [dec!(0), dec!(-100)] {
            let config = EngineConfig::with_allocation_basis(basis);
            assert!(matches!(
                config.allocation_basis(),
                Err(Error::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = EngineConfig::with_allocation_basis(dec!(8000));
        config.risk.high_below_pct = dec!(20);
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_fuel_share_out_of_range_rejected() {
        let mut config = EngineConfig::with_allocation_basis(dec!(8000));
        config.scenario.fuel_cost_share = dec!(1.2);
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        assert!(matches!(
            parse_config("[risk\n"),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(
            &path,
            "[allocation]\nbasis_km = 6000\n\n[scenario]\nper_truck_revenue = 750\n",
        )
        .unwrap();

        let config = EngineConfig::load(Some(&path)).unwrap();
        assert_eq!(config.allocation_basis_km, Some(dec!(6000)));
        assert_eq!(config.scenario.per_truck_revenue, dec!(750));
        assert_eq!(config.scenario.fuel_cost_share, dec!(0.35));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            EngineConfig::load(Some(&path)),
            Err(Error::Configuration(_))
        ));
    }
}
