//! Domain models for Fleetmargin
//!
//! Resource profiles and job inputs are point-in-time snapshots: the engine
//! copies the values it needs and never holds on to the caller's records, so a
//! recorded prediction does not change when a truck or driver is edited later.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Energy source of a truck (informational, never alters formulas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    #[default]
    Diesel,
    Petrol,
    Electric,
    Hybrid,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diesel => "diesel",
            Self::Petrol => "petrol",
            Self::Electric => "electric",
            Self::Hybrid => "hybrid",
        }
    }

    /// Unit the consumption and fuel price figures refer to
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Electric => "kWh",
            _ => "L",
        }
    }
}

impl std::str::FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "diesel" => Ok(Self::Diesel),
            "petrol" | "gasoline" => Ok(Self::Petrol),
            "electric" | "ev" => Ok(Self::Electric),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(format!("Unknown fuel type: {}", s)),
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cost profile of a truck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub license_plate: Option<String>,
    #[serde(default)]
    pub fuel_type: FuelType,
    /// Liters (or kWh) per 100 km
    pub fuel_consumption_per_100km: Decimal,
    pub maintenance_cost_per_km: Decimal,
    pub insurance_monthly: Decimal,
    #[serde(default)]
    pub leasing_monthly: Decimal,
}

/// Cost profile of a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverProfile {
    #[serde(default)]
    pub name: Option<String>,
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub monthly_fixed_cost: Decimal,
}

/// A proposed haulage job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInput {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    pub distance_km: Decimal,
    pub estimated_duration_hours: Decimal,
    pub offered_rate: Decimal,
    #[serde(default)]
    pub toll_costs: Decimal,
    /// Currency per liter (or kWh)
    pub fuel_price_per_unit: Decimal,
    #[serde(default)]
    pub other_costs: Decimal,
}

/// A job together with the resolved truck and driver snapshots
///
/// This is the shape of a job input file (JSON or TOML).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    pub job: JobInput,
    pub truck: TruckProfile,
    pub driver: DriverProfile,
}

impl JobRequest {
    /// Load a job request from a `.json` or `.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => toml::from_str(&content)
                .map_err(|e| Error::InvalidData(format!("Invalid job TOML: {}", e))),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(Error::InvalidData(format!(
                "Unsupported job file extension: {} (use .json or .toml)",
                path.display()
            ))),
        }
    }
}

/// Cost components of a single job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub fuel_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub driver_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub maintenance_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub toll_costs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fixed_cost_allocation: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub other_costs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
}

/// Identifies one cost component of a breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostComponent {
    Fuel,
    Driver,
    Maintenance,
    Tolls,
    FixedAllocation,
    Other,
}

impl CostComponent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Driver => "driver",
            Self::Maintenance => "maintenance",
            Self::Tolls => "tolls",
            Self::FixedAllocation => "fixed cost allocation",
            Self::Other => "other costs",
        }
    }
}

impl std::fmt::Display for CostComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl CostBreakdown {
    /// Build a breakdown whose total is the exact sum of the components
    ///
    /// Fails with [`Error::ArithmeticAmbiguity`] when the total overflows.
    pub fn from_components(
        fuel_cost: Decimal,
        driver_cost: Decimal,
        maintenance_cost: Decimal,
        toll_costs: Decimal,
        fixed_cost_allocation: Decimal,
        other_costs: Decimal,
    ) -> Result<Self> {
        let total_cost = [
            driver_cost,
            maintenance_cost,
            toll_costs,
            fixed_cost_allocation,
            other_costs,
        ]
        .into_iter()
        .try_fold(fuel_cost, |sum, component| sum.checked_add(component))
        .ok_or_else(|| Error::overflow("total cost"))?;
        Ok(Self {
            fuel_cost,
            driver_cost,
            maintenance_cost,
            toll_costs,
            fixed_cost_allocation,
            other_costs,
            total_cost,
        })
    }

    /// Components in fixed order (fuel, driver, maintenance, tolls, fixed, other)
    pub fn components(&self) -> [(CostComponent, Decimal); 6] {
        [
            (CostComponent::Fuel, self.fuel_cost),
            (CostComponent::Driver, self.driver_cost),
            (CostComponent::Maintenance, self.maintenance_cost),
            (CostComponent::Tolls, self.toll_costs),
            (CostComponent::FixedAllocation, self.fixed_cost_allocation),
            (CostComponent::Other, self.other_costs),
        ]
    }

    /// Fuel cost as a fraction of total cost (zero when there is no cost)
    pub fn fuel_share(&self) -> Decimal {
        if self.total_cost.is_zero() {
            Decimal::ZERO
        } else {
            self.fuel_cost / self.total_cost
        }
    }

    /// Component with the largest share of total cost
    ///
    /// Ties resolve to the earliest component in `components()` order.
    /// Returns `None` when every component is zero.
    pub fn dominant_component(&self) -> Option<(CostComponent, Decimal)> {
        let mut best: Option<(CostComponent, Decimal)> = None;
        for (component, amount) in self.components() {
            match best {
                Some((_, top)) if amount <= top => {}
                _ if amount.is_zero() => {}
                _ => best = Some((component, amount)),
            }
        }
        best
    }

    /// Round every component to `dp` decimal places and re-total
    ///
    /// The total is summed from the rounded components so the sum invariant
    /// holds exactly on the output.
    pub fn rounded(&self, dp: u32) -> Result<Self> {
        Self::from_components(
            round_money(self.fuel_cost, dp),
            round_money(self.driver_cost, dp),
            round_money(self.maintenance_cost, dp),
            round_money(self.toll_costs, dp),
            round_money(self.fixed_cost_allocation, dp),
            round_money(self.other_costs, dp),
        )
    }
}

/// Round a currency value to the configured minor-unit precision
pub fn round_money(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Coarse profitability/volatility judgment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// The recommendation that goes with this risk level
    pub fn recommendation(&self) -> Recommendation {
        match self {
            Self::Low => Recommendation::Accept,
            Self::Medium => Recommendation::Review,
            Self::High => Recommendation::Reject,
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Suggested operator action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Accept,
    Review,
    Reject,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Review => "review",
            Self::Reject => "reject",
        }
    }
}

impl std::str::FromStr for Recommendation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "review" => Ok(Self::Review),
            "reject" => Ok(Self::Reject),
            _ => Err(format!("Unknown recommendation: {}", s)),
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full prediction for one job
///
/// Produced once per submission. Actual revenue/cost recorded after the job
/// completes belongs to a separate record and never mutates this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub cost_breakdown: CostBreakdown,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub margin_pct: Decimal,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
    /// True when fuel dominance raised the risk level above what margin alone gave
    pub fuel_override: bool,
    pub explanation: String,
}

/// Aggregate monthly figures a simulation starts from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBaseline {
    pub monthly_revenue: Decimal,
    pub monthly_cost: Decimal,
}

/// Hypothetical changes applied to a baseline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioDelta {
    /// Signed percent change in fuel price
    #[serde(default)]
    pub fuel_change_pct: Decimal,
    /// Signed percent change in offered rates
    #[serde(default)]
    pub rate_change_pct: Decimal,
    #[serde(default)]
    pub add_trucks: u32,
    /// Monthly fixed cost per added truck (configured default when unset)
    #[serde(default)]
    pub truck_monthly_fixed_cost: Option<Decimal>,
}

/// Which assumption a scenario row applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Baseline,
    Fuel,
    Rate,
    Trucks,
    Combined,
}

impl ScenarioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Fuel => "fuel",
            Self::Rate => "rate",
            Self::Trucks => "trucks",
            Self::Combined => "combined",
        }
    }
}

/// One projected outcome under a named what-if assumption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub kind: ScenarioKind,
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub margin_pct: Decimal,
    pub note: String,
}

/// One re-prediction of a job under an alternative fuel price or rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRow {
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub offered_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fuel_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub margin_pct: Decimal,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
}
