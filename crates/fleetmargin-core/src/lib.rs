//! Fleetmargin Core Library
//!
//! Profit/loss judgment for haulage jobs and fleet-level what-if analysis:
//! - Cost model (fuel, driver, maintenance, tolls, fixed-cost allocation)
//! - Risk & recommendation rules with a fuel-dominance override
//! - Deterministic, template-based explanations
//! - Profit prediction engine composing the above
//! - Scenario simulator over monthly fleet aggregates
//! - Per-job sensitivity sweep over fuel prices and rates
//!
//! Every computation is pure and synchronous. Persistence, resource lookup and
//! presentation belong to the caller.

pub mod config;
pub mod cost;
pub mod engine;
pub mod error;
pub mod explain;
pub mod models;
pub mod risk;
pub mod scenario;
pub mod sensitivity;

pub use config::{default_config_path, EngineConfig, RiskThresholds, ScenarioAssumptions};
pub use cost::compute_cost_breakdown;
pub use engine::ProfitEngine;
pub use error::{Error, Result};
pub use explain::Explainer;
pub use models::{
    CostBreakdown, CostComponent, DriverProfile, FuelType, JobInput, JobRequest, PredictionResult,
    Recommendation, RiskLevel, ScenarioBaseline, ScenarioDelta, ScenarioKind, ScenarioRow,
    SensitivityRow, TruckProfile,
};
pub use risk::{margin_pct, RiskAssessment, RiskRules};
pub use scenario::ScenarioSimulator;
pub use sensitivity::sensitivity;
