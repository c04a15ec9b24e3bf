//! Profit Prediction Engine
//!
//! The single entry point for per-job predictions. Composes the cost model,
//! the risk rules and the explanation generator:
//!
//! 1. validate inputs and compute the full-precision cost breakdown
//! 2. round the breakdown once to the currency precision
//! 3. classify margin into risk level and recommendation
//! 4. render the explanation
//!
//! The engine holds only immutable configuration, so one instance can be
//! shared freely across threads.

use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::cost::compute_cost_breakdown;
use crate::error::{Error, Result};
use crate::explain::Explainer;
use crate::models::{round_money, DriverProfile, JobInput, PredictionResult, TruckProfile};
use crate::risk::RiskRules;

/// Deterministic profit prediction engine
#[derive(Debug, Clone)]
pub struct ProfitEngine {
    config: EngineConfig,
    allocation_basis_km: Decimal,
    rules: RiskRules,
    explainer: Explainer,
}

impl ProfitEngine {
    /// Create an engine, validating the configuration up front
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let allocation_basis_km = config.allocation_basis()?;

        Ok(Self {
            allocation_basis_km,
            rules: RiskRules::new(config.risk),
            explainer: Explainer::new(config.risk),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rules(&self) -> &RiskRules {
        &self.rules
    }

    /// Predict profit, risk and recommendation for one job
    pub fn predict(
        &self,
        job: &JobInput,
        truck: &TruckProfile,
        driver: &DriverProfile,
    ) -> Result<PredictionResult> {
        let breakdown = compute_cost_breakdown(job, truck, driver, self.allocation_basis_km)?
            .rounded(self.config.minor_units)?;

        let assessment = self.rules.classify(&breakdown, job.offered_rate)?;
        let explanation = self.explainer.explain(
            &breakdown,
            assessment.margin_pct,
            assessment.risk_level,
            assessment.recommendation,
        );

        let net_profit = job
            .offered_rate
            .checked_sub(breakdown.total_cost)
            .map(|profit| round_money(profit, self.config.minor_units))
            .ok_or_else(|| Error::overflow("net profit"))?;
        let margin_pct = round_money(assessment.margin_pct, self.config.minor_units);

        tracing::debug!(
            distance_km = %job.distance_km,
            total_cost = %breakdown.total_cost,
            margin_pct = %margin_pct,
            risk = assessment.risk_level.as_str(),
            fuel_override = assessment.fuel_override,
            "Prediction complete"
        );

        Ok(PredictionResult {
            cost_breakdown: breakdown,
            net_profit,
            margin_pct,
            risk_level: assessment.risk_level,
            recommendation: assessment.recommendation,
            fuel_override: assessment.fuel_override,
            explanation,
        })
    }
}
