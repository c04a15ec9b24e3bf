//! Risk & recommendation rules
//!
//! A threshold ladder on margin, followed by a fuel-dominance override that
//! can only raise `low` to `medium`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RiskThresholds;
use crate::error::{Error, Result};
use crate::models::{CostBreakdown, Recommendation, RiskLevel};

/// Net profit as a percentage of offered rate
pub fn margin_pct(offered_rate: Decimal, total_cost: Decimal) -> Result<Decimal> {
    if offered_rate.is_zero() {
        return Err(Error::ArithmeticAmbiguity(
            "margin is undefined for an offered rate of zero".to_string(),
        ));
    }
    offered_rate
        .checked_sub(total_cost)
        .and_then(|profit| profit.checked_div(offered_rate))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| Error::overflow("margin"))
}

/// Outcome of classifying one job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(with = "rust_decimal::serde::float")]
    pub margin_pct: Decimal,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
    /// Fuel share of total cost at classification time
    #[serde(with = "rust_decimal::serde::float")]
    pub fuel_share: Decimal,
    /// True when the fuel-dominance override raised the level
    pub fuel_override: bool,
}

/// Classifies margin into a risk level and action recommendation
#[derive(Debug, Clone, Copy)]
pub struct RiskRules {
    thresholds: RiskThresholds,
}

impl Default for RiskRules {
    fn default() -> Self {
        Self::new(RiskThresholds::default())
    }
}

impl RiskRules {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Risk level from margin alone
    pub fn level_for_margin(&self, margin_pct: Decimal) -> RiskLevel {
        if margin_pct < self.thresholds.high_below_pct {
            RiskLevel::High
        } else if margin_pct < self.thresholds.medium_below_pct {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Classify a costed job at the given offered rate
    pub fn classify(
        &self,
        breakdown: &CostBreakdown,
        offered_rate: Decimal,
    ) -> Result<RiskAssessment> {
        let margin_pct = margin_pct(offered_rate, breakdown.total_cost)?;
        let fuel_share = breakdown.fuel_share();

        let mut risk_level = self.level_for_margin(margin_pct);
        let mut fuel_override = false;
        if risk_level == RiskLevel::Low && fuel_share > self.thresholds.fuel_dominance_ratio {
            risk_level = RiskLevel::Medium;
            fuel_override = true;
        }

        Ok(RiskAssessment {
            margin_pct,
            risk_level,
            recommendation: risk_level.recommendation(),
            fuel_share,
            fuel_override,
        })
    }
}
