//! Explanation generator
//!
//! Deterministic template selection over already-computed numbers. Each
//! sentence comes from one small rule; the explanation is the rules' output
//! joined with single spaces. Identical inputs always yield identical text.
//!
//! Amounts are printed as plain numbers without currency symbols; formatting
//! for a locale is left to the presentation layer.

use rust_decimal::Decimal;

use crate::config::RiskThresholds;
use crate::models::{round_money, CostBreakdown, Recommendation, RiskLevel};

/// Renders the natural-language rationale for a prediction
#[derive(Debug, Clone, Copy)]
pub struct Explainer {
    thresholds: RiskThresholds,
}

impl Default for Explainer {
    fn default() -> Self {
        Self::new(RiskThresholds::default())
    }
}

impl Explainer {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn explain(
        &self,
        breakdown: &CostBreakdown,
        margin_pct: Decimal,
        risk_level: RiskLevel,
        recommendation: Recommendation,
    ) -> String {
        [
            margin_sentence(margin_pct, risk_level),
            cost_driver_sentence(breakdown),
            self.rationale_sentence(breakdown, margin_pct, recommendation),
        ]
        .join(" ")
    }

    fn rationale_sentence(
        &self,
        breakdown: &CostBreakdown,
        margin_pct: Decimal,
        recommendation: Recommendation,
    ) -> String {
        match recommendation {
            Recommendation::Reject if margin_pct < Decimal::ZERO => {
                "The offered rate does not cover total costs. Rejection recommended.".to_string()
            }
            Recommendation::Reject => format!(
                "Margin is below the {}% minimum. Rejection recommended.",
                self.thresholds.high_below_pct.normalize()
            ),
            // Review at a margin that clears the target can only come from fuel dominance
            Recommendation::Review if margin_pct >= self.thresholds.medium_below_pct => format!(
                "Margin clears the {}% target, but fuel is {}% of total cost, \
                 which exposes the job to fuel price volatility. Review recommended.",
                self.thresholds.medium_below_pct.normalize(),
                fixed(breakdown.fuel_share() * Decimal::ONE_HUNDRED, 1)
            ),
            Recommendation::Review => format!(
                "Margin is below the {}% target. Consider negotiating a higher rate \
                 or reducing toll and other costs. Review recommended.",
                self.thresholds.medium_below_pct.normalize()
            ),
            Recommendation::Accept => format!(
                "Margin clears the {}% target. Acceptance recommended.",
                self.thresholds.medium_below_pct.normalize()
            ),
        }
    }
}

/// Round then print with exactly `dp` decimal places
fn fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, round_money(value, dp))
}

fn margin_sentence(margin_pct: Decimal, risk_level: RiskLevel) -> String {
    format!("Margin is {}% ({} risk).", fixed(margin_pct, 1), risk_level)
}

fn cost_driver_sentence(breakdown: &CostBreakdown) -> String {
    match breakdown.dominant_component() {
        Some((component, amount)) => format!(
            "Largest cost driver: {} at {} ({}% of total cost).",
            component,
            fixed(amount, 2),
            fixed(amount / breakdown.total_cost * Decimal::ONE_HUNDRED, 1)
        ),
        None => "No costs were attributed to this job.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn breakdown() -> CostBreakdown {
        CostBreakdown::from_components(
            dec!(177.60),
            dec!(100),
            dec!(45),
            dec!(30),
            dec!(90),
            dec!(15),
        )
        .unwrap()
    }

    #[test]
    fn test_accept_explanation() {
        let text = Explainer::default().explain(
            &breakdown(),
            dec!(61.2),
            RiskLevel::Low,
            Recommendation::Accept,
        );
        assert_eq!(
            text,
            "Margin is 61.2% (low risk). \
             Largest cost driver: fuel at 177.60 (38.8% of total cost). \
             Margin clears the 15% target. Acceptance recommended."
        );
    }

    #[test]
    fn test_fuel_override_rationale() {
        let b = CostBreakdown::from_components(
            dec!(600),
            dec!(400),
            dec!(0),
            dec!(0),
            dec!(0),
            dec!(0),
        )
        .unwrap();
        let text =
            Explainer::default().explain(&b, dec!(20), RiskLevel::Medium, Recommendation::Review);
        assert!(text.contains("fuel is 60.0% of total cost"));
        assert!(text.contains("fuel price volatility"));
    }

    #[test]
    fn test_thin_margin_rationale() {
        let text = Explainer::default().explain(
            &breakdown(),
            dec!(9.5),
            RiskLevel::Medium,
            Recommendation::Review,
        );
        assert!(text.contains("below the 15% target"));
        assert!(!text.contains("volatility"));
    }

    #[test]
    fn test_reject_rationales() {
        let explainer = Explainer::default();
        let loss = explainer.explain(
            &breakdown(),
            dec!(-12),
            RiskLevel::High,
            Recommendation::Reject,
        );
        assert!(loss.contains("does not cover total costs"));

        let thin = explainer.explain(
            &breakdown(),
            dec!(3),
            RiskLevel::High,
            Recommendation::Reject,
        );
        assert!(thin.contains("below the 5% minimum"));
    }

    #[test]
    fn test_explanation_is_reproducible() {
        let explainer = Explainer::default();
        let a = explainer.explain(
            &breakdown(),
            dec!(20.8333),
            RiskLevel::Low,
            Recommendation::Accept,
        );
        let b = explainer.explain(
            &breakdown(),
            dec!(20.8333),
            RiskLevel::Low,
            Recommendation::Accept,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_cost_breakdown() {
        let zero = Decimal::ZERO;
        let b = CostBreakdown::from_components(zero, zero, zero, zero, zero, zero).unwrap();
        let text =
            Explainer::default().explain(&b, dec!(100), RiskLevel::Low, Recommendation::Accept);
        assert!(text.contains("No costs were attributed"));
    }
}
