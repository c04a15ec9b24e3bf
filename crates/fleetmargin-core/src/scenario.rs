//! Scenario Simulator - fleet-level what-if projections
//!
//! Projects monthly revenue, cost and margin under hypothetical changes to
//! fuel price, rates and fleet size. Pure projection over caller-supplied
//! aggregates: no lookups, no persistence.
//!
//! Row order is fixed: baseline, then fuel, rate and trucks for each
//! non-zero delta, then a combined row when two or more deltas are active.

use rust_decimal::Decimal;

use crate::config::{EngineConfig, ScenarioAssumptions};
use crate::error::{Error, Result};
use crate::models::{round_money, ScenarioBaseline, ScenarioDelta, ScenarioKind, ScenarioRow};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Monthly profit and margin for a revenue/cost pair
///
/// Margin is zero when revenue is zero.
pub fn profit_and_margin(revenue: Decimal, cost: Decimal) -> Result<(Decimal, Decimal)> {
    let profit = revenue
        .checked_sub(cost)
        .ok_or_else(|| Error::overflow("scenario profit"))?;
    let margin = if revenue.is_zero() {
        Decimal::ZERO
    } else {
        profit
            .checked_div(revenue)
            .and_then(|ratio| ratio.checked_mul(HUNDRED))
            .ok_or_else(|| Error::overflow("scenario margin"))?
    };
    Ok((profit, margin))
}

/// `1 + pct / 100`, or `None` when out of range
fn percent_factor(pct: Decimal) -> Option<Decimal> {
    pct.checked_div(HUNDRED)
        .and_then(|fraction| Decimal::ONE.checked_add(fraction))
}

/// Format a signed percentage, e.g. `+10%` or `-2.5%`
fn signed_pct(pct: Decimal) -> String {
    let pct = pct.normalize();
    if pct.is_sign_negative() {
        format!("{}%", pct)
    } else {
        format!("+{}%", pct)
    }
}

/// Projects fleet-level outcomes under what-if deltas
#[derive(Debug, Clone, Copy)]
pub struct ScenarioSimulator {
    assumptions: ScenarioAssumptions,
    minor_units: u32,
}

impl ScenarioSimulator {
    /// Create a simulator from engine configuration
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate_scenario()?;
        config.validate_currency()?;
        Ok(Self {
            assumptions: config.scenario,
            minor_units: config.minor_units,
        })
    }

    pub fn assumptions(&self) -> &ScenarioAssumptions {
        &self.assumptions
    }

    /// Run a simulation, returning rows in their fixed order
    pub fn simulate(
        &self,
        baseline: &ScenarioBaseline,
        delta: &ScenarioDelta,
    ) -> Result<Vec<ScenarioRow>> {
        validate(baseline, delta)?;

        let revenue = baseline.monthly_revenue;
        let cost = baseline.monthly_cost;
        let truck_cost = delta
            .truck_monthly_fixed_cost
            .unwrap_or(self.assumptions.truck_monthly_fixed_cost);

        let fuel_active = !delta.fuel_change_pct.is_zero();
        let rate_active = !delta.rate_change_pct.is_zero();
        let trucks_active = delta.add_trucks > 0;

        let mut rows = vec![self.row(
            ScenarioKind::Baseline,
            "Baseline".to_string(),
            revenue,
            cost,
            "Current monthly revenue and cost".to_string(),
        )?];

        let cost_change_pct = self
            .assumptions
            .fuel_cost_share
            .checked_mul(delta.fuel_change_pct)
            .ok_or_else(|| Error::overflow("fuel cost change"))?;
        let fuel_factor =
            percent_factor(cost_change_pct).ok_or_else(|| Error::overflow("fuel cost change"))?;
        let rate_factor =
            percent_factor(delta.rate_change_pct).ok_or_else(|| Error::overflow("rate change"))?;
        let (extra_revenue, extra_cost) =
            self.truck_increments(baseline, delta.add_trucks, truck_cost)?;

        let fuel_cost = cost
            .checked_mul(fuel_factor)
            .ok_or_else(|| Error::overflow("scenario cost"))?;
        let rated_revenue = revenue
            .checked_mul(rate_factor)
            .ok_or_else(|| Error::overflow("scenario revenue"))?;

        if fuel_active {
            rows.push(self.row(
                ScenarioKind::Fuel,
                format!("Fuel {}", signed_pct(delta.fuel_change_pct)),
                revenue,
                fuel_cost,
                format!(
                    "Fuel price {} with fuel assumed {}% of cost: cost {}, revenue unchanged",
                    signed_pct(delta.fuel_change_pct),
                    (self.assumptions.fuel_cost_share * HUNDRED).normalize(),
                    signed_pct(cost_change_pct),
                ),
            )?);
        }

        if rate_active {
            rows.push(self.row(
                ScenarioKind::Rate,
                format!("Rate {}", signed_pct(delta.rate_change_pct)),
                rated_revenue,
                cost,
                format!(
                    "Rates {}: revenue {}, cost unchanged",
                    signed_pct(delta.rate_change_pct),
                    signed_pct(delta.rate_change_pct),
                ),
            )?);
        }

        if trucks_active {
            rows.push(self.row(
                ScenarioKind::Trucks,
                format!("+{} truck{}", delta.add_trucks, plural(delta.add_trucks)),
                checked_add(revenue, extra_revenue, "scenario revenue")?,
                checked_add(cost, extra_cost, "scenario cost")?,
                format!(
                    "{} added truck{} at {} fixed cost per month; revenue +{} from {} per truck \
                     scaled by the baseline revenue/cost ratio",
                    delta.add_trucks,
                    plural(delta.add_trucks),
                    truck_cost.normalize(),
                    round_money(extra_revenue, self.minor_units),
                    self.assumptions.per_truck_revenue.normalize(),
                ),
            )?);
        }

        let active: Vec<String> = [
            fuel_active.then(|| format!("fuel {}", signed_pct(delta.fuel_change_pct))),
            rate_active.then(|| format!("rates {}", signed_pct(delta.rate_change_pct))),
            trucks_active.then(|| {
                format!("{} added truck{}", delta.add_trucks, plural(delta.add_trucks))
            }),
        ]
        .into_iter()
        .flatten()
        .collect();

        if active.len() >= 2 {
            rows.push(self.row(
                ScenarioKind::Combined,
                "Combined".to_string(),
                checked_add(rated_revenue, extra_revenue, "scenario revenue")?,
                checked_add(fuel_cost, extra_cost, "scenario cost")?,
                format!("Applied together: {}", active.join(", ")),
            )?);
        }

        tracing::debug!(rows = rows.len(), "Scenario simulation complete");

        Ok(rows)
    }

    /// Extra (revenue, cost) from adding trucks
    ///
    /// Revenue per added truck is the per-truck assumption scaled by the
    /// baseline revenue/cost ratio; a zero-cost baseline uses a ratio of one.
    fn truck_increments(
        &self,
        baseline: &ScenarioBaseline,
        add_trucks: u32,
        truck_cost: Decimal,
    ) -> Result<(Decimal, Decimal)> {
        if add_trucks == 0 {
            return Ok((Decimal::ZERO, Decimal::ZERO));
        }

        let trucks = Decimal::from(add_trucks);
        let ratio = if baseline.monthly_cost.is_zero() {
            Some(Decimal::ONE)
        } else {
            baseline.monthly_revenue.checked_div(baseline.monthly_cost)
        };
        let extra_revenue = ratio
            .and_then(|ratio| ratio.checked_mul(self.assumptions.per_truck_revenue))
            .and_then(|per_truck| per_truck.checked_mul(trucks))
            .ok_or_else(|| Error::overflow("added truck revenue"))?;
        let extra_cost = trucks
            .checked_mul(truck_cost)
            .ok_or_else(|| Error::overflow("added truck cost"))?;
        Ok((extra_revenue, extra_cost))
    }

    fn row(
        &self,
        kind: ScenarioKind,
        label: String,
        revenue: Decimal,
        cost: Decimal,
        note: String,
    ) -> Result<ScenarioRow> {
        let (profit, margin) = profit_and_margin(revenue, cost)?;
        Ok(ScenarioRow {
            kind,
            label,
            revenue: round_money(revenue, self.minor_units),
            cost: round_money(cost, self.minor_units),
            profit: round_money(profit, self.minor_units),
            margin_pct: round_money(margin, self.minor_units),
            note,
        })
    }
}

fn checked_add(a: Decimal, b: Decimal, quantity: &str) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(|| Error::overflow(quantity))
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn validate(baseline: &ScenarioBaseline, delta: &ScenarioDelta) -> Result<()> {
    if baseline.monthly_revenue < Decimal::ZERO {
        return Err(Error::validation(
            "monthly_revenue",
            format!("must not be negative, got {}", baseline.monthly_revenue),
        ));
    }
    if baseline.monthly_cost < Decimal::ZERO {
        return Err(Error::validation(
            "monthly_cost",
            format!("must not be negative, got {}", baseline.monthly_cost),
        ));
    }
    if delta.fuel_change_pct < -HUNDRED {
        return Err(Error::validation(
            "fuel_change_pct",
            format!("must not be below -100, got {}", delta.fuel_change_pct),
        ));
    }
    if delta.rate_change_pct < -HUNDRED {
        return Err(Error::validation(
            "rate_change_pct",
            format!("must not be below -100, got {}", delta.rate_change_pct),
        ));
    }
    if let Some(truck_cost) = delta.truck_monthly_fixed_cost {
        if truck_cost < Decimal::ZERO {
            return Err(Error::validation(
                "truck_monthly_fixed_cost",
                format!("must not be negative, got {}", truck_cost),
            ));
        }
    }
    Ok(())
}
