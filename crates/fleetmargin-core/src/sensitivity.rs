//! Job sensitivity sweep
//!
//! Re-predicts one job at alternative fuel prices and offered rates. Every row
//! goes through [`ProfitEngine::predict`], so a row is numerically identical
//! to a standalone prediction of the same inputs.

use rust_decimal::Decimal;

use crate::engine::ProfitEngine;
use crate::error::Result;
use crate::models::{DriverProfile, JobInput, PredictionResult, SensitivityRow, TruckProfile};

/// Sweep a job over alternative fuel prices, then alternative rates
///
/// Rows: baseline, one per fuel price (in the order given), one per rate
/// (in the order given). The first invalid variation fails the whole sweep.
pub fn sensitivity(
    engine: &ProfitEngine,
    job: &JobInput,
    truck: &TruckProfile,
    driver: &DriverProfile,
    fuel_prices: &[Decimal],
    rates: &[Decimal],
) -> Result<Vec<SensitivityRow>> {
    let mut variations: Vec<(String, JobInput)> =
        Vec::with_capacity(1 + fuel_prices.len() + rates.len());
    variations.push(("Baseline".to_string(), job.clone()));

    for price in fuel_prices {
        let variant = JobInput {
            fuel_price_per_unit: *price,
            ..job.clone()
        };
        variations.push((format!("Fuel @ {}/unit", price.normalize()), variant));
    }

    for rate in rates {
        let variant = JobInput {
            offered_rate: *rate,
            ..job.clone()
        };
        variations.push((format!("Rate @ {}", rate.normalize()), variant));
    }

    let rows = variations
        .into_iter()
        .map(|(label, variant)| {
            let prediction = engine.predict(&variant, truck, driver)?;
            Ok(row(label, &variant, prediction))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(rows = rows.len(), "Sensitivity sweep complete");

    Ok(rows)
}

fn row(label: String, job: &JobInput, prediction: PredictionResult) -> SensitivityRow {
    SensitivityRow {
        label,
        offered_rate: job.offered_rate,
        fuel_price: job.fuel_price_per_unit,
        total_cost: prediction.cost_breakdown.total_cost,
        net_profit: prediction.net_profit,
        margin_pct: prediction.margin_pct,
        risk_level: prediction.risk_level,
        recommendation: prediction.recommendation,
    }
}
