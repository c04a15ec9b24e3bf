//! Prediction command implementation

use std::path::Path;

use anyhow::{Context, Result};
use fleetmargin_core::{EngineConfig, JobRequest, PredictionResult, ProfitEngine, Recommendation};

use super::{money, truncate};

pub fn cmd_predict(config: &EngineConfig, input: &Path, json: bool) -> Result<()> {
    let request = JobRequest::load(input)
        .with_context(|| format!("Failed to read job file {}", input.display()))?;

    let engine = ProfitEngine::new(config.clone()).context("Invalid engine configuration")?;
    let result = engine
        .predict(&request.job, &request.truck, &request.driver)
        .context("Prediction failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_prediction(&request, &result);
    }

    Ok(())
}

fn print_prediction(request: &JobRequest, result: &PredictionResult) {
    let route = match (&request.job.origin, &request.job.destination) {
        (Some(from), Some(to)) => format!("{} → {}", truncate(from, 24), truncate(to, 24)),
        _ => "unnamed route".to_string(),
    };
    let b = &result.cost_breakdown;

    println!();
    println!("🚚 Profit Prediction");
    println!(
        "   Route: {} ({} km, {} h)",
        route,
        request.job.distance_km.normalize(),
        request.job.estimated_duration_hours.normalize()
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Fuel                  {:>12}", money(b.fuel_cost));
    println!("   Driver                {:>12}", money(b.driver_cost));
    println!("   Maintenance           {:>12}", money(b.maintenance_cost));
    println!("   Tolls                 {:>12}", money(b.toll_costs));
    println!("   Fixed allocation      {:>12}", money(b.fixed_cost_allocation));
    println!("   Other                 {:>12}", money(b.other_costs));
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total cost            {:>12}", money(b.total_cost));
    println!("   Offered rate          {:>12}", money(request.job.offered_rate));
    println!("   Net profit            {:>12}", money(result.net_profit));
    println!("   Margin                {:>11}%", money(result.margin_pct));
    println!();

    let icon = match result.recommendation {
        Recommendation::Accept => "✅",
        Recommendation::Review => "⚠️ ",
        Recommendation::Reject => "❌",
    };
    println!(
        "   {} {} ({} risk)",
        icon,
        result.recommendation.as_str().to_uppercase(),
        result.risk_level
    );
    println!("   {}", result.explanation);
}
