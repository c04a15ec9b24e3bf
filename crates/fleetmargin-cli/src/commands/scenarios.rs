//! Scenario command implementations (fleet simulation, job sensitivity)

use std::path::Path;

use anyhow::{Context, Result};
use fleetmargin_core::{
    sensitivity, EngineConfig, JobRequest, ProfitEngine, ScenarioBaseline, ScenarioDelta,
    ScenarioSimulator,
};
use rust_decimal::Decimal;

use super::{money, truncate};

pub fn cmd_simulate(
    config: &EngineConfig,
    revenue: Decimal,
    cost: Decimal,
    delta: &ScenarioDelta,
    json: bool,
) -> Result<()> {
    let simulator = ScenarioSimulator::new(config).context("Invalid scenario configuration")?;
    let baseline = ScenarioBaseline {
        monthly_revenue: revenue,
        monthly_cost: cost,
    };
    let rows = simulator
        .simulate(&baseline, delta)
        .context("Simulation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!();
    println!("📈 Scenario Simulation (monthly)");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:14} │ {:>12} │ {:>12} │ {:>11} │ {:>7}",
        "Scenario", "Revenue", "Cost", "Profit", "Margin"
    );
    for row in &rows {
        println!(
            "   {:14} │ {:>12} │ {:>12} │ {:>11} │ {:>6}%",
            truncate(&row.label, 14),
            money(row.revenue),
            money(row.cost),
            money(row.profit),
            money(row.margin_pct)
        );
    }
    println!();
    for row in &rows {
        println!("   • {}: {}", row.label, row.note);
    }

    Ok(())
}

pub fn cmd_sensitivity(
    config: &EngineConfig,
    input: &Path,
    fuel_prices: &[Decimal],
    rates: &[Decimal],
    json: bool,
) -> Result<()> {
    let request = JobRequest::load(input)
        .with_context(|| format!("Failed to read job file {}", input.display()))?;
    let engine = ProfitEngine::new(config.clone()).context("Invalid engine configuration")?;

    let rows = sensitivity(
        &engine,
        &request.job,
        &request.truck,
        &request.driver,
        fuel_prices,
        rates,
    )
    .context("Sensitivity sweep failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if fuel_prices.is_empty() && rates.is_empty() {
        println!("No variations given. Add some with:");
        println!("  fleetmargin sensitivity --input job.toml --fuel-price 2.10 --rate 1400");
    }

    println!();
    println!("🔬 Job Sensitivity");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:18} │ {:>10} │ {:>10} │ {:>7} │ {:6} │ {}",
        "Variation", "Cost", "Profit", "Margin", "Risk", "Action"
    );
    for row in &rows {
        println!(
            "   {:18} │ {:>10} │ {:>10} │ {:>6}% │ {:6} │ {}",
            truncate(&row.label, 18),
            money(row.total_cost),
            money(row.net_profit),
            money(row.margin_pct),
            row.risk_level.as_str(),
            row.recommendation.as_str()
        );
    }

    Ok(())
}
