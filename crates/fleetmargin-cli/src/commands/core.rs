//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_config` - Shared utility to load and validate engine configuration
//! - `cmd_config` - Show the effective configuration

use std::path::Path;

use anyhow::{Context, Result};
use fleetmargin_core::{default_config_path, EngineConfig};

/// Load engine configuration from an explicit path, the override, or defaults
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = EngineConfig::load(path).context("Failed to load engine configuration")?;
    tracing::debug!(
        source = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "default".to_string()),
        "Engine configuration loaded"
    );
    Ok(config)
}

pub fn cmd_config(
    config: &EngineConfig,
    explicit_path: Option<&Path>,
    path_only: bool,
    json: bool,
) -> Result<()> {
    let override_path = default_config_path();

    if path_only {
        match explicit_path.map(Path::to_path_buf).or(override_path) {
            Some(p) => println!("{}", p.display()),
            None => println!("No config directory available on this platform"),
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    let source = match (explicit_path, &override_path) {
        (Some(p), _) => p.display().to_string(),
        (None, Some(p)) if p.exists() => p.display().to_string(),
        _ => "built-in defaults".to_string(),
    };

    println!();
    println!("⚙️  Engine Configuration");
    println!("   Source: {}", source);
    println!("   ─────────────────────────────────────────────────────────────");
    match config.allocation_basis_km {
        Some(basis) => println!("   Allocation basis:       {} km/month", basis.normalize()),
        None => println!("   Allocation basis:       ⚠️  NOT SET (predictions will fail)"),
    }
    println!(
        "   High risk below:        {}%",
        config.risk.high_below_pct.normalize()
    );
    println!(
        "   Medium risk below:      {}%",
        config.risk.medium_below_pct.normalize()
    );
    println!(
        "   Fuel dominance ratio:   {}",
        config.risk.fuel_dominance_ratio.normalize()
    );
    println!(
        "   Fuel cost share:        {}",
        config.scenario.fuel_cost_share.normalize()
    );
    println!(
        "   Per-truck revenue:      {}",
        config.scenario.per_truck_revenue.normalize()
    );
    println!(
        "   Truck fixed cost:       {}/month",
        config.scenario.truck_monthly_fixed_cost.normalize()
    );
    println!("   Currency precision:     {} dp", config.minor_units);

    if let Err(e) = config.validate() {
        println!();
        println!("   ⚠️  {}", e);
    }

    Ok(())
}
