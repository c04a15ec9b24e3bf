//! Fleetmargin CLI - Haulage job profit prediction
//!
//! Usage:
//!   fleetmargin predict --input job.toml         Predict one job
//!   fleetmargin simulate --revenue R --cost C    What-if over monthly figures
//!   fleetmargin sensitivity --input job.toml     Sweep fuel prices and rates
//!   fleetmargin config                           Show effective configuration

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use fleetmargin_core::ScenarioDelta;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Predict { input } => commands::cmd_predict(&config, &input, cli.json),
        Commands::Simulate {
            revenue,
            cost,
            fuel_change,
            rate_change,
            add_trucks,
            truck_cost,
        } => {
            let delta = ScenarioDelta {
                fuel_change_pct: fuel_change,
                rate_change_pct: rate_change,
                add_trucks,
                truck_monthly_fixed_cost: truck_cost,
            };
            commands::cmd_simulate(&config, revenue, cost, &delta, cli.json)
        }
        Commands::Sensitivity {
            input,
            fuel_prices,
            rates,
        } => commands::cmd_sensitivity(&config, &input, &fuel_prices, &rates, cli.json),
        Commands::Config { path } => {
            commands::cmd_config(&config, cli.config.as_deref(), path, cli.json)
        }
    }
}
