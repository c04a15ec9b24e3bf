//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// Fleetmargin - Profit/loss judgment for haulage jobs
#[derive(Parser)]
#[command(name = "fleetmargin")]
#[command(about = "Explainable profit prediction and what-if analysis for small fleets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file (defaults to the data-dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict profit, risk and recommendation for one job
    Predict {
        /// Job file (.json or .toml) with `job`, `truck` and `driver` sections
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Project fleet-level outcomes under what-if changes
    Simulate {
        /// Baseline monthly revenue
        #[arg(long)]
        revenue: Decimal,

        /// Baseline monthly cost
        #[arg(long)]
        cost: Decimal,

        /// Fuel price change in percent (e.g. 10 or -5)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        fuel_change: Decimal,

        /// Rate change in percent (e.g. 3 or -2.5)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        rate_change: Decimal,

        /// Number of trucks to add
        #[arg(long, default_value = "0")]
        add_trucks: u32,

        /// Monthly fixed cost per added truck (configured default if omitted)
        #[arg(long)]
        truck_cost: Option<Decimal>,
    },

    /// Re-predict one job at alternative fuel prices and offered rates
    Sensitivity {
        /// Job file (.json or .toml) with `job`, `truck` and `driver` sections
        #[arg(short, long)]
        input: PathBuf,

        /// Alternative fuel price per unit (repeatable)
        #[arg(long = "fuel-price")]
        fuel_prices: Vec<Decimal>,

        /// Alternative offered rate (repeatable)
        #[arg(long = "rate")]
        rates: Vec<Decimal>,
    },

    /// Show the effective engine configuration
    Config {
        /// Only print the override file location
        #[arg(long)]
        path: bool,
    },
}
