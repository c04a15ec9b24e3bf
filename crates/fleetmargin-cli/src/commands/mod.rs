//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (load_config) and the config command
//! - `predict` - Single-job profit prediction
//! - `scenarios` - Fleet what-if simulation and per-job sensitivity sweeps

pub mod core;
pub mod predict;
pub mod scenarios;

// Re-export command functions for main.rs
pub use core::*;
pub use predict::*;
pub use scenarios::*;

use fleetmargin_core::models::round_money;
use rust_decimal::Decimal;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount with exactly two decimal places
pub fn money(value: Decimal) -> String {
    format!("{:.2}", round_money(value, 2))
}
