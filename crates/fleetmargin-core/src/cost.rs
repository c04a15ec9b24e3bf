//! Cost model
//!
//! Maps a job's route and resource inputs to a full-precision cost breakdown.
//! Nothing is rounded here; callers round once at the output boundary with
//! [`CostBreakdown::rounded`].

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{CostBreakdown, DriverProfile, JobInput, TruckProfile};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn require_positive(field: &'static str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(Error::validation(
            field,
            format!("must be positive, got {}", value),
        ));
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(Error::validation(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(())
}

/// Validate every numeric input a prediction depends on
///
/// Checks run in a fixed order so the first offending field reported is
/// stable for identical input.
pub fn validate_inputs(job: &JobInput, truck: &TruckProfile, driver: &DriverProfile) -> Result<()> {
    require_positive("distance_km", job.distance_km)?;
    require_positive("estimated_duration_hours", job.estimated_duration_hours)?;
    require_positive("offered_rate", job.offered_rate)?;
    require_positive("fuel_price_per_unit", job.fuel_price_per_unit)?;
    require_non_negative("toll_costs", job.toll_costs)?;
    require_non_negative("other_costs", job.other_costs)?;

    require_positive(
        "fuel_consumption_per_100km",
        truck.fuel_consumption_per_100km,
    )?;
    require_non_negative("maintenance_cost_per_km", truck.maintenance_cost_per_km)?;
    require_non_negative("insurance_monthly", truck.insurance_monthly)?;
    require_non_negative("leasing_monthly", truck.leasing_monthly)?;

    require_non_negative("hourly_rate", driver.hourly_rate)?;
    require_non_negative("monthly_fixed_cost", driver.monthly_fixed_cost)?;

    Ok(())
}

/// Compute the cost breakdown for a job
///
/// `allocation_basis_km` is the assumed average monthly distance the truck's
/// and driver's monthly fixed costs are spread over.
pub fn compute_cost_breakdown(
    job: &JobInput,
    truck: &TruckProfile,
    driver: &DriverProfile,
    allocation_basis_km: Decimal,
) -> Result<CostBreakdown> {
    if allocation_basis_km <= Decimal::ZERO {
        return Err(Error::Configuration(format!(
            "allocation basis_km must be positive, got {}",
            allocation_basis_km
        )));
    }
    validate_inputs(job, truck, driver)?;

    let fuel_cost = job
        .distance_km
        .checked_mul(truck.fuel_consumption_per_100km)
        .and_then(|litres| litres.checked_mul(job.fuel_price_per_unit))
        .and_then(|cost| cost.checked_div(HUNDRED))
        .ok_or_else(|| Error::overflow("fuel cost"))?;
    let driver_cost = job
        .estimated_duration_hours
        .checked_mul(driver.hourly_rate)
        .ok_or_else(|| Error::overflow("driver cost"))?;
    let maintenance_cost = job
        .distance_km
        .checked_mul(truck.maintenance_cost_per_km)
        .ok_or_else(|| Error::overflow("maintenance cost"))?;

    // Multiply before dividing to keep the allocation exact as long as possible
    let fixed_cost_allocation = truck
        .insurance_monthly
        .checked_add(truck.leasing_monthly)
        .and_then(|sum| sum.checked_add(driver.monthly_fixed_cost))
        .and_then(|monthly| monthly.checked_mul(job.distance_km))
        .and_then(|spread| spread.checked_div(allocation_basis_km))
        .ok_or_else(|| Error::overflow("fixed cost allocation"))?;

    CostBreakdown::from_components(
        fuel_cost,
        driver_cost,
        maintenance_cost,
        job.toll_costs,
        fixed_cost_allocation,
        job.other_costs,
    )
}
