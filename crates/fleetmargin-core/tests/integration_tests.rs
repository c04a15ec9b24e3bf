//! Integration tests for fleetmargin-core
//!
//! These tests exercise the public API end to end: config → engine → prediction,
//! and config → simulator → scenario rows.

use fleetmargin_core::{
    compute_cost_breakdown, margin_pct, sensitivity, CostBreakdown, DriverProfile, EngineConfig,
    Error, Explainer, FuelType, JobInput, JobRequest, ProfitEngine, Recommendation, RiskLevel,
    RiskRules, ScenarioBaseline, ScenarioDelta, ScenarioKind, ScenarioSimulator, TruckProfile,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn job(distance_km: Decimal, offered_rate: Decimal) -> JobInput {
    JobInput {
        origin: Some("Esbjerg".to_string()),
        destination: Some("Copenhagen".to_string()),
        distance_km,
        estimated_duration_hours: dec!(4),
        offered_rate,
        toll_costs: dec!(30),
        fuel_price_per_unit: dec!(1.85),
        other_costs: dec!(0),
    }
}

fn truck() -> TruckProfile {
    TruckProfile {
        name: Some("Scania R450".to_string()),
        license_plate: Some("AB 12 345".to_string()),
        fuel_type: FuelType::Diesel,
        fuel_consumption_per_100km: dec!(32),
        maintenance_cost_per_km: dec!(0.12),
        insurance_monthly: dec!(650),
        leasing_monthly: dec!(1800),
    }
}

fn driver() -> DriverProfile {
    DriverProfile {
        name: Some("Driver A".to_string()),
        hourly_rate: dec!(25),
        monthly_fixed_cost: dec!(400),
    }
}

fn engine() -> ProfitEngine {
    ProfitEngine::new(EngineConfig::embedded().unwrap()).unwrap()
}

fn components(fuel: Decimal, rest: Decimal) -> CostBreakdown {
    CostBreakdown::from_components(
        fuel,
        rest,
        Decimal::ZERO,
        Decimal::ZERO,
        Decimal::ZERO,
        Decimal::ZERO,
    )
    .unwrap()
}

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn test_example_fuel_cost() {
    let b = compute_cost_breakdown(&job(dec!(300), dec!(1200)), &truck(), &driver(), dec!(8800))
        .unwrap();
    assert_eq!(b.fuel_cost, dec!(177.60));
}

#[test]
fn test_example_driver_cost() {
    let result = engine()
        .predict(&job(dec!(300), dec!(1200)), &truck(), &driver())
        .unwrap();
    assert_eq!(result.cost_breakdown.driver_cost, dec!(100.00));
}

#[test]
fn test_example_low_risk_accept() {
    let a = RiskRules::default()
        .classify(&components(dec!(300), dec!(650)), dec!(1200))
        .unwrap();
    assert_eq!(a.margin_pct.round_dp(2), dec!(20.83));
    assert_eq!(a.risk_level, RiskLevel::Low);
    assert_eq!(a.recommendation, Recommendation::Accept);
}

#[test]
fn test_example_fuel_dominance_forces_review() {
    let a = RiskRules::default()
        .classify(&components(dec!(570), dec!(380)), dec!(1200))
        .unwrap();
    assert_eq!(a.risk_level, RiskLevel::Medium);
    assert_eq!(a.recommendation, Recommendation::Review);
    assert!(a.fuel_override);
}

#[test]
fn test_example_scenario_fuel_increase() {
    let sim = ScenarioSimulator::new(&EngineConfig::embedded().unwrap()).unwrap();
    let rows = sim
        .simulate(
            &ScenarioBaseline {
                monthly_revenue: dec!(45000),
                monthly_cost: dec!(38000),
            },
            &ScenarioDelta {
                fuel_change_pct: dec!(10),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(rows[0].kind, ScenarioKind::Baseline);
    assert_eq!(rows[1].cost, dec!(39330));
    assert_eq!(rows[1].profit, dec!(5670));
    assert_eq!(rows[1].margin_pct.round_dp(1), dec!(12.6));
}

#[test]
fn test_example_zero_rate_fails_validation() {
    let err = engine()
        .predict(&job(dec!(300), Decimal::ZERO), &truck(), &driver())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation {
            field: "offered_rate",
            ..
        }
    ));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_breakdown_sums_exactly_across_inputs() {
    let engine = engine();
    for distance in [dec!(1), dec!(37.3), dec!(250), dec!(1234.5)] {
        for rate in [dec!(99.99), dec!(850), dec!(5000)] {
            let result = engine.predict(&job(distance, rate), &truck(), &driver()).unwrap();
            let b = result.cost_breakdown;
            assert_eq!(
                b.total_cost,
                b.fuel_cost
                    + b.driver_cost
                    + b.maintenance_cost
                    + b.toll_costs
                    + b.fixed_cost_allocation
                    + b.other_costs
            );
            assert_eq!(b.total_cost, b.total_cost.round_dp(2));
        }
    }
}

#[test]
fn test_margin_monotonic_in_cost_and_rate() {
    let rate = dec!(1000);
    let mut previous = margin_pct(rate, dec!(0)).unwrap();
    for cost in [dec!(100), dec!(400), dec!(999), dec!(1500)] {
        let m = margin_pct(rate, cost).unwrap();
        assert!(m < previous);
        previous = m;
    }

    let cost = dec!(800);
    let mut previous = margin_pct(dec!(500), cost).unwrap();
    for rate in [dec!(800), dec!(1000), dec!(4000)] {
        let m = margin_pct(rate, cost).unwrap();
        assert!(m > previous);
        previous = m;
    }
}

#[test]
fn test_override_only_raises_risk() {
    let rules = RiskRules::default();
    for rate in [dec!(900), dec!(1000), dec!(1100), dec!(1500)] {
        let lean = rules.classify(&components(dec!(100), dec!(800)), rate).unwrap();
        let fuel_heavy = rules.classify(&components(dec!(800), dec!(100)), rate).unwrap();
        assert_eq!(lean.margin_pct, fuel_heavy.margin_pct);
        assert!(fuel_heavy.risk_level >= lean.risk_level);
    }
}

#[test]
fn test_prediction_is_deterministic() {
    let engine = engine();
    let a = engine
        .predict(&job(dec!(420), dec!(1350)), &truck(), &driver())
        .unwrap();
    let b = engine
        .predict(&job(dec!(420), dec!(1350)), &truck(), &driver())
        .unwrap();
    assert_eq!(a, b);

    let explainer = Explainer::default();
    assert_eq!(
        explainer.explain(&a.cost_breakdown, a.margin_pct, a.risk_level, a.recommendation),
        explainer.explain(&b.cost_breakdown, b.margin_pct, b.risk_level, b.recommendation)
    );
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = engine();
    let expected = engine
        .predict(&job(dec!(300), dec!(1200)), &truck(), &driver())
        .unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| engine.predict(&job(dec!(300), dec!(1200)), &truck(), &driver())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), expected);
        }
    });
}

#[test]
fn test_prediction_unaffected_by_later_profile_edits() {
    let engine = engine();
    let mut truck = truck();
    let before = engine
        .predict(&job(dec!(300), dec!(1200)), &truck, &driver())
        .unwrap();
    truck.insurance_monthly = dec!(5000);
    let after = engine
        .predict(&job(dec!(300), dec!(1200)), &truck, &driver())
        .unwrap();

    // The earlier result is a value, not a view onto the truck record
    assert_eq!(before.cost_breakdown.fixed_cost_allocation, dec!(97.16));
    assert!(
        after.cost_breakdown.fixed_cost_allocation > before.cost_breakdown.fixed_cost_allocation
    );
}

// =============================================================================
// Files and configuration
// =============================================================================

#[test]
fn test_predict_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("job.json");
    std::fs::write(
        &path,
        r#"{
  "job": {
    "distance_km": 300,
    "estimated_duration_hours": 4,
    "offered_rate": 1200,
    "toll_costs": 30,
    "fuel_price_per_unit": "1.85"
  },
  "truck": {
    "fuel_type": "diesel",
    "fuel_consumption_per_100km": 32,
    "maintenance_cost_per_km": "0.12",
    "insurance_monthly": 650,
    "leasing_monthly": 1800
  },
  "driver": {
    "hourly_rate": 25,
    "monthly_fixed_cost": 400
  }
}"#,
    )
    .unwrap();

    let request = JobRequest::load(&path).unwrap();
    let result = engine()
        .predict(&request.job, &request.truck, &request.driver)
        .unwrap();
    assert_eq!(result.cost_breakdown.fuel_cost, dec!(177.60));
    assert_eq!(result.cost_breakdown.maintenance_cost, dec!(36));
}

#[test]
fn test_config_without_basis_cannot_build_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.toml");
    std::fs::write(&path, "[scenario]\nfuel_cost_share = 0.4\n").unwrap();

    let config = EngineConfig::load(Some(&path)).unwrap();
    assert!(matches!(
        ProfitEngine::new(config.clone()),
        Err(Error::Configuration(_))
    ));

    // The simulator does not depend on the allocation basis
    assert!(ScenarioSimulator::new(&config).is_ok());
}

#[test]
fn test_custom_thresholds_change_classification() {
    let mut config = EngineConfig::embedded().unwrap();
    config.risk.medium_below_pct = dec!(70);
    let strict = ProfitEngine::new(config).unwrap();

    let result = strict
        .predict(&job(dec!(300), dec!(1200)), &truck(), &driver())
        .unwrap();
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert!(result.explanation.contains("below the 70% target"));
}

#[test]
fn test_sensitivity_through_public_api() {
    let rows = sensitivity(
        &engine(),
        &job(dec!(300), dec!(1200)),
        &truck(),
        &driver(),
        &[dec!(2.5)],
        &[dec!(450)],
    )
    .unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].total_cost > rows[0].total_cost);
    assert_eq!(rows[2].recommendation, Recommendation::Reject);
}
