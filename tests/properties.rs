//! 비용 모델의 성질 기반 테스트.
use proptest::prelude::*;

use vehicle_cost_toolbox::cost::{
    affordability_index, classify, compare, compute_monthly_costs, cost_per_distance, Candidate,
    VehicleFinancialInput,
};

fn input_strategy() -> impl Strategy<Value = VehicleFinancialInput> {
    (
        (0.0..50_000.0f64, 0.0..500_000.0f64, 0.0..10_000.0f64),
        (-5.0..30.0f64, 0.0..20.0f64, 0.0..2_000.0f64),
        (0.0..20_000.0f64, 0.0..10.0f64, 0.0..30.0f64),
    )
        .prop_map(
            |(
                (net_income, vehicle_price, distance_per_month),
                (fuel_efficiency, fuel_price, monthly_maintenance),
                (annual_insurance, annual_tax_rate_percent, annual_depreciation_rate_percent),
            )| VehicleFinancialInput {
                net_income,
                vehicle_price,
                distance_per_month,
                fuel_efficiency,
                fuel_price,
                monthly_maintenance,
                annual_insurance,
                annual_tax_rate_percent,
                annual_depreciation_rate_percent,
            },
        )
}

proptest! {
    #[test]
    fn total_is_exact_sum_of_components(input in input_strategy()) {
        let b = compute_monthly_costs(&input);
        prop_assert_eq!(b.total, b.fuel + b.maintenance + b.insurance + b.tax + b.depreciation);
    }

    #[test]
    fn fuel_matches_formula_or_zero(input in input_strategy()) {
        let b = compute_monthly_costs(&input);
        if input.fuel_efficiency > 0.0 {
            prop_assert_eq!(b.fuel, (input.distance_per_month / input.fuel_efficiency) * input.fuel_price);
        } else {
            prop_assert_eq!(b.fuel, 0.0);
        }
    }

    #[test]
    fn sentinel_for_non_positive_income(total in -1.0e6..1.0e6f64, income in -1.0e6..=0.0f64) {
        prop_assert_eq!(affordability_index(total, income), 999.0);
    }

    #[test]
    fn index_is_monotonic_in_total(
        t1 in 0.0..1.0e6f64,
        delta in 0.0..1.0e6f64,
        income in 1.0..1.0e6f64,
    ) {
        prop_assert!(affordability_index(t1, income) <= affordability_index(t1 + delta, income));
    }

    #[test]
    fn classification_is_monotonic(x in -10.0..1000.0f64, delta in 0.0..100.0f64) {
        prop_assert!(classify(x) <= classify(x + delta));
    }

    #[test]
    fn cost_per_distance_zero_for_non_positive_distance(total in -1.0e6..1.0e6f64, d in -1.0e4..=0.0f64) {
        prop_assert_eq!(cost_per_distance(total, d), 0.0);
    }

    #[test]
    fn swapping_candidates_swaps_winner_when_index_differs(
        a in input_strategy(),
        b in input_strategy(),
    ) {
        let ab = compare(&a, &b);
        prop_assume!((ab.a.index - ab.b.index).abs() >= 1e-6);
        let ba = compare(&b, &a);
        let expected_ab = if ab.a.index < ab.b.index { Candidate::A } else { Candidate::B };
        let expected_ba = if expected_ab == Candidate::A { Candidate::B } else { Candidate::A };
        prop_assert_eq!(ab.recommended, expected_ab);
        prop_assert_eq!(ba.recommended, expected_ba);
        prop_assert_eq!(ab.reason, ba.reason);
    }
}
