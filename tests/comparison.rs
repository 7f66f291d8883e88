//! 두 차량 비교의 3단계 동률 처리 회귀 테스트.
use vehicle_cost_toolbox::cost::{
    compare, Candidate, ComparisonReason, DecidingCriterion, VehicleFinancialInput,
};

/// 연료비 0, 정비비만 있는 단순 입력. total = maintenance 정확히.
fn flat(income: f64, maintenance: f64, distance: f64) -> VehicleFinancialInput {
    VehicleFinancialInput {
        net_income: income,
        vehicle_price: 0.0,
        distance_per_month: distance,
        fuel_efficiency: 0.0,
        fuel_price: 0.0,
        monthly_maintenance: maintenance,
        annual_insurance: 0.0,
        annual_tax_rate_percent: 0.0,
        annual_depreciation_rate_percent: 0.0,
    }
}

#[test]
fn lower_index_wins() {
    let a = flat(4000.0, 1200.0, 1000.0);
    let b = flat(4000.0, 800.0, 1000.0);
    let out = compare(&a, &b);
    assert_eq!(out.recommended, Candidate::B);
    assert_eq!(out.reason, ComparisonReason::LowerAffordabilityIndex);
    assert_eq!(out.reason.as_str(), "lower affordability index");
    assert_eq!(out.deciding_criterion, Some(DecidingCriterion::AffordabilityIndex));
    assert_eq!(out.recommended_summary().total, 800.0);
}

#[test]
fn primary_criterion_is_antisymmetric() {
    let cheap = flat(4000.0, 800.0, 1000.0);
    let pricey = flat(4000.0, 1200.0, 1000.0);
    let ab = compare(&cheap, &pricey);
    let ba = compare(&pricey, &cheap);
    assert_eq!(ab.recommended, Candidate::A);
    assert_eq!(ba.recommended, Candidate::B);
    assert_eq!(ab.reason, ba.reason);
    assert_eq!(ab.reason, ComparisonReason::LowerAffordabilityIndex);
}

#[test]
fn tied_index_falls_back_to_monthly_cost() {
    // 둘 다 10% 이지만 B의 월 비용이 더 낮다.
    let a = flat(10000.0, 1000.0, 1000.0);
    let b = flat(5000.0, 500.0, 1000.0);
    let out = compare(&a, &b);
    assert_eq!(out.a.index, out.b.index);
    assert_eq!(out.recommended, Candidate::B);
    assert_eq!(out.reason, ComparisonReason::LowerMonthlyCost);
    assert_eq!(out.deciding_criterion, Some(DecidingCriterion::MonthlyCost));
}

#[test]
fn tied_index_and_cost_falls_back_to_cost_per_distance() {
    let a = flat(4000.0, 1000.0, 1000.0);
    let b = flat(4000.0, 1000.0, 2000.0);
    let out = compare(&a, &b);
    assert_eq!(out.recommended, Candidate::B);
    assert_eq!(out.reason, ComparisonReason::LowerCostPerDistance);
    assert_eq!(out.reason.as_str(), "lower cost per distance unit");
    assert_eq!(out.deciding_criterion, Some(DecidingCriterion::CostPerDistance));
}

#[test]
fn a_winning_on_cost_per_distance_keeps_default_reason() {
    let a = flat(4000.0, 1000.0, 2000.0);
    let b = flat(4000.0, 1000.0, 1000.0);
    let out = compare(&a, &b);
    assert_eq!(out.recommended, Candidate::A);
    // 표시 사유는 기본값 그대로, 실제 결정 단계는 따로 남는다.
    assert_eq!(out.reason, ComparisonReason::LowerAffordabilityIndex);
    assert_eq!(out.deciding_criterion, Some(DecidingCriterion::CostPerDistance));
}

#[test]
fn a_winning_on_monthly_cost_keeps_default_reason() {
    let a = flat(5000.0, 500.0, 1000.0);
    let b = flat(10000.0, 1000.0, 1000.0);
    let out = compare(&a, &b);
    assert_eq!(out.recommended, Candidate::A);
    assert_eq!(out.reason, ComparisonReason::LowerAffordabilityIndex);
    assert_eq!(out.deciding_criterion, Some(DecidingCriterion::MonthlyCost));
}

#[test]
fn full_tie_defaults_to_a() {
    let a = flat(4000.0, 1000.0, 1000.0);
    let out = compare(&a, &a);
    assert_eq!(out.recommended, Candidate::A);
    assert_eq!(out.reason, ComparisonReason::LowerAffordabilityIndex);
    assert_eq!(out.deciding_criterion, None);
}

#[test]
fn index_difference_below_epsilon_counts_as_tie() {
    // B 지수가 A보다 1e-9 정도 높으면 동률로 보고 월 비용 단계로 넘어간다.
    let a = flat(4000.0, 1000.0, 1000.0);
    let b = flat(4000.0, 1000.0 + 4.0e-8, 2000.0);
    let out = compare(&a, &b);
    assert!(out.b.index > out.a.index);
    assert!((out.b.index - out.a.index) < 1e-6);
    assert!((out.b.total - out.a.total) < 1e-6);
    assert_eq!(out.recommended, Candidate::B);
    assert_eq!(out.reason, ComparisonReason::LowerCostPerDistance);
}

#[test]
fn zero_income_candidates_compare_on_cost() {
    let a = flat(0.0, 900.0, 1000.0);
    let b = flat(0.0, 700.0, 1000.0);
    let out = compare(&a, &b);
    assert_eq!(out.a.index, 999.0);
    assert_eq!(out.b.index, 999.0);
    assert_eq!(out.recommended, Candidate::B);
    assert_eq!(out.reason, ComparisonReason::LowerMonthlyCost);
}
