use serde::{Deserialize, Serialize};

use super::affordability::{
    affordability_index, classify, cost_per_distance, recommend, AffordabilityClass,
    RecommendationLevel,
};
use super::breakdown::{compute_monthly_costs, CostBreakdown, VehicleFinancialInput};

/// 단일 차량 추정 결과. 렌더링 계층이 그대로 소비하는 평범한 값 객체다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSummary {
    /// 월 총비용 (= breakdown.total)
    pub total: f64,
    /// 부담 지수 [%]
    pub index: f64,
    pub classification: AffordabilityClass,
    /// 거리단위당 비용
    pub cost_per_distance: f64,
    /// 차량 비용을 뺀 월 잔액
    pub balance: f64,
    pub net_income: f64,
    pub distance_per_month: f64,
    pub recommendation_level: RecommendationLevel,
    pub recommendation_text: String,
    pub breakdown: CostBreakdown,
}

/// 비용 분해 → 부담 지수 → 등급 → 거리당 비용 → 권고 문구 순으로 계산한다.
pub fn summarize(input: &VehicleFinancialInput) -> EstimateSummary {
    let breakdown = compute_monthly_costs(input);
    let total = breakdown.total;
    let index = affordability_index(total, input.net_income);
    let classification = classify(index);
    let cpd = cost_per_distance(total, input.distance_per_month);
    let recommendation_text = recommend(index, cpd).to_string();
    tracing::debug!(
        total,
        index,
        cost_per_distance = cpd,
        classification = classification.label(),
        "estimate computed"
    );
    EstimateSummary {
        total,
        index,
        classification,
        cost_per_distance: cpd,
        balance: input.net_income - total,
        net_income: input.net_income,
        distance_per_month: input.distance_per_month,
        recommendation_level: RecommendationLevel::from_index(index),
        recommendation_text,
        breakdown,
    }
}
