use serde::{Deserialize, Serialize};

use super::breakdown::VehicleFinancialInput;
use super::summary::{summarize, EstimateSummary};

/// 비교 시 동률로 간주하는 허용 오차.
pub const TIE_EPSILON: f64 = 1e-6;

/// 비교 대상 차량.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Candidate {
    A,
    B,
}

impl Candidate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Candidate::A => "A",
            Candidate::B => "B",
        }
    }
}

/// 결과에 표시되는 추천 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonReason {
    LowerAffordabilityIndex,
    LowerMonthlyCost,
    LowerCostPerDistance,
}

impl ComparisonReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonReason::LowerAffordabilityIndex => "lower affordability index",
            ComparisonReason::LowerMonthlyCost => "lower monthly cost",
            ComparisonReason::LowerCostPerDistance => "lower cost per distance unit",
        }
    }
}

/// 실제로 승부가 갈린 비교 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecidingCriterion {
    AffordabilityIndex,
    MonthlyCost,
    CostPerDistance,
}

impl DecidingCriterion {
    fn reason(self) -> ComparisonReason {
        match self {
            DecidingCriterion::AffordabilityIndex => ComparisonReason::LowerAffordabilityIndex,
            DecidingCriterion::MonthlyCost => ComparisonReason::LowerMonthlyCost,
            DecidingCriterion::CostPerDistance => ComparisonReason::LowerCostPerDistance,
        }
    }
}

/// 두 차량 비교 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub recommended: Candidate,
    /// 표시용 사유. A가 이긴 경우에는 어느 단계에서 이겼든 항상 "lower affordability index".
    pub reason: ComparisonReason,
    /// 승부를 가른 단계. 세 단계 모두 동률이면 None.
    pub deciding_criterion: Option<DecidingCriterion>,
    pub a: EstimateSummary,
    pub b: EstimateSummary,
}

impl ComparisonOutcome {
    pub fn recommended_summary(&self) -> &EstimateSummary {
        match self.recommended {
            Candidate::A => &self.a,
            Candidate::B => &self.b,
        }
    }
}

/// 한 단계의 승자. B가 엄격히 작으면 B, 오차 이내면 동률(None), 그 외에는 A.
fn level_winner(a: f64, b: f64) -> Option<Candidate> {
    if b < a {
        Some(Candidate::B)
    } else if (a - b).abs() < TIE_EPSILON {
        None
    } else {
        Some(Candidate::A)
    }
}

/// 부담 지수 → 월 총비용 → 거리당 비용 순의 사전식 비교로 추천 차량을 고른다.
/// 모든 단계가 동률이면 A.
pub fn compare(input_a: &VehicleFinancialInput, input_b: &VehicleFinancialInput) -> ComparisonOutcome {
    let a = summarize(input_a);
    let b = summarize(input_b);

    let levels = [
        (DecidingCriterion::AffordabilityIndex, a.index, b.index),
        (DecidingCriterion::MonthlyCost, a.total, b.total),
        (DecidingCriterion::CostPerDistance, a.cost_per_distance, b.cost_per_distance),
    ];
    let decided = levels
        .iter()
        .find_map(|&(criterion, va, vb)| level_winner(va, vb).map(|w| (w, criterion)));

    let (recommended, deciding_criterion) = match decided {
        Some((winner, criterion)) => (winner, Some(criterion)),
        None => (Candidate::A, None),
    };
    let reason = match (recommended, deciding_criterion) {
        (Candidate::B, Some(criterion)) => criterion.reason(),
        _ => ComparisonReason::LowerAffordabilityIndex,
    };
    tracing::debug!(
        recommended = recommended.as_str(),
        reason = reason.as_str(),
        ?deciding_criterion,
        "comparison decided"
    );

    ComparisonOutcome {
        recommended,
        reason,
        deciding_criterion,
        a,
        b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_winner_prefers_strictly_smaller_b_even_within_epsilon() {
        assert_eq!(level_winner(10.0, 10.0 - 1e-9), Some(Candidate::B));
        assert_eq!(level_winner(10.0, 10.0 + 1e-9), None);
        assert_eq!(level_winner(10.0, 11.0), Some(Candidate::A));
    }

    #[test]
    fn nan_values_fall_back_to_a() {
        assert_eq!(level_winner(f64::NAN, 1.0), Some(Candidate::A));
    }
}
