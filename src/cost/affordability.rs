use serde::{Deserialize, Serialize};

/// 소득이 0 이하일 때 반환하는 지수. 오류가 아니라 "최악"으로 취급되는 정상 값이다.
pub const INCOME_SENTINEL_INDEX: f64 = 999.0;

/// 월 비용이 소득에서 차지하는 비율(부담 지수)을 % 로 계산한다.
pub fn affordability_index(total_monthly_cost: f64, net_income: f64) -> f64 {
    if net_income <= 0.0 {
        INCOME_SENTINEL_INDEX
    } else {
        (total_monthly_cost / net_income) * 100.0
    }
}

/// 부담 지수 등급. 선언 순서가 곧 심각도 순서다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AffordabilityClass {
    Excellent,
    Adequate,
    Attention,
    Critical,
}

impl AffordabilityClass {
    /// 기본(영문) 표시 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            AffordabilityClass::Excellent => "Excellent (≤10%)",
            AffordabilityClass::Adequate => "Adequate (10–20%)",
            AffordabilityClass::Attention => "Attention (20–30%)",
            AffordabilityClass::Critical => "Critical (>30%)",
        }
    }
}

impl std::fmt::Display for AffordabilityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 부담 지수를 등급으로 분류한다.
///
/// 경계: 10은 Adequate(Excellent는 `<`), 20은 Adequate, 30은 Attention.
pub fn classify(index: f64) -> AffordabilityClass {
    if index < 10.0 {
        AffordabilityClass::Excellent
    } else if index <= 20.0 {
        AffordabilityClass::Adequate
    } else if index <= 30.0 {
        AffordabilityClass::Attention
    } else {
        AffordabilityClass::Critical
    }
}

/// 거리단위당 비용. 주행거리가 0 이하이면 0.
pub fn cost_per_distance(total_monthly_cost: f64, distance_per_month: f64) -> f64 {
    if distance_per_month <= 0.0 {
        0.0
    } else {
        total_monthly_cost / distance_per_month
    }
}

/// 권고 문구 단계. 등급과 달리 10 경계가 `<=` 로 Healthy 쪽에 속한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecommendationLevel {
    Healthy,
    Balanced,
    Alert,
    Critical,
}

impl RecommendationLevel {
    pub fn from_index(index: f64) -> Self {
        if index <= 10.0 {
            RecommendationLevel::Healthy
        } else if index <= 20.0 {
            RecommendationLevel::Balanced
        } else if index <= 30.0 {
            RecommendationLevel::Alert
        } else {
            RecommendationLevel::Critical
        }
    }

    /// 기본(영문) 권고 문구.
    pub fn text(&self) -> &'static str {
        match self {
            RecommendationLevel::Healthy => {
                "Healthy vehicle-to-income ratio. Keep up preventive maintenance and track fuel consumption."
            }
            RecommendationLevel::Balanced => {
                "Balanced. Try to trim fuel and maintenance spending and set a savings goal."
            }
            RecommendationLevel::Alert => {
                "Alert: review mileage, fuel efficiency and insurance. Simulate switching to a more efficient model."
            }
            RecommendationLevel::Critical => {
                "Critical: heavy weight on the budget. Consider selling or trading the vehicle, or renegotiating insurance/financing."
            }
        }
    }
}

/// 부담 지수로 권고 문구를 고른다.
///
/// `_cost_per_distance`는 현재 분기에 쓰이지 않는다. 거리당 비용을 반영한 문구가 추가될 자리다.
pub fn recommend(index: f64, _cost_per_distance: f64) -> &'static str {
    RecommendationLevel::from_index(index).text()
}
