use serde::{Deserialize, Serialize};

/// 월 비용 추정에 필요한 입력값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleFinancialInput {
    /// 가구 월 실수령 소득 [통화/월]
    pub net_income: f64,
    /// 차량 가격 [통화]
    pub vehicle_price: f64,
    /// 월 주행거리 [거리단위/월]
    pub distance_per_month: f64,
    /// 평균 연비 [거리단위 / 연료단위]
    pub fuel_efficiency: f64,
    /// 연료 단가 [통화 / 연료단위]
    pub fuel_price: f64,
    /// 월 정비비 [통화/월]
    pub monthly_maintenance: f64,
    /// 연간 보험료 [통화/년]
    pub annual_insurance: f64,
    /// 연간 보유세율 [%], 차량 가격 기준
    pub annual_tax_rate_percent: f64,
    /// 연간 감가상각률 [%], 차량 가격 기준
    pub annual_depreciation_rate_percent: f64,
}

impl Default for VehicleFinancialInput {
    fn default() -> Self {
        Self {
            net_income: 4000.0,
            vehicle_price: 90000.0,
            distance_per_month: 1000.0,
            fuel_efficiency: 11.0,
            fuel_price: 5.90,
            monthly_maintenance: 200.0,
            annual_insurance: 3500.0,
            annual_tax_rate_percent: 4.0,
            annual_depreciation_rate_percent: 10.0,
        }
    }
}

/// 비용 구성 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostComponent {
    Fuel,
    Maintenance,
    Insurance,
    Tax,
    Depreciation,
}

impl CostComponent {
    /// 표시 순서대로 나열한 전체 항목.
    pub const ALL: [CostComponent; 5] = [
        CostComponent::Fuel,
        CostComponent::Maintenance,
        CostComponent::Insurance,
        CostComponent::Tax,
        CostComponent::Depreciation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CostComponent::Fuel => "fuel",
            CostComponent::Maintenance => "maintenance",
            CostComponent::Insurance => "insurance",
            CostComponent::Tax => "tax",
            CostComponent::Depreciation => "depreciation",
        }
    }
}

/// 월 비용 분해 결과. 모든 값은 [통화/월].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub fuel: f64,
    pub maintenance: f64,
    pub insurance: f64,
    pub tax: f64,
    pub depreciation: f64,
    /// 다섯 항목의 합
    pub total: f64,
}

impl CostBreakdown {
    /// 항목별 값을 가져온다.
    pub fn get(&self, component: CostComponent) -> f64 {
        match component {
            CostComponent::Fuel => self.fuel,
            CostComponent::Maintenance => self.maintenance,
            CostComponent::Insurance => self.insurance,
            CostComponent::Tax => self.tax,
            CostComponent::Depreciation => self.depreciation,
        }
    }

    /// 비율 시각화용으로 (항목, 값) 쌍을 표시 순서대로 반환한다. total은 포함하지 않는다.
    pub fn components(&self) -> [(CostComponent, f64); 5] {
        CostComponent::ALL.map(|c| (c, self.get(c)))
    }
}

/// 입력값으로 월 비용을 항목별로 분해한다.
///
/// 연비가 0 이하이면 연료비를 0으로 처리한다. 나머지 나눗셈은 상수(100, 12)뿐이라
/// 어떤 실수 입력에서도 실패하지 않는다.
pub fn compute_monthly_costs(input: &VehicleFinancialInput) -> CostBreakdown {
    let fuel = if input.fuel_efficiency <= 0.0 {
        0.0
    } else {
        (input.distance_per_month / input.fuel_efficiency) * input.fuel_price
    };
    let maintenance = input.monthly_maintenance;
    let insurance = input.annual_insurance / 12.0;
    let tax = (input.vehicle_price * (input.annual_tax_rate_percent / 100.0)) / 12.0;
    let depreciation =
        (input.vehicle_price * (input.annual_depreciation_rate_percent / 100.0)) / 12.0;
    let total = fuel + maintenance + insurance + tax + depreciation;
    CostBreakdown {
        fuel,
        maintenance,
        insurance,
        tax,
        depreciation,
        total,
    }
}
