use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::cost::{AffordabilityClass, Candidate, ComparisonReason, CostComponent, RecommendationLevel};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ESTIMATE: &str = "main_menu.estimate";
    pub const MAIN_MENU_COMPARE: &str = "main_menu.compare";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_DEFAULT_HINT: &str = "prompt.default_hint";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_CONFIG_LOAD: &str = "error.config_load";
    pub const SETTINGS_NOT_SAVED: &str = "settings.not_saved";

    pub const FIELD_NET_INCOME: &str = "field.net_income";
    pub const FIELD_VEHICLE_PRICE: &str = "field.vehicle_price";
    pub const FIELD_DISTANCE: &str = "field.distance_per_month";
    pub const FIELD_EFFICIENCY: &str = "field.fuel_efficiency";
    pub const FIELD_FUEL_PRICE: &str = "field.fuel_price";
    pub const FIELD_MAINTENANCE: &str = "field.monthly_maintenance";
    pub const FIELD_INSURANCE: &str = "field.annual_insurance";
    pub const FIELD_TAX_PCT: &str = "field.annual_tax_rate";
    pub const FIELD_DEPRECIATION_PCT: &str = "field.annual_depreciation_rate";

    pub const ESTIMATE_HEADING: &str = "estimate.heading";
    pub const ESTIMATE_INTRO: &str = "estimate.intro";
    pub const COMPARE_HEADING: &str = "compare.heading";
    pub const COMPARE_CANDIDATE: &str = "compare.candidate";
    pub const COMPARE_RECOMMENDED: &str = "compare.recommended";

    pub const KPI_TOTAL: &str = "kpi.total";
    pub const KPI_INDEX: &str = "kpi.index";
    pub const KPI_CLASSIFICATION: &str = "kpi.classification";
    pub const KPI_COST_PER_DISTANCE: &str = "kpi.cost_per_distance";
    pub const KPI_NET_INCOME: &str = "kpi.net_income";
    pub const KPI_DISTANCE: &str = "kpi.distance_per_month";
    pub const KPI_BALANCE: &str = "kpi.balance";

    pub const COMPONENT_FUEL: &str = "component.fuel";
    pub const COMPONENT_MAINTENANCE: &str = "component.maintenance";
    pub const COMPONENT_INSURANCE: &str = "component.insurance";
    pub const COMPONENT_TAX: &str = "component.tax";
    pub const COMPONENT_DEPRECIATION: &str = "component.depreciation";

    pub const CLASS_EXCELLENT: &str = "class.excellent";
    pub const CLASS_ADEQUATE: &str = "class.adequate";
    pub const CLASS_ATTENTION: &str = "class.attention";
    pub const CLASS_CRITICAL: &str = "class.critical";

    pub const REC_HEALTHY: &str = "recommendation.healthy";
    pub const REC_BALANCED: &str = "recommendation.balanced";
    pub const REC_ALERT: &str = "recommendation.alert";
    pub const REC_CRITICAL: &str = "recommendation.critical";

    pub const REASON_INDEX: &str = "reason.lower_index";
    pub const REASON_MONTHLY_COST: &str = "reason.lower_monthly_cost";
    pub const REASON_COST_PER_DISTANCE: &str = "reason.lower_cost_per_distance";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_INTRO: &str = "report.intro";
    pub const REPORT_KPIS: &str = "report.kpis";
    pub const REPORT_BARS: &str = "report.bars";
    pub const REPORT_RECOMMENDATIONS: &str = "report.recommendations";
    pub const REPORT_COMPARISON_TITLE: &str = "report.comparison_title";
    pub const PROMPT_SAVE_REPORT: &str = "prompt.save_report";
    pub const REPORT_SAVED: &str = "report.saved";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_CURRENT_CURRENCY: &str = "settings.current_currency";
    pub const SETTINGS_PROMPT_CURRENCY: &str = "settings.prompt_currency";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Pt,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Pt
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(pt/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 pt로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(Path::new(dir), lang_code));
        if overrides.is_some() {
            tracing::info!(lang = lang_code, "language pack loaded");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 영어/포르투갈어 순이며 영어 번역이 없으면 포르투갈어로 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| pt(key)),
            Language::Pt => pt(key),
        }
    }

    /// `{name}` 형태의 자리표시자를 채운 번역을 반환한다.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }

    pub fn classification(&self, class: AffordabilityClass) -> &str {
        self.t(match class {
            AffordabilityClass::Excellent => keys::CLASS_EXCELLENT,
            AffordabilityClass::Adequate => keys::CLASS_ADEQUATE,
            AffordabilityClass::Attention => keys::CLASS_ATTENTION,
            AffordabilityClass::Critical => keys::CLASS_CRITICAL,
        })
    }

    pub fn recommendation(&self, level: RecommendationLevel) -> &str {
        self.t(match level {
            RecommendationLevel::Healthy => keys::REC_HEALTHY,
            RecommendationLevel::Balanced => keys::REC_BALANCED,
            RecommendationLevel::Alert => keys::REC_ALERT,
            RecommendationLevel::Critical => keys::REC_CRITICAL,
        })
    }

    pub fn component(&self, component: CostComponent) -> &str {
        self.t(match component {
            CostComponent::Fuel => keys::COMPONENT_FUEL,
            CostComponent::Maintenance => keys::COMPONENT_MAINTENANCE,
            CostComponent::Insurance => keys::COMPONENT_INSURANCE,
            CostComponent::Tax => keys::COMPONENT_TAX,
            CostComponent::Depreciation => keys::COMPONENT_DEPRECIATION,
        })
    }

    pub fn reason(&self, reason: ComparisonReason) -> &str {
        self.t(match reason {
            ComparisonReason::LowerAffordabilityIndex => keys::REASON_INDEX,
            ComparisonReason::LowerMonthlyCost => keys::REASON_MONTHLY_COST,
            ComparisonReason::LowerCostPerDistance => keys::REASON_COST_PER_DISTANCE,
        })
    }

    /// "Recommended: vehicle A (lower monthly cost)" 형태의 문장.
    pub fn recommended_line(&self, candidate: Candidate, reason: ComparisonReason) -> String {
        self.fill(
            keys::COMPARE_RECOMMENDED,
            &[
                ("name", candidate.as_str().to_string()),
                ("reason", self.reason(reason).to_string()),
            ],
        )
    }
}

pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "pt-br".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "pt" | "pt-br" | "pt_br" => Some("pt-br".into()),
        "en" | "en-us" | "en_us" | "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("pt") => Some("pt-br".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "pt" => Some("pt-br".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    for var in ["LANG", "LC_ALL"] {
        if let Some(code) = std::env::var(var).ok().as_deref().and_then(normalize_locale_string) {
            return Some(code);
        }
    }
    None
}

/// `<dir>/<lang>.toml`, 없으면 `<dir>/<기본 언어>.toml`(예: en-us → en)을 읽는다.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let base = lang.split(['-', '_']).next().filter(|b| *b != lang);
    [Some(lang), base].into_iter().flatten().find_map(|code| {
        let path = dir.join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        match parse_toml_to_map(&content) {
            Some(map) => Some(map),
            None => {
                tracing::warn!(path = %path.display(), "language pack ignored");
                None
            }
        }
    })
}

/// 중첩 테이블을 점으로 이은 키로 편다. 문자열이 아닌 값은 무시한다.
fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let root: toml::Table = toml::from_str(src).ok()?;
    let mut map = HashMap::new();
    let mut pending: Vec<(String, toml::Value)> = root.into_iter().collect();
    while let Some((key, value)) = pending.pop() {
        match value {
            toml::Value::String(text) => {
                map.insert(key, text);
            }
            toml::Value::Table(table) => {
                pending.extend(table.into_iter().map(|(k, v)| (format!("{key}.{k}"), v)));
            }
            _ => {}
        }
    }
    (!map.is_empty()).then_some(map)
}

fn pt(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Erro",
        APP_EXIT => "Encerrando o programa.",
        APP_TITLE => "AutoSmart - Consultoria Automotiva",
        MAIN_MENU_TITLE => "\n=== AutoSmart - Custo do Veículo ===",
        MAIN_MENU_ESTIMATE => "1) Calcular custo mensal",
        MAIN_MENU_COMPARE => "2) Comparar dois veículos",
        MAIN_MENU_SETTINGS => "3) Configurações",
        MAIN_MENU_EXIT => "0) Sair",
        PROMPT_MENU_SELECT => "Escolha uma opção: ",
        PROMPT_DEFAULT_HINT => "(enter = {default})",
        INVALID_SELECTION_RETRY => "Entrada inválida. Tente novamente.",
        ERROR_INVALID_NUMBER => "Digite um número.",
        ERROR_CONFIG_LOAD => "não foi possível ler {path}; corrija ou remova o arquivo",
        FIELD_NET_INCOME => "Renda líquida mensal",
        FIELD_VEHICLE_PRICE => "Valor do carro",
        FIELD_DISTANCE => "Km rodados por mês",
        FIELD_EFFICIENCY => "Consumo médio (km/l)",
        FIELD_FUEL_PRICE => "Preço do combustível (por litro)",
        FIELD_MAINTENANCE => "Manutenção mensal",
        FIELD_INSURANCE => "Seguro anual",
        FIELD_TAX_PCT => "IPVA (% ao ano)",
        FIELD_DEPRECIATION_PCT => "Depreciação (% ao ano)",
        ESTIMATE_HEADING => "\n-- Custo mensal do veículo --",
        ESTIMATE_INTRO => "Use estimativas; você pode ajustar depois.",
        COMPARE_HEADING => "\n-- Comparar dois veículos --",
        COMPARE_CANDIDATE => "Veículo {name}",
        COMPARE_RECOMMENDED => "Recomendado: veículo {name} ({reason})",
        KPI_TOTAL => "Custo mensal total",
        KPI_INDEX => "IAS (custo/renda × 100)",
        KPI_CLASSIFICATION => "Classificação do IAS",
        KPI_COST_PER_DISTANCE => "Custo por km",
        KPI_NET_INCOME => "Renda líquida",
        KPI_DISTANCE => "Km/mês",
        KPI_BALANCE => "Saldo mensal após o carro",
        COMPONENT_FUEL => "Combustível",
        COMPONENT_MAINTENANCE => "Manutenção",
        COMPONENT_INSURANCE => "Seguro",
        COMPONENT_TAX => "IPVA",
        COMPONENT_DEPRECIATION => "Depreciação",
        CLASS_EXCELLENT => "Excelente (≤ 10%)",
        CLASS_ADEQUATE => "Adequado (10–20%)",
        CLASS_ATTENTION => "Atenção (20–30%)",
        CLASS_CRITICAL => "Crítico (> 30%)",
        REC_HEALTHY => "Relação carro × renda saudável. Mantenha preventiva e acompanhe consumo.",
        REC_BALANCED => "Equilíbrio ok. Tente reduzir combustível/manutenção e defina meta de economia.",
        REC_ALERT => "Alerta: reveja quilometragem, consumo e seguro. Simule troca por modelo mais eficiente.",
        REC_CRITICAL => "Crítico: alto peso no orçamento. Considere vender/trocar ou renegociar seguro/financiamento.",
        REASON_INDEX => "menor IAS",
        REASON_MONTHLY_COST => "menor custo mensal",
        REASON_COST_PER_DISTANCE => "menor custo por km",
        REPORT_TITLE => "AutoSmart - Relatório Financeiro do Veículo",
        REPORT_INTRO => "Resumo do custo mensal com IAS (Índice AutoSmart) e custo por km.",
        REPORT_KPIS => "KPIs principais",
        REPORT_BARS => "Distribuição de custos mensais",
        REPORT_RECOMMENDATIONS => "Recomendações",
        REPORT_COMPARISON_TITLE => "AutoSmart - Comparação de Veículos",
        PROMPT_SAVE_REPORT => "Salvar relatório em arquivo (enter para pular): ",
        REPORT_SAVED => "Relatório salvo em {path}",
        SETTINGS_HEADING => "\n-- Configurações --",
        SETTINGS_CURRENT_LANGUAGE => "Idioma atual: {lang}",
        SETTINGS_PROMPT_LANGUAGE => "Novo idioma (pt/en/auto, enter para manter): ",
        SETTINGS_CURRENT_CURRENCY => "Símbolo monetário atual: {symbol}",
        SETTINGS_PROMPT_CURRENCY => "Novo símbolo monetário (enter para manter): ",
        SETTINGS_SAVED => "Configurações salvas.",
        SETTINGS_NOT_SAVED => "O arquivo de configuração não pôde ser lido; as alterações não foram salvas.",
        _ => "[tradução ausente]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "AutoSmart - Vehicle Cost Advisor",
        MAIN_MENU_TITLE => "\n=== AutoSmart - Vehicle Cost ===",
        MAIN_MENU_ESTIMATE => "1) Estimate monthly cost",
        MAIN_MENU_COMPARE => "2) Compare two vehicles",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_DEFAULT_HINT => "(enter = {default})",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_CONFIG_LOAD => "could not read {path}; fix or remove the file",
        FIELD_NET_INCOME => "Monthly net income",
        FIELD_VEHICLE_PRICE => "Vehicle price",
        FIELD_DISTANCE => "Distance per month",
        FIELD_EFFICIENCY => "Fuel efficiency (distance per fuel unit)",
        FIELD_FUEL_PRICE => "Fuel price (per fuel unit)",
        FIELD_MAINTENANCE => "Monthly maintenance",
        FIELD_INSURANCE => "Annual insurance",
        FIELD_TAX_PCT => "Ownership tax (% per year)",
        FIELD_DEPRECIATION_PCT => "Depreciation (% per year)",
        ESTIMATE_HEADING => "\n-- Monthly vehicle cost --",
        ESTIMATE_INTRO => "Use estimates; you can adjust them later.",
        COMPARE_HEADING => "\n-- Compare two vehicles --",
        COMPARE_CANDIDATE => "Vehicle {name}",
        COMPARE_RECOMMENDED => "Recommended: vehicle {name} ({reason})",
        KPI_TOTAL => "Total monthly cost",
        KPI_INDEX => "Affordability index (cost/income × 100)",
        KPI_CLASSIFICATION => "Index classification",
        KPI_COST_PER_DISTANCE => "Cost per distance unit",
        KPI_NET_INCOME => "Net income",
        KPI_DISTANCE => "Distance/month",
        KPI_BALANCE => "Monthly balance after vehicle",
        COMPONENT_FUEL => "Fuel",
        COMPONENT_MAINTENANCE => "Maintenance",
        COMPONENT_INSURANCE => "Insurance",
        COMPONENT_TAX => "Tax",
        COMPONENT_DEPRECIATION => "Depreciation",
        CLASS_EXCELLENT => "Excellent (≤10%)",
        CLASS_ADEQUATE => "Adequate (10–20%)",
        CLASS_ATTENTION => "Attention (20–30%)",
        CLASS_CRITICAL => "Critical (>30%)",
        REC_HEALTHY => "Healthy vehicle-to-income ratio. Keep up preventive maintenance and track fuel consumption.",
        REC_BALANCED => "Balanced. Try to trim fuel and maintenance spending and set a savings goal.",
        REC_ALERT => "Alert: review mileage, fuel efficiency and insurance. Simulate switching to a more efficient model.",
        REC_CRITICAL => "Critical: heavy weight on the budget. Consider selling or trading the vehicle, or renegotiating insurance/financing.",
        REASON_INDEX => "lower affordability index",
        REASON_MONTHLY_COST => "lower monthly cost",
        REASON_COST_PER_DISTANCE => "lower cost per distance unit",
        REPORT_TITLE => "AutoSmart - Vehicle Financial Report",
        REPORT_INTRO => "Monthly cost summary with affordability index and cost per distance unit.",
        REPORT_KPIS => "Key figures",
        REPORT_BARS => "Monthly cost distribution",
        REPORT_RECOMMENDATIONS => "Recommendations",
        REPORT_COMPARISON_TITLE => "AutoSmart - Vehicle Comparison",
        PROMPT_SAVE_REPORT => "Save report to file (enter to skip): ",
        REPORT_SAVED => "Report saved to {path}",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language: {lang}",
        SETTINGS_PROMPT_LANGUAGE => "New language (pt/en/auto, enter to keep): ",
        SETTINGS_CURRENT_CURRENCY => "Current currency symbol: {symbol}",
        SETTINGS_PROMPT_CURRENCY => "New currency symbol (enter to keep): ",
        SETTINGS_SAVED => "Settings saved.",
        SETTINGS_NOT_SAVED => "The config file could not be read; changes were not saved.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lang_maps_variants() {
        assert_eq!(normalize_lang("PT"), Some("pt-br".into()));
        assert_eq!(normalize_lang("en-uk"), Some("en-us".into()));
        assert_eq!(normalize_lang("auto"), None);
        assert_eq!(normalize_lang("ko"), None);
    }

    #[test]
    fn english_labels_match_core_strings() {
        let tr = Translator::new("en-us");
        for class in [
            AffordabilityClass::Excellent,
            AffordabilityClass::Adequate,
            AffordabilityClass::Attention,
            AffordabilityClass::Critical,
        ] {
            assert_eq!(tr.classification(class), class.label());
        }
        for level in [
            RecommendationLevel::Healthy,
            RecommendationLevel::Balanced,
            RecommendationLevel::Alert,
            RecommendationLevel::Critical,
        ] {
            assert_eq!(tr.recommendation(level), level.text());
        }
        assert_eq!(
            tr.reason(ComparisonReason::LowerCostPerDistance),
            ComparisonReason::LowerCostPerDistance.as_str()
        );
    }

    #[test]
    fn flat_and_nested_toml_packs_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("\"general.app_exit\" = \"Bye\"\n[kpi]\ntotal = \"Gesamt\"\n")
            .expect("pack");
        assert_eq!(map.get("kpi.total").map(String::as_str), Some("Gesamt"));
        assert_eq!(map.get("general.app_exit").map(String::as_str), Some("Bye"));
    }

    #[test]
    fn pack_falls_back_to_base_language_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("en.toml"), "[kpi]\ntotal = \"Monthly total\"\n").expect("write");
        let dir_str = dir.path().to_str().expect("utf-8 path");
        let tr = Translator::new_with_pack("en-us", Some(dir_str));
        assert_eq!(tr.t(keys::KPI_TOTAL), "Monthly total");
        assert_eq!(tr.t(keys::KPI_BALANCE), Translator::new("en-us").t(keys::KPI_BALANCE));

        let without_pack = Translator::new_with_pack("pt-br", Some(dir_str));
        assert_eq!(without_pack.t(keys::KPI_TOTAL), "Custo mensal total");
    }

    #[test]
    fn fill_replaces_placeholders() {
        let tr = Translator::new("en");
        assert_eq!(
            tr.recommended_line(Candidate::B, ComparisonReason::LowerMonthlyCost),
            "Recommended: vehicle B (lower monthly cost)"
        );
    }
}
