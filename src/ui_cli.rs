use std::io::{self, Write};
use std::path::Path;

use crate::app::AppError;
use crate::config::Config;
use crate::cost::{self, VehicleFinancialInput};
use crate::i18n::{self, keys, Translator};
use crate::report::{self, NumberFormat, ReportData};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Estimate,
    Compare,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_ESTIMATE));
    println!("{}", tr.t(keys::MAIN_MENU_COMPARE));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Estimate),
            "2" => return Ok(MenuChoice::Compare),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 단일 차량 월 비용 메뉴를 처리한다.
pub fn handle_estimate(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ESTIMATE_HEADING));
    println!("{}", tr.t(keys::ESTIMATE_INTRO));
    let input = read_vehicle_input(tr, &cfg.defaults, &cfg.number_format)?;
    let summary = cost::summarize(&input);
    let data = ReportData::from_summary(&summary, &cfg.number_format, tr, &cfg.distance_unit);
    print_report_data(&data, tr, &cfg.number_format);
    let text = report::render_text(&data, &cfg.number_format, tr);
    offer_save_report(tr, &text)
}

/// 두 차량 비교 메뉴를 처리한다.
pub fn handle_compare(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::COMPARE_HEADING));
    println!("\n{}", tr.fill(keys::COMPARE_CANDIDATE, &[("name", "A".into())]));
    let a = read_vehicle_input(tr, &cfg.defaults, &cfg.number_format)?;
    println!("\n{}", tr.fill(keys::COMPARE_CANDIDATE, &[("name", "B".into())]));
    // 소득은 보통 같으므로 B의 기본값은 A 입력을 따른다.
    let b = read_vehicle_input(tr, &a, &cfg.number_format)?;
    let outcome = cost::compare(&a, &b);
    for (name, summary) in [("A", &outcome.a), ("B", &outcome.b)] {
        println!("\n{}", tr.fill(keys::COMPARE_CANDIDATE, &[("name", name.into())]));
        let data = ReportData::from_summary(summary, &cfg.number_format, tr, &cfg.distance_unit);
        for (label, value) in &data.kpis {
            println!("  {label}: {value}");
        }
    }
    println!("\n>> {}", tr.recommended_line(outcome.recommended, outcome.reason));
    let text =
        report::render_comparison_text(&outcome, &cfg.number_format, tr, &cfg.distance_unit);
    offer_save_report(tr, &text)
}

/// 설정 메뉴를 처리한다. 언어가 바뀌면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        tr.fill(keys::SETTINGS_CURRENT_LANGUAGE, &[("lang", cfg.language.clone())])
    );
    let lang = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    println!(
        "{}",
        tr.fill(
            keys::SETTINGS_CURRENT_CURRENCY,
            &[("symbol", cfg.number_format.currency_symbol.clone())]
        )
    );
    let symbol = read_line(tr.t(keys::SETTINGS_PROMPT_CURRENCY))?;
    let change = apply_settings(cfg, &lang, &symbol);
    if change.invalid_language {
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(change.language_changed)
}

/// 설정 메뉴 입력을 반영한 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsChange {
    pub language_changed: bool,
    pub invalid_language: bool,
}

/// 언어/통화 기호 입력을 설정에 반영한다. 빈 입력은 현재 값을 유지한다.
pub fn apply_settings(cfg: &mut Config, lang: &str, symbol: &str) -> SettingsChange {
    let mut change = SettingsChange::default();
    let lang = lang.trim().to_lowercase();
    match lang.as_str() {
        "" => {}
        "auto" => {
            cfg.language = "auto".into();
            change.language_changed = true;
        }
        other if other.starts_with("pt") || other.starts_with("en") => {
            cfg.language = i18n::resolve_language(other, None);
            change.language_changed = true;
        }
        _ => change.invalid_language = true,
    }
    let symbol = symbol.trim();
    if !symbol.is_empty() {
        cfg.number_format.currency_symbol = symbol.to_string();
    }
    change
}

/// 아홉 개 입력값을 차례로 묻는다. 빈 입력은 기본값을 유지한다.
pub fn read_vehicle_input(
    tr: &Translator,
    defaults: &VehicleFinancialInput,
    fmt: &NumberFormat,
) -> Result<VehicleFinancialInput, AppError> {
    let ask = |key: &str, default: f64| read_f64_or_default(tr, tr.t(key), default, fmt);
    Ok(VehicleFinancialInput {
        net_income: ask(keys::FIELD_NET_INCOME, defaults.net_income)?,
        vehicle_price: ask(keys::FIELD_VEHICLE_PRICE, defaults.vehicle_price)?,
        distance_per_month: ask(keys::FIELD_DISTANCE, defaults.distance_per_month)?,
        fuel_efficiency: ask(keys::FIELD_EFFICIENCY, defaults.fuel_efficiency)?,
        fuel_price: ask(keys::FIELD_FUEL_PRICE, defaults.fuel_price)?,
        monthly_maintenance: ask(keys::FIELD_MAINTENANCE, defaults.monthly_maintenance)?,
        annual_insurance: ask(keys::FIELD_INSURANCE, defaults.annual_insurance)?,
        annual_tax_rate_percent: ask(keys::FIELD_TAX_PCT, defaults.annual_tax_rate_percent)?,
        annual_depreciation_rate_percent: ask(
            keys::FIELD_DEPRECIATION_PCT,
            defaults.annual_depreciation_rate_percent,
        )?,
    })
}

/// KPI, 비용 분포, 권고 문구를 콘솔에 출력한다.
pub fn print_report_data(data: &ReportData, tr: &Translator, fmt: &NumberFormat) {
    println!();
    for (label, value) in &data.kpis {
        println!("{label}: {value}");
    }
    println!("\n{}", tr.t(keys::REPORT_BARS));
    for (name, value) in &data.bars {
        println!("  {name}: {}", fmt.currency(*value));
    }
    println!("\n{}", tr.t(keys::REPORT_RECOMMENDATIONS));
    println!("{}", data.recommendation);
}

fn offer_save_report(tr: &Translator, text: &str) -> Result<(), AppError> {
    let path = read_line(tr.t(keys::PROMPT_SAVE_REPORT))?;
    let path = path.trim();
    if path.is_empty() {
        return Ok(());
    }
    report::save_report(Path::new(path), text)?;
    println!("{}", tr.fill(keys::REPORT_SAVED, &[("path", path.to_string())]));
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64_or_default(
    tr: &Translator,
    label: &str,
    default: f64,
    fmt: &NumberFormat,
) -> Result<f64, AppError> {
    let hint = tr.fill(keys::PROMPT_DEFAULT_HINT, &[("default", fmt.number(default, 2))]);
    loop {
        let s = read_line(&format!("{label} {hint}: "))?;
        match parse_number_or_default(&s, default, fmt) {
            Some(v) => return Ok(v),
            None => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 사용자가 입력한 숫자를 해석한다. 빈 입력은 기본값.
///
/// 설정된 형식("90.000", "5,90", "90.000,50")을 먼저 적용하고, 형식에 맞지 않으면
/// 일반 표기("5.90")로 해석한다.
pub fn parse_number_or_default(raw: &str, default: f64, fmt: &NumberFormat) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(default);
    }
    localized_number(s, fmt).or_else(|| s.parse::<f64>().ok())
}

/// 천 단위 구분자는 3자리 묶음 사이에만 올 수 있다.
fn localized_number(s: &str, fmt: &NumberFormat) -> Option<f64> {
    let (sign, body) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match body.split_once(fmt.decimal_separator.as_str()) {
        Some((i, f)) if !fmt.decimal_separator.is_empty() => (i, Some(f)),
        _ => (body, None),
    };
    let is_digits = |t: &str| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit());
    let groups: Vec<&str> = if fmt.thousands_separator.is_empty() {
        vec![int_part]
    } else {
        int_part.split(fmt.thousands_separator.as_str()).collect()
    };
    let (first, rest) = groups.split_first()?;
    if !is_digits(*first) || (!rest.is_empty() && first.len() > 3) {
        return None;
    }
    if !rest.iter().all(|g| g.len() == 3 && is_digits(*g)) {
        return None;
    }
    if let Some(frac) = frac_part {
        if !is_digits(frac) {
            return None;
        }
    }
    let mut normalized = format!("{sign}{}", groups.concat());
    if let Some(frac) = frac_part {
        normalized.push('.');
        normalized.push_str(frac);
    }
    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_keeps_default() {
        let fmt = NumberFormat::default();
        assert_eq!(parse_number_or_default("  \n", 11.0, &fmt), Some(11.0));
    }

    #[test]
    fn accepts_locale_decimal_separator() {
        let fmt = NumberFormat::default();
        assert_eq!(parse_number_or_default("5,90", 0.0, &fmt), Some(5.90));
        assert_eq!(parse_number_or_default("90.000,50", 0.0, &fmt), Some(90000.5));
        assert_eq!(parse_number_or_default("abc", 0.0, &fmt), None);
    }

    #[test]
    fn thousands_separator_groups_are_read_as_thousands() {
        let fmt = NumberFormat::default();
        assert_eq!(parse_number_or_default("90.000", 0.0, &fmt), Some(90000.0));
        assert_eq!(parse_number_or_default("1.000", 0.0, &fmt), Some(1000.0));
        assert_eq!(parse_number_or_default("1.234.567", 0.0, &fmt), Some(1234567.0));
        assert_eq!(parse_number_or_default("-1.500", 0.0, &fmt), Some(-1500.0));
    }

    #[test]
    fn plain_notation_is_used_when_grouping_does_not_fit() {
        let fmt = NumberFormat::default();
        assert_eq!(parse_number_or_default("5.90", 0.0, &fmt), Some(5.90));
        assert_eq!(parse_number_or_default("11", 0.0, &fmt), Some(11.0));
        assert_eq!(parse_number_or_default("1e3", 0.0, &fmt), Some(1000.0));
    }

    #[test]
    fn us_format_groups_with_commas() {
        let fmt = NumberFormat {
            currency_symbol: "$".into(),
            decimal_separator: ".".into(),
            thousands_separator: ",".into(),
        };
        assert_eq!(parse_number_or_default("90,000", 0.0, &fmt), Some(90000.0));
        assert_eq!(parse_number_or_default("5.90", 0.0, &fmt), Some(5.90));
        assert_eq!(parse_number_or_default("1,234.5", 0.0, &fmt), Some(1234.5));
    }

    #[test]
    fn settings_input_updates_language_and_currency() {
        let mut cfg = Config::default();
        let change = apply_settings(&mut cfg, "EN\n", " US$ \n");
        assert!(change.language_changed);
        assert_eq!(cfg.language, "en-us");
        assert_eq!(cfg.number_format.currency_symbol, "US$");

        let change = apply_settings(&mut cfg, "ko", "");
        assert!(change.invalid_language);
        assert!(!change.language_changed);
        assert_eq!(cfg.language, "en-us");
    }
}
