//! 계산 결과를 화면/문서용 데이터로 바꾸는 표현 계층.
//!
//! 계산 모듈은 숫자만 돌려주고, 통화/백분율 서식과 보고서 배치는 모두 여기서 한다.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::cost::{ComparisonOutcome, EstimateSummary};
use crate::i18n::{keys, Translator};

/// 보고서 막대 전체 폭 [문자]
pub const TEXT_BAR_WIDTH: usize = 40;

/// 통화/숫자 표시 형식.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub currency_symbol: String,
    pub decimal_separator: String,
    pub thousands_separator: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".into(),
            decimal_separator: ",".into(),
            thousands_separator: ".".into(),
        }
    }
}

impl NumberFormat {
    /// 천 단위 구분자를 넣어 소수 `decimals`자리로 표시한다.
    pub fn number(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let raw = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match raw.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (raw.as_str(), None),
        };
        let len = int_part.len();
        let mut out = String::new();
        // 반올림 결과가 0이면 "-0,00" 대신 "0,00"
        if value < 0.0 && raw.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            out.push('-');
        }
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push_str(&self.thousands_separator);
            }
            out.push(ch);
        }
        if let Some(frac) = frac_part {
            out.push_str(&self.decimal_separator);
            out.push_str(frac);
        }
        out
    }

    pub fn currency(&self, value: f64) -> String {
        format!("{} {}", self.currency_symbol, self.number(value, 2))
    }

    pub fn percent(&self, value: f64) -> String {
        format!("{}%", self.number(value, 1))
    }
}

/// 보고서 입출력 오류.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not save report: {0}")]
    Io(#[from] std::io::Error),
}

/// 렌더링 계층이 소비하는 보고서 데이터.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    /// (라벨, 서식 적용된 값)
    pub kpis: Vec<(String, String)>,
    /// (비용 항목명, 월 금액) 비율 시각화용
    pub bars: Vec<(String, f64)>,
    pub recommendation: String,
}

impl ReportData {
    pub fn from_summary(
        summary: &EstimateSummary,
        fmt: &NumberFormat,
        tr: &Translator,
        distance_unit: &str,
    ) -> Self {
        let kpis = vec![
            (tr.t(keys::KPI_TOTAL).to_string(), fmt.currency(summary.total)),
            (
                tr.t(keys::KPI_INDEX).to_string(),
                format!(
                    "{} ({})",
                    fmt.percent(summary.index),
                    tr.classification(summary.classification)
                ),
            ),
            (
                tr.t(keys::KPI_COST_PER_DISTANCE).to_string(),
                format!("{}/{}", fmt.currency(summary.cost_per_distance), distance_unit),
            ),
            (tr.t(keys::KPI_NET_INCOME).to_string(), fmt.currency(summary.net_income)),
            (
                tr.t(keys::KPI_DISTANCE).to_string(),
                format!("{} {}", fmt.number(summary.distance_per_month, 0), distance_unit),
            ),
            (tr.t(keys::KPI_BALANCE).to_string(), fmt.currency(summary.balance)),
        ];
        let bars = summary
            .breakdown
            .components()
            .iter()
            .map(|(c, v)| (tr.component(*c).to_string(), *v))
            .collect();
        Self {
            kpis,
            bars,
            recommendation: tr.recommendation(summary.recommendation_level).to_string(),
        }
    }
}

/// 막대 폭을 계산한다. 최댓값(최소 1)을 기준으로 비례하며 `[0, full_width]`로 자른다.
pub fn bar_widths(bars: &[(String, f64)], full_width: f64) -> Vec<f64> {
    let max_val = bars.iter().map(|(_, v)| *v).fold(1.0_f64, f64::max);
    bars.iter()
        .map(|(_, v)| ((v / max_val) * full_width).clamp(0.0, full_width))
        .collect()
}

/// 인쇄용 문서에서 깨지는 인쇄 부호를 ASCII로 바꾼다.
pub fn sanitize_text(text: &str) -> String {
    text.replace('—', "-")
        .replace('–', "-")
        .replace('…', "...")
        .replace(['“', '”'], "\"")
        .replace(['‘', '’'], "'")
}

fn push_section(out: &mut String, heading: &str) {
    out.push('\n');
    out.push_str(heading);
    out.push('\n');
    out.push_str(&"-".repeat(heading.chars().count()));
    out.push('\n');
}

fn push_body(out: &mut String, report: &ReportData, fmt: &NumberFormat, tr: &Translator) {
    push_section(out, tr.t(keys::REPORT_KPIS));
    for (label, value) in &report.kpis {
        out.push_str(&format!("{label}: {value}\n"));
    }

    push_section(out, tr.t(keys::REPORT_BARS));
    let label_width = report
        .bars
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    let widths = bar_widths(&report.bars, TEXT_BAR_WIDTH as f64);
    for ((name, value), width) in report.bars.iter().zip(widths) {
        let filled = width.round() as usize;
        out.push_str(&format!(
            "{name:<label_width$} |{}{}| {}\n",
            "#".repeat(filled),
            " ".repeat(TEXT_BAR_WIDTH - filled),
            fmt.number(*value, 2)
        ));
    }

    push_section(out, tr.t(keys::REPORT_RECOMMENDATIONS));
    out.push_str(&report.recommendation);
    out.push('\n');
}

/// 단일 차량 보고서를 평문으로 렌더링한다.
pub fn render_text(report: &ReportData, fmt: &NumberFormat, tr: &Translator) -> String {
    let title = tr.t(keys::REPORT_TITLE);
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push('\n');
    out.push_str(tr.t(keys::REPORT_INTRO));
    out.push('\n');
    push_body(&mut out, report, fmt, tr);
    sanitize_text(&out)
}

/// 두 차량 비교 보고서를 평문으로 렌더링한다.
pub fn render_comparison_text(
    outcome: &ComparisonOutcome,
    fmt: &NumberFormat,
    tr: &Translator,
    distance_unit: &str,
) -> String {
    let title = tr.t(keys::REPORT_COMPARISON_TITLE);
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push('\n');
    out.push_str(&tr.recommended_line(outcome.recommended, outcome.reason));
    out.push('\n');
    for (name, summary) in [("A", &outcome.a), ("B", &outcome.b)] {
        let heading = tr.fill(keys::COMPARE_CANDIDATE, &[("name", name.to_string())]);
        out.push('\n');
        out.push_str(&format!("## {heading}\n"));
        let report = ReportData::from_summary(summary, fmt, tr, distance_unit);
        push_body(&mut out, &report, fmt, tr);
    }
    sanitize_text(&out)
}

pub fn save_report(path: &Path, text: &str) -> Result<(), ReportError> {
    fs::write(path, text)?;
    tracing::info!(path = %path.display(), "report saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_configured_separators() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.number(2078.0303, 2), "2.078,03");
        assert_eq!(fmt.number(1234567.0, 0), "1.234.567");
        assert_eq!(fmt.number(999.0, 1), "999,0");
        assert_eq!(fmt.currency(-1500.5), "R$ -1.500,50");
        assert_eq!(fmt.number(-0.001, 2), "0,00");
    }

    #[test]
    fn us_style_format() {
        let fmt = NumberFormat {
            currency_symbol: "$".into(),
            decimal_separator: ".".into(),
            thousands_separator: ",".into(),
        };
        assert_eq!(fmt.currency(12345.678), "$ 12,345.68");
        assert_eq!(fmt.percent(51.96), "52.0%");
    }

    #[test]
    fn sanitize_replaces_typographic_marks() {
        assert_eq!(sanitize_text("a — b – c… “q” ‘s’"), "a - b - c... \"q\" 's'");
    }
}
