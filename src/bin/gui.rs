#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use vehicle_cost_toolbox::{
    config,
    cost::{self, AffordabilityClass, ComparisonOutcome, EstimateSummary, VehicleFinancialInput},
    i18n::{self, keys},
    report::{self, ReportData},
};

fn main() -> Result<(), eframe::Error> {
    vehicle_cost_toolbox::init_logging();
    // CLI 옵션 처리: --lang xx / --lang=xx (auto/pt-br/en-us), --config 경로
    let mut cli_lang: Option<String> = None;
    let mut cli_config: Option<PathBuf> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        } else if let Some(val) = a.strip_prefix("--config=") {
            cli_config = Some(PathBuf::from(val));
        } else if a == "--config" && i + 1 < args.len() {
            cli_config = Some(PathBuf::from(&args[i + 1]));
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1100.0, 780.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let config_path = config::resolve_path(cli_config.as_deref());
    // 읽지 못한 파일은 기본값으로 덮어쓰지 않는다.
    let (mut app_cfg, save_path) = match config::load_or_create(&config_path) {
        Ok(cfg) => (cfg, Some(config_path)),
        Err(e) => {
            tracing::warn!(path = %config_path.display(), error = %e, "config unavailable, settings will not be saved");
            (config::Config::default(), None)
        }
    };
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "AutoSmart",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg, save_path))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Estimate,
    Compare,
}

struct GuiApp {
    config: config::Config,
    /// 설정 저장 경로. 로드에 실패했으면 None.
    config_path: Option<PathBuf>,
    tr: i18n::Translator,
    tab: Tab,
    lang_input: String,
    currency_input: String,
    settings_status: Option<String>,
    show_settings_modal: bool,
    show_help_modal: bool,
    // 단일 추정
    input: VehicleFinancialInput,
    summary: Option<EstimateSummary>,
    // 비교
    compare_a: VehicleFinancialInput,
    compare_b: VehicleFinancialInput,
    outcome: Option<ComparisonOutcome>,
    report_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, config_path: Option<PathBuf>) -> Self {
        let tr = vehicle_cost_toolbox::app::translator_for(&config, None);
        tracing::debug!(lang = tr.language_code(), "GUI language resolved");
        let defaults = config.defaults;
        Self {
            lang_input: config.language.clone(),
            currency_input: config.number_format.currency_symbol.clone(),
            config,
            config_path,
            tr,
            tab: Tab::Estimate,
            settings_status: None,
            show_settings_modal: false,
            show_help_modal: false,
            input: defaults,
            summary: None,
            compare_a: defaults,
            compare_b: defaults,
            outcome: None,
            report_status: None,
        }
    }

    fn calculate(&mut self) {
        self.summary = Some(cost::summarize(&self.input));
        self.report_status = None;
    }

    fn calculate_comparison(&mut self) {
        self.outcome = Some(cost::compare(&self.compare_a, &self.compare_b));
        self.report_status = None;
    }

    fn save_report_dialog(&mut self, text: String, file_name: &str) {
        let Some(path) = FileDialog::new()
            .set_file_name(file_name)
            .add_filter("Text", &["txt"])
            .save_file()
        else {
            return;
        };
        self.report_status = Some(match report::save_report(&path, &text) {
            Ok(()) => self
                .tr
                .fill(keys::REPORT_SAVED, &[("path", path.display().to_string())]),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    /// 설정을 저장하고 상태 문구를 돌려준다.
    fn save_config(&self) -> String {
        let Some(path) = &self.config_path else {
            return self.tr.t(keys::SETTINGS_NOT_SAVED).to_string();
        };
        match self.config.save_to(path) {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED).to_string(),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        }
    }

    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Estimate, tr.t(keys::MAIN_MENU_ESTIMATE).trim_start_matches("1) ")),
            (Tab::Compare, tr.t(keys::MAIN_MENU_COMPARE).trim_start_matches("2) ")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_estimate(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::ESTIMATE_HEADING).trim().trim_matches('-').trim());
        ui.label(self.tr.t(keys::ESTIMATE_INTRO));
        ui.add_space(8.0);
        input_form(ui, "estimate", &mut self.input, &self.tr);
        ui.add_space(8.0);
        let calc = egui::Button::new(self.tr.t(keys::MAIN_MENU_ESTIMATE).trim_start_matches("1) "))
            .min_size(egui::vec2(ui.available_width(), 36.0));
        if ui.add(calc).clicked() {
            self.calculate();
        }

        let Some(summary) = self.summary.clone() else {
            return;
        };
        ui.separator();
        let data = ReportData::from_summary(
            &summary,
            &self.config.number_format,
            &self.tr,
            &self.config.distance_unit,
        );
        summary_panel(ui, &summary, &data, &self.tr);
        ui.add_space(8.0);
        if ui.button(txt_or(&self.tr, "gui.report.save", "Save report")).clicked() {
            let text = report::render_text(&data, &self.config.number_format, &self.tr);
            self.save_report_dialog(text, "AutoSmart_Report.txt");
        }
        if let Some(msg) = &self.report_status {
            ui.label(msg.as_str());
        }
    }

    fn ui_compare(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::COMPARE_HEADING).trim().trim_matches('-').trim());
        ui.add_space(8.0);
        for (name, input) in [("A", &mut self.compare_a), ("B", &mut self.compare_b)] {
            egui::CollapsingHeader::new(self.tr.fill(keys::COMPARE_CANDIDATE, &[("name", name.into())]))
                .default_open(true)
                .show(ui, |ui| input_form(ui, name, input, &self.tr));
        }
        ui.add_space(8.0);
        let run = egui::Button::new(self.tr.t(keys::MAIN_MENU_COMPARE).trim_start_matches("2) "))
            .min_size(egui::vec2(ui.available_width(), 36.0));
        if ui.add(run).clicked() {
            self.calculate_comparison();
        }

        let Some(outcome) = self.outcome.clone() else {
            return;
        };
        ui.separator();
        ui.heading(self.tr.recommended_line(outcome.recommended, outcome.reason));
        ui.columns(2, |cols| {
            for (col, (name, summary)) in cols.iter_mut().zip([("A", &outcome.a), ("B", &outcome.b)]) {
                col.strong(self.tr.fill(keys::COMPARE_CANDIDATE, &[("name", name.into())]));
                let data = ReportData::from_summary(
                    summary,
                    &self.config.number_format,
                    &self.tr,
                    &self.config.distance_unit,
                );
                summary_panel(col, summary, &data, &self.tr);
            }
        });
        ui.add_space(8.0);
        if ui.button(txt_or(&self.tr, "gui.report.save", "Save report")).clicked() {
            let text = report::render_comparison_text(
                &outcome,
                &self.config.number_format,
                &self.tr,
                &self.config.distance_unit,
            );
            self.save_report_dialog(text, "AutoSmart_Comparison.txt");
        }
        if let Some(msg) = &self.report_status {
            ui.label(msg.as_str());
        }
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let mut open = self.show_settings_modal;
        let mut save_clicked = false;
        egui::Window::new(txt_or(&tr, "gui.settings.title", "Settings"))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(txt_or(&tr, "gui.settings.lang", "Language"));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.as_str())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), "auto");
                        ui.selectable_value(&mut self.lang_input, "pt-br".into(), "Português (BR)");
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                    });
                ui.separator();
                ui.label(txt_or(&tr, "gui.settings.currency", "Currency symbol"));
                ui.text_edit_singleline(&mut self.currency_input);
                ui.separator();
                if ui.button(txt_or(&tr, "gui.settings.save", "Save settings")).clicked() {
                    save_clicked = true;
                }
                if let Some(msg) = &self.settings_status {
                    ui.label(msg.as_str());
                }
            });
        self.show_settings_modal = open;
        if save_clicked {
            self.config.language = self.lang_input.clone();
            if !self.currency_input.trim().is_empty() {
                self.config.number_format.currency_symbol = self.currency_input.trim().to_string();
            }
            self.tr = vehicle_cost_toolbox::app::translator_for(&self.config, None);
            self.settings_status = Some(self.save_config());
        }
    }
}

fn txt_or(tr: &i18n::Translator, key: &str, default: &str) -> String {
    tr.lookup(key).unwrap_or_else(|| default.to_string())
}

/// 아홉 개 입력값의 3열 폼.
fn input_form(ui: &mut egui::Ui, id: &str, input: &mut VehicleFinancialInput, tr: &i18n::Translator) {
    let field = |ui: &mut egui::Ui, key: &str, value: &mut f64, speed: f64| {
        ui.label(tr.t(key));
        ui.add(
            egui::DragValue::new(value)
                .speed(speed)
                .clamp_range(0.0..=1.0e12)
                .max_decimals(2),
        );
        ui.add_space(4.0);
    };
    ui.push_id(id, |ui| {
        ui.columns(3, |cols| {
            field(&mut cols[0], keys::FIELD_NET_INCOME, &mut input.net_income, 100.0);
            field(&mut cols[0], keys::FIELD_VEHICLE_PRICE, &mut input.vehicle_price, 1000.0);
            field(&mut cols[0], keys::FIELD_DISTANCE, &mut input.distance_per_month, 50.0);
            field(&mut cols[1], keys::FIELD_EFFICIENCY, &mut input.fuel_efficiency, 0.5);
            field(&mut cols[1], keys::FIELD_FUEL_PRICE, &mut input.fuel_price, 0.1);
            field(&mut cols[1], keys::FIELD_MAINTENANCE, &mut input.monthly_maintenance, 50.0);
            field(&mut cols[2], keys::FIELD_INSURANCE, &mut input.annual_insurance, 100.0);
            field(&mut cols[2], keys::FIELD_TAX_PCT, &mut input.annual_tax_rate_percent, 0.5);
            field(
                &mut cols[2],
                keys::FIELD_DEPRECIATION_PCT,
                &mut input.annual_depreciation_rate_percent,
                0.5,
            );
        });
    });
}

fn class_color(class: AffordabilityClass) -> egui::Color32 {
    match class {
        AffordabilityClass::Excellent => egui::Color32::from_rgb(46, 160, 67),
        AffordabilityClass::Adequate => egui::Color32::from_rgb(56, 132, 200),
        AffordabilityClass::Attention => egui::Color32::from_rgb(220, 160, 30),
        AffordabilityClass::Critical => egui::Color32::from_rgb(210, 60, 50),
    }
}

fn summary_panel(ui: &mut egui::Ui, summary: &EstimateSummary, data: &ReportData, tr: &i18n::Translator) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        egui::Grid::new(ui.next_auto_id())
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for (label, value) in &data.kpis {
                    ui.label(label.as_str());
                    ui.strong(value.as_str());
                    ui.end_row();
                }
            });
    });
    ui.colored_label(
        class_color(summary.classification),
        format!(
            "{}: {}",
            tr.t(keys::KPI_CLASSIFICATION),
            tr.classification(summary.classification)
        ),
    );
    ui.add_space(6.0);
    ui.label(tr.t(keys::REPORT_BARS));
    cost_bars(ui, &data.bars);
    ui.add_space(6.0);
    ui.strong(tr.t(keys::REPORT_RECOMMENDATIONS));
    ui.label(data.recommendation.as_str());
}

/// 비용 항목별 비례 막대.
fn cost_bars(ui: &mut egui::Ui, bars: &[(String, f64)]) {
    let full = (ui.available_width() - 140.0).max(80.0);
    let widths = report::bar_widths(bars, full as f64);
    for ((name, value), width) in bars.iter().zip(widths) {
        ui.horizontal(|ui| {
            ui.add_sized([120.0, 18.0], egui::Label::new(name.as_str()));
            let (rect, _) = ui.allocate_exact_size(egui::vec2(full, 14.0), egui::Sense::hover());
            let painter = ui.painter();
            painter.rect_stroke(rect, 2.0, ui.visuals().widgets.noninteractive.bg_stroke);
            let filled = egui::Rect::from_min_size(rect.min, egui::vec2(width as f32, rect.height()));
            painter.rect_filled(filled, 2.0, ui.visuals().selection.bg_fill);
            ui.label(format!("{value:.2}"));
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let tr = self.tr.clone();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(txt_or(&tr, "gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt_or(&tr, "gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        if self.show_help_modal {
            egui::Window::new(txt_or(&tr, "gui.about.title", "Help / About"))
                .collapsible(false)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.label(txt_or(
                        &tr,
                        "gui.about.index",
                        "Index = total monthly cost / net income × 100 (999 when income is 0).",
                    ));
                    ui.label(txt_or(
                        &tr,
                        "gui.about.classes",
                        "Classes: <10 Excellent, 10–20 Adequate, 20–30 Attention, >30 Critical.",
                    ));
                    ui.label(txt_or(
                        &tr,
                        "gui.about.compare",
                        "Comparison: lower index, then lower monthly cost, then lower cost per distance unit.",
                    ));
                });
        }

        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(200.0)
            .show(ctx, |ui| self.ui_nav(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Estimate => self.ui_estimate(ui),
                    Tab::Compare => self.ui_compare(ui),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_starts_from_config_defaults() {
        let mut cfg = config::Config::default();
        cfg.defaults.net_income = 7000.0;
        let app = GuiApp::new(cfg, None);
        assert_eq!(app.input.net_income, 7000.0);
        assert_eq!(app.compare_b.vehicle_price, 90000.0);
        assert!(app.summary.is_none());
    }

    #[test]
    fn calculate_fills_summary_and_comparison() {
        let mut app = GuiApp::new(config::Config::default(), None);
        app.calculate();
        let summary = app.summary.as_ref().expect("summary");
        assert_eq!(summary.classification, AffordabilityClass::Critical);

        app.compare_b.vehicle_price = 40000.0;
        app.calculate_comparison();
        let outcome = app.outcome.as_ref().expect("outcome");
        assert_eq!(outcome.recommended, cost::Candidate::B);
    }

    #[test]
    fn settings_are_saved_to_the_loaded_path_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gui.toml");
        let mut app = GuiApp::new(config::Config::default(), Some(path.clone()));
        app.config.distance_unit = "mi".into();
        assert_eq!(app.save_config(), app.tr.t(keys::SETTINGS_SAVED));
        assert_eq!(config::load_from(&path).expect("reload").distance_unit, "mi");

        let unsaved = GuiApp::new(config::Config::default(), None);
        assert_eq!(unsaved.save_config(), unsaved.tr.t(keys::SETTINGS_NOT_SAVED));
    }
}
