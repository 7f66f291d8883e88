use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use vehicle_cost_toolbox::{
    app::{self, AppError},
    config::{self, Config, ConfigError},
    cost::{self, VehicleFinancialInput},
    i18n::{self, keys, Translator},
    report::{self, ReportData},
};

/// 차량 보유 비용 계산기 (CLI).
#[derive(Debug, Parser)]
#[command(name = "vehicle_cost_toolbox_cli", version, about)]
struct Cli {
    /// 언어 (auto/pt-br/en-us)
    #[arg(long, short = 'L', global = true)]
    lang: Option<String>,
    /// 설정 파일 경로 (기본: ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 차량 한 대의 월 비용을 계산한다.
    Estimate(EstimateArgs),
    /// 두 차량을 비교해 하나를 추천한다.
    Compare(CompareArgs),
}

/// 입력 파일 + 개별 값 덮어쓰기. 지정하지 않은 값은 설정의 기본값을 쓴다.
#[derive(Debug, Args)]
struct InputArgs {
    /// 입력값 TOML 파일
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    net_income: Option<f64>,
    #[arg(long)]
    vehicle_price: Option<f64>,
    #[arg(long)]
    distance_per_month: Option<f64>,
    #[arg(long)]
    fuel_efficiency: Option<f64>,
    #[arg(long)]
    fuel_price: Option<f64>,
    #[arg(long)]
    monthly_maintenance: Option<f64>,
    #[arg(long)]
    annual_insurance: Option<f64>,
    #[arg(long)]
    annual_tax_rate_percent: Option<f64>,
    #[arg(long)]
    annual_depreciation_rate_percent: Option<f64>,
}

impl InputArgs {
    fn resolve(&self, defaults: &VehicleFinancialInput) -> Result<VehicleFinancialInput, ConfigError> {
        let base = match &self.input {
            Some(path) => config::load_input_file(path)?,
            None => *defaults,
        };
        Ok(VehicleFinancialInput {
            net_income: self.net_income.unwrap_or(base.net_income),
            vehicle_price: self.vehicle_price.unwrap_or(base.vehicle_price),
            distance_per_month: self.distance_per_month.unwrap_or(base.distance_per_month),
            fuel_efficiency: self.fuel_efficiency.unwrap_or(base.fuel_efficiency),
            fuel_price: self.fuel_price.unwrap_or(base.fuel_price),
            monthly_maintenance: self.monthly_maintenance.unwrap_or(base.monthly_maintenance),
            annual_insurance: self.annual_insurance.unwrap_or(base.annual_insurance),
            annual_tax_rate_percent: self
                .annual_tax_rate_percent
                .unwrap_or(base.annual_tax_rate_percent),
            annual_depreciation_rate_percent: self
                .annual_depreciation_rate_percent
                .unwrap_or(base.annual_depreciation_rate_percent),
        })
    }
}

#[derive(Debug, Args)]
struct EstimateArgs {
    #[command(flatten)]
    input: InputArgs,
    /// 평문 보고서를 저장할 경로
    #[arg(long)]
    report: Option<PathBuf>,
    /// 결과를 TOML로 출력
    #[arg(long)]
    toml: bool,
}

#[derive(Debug, Args)]
struct CompareArgs {
    /// 차량 A 입력 TOML
    #[arg(long)]
    a: PathBuf,
    /// 차량 B 입력 TOML
    #[arg(long)]
    b: PathBuf,
    #[arg(long)]
    report: Option<PathBuf>,
    #[arg(long)]
    toml: bool,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    vehicle_cost_toolbox::init_logging();
    let cli = Cli::parse();
    let config_path = config::resolve_path(cli.config.as_deref());

    // 깨진 설정 파일은 덮어쓰지 않도록 여기서 멈춘다.
    let mut cfg = match config::load_or_create(&config_path) {
        Ok(cfg) => cfg,
        Err(err) => {
            let tr = Translator::new(&i18n::resolve_language(
                cli.lang.as_deref().unwrap_or("auto"),
                None,
            ));
            tracing::error!(path = %config_path.display(), error = %err, "config not loaded");
            eprintln!(
                "{}: {} ({err})",
                tr.t(keys::ERROR_PREFIX),
                tr.fill(keys::ERROR_CONFIG_LOAD, &[("path", config_path.display().to_string())])
            );
            return ExitCode::FAILURE;
        }
    };
    let mut tr = app::translator_for(&cfg, cli.lang.as_deref());

    match try_run(cli.command, &mut cfg, &mut tr, &config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(
    command: Option<Command>,
    cfg: &mut Config,
    tr: &mut Translator,
    config_path: &Path,
) -> Result<(), AppError> {
    match command {
        None => app::run(cfg, tr, config_path),
        Some(Command::Estimate(args)) => run_estimate(&args, cfg, tr),
        Some(Command::Compare(args)) => run_compare(&args, cfg, tr),
    }
}

fn run_estimate(args: &EstimateArgs, cfg: &Config, tr: &Translator) -> Result<(), AppError> {
    let input = args.input.resolve(&cfg.defaults)?;
    let summary = cost::summarize(&input);
    let data = ReportData::from_summary(&summary, &cfg.number_format, tr, &cfg.distance_unit);
    let text = report::render_text(&data, &cfg.number_format, tr);
    if args.toml {
        print!("{}", toml::to_string_pretty(&summary)?);
    } else {
        print!("{text}");
    }
    if let Some(path) = &args.report {
        report::save_report(path, &text)?;
    }
    Ok(())
}

fn run_compare(args: &CompareArgs, cfg: &Config, tr: &Translator) -> Result<(), AppError> {
    let a = config::load_input_file(&args.a)?;
    let b = config::load_input_file(&args.b)?;
    let outcome = cost::compare(&a, &b);
    let text = report::render_comparison_text(&outcome, &cfg.number_format, tr, &cfg.distance_unit);
    if args.toml {
        print!("{}", toml::to_string_pretty(&outcome)?);
    } else {
        print!("{text}");
    }
    if let Some(path) = &args.report {
        report::save_report(path, &text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flag_overrides_take_precedence_over_defaults() {
        let cli = Cli::parse_from([
            "vehicle_cost_toolbox_cli",
            "estimate",
            "--net-income",
            "5000",
            "--fuel-efficiency",
            "0",
        ]);
        let Some(Command::Estimate(args)) = cli.command else {
            panic!("expected estimate subcommand");
        };
        let input = args.input.resolve(&VehicleFinancialInput::default()).unwrap();
        assert_eq!(input.net_income, 5000.0);
        assert_eq!(input.fuel_efficiency, 0.0);
        assert_eq!(input.vehicle_price, 90000.0);
    }
}
