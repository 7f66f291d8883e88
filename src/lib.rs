//! 차량 보유 비용 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod app;
pub mod config;
pub mod cost;
pub mod i18n;
pub mod report;
pub mod ui_cli;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 두 바이너리가 공통으로 쓰는 로그 초기화. `RUST_LOG`로 덮어쓸 수 있다.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vehicle_cost_toolbox=info,warn"));
    // 테스트 등에서 이미 초기화된 경우는 무시한다.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
