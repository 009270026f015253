use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use api::backend::BackendClient;
use commands::ControlContext;
use config::Config;
use models::{Banner, Controls};
use services::poll_service::{ChartSettings, Poller, SystemClock};
use services::symbol_service;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr so they do not tear the dashboard frame on stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"))
        .add_directive("iv_sentiment_dash=info".parse().expect("static directive"))
        .add_directive("reqwest=warn".parse().expect("static directive"))
        .add_directive("hyper=warn".parse().expect("static directive"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!("📊 Starting IV sentiment dashboard...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let backend = match BackendClient::new(&config.backend_url, config.http_timeout) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create backend client: {}", e);
            return;
        }
    };
    info!("Polling backend at {}", backend.base_url());

    let (symbols, load_error) = symbol_service::load_symbols_or_banner(&config.stocks_csv);
    if symbols.is_empty() {
        warn!("No symbols available; the dashboard will show an empty selection");
    }

    let controls = Controls::new(
        symbols.first().map(str::to_string),
        config.default_limit,
        config.default_refresh,
    )
    .shared();

    commands::spawn_control_reader(ControlContext {
        controls: controls.clone(),
        symbols,
    });

    let chart = ChartSettings {
        dir: config.chart_dir.clone(),
        width: config.chart_width,
        height: config.chart_height,
    };

    let poller = Poller::new(backend, SystemClock, controls, chart)
        .with_sticky_banner(load_error.map(Banner::error));

    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
        }
    }
}
