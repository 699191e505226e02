mod arbitrage;
mod bot;
mod config;
mod domain;
mod exchanges;
mod report;

use bot::{Bot, BotConfig};
use config::Config;
use std::env;
use std::process;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

fn parse_config_path() -> String {
    for arg in env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--config=") {
            return path.to_string();
        }
    }
    DEFAULT_CONFIG_PATH.to_string()
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config_path = parse_config_path();
    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config {}: {}", config_path, e);
            process::exit(1);
        }
    };

    init_tracing(config.app.log_level.as_deref());

    let bot = match Bot::new(BotConfig {
        app_config: config,
        force_single_pass: env::args().any(|arg| arg == "--once"),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }) {
        Ok(bot) => bot,
        Err(e) => {
            error!(error = %e, "Failed to create bot");
            process::exit(1);
        }
    };

    info!(config = %config_path, "Bot initialized");

    let result = bot.start().await;
    let _ = bot.stop().await;

    if let Err(e) = result {
        error!(error = %e, "Bot error");
        process::exit(1);
    }
}
