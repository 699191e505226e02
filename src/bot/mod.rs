//! Pass driver.
//!
//! Fetches a fresh rate graph, runs one arbitrage pass on it, prints the
//! report and carries the balance over to the next pass.

mod config;
mod error;
mod stats;

pub use config::BotConfig;
pub use error::BotError;
pub use stats::Stats;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::arbitrage::{ArbitrageEngine, PassReport};
use crate::domain::Balance;
use crate::exchanges::{MarketData, create_market};
use crate::report;

/// Bot runs arbitrage passes one after another against a market data provider.
pub struct Bot {
    market: Arc<dyn MarketData>,
    engine: ArbitrageEngine,

    pass_interval: Duration,
    single_pass: bool,

    // Runtime state
    version: String,
    balance: Mutex<Balance>,
    started_at: Mutex<Option<Instant>>,
    running: Mutex<bool>,
    stats: Mutex<Stats>,
}

impl Bot {
    /// Creates a new Bot using the provider selected in the config.
    pub fn new(cfg: BotConfig) -> Result<Self, BotError> {
        let market = create_market(&cfg.app_config)?;
        Self::with_market(cfg, market)
    }

    /// Creates a new Bot on top of an existing market data provider.
    pub fn with_market(cfg: BotConfig, market: Arc<dyn MarketData>) -> Result<Self, BotError> {
        let app = &cfg.app_config;
        let engine = ArbitrageEngine::new(app.max_cycle_length())?;
        let balance = app.starting_balance()?;

        Ok(Bot {
            market,
            engine,
            pass_interval: app.pass_interval(),
            single_pass: cfg.force_single_pass || app.single_pass(),
            version: cfg.version,
            balance: Mutex::new(balance),
            started_at: Mutex::new(None),
            running: Mutex::new(false),
            stats: Mutex::new(Stats::default()),
        })
    }

    /// Starts the bot and runs passes until stopped.
    ///
    /// In single-pass mode the first pass error is returned; otherwise a
    /// failed pass is logged and retried after the pass interval.
    pub async fn start(&self) -> Result<(), BotError> {
        {
            let mut running = self.running.lock().await;
            if *running {
                return Err(BotError::AlreadyRunning);
            }
            *running = true;
        }

        {
            let mut started_at = self.started_at.lock().await;
            *started_at = Some(Instant::now());
        }

        info!(
            version = %self.version,
            market = %self.market.name(),
            balance = %self.balance().await,
            max_cycle_length = self.engine.max_cycle_length(),
            single_pass = self.single_pass,
            pass_interval = ?self.pass_interval,
            "Starting arbitrage bot"
        );

        self.run_main_loop().await
    }

    /// Gracefully stops the bot.
    pub async fn stop(&self) -> Result<(), BotError> {
        {
            let mut running = self.running.lock().await;
            if !*running {
                return Ok(());
            }
            *running = false;
        }

        let stats = self.stats().await;
        info!(
            uptime = ?self.uptime().await,
            passes = stats.passes,
            failed_passes = stats.failed_passes,
            cycles_evaluated = stats.cycles_evaluated,
            profitable_cycles = stats.profitable_cycles,
            balance = %self.balance().await,
            "Bot stopped"
        );

        Ok(())
    }

    /// Returns a copy of the current statistics.
    pub async fn stats(&self) -> Stats {
        self.stats.lock().await.clone()
    }

    /// Returns the current balance.
    pub async fn balance(&self) -> Balance {
        *self.balance.lock().await
    }

    /// Returns true if the bot is currently running.
    pub async fn is_running(&self) -> bool {
        *self.running.lock().await
    }

    /// Returns how long the bot has been running.
    pub async fn uptime(&self) -> Duration {
        self.started_at
            .lock()
            .await
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Main pass loop.
    async fn run_main_loop(&self) -> Result<(), BotError> {
        loop {
            if !self.is_running().await {
                break;
            }

            match self.run_pass().await {
                Ok(report) => println!("{}", report::render_pass(&report)),
                Err(e) if self.single_pass => return Err(e),
                Err(e) => {
                    self.stats.lock().await.failed_passes += 1;
                    warn!(error = %e, "Pass failed");
                }
            }

            if self.single_pass {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.pass_interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Runs one pass: fetch a graph, evaluate it, commit the resulting balance.
    ///
    /// The balance stays locked for the whole pass so passes never overlap.
    pub async fn run_pass(&self) -> Result<PassReport, BotError> {
        let mut balance = self.balance.lock().await;

        let graph = self.market.fetch_graph().await?;
        let report = self.engine.run_pass(&graph, *balance);
        *balance = report.balance;

        let mut stats = self.stats.lock().await;
        stats.record(&report);

        info!(
            pass = stats.passes,
            started_at = %report.started_at,
            status = ?report.status,
            starting_balance = %report.starting_balance,
            evaluated = report.records.len(),
            profitable = report.profitable.len(),
            balance = %report.balance,
            "Pass finished"
        );

        Ok(report)
    }
}
