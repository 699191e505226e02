//! Bot configuration.

use crate::config::Config;

/// Bot configuration options.
pub struct BotConfig {
    /// Application configuration.
    pub app_config: Config,
    /// Stop after the first pass regardless of the config file.
    pub force_single_pass: bool,
    /// Application version.
    pub version: String,
}
