//! Client configuration module

use clap::Args;

use crate::config::{api::ApiConfig, observability::LoggingConfig};

pub mod api;
pub mod observability;

/// Settings shared by every subcommand.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// REST API and session settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
