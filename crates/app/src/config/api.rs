//! API Config

use clap::Args;

use crate::remote::{ApiBase, DEFAULT_API_URL};

/// Where the REST API lives and which session to present.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// REST API base URL
    #[arg(long, env = "STOCKROOM_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: ApiBase,

    /// Session token printed by a previous login
    #[arg(
        long,
        env = "STOCKROOM_SESSION_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub session_token: Option<String>,
}
