//! Client configuration

use std::path::PathBuf;

use clap::Args;

/// Storefront client configuration, composed from flags and environment.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// REST backend settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Session persistence settings.
    #[command(flatten)]
    pub session: SessionConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// REST backend settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Storefront API base URL
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://localhost:4000")]
    pub base_url: String,
}

/// Session persistence settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Path of the persisted session file
    #[arg(
        long,
        env = "STOREFRONT_SESSION_FILE",
        default_value = ".storefront-session.json"
    )]
    pub session_file: PathBuf,
}

/// Logging output settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level filter used when RUST_LOG is unset
    #[arg(long, env = "STOREFRONT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "STOREFRONT_LOG_FORMAT", value_enum, default_value = "compact")]
    pub log_format: LogFormat,
}

/// Supported log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Single-line human-readable output.
    Compact,
    /// Structured JSON lines.
    Json,
}
