use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "EHR Clinical Decision Support API";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_DATABASE_PATH: &str = "EHR_CDS_DATABASE_PATH";
pub const ENV_BIND_ADDR: &str = "EHR_CDS_BIND_ADDR";
pub const ENV_CORS_ORIGINS: &str = "EHR_CDS_CORS_ORIGINS";
pub const ENV_LOG: &str = "EHR_CDS_LOG";

const DEFAULT_DATABASE_PATH: &str = "./ehr_cds.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Fallback tracing filter when neither `RUST_LOG` nor `EHR_CDS_LOG` is set.
pub fn default_log_filter() -> &'static str {
    "ehr_cds_lib=info,tower_http=info"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Immutable runtime configuration, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub app_name: String,
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,
    pub log_filter: String,
}

impl AppConfig {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to
    /// pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset and blank keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_path =
            PathBuf::from(get(ENV_DATABASE_PATH).unwrap_or_else(|| DEFAULT_DATABASE_PATH.into()));

        let bind_raw = get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            key: ENV_BIND_ADDR,
            reason: format!("{bind_raw}: {e}"),
        })?;

        let cors_raw = get(ENV_CORS_ORIGINS).unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into());
        let cors_origins = parse_origins(&cors_raw)?;

        let log_filter = get(ENV_LOG).unwrap_or_else(|| default_log_filter().into());

        Ok(Self {
            app_name: APP_NAME.into(),
            database_path,
            bind_addr,
            cors_origins,
            log_filter,
        })
    }
}

/// Comma-separated origins. Each must be `*` or an http(s) URL.
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|origin| {
            if origin == "*" || origin.starts_with("http://") || origin.starts_with("https://") {
                Ok(origin.trim_end_matches('/').to_string())
            } else {
                Err(ConfigError::Invalid {
                    key: ENV_CORS_ORIGINS,
                    reason: format!("origin must start with http:// or https://: {origin}"),
                })
            }
        })
        .collect()
}
