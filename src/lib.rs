pub mod api;
pub mod clinical;
pub mod config;
pub mod db;
pub mod models;
pub mod patients;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::api::{start_api_server, ApiContext, ServerError};
use crate::config::{AppConfig, ConfigError};
use crate::db::DatabaseError;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// The `.env` load error worth reporting: anything except a missing file.
fn dotenv_problem<T>(result: Result<T, dotenvy::Error>) -> Option<dotenvy::Error> {
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

/// Load configuration, prepare the database and serve until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    // A missing .env file is fine; a malformed one is reported once tracing is up
    let dotenv_error = dotenv_problem(dotenvy::dotenv());
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!("{} starting v{}", config.app_name, config::APP_VERSION);
    if let Some(e) = dotenv_error {
        tracing::warn!("Ignoring malformed .env file: {e}");
    }

    // Create and migrate the schema before accepting requests
    {
        let conn = db::open_database(&config.database_path)?;
        let tables = db::count_tables(&conn)?;
        tracing::info!(path = %config.database_path.display(), tables, "Database ready");
    }

    let bind_addr = config.bind_addr;
    let ctx = ApiContext::new(config);
    let mut server = start_api_server(ctx, bind_addr).await?;
    tracing::info!(
        session_id = %server.session.session_id,
        addr = %server.session.server_addr,
        started_at = %server.session.started_at,
        "Listening"
    );

    tokio::signal::ctrl_c().await.map_err(StartupError::Signal)?;
    tracing::info!("Ctrl-C received, shutting down");

    server.shutdown();
    server.stopped().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn missing_dotenv_is_not_reported() {
        let missing = dotenvy::Error::Io(io::Error::from(io::ErrorKind::NotFound));
        assert!(dotenv_problem::<()>(Err(missing)).is_none());
        assert!(dotenv_problem(Ok(())).is_none());
    }

    #[test]
    fn malformed_dotenv_is_reported() {
        let malformed = dotenvy::Error::LineParse("EHR_CDS_LOG debug".into(), 11);
        let reported = dotenv_problem::<()>(Err(malformed)).unwrap();
        assert!(matches!(reported, dotenvy::Error::LineParse(..)));

        let unreadable = dotenvy::Error::Io(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(dotenv_problem::<()>(Err(unreadable)).is_some());
    }
}
