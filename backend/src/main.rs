//! Person API entry point: loads settings, prepares storage and serves HTTP.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use person_api::inbound::http::health::HealthState;
use person_api::outbound::persistence::{DbPool, MigrationError, PoolError, run_migrations};
use person_api::settings::{AppSettings, SettingsError};

use server::{ServerConfig, create_server};

/// Failures that abort startup.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("failed to load settings: {message}")]
    Settings { message: String },
    #[error(transparent)]
    BindAddr(#[from] SettingsError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

fn load_settings<I>(args: I) -> Result<AppSettings, StartupError>
where
    I: IntoIterator<Item = OsString>,
{
    AppSettings::load_from_iter(args).map_err(|err| StartupError::Settings {
        message: err.to_string(),
    })
}

async fn build_server_config(settings: &AppSettings) -> Result<ServerConfig, StartupError> {
    let config = ServerConfig::new(settings.bind_addr()?);
    let Some(pool_config) = settings.pool_config() else {
        return Ok(config);
    };

    let applied = run_migrations(pool_config.database_url()).await?;
    info!(applied, "database schema is up to date");
    let pool = DbPool::new(pool_config).await?;
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(std::env::args_os())?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested; draining");
            health_state.mark_draining();
            handle.stop(true).await;
        }
    });

    server.await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Startup settings coverage for the binary.

    use std::net::SocketAddr;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn zero_config_startup_uses_defaults_and_memory_storage() {
        let _guard = lock_env([
            ("PERSON_API_DATABASE_URL", None::<String>),
            ("PERSON_API_BIND_HOST", None),
            ("PERSON_API_BIND_PORT", None),
            ("PERSON_API_POOL_MAX_SIZE", None),
        ]);

        let settings =
            load_settings([OsString::from("person-api")]).expect("settings load without config");

        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert!(settings.pool_config().is_none());
    }
}
