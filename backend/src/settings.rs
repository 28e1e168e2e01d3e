//! Application settings loaded via OrthoConfig.
//!
//! Values come from command-line flags, `PERSON_API_*` environment variables
//! and an optional configuration file, in OrthoConfig's usual precedence.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("bind_host must be an IP address, got {value:?}")]
    InvalidBindHost { value: String },
}

/// Runtime settings for the person API server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PERSON_API")]
pub struct AppSettings {
    /// PostgreSQL connection URL. Without it, storage is process-local.
    pub database_url: Option<String>,
    /// Interface address to listen on.
    pub bind_host: Option<String>,
    /// TCP port to listen on.
    #[ortho_config(default = 8080)]
    pub bind_port: u16,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl AppSettings {
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn bind_host(&self) -> &str {
        self.bind_host.as_deref().unwrap_or(DEFAULT_BIND_HOST)
    }

    pub fn bind_port(&self) -> u16 {
        self.bind_port
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(PoolConfig::DEFAULT_MAX_SIZE)
    }

    /// Socket address assembled from `bind_host` and `bind_port`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindHost`] when the host is not an IP
    /// address literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.bind_host();
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidBindHost {
            value: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.bind_port()))
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url()
            .map(|url| PoolConfig::new(url).with_max_size(self.pool_max_size()))
    }
}
