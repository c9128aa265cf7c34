//! Server configuration management.
//!
//! Consolidates environment variable reads for the bracket service and
//! validates the result before anything binds a socket.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Fallback bind address when neither the CLI nor `EB_BIND` provide one
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Prometheus exporter bind address; metrics are disabled when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Roster file seeding tournaments, teams, and players at startup
    pub roster_path: Option<PathBuf>,
    /// Fixed shuffle seed for reproducible draws (rehearsal runs)
    pub shuffle_seed: Option<u64>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `roster_override` - Optional roster path override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set but fails to parse. A typo'd
    /// `EB_METRICS_BIND` must not silently run the festival without metrics.
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        roster_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_env_opt("EB_BIND")?.unwrap_or_else(|| {
                DEFAULT_BIND
                    .parse()
                    .expect("default bind address is valid")
            }),
        };

        let roster_path =
            roster_override.or_else(|| std::env::var("EB_ROSTER").ok().map(PathBuf::from));

        Ok(ServerConfig {
            bind,
            metrics_bind: parse_env_opt("EB_METRICS_BIND")?,
            roster_path,
            shuffle_seed: parse_env_opt("EB_SHUFFLE_SEED")?,
        })
    }

    /// Validate configuration after loading
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(metrics_bind) = self.metrics_bind {
            if metrics_bind == self.bind {
                return Err(ConfigError::Invalid {
                    var: "EB_METRICS_BIND".to_string(),
                    reason: format!("must differ from the server bind address ({})", self.bind),
                });
            }
        }

        if let Some(path) = &self.roster_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid {
                    var: "EB_ROSTER".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an optional environment variable, erroring when it is set but
/// unparseable rather than silently dropping the feature it gates
fn parse_env_opt<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(value) => value.parse().map(Some).map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("could not parse {value:?}"),
        }),
        Err(_) => Ok(None),
    }
}
