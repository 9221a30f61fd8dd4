//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USER_SERVICE_*` environment variables, and
//! configuration files, in OrthoConfig's usual precedence.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use user_service::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the HTTP server and its database.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_SERVICE")]
pub struct ServerSettings {
    /// Interface to listen on.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Without it users are kept in memory.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept warm.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Skip embedded migrations at start-up.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl ServerSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve host and port to the first matching socket address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("{}:{} resolved to no address", self.host(), self.port()),
                )
            })
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let mut config = PoolConfig::new(url);
        if let Some(max_size) = self.pool_max_size {
            config = config.with_max_size(max_size);
        }
        if let Some(min_idle) = self.pool_min_idle {
            config = config.with_min_idle(Some(min_idle));
        }
        if let Some(secs) = self.pool_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        Some(config)
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 7] = [
        "USER_SERVICE_HOST",
        "USER_SERVICE_PORT",
        "USER_SERVICE_DATABASE_URL",
        "USER_SERVICE_POOL_MAX_SIZE",
        "USER_SERVICE_POOL_MIN_IDLE",
        "USER_SERVICE_POOL_TIMEOUT_SECS",
        "USER_SERVICE_SKIP_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("user-service")])
            .expect("config should load")
    }

    fn cleared_except(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_without_overrides() {
        let _guard = lock_env(cleared_except(&[]));

        let settings = load_from_empty_args();

        assert_eq!(settings.host(), "0.0.0.0");
        assert_eq!(settings.port(), 8080);
        assert!(!settings.skip_migrations);
        assert!(settings.pool_config().is_none());
        assert_eq!(
            settings.bind_addr().expect("resolves"),
            "0.0.0.0:8080".parse().expect("socket address")
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_except(&[
            ("USER_SERVICE_HOST", "127.0.0.1"),
            ("USER_SERVICE_PORT", "9090"),
            ("USER_SERVICE_DATABASE_URL", "postgres://localhost/users"),
            ("USER_SERVICE_POOL_MAX_SIZE", "4"),
            ("USER_SERVICE_POOL_TIMEOUT_SECS", "5"),
            ("USER_SERVICE_SKIP_MIGRATIONS", "true"),
        ]));

        let settings = load_from_empty_args();
        let pool = settings.pool_config().expect("database configured");

        assert_eq!(
            settings.bind_addr().expect("resolves"),
            "127.0.0.1:9090".parse().expect("socket address")
        );
        assert!(settings.skip_migrations);
        assert_eq!(pool.database_url(), "postgres://localhost/users");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.min_idle(), Some(PoolConfig::DEFAULT_MIN_IDLE));
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
    }
}
