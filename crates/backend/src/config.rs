//! Environment-driven server configuration

use std::net::SocketAddr;

use thiserror::Error;

/// Listening port when `DATABASE_URL` is used (hosted deployments)
const HOSTED_API_PORT: u16 = 8080;
/// Listening port for local development with discrete DB_* variables
const LOCAL_API_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a port number, got '{value}'")]
    InvalidPort { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSettings {
    Url(String),
    Discrete {
        host: Option<String>,
        port: Option<u16>,
        user: Option<String>,
        password: Option<String>,
        dbname: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseSettings,
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let (database, default_port) = match var("DATABASE_URL") {
            Some(url) => (DatabaseSettings::Url(url), HOSTED_API_PORT),
            None => (
                DatabaseSettings::Discrete {
                    host: var("DB_HOST"),
                    port: parse_port("DB_PORT", var("DB_PORT"))?,
                    user: var("DB_USER"),
                    password: var("DB_PASSWORD"),
                    dbname: var("DB_NAME"),
                },
                LOCAL_API_PORT,
            ),
        };

        let api_port = parse_port("API_PORT", var("API_PORT"))?.unwrap_or(default_port);

        Ok(Self { database, api_port })
    }

    /// Pool configuration for deadpool-postgres
    pub fn pool_config(&self) -> deadpool_postgres::Config {
        let mut cfg = deadpool_postgres::Config::new();
        match &self.database {
            DatabaseSettings::Url(url) => {
                cfg.url = Some(url.clone());
            }
            DatabaseSettings::Discrete { host, port, user, password, dbname } => {
                cfg.host = host.clone();
                cfg.port = *port;
                cfg.user = user.clone();
                cfg.password = password.clone();
                cfg.dbname = dbname.clone();
            }
        }
        cfg
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.api_port))
    }
}

fn parse_port(var: &'static str, value: Option<String>) -> Result<Option<u16>, ConfigError> {
    value
        .map(|v| v.trim().parse().map_err(|_| ConfigError::InvalidPort { var, value: v }))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_url_mode_defaults_to_8080() {
        let cfg = load(&[("DATABASE_URL", "postgres://u:p@db/top20"), ("DB_HOST", "ignored")]).unwrap();
        assert_eq!(cfg.database, DatabaseSettings::Url("postgres://u:p@db/top20".into()));
        assert_eq!(cfg.api_port, 8080);
        assert_eq!(cfg.pool_config().url.as_deref(), Some("postgres://u:p@db/top20"));
    }

    #[test]
    fn test_discrete_mode_defaults_to_3000() {
        let cfg = load(&[
            ("DB_HOST", "localhost"),
            ("DB_PORT", "5433"),
            ("DB_USER", "top20"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "top20"),
        ]).unwrap();
        assert_eq!(cfg.api_port, 3000);

        let pool = cfg.pool_config();
        assert_eq!(pool.host.as_deref(), Some("localhost"));
        assert_eq!(pool.port, Some(5433));
        assert_eq!(pool.dbname.as_deref(), Some("top20"));
        assert!(pool.url.is_none());
    }

    #[test]
    fn test_api_port_override_and_empty_values() {
        let cfg = load(&[("DATABASE_URL", ""), ("API_PORT", "9000")]).unwrap();
        assert!(matches!(cfg.database, DatabaseSettings::Discrete { .. }));
        assert_eq!(cfg.bind_address().port(), 9000);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = load(&[("API_PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("API_PORT"));
        assert!(load(&[("DB_PORT", "99999")]).is_err());
    }
}
