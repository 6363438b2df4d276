use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::config::ConfigError;

/// Connection string that selects the in-memory store instead of MongoDB.
pub const MEMORY_DATABASE_URL: &str = "memory://";

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Overrides the database named in `database_url`.
    pub database_name: Option<String>,

    pub host: IpAddr,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Empty
    /// values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Ok(Self {
            database_url: var("DATABASE_URL")
                .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            database_name: var("DATABASE_NAME"),
            host: match var("HOST") {
                Some(value) => parse_var("HOST", value)?,
                None => DEFAULT_HOST,
            },
            port: match var("PORT") {
                Some(value) => parse_var("PORT", value)?,
                None => DEFAULT_PORT,
            },
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

fn parse_var<T>(name: &str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|err: T::Err| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: err.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |name| vars.get(name).cloned()
    }

    #[test]
    fn requires_database_url() {
        let err = Config::from_lookup(lookup(&[("PORT", "8080")])).unwrap_err();

        assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "DATABASE_URL"));
    }

    #[test]
    fn blank_database_url_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap_err();

        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[(
            "DATABASE_URL",
            "mongodb://localhost:27017/university",
        )]))
        .unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.addr(), "0.0.0.0:5000".parse().unwrap());
        assert_eq!(config.database_name, None);
        assert!(!config.uses_memory_store());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "memory://"),
            ("DATABASE_NAME", "campus"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.database_name.as_deref(), Some("campus"));
        assert!(config.uses_memory_store());
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "memory://"),
            ("PORT", "fifty"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEnvVar { name, .. } if name == "PORT"));
    }
}
