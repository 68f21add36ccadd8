//! Process configuration from environment variables.

use std::net::SocketAddr;

use anyhow::{Context, bail};

pub const BIND_ADDR_ENV: &str = "SLOTCRAFT_BIND_ADDR";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const MAX_CONNECTIONS_ENV: &str = "DATABASE_MAX_CONNECTIONS";
pub const MIGRATE_ENV: &str = "SLOTCRAFT_MIGRATE";
pub const SEED_ENV: &str = "SLOTCRAFT_SEED";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Postgres when set, seeded in-memory store otherwise.
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Apply the bundled schema on startup.
    pub migrate: bool,
    /// Write the starter data into an empty database on startup.
    pub seed: bool,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get(BIND_ADDR_ENV)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .with_context(|| format!("{BIND_ADDR_ENV} must be a socket address"))?;

        let max_connections = match get(MAX_CONNECTIONS_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{MAX_CONNECTIONS_ENV} must be a positive integer"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            bail!("{MAX_CONNECTIONS_ENV} must be a positive integer");
        }

        Ok(Self {
            bind_addr,
            database_url: get(DATABASE_URL_ENV),
            max_connections,
            migrate: parse_flag(MIGRATE_ENV, get(MIGRATE_ENV), true)?,
            seed: parse_flag(SEED_ENV, get(SEED_ENV), false)?,
        })
    }
}

fn parse_flag(key: &str, raw: Option<String>, default: bool) -> anyhow::Result<bool> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{key} must be true or false, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.max_connections, 5);
        assert!(cfg.migrate);
        assert!(!cfg.seed);
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            (BIND_ADDR_ENV, "127.0.0.1:9000"),
            (DATABASE_URL_ENV, "postgres://localhost/slotcraft"),
            (MAX_CONNECTIONS_ENV, "12"),
            (MIGRATE_ENV, "off"),
            (SEED_ENV, "TRUE"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/slotcraft"));
        assert_eq!(cfg.max_connections, 12);
        assert!(!cfg.migrate);
        assert!(cfg.seed);
    }

    #[test]
    fn empty_database_url_means_in_memory() {
        let cfg = config(&[(DATABASE_URL_ENV, "  ")]).unwrap();
        assert_eq!(cfg.database_url, None);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config(&[(MAX_CONNECTIONS_ENV, "0")]).unwrap_err();
        assert!(err.to_string().contains(MAX_CONNECTIONS_ENV));

        let err = config(&[(MIGRATE_ENV, "maybe")]).unwrap_err();
        assert!(err.to_string().contains(MIGRATE_ENV));

        let err = config(&[(BIND_ADDR_ENV, "nowhere")]).unwrap_err();
        assert!(err.to_string().contains(BIND_ADDR_ENV));
    }
}
