//! Runtime settings, read from the environment (and `.env` if present).

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::constants::*;

/// Settings common to both applications.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub addr: SocketAddr,
    /// sea-orm connection string
    pub database_url: String,
    /// Fill empty tables from the bundled fixtures on startup
    pub seed: bool,
}

/// Settings for the iris app, which additionally needs its model artifact.
#[derive(Debug, Clone)]
pub struct IrisSettings {
    pub common: Settings,
    pub model_path: PathBuf,
}

impl Settings {
    /// Read `<PREFIX>_ADDR`, `<PREFIX>_DATABASE_URL` and `<PREFIX>_SEED`.
    fn from_env(prefix: &str, default_addr: &str, default_database_url: &str) -> Result<Self> {
        let addr = var_or(prefix, "ADDR", default_addr);
        let addr = addr
            .parse()
            .with_context(|| format!("{}_ADDR is not a valid socket address: {}", prefix, addr))?;
        let database_url = var_or(prefix, "DATABASE_URL", default_database_url);
        let seed = parse_bool(&var_or(prefix, "SEED", "true"))
            .with_context(|| format!("{}_SEED must be true or false", prefix))?;

        Ok(Settings {
            addr,
            database_url,
            seed,
        })
    }

    pub fn paralympics_from_env() -> Result<Self> {
        Self::from_env(
            PARALYMPICS_ENV_PREFIX,
            PARALYMPICS_DEFAULT_ADDR,
            PARALYMPICS_DEFAULT_DATABASE_URL,
        )
    }
}

impl IrisSettings {
    pub fn from_env() -> Result<Self> {
        let common = Settings::from_env(IRIS_ENV_PREFIX, IRIS_DEFAULT_ADDR, IRIS_DEFAULT_DATABASE_URL)?;
        let model_path = var_or(IRIS_ENV_PREFIX, "MODEL_PATH", IRIS_DEFAULT_MODEL_PATH).into();
        Ok(IrisSettings { common, model_path })
    }
}

fn var_or(prefix: &str, key: &str, default: &str) -> String {
    std::env::var(format!("{}_{}", prefix, key)).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised boolean: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_boolean_spellings() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool(" YES ").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn defaults_apply_when_unset() {
        let settings = Settings::from_env(
            "IRIS_PARALYMPICS_TEST_UNSET",
            "127.0.0.1:8080",
            "sqlite::memory:",
        )
        .unwrap();
        assert_eq!(settings.addr.port(), 8080);
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert!(settings.seed);
    }

    #[test]
    fn bad_address_is_rejected() {
        assert!(Settings::from_env("IRIS_PARALYMPICS_TEST_UNSET", "not an addr", "x").is_err());
    }
}
