use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Connection parameters for the relational store, supplied out of band via
/// environment variables (a `.env` file is honored by the binaries).
/// Constructed once per run and passed down explicitly.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    /// Read `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASS` from the
    /// environment. All five are required.
    pub fn from_env() -> Result<Self> {
        let var = |key: &str| env::var(key).with_context(|| format!("missing env var {}", key));

        let port: u16 = var("DB_PORT")?
            .parse()
            .context("DB_PORT is not a valid port number")?;

        Ok(DbConfig {
            host: var("DB_HOST")?,
            port,
            name: var("DB_NAME")?,
            user: var("DB_USER")?,
            password: var("DB_PASS")?,
        })
    }
}

/// Path to the source CSV, overridable via `SOURCE_PATH`.
pub fn source_path() -> PathBuf {
    env::var("SOURCE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data/IOT-temp.csv"))
}
