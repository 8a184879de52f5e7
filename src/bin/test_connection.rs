//! Connectivity probe: verify the relational store is reachable with the
//! configured credentials, and nothing else.

use anyhow::Result;
use tempingest::{load, DbConfig};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    dotenv::dotenv().ok();
    let cfg = DbConfig::from_env()?;

    match load::connect(&cfg).await {
        Ok(_pool) => {
            info!(host = %cfg.host, db = %cfg.name, "connection established");
            Ok(())
        }
        Err(e) => {
            error!("connection failed: {:#}", e);
            Err(e.into())
        }
    }
}
