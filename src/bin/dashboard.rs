//! Read-only terminal dashboard: one query per aggregation view, rendered
//! tabularly. No write path. A failing view is reported and the remaining
//! views are still rendered.

use anyhow::Result;
use sqlx::PgPool;
use tempingest::{
    load,
    views::{self, ModelStat},
    DbConfig,
};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    dotenv::dotenv().ok();
    let cfg = DbConfig::from_env()?;
    let pool = load::connect(&cfg).await?;

    render_listing(&pool).await;
    render_stats(
        "Average temperature by model",
        views::AVG_VIEW,
        views::fetch_avg(&pool).await,
    );
    render_stats(
        "Minimum temperature by model",
        views::MIN_VIEW,
        views::fetch_min(&pool).await,
    );
    render_stats(
        "Maximum temperature by model",
        views::MAX_VIEW,
        views::fetch_max(&pool).await,
    );

    Ok(())
}

async fn render_listing(pool: &PgPool) {
    println!("\n== Temperatures by model ==");
    match views::fetch_listing(pool).await {
        Ok(rows) => {
            println!(
                "{:<10} {:<20} {:>12} {:<6}",
                "model", "timestamp", "temperature", "dir"
            );
            for r in rows {
                println!(
                    "{:<10} {:<20} {:>12.2} {:<6}",
                    r.model, r.timestamp, r.temperature, r.direction
                );
            }
        }
        Err(e) => {
            println!("(view unavailable: {})", e);
            error!(view = views::LISTING_VIEW, "query failed: {}", e);
        }
    }
}

fn render_stats(title: &str, view: &str, result: sqlx::Result<Vec<ModelStat>>) {
    println!("\n== {} ==", title);
    match result {
        Ok(rows) => {
            println!("{:<10} {:>12}", "model", "temperature");
            for r in rows {
                println!("{:<10} {:>12.2}", r.model, r.temperature);
            }
        }
        Err(e) => {
            println!("(view unavailable: {})", e);
            error!(view, "query failed: {}", e);
        }
    }
}
