use anyhow::Result;
use tempingest::{config, extract, load, parse, views, DbConfig};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) load config ──────────────────────────────────────────────
    dotenv::dotenv().ok();
    let cfg = DbConfig::from_env()?;
    let source = config::source_path();

    // ─── 3) parse source file ────────────────────────────────────────
    info!(source = %source.display(), "reading source");
    let raw = parse::parse(&source)?;
    info!(rows = raw.len(), "parsed");

    // ─── 4) derive model codes ───────────────────────────────────────
    let extraction = extract::extract(raw);
    info!(
        kept = extraction.records.len(),
        dropped = extraction.dropped,
        "extracted"
    );

    // ─── 5) connect + replace table ──────────────────────────────────
    let pool = load::connect(&cfg).await?;
    match load::load(&pool, &extraction.records).await {
        Ok(result) => {
            info!(rows = result.rows_written, "load succeeded");
        }
        Err(e) => {
            error!("load failed: {:#}", e);
            return Err(e.into());
        }
    }

    // ─── 6) refresh aggregation views ────────────────────────────────
    views::ensure_views(&pool).await?;
    info!("aggregation views up to date");

    info!("all done");
    Ok(())
}
