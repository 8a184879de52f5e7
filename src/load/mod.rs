use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool, QueryBuilder,
};
use tracing::{debug, info};

use crate::{config::DbConfig, error::IngestError, extract::NormalizedRecord};

/// Destination table for normalized records.
pub const TABLE: &str = "temperatures";

/// Rows per INSERT statement; 4 binds per row keeps this comfortably under
/// the postgres parameter limit.
const INSERT_CHUNK: usize = 1000;

/// Outcome of a successful load.
#[derive(Debug)]
pub struct LoadResult {
    pub rows_written: u64,
}

/// Build a pool from explicit connect options and verify connectivity with a
/// probe query before anything is written. Fails fast with
/// `ConnectionFailed` if the store cannot be reached.
pub async fn connect(cfg: &DbConfig) -> Result<PgPool, IngestError> {
    let opts = PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .database(&cfg.name)
        .username(&cfg.user)
        .password(&cfg.password);

    // Single-shot batch job, one connection is enough.
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .map_err(IngestError::ConnectionFailed)?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(IngestError::ConnectionFailed)?;

    debug!(host = %cfg.host, port = cfg.port, db = %cfg.name, "store reachable");
    Ok(pool)
}

/// Full replace of the destination table with exactly the given records.
///
/// The whole load runs in one transaction: create-once schema, truncate,
/// chunked inserts, commit. Readers see either the old row set or the new
/// one, never an empty window or a partial write; on any rejection the
/// transaction rolls back and the table keeps its pre-run state. Loading the
/// same record set twice leaves the same row set as loading it once.
pub async fn load(pool: &PgPool, records: &[NormalizedRecord]) -> Result<LoadResult, IngestError> {
    let mut tx = pool.begin().await.map_err(IngestError::ConnectionFailed)?;

    // Fixed schema, created once; manually added indexes and the dependent
    // views survive reloads because the table itself is never dropped.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS temperatures (
            model       TEXT             NOT NULL,
            "timestamp" TEXT             NOT NULL,
            temperature DOUBLE PRECISION NOT NULL,
            direction   TEXT             NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await
    .map_err(IngestError::WriteFailed)?;

    sqlx::query(r#"TRUNCATE temperatures;"#)
        .execute(&mut *tx)
        .await
        .map_err(IngestError::WriteFailed)?;

    for chunk in records.chunks(INSERT_CHUNK) {
        let mut qb = QueryBuilder::new(
            r#"INSERT INTO temperatures (model, "timestamp", temperature, direction) "#,
        );
        qb.push_values(chunk, |mut b, r| {
            b.push_bind(&r.model)
                .push_bind(&r.timestamp)
                .push_bind(r.temperature)
                .push_bind(&r.direction);
        });
        qb.build()
            .execute(&mut *tx)
            .await
            .map_err(IngestError::WriteFailed)?;
    }

    tx.commit().await.map_err(IngestError::WriteFailed)?;

    info!(rows = records.len(), table = TABLE, "load committed");
    Ok(LoadResult {
        rows_written: records.len() as u64,
    })
}
