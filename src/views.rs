//! Aggregation views over the `temperatures` table.
//!
//! The views themselves are owned and computed by postgres; this module owns
//! only their DDL text and the typed read contract the dashboard consumes.
//! Each view is queryable as `SELECT * FROM <view>` and keyed by model.

use sqlx::{FromRow, PgPool, Result};

pub const LISTING_VIEW: &str = "vw_temperatures_by_model";
pub const AVG_VIEW: &str = "vw_avg_temperature_by_model";
pub const MIN_VIEW: &str = "vw_min_temperature_by_model";
pub const MAX_VIEW: &str = "vw_max_temperature_by_model";

/// One persisted reading, as listed by `vw_temperatures_by_model`.
#[derive(Debug, FromRow)]
pub struct TemperatureRow {
    pub model: String,
    pub timestamp: String,
    pub temperature: f64,
    pub direction: String,
}

/// One per-model statistic row, the shape of the avg/min/max views.
#[derive(Debug, FromRow)]
pub struct ModelStat {
    pub model: String,
    pub temperature: f64,
}

/// Create or update the four aggregation views (idempotent). Safe to call
/// after every load; no-op in effect if the definitions are unchanged.
pub async fn ensure_views(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE OR REPLACE VIEW vw_temperatures_by_model AS
            SELECT model, "timestamp", temperature, direction
            FROM temperatures
            ORDER BY model;
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE OR REPLACE VIEW vw_avg_temperature_by_model AS
            SELECT model, AVG(temperature) AS temperature
            FROM temperatures
            GROUP BY model
            ORDER BY model;
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE OR REPLACE VIEW vw_min_temperature_by_model AS
            SELECT model, MIN(temperature) AS temperature
            FROM temperatures
            GROUP BY model
            ORDER BY model;
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE OR REPLACE VIEW vw_max_temperature_by_model AS
            SELECT model, MAX(temperature) AS temperature
            FROM temperatures
            GROUP BY model
            ORDER BY model;
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

pub async fn fetch_listing(pool: &PgPool) -> Result<Vec<TemperatureRow>> {
    sqlx::query_as(&format!("SELECT * FROM {};", LISTING_VIEW))
        .fetch_all(pool)
        .await
}

pub async fn fetch_avg(pool: &PgPool) -> Result<Vec<ModelStat>> {
    sqlx::query_as(&format!("SELECT * FROM {};", AVG_VIEW))
        .fetch_all(pool)
        .await
}

pub async fn fetch_min(pool: &PgPool) -> Result<Vec<ModelStat>> {
    sqlx::query_as(&format!("SELECT * FROM {};", MIN_VIEW))
        .fetch_all(pool)
        .await
}

pub async fn fetch_max(pool: &PgPool) -> Result<Vec<ModelStat>> {
    sqlx::query_as(&format!("SELECT * FROM {};", MAX_VIEW))
        .fetch_all(pool)
        .await
}
