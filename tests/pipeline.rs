//! End-to-end tests against a live postgres.
//!
//! These are `#[ignore]`d so the default test run needs no database. To run
//! them, point DB_HOST/DB_PORT/DB_NAME/DB_USER/DB_PASS at a scratch database
//! and use `cargo test -- --ignored --test-threads=1` (they share the
//! `temperatures` table).

use sqlx::PgPool;
use std::io::Write;
use tempingest::{extract, extract::NormalizedRecord, load, parse, views, DbConfig, IngestError};

async fn pool() -> PgPool {
    dotenv::dotenv().ok();
    let cfg = DbConfig::from_env().expect("DB_* env vars must point at a scratch database");
    load::connect(&cfg).await.expect("store unreachable")
}

fn rec(model: &str, timestamp: &str, temperature: f64, direction: &str) -> NormalizedRecord {
    NormalizedRecord {
        model: model.to_string(),
        timestamp: timestamp.to_string(),
        temperature,
        direction: direction.to_string(),
    }
}

async fn row_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM temperatures")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
#[ignore]
async fn full_pipeline_round_trip() {
    let pool = pool().await;

    // Source with two valid rows for one model and one foreign row.
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(
        f,
        "id,room_id/id,noted_date,temp,out/in\n\
         log_100001,Room Admin,08-12-2018 09:30,21.5,In\n\
         log_100001,Room Admin,08-12-2018 09:29,23.0,In\n\
         bad_id,Room Admin,08-12-2018 09:28,99.0,Out\n"
    )
    .unwrap();
    f.flush().unwrap();

    let raw = parse::parse(f.path()).unwrap();
    let extraction = extract::extract(raw);
    assert_eq!(extraction.records.len(), 2);
    assert_eq!(extraction.dropped, 1);

    let result = load::load(&pool, &extraction.records).await.unwrap();
    assert_eq!(result.rows_written, 2);
    views::ensure_views(&pool).await.unwrap();

    let listing = views::fetch_listing(&pool).await.unwrap();
    assert_eq!(listing.len(), 2);
    assert!(listing.iter().all(|r| r.model == "100001"));

    // View aggregates must match direct computation over the record set.
    let avg = views::fetch_avg(&pool).await.unwrap();
    assert_eq!(avg.len(), 1);
    assert_eq!(avg[0].model, "100001");
    assert!((avg[0].temperature - 22.25).abs() < 1e-9);

    let min = views::fetch_min(&pool).await.unwrap();
    assert_eq!(min[0].temperature, 21.5);

    let max = views::fetch_max(&pool).await.unwrap();
    assert_eq!(max[0].temperature, 23.0);
}

#[tokio::test]
#[ignore]
async fn load_is_idempotent() {
    let pool = pool().await;
    let records = vec![
        rec("100001", "08-12-2018 09:30", 21.5, "In"),
        rec("200002", "08-12-2018 09:31", 30.0, "Out"),
    ];

    load::load(&pool, &records).await.unwrap();
    let after_first = row_count(&pool).await;

    load::load(&pool, &records).await.unwrap();
    let after_second = row_count(&pool).await;

    assert_eq!(after_first, 2);
    assert_eq!(after_second, after_first);
}

#[tokio::test]
#[ignore]
async fn empty_load_yields_empty_table() {
    let pool = pool().await;

    // Seed something first so the truncate is observable.
    load::load(&pool, &[rec("100001", "t", 1.0, "In")])
        .await
        .unwrap();

    let result = load::load(&pool, &[]).await.unwrap();
    assert_eq!(result.rows_written, 0);
    assert_eq!(row_count(&pool).await, 0);
}

#[tokio::test]
#[ignore]
async fn rejected_write_keeps_pre_run_rows() {
    let pool = pool().await;

    // Seed a row, then add a constraint the next load will violate. The
    // create-once schema keeps manually added constraints across runs.
    load::load(&pool, &[rec("100001", "t1", 21.5, "In")])
        .await
        .unwrap();
    sqlx::query(
        "ALTER TABLE temperatures ADD CONSTRAINT plausible_temperature \
         CHECK (temperature > -100.0)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = load::load(&pool, &[rec("100001", "t2", -273.15, "In")]).await;

    // Clean up before asserting so a failure doesn't poison later runs.
    sqlx::query("ALTER TABLE temperatures DROP CONSTRAINT plausible_temperature")
        .execute(&pool)
        .await
        .unwrap();

    assert!(matches!(result, Err(IngestError::WriteFailed(_))));

    // The rolled-back load must leave the seeded row set untouched.
    assert_eq!(row_count(&pool).await, 1);
    let temperature: f64 = sqlx::query_scalar("SELECT temperature FROM temperatures")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(temperature, 21.5);
}

#[tokio::test]
#[ignore]
async fn reload_replaces_previous_rows() {
    let pool = pool().await;

    load::load(&pool, &[rec("111111", "t1", 1.0, "In")])
        .await
        .unwrap();
    load::load(&pool, &[rec("222222", "t2", 2.0, "Out")])
        .await
        .unwrap();

    views::ensure_views(&pool).await.unwrap();
    let listing = views::fetch_listing(&pool).await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].model, "222222");
}
