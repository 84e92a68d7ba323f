use crate::db::models::DbSmsReceipt;
use crate::db::schema::SQLITE_INIT;
use crate::db::source::SourceTable;
use crate::error::SambazaError;
use crate::phone;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{error, info};

/// Opens the pool and applies the schema.
pub async fn connect(database_url: &str) -> Result<SqlitePool, SambazaError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5))
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;

    apply_schema(&pool).await?;
    info!("database initialized");
    Ok(pool)
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), SambazaError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

/// All valid, canonically formatted numbers from the source table.
///
/// A query failure is logged and yields an empty list; dispatch then takes the
/// no-recipients path instead of surfacing an error.
pub async fn fetch_phone_numbers(pool: &SqlitePool, source: SourceTable) -> Vec<String> {
    let query = format!("SELECT phone_number FROM {}", source.table_name());
    match sqlx::query_scalar::<_, String>(&query).fetch_all(pool).await {
        Ok(rows) => rows.iter().filter_map(|raw| phone::normalize(raw)).collect(),
        Err(e) => {
            error!(source = %source, error = %e, "error fetching phone numbers");
            Vec::new()
        }
    }
}

/// Stores a delivery receipt, replacing any earlier receipt with the same code.
pub async fn upsert_receipt(
    pool: &SqlitePool,
    response_code: &str,
    response_body: &str,
    received_at: DateTime<Utc>,
) -> Result<(), SambazaError> {
    sqlx::query(
        r#"
        INSERT INTO sms_receipts (response_code, response_body, received_at)
        VALUES (?, ?, ?)
        ON CONFLICT(response_code) DO UPDATE SET
            response_body=excluded.response_body,
            received_at=excluded.received_at
        "#,
    )
    .bind(response_code)
    .bind(response_body)
    .bind(received_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// All stored receipts, newest first.
pub async fn list_receipts(pool: &SqlitePool) -> Result<Vec<DbSmsReceipt>, SambazaError> {
    let rows = sqlx::query_as::<_, DbSmsReceipt>(
        r#"
        SELECT id, response_code, response_body, received_at
        FROM sms_receipts
        ORDER BY received_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
