//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `sms_receipts` table (one provider response per dispatch call, keyed by
///   the generated response code)
///
/// The recipient source tables (`customers`, `subscribers`, `staff`) belong to
/// other systems and are not created here.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS sms_receipts (
    id INTEGER PRIMARY KEY NOT NULL,
    response_code TEXT NOT NULL,
    response_body TEXT NOT NULL, -- provider response, JSON
    received_at TEXT NOT NULL, -- RFC3339
    UNIQUE(response_code)
);

CREATE INDEX IF NOT EXISTS idx_sms_receipts_received_at ON sms_receipts(received_at);
"#;
