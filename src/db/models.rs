use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One stored delivery receipt: the provider's JSON response for a dispatch
/// call, keyed by the call's generated response code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbSmsReceipt {
    pub id: i64,
    pub response_code: String,
    pub response_body: String,
    pub received_at: DateTime<Utc>,
}
