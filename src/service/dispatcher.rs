//! The send path: fetch recipients, chunk them, one provider call per chunk.
//!
//! Batches are strictly sequential, at-least-once best-effort: a failed batch
//! is logged and the loop moves on. The provider response for the call is
//! stored as a JSON receipt under one generated code.

use crate::db::source::SourceTable;
use crate::db::store;
use crate::gateway::SmsGateway;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{error, info, warn};

/// Recipients per provider call.
pub const BATCH_SIZE: usize = 100;

/// Outcome of one dispatch call, for logging and tests. The HTTP contract does
/// not surface it: the endpoint answers success regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchSummary {
    pub recipients: usize,
    pub batches_sent: usize,
    pub batches_failed: usize,
}

/// Sends `message` to every valid number in `source`.
///
/// The receipt code is derived from the wall clock with second precision, so
/// calls landing in the same second share a code and the later receipt wins.
pub async fn dispatch_sms(
    pool: &SqlitePool,
    gateway: &dyn SmsGateway,
    message: &str,
    source: SourceTable,
) -> DispatchSummary {
    let phone_numbers = store::fetch_phone_numbers(pool, source).await;
    if phone_numbers.is_empty() {
        warn!(source = %source, "no valid phone numbers found");
        return DispatchSummary::default();
    }

    let mut summary = DispatchSummary {
        recipients: phone_numbers.len(),
        ..DispatchSummary::default()
    };

    let received_at = Utc::now();
    let response_code = format!("SMS-{}", received_at.format("%Y%m%d%H%M%S"));

    for batch in phone_numbers.chunks(BATCH_SIZE) {
        match gateway.send(message, batch).await {
            Ok(response) => {
                summary.batches_sent += 1;
                info!(code = %response_code, size = batch.len(), "SMS batch sent");

                match serde_json::to_string(&response) {
                    Ok(body) => {
                        if let Err(e) =
                            store::upsert_receipt(pool, &response_code, &body, received_at).await
                        {
                            error!(code = %response_code, error = %e, "error storing delivery receipt");
                        }
                    }
                    Err(e) => {
                        error!(code = %response_code, error = %e, "error serializing provider response");
                    }
                }
            }
            Err(e) => {
                summary.batches_failed += 1;
                error!(size = batch.len(), error = %e, "error sending SMS batch");
            }
        }
    }

    summary
}
