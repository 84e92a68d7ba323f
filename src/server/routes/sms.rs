use crate::db::SourceTable;
use crate::error::SambazaError;
use crate::server::router::AppState;
use crate::service::{dispatcher, report};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Request body for `POST /send/sms`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendSmsRequest {
    /// The SMS message text.
    pub sms_text: String,
    /// Logical source of recipient numbers; must name an allow-listed source.
    pub source: SourceTable,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendSmsResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Dispatches a promotional message to every valid number in the source table.
///
/// Answers success whenever the body deserializes, including the no-recipients
/// and failed-batch cases; those are logged, not surfaced.
pub async fn send_sms(
    State(state): State<AppState>,
    Json(body): Json<SendSmsRequest>,
) -> Json<SendSmsResponse> {
    let summary =
        dispatcher::dispatch_sms(&state.pool, state.gateway.as_ref(), &body.sms_text, body.source)
            .await;

    info!(
        source = %body.source,
        recipients = summary.recipients,
        sent = summary.batches_sent,
        failed = summary.batches_failed,
        "SMS dispatch completed"
    );

    Json(SendSmsResponse {
        status: "success",
        message: "SMS sent successfully",
    })
}

/// Lists stored delivery receipts, newest first, with per-recipient detail.
pub async fn sms_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<report::SmsReport>>, SambazaError> {
    Ok(Json(report::sms_reports(&state.pool).await?))
}
