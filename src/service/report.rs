//! Receipt summaries: stored provider responses parsed back into per-recipient
//! status and cost detail.

use crate::db::models::DbSmsReceipt;
use crate::db::store;
use crate::error::SambazaError;
use crate::gateway::{SmsResponse, cost_value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Per-recipient slice of a stored receipt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipientDetail {
    pub number: String,
    pub status: String,
    #[serde(rename = "statusCode")]
    pub status_code: i64,
    /// Numeric cost formatted to two decimals, currency prefix dropped.
    pub cost: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmsReport {
    pub response_code: String,
    pub response_received_at: DateTime<Utc>,
    pub message: String,
    /// Sum of per-recipient costs, formatted to two decimals.
    pub total_cost: String,
    pub recipients: Vec<RecipientDetail>,
}

/// Summarizes all stored receipts, newest first.
///
/// A receipt whose body fails to parse is logged and skipped rather than
/// failing the whole report.
pub async fn sms_reports(pool: &SqlitePool) -> Result<Vec<SmsReport>, SambazaError> {
    let rows = store::list_receipts(pool).await?;
    if rows.is_empty() {
        info!("no SMS reports found");
        return Ok(Vec::new());
    }

    Ok(rows
        .iter()
        .filter_map(|row| match summarize(row) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(code = %row.response_code, error = %e, "skipping unparsable receipt");
                None
            }
        })
        .collect())
}

fn summarize(row: &DbSmsReceipt) -> Result<SmsReport, serde_json::Error> {
    let response: SmsResponse = serde_json::from_str(&row.response_body)?;

    let mut total_cost = 0.0;
    let recipients: Vec<RecipientDetail> = response
        .message_data
        .recipients
        .iter()
        .map(|recipient| {
            let cost = cost_value(&recipient.cost);
            total_cost += cost;
            RecipientDetail {
                number: recipient.number.clone(),
                status: recipient.status.clone(),
                status_code: recipient.status_code,
                cost: format!("{cost:.2}"),
            }
        })
        .collect();

    Ok(SmsReport {
        response_code: row.response_code.clone(),
        response_received_at: row.received_at,
        message: response.message_data.message,
        total_cost: format!("{total_cost:.2}"),
        recipients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn receipt(body: serde_json::Value) -> DbSmsReceipt {
        DbSmsReceipt {
            id: 1,
            response_code: "SMS-20250101120000".to_string(),
            response_body: body.to_string(),
            received_at: Utc::now(),
        }
    }

    #[test]
    fn total_cost_sums_recipient_costs() {
        let row = receipt(json!({
            "SMSMessageData": {
                "Message": "Sent to 2/2",
                "Recipients": [
                    {"number": "+254712345678", "status": "Success", "statusCode": 101, "cost": "1.00"},
                    {"number": "+254733000000", "status": "Success", "statusCode": 101, "cost": "2.50"}
                ]
            }
        }));

        let report = summarize(&row).expect("receipt summarizes");
        assert_eq!(report.total_cost, "3.50");
        assert_eq!(report.recipients.len(), 2);
        assert_eq!(report.recipients[0].cost, "1.00");
        assert_eq!(report.recipients[1].cost, "2.50");
    }

    #[test]
    fn currency_prefixed_costs_are_summed_numerically() {
        let row = receipt(json!({
            "SMSMessageData": {
                "Message": "Sent to 1/1 Total Cost: KES 0.8000",
                "Recipients": [
                    {"number": "+254712345678", "status": "Success", "statusCode": 101, "cost": "KES 0.8000"}
                ]
            }
        }));

        let report = summarize(&row).expect("receipt summarizes");
        assert_eq!(report.total_cost, "0.80");
        assert_eq!(report.message, "Sent to 1/1 Total Cost: KES 0.8000");
    }

    #[test]
    fn missing_recipient_fields_default_instead_of_failing() {
        let row = receipt(json!({
            "SMSMessageData": {
                "Recipients": [{"number": "+254712345678"}]
            }
        }));

        let report = summarize(&row).expect("receipt summarizes");
        assert_eq!(report.total_cost, "0.00");
        assert_eq!(report.recipients[0].status, "");
        assert_eq!(report.recipients[0].status_code, 0);
    }

    #[test]
    fn unparsable_body_is_an_error() {
        let row = DbSmsReceipt {
            id: 1,
            response_code: "SMS-20250101120000".to_string(),
            response_body: "{'SMSMessageData': not json}".to_string(),
            received_at: Utc::now(),
        };
        assert!(summarize(&row).is_err());
    }
}
