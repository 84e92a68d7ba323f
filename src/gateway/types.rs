use serde::{Deserialize, Serialize};

/// Provider response envelope for a bulk send. The same shape is stored as a
/// receipt body and parsed back for reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmsResponse {
    #[serde(rename = "SMSMessageData")]
    pub message_data: SmsMessageData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmsMessageData {
    /// Provider summary line, e.g. "Sent to 2/2 Total Cost: KES 1.60".
    #[serde(rename = "Message", default)]
    pub message: String,

    #[serde(rename = "Recipients", default)]
    pub recipients: Vec<RecipientStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipientStatus {
    #[serde(default)]
    pub number: String,

    /// e.g. "Success", "UserInBlacklist".
    #[serde(default)]
    pub status: String,

    #[serde(rename = "statusCode", default)]
    pub status_code: i64,

    /// Cost string as the provider reports it, e.g. "KES 0.8000".
    #[serde(default)]
    pub cost: String,
}

/// Numeric value of a provider cost string. Tolerates a currency prefix;
/// anything unparsable counts as zero.
pub fn cost_value(cost: &str) -> f64 {
    cost.split_whitespace()
        .last()
        .and_then(|amount| amount.parse().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_value_accepts_bare_and_prefixed_amounts() {
        assert_eq!(cost_value("1.00"), 1.0);
        assert_eq!(cost_value("KES 0.8000"), 0.8);
        assert_eq!(cost_value(""), 0.0);
        assert_eq!(cost_value("free"), 0.0);
    }

    #[test]
    fn response_parses_provider_field_names() {
        let body = r#"{
            "SMSMessageData": {
                "Message": "Sent to 1/1 Total Cost: KES 0.8000",
                "Recipients": [
                    {"number": "+254712345678", "status": "Success", "statusCode": 101, "cost": "KES 0.8000"}
                ]
            }
        }"#;
        let response: SmsResponse = serde_json::from_str(body).expect("provider response parses");
        assert_eq!(response.message_data.recipients.len(), 1);
        assert_eq!(response.message_data.recipients[0].status_code, 101);
    }
}
