use super::{SmsGateway, SmsResponse};
use crate::config::AfricasTalkingConfig;
use crate::error::SambazaError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::debug;

/// Client for the Africa's Talking bulk messaging endpoint.
///
/// One form-encoded POST per batch; the provider handles per-recipient fanout
/// and reports per-recipient status in the JSON response.
pub struct AfricasTalkingClient {
    http: reqwest::Client,
    cfg: AfricasTalkingConfig,
}

impl AfricasTalkingClient {
    pub fn new(cfg: AfricasTalkingConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build reqwest client");

        Self { http, cfg }
    }
}

#[async_trait]
impl SmsGateway for AfricasTalkingClient {
    async fn send(
        &self,
        message: &str,
        recipients: &[String],
    ) -> Result<SmsResponse, SambazaError> {
        let to = recipients.join(",");
        let form = [
            ("username", self.cfg.username.as_str()),
            ("to", to.as_str()),
            ("message", message),
            ("from", self.cfg.sender_id.as_str()),
        ];

        let resp = self
            .http
            .post(&self.cfg.api_url)
            .header("apiKey", &self.cfg.api_key)
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            debug!(status = %status, recipients = recipients.len(), "provider rejected batch");
            return Err(SambazaError::UpstreamStatus(status));
        }

        Ok(resp.json::<SmsResponse>().await?)
    }
}
