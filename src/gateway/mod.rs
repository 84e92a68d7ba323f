//! SMS provider gateway: the trait seam and the Africa's Talking client.

pub mod africastalking;
mod types;

pub use africastalking::AfricasTalkingClient;
pub use types::{RecipientStatus, SmsMessageData, SmsResponse, cost_value};

use crate::error::SambazaError;
use async_trait::async_trait;

/// One provider call: send `message` to a single batch of recipients.
///
/// Implementations own authentication and transport; callers own batching and
/// receipt persistence.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(
        &self,
        message: &str,
        recipients: &[String],
    ) -> Result<SmsResponse, SambazaError>;
}
