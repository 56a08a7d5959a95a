use async_trait::async_trait;

use crate::error::ApiError;

/// Entry points of the automation, one per trigger.
///
/// Implementations receive the raw webhook body and claimed signature for the
/// start path; the stop path carries no meaningful payload.
#[async_trait]
pub trait HookHandler: Send + Sync + 'static {
    /// Webhook-triggered start: authenticate, then bring the CI server up.
    async fn start(&self, body: &[u8], signature: Option<&str>) -> Result<(), ApiError>;

    /// Timer-triggered stop: tear the CI server down if it is running.
    async fn stop(&self) -> Result<(), ApiError>;
}
