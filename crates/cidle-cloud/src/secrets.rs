use async_trait::async_trait;

use crate::error::CloudError;

/// Secure parameter store holding the webhook shared secret.
#[async_trait]
pub trait SecretStore: Send + Sync + 'static {
    /// Fetch a parameter value, decrypting it when `decrypt` is set.
    async fn get(&self, name: &str, decrypt: bool) -> Result<String, CloudError>;
}
