use std::sync::Arc;

use hmac::{Hmac, Mac};
use sha1::Sha1;
use tracing::debug;

use cidle_cloud::SecretStore;

use crate::error::OrchestratorError;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_SCHEME: &str = "sha1=";

/// Authenticates inbound webhook deliveries against the shared secret.
///
/// The claimed signature is `sha1=<hex>` over the raw request body; the
/// comparison runs in constant time via `Mac::verify_slice`.
pub struct SignatureValidator {
    secrets: Arc<dyn SecretStore>,
    secret_name: String,
    enabled: bool,
}

impl SignatureValidator {
    pub fn new(secrets: Arc<dyn SecretStore>, secret_name: impl Into<String>, enabled: bool) -> Self {
        Self {
            secrets,
            secret_name: secret_name.into(),
            enabled,
        }
    }

    /// Verify the claimed signature over the raw body.
    ///
    /// Accepts iff the HMAC-SHA1 of the body under the stored secret matches
    /// the claimed value byte for byte.
    pub async fn verify(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<(), OrchestratorError> {
        if !self.enabled {
            debug!("signature verification disabled by configuration");
            return Ok(());
        }

        let claimed = signature
            .ok_or_else(|| OrchestratorError::Auth("missing signature header".to_string()))?;
        let claimed_hex = claimed.strip_prefix(SIGNATURE_SCHEME).ok_or_else(|| {
            OrchestratorError::Auth(format!("unexpected signature scheme: {claimed}"))
        })?;
        let claimed_bytes = hex::decode(claimed_hex)
            .map_err(|_| OrchestratorError::Auth("malformed signature hex".to_string()))?;

        let secret = self.secrets.get(&self.secret_name, true).await?;

        let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
            .map_err(|_| OrchestratorError::Auth("unusable webhook secret".to_string()))?;
        mac.update(body);
        mac.verify_slice(&claimed_bytes)
            .map_err(|_| OrchestratorError::Auth("signature mismatch".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cidle_cloud::MemoryCloud;

    const BODY: &[u8] = b"The quick brown fox jumps over the lazy dog";
    // HMAC-SHA1 of BODY under the key "key".
    const GOOD: &str = "sha1=de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9";

    fn validator(enabled: bool) -> SignatureValidator {
        let cloud = MemoryCloud::new();
        cloud.insert_secret("github/webhook-secret", "key");
        SignatureValidator::new(Arc::new(cloud), "github/webhook-secret", enabled)
    }

    #[tokio::test]
    async fn accepts_matching_signature() {
        let v = validator(true);
        v.verify(BODY, Some(GOOD)).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_tampered_signature() {
        let v = validator(true);
        let tampered = "sha1=de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d8";
        let err = v.verify(BODY, Some(tampered)).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::Auth(_)));
    }

    #[tokio::test]
    async fn rejects_tampered_body() {
        let v = validator(true);
        let err = v.verify(b"different body", Some(GOOD)).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::Auth(_)));
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let v = validator(true);
        let err = v.verify(BODY, None).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::Auth(_)));
    }

    #[tokio::test]
    async fn rejects_unknown_scheme() {
        let v = validator(true);
        let err = v
            .verify(BODY, Some("sha256=deadbeef"))
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::Auth(_)));
    }

    #[tokio::test]
    async fn disabled_validator_accepts_anything() {
        let v = validator(false);
        v.verify(BODY, None).await.unwrap();
        v.verify(BODY, Some("sha1=junk")).await.unwrap();
    }

    #[tokio::test]
    async fn missing_secret_is_not_an_auth_error() {
        let cloud = MemoryCloud::new();
        let v = SignatureValidator::new(Arc::new(cloud), "github/webhook-secret", true);
        let err = v.verify(BODY, Some(GOOD)).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::Cloud(_)));
    }
}
