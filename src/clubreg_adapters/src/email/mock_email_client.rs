use std::sync::Arc;

use tokio::sync::RwLock;

use clubreg_core::{Email, EmailClient, EmailClientError, OtpCode};

/// Email client that records instead of delivering, so tests can read the
/// code that would have reached an address.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<(Email, OtpCode)>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently "delivered" code for the address, if any.
    pub async fn last_code_for(&self, email: &Email) -> Option<OtpCode> {
        self.sent
            .read()
            .await
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_otp(&self, recipient: &Email, code: &OtpCode) -> Result<(), EmailClientError> {
        self.sent
            .write()
            .await
            .push((recipient.clone(), code.clone()));
        Ok(())
    }
}
