use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use clubreg_core::{Email, OTP_VALIDITY_MINUTES, OtpCode, OtpStore, OtpStoreError};

#[derive(Debug, Clone)]
struct OtpRecord {
    code: OtpCode,
    issued_at: DateTime<Utc>,
}

/// In-memory OTP store.
///
/// Keyed by email, one record per key: inserting on `issue` replaces whatever
/// was there, which is the delete-then-insert pair that keeps at most one
/// valid code per address. Expiry is checked on `consume` rather than by a
/// background reaper.
#[derive(Clone)]
pub struct HashMapOtpStore {
    codes: Arc<RwLock<HashMap<Email, OtpRecord>>>,
    validity: Duration,
}

impl HashMapOtpStore {
    pub fn new() -> Self {
        Self::with_validity(Duration::minutes(OTP_VALIDITY_MINUTES))
    }

    /// Tests shrink the window instead of sleeping through it.
    pub fn with_validity(validity: Duration) -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
            validity,
        }
    }
}

impl Default for HashMapOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl OtpStore for HashMapOtpStore {
    #[tracing::instrument(name = "Issuing one-time code", skip_all)]
    async fn issue(&self, email: &Email) -> Result<OtpCode, OtpStoreError> {
        let code = OtpCode::random();
        let mut codes = self.codes.write().await;
        codes.remove(email);
        codes.insert(
            email.clone(),
            OtpRecord {
                code: code.clone(),
                issued_at: Utc::now(),
            },
        );
        Ok(code)
    }

    #[tracing::instrument(name = "Consuming one-time code", skip_all)]
    async fn consume(&self, email: &Email, code: &OtpCode) -> Result<(), OtpStoreError> {
        let mut codes = self.codes.write().await;

        let Some(record) = codes.get(email) else {
            return Err(OtpStoreError::InvalidOrExpired);
        };

        if &record.code != code {
            return Err(OtpStoreError::InvalidOrExpired);
        }

        // Explicit expiry check: the record may well still exist past its
        // window.
        if Utc::now() - record.issued_at > self.validity {
            codes.remove(email);
            return Err(OtpStoreError::InvalidOrExpired);
        }

        codes.remove(email);
        Ok(())
    }

    async fn invalidate_all(&self, email: &Email) -> Result<(), OtpStoreError> {
        self.codes.write().await.remove(email);
        Ok(())
    }
}
