use clubreg_core::{
    AccountStore, AccountStoreError, AccountView, Email, OtpCode, OtpStore, OtpStoreError,
    TokenIssuer, TokenIssuerError,
};

/// Error types specific to the verify OTP use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyOtpError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("OTP store error: {0}")]
    OtpStoreError(#[from] OtpStoreError),
    #[error("Token issuer error: {0}")]
    TokenIssuerError(#[from] TokenIssuerError),
}

/// Verify OTP use case - proves control of the email address and opens a
/// session.
///
/// The consumption at the OTP layer is the real replay guard; marking the
/// account verified is idempotent and succeeds even when the account already
/// is, so a first login right after verification does not need a special
/// path.
pub struct VerifyOtpUseCase<A, O, T>
where
    A: AccountStore,
    O: OtpStore,
    T: TokenIssuer,
{
    account_store: A,
    otp_store: O,
    token_issuer: T,
}

impl<A, O, T> VerifyOtpUseCase<A, O, T>
where
    A: AccountStore,
    O: OtpStore,
    T: TokenIssuer,
{
    pub fn new(account_store: A, otp_store: O, token_issuer: T) -> Self {
        Self {
            account_store,
            otp_store,
            token_issuer,
        }
    }

    /// Execute the verify OTP use case
    ///
    /// # Returns
    /// A session token and the public account view, or a VerifyOtpError.
    #[tracing::instrument(name = "VerifyOtpUseCase::execute", skip(self, code))]
    pub async fn execute(
        &self,
        email: Email,
        code: OtpCode,
    ) -> Result<(String, AccountView), VerifyOtpError> {
        let account = self.account_store.find_by_email(&email).await?;

        // Exactly-once: this removes the record on success, so a replay with
        // the same pair fails here.
        self.otp_store.consume(&email, &code).await?;

        self.account_store.mark_verified(&account.id()).await?;

        let token = self.token_issuer.issue(&account.id())?;
        let account = self.account_store.find_by_id(&account.id()).await?;

        Ok((token, account.to_view()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        FakeAccountStore, FakeOtpStore, FakeTokenIssuer, new_account, parse_email,
    };

    async fn pending_account(
        account_store: &FakeAccountStore,
        otp_store: &FakeOtpStore,
    ) -> (Email, OtpCode) {
        let account = account_store
            .create(new_account("Chess Club", "a@x.com", "secret123"))
            .await
            .unwrap();
        let code = otp_store.issue(account.email()).await.unwrap();
        (account.email().clone(), code)
    }

    #[tokio::test]
    async fn correct_code_verifies_the_account_and_returns_a_token() {
        let account_store = FakeAccountStore::new();
        let otp_store = FakeOtpStore::new();
        let (email, code) = pending_account(&account_store, &otp_store).await;

        let use_case = VerifyOtpUseCase::new(
            account_store.clone(),
            otp_store.clone(),
            FakeTokenIssuer::new(),
        );

        let (token, view) = use_case.execute(email.clone(), code).await.unwrap();
        assert!(!token.is_empty());
        assert!(view.verified);
        assert!(account_store.find_by_email(&email).await.unwrap().is_verified());
    }

    #[tokio::test]
    async fn wrong_code_is_rejected_and_account_stays_unverified() {
        let account_store = FakeAccountStore::new();
        let otp_store = FakeOtpStore::new();
        let (email, code) = pending_account(&account_store, &otp_store).await;

        let wrong = if code.as_str() == "000000" {
            OtpCode::parse("000001".to_string()).unwrap()
        } else {
            OtpCode::parse("000000".to_string()).unwrap()
        };

        let use_case = VerifyOtpUseCase::new(
            account_store.clone(),
            otp_store.clone(),
            FakeTokenIssuer::new(),
        );

        let result = use_case.execute(email.clone(), wrong).await;
        assert!(matches!(
            result,
            Err(VerifyOtpError::OtpStoreError(OtpStoreError::InvalidOrExpired))
        ));
        assert!(!account_store.find_by_email(&email).await.unwrap().is_verified());
    }

    #[tokio::test]
    async fn a_consumed_code_cannot_be_replayed() {
        let account_store = FakeAccountStore::new();
        let otp_store = FakeOtpStore::new();
        let (email, code) = pending_account(&account_store, &otp_store).await;

        let use_case = VerifyOtpUseCase::new(
            account_store.clone(),
            otp_store.clone(),
            FakeTokenIssuer::new(),
        );

        use_case.execute(email.clone(), code.clone()).await.unwrap();
        let replay = use_case.execute(email, code).await;
        assert!(matches!(
            replay,
            Err(VerifyOtpError::OtpStoreError(OtpStoreError::InvalidOrExpired))
        ));
    }

    #[tokio::test]
    async fn unknown_email_is_rejected_before_touching_the_code() {
        let use_case = VerifyOtpUseCase::new(
            FakeAccountStore::new(),
            FakeOtpStore::new(),
            FakeTokenIssuer::new(),
        );

        let result = use_case
            .execute(parse_email("ghost@x.com"), OtpCode::random())
            .await;
        assert!(matches!(
            result,
            Err(VerifyOtpError::AccountStoreError(
                AccountStoreError::AccountNotFound
            ))
        ));
    }
}
