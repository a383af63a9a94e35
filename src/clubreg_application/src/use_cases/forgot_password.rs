use clubreg_core::{
    AccountStore, AccountStoreError, Email, EmailClient, EmailClientError, OtpStore, OtpStoreError,
};

/// Error types specific to the forgot password use case
#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    /// Returned both when no account exists and when the account has not been
    /// verified yet.
    #[error("No verified account for this email")]
    NoVerifiedAccount,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
    #[error("OTP store error: {0}")]
    OtpStoreError(#[from] OtpStoreError),
    #[error("Failed to send one-time code: {0}")]
    EmailError(#[from] EmailClientError),
}

/// Forgot password use case - issues a reset code to a verified account,
/// reusing the same OTP primitive as signup verification.
pub struct ForgotPasswordUseCase<A, O, E>
where
    A: AccountStore,
    O: OtpStore,
    E: EmailClient,
{
    account_store: A,
    otp_store: O,
    email_client: E,
}

impl<A, O, E> ForgotPasswordUseCase<A, O, E>
where
    A: AccountStore,
    O: OtpStore,
    E: EmailClient,
{
    pub fn new(account_store: A, otp_store: O, email_client: E) -> Self {
        Self {
            account_store,
            otp_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), ForgotPasswordError> {
        let account = match self.account_store.find_by_email(&email).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => {
                return Err(ForgotPasswordError::NoVerifiedAccount);
            }
            Err(e) => return Err(ForgotPasswordError::AccountStoreError(e)),
        };

        if !account.is_verified() {
            return Err(ForgotPasswordError::NoVerifiedAccount);
        }

        let code = self.otp_store.issue(&email).await?;

        self.email_client.send_otp(&email, &code).await?;

        Ok(())
    }
}
