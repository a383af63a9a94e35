use clubreg_core::{
    AccountStore, AccountStoreError, Email, EmailClient, EmailClientError, OtpStore, OtpStoreError,
};

/// Error types specific to the resend OTP use case
#[derive(Debug, thiserror::Error)]
pub enum ResendOtpError {
    /// Returned both when no account exists for the email and when the
    /// account is already verified.
    #[error("No unverified account for this email")]
    NoUnverifiedAccount,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
    #[error("OTP store error: {0}")]
    OtpStoreError(#[from] OtpStoreError),
    #[error("Failed to send one-time code: {0}")]
    EmailError(#[from] EmailClientError),
}

/// Resend OTP use case - re-issues the verification code for a pending
/// signup, superseding any earlier code.
pub struct ResendOtpUseCase<A, O, E>
where
    A: AccountStore,
    O: OtpStore,
    E: EmailClient,
{
    account_store: A,
    otp_store: O,
    email_client: E,
}

impl<A, O, E> ResendOtpUseCase<A, O, E>
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

    #[tracing::instrument(name = "ResendOtpUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), ResendOtpError> {
        let account = match self.account_store.find_by_email(&email).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => {
                return Err(ResendOtpError::NoUnverifiedAccount);
            }
            Err(e) => return Err(ResendOtpError::AccountStoreError(e)),
        };

        if account.is_verified() {
            return Err(ResendOtpError::NoUnverifiedAccount);
        }

        let code = self.otp_store.issue(&email).await?;

        self.email_client.send_otp(&email, &code).await?;

        Ok(())
    }
}
