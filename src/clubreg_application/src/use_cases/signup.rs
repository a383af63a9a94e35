use clubreg_core::{
    AccountStore, AccountStoreError, Email, EmailClient, EmailClientError, NewAccount, OtpStore,
    OtpStoreError,
};

/// Error types specific to the signup use case
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("OTP store error: {0}")]
    OtpStoreError(#[from] OtpStoreError),
    #[error("Failed to send one-time code: {0}")]
    EmailError(#[from] EmailClientError),
}

/// Signup use case - registers an unverified account and dispatches the
/// verification code.
///
/// If code delivery fails the operation is reported as failed but the account
/// and the issued code stay put; the caller recovers via resend-otp.
pub struct SignupUseCase<A, O, E>
where
    A: AccountStore,
    O: OtpStore,
    E: EmailClient,
{
    account_store: A,
    otp_store: O,
    email_client: E,
}

impl<A, O, E> SignupUseCase<A, O, E>
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

    /// Execute the signup use case
    ///
    /// # Returns
    /// The normalized email the code was sent to, or a SignupError.
    #[tracing::instrument(name = "SignupUseCase::execute", skip(self, new_account))]
    pub async fn execute(&self, new_account: NewAccount) -> Result<Email, SignupError> {
        let account = self.account_store.create(new_account).await?;

        let code = self.otp_store.issue(account.email()).await?;

        self.email_client.send_otp(account.email(), &code).await?;

        Ok(account.email().clone())
    }
}
