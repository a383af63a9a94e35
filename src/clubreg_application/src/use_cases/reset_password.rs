use clubreg_core::{
    AccountStore, AccountStoreError, Email, OtpCode, OtpStore, OtpStoreError, Password,
};

/// Error types specific to the reset password use case
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("OTP store error: {0}")]
    OtpStoreError(#[from] OtpStoreError),
}

/// Reset password use case - consumes a forgot-password code and replaces the
/// credential.
///
/// Only verified accounts can reset; an unverified account reports
/// `AccountNotFound`, the flow simply does not exist for it yet.
pub struct ResetPasswordUseCase<A, O>
where
    A: AccountStore,
    O: OtpStore,
{
    account_store: A,
    otp_store: O,
}

impl<A, O> ResetPasswordUseCase<A, O>
where
    A: AccountStore,
    O: OtpStore,
{
    pub fn new(account_store: A, otp_store: O) -> Self {
        Self {
            account_store,
            otp_store,
        }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip(self, code, new_password))]
    pub async fn execute(
        &self,
        email: Email,
        code: OtpCode,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let account = self.account_store.find_by_email(&email).await?;

        if !account.is_verified() {
            return Err(AccountStoreError::AccountNotFound.into());
        }

        self.otp_store.consume(&email, &code).await?;

        self.account_store
            .update_password(&account.id(), new_password)
            .await?;

        Ok(())
    }
}
