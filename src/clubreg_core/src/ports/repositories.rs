use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId, NewAccount},
    email::Email,
    otp_code::OtpCode,
    password::Password,
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("An active account with this name or email already exists")]
    DuplicateActive,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DuplicateActive, Self::DuplicateActive) => true,
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Owner of account records and their verification state.
///
/// Plaintext passwords cross this boundary exactly twice (`create`,
/// `update_password` and the `authenticate` check); implementations hash with
/// the credential hasher they were built with and store only the hash.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Create an unverified account.
    ///
    /// Fails with `DuplicateActive` iff any account with the same email or
    /// name exists and is verified. Otherwise every unverified match (the
    /// name and the email can be held by different accounts) is deleted
    /// first, so an abandoned signup can be retried without manual cleanup.
    async fn create(&self, new_account: NewAccount) -> Result<Account, AccountStoreError>;

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError>;

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError>;

    /// Check credentials and return the matching account.
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Account, AccountStoreError>;

    /// Idempotent.
    async fn mark_verified(&self, id: &AccountId) -> Result<(), AccountStoreError>;

    async fn update_password(
        &self,
        id: &AccountId,
        new_password: Password,
    ) -> Result<(), AccountStoreError>;

    /// Remove the account and every owned child record.
    ///
    /// A deletion flow that owns an [`OtpStore`] should also call
    /// `invalidate_all` for the address; a leftover code is inert on its own
    /// since every consuming path resolves the account first.
    async fn delete(&self, id: &AccountId) -> Result<(), AccountStoreError>;
}

// OtpStore port trait and errors
#[derive(Debug, Error)]
pub enum OtpStoreError {
    /// Deliberately undifferentiated: absent, mismatched and expired codes all
    /// land here so the caller cannot tell which sub-condition occurred.
    #[error("Invalid or expired one-time code")]
    InvalidOrExpired,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for OtpStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidOrExpired, Self::InvalidOrExpired) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Owner of keyed, time-bound, single-use code records.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Generate a fresh code for the address, invalidating every prior record
    /// for it first. At most one valid code per email at any time.
    async fn issue(&self, email: &Email) -> Result<OtpCode, OtpStoreError>;

    /// Consume the record matching both email and code.
    ///
    /// Succeeds at most once per record; the expiry window is checked
    /// explicitly even when the record is still present.
    async fn consume(&self, email: &Email, code: &OtpCode) -> Result<(), OtpStoreError>;

    /// Remove every record for the address.
    async fn invalidate_all(&self, email: &Email) -> Result<(), OtpStoreError>;
}
