use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{account::AccountId, email::Email, otp_code::OtpCode, password::Password};

/// Session tokens are valid for seven days from issuance.
pub const SESSION_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24 * 7;

// EmailClient port trait and errors
#[derive(Debug, Error)]
pub enum EmailClientError {
    #[error("Email delivery failed: {0}")]
    Delivery(String),
}

/// Port trait for the out-of-band code delivery collaborator.
///
/// Failures must surface to the caller, never be swallowed.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_otp(&self, recipient: &Email, code: &OtpCode) -> Result<(), EmailClientError>;
}

// TokenIssuer port trait and errors
#[derive(Debug, Error)]
pub enum TokenIssuerError {
    #[error("Invalid or expired session token")]
    InvalidOrExpired,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for TokenIssuerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidOrExpired, Self::InvalidOrExpired) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Mints and verifies signed, time-bound session tokens bound to an account
/// id. Stateless: there is no server-side revocation list.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, account_id: &AccountId) -> Result<String, TokenIssuerError>;

    fn verify(&self, token: &str) -> Result<AccountId, TokenIssuerError>;
}

// CredentialHasher port trait and errors
#[derive(Debug, Error)]
pub enum CredentialHasherError {
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// One-way salted hashing and verification of passwords.
pub trait CredentialHasher: Send + Sync {
    /// Applies a fresh random salt each call, so equal inputs yield distinct
    /// hashes.
    fn hash(&self, password: &Password) -> Result<Secret<String>, CredentialHasherError>;

    /// Constant-time comparison. A malformed hash verifies as `false`, it
    /// never errors out.
    fn verify(&self, password: &Password, hash: &Secret<String>) -> bool;
}
