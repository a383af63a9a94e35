use rand::Rng;
use thiserror::Error;

/// How long an issued code remains valid.
pub const OTP_VALIDITY_MINUTES: i64 = 10;

const OTP_LENGTH: usize = 6;

#[derive(Debug, Error, PartialEq)]
pub enum OtpCodeError {
    #[error("One-time code must be exactly {OTP_LENGTH} digits")]
    Malformed,
}

/// A six-digit one-time code.
///
/// Kept as a string so leading zeros survive; comparison is plain string
/// equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Draw a fresh code uniformly from `000000..=999999`.
    pub fn random() -> Self {
        let n = rand::rng().random_range(0..=999_999u32);
        Self(format!("{n:06}"))
    }

    /// Validate a client-supplied code.
    pub fn parse(value: String) -> Result<Self, OtpCodeError> {
        if value.len() != OTP_LENGTH || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OtpCodeError::Malformed);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
