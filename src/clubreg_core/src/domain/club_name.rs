use serde::Serialize;
use thiserror::Error;

const MAX_NAME_LENGTH: usize = 120;

#[derive(Debug, Error, PartialEq)]
pub enum ClubNameError {
    #[error("Club name must not be empty")]
    Empty,
    #[error("Club name must be at most {MAX_NAME_LENGTH} characters long")]
    TooLong,
}

/// The club's display name, unique across all accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClubName(String);

impl TryFrom<String> for ClubName {
    type Error = ClubNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ClubNameError::Empty);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(ClubNameError::TooLong);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl ClubName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
