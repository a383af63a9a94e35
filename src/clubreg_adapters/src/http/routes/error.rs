use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use clubreg_application::{
    ForgotPasswordError, LoginError, ResendOtpError, ResetPasswordError, SignupError,
    VerifyOtpError,
};
use clubreg_core::{
    AccountStoreError, EmailClientError, OtpStoreError, TokenIssuerError,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

/// One malformed input field. Validation failures are reported in bulk, one
/// entry per offending field.
#[derive(Debug, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulator the routes use to validate every field before rejecting.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn check<T, E: std::fmt::Display>(
        &mut self,
        field: &'static str,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(FieldError {
                    field: field.to_string(),
                    message: e.to_string(),
                });
                None
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors.0)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input")]
    Validation(Vec<FieldError>),

    #[error("An active account with this name or email already exists")]
    DuplicateActive,

    #[error("Invalid or expired one-time code")]
    InvalidOrExpired,

    #[error("Account not found")]
    AccountNotFound,

    #[error("No unverified account for this email")]
    NoUnverifiedAccount,

    #[error("No verified account for this email")]
    NoVerifiedAccount,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is not verified")]
    NotVerified,

    #[error("Failed to deliver one-time code")]
    Delivery(String),

    #[error("Unexpected error")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ApiError::Validation(_)
            | ApiError::DuplicateActive
            | ApiError::InvalidOrExpired => StatusCode::BAD_REQUEST,

            ApiError::AccountNotFound
            | ApiError::NoUnverifiedAccount
            | ApiError::NoVerifiedAccount => StatusCode::NOT_FOUND,

            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,

            ApiError::NotVerified => StatusCode::FORBIDDEN,

            ApiError::Delivery(_) | ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal detail goes to the log, not the wire.
        if let ApiError::Delivery(detail) | ApiError::Unexpected(detail) = &self {
            tracing::error!(error = %detail, "request failed");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            fields: match self {
                ApiError::Validation(fields) => Some(fields),
                _ => None,
            },
        });

        (status_code, body).into_response()
    }
}

impl From<AccountStoreError> for ApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::DuplicateActive => ApiError::DuplicateActive,
            AccountStoreError::AccountNotFound => ApiError::AccountNotFound,
            AccountStoreError::IncorrectPassword => ApiError::InvalidCredentials,
            AccountStoreError::UnexpectedError(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<OtpStoreError> for ApiError {
    fn from(error: OtpStoreError) -> Self {
        match error {
            OtpStoreError::InvalidOrExpired => ApiError::InvalidOrExpired,
            OtpStoreError::UnexpectedError(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<EmailClientError> for ApiError {
    fn from(error: EmailClientError) -> Self {
        match error {
            EmailClientError::Delivery(e) => ApiError::Delivery(e),
        }
    }
}

impl From<TokenIssuerError> for ApiError {
    fn from(error: TokenIssuerError) -> Self {
        // Routes only ever issue; a failure to mint is never the caller's
        // fault.
        ApiError::Unexpected(error.to_string())
    }
}

impl From<SignupError> for ApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::AccountStoreError(e) => e.into(),
            SignupError::OtpStoreError(e) => e.into(),
            SignupError::EmailError(e) => e.into(),
        }
    }
}

impl From<VerifyOtpError> for ApiError {
    fn from(error: VerifyOtpError) -> Self {
        match error {
            VerifyOtpError::AccountStoreError(e) => e.into(),
            VerifyOtpError::OtpStoreError(e) => e.into(),
            VerifyOtpError::TokenIssuerError(e) => e.into(),
        }
    }
}

impl From<ResendOtpError> for ApiError {
    fn from(error: ResendOtpError) -> Self {
        match error {
            ResendOtpError::NoUnverifiedAccount => ApiError::NoUnverifiedAccount,
            ResendOtpError::AccountStoreError(e) => e.into(),
            ResendOtpError::OtpStoreError(e) => e.into(),
            ResendOtpError::EmailError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::InvalidCredentials,
            LoginError::NotVerified => ApiError::NotVerified,
            LoginError::AccountStoreError(e) => e.into(),
            LoginError::TokenIssuerError(e) => e.into(),
        }
    }
}

impl From<ForgotPasswordError> for ApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::NoVerifiedAccount => ApiError::NoVerifiedAccount,
            ForgotPasswordError::AccountStoreError(e) => e.into(),
            ForgotPasswordError::OtpStoreError(e) => e.into(),
            ForgotPasswordError::EmailError(e) => e.into(),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::AccountStoreError(e) => e.into(),
            ResetPasswordError::OtpStoreError(e) => e.into(),
        }
    }
}
