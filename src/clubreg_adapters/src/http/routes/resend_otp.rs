use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use clubreg_application::ResendOtpUseCase;
use clubreg_core::{AccountStore, Email, EmailClient, OtpStore};

use super::error::{ApiError, ValidationErrors};

#[derive(Debug, Deserialize)]
pub struct ResendOtpRequest {
    pub email: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[tracing::instrument(name = "Resend OTP", skip(account_store, otp_store, email_client, request))]
pub async fn resend_otp<A, O, E>(
    State((account_store, otp_store, email_client)): State<(A, O, E)>,
    Json(request): Json<ResendOtpRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    O: OtpStore + Clone,
    E: EmailClient + Clone,
{
    let mut errors = ValidationErrors::default();
    let email = errors.check("email", Email::try_from(request.email));

    let Some(email) = email else {
        return Err(errors.into());
    };

    let use_case = ResendOtpUseCase::new(account_store, otp_store, email_client);
    use_case.execute(email).await?;

    Ok(Json(MessageResponse {
        message: "A new one-time code has been sent".to_string(),
    }))
}
