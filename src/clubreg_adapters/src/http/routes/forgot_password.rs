use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use clubreg_application::ForgotPasswordUseCase;
use clubreg_core::{AccountStore, Email, EmailClient, OtpStore};

use super::error::{ApiError, ValidationErrors};
use super::resend_otp::MessageResponse;

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(
    name = "Forgot password",
    skip(account_store, otp_store, email_client, request)
)]
pub async fn forgot_password<A, O, E>(
    State((account_store, otp_store, email_client)): State<(A, O, E)>,
    Json(request): Json<ForgotPasswordRequest>,
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

    let use_case = ForgotPasswordUseCase::new(account_store, otp_store, email_client);
    use_case.execute(email).await?;

    Ok(Json(MessageResponse {
        message: "A password reset code has been sent".to_string(),
    }))
}
