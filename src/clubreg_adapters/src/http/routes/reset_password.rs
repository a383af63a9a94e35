use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use clubreg_application::ResetPasswordUseCase;
use clubreg_core::{AccountStore, Email, OtpCode, OtpStore, Password};

use super::error::{ApiError, ValidationErrors};
use super::resend_otp::MessageResponse;

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Secret<String>,
    pub otp: String,
    #[serde(rename = "newPassword")]
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip(account_store, otp_store, request))]
pub async fn reset_password<A, O>(
    State((account_store, otp_store)): State<(A, O)>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    O: OtpStore + Clone,
{
    let mut errors = ValidationErrors::default();
    let email = errors.check("email", Email::try_from(request.email));
    let otp = errors.check("otp", OtpCode::parse(request.otp));
    let new_password = errors.check("newPassword", Password::try_from(request.new_password));

    let (Some(email), Some(otp), Some(new_password)) = (email, otp, new_password) else {
        return Err(errors.into());
    };

    let use_case = ResetPasswordUseCase::new(account_store, otp_store);
    use_case.execute(email, otp, new_password).await?;

    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}
