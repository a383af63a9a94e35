use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use clubreg_application::VerifyOtpUseCase;
use clubreg_core::{AccountStore, Email, OtpCode, OtpStore, TokenIssuer};

use super::error::{ApiError, ValidationErrors};
use super::login::TokenResponse;

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Secret<String>,
    pub otp: String,
}

#[tracing::instrument(name = "Verify OTP", skip(account_store, otp_store, token_issuer, request))]
pub async fn verify_otp<A, O, T>(
    State((account_store, otp_store, token_issuer)): State<(A, O, T)>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    O: OtpStore + Clone,
    T: TokenIssuer + Clone,
{
    let mut errors = ValidationErrors::default();
    let email = errors.check("email", Email::try_from(request.email));
    let otp = errors.check("otp", OtpCode::parse(request.otp));

    let (Some(email), Some(otp)) = (email, otp) else {
        return Err(errors.into());
    };

    let use_case = VerifyOtpUseCase::new(account_store, otp_store, token_issuer);
    let (token, account) = use_case.execute(email, otp).await?;

    Ok(Json(TokenResponse { token, account }))
}
