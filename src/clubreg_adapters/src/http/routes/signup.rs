use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use clubreg_application::SignupUseCase;
use clubreg_core::{AccountStore, ClubName, Email, EmailClient, NewAccount, OtpStore, Password};

use super::error::{ApiError, ValidationErrors};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub email: String,
}

#[tracing::instrument(name = "Signup", skip(account_store, otp_store, email_client, request))]
pub async fn signup<A, O, E>(
    State((account_store, otp_store, email_client)): State<(A, O, E)>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    O: OtpStore + Clone,
    E: EmailClient + Clone,
{
    let mut errors = ValidationErrors::default();
    let name = errors.check("name", ClubName::try_from(request.name));
    let email = errors.check("email", Email::try_from(request.email));
    let password = errors.check("password", Password::try_from(request.password));

    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(errors.into());
    };

    let use_case = SignupUseCase::new(account_store, otp_store, email_client);
    let email = use_case
        .execute(NewAccount {
            name,
            description: request.description,
            email,
            password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            email: email.expose().to_string(),
        }),
    ))
}
