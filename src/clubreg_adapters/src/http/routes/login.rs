use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use clubreg_application::LoginUseCase;
use clubreg_core::{AccountStore, AccountView, Email, Password, TokenIssuer};

use super::error::{ApiError, ValidationErrors};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

/// Body shared by the two session-opening routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub account: AccountView,
}

#[tracing::instrument(name = "Login", skip(account_store, token_issuer, request))]
pub async fn login<A, T>(
    State((account_store, token_issuer)): State<(A, T)>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    T: TokenIssuer + Clone,
{
    let mut errors = ValidationErrors::default();
    let email = errors.check("email", Email::try_from(request.email));
    let password = errors.check("password", Password::try_from(request.password));

    let (Some(email), Some(password)) = (email, password) else {
        return Err(errors.into());
    };

    let use_case = LoginUseCase::new(account_store, token_issuer);
    let (token, account) = use_case.execute(email, password).await?;

    Ok(Json(TokenResponse { token, account }))
}
