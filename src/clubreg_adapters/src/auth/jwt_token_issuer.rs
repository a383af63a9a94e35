use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use clubreg_core::{AccountId, SESSION_TOKEN_TTL_SECONDS, TokenIssuer, TokenIssuerError};

#[derive(Clone)]
pub struct JwtConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtConfig {
    pub fn new(jwt_secret: Secret<String>) -> Self {
        Self {
            jwt_secret,
            token_ttl_in_seconds: SESSION_TOKEN_TTL_SECONDS,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

/// Stateless JWT session tokens: `sub` carries the account id, `exp` the
/// seven-day expiry. Possession of a valid token is the whole authorization
/// story; there is no revocation list.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    config: JwtConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, account_id: &AccountId) -> Result<String, TokenIssuerError> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds).ok_or(
            TokenIssuerError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or(TokenIssuerError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        let exp: usize = exp.try_into().map_err(|_| {
            TokenIssuerError::UnexpectedError("Failed to cast i64 to usize".to_string())
        })?;

        let claims = Claims {
            sub: account_id.to_string(),
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(|e| TokenIssuerError::UnexpectedError(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AccountId, TokenIssuerError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenIssuerError::InvalidOrExpired)?;

        AccountId::parse(&claims.sub).map_err(|_| TokenIssuerError::InvalidOrExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> JwtTokenIssuer {
        JwtTokenIssuer::new(JwtConfig::new(Secret::new("secret".to_string())))
    }

    #[test]
    fn issued_tokens_verify_back_to_the_account_id() {
        let issuer = issuer();
        let id = AccountId::random();
        let token = issuer.issue(&id).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(issuer.verify(&token).unwrap(), id);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let issuer = issuer();
        assert_eq!(
            issuer.verify("not-a-token").unwrap_err(),
            TokenIssuerError::InvalidOrExpired
        );
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let other = JwtTokenIssuer::new(JwtConfig::new(Secret::new("other".to_string())));
        let token = other.issue(&AccountId::random()).unwrap();
        assert_eq!(
            issuer().verify(&token).unwrap_err(),
            TokenIssuerError::InvalidOrExpired
        );
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let config = JwtConfig {
            jwt_secret: Secret::new("secret".to_string()),
            // Far enough in the past to clear the default decode leeway.
            token_ttl_in_seconds: -120,
        };
        let issuer = JwtTokenIssuer::new(config);
        let token = issuer.issue(&AccountId::random()).unwrap();
        assert_eq!(
            issuer.verify(&token).unwrap_err(),
            TokenIssuerError::InvalidOrExpired
        );
    }
}
