use clubreg_core::{
    AccountStore, AccountStoreError, AccountView, Email, Password, TokenIssuer, TokenIssuerError,
};

/// Error types specific to the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// "No such account" and "wrong password" collapse into this one variant
    /// so the login boundary does not enumerate users.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is not verified")]
    NotVerified,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
    #[error("Token issuer error: {0}")]
    TokenIssuerError(#[from] TokenIssuerError),
}

/// Login use case - authenticates a verified account and opens a session.
///
/// Credentials are checked before verification state, so `NotVerified` only
/// ever confirms a correct password.
pub struct LoginUseCase<A, T>
where
    A: AccountStore,
    T: TokenIssuer,
{
    account_store: A,
    token_issuer: T,
}

impl<A, T> LoginUseCase<A, T>
where
    A: AccountStore,
    T: TokenIssuer,
{
    pub fn new(account_store: A, token_issuer: T) -> Self {
        Self {
            account_store,
            token_issuer,
        }
    }

    /// Execute the login use case
    ///
    /// # Returns
    /// A session token and the public account view, or a LoginError.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<(String, AccountView), LoginError> {
        let account = match self.account_store.authenticate(&email, &password).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound | AccountStoreError::IncorrectPassword) => {
                return Err(LoginError::InvalidCredentials);
            }
            Err(e) => return Err(LoginError::AccountStoreError(e)),
        };

        if !account.is_verified() {
            return Err(LoginError::NotVerified);
        }

        let token = self.token_issuer.issue(&account.id())?;

        Ok((token, account.to_view()))
    }
}
