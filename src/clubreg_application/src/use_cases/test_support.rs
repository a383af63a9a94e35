//! In-memory fakes for the core ports, shared by the use-case tests.

use std::collections::HashMap;
use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

use clubreg_core::{
    Account, AccountId, AccountStore, AccountStoreError, ClubName, Email, EmailClient,
    EmailClientError, NewAccount, OtpCode, OtpStore, OtpStoreError, Password, TokenIssuer,
    TokenIssuerError,
};

pub fn parse_email(s: &str) -> Email {
    Email::try_from(Secret::new(s.to_string())).unwrap()
}

pub fn parse_password(s: &str) -> Password {
    Password::try_from(Secret::new(s.to_string())).unwrap()
}

pub fn new_account(name: &str, email: &str, password: &str) -> NewAccount {
    NewAccount {
        name: ClubName::try_from(name.to_string()).unwrap(),
        description: "A club".to_string(),
        email: parse_email(email),
        password: parse_password(password),
    }
}

/// Account store fake: keeps the plaintext as the "hash" so authentication is
/// a string comparison. Mirrors the duplicate / re-registration policy of the
/// real store.
#[derive(Clone, Default)]
pub struct FakeAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl FakeAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountStore for FakeAccountStore {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let matches: Vec<(AccountId, bool)> = accounts
            .values()
            .filter(|a| a.email() == &new_account.email || a.name() == &new_account.name)
            .map(|a| (a.id(), a.is_verified()))
            .collect();
        if matches.iter().any(|(_, verified)| *verified) {
            return Err(AccountStoreError::DuplicateActive);
        }
        for (id, _) in matches {
            accounts.remove(&id);
        }
        let account = Account::new(
            new_account.name,
            new_account.description,
            new_account.email,
            new_account.password.as_ref().clone(),
        );
        accounts.insert(account.id(), account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|a| a.email() == email)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts.get(id).cloned().ok_or(AccountStoreError::AccountNotFound)
    }

    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Account, AccountStoreError> {
        let account = self.find_by_email(email).await?;
        if account.password_hash().expose_secret() != password.as_ref().expose_secret() {
            return Err(AccountStoreError::IncorrectPassword);
        }
        Ok(account)
    }

    async fn mark_verified(&self, id: &AccountId) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(id).ok_or(AccountStoreError::AccountNotFound)?;
        account.mark_verified();
        Ok(())
    }

    async fn update_password(
        &self,
        id: &AccountId,
        new_password: Password,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(id).ok_or(AccountStoreError::AccountNotFound)?;
        account.set_password_hash(new_password.as_ref().clone());
        Ok(())
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        accounts.remove(id).ok_or(AccountStoreError::AccountNotFound)?;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeOtpStore {
    codes: Arc<RwLock<HashMap<Email, OtpCode>>>,
}

impl FakeOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OtpStore for FakeOtpStore {
    async fn issue(&self, email: &Email) -> Result<OtpCode, OtpStoreError> {
        let code = OtpCode::random();
        let mut codes = self.codes.write().await;
        codes.remove(email);
        codes.insert(email.clone(), code.clone());
        Ok(code)
    }

    async fn consume(&self, email: &Email, code: &OtpCode) -> Result<(), OtpStoreError> {
        let mut codes = self.codes.write().await;
        match codes.get(email) {
            Some(stored) if stored == code => {
                codes.remove(email);
                Ok(())
            }
            _ => Err(OtpStoreError::InvalidOrExpired),
        }
    }

    async fn invalidate_all(&self, email: &Email) -> Result<(), OtpStoreError> {
        self.codes.write().await.remove(email);
        Ok(())
    }
}

/// Email client fake that records every send and can be flipped to fail.
#[derive(Clone, Default)]
pub struct RecordingEmailClient {
    sent: Arc<RwLock<Vec<(Email, OtpCode)>>>,
    fail: bool,
}

impl RecordingEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn last_code_for(&self, email: &Email) -> Option<OtpCode> {
        self.sent
            .read()
            .await
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait::async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_otp(&self, recipient: &Email, code: &OtpCode) -> Result<(), EmailClientError> {
        if self.fail {
            return Err(EmailClientError::Delivery("simulated outage".to_string()));
        }
        self.sent
            .write()
            .await
            .push((recipient.clone(), code.clone()));
        Ok(())
    }
}

/// Token issuer fake: the "token" is just the account id, so tests can assert
/// round-trips without any signing.
#[derive(Clone, Default)]
pub struct FakeTokenIssuer;

impl FakeTokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenIssuer for FakeTokenIssuer {
    fn issue(&self, account_id: &AccountId) -> Result<String, TokenIssuerError> {
        Ok(format!("token-{account_id}"))
    }

    fn verify(&self, token: &str) -> Result<AccountId, TokenIssuerError> {
        let id = token
            .strip_prefix("token-")
            .ok_or(TokenIssuerError::InvalidOrExpired)?;
        AccountId::parse(id).map_err(|_| TokenIssuerError::InvalidOrExpired)
    }
}
