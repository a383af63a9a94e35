use std::fmt;

use secrecy::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{club_name::ClubName, email::Email, password::Password};

/// Opaque unique account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(value)?))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Input for registering a new club account. The password is still plaintext
/// here; the account store hashes it on insert.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: ClubName,
    pub description: String,
    pub email: Email,
    pub password: Password,
}

/// A registered club account.
///
/// Created unverified; `verified` flips to true exactly once, on successful
/// OTP verification.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    name: ClubName,
    description: String,
    email: Email,
    password_hash: Secret<String>,
    verified: bool,
}

impl Account {
    pub fn new(
        name: ClubName,
        description: String,
        email: Email,
        password_hash: Secret<String>,
    ) -> Self {
        Self {
            id: AccountId::random(),
            name,
            description,
            email,
            password_hash,
            verified: false,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &ClubName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Idempotent: verifying an already-verified account is a no-op.
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }

    pub fn set_password_hash(&mut self, password_hash: Secret<String>) {
        self.password_hash = password_hash;
    }

    pub fn to_view(&self) -> AccountView {
        AccountView {
            id: self.id,
            name: self.name.as_str().to_string(),
            description: self.description.clone(),
            email: self.email.expose().to_string(),
            verified: self.verified,
        }
    }
}

/// Public projection of an account, safe to put on the wire. Never carries
/// the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: AccountId,
    pub name: String,
    pub description: String,
    pub email: String,
    pub verified: bool,
}
