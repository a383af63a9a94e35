use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};

use clubreg_core::{CredentialHasher, CredentialHasherError, Password};

/// Argon2id credential hasher producing PHC-format strings.
///
/// Each `hash` call draws a fresh salt, so equal passwords never produce
/// equal hashes.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self
    }

    fn argon2(&self) -> Result<Argon2<'static>, CredentialHasherError> {
        let params = Params::new(15_000, 2, 1, None)
            .map_err(|e| CredentialHasherError::Hash(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &Password) -> Result<Secret<String>, CredentialHasherError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
            .map_err(|e| CredentialHasherError::Hash(e.to_string()))?
            .to_string();
        Ok(Secret::new(hash))
    }

    fn verify(&self, password: &Password, hash: &Secret<String>) -> bool {
        // The PHC string carries its own parameters, so a default verifier is
        // enough; a malformed hash is simply a failed verification.
        let Ok(parsed) = PasswordHash::new(hash.expose_secret()) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_ref().expose_secret().as_bytes(), &parsed)
            .is_ok()
    }
}
