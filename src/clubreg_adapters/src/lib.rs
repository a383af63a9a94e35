pub mod auth;
pub mod config;
pub mod email;
pub mod http;
pub mod persistence;
pub mod security;

pub use auth::{JwtConfig, JwtTokenIssuer};
pub use email::{MockEmailClient, PostmarkEmailClient};
pub use persistence::{HashMapAccountStore, HashMapOtpStore};
pub use security::Argon2CredentialHasher;
