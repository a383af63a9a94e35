pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountId, AccountView, NewAccount},
    club_name::{ClubName, ClubNameError},
    email::{Email, EmailError},
    otp_code::{OTP_VALIDITY_MINUTES, OtpCode, OtpCodeError},
    password::{Password, PasswordError},
};

pub use ports::{
    repositories::{AccountStore, AccountStoreError, OtpStore, OtpStoreError},
    services::{
        CredentialHasher, CredentialHasherError, EmailClient, EmailClientError,
        SESSION_TOKEN_TTL_SECONDS, TokenIssuer, TokenIssuerError,
    },
};
