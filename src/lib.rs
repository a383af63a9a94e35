//! # Clubreg - Club Registration Service Library
//!
//! This is a facade crate that re-exports all public APIs from the club
//! registration service components. Use this crate to get access to the whole
//! signup and verification stack in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! clubreg = { path = "../clubreg" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `ClubName`, `OtpCode`, `Account`, etc.
//! - **Port traits**: `AccountStore`, `OtpStore`, `TokenIssuer`, `EmailClient`, `CredentialHasher`
//! - **Use cases**: `SignupUseCase`, `VerifyOtpUseCase`, `LoginUseCase`, etc.
//! - **Adapters**: `HashMapAccountStore`, `HashMapOtpStore`, `JwtTokenIssuer`, `PostmarkEmailClient`, etc.
//! - **Service**: `RegistrationService` - The main entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use clubreg_core::*;
}

// Re-export most commonly used core types at the root level
pub use clubreg_core::{
    Account, AccountId, AccountView, ClubName, ClubNameError, Email, EmailError, NewAccount,
    OtpCode, OtpCodeError, Password, PasswordError,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use clubreg_core::{
        AccountStore, AccountStoreError, CredentialHasher, CredentialHasherError, EmailClient,
        EmailClientError, OtpStore, OtpStoreError, TokenIssuer, TokenIssuerError,
    };
}

// Re-export port traits at root level
pub use clubreg_core::{
    AccountStore, AccountStoreError, CredentialHasher, EmailClient, OtpStore, TokenIssuer,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use clubreg_application::*;
}

// Re-export use cases at root level
pub use clubreg_application::{
    ForgotPasswordUseCase, LoginUseCase, ResendOtpUseCase, ResetPasswordUseCase, SignupUseCase,
    VerifyOtpUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use clubreg_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use clubreg_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use clubreg_adapters::email::*;
    }

    /// JWT session token utilities
    pub mod auth {
        pub use clubreg_adapters::auth::*;
    }

    /// Password hashing
    pub mod security {
        pub use clubreg_adapters::security::*;
    }

    /// Configuration
    pub mod config {
        pub use clubreg_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use clubreg_adapters::{
    auth::{JwtConfig, JwtTokenIssuer},
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{HashMapAccountStore, HashMapOtpStore},
    security::Argon2CredentialHasher,
};

// ============================================================================
// Registration Service (Main Entry Point)
// ============================================================================

/// Main registration service
pub use clubreg_service::RegistrationService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
