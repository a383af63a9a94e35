//! Axum route handlers for the core auth surface.
//!
//! Each handler parses the request body into domain types, runs the matching
//! use case, and converts the outcome through [`error::ApiError`].

pub mod error;
pub mod forgot_password;
pub mod login;
pub mod resend_otp;
pub mod reset_password;
pub mod signup;
pub mod verify_otp;

pub use error::{ApiError, ErrorResponse};
pub use forgot_password::forgot_password;
pub use login::{TokenResponse, login};
pub use resend_otp::resend_otp;
pub use reset_password::reset_password;
pub use signup::signup;
pub use verify_otp::verify_otp;
