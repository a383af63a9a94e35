pub mod use_cases;

pub use use_cases::{
    forgot_password::{ForgotPasswordError, ForgotPasswordUseCase},
    login::{LoginError, LoginUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    resend_otp::{ResendOtpError, ResendOtpUseCase},
    signup::{SignupError, SignupUseCase},
    verify_otp::{VerifyOtpError, VerifyOtpUseCase},
};
