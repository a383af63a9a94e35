pub mod forgot_password;
pub mod login;
pub mod resend_otp;
pub mod reset_password;
pub mod signup;
pub mod verify_otp;

#[cfg(test)]
pub(crate) mod test_support;
