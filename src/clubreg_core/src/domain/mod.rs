pub mod account;
pub mod club_name;
pub mod email;
pub mod otp_code;
pub mod password;
