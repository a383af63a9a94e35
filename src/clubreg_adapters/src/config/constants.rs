pub mod env {
    pub const JWT_SECRET_ENV_VAR: &str = "CLUBREG_AUTH__JWT_SECRET";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "CLUBREG_EMAIL_CLIENT__AUTH_TOKEN";
    pub const SERVER_ADDRESS_ENV_VAR: &str = "CLUBREG_SERVER__ADDRESS";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "CLUBREG_SERVER__ALLOWED_ORIGINS";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";

    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "registrations@clubreg.dev";
        pub const TIMEOUT_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod email_client {
        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT_MILLIS: u64 = 200;
    }
}
