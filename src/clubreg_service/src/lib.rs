pub mod trace;

use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::post,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use clubreg_adapters::{
    config::AllowedOrigins,
    http::routes::{forgot_password, login, resend_otp, reset_password, signup, verify_otp},
};
use clubreg_core::{AccountStore, EmailClient, OtpStore, TokenIssuer};

use crate::trace::{make_span_with_request_id, on_request, on_response};

/// The registration service: all six auth routes wired over the injected
/// collaborators.
pub struct RegistrationService {
    router: Router,
}

impl RegistrationService {
    /// Wire the router.
    ///
    /// Collaborators are shared via `Clone` (the stores are `Arc`-backed);
    /// each route receives exactly the state it needs and nothing more.
    pub fn new<A, O, E, T>(
        account_store: A,
        otp_store: O,
        email_client: E,
        token_issuer: T,
    ) -> Self
    where
        A: AccountStore + Clone + 'static,
        O: OtpStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
        T: TokenIssuer + Clone + 'static,
    {
        let router = Router::new()
            // Signup creates the account, issues the code and dispatches it
            .route("/signup", post(signup::<A, O, E>))
            .with_state((
                account_store.clone(),
                otp_store.clone(),
                email_client.clone(),
            ))
            // Verify consumes the code and opens a session
            .route("/verify-otp", post(verify_otp::<A, O, T>))
            .with_state((
                account_store.clone(),
                otp_store.clone(),
                token_issuer.clone(),
            ))
            // Resend supersedes the pending code
            .route("/resend-otp", post(resend_otp::<A, O, E>))
            .with_state((
                account_store.clone(),
                otp_store.clone(),
                email_client.clone(),
            ))
            // Login needs no OTP machinery
            .route("/login", post(login::<A, T>))
            .with_state((account_store.clone(), token_issuer))
            // Forgot password reuses the OTP primitive
            .route("/forgot-password", post(forgot_password::<A, O, E>))
            .with_state((account_store.clone(), otp_store.clone(), email_client))
            // Reset consumes the forgot-password code
            .route("/reset-password", post(reset_password::<A, O>))
            .with_state((account_store, otp_store));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router, optionally restricting browser origins.
    pub fn into_router(self, allowed_origins: Option<AllowedOrigins>) -> Router {
        let service = self.with_trace_layer();
        match allowed_origins {
            Some(allowed_origins) => {
                let cors = CorsLayer::new()
                    .allow_methods([Method::GET, Method::POST])
                    .allow_credentials(true)
                    .allow_origin(AllowOrigin::predicate(
                        move |origin: &HeaderValue, _request_parts: &request::Parts| {
                            allowed_origins.contains(origin)
                        },
                    ));
                service.router.layer(cors)
            }
            None => service.router,
        }
    }

    /// Serve until the listener closes.
    pub async fn run(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> std::io::Result<()> {
        let router = self.into_router(allowed_origins);
        axum::serve(listener, router).await
    }
}
