use color_eyre::eyre::{Result, eyre};
use reqwest::Client as HttpClient;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use clubreg_adapters::{
    Argon2CredentialHasher, HashMapAccountStore, HashMapOtpStore, JwtConfig, JwtTokenIssuer,
    PostmarkEmailClient, config::Settings,
};
use clubreg_core::Email;
use clubreg_service::RegistrationService;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    init_tracing()?;

    let settings = Settings::load()?;

    let account_store = HashMapAccountStore::new(Argon2CredentialHasher::new());
    let otp_store = HashMapOtpStore::new();

    let token_issuer = JwtTokenIssuer::new(JwtConfig {
        jwt_secret: settings.auth.jwt_secret.clone(),
        token_ttl_in_seconds: settings.auth.token_ttl_in_seconds,
    });

    let http_client = HttpClient::builder()
        .timeout(std::time::Duration::from_millis(
            settings.email_client.timeout_in_millis,
        ))
        .build()?;

    let sender = Email::try_from(secrecy::Secret::new(settings.email_client.sender.clone()))
        .map_err(|e| eyre!("invalid sender address: {e}"))?;

    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        sender,
        settings.email_client.auth_token.clone(),
        http_client,
    );

    let service = RegistrationService::new(account_store, otp_store, email_client, token_issuer);

    let listener = tokio::net::TcpListener::bind(&settings.server.address).await?;
    tracing::info!("Registration service listening on {}", settings.server.address);

    service
        .run(listener, settings.server.allowed_origins.clone())
        .await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
