use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use clubreg_core::{Email, EmailClient, EmailClientError, OtpCode};

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";
const SUBJECT: &str = "Your verification code";

/// Postmark-backed code delivery. Interchangeable: any transport satisfying
/// `EmailClient` will do, the orchestrator only sees the port.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending one-time code email", skip_all)]
    async fn send_otp(&self, recipient: &Email, code: &OtpCode) -> Result<(), EmailClientError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| EmailClientError::Delivery(e.to_string()))?;
        let url = base
            .join("/email")
            .map_err(|e| EmailClientError::Delivery(e.to_string()))?;

        let body = format!(
            "Your verification code is {}. It expires in 10 minutes.",
            code.as_str()
        );

        let request_body = SendEmailRequest {
            from: self.sender.expose(),
            to: recipient.expose(),
            subject: SUBJECT,
            html_body: &body,
            text_body: &body,
            message_stream: MESSAGE_STREAM,
        };

        let request = self
            .http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|e| EmailClientError::Delivery(e.to_string()))?
            .error_for_status()
            .map_err(|e| EmailClientError::Delivery(e.to_string()))?;

        Ok(())
    }
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}
