use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// One outbound email as the Resend API expects it.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("{0}")]
    Api(String),
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    message: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Returns the provider's id for the delivered email.
    async fn send(&self, email: OutgoingEmail) -> Result<String, MailError>;
}

pub struct ResendClient {
    client: Client,
    api_key: String,
}

impl ResendClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, email: OutgoingEmail) -> Result<String, MailError> {
        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<ApiErrorResponse>().await {
                Ok(body) => body.message,
                Err(_) => format!("Resend antwortete mit Status {}", status),
            };
            return Err(MailError::Api(message));
        }

        let sent: SendResponse = response.json().await?;
        Ok(sent.id)
    }
}
