//! Outbound notification mail for the contact form, sent through Brevo's
//! transactional email API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::contact::{render_email_html, ContactMessage};

pub const DEFAULT_API_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("{0} is not set")]
    MissingSecret(&'static str),
    #[error("email request failed: {0}")]
    Transport(String),
    #[error("email provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Settings needed to talk to the provider. The API key and the recipient are
/// required; everything else has a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub recipient_email: String,
    pub recipient_name: String,
    pub sender_email: String,
    pub sender_name: String,
}

impl EmailConfig {
    pub fn from_env() -> Result<Self, EmailError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, EmailError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let api_key = get("BREVO_API_KEY").ok_or(EmailError::MissingSecret("BREVO_API_KEY"))?;
        let recipient_email =
            get("RECIPIENT_EMAIL").ok_or(EmailError::MissingSecret("RECIPIENT_EMAIL"))?;
        Ok(Self {
            api_url: get("BREVO_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key,
            recipient_name: get("RECIPIENT_NAME").unwrap_or_else(|| "Site Owner".to_string()),
            sender_email: get("SENDER_EMAIL").unwrap_or_else(|| recipient_email.clone()),
            sender_name: get("SENDER_NAME").unwrap_or_else(|| "Portfolio Contact Form".to_string()),
            recipient_email,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailHeaders {
    pub charset: String,
}

/// JSON body of `POST /v3/smtp/email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub sender: Mailbox,
    pub reply_to: Mailbox,
    pub to: Vec<Mailbox>,
    pub subject: String,
    pub html_content: String,
    pub headers: MailHeaders,
}

impl EmailRequest {
    pub fn new(config: &EmailConfig, msg: &ContactMessage) -> Self {
        Self {
            sender: Mailbox {
                email: config.sender_email.clone(),
                name: config.sender_name.clone(),
            },
            reply_to: Mailbox {
                email: msg.email.trim().to_string(),
                name: msg.name.trim().to_string(),
            },
            to: vec![Mailbox {
                email: config.recipient_email.clone(),
                name: config.recipient_name.clone(),
            }],
            subject: format!("Contact Form: {}", msg.subject.trim()),
            html_content: render_email_html(msg),
            headers: MailHeaders {
                charset: "utf-8".to_string(),
            },
        }
    }
}

/// Error body returned by the provider on failure.
#[derive(Debug, Default, Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(feature = "ssr")]
#[derive(Debug, Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    config: EmailConfig,
}

#[cfg(feature = "ssr")]
impl EmailClient {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub async fn send(&self, msg: &ContactMessage) -> Result<(), EmailError> {
        let body = EmailRequest::new(&self.config, msg);
        let response = self
            .http
            .post(&self.config.api_url)
            .header("accept", "application/json")
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "contact email sent");
            return Ok(());
        }
        let text = response.text().await.unwrap_or_default();
        let err = EmailError::Rejected {
            status: status.as_u16(),
            message: provider_message(&text),
        };
        tracing::warn!("{err}");
        Err(err)
    }
}

fn provider_message(body: &str) -> String {
    serde_json::from_str::<ProviderError>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| "Unknown error".to_string())
}
