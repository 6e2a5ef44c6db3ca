use crate::domain::model::OrderPayload;
use crate::domain::ports::{LeadSink, QuoteSettings};
use crate::utils::error::{QuoteError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;

/// Posts order payloads as JSON to a fixed URL. No retries.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_settings<C: QuoteSettings + ?Sized>(settings: &C) -> Result<Self> {
        Self::new(
            settings.webhook_url(),
            Duration::from_secs(settings.timeout_seconds()),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LeadSink for WebhookSink {
    async fn submit(&self, payload: &OrderPayload) -> Result<()> {
        tracing::debug!("POST {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("Webhook transport error: {}", e);
                QuoteError::SubmissionFailed {
                    status: None,
                    message: if e.is_timeout() {
                        format!("timed out posting to {}", self.url)
                    } else {
                        e.to_string()
                    },
                }
            })?;

        let status = response.status();
        tracing::debug!("Webhook response status: {}", status);

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(QuoteError::SubmissionFailed {
            status: Some(status.as_u16()),
            message: if body.is_empty() {
                status.to_string()
            } else {
                body
            },
        })
    }
}
