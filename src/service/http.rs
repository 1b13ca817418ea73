//! HTTP client for the answering service

use super::{AnswerService, AskReply, AskRequest, EmailReply, EmailRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// JSON-over-HTTP client. No timeout, no retry.
#[derive(Debug, Clone)]
pub struct HttpAnswerService {
    client: Client,
    base_url: String,
}

impl HttpAnswerService {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` as JSON and decode the reply body whatever the status code
    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: serde::Serialize + Sync + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        let body_text = response.text().await?;
        debug!("📨 {} -> {} ({} bytes)", url, status, body_text.len());

        serde_json::from_str(&body_text)
            .with_context(|| format!("Malformed reply from {} ({})", url, status))
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn ask(&self, request: &AskRequest) -> Result<AskReply> {
        self.post("/ask", request).await
    }

    async fn send_email(&self, request: &EmailRequest) -> Result<EmailReply> {
        self.post("/send-email", request).await
    }

    fn name(&self) -> &str {
        "http"
    }
}
