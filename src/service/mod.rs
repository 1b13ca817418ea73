//! Answering / Email Service Module
//!
//! Wire types and the client trait for the remote question-answering and
//! email-delivery endpoints.

pub mod http;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use http::HttpAnswerService;

/// Body of `POST /ask`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub prompt: String,
}

/// Body returned by `/ask`: either `response` or `error`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AskReply {
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
            error: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            response: None,
            error: Some(text.into()),
        }
    }
}

/// Body of `POST /send-email`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub to: String,
    pub prompt: String,
    pub response: String,
}

/// Body returned by `/send-email`; a missing `success` counts as failure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Trait for answering service clients.
///
/// An `Err` means the exchange itself failed (unreachable, malformed body);
/// server-side refusals arrive as `Ok` replies carrying `error`.
#[async_trait]
pub trait AnswerService: Send + Sync + std::fmt::Debug {
    async fn ask(&self, request: &AskRequest) -> Result<AskReply>;

    async fn send_email(&self, request: &EmailRequest) -> Result<EmailReply>;

    /// Get the service name
    fn name(&self) -> &str;
}
