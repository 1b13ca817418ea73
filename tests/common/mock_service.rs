//! Mock answering service
//!
//! Replies with canned bodies and records every request.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use studybuddy::service::{AnswerService, AskReply, AskRequest, EmailReply, EmailRequest};

#[derive(Debug, Clone)]
pub enum Canned<T> {
    Reply(T),
    Unreachable,
}

#[derive(Debug)]
pub struct MockService {
    pub ask_reply: Canned<AskReply>,
    pub email_reply: Canned<EmailReply>,
    pub asked: Arc<Mutex<Vec<AskRequest>>>,
    pub emailed: Arc<Mutex<Vec<EmailRequest>>>,
    pub delay: Duration,
}

impl MockService {
    pub fn new(ask_reply: Canned<AskReply>) -> Self {
        Self {
            ask_reply,
            email_reply: Canned::Reply(EmailReply {
                success: true,
                error: None,
            }),
            asked: Arc::new(Mutex::new(Vec::new())),
            emailed: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::new(Canned::Reply(AskReply::answer(text)))
    }

    pub fn failing(error: &str) -> Self {
        Self::new(Canned::Reply(AskReply::error(error)))
    }

    pub fn unreachable() -> Self {
        Self::new(Canned::Unreachable)
    }

    pub fn with_email_reply(mut self, reply: Canned<EmailReply>) -> Self {
        self.email_reply = reply;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn ask_count(&self) -> usize {
        self.asked.lock().unwrap().len()
    }

    pub fn email_count(&self) -> usize {
        self.emailed.lock().unwrap().len()
    }
}

#[async_trait]
impl AnswerService for MockService {
    async fn ask(&self, request: &AskRequest) -> Result<AskReply> {
        self.asked.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.ask_reply {
            Canned::Reply(reply) => Ok(reply.clone()),
            Canned::Unreachable => Err(anyhow::anyhow!("connection refused")),
        }
    }

    async fn send_email(&self, request: &EmailRequest) -> Result<EmailReply> {
        self.emailed.lock().unwrap().push(request.clone());
        match &self.email_reply {
            Canned::Reply(reply) => Ok(reply.clone()),
            Canned::Unreachable => Err(anyhow::anyhow!("connection refused")),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
