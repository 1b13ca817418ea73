//! Session state container
//!
//! Holds the prompt, the response, the request lifecycle and the email
//! target. Each field is mutated through a single method so the workflow
//! invariants can be checked without any UI attached.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{BuddyError, BuddyResult};

/// State shared between the shells, the dispatcher and the fan-out sinks
pub type SharedState = Arc<Mutex<SessionState>>;

/// Lifecycle of the Ask control
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    /// Last local operation failed; submitting is still allowed
    Error(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn can_submit(&self) -> bool {
        !self.is_pending()
    }

    /// Label shown on the submit control
    pub fn submit_label(&self) -> &'static str {
        if self.is_pending() {
            "Processing..."
        } else {
            "Submit"
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Why an email send did not go through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailFailure {
    /// The service answered but refused
    Server(String),
    /// The service could not be reached or answered garbage
    Network,
}

/// Progress of the most recent email send
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmailStatus {
    #[default]
    Unset,
    Sending,
    Sent,
    Failed(EmailFailure),
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailStatus::Unset => Ok(()),
            EmailStatus::Sending => write!(f, "Sending..."),
            EmailStatus::Sent => write!(f, "📩 Email sent!"),
            EmailStatus::Failed(EmailFailure::Server(reason)) => write!(f, "❌ Failed: {}", reason),
            EmailStatus::Failed(EmailFailure::Network) => write!(f, "❌ Network error."),
        }
    }
}

/// Recipient address plus the status of the last send attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailTarget {
    pub address: String,
    pub status: EmailStatus,
}

/// Everything a session knows, for the lifetime of the session only
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    prompt: String,
    response: String,
    request: RequestState,
    email: EmailTarget,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedState {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn has_response(&self) -> bool {
        !self.response.is_empty()
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn email(&self) -> &EmailTarget {
        &self.email
    }

    // --- Prompt ---

    /// Direct edit: the editor contents become the prompt verbatim
    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.prompt = text.into();
    }

    /// Speech capture: append one transcript segment
    pub fn append_transcript(&mut self, transcript: &str) {
        self.prompt = crate::input::append_transcript(&self.prompt, transcript);
    }

    /// Document extraction: discard the old prompt entirely
    pub fn replace_prompt(&mut self, text: String) {
        self.prompt = text;
    }

    // --- Request lifecycle ---

    /// Idle/Error -> Pending. Clears the previous response.
    pub fn begin_request(&mut self) -> BuddyResult<()> {
        if self.request.is_pending() {
            return Err(BuddyError::Busy);
        }
        self.request = RequestState::Pending;
        self.response.clear();
        Ok(())
    }

    /// Pending -> Idle with the text to display
    pub fn finish_request(&mut self, displayed: String) {
        self.response = displayed;
        self.request = RequestState::Idle;
    }

    /// Record a failed local operation. Ignored while a request is pending.
    pub fn fail(&mut self, message: impl Into<String>) {
        if !self.request.is_pending() {
            self.request = RequestState::Error(message.into());
        }
    }

    /// Error -> Idle
    pub fn clear_error(&mut self) {
        if matches!(self.request, RequestState::Error(_)) {
            self.request = RequestState::Idle;
        }
    }

    // --- Email ---

    pub fn set_email_address(&mut self, address: impl Into<String>) {
        self.email.address = address.into();
    }

    pub fn can_send_email(&self) -> bool {
        self.has_response() && !self.email.address.is_empty()
    }

    /// Start a send; returns the (to, prompt, response) triple to post
    pub fn begin_email(&mut self) -> BuddyResult<(String, String, String)> {
        if !self.can_send_email() {
            return Err(BuddyError::EmailUnavailable);
        }
        self.email.status = EmailStatus::Sending;
        Ok((
            self.email.address.clone(),
            self.prompt.clone(),
            self.response.clone(),
        ))
    }

    pub fn finish_email(&mut self, status: EmailStatus) {
        self.email.status = status;
    }
}
