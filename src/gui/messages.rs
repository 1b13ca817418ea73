//! Message types for the Study Buddy GUI

use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::text_editor;

use crate::dispatcher::AskOutcome;
use crate::session::Session;
use crate::state::EmailStatus;

/// Messages that drive the application
#[derive(Debug, Clone)]
pub enum Message {
    SessionReady(Arc<Session>),

    // Prompt
    PromptEdited(text_editor::Action),
    SpeakPressed,
    Transcribed(Result<Option<String>, String>),
    OpenPdfPressed,
    PdfPicked(Option<PathBuf>),
    PdfLoaded(Result<(), String>),

    // Ask
    SubmitPressed,
    Answered(Result<AskOutcome, String>),

    // Response
    ReadResponsePressed,
    SpeechFinished,

    // Email
    EmailChanged(String),
    SendEmailPressed,
    EmailFinished(Result<EmailStatus, String>),

    DismissNotice,
}
