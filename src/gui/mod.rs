//! GUI module using iced
//!
//! The presentation shell: prompt editor, submit/speak/PDF controls, the
//! response panel and the email form.

use iced::Task;
use std::path::PathBuf;
use tracing::{info, warn};

pub mod app;
pub mod messages;
pub mod view;

pub use app::StudyBuddyApp;
pub use messages::Message;

async fn pick_pdf() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Open PDF")
        .add_filter("PDF", &["pdf"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

impl StudyBuddyApp {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SessionReady(session) => {
                info!("✅ Session ready");
                // Keep whatever was typed while the engines were loading
                let typed = app::editor_text(&self.editor);
                if let Err(e) = session.edit_prompt(typed) {
                    warn!("⚠️ Prompt edit lost: {}", e);
                }
                if let Err(e) = session.set_email_address(self.email_input.clone()) {
                    warn!("⚠️ Email address lost: {}", e);
                }
                self.session = Some(session);
                self.refresh(false);
            }
            Message::PromptEdited(action) => {
                let is_edit = action.is_edit();
                self.editor.perform(action);
                if is_edit {
                    if let Some(session) = &self.session {
                        if let Err(e) = session.edit_prompt(app::editor_text(&self.editor)) {
                            warn!("⚠️ Prompt edit lost: {}", e);
                        }
                    }
                }
            }
            Message::SpeakPressed => {
                let Some(session) = self.session.clone() else {
                    return Task::none();
                };
                if !session.can_listen() {
                    self.notice = Some(crate::BuddyError::SpeechUnavailable.to_string());
                    return Task::none();
                }
                self.listening = true;
                return Task::perform(
                    async move { session.capture_speech().await.map_err(|e| e.to_string()) },
                    Message::Transcribed,
                );
            }
            Message::Transcribed(result) => {
                self.listening = false;
                match result {
                    Ok(Some(_)) => self.refresh(true),
                    Ok(None) => info!("🔇 No speech recognized"),
                    Err(e) => self.notice = Some(e),
                }
            }
            Message::OpenPdfPressed => {
                return Task::perform(pick_pdf(), Message::PdfPicked);
            }
            Message::PdfPicked(Some(path)) => {
                let Some(session) = self.session.clone() else {
                    return Task::none();
                };
                return Task::perform(
                    async move {
                        session
                            .load_document(&path)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::PdfLoaded,
                );
            }
            Message::PdfPicked(None) => {}
            Message::PdfLoaded(result) => {
                if let Err(e) = result {
                    self.notice = Some(e);
                }
                self.refresh(true);
            }
            Message::SubmitPressed => {
                if !self.can_submit() {
                    return Task::none();
                }
                let Some(session) = self.session.clone() else {
                    return Task::none();
                };
                self.submitting = true;
                return Task::perform(
                    async move { session.submit().await.map_err(|e| e.to_string()) },
                    Message::Answered,
                );
            }
            Message::Answered(result) => {
                self.submitting = false;
                if let Err(e) = result {
                    self.notice = Some(e);
                }
                self.refresh(false);
            }
            Message::ReadResponsePressed => {
                let Some(session) = self.session.clone() else {
                    return Task::none();
                };
                return Task::perform(
                    async move {
                        if let Err(e) = session.read_response().await {
                            warn!("⚠️ Read response failed: {}", e);
                        }
                    },
                    |_| Message::SpeechFinished,
                );
            }
            Message::SpeechFinished => {}
            Message::EmailChanged(address) => {
                if let Some(session) = &self.session {
                    if let Err(e) = session.set_email_address(address.clone()) {
                        warn!("⚠️ Email address lost: {}", e);
                    }
                }
                self.email_input = address;
                self.refresh(false);
            }
            Message::SendEmailPressed => {
                if !self.snapshot.can_send_email() {
                    return Task::none();
                }
                let Some(session) = self.session.clone() else {
                    return Task::none();
                };
                self.email_status = crate::EmailStatus::Sending.to_string();
                return Task::perform(
                    async move { session.send_email().await.map_err(|e| e.to_string()) },
                    Message::EmailFinished,
                );
            }
            Message::EmailFinished(result) => {
                self.email_status = match result {
                    Ok(status) => status.to_string(),
                    Err(e) => e,
                };
                self.refresh(false);
            }
            Message::DismissNotice => {
                self.notice = None;
            }
        }
        Task::none()
    }
}
