//! Main application state for the Study Buddy GUI

use iced::widget::text_editor;
use iced::Task;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::session::Session;
use crate::state::SessionState;

use super::messages::Message;

/// Main application state
pub struct StudyBuddyApp {
    /// Workflow session (None until engines are initialized)
    pub(crate) session: Option<Arc<Session>>,
    /// Prompt editor contents
    pub(crate) editor: text_editor::Content,
    /// Last state copied out of the session
    pub(crate) snapshot: SessionState,
    /// Email address field
    pub(crate) email_input: String,
    /// Email status line
    pub(crate) email_status: String,
    /// Submit clicked, answer not yet back
    pub(crate) submitting: bool,
    /// Microphone capture in progress
    pub(crate) listening: bool,
    /// Blocking notice (unsupported feature, bad file)
    pub(crate) notice: Option<String>,
}

impl Default for StudyBuddyApp {
    fn default() -> Self {
        Self {
            session: None,
            editor: text_editor::Content::new(),
            snapshot: SessionState::default(),
            email_input: String::new(),
            email_status: String::new(),
            submitting: false,
            listening: false,
            notice: None,
        }
    }
}

impl StudyBuddyApp {
    /// Create the app and start engine initialization in the background
    pub fn new() -> (Self, Task<Message>) {
        let config = Config::load().unwrap_or_else(|e| {
            warn!("⚠️ Could not load config ({}), using defaults", e);
            Config::default()
        });

        let app = Self::default();

        info!("🚀 Study Buddy launcher starting");
        let init_task = Task::perform(
            async move { Arc::new(Session::from_config(&config).await) },
            Message::SessionReady,
        );

        (app, init_task)
    }

    /// Application title
    pub fn title(&self) -> String {
        "Study Buddy".to_string()
    }

    /// Application theme
    pub fn theme(&self) -> iced::Theme {
        iced::Theme::Dark
    }

    /// Copy the session state into the view; optionally reload the editor
    pub(crate) fn refresh(&mut self, reload_prompt: bool) {
        let Some(session) = &self.session else {
            return;
        };
        match session.snapshot() {
            Ok(snapshot) => {
                if reload_prompt {
                    self.editor = text_editor::Content::with_text(snapshot.prompt());
                }
                self.snapshot = snapshot;
            }
            Err(e) => warn!("⚠️ Could not read session state: {}", e),
        }
    }

    pub(crate) fn can_submit(&self) -> bool {
        self.session.is_some() && !self.submitting && self.snapshot.request().can_submit()
    }

    pub(crate) fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Processing..."
        } else {
            self.snapshot.request().submit_label()
        }
    }
}

/// Editor text as the prompt.
///
/// Rebuilt from the editor's lines: `Content::text` always appends a final
/// newline, which would hide whether the user typed one.
pub(crate) fn editor_text(content: &text_editor::Content) -> String {
    content
        .lines()
        .map(|line| String::from(&*line))
        .collect::<Vec<_>>()
        .join("\n")
}
