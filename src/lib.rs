//! Study Buddy Library
//!
//! Core modules for the Study Buddy question-answering client: input
//! normalization (typed, spoken, PDF), the query dispatcher, and the
//! response fan-out (text, speech, email).

pub mod asr;
pub mod audio;
pub mod config;
pub mod dispatcher;
pub mod document;
pub mod error;
pub mod fanout;
pub mod gui;
pub mod input;
pub mod service;
pub mod session;
pub mod state;
pub mod tts;

pub use dispatcher::AskOutcome;
pub use error::{BuddyError, BuddyResult};
pub use session::{Session, SessionBuilder};
pub use state::{EmailStatus, RequestState, SessionState};
