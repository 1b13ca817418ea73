//! Study Buddy Launcher - GUI Application
//!
//! Run with: cargo run --bin studybuddy-launcher

use iced::application;
use tracing_subscriber::EnvFilter;

use studybuddy::gui::StudyBuddyApp;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    application(StudyBuddyApp::title, StudyBuddyApp::update, StudyBuddyApp::view)
        .theme(StudyBuddyApp::theme)
        .window_size((720.0, 760.0))
        .run_with(StudyBuddyApp::new)
}
