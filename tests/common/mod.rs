#![allow(dead_code)]

pub mod mock_asr;
pub mod mock_service;
pub mod mock_tts;
pub mod stub_server;

use std::sync::Arc;

use mock_asr::MockAsr;
use mock_service::MockService;
use mock_tts::MockTts;
use studybuddy::Session;

/// A session wired to mocks, with handles kept for assertions
pub struct TestContext {
    pub session: Session,
    pub service: Arc<MockService>,
    pub tts: Arc<MockTts>,
}

impl TestContext {
    pub fn new(service: MockService) -> Self {
        Self::with_recognizer(service, None)
    }

    pub fn with_recognizer(service: MockService, recognizer: Option<MockAsr>) -> Self {
        let service = Arc::new(service);
        let tts = Arc::new(MockTts::new());

        let session = Session::builder(service.clone())
            .tts(Some(tts.clone() as Arc<dyn studybuddy::tts::TtsEngine>))
            .recognizer(recognizer.map(|r| Arc::new(r) as Arc<dyn studybuddy::asr::SpeechRecognizer>))
            .build();

        Self {
            session,
            service,
            tts,
        }
    }

    pub fn prompt(&self) -> String {
        self.session.snapshot().unwrap().prompt().to_string()
    }

    pub fn response(&self) -> String {
        self.session.snapshot().unwrap().response().to_string()
    }
}
