//! Host callbacks that record what they receive.
//!
//! # Panics
//!
//! Methods panic if an internal lock is poisoned.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::panel::{ColorScheme, FactAction};
use crate::ports::PanelHost;

/// Panel host for tests and headless embedding.
#[derive(Debug, Default)]
pub struct RecordingHost {
    response_ends: AtomicUsize,
    themes: Mutex<Vec<ColorScheme>>,
    facts: Mutex<Vec<FactAction>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn response_end_count(&self) -> usize {
        self.response_ends.load(Ordering::SeqCst)
    }

    pub fn themes(&self) -> Vec<ColorScheme> {
        self.themes.lock().expect("host themes lock poisoned").clone()
    }

    pub fn facts(&self) -> Vec<FactAction> {
        self.facts.lock().expect("host facts lock poisoned").clone()
    }
}

#[async_trait]
impl PanelHost for RecordingHost {
    fn on_response_end(&self) {
        self.response_ends.fetch_add(1, Ordering::SeqCst);
    }

    fn on_theme_request(&self, scheme: ColorScheme) {
        self.themes.lock().expect("host themes lock poisoned").push(scheme);
    }

    async fn on_fact(&self, action: FactAction) {
        self.facts.lock().expect("host facts lock poisoned").push(action);
    }
}
