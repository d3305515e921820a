//! Shared helpers for the dashboard integration tests.
//!
//! Tests run the real [`myswipe_dashboard`] clients against a wiremock
//! double standing in for both the MySwipe backend and the object
//! storage service (one `MockServer` plays both roles; the signed
//! destinations it hands out point back at itself).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use myswipe_dashboard::api::ApiClient;
use myswipe_dashboard::form::draft::ProductDraft;
use myswipe_dashboard::form::media::{InMemoryPreviews, PreviewAllocator, StagedFile};
use myswipe_dashboard::form::submit::Notifier;
use myswipe_dashboard::storage::StorageClient;

/// Notifier that records every message for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<(NotifyLevel, String)>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Success,
    Error,
    Info,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded event.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<(NotifyLevel, String)> {
        self.events.lock().expect("events lock").clone()
    }

    #[must_use]
    pub fn successes(&self) -> Vec<String> {
        self.of_level(NotifyLevel::Success)
    }

    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.of_level(NotifyLevel::Error)
    }

    fn of_level(&self, level: NotifyLevel) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn record(&self, level: NotifyLevel, message: &str) {
        self.events
            .lock()
            .expect("events lock")
            .push((level, message.to_string()));
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.record(NotifyLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.record(NotifyLevel::Error, message);
    }

    fn info(&self, message: &str) {
        self.record(NotifyLevel::Info, message);
    }
}

/// API client pointed at the mock server, with a short timeout so
/// failure tests stay fast.
#[must_use]
pub fn test_api_client(base_url: &str) -> ApiClient {
    ApiClient::with_base_url(base_url, Duration::from_secs(5))
        .expect("client construction should not fail")
}

/// Storage client pointed at the mock server with tight attempt
/// timeouts.
#[must_use]
pub fn test_storage_client(base_url: &str) -> StorageClient {
    let config = myswipe_dashboard::config::StorageConfig {
        base_url: base_url.to_string(),
        anon_key: None,
        attempt_timeouts: [
            Duration::from_secs(5),
            Duration::from_secs(5),
            Duration::from_secs(5),
        ],
    };
    StorageClient::new(&config).expect("storage client construction should not fail")
}

/// Shared preview allocator plus a blank create draft using it.
#[must_use]
pub fn blank_draft() -> (Arc<InMemoryPreviews>, ProductDraft) {
    let previews = Arc::new(InMemoryPreviews::new());
    let draft = ProductDraft::new(Arc::clone(&previews) as Arc<dyn PreviewAllocator>);
    (previews, draft)
}

/// A draft that passes validation for create mode.
#[must_use]
pub fn valid_create_draft() -> (Arc<InMemoryPreviews>, ProductDraft) {
    let (previews, mut draft) = blank_draft();
    draft.title = "Linen shirt".to_string();
    draft.description = "Breathable summer shirt".to_string();
    draft.category = "Tops (T-Shirts, Shirts, Blouses, Sweaters, Hoodies)".to_string();
    draft.brand = "Ekkamai Vintage".to_string();
    draft.price = 590.0;
    draft.sku = "LS-01".to_string();
    draft.stock = 12;
    draft.images.add_files(vec![staged_image("front.jpg")]);
    (previews, draft)
}

/// A staged image file payload.
#[must_use]
pub fn staged_image(name: &str) -> StagedFile {
    StagedFile {
        name: name.to_string(),
        content_type: "image/jpeg".to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    }
}

/// A staged video file payload.
#[must_use]
pub fn staged_video(name: &str) -> StagedFile {
    StagedFile {
        name: name.to_string(),
        content_type: "video/mp4".to_string(),
        bytes: vec![0x00, 0x00, 0x00, 0x18],
    }
}
