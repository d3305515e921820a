//! Staged media ahead of submission.
//!
//! While a draft is open, added images and videos live only in this
//! buffer: bytes for the eventual upload, an acquired preview resource
//! for display, and a best-effort embedded (base64) copy mirroring what
//! the upload step will send.
//!
//! # Preview handles
//!
//! Preview resources are acquired from a [`PreviewAllocator`] (the
//! object-URL analog of the browser build) and MUST be released when an
//! item is removed, when the buffer is discarded on cancel, and when the
//! form resets after a successful create. An unreleased handle is a
//! resource leak and treated as a correctness bug; the buffer also
//! releases any stragglers on drop.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;
use uuid::Uuid;

use myswipe_core::{MediaId, MediaKind};

/// Maximum number of videos on one listing.
pub const MAX_VIDEOS: usize = 3;

/// A raw file handed to the buffer by the embedding UI.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// An acquired preview resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle {
    id: Uuid,
    url: String,
}

impl PreviewHandle {
    /// Build a handle; called by allocator implementations.
    #[must_use]
    pub const fn new(id: Uuid, url: String) -> Self {
        Self { id, url }
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Display URL of the preview.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Preview acquisition failure.
#[derive(Debug, Error)]
#[error("preview allocation failed: {0}")]
pub struct PreviewError(pub String);

/// Platform hook for preview resources.
///
/// The browser build backs this with object URLs; tests and native
/// embeddings use [`InMemoryPreviews`]. `release` must be idempotent.
pub trait PreviewAllocator: Send + Sync {
    /// Acquire a preview resource for a staged file.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform cannot produce a preview; the
    /// buffer skips that file and continues the batch.
    fn acquire(&self, file: &StagedFile) -> Result<PreviewHandle, PreviewError>;

    /// Release a previously acquired resource.
    fn release(&self, handle: &PreviewHandle);
}

/// Allocator that only tracks liveness, for tests and headless use.
#[derive(Debug, Default)]
pub struct InMemoryPreviews {
    live: Mutex<HashSet<Uuid>>,
}

impl InMemoryPreviews {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles acquired but not yet released.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.lock().expect("previews lock").len()
    }
}

impl PreviewAllocator for InMemoryPreviews {
    fn acquire(&self, file: &StagedFile) -> Result<PreviewHandle, PreviewError> {
        let id = Uuid::new_v4();
        self.live.lock().map_err(|_| PreviewError("poisoned".into()))?.insert(id);
        Ok(PreviewHandle::new(id, format!("preview://{id}/{}", file.name)))
    }

    fn release(&self, handle: &PreviewHandle) {
        if let Ok(mut live) = self.live.lock() {
            live.remove(&handle.id());
        }
    }
}

/// Where an item's bytes come from at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Locally staged; will be uploaded on submit.
    Staged {
        content_type: String,
        bytes: Vec<u8>,
        /// Base64 data URL, built best-effort at staging time.
        embedded: Option<String>,
    },
    /// Already on the backend (edit mode); never re-uploaded.
    Remote { url: String },
}

impl MediaSource {
    /// Whether this item still needs an upload.
    #[must_use]
    pub const fn is_staged(&self) -> bool {
        matches!(self, Self::Staged { .. })
    }
}

/// Poster image for a staged video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoThumbnail {
    /// Chosen locally; uploaded as an image alongside the video.
    Staged {
        content_type: String,
        bytes: Vec<u8>,
    },
    /// Retained from the existing remote record.
    Remote { url: String },
}

/// One staged or retained media item.
#[derive(Debug, Clone)]
pub struct MediaItem {
    pub id: MediaId,
    pub kind: MediaKind,
    pub source: MediaSource,
    pub preview: Option<PreviewHandle>,
    pub alt: Option<String>,
    pub position: usize,
    /// Video poster; always `None` for images.
    pub thumbnail: Option<VideoThumbnail>,
}

/// An existing remote item fed into the buffer when editing.
#[derive(Debug, Clone)]
pub struct RemoteMedia {
    pub url: String,
    pub alt: Option<String>,
    pub thumbnail: Option<String>,
}

/// Ordered staging buffer for one media kind.
pub struct MediaBuffer {
    kind: MediaKind,
    items: Vec<MediaItem>,
    previews: Arc<dyn PreviewAllocator>,
}

impl std::fmt::Debug for MediaBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaBuffer")
            .field("kind", &self.kind)
            .field("items", &self.items.len())
            .finish()
    }
}

impl MediaBuffer {
    /// Create an empty buffer for one kind.
    #[must_use]
    pub fn new(kind: MediaKind, previews: Arc<dyn PreviewAllocator>) -> Self {
        Self {
            kind,
            items: Vec::new(),
            previews,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        self.kind
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items that still need an upload (staged, not remote).
    pub fn staged_items(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter().filter(|i| i.source.is_staged())
    }

    /// Stage a batch of files.
    ///
    /// Files whose MIME type does not match the buffer's kind are
    /// skipped; videos past the cap are dropped; a file whose preview
    /// cannot be acquired is skipped without aborting the batch. Returns
    /// the number of accepted files.
    pub fn add_files(&mut self, files: Vec<StagedFile>) -> usize {
        let mut accepted = 0;
        for file in files {
            if !file
                .content_type
                .to_lowercase()
                .starts_with(self.kind.mime_prefix())
            {
                continue;
            }
            if self.kind == MediaKind::Video && self.items.len() >= MAX_VIDEOS {
                break;
            }
            let preview = match self.previews.acquire(&file) {
                Ok(handle) => handle,
                Err(err) => {
                    tracing::debug!("skipping {}: {err}", file.name);
                    continue;
                }
            };
            let embedded = encode_embedded(&file);
            self.items.push(MediaItem {
                id: MediaId::new(Uuid::new_v4().to_string()),
                kind: self.kind,
                source: MediaSource::Staged {
                    content_type: file.content_type,
                    bytes: file.bytes,
                    embedded,
                },
                preview: Some(preview),
                alt: None,
                position: 0,
                thumbnail: None,
            });
            accepted += 1;
        }
        self.renumber();
        accepted
    }

    /// Seed the buffer with existing remote items (edit mode).
    pub fn hydrate_remote(&mut self, remote: Vec<RemoteMedia>) {
        for media in remote {
            self.items.push(MediaItem {
                id: MediaId::new(Uuid::new_v4().to_string()),
                kind: self.kind,
                source: MediaSource::Remote { url: media.url },
                preview: None,
                alt: media.alt,
                position: 0,
                thumbnail: media.thumbnail.map(|url| VideoThumbnail::Remote { url }),
            });
        }
        self.renumber();
    }

    /// Remove one item, releasing its preview; no-op when out of range.
    pub fn remove(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        let item = self.items.remove(index);
        if let Some(handle) = item.preview.as_ref() {
            self.previews.release(handle);
        }
        self.renumber();
    }

    /// Move one item; no-op when the indices are equal or out of range.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to || from >= self.items.len() || to >= self.items.len() {
            return;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.renumber();
    }

    /// Attach a poster image to a staged video. Returns `false` when the
    /// video is not in this buffer or the file is not an image.
    pub fn set_video_thumbnail(&mut self, video_id: &MediaId, image: StagedFile) -> bool {
        if self.kind != MediaKind::Video
            || !image
                .content_type
                .to_lowercase()
                .starts_with(MediaKind::Image.mime_prefix())
        {
            return false;
        }
        let Some(item) = self.items.iter_mut().find(|i| &i.id == video_id) else {
            return false;
        };
        item.thumbnail = Some(VideoThumbnail::Staged {
            content_type: image.content_type,
            bytes: image.bytes,
        });
        true
    }

    /// Discard every item, releasing all previews.
    pub fn clear(&mut self) {
        self.release_previews();
        self.items.clear();
    }

    fn release_previews(&mut self) {
        for item in &self.items {
            if let Some(handle) = item.preview.as_ref() {
                self.previews.release(handle);
            }
        }
    }

    fn renumber(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.position = index;
        }
    }
}

impl Drop for MediaBuffer {
    fn drop(&mut self) {
        self.release_previews();
    }
}

/// Best-effort embedded copy of a staged file as a base64 data URL.
///
/// Empty payloads produce no embedded form; the item itself still
/// stages.
fn encode_embedded(file: &StagedFile) -> Option<String> {
    if file.bytes.is_empty() {
        return None;
    }
    Some(format!(
        "data:{};base64,{}",
        file.content_type,
        BASE64.encode(&file.bytes)
    ))
}
