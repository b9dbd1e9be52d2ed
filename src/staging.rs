//! In-memory staging area for the album being authored.
//!
//! The staging store owns every [`StagedMedia`] entry from ingestion until it
//! is consumed by a publish (or removed by the user). Entries hold their raw
//! bytes through a [`SourceHandle`] — a transient resource that must be
//! released **exactly once**, on removal, on clear, or after a successful
//! publish. Double-release and leak are both defects; release is an explicit
//! operation here, never left to incidental drops.
//!
//! # Ingestion boundary
//!
//! [`StagingStore::add`] accepts file-like blobs with a reported MIME type.
//! The capacity ceiling ([`MAX_MEDIA`]) is checked against the *full*
//! incoming batch first — all-or-nothing, no partial add. After that, entries
//! whose type is neither `image/*` nor `video/*` are silently dropped: no
//! entry, no error, no count change. Images get a base64 data URI of their
//! raw bytes attached at this point; videos never carry one (video bytes are
//! not embedded in published albums).

use crate::album::{MAX_MEDIA, MediaKind, generate_media_id};
use crate::resize::encode_data_uri;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StagingError {
    #[error(
        "too many media files: {staged} staged + {incoming} new exceeds the limit of {MAX_MEDIA}"
    )]
    CapacityExceeded { staged: usize, incoming: usize },
}

/// A file-like blob at the ingestion boundary: name, reported MIME type,
/// raw bytes.
#[derive(Debug, Clone)]
pub struct IngestFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Transient handle to an entry's raw source bytes.
///
/// Owns the bytes until [`release`](SourceHandle::release) frees them.
/// Releasing twice trips a `debug_assert` — callers are expected to release
/// exactly once.
#[derive(Debug)]
pub struct SourceHandle {
    bytes: Option<Vec<u8>>,
}

impl SourceHandle {
    fn new(bytes: Vec<u8>) -> Self {
        Self { bytes: Some(bytes) }
    }

    /// The raw bytes, if not yet released.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Free the backing bytes. Must be called exactly once.
    pub fn release(&mut self) {
        debug_assert!(!self.is_released(), "source handle released twice");
        self.bytes = None;
    }

    pub fn is_released(&self) -> bool {
        self.bytes.is_none()
    }
}

/// A media entry staged for publication. Owned exclusively by
/// [`StagingStore`] until consumed.
#[derive(Debug)]
pub struct StagedMedia {
    pub id: String,
    /// Original file name from the ingestion boundary, kept for display.
    pub name: String,
    pub kind: MediaKind,
    /// Transient resource backing the entry; released on remove/clear.
    pub source: SourceHandle,
    /// Base64 data URI of the raw bytes. Images only.
    pub data_uri: Option<String>,
}

/// Ordered collection of media currently being assembled into an album.
#[derive(Debug, Default)]
pub struct StagingStore {
    entries: Vec<StagedMedia>,
}

impl StagingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a batch of files. All-or-nothing: if the batch would push the
    /// store past [`MAX_MEDIA`], nothing is added and `CapacityExceeded` is
    /// returned. Non-media files are silently skipped after the capacity
    /// check. Returns the ids of the entries actually created, in order.
    pub fn add(&mut self, files: Vec<IngestFile>) -> Result<Vec<String>, StagingError> {
        if self.entries.len() + files.len() > MAX_MEDIA {
            return Err(StagingError::CapacityExceeded {
                staged: self.entries.len(),
                incoming: files.len(),
            });
        }

        let mut added = Vec::new();
        for file in files {
            let kind = if file.mime.starts_with("image/") {
                MediaKind::Image
            } else if file.mime.starts_with("video/") {
                MediaKind::Video
            } else {
                continue;
            };

            let data_uri = match kind {
                MediaKind::Image => Some(encode_data_uri(&file.mime, &file.bytes)),
                MediaKind::Video => None,
            };

            let id = generate_media_id();
            added.push(id.clone());
            self.entries.push(StagedMedia {
                id,
                name: file.name,
                kind,
                source: SourceHandle::new(file.bytes),
                data_uri,
            });
        }
        Ok(added)
    }

    /// Release the entry's source handle and remove it. No-op when the id is
    /// absent. Returns the removed entry (handle already released) so callers
    /// can observe the release.
    pub fn remove(&mut self, id: &str) -> Option<StagedMedia> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        let mut entry = self.entries.remove(pos);
        entry.source.release();
        Some(entry)
    }

    /// Release every source handle, then empty the collection.
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            entry.source.release();
        }
        self.entries.clear();
    }

    pub fn get(&self, id: &str) -> Option<&StagedMedia> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[StagedMedia] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
