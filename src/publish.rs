//! The publication pipeline: staging → resize fan-out → catalog append.
//!
//! A publish moves through three phases:
//!
//! ```text
//! Resizing → Persisting → Published
//!                │
//!                └─ quota exceeded → DegradedPersisting → Published (warning)
//!                                         │
//!                                         └─ quota exceeded again → Failed
//! ```
//!
//! - **Resizing**: every staged entry is processed concurrently (rayon
//!   fan-out, no shared mutable state — each item fills its own output slot
//!   keyed by original index, so ordinal order always follows staging order
//!   regardless of completion order). A single item failing to decode
//!   degrades to a placeholder token; it never aborts the publish. Videos
//!   get a placeholder immediately — their bytes are not embedded.
//! - **Persisting**: the album record is built and appended. Append is the
//!   only mutation point, so no partial album is ever visible.
//! - **DegradedPersisting**: on a quota failure, the same album is rebuilt
//!   with every media entry replaced by a lightweight placeholder (no
//!   re-resizing) and appended once more. Success surfaces as a warning to
//!   the caller; a second failure is fatal and leaves the staging area
//!   untouched so the user can retry with fewer or smaller items.
//!
//! Progress is reported through an optional [`PublishEvent`] channel, the
//! same way the CLI consumes it in `main`.

use crate::album::{
    Album, Category, Layout, MediaKind, PublishedMediaEntry, cover_placeholder, generate_album_id,
    image_placeholder, media_placeholder, published_now,
};
use crate::catalog::{CatalogError, CatalogStore};
use crate::layout::{clamp_columns, clamp_gap};
use crate::resize::MediaResizer;
use crate::staging::StagingStore;
use crate::storage::{CatalogBackend, StorageError};
use rayon::prelude::*;
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Warning attached to a degraded publish.
pub const DEGRADED_WARNING: &str = "reduced image quality due to storage limits";

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("nothing staged: add media before publishing")]
    EmptyStaging,
    #[error(
        "could not save the album even with placeholder media; \
         retry with fewer or smaller items"
    )]
    StorageExhausted,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// User-chosen album settings from the authoring view.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub title: String,
    pub category: Category,
    pub description: String,
    pub layout: Layout,
    pub columns: u8,
    pub gap: u8,
    pub background: String,
}

impl Default for PublishRequest {
    fn default() -> Self {
        Self {
            title: "My Album".to_string(),
            category: Category::default(),
            description: String::new(),
            layout: Layout::default(),
            columns: 3,
            gap: 2,
            background: "bg-amber-50".to_string(),
        }
    }
}

/// Result of a successful publish. The album id tells the caller where to
/// navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published {
        album_id: String,
    },
    /// Persisted on the degraded retry: all media are placeholder tokens.
    PublishedDegraded {
        album_id: String,
        warning: String,
    },
}

impl PublishOutcome {
    pub fn album_id(&self) -> &str {
        match self {
            PublishOutcome::Published { album_id }
            | PublishOutcome::PublishedDegraded { album_id, .. } => album_id,
        }
    }
}

/// Progress events emitted during a publish.
#[derive(Debug, Clone)]
pub enum PublishEvent {
    Resizing { total: usize },
    ItemResized { index: usize },
    /// The item at `index` could not be resized and fell back to a placeholder.
    ItemDegraded { index: usize },
    Persisting,
    DegradedRetry,
    Published { album_id: String, degraded: bool },
}

fn emit(events: &Option<Sender<PublishEvent>>, event: PublishEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is listening.
        let _ = tx.send(event);
    }
}

/// Publish the staged media as a new album.
///
/// On success the staging area is cleared (source handles released) and the
/// outcome carries the new album id. On failure — including the
/// second-tier storage failure — staging is left untouched.
pub fn publish<B: CatalogBackend>(
    staging: &mut StagingStore,
    catalog: &CatalogStore<B>,
    resizer: &MediaResizer,
    request: PublishRequest,
    events: Option<Sender<PublishEvent>>,
) -> Result<PublishOutcome, PublishError> {
    if staging.is_empty() {
        return Err(PublishError::EmptyStaging);
    }

    // Resizing: concurrent fan-out, output slots keyed by original index.
    emit(&events, PublishEvent::Resizing {
        total: staging.len(),
    });
    let media: Vec<PublishedMediaEntry> = staging
        .entries()
        .par_iter()
        .enumerate()
        .map(|(index, entry)| {
            let data = match (entry.kind, entry.data_uri.as_deref()) {
                (MediaKind::Image, Some(uri)) => match resizer.resize_data_uri(uri) {
                    Ok(resized) => {
                        emit(&events, PublishEvent::ItemResized { index });
                        resized
                    }
                    Err(_) => {
                        emit(&events, PublishEvent::ItemDegraded { index });
                        image_placeholder(index + 1)
                    }
                },
                _ => media_placeholder(index + 1),
            };
            PublishedMediaEntry {
                id: entry.id.clone(),
                kind: entry.kind,
                index,
                data,
            }
        })
        .collect();

    let album = build_album(&request, media);
    let album_id = album.id.clone();

    // Persisting: append is the single, atomic mutation point.
    emit(&events, PublishEvent::Persisting);
    match catalog.append(album.clone()) {
        Ok(()) => {
            staging.clear();
            emit(&events, PublishEvent::Published {
                album_id: album_id.clone(),
                degraded: false,
            });
            Ok(PublishOutcome::Published { album_id })
        }
        Err(CatalogError::Storage(StorageError::QuotaExceeded { .. })) => {
            // DegradedPersisting: same album, placeholder media, one retry.
            emit(&events, PublishEvent::DegradedRetry);
            let fallback = degrade_album(album);
            match catalog.append(fallback) {
                Ok(()) => {
                    staging.clear();
                    emit(&events, PublishEvent::Published {
                        album_id: album_id.clone(),
                        degraded: true,
                    });
                    Ok(PublishOutcome::PublishedDegraded {
                        album_id,
                        warning: DEGRADED_WARNING.to_string(),
                    })
                }
                Err(CatalogError::Storage(StorageError::QuotaExceeded { .. })) => {
                    Err(PublishError::StorageExhausted)
                }
                Err(e) => Err(e.into()),
            }
        }
        Err(e) => Err(e.into()),
    }
}

/// Assemble the album record from the request and the resized media.
fn build_album(request: &PublishRequest, media: Vec<PublishedMediaEntry>) -> Album {
    let cover_image = media
        .first()
        .map(|m| m.data.clone())
        .unwrap_or_else(cover_placeholder);
    Album {
        id: generate_album_id(),
        title: request.title.clone(),
        category: request.category,
        description: request.description.clone(),
        published_at: published_now(),
        layout: request.layout,
        columns: clamp_columns(request.columns),
        gap: clamp_gap(request.gap),
        background: request.background.clone(),
        media_count: media.len(),
        cover_image: Some(cover_image),
        media,
        hidden: false,
    }
}

/// Rebuild an album with every media entry replaced by a placeholder token.
/// Ids, ordinals, and all other fields are preserved; nothing is re-resized.
fn degrade_album(album: Album) -> Album {
    let media: Vec<PublishedMediaEntry> = album
        .media
        .into_iter()
        .map(|entry| {
            let data = image_placeholder(entry.index + 1);
            PublishedMediaEntry { data, ..entry }
        })
        .collect();
    Album {
        cover_image: Some(cover_placeholder()),
        media,
        ..album
    }
}
