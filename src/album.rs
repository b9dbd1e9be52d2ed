//! Persisted data model shared across the publication pipeline.
//!
//! These types are the durable catalog shape: whatever
//! [`CatalogStore`](crate::catalog::CatalogStore) writes, external readers
//! (the feed and album detail views) consume exactly as-is. Fields here are
//! the full external contract — readers must not assume anything beyond them.
//!
//! Staging-side types ([`StagedMedia`](crate::staging::StagedMedia)) live in
//! [`staging`](crate::staging) and are never serialized.

use serde::{Deserialize, Serialize};

/// Hard ceiling on the number of media entries in a single album.
///
/// Enforced at staging time, so a successfully published album always has
/// `0 < media.len() <= MAX_MEDIA`.
pub const MAX_MEDIA: usize = 20;

/// Kind of a media entry. Anything that is not `image/*` or `video/*` at the
/// ingestion boundary never becomes an entry at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Album category chosen in the publish form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Family,
    Travel,
    Events,
    Nature,
    Other,
}

impl Default for Category {
    fn default() -> Self {
        Category::Personal
    }
}

/// Structural arrangement of an album's media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Grid,
    Masonry,
    Rows,
    Columns,
    Scrapbook,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Grid
    }
}

/// A single media entry inside a published album. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedMediaEntry {
    pub id: String,
    pub kind: MediaKind,
    /// Position within the album's media sequence at publish time. Never
    /// changes after publication — derived presentation (e.g. scrapbook
    /// rotation) depends only on this index.
    pub index: usize,
    /// Encoded representation: a `data:` URI for resized images, or a
    /// placeholder token for videos and unresizable items.
    pub data: String,
}

/// A published album as it lives in the catalog.
///
/// Created only by [`publish`](crate::publish::publish); the sole mutation
/// after that is the `hidden` flag toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Unique across the catalog. Time-based plus a random suffix, so a
    /// collision is practically unreachable — but `append` still checks.
    pub id: String,
    pub title: String,
    pub category: Category,
    pub description: String,
    /// RFC 3339 publication timestamp.
    pub published_at: String,
    pub layout: Layout,
    /// Column count, 1–5.
    pub columns: u8,
    /// Gap step, 0–8.
    pub gap: u8,
    /// Background color token chosen in the authoring view (e.g. "bg-amber-50").
    pub background: String,
    /// Always equals `media.len()`.
    pub media_count: usize,
    /// First entry's representation, or a placeholder when the album has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub media: Vec<PublishedMediaEntry>,
    /// Hidden albums stay in the catalog but are filtered from the default feed.
    #[serde(default)]
    pub hidden: bool,
}

/// Generate a collision-resistant album id: unix millis plus a random suffix.
pub fn generate_album_id() -> String {
    format!(
        "album-{}-{:08x}",
        chrono::Utc::now().timestamp_millis(),
        fastrand::u32(..)
    )
}

/// Generate a staging media id. Same shape as album ids, different prefix.
pub fn generate_media_id() -> String {
    format!(
        "media-{}-{:08x}",
        chrono::Utc::now().timestamp_millis(),
        fastrand::u32(..)
    )
}

/// Current timestamp in RFC 3339, as stored in [`Album::published_at`].
pub fn published_now() -> String {
    chrono::Utc::now().to_rfc3339()
}

// ============================================================================
// Placeholder tokens
// ============================================================================

/// Placeholder for an image that could not be resized. `n` is 1-based.
pub fn image_placeholder(n: usize) -> String {
    format!("/placeholder.svg?height=400&width=400&text=Image{n}")
}

/// Placeholder for non-image media (video bytes are never embedded).
pub fn media_placeholder(n: usize) -> String {
    format!("/placeholder.svg?height=400&width=400&text=Media{n}")
}

/// Placeholder cover for an album whose media carry no usable representation.
pub fn cover_placeholder() -> String {
    "/placeholder.svg?height=400&width=400&text=Cover".to_string()
}
