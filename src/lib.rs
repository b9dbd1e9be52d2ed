//! # Albumoto
//!
//! An album authoring and publication tool for personal photo feeds. Media
//! files are staged in memory, downscaled to a storage-friendly size, styled
//! by a deterministic layout engine, and published into a durable JSON
//! catalog that external feed and album viewers consume as-is.
//!
//! # Architecture: Staging → Publish → Catalog
//!
//! The tool is built around one irreversible transition: a publish consumes
//! the mutable staging area and appends an immutable album to the catalog.
//!
//! ```text
//! 1. Stage     files      →  StagingStore    (capacity-capped, in memory)
//! 2. Publish   staging    →  Album           (parallel resize + assembly)
//! 3. Persist   album      →  albums.json     (quota-checked, whole-catalog)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Atomicity**: the catalog append is the single mutation point, so no
//!   partially-published album is ever visible to readers.
//! - **Graceful degradation**: resize failures and storage exhaustion each
//!   degrade to placeholders instead of aborting — a publish fails only when
//!   even the placeholder-only album cannot be stored.
//! - **Testability**: persistence sits behind the [`storage::CatalogBackend`]
//!   trait, so pipeline tests run against an in-memory backend without
//!   touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`staging`] | In-memory staging area — capacity ceiling, MIME filtering, explicit source-handle release |
//! | [`resize`] | Image downscaling to a width bound with JPEG re-encoding; data URI codec |
//! | [`layout`] | Deterministic per-item styling — scrapbook rotation/border cycles, container classes |
//! | [`publish`] | The publication pipeline — parallel resize fan-out, album assembly, two-tier storage degradation |
//! | [`catalog`] | Keyed album collection — append, lookup, hide/unhide, remove |
//! | [`storage`] | Durable persistence — quota-constrained JSON file behind the `CatalogBackend` seam |
//! | [`album`] | Persisted data model shared by all of the above |
//! | [`config`] | `albumoto.toml` loading and validation |
//! | [`output`] | CLI output formatting — feed, album detail, publish progress |
//!
//! # Design Decisions
//!
//! ## Whole-Catalog Persistence
//!
//! The catalog is one JSON document, read and written in full. Albums embed
//! their media as base64 data URIs, so a catalog is self-contained — no
//! sidecar blob directory to drift out of sync. The trade-off is a hard size
//! ceiling, enforced as a byte quota with a degraded-publish fallback rather
//! than an error at read time.
//!
//! ## Deterministic Published Styling
//!
//! Scrapbook tilt and border are pure functions of an item's ordinal index.
//! Re-rendering a published album anywhere, any time, produces the identical
//! composition. Randomness exists only on the authoring preview path, which
//! is never persisted.
//!
//! ## Pure-Rust Imaging
//!
//! Downscaling uses the `image` crate (Lanczos3 resampling) — no system
//! ImageMagick or FFmpeg dependency. The binary is fully self-contained.

pub mod album;
pub mod catalog;
pub mod config;
pub mod layout;
pub mod output;
pub mod publish;
pub mod resize;
pub mod staging;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_helpers;
