//! Durable persistence for the album catalog.
//!
//! The catalog is one JSON document holding the full album collection, read
//! and written whole — the durable medium is small and constrained, the way
//! a browser storage bucket is, so the backend enforces a byte quota and the
//! pipeline degrades gracefully when it is exceeded.
//!
//! [`CatalogBackend`] is the injected persistence seam:
//! [`CatalogStore`](crate::catalog::CatalogStore) never touches the disk
//! directly, so tests swap in the in-memory
//! [`MemoryBackend`](tests::MemoryBackend) without changing store logic.
//!
//! # Durability rules
//!
//! - A missing catalog file loads as an empty collection (first run).
//! - A **corrupt** catalog file is an error, never an empty collection — a
//!   parse failure must not silently lose published albums.
//! - Writes that fit the quota go to a temp file first and are renamed into
//!   place, so a crash mid-write leaves the previous catalog intact.
//! - Writes over the quota are rejected before touching the file at all.

use crate::album::Album;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Default byte quota for the catalog file: 5 MiB, a typical budget for a
/// browser-style storage bucket.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("catalog IO error: {0}")]
    Io(#[from] io::Error),
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog write of {size} bytes exceeds the {quota} byte storage quota")]
    QuotaExceeded { size: usize, quota: usize },
}

/// Injected persistence dependency: whole-collection read and write.
///
/// Implementations must make `store` atomic from the caller's perspective —
/// after a failed store, a subsequent `load` returns the previous collection.
pub trait CatalogBackend: Sync {
    /// Read the full collection. Empty when no catalog exists yet.
    fn load(&self) -> Result<Vec<Album>, StorageError>;

    /// Replace the full collection.
    fn store(&self, albums: &[Album]) -> Result<(), StorageError>;
}

/// Production backend: a quota-constrained JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
    quota: Option<usize>,
}

impl JsonFileBackend {
    /// Backend writing to `path` with the default quota.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota: Some(DEFAULT_QUOTA_BYTES),
        }
    }

    /// Backend with an explicit quota; `None` disables the quota entirely.
    pub fn with_quota(path: impl Into<PathBuf>, quota: Option<usize>) -> Self {
        Self {
            path: path.into(),
            quota,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CatalogBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<Album>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn store(&self, albums: &[Album]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(albums)?;
        if let Some(quota) = self.quota
            && json.len() > quota
        {
            return Err(StorageError::QuotaExceeded {
                size: json.len(),
                quota,
            });
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        // Write-then-rename so a crash mid-write never corrupts the catalog.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::album::{Category, Layout};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// In-memory backend for store and pipeline tests.
    ///
    /// Holds the collection behind a Mutex (Sync, so it works under rayon),
    /// optionally enforces a byte quota on the serialized collection, and can
    /// be scripted to fail the next N stores.
    #[derive(Default)]
    pub struct MemoryBackend {
        pub albums: Mutex<Vec<Album>>,
        pub quota: Option<usize>,
        pub fail_next_stores: Mutex<u32>,
        pub store_calls: Mutex<u32>,
    }

    impl MemoryBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_quota(quota: usize) -> Self {
            Self {
                quota: Some(quota),
                ..Self::default()
            }
        }

        /// Fail the next `n` store calls with `QuotaExceeded`.
        pub fn failing_next_stores(n: u32) -> Self {
            Self {
                fail_next_stores: Mutex::new(n),
                ..Self::default()
            }
        }

        pub fn store_call_count(&self) -> u32 {
            *self.store_calls.lock().unwrap()
        }
    }

    impl CatalogBackend for MemoryBackend {
        fn load(&self) -> Result<Vec<Album>, StorageError> {
            Ok(self.albums.lock().unwrap().clone())
        }

        fn store(&self, albums: &[Album]) -> Result<(), StorageError> {
            *self.store_calls.lock().unwrap() += 1;

            let mut fail = self.fail_next_stores.lock().unwrap();
            if *fail > 0 {
                *fail -= 1;
                return Err(StorageError::QuotaExceeded { size: 0, quota: 0 });
            }
            drop(fail);

            if let Some(quota) = self.quota {
                let size = serde_json::to_string(albums)?.len();
                if size > quota {
                    return Err(StorageError::QuotaExceeded { size, quota });
                }
            }

            *self.albums.lock().unwrap() = albums.to_vec();
            Ok(())
        }
    }

    pub fn sample_album(id: &str) -> Album {
        Album {
            id: id.to_string(),
            title: "Sample".to_string(),
            category: Category::Personal,
            description: String::new(),
            published_at: "2026-01-01T00:00:00+00:00".to_string(),
            layout: Layout::Grid,
            columns: 3,
            gap: 2,
            background: "bg-amber-50".to_string(),
            media_count: 0,
            cover_image: None,
            media: Vec::new(),
            hidden: false,
        }
    }

    // =========================================================================
    // JsonFileBackend
    // =========================================================================

    #[test]
    fn missing_file_loads_as_empty() {
        let tmp = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(tmp.path().join("catalog.json"));
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn store_then_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(tmp.path().join("catalog.json"));
        let albums = vec![sample_album("album-1-aaaaaaaa")];
        backend.store(&albums).unwrap();
        assert_eq!(backend.load().unwrap(), albums);
    }

    #[test]
    fn corrupt_file_is_an_error_not_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        fs::write(&path, "not json at all").unwrap();
        let backend = JsonFileBackend::new(&path);
        assert!(matches!(backend.load(), Err(StorageError::Json(_))));
    }

    #[test]
    fn store_over_quota_is_rejected_and_file_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        let backend = JsonFileBackend::with_quota(&path, Some(64));

        let result = backend.store(&[sample_album("album-1-aaaaaaaa")]);
        assert!(matches!(result, Err(StorageError::QuotaExceeded { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn failed_store_leaves_previous_collection_loadable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");

        let roomy = JsonFileBackend::with_quota(&path, None);
        let first = vec![sample_album("album-1-aaaaaaaa")];
        roomy.store(&first).unwrap();

        let cramped = JsonFileBackend::with_quota(&path, Some(8));
        let second = vec![
            sample_album("album-1-aaaaaaaa"),
            sample_album("album-2-bbbbbbbb"),
        ];
        assert!(cramped.store(&second).is_err());
        assert_eq!(roomy.load().unwrap(), first);
    }

    #[test]
    fn store_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/catalog.json");
        let backend = JsonFileBackend::new(&path);
        backend.store(&[]).unwrap();
        assert!(path.exists());
    }

    // =========================================================================
    // MemoryBackend
    // =========================================================================

    #[test]
    fn memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        let albums = vec![sample_album("album-1-aaaaaaaa")];
        backend.store(&albums).unwrap();
        assert_eq!(backend.load().unwrap(), albums);
        assert_eq!(backend.store_call_count(), 1);
    }

    #[test]
    fn memory_backend_scripted_failures_then_success() {
        let backend = MemoryBackend::failing_next_stores(1);
        let albums = vec![sample_album("album-1-aaaaaaaa")];
        assert!(matches!(
            backend.store(&albums),
            Err(StorageError::QuotaExceeded { .. })
        ));
        backend.store(&albums).unwrap();
        assert_eq!(backend.load().unwrap(), albums);
    }

    #[test]
    fn memory_backend_quota_enforced() {
        let backend = MemoryBackend::with_quota(16);
        let result = backend.store(&[sample_album("album-1-aaaaaaaa")]);
        assert!(matches!(result, Err(StorageError::QuotaExceeded { .. })));
        assert!(backend.load().unwrap().is_empty());
    }
}
