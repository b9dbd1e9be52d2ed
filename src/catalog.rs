//! The published-album catalog: a durable, keyed collection of albums.
//!
//! [`CatalogStore`] is the only writer of catalog state. Every mutating
//! operation reads the latest collection, applies its change, and writes the
//! full collection back as one logical step — append is the single point
//! where a new album becomes visible, so no partial album ever appears.
//!
//! Albums are kept in insertion order; [`CatalogStore::list`] returns them
//! that way and the feed view decides its own presentation order.

use crate::album::Album;
use crate::storage::{CatalogBackend, StorageError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("an album with id {0} already exists in the catalog")]
    DuplicateId(String),
    #[error("no album with id {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Keyed catalog of published albums over an injected persistence backend.
pub struct CatalogStore<B: CatalogBackend> {
    backend: B,
}

impl<B: CatalogBackend> CatalogStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// All albums, in insertion order.
    pub fn list(&self) -> Result<Vec<Album>, CatalogError> {
        Ok(self.backend.load()?)
    }

    /// The album with the given id, or `NotFound`.
    pub fn find_by_id(&self, id: &str) -> Result<Album, CatalogError> {
        self.backend
            .load()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Append a new album. Fails with `DuplicateId` if the id is already
    /// present; storage quota failures surface as
    /// [`StorageError::QuotaExceeded`] for the pipeline's degraded retry.
    pub fn append(&self, album: Album) -> Result<(), CatalogError> {
        let mut albums = self.backend.load()?;
        if albums.iter().any(|a| a.id == album.id) {
            return Err(CatalogError::DuplicateId(album.id));
        }
        albums.push(album);
        self.backend.store(&albums)?;
        Ok(())
    }

    /// Rewrite only the `hidden` flag of an existing album, preserving every
    /// other field. Fails with `NotFound` when the id is absent; a storage
    /// failure here is fatal to the operation (no silent drop).
    pub fn set_hidden(&self, id: &str, hidden: bool) -> Result<(), CatalogError> {
        let mut albums = self.backend.load()?;
        let album = albums
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        album.hidden = hidden;
        self.backend.store(&albums)?;
        Ok(())
    }

    /// Delete the album with the given id and persist. No-op when absent.
    pub fn remove(&self, id: &str) -> Result<(), CatalogError> {
        let mut albums = self.backend.load()?;
        let before = albums.len();
        albums.retain(|a| a.id != id);
        if albums.len() == before {
            return Ok(());
        }
        self.backend.store(&albums)?;
        Ok(())
    }
}
