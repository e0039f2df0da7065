use std::sync::Arc;

use arca_registry::ArchivistRegistry;
use chrono::Utc;
use tracing::debug;

use crate::error::{DirectoryError, DirectoryResult};
use crate::traits::ArchiveStore;
use crate::types::Archive;

/// The archive directory service.
///
/// Owns archive lifecycle: creation, rename, description changes,
/// maintainer bookkeeping, deletion. Every mutating operation is gated on
/// archivist existence via the injected registry handle.
///
/// Rename deliberately does not require ownership — only delete does. The
/// reference behavior leaves rename existence-checked only, and the
/// asymmetry is preserved here rather than silently fixed (see DESIGN.md).
pub struct ArchiveDirectory {
    store: Arc<dyn ArchiveStore>,
    registry: Arc<ArchivistRegistry>,
}

impl ArchiveDirectory {
    pub fn new(store: Arc<dyn ArchiveStore>, registry: Arc<ArchivistRegistry>) -> Self {
        Self { store, registry }
    }

    /// Check whether an archive exists.
    pub fn exists(&self, name: &str) -> DirectoryResult<bool> {
        Ok(self.store.get(name)?.is_some())
    }

    /// All archive names, sorted.
    pub fn list(&self) -> DirectoryResult<Vec<String>> {
        self.store.list_names()
    }

    /// Look up an archive. Fails `ArchiveNotFound`.
    pub fn get(&self, name: &str) -> DirectoryResult<Archive> {
        self.store
            .get(name)?
            .ok_or_else(|| DirectoryError::ArchiveNotFound(name.to_string()))
    }

    /// Create a new archive owned by `creator`.
    ///
    /// Fails `ArchiveAlreadyExists` if the name is taken, then
    /// `ArchivistNotFound` if the creator is unknown.
    pub fn create(
        &self,
        name: &str,
        description: &str,
        creator: &str,
    ) -> DirectoryResult<Archive> {
        if self.store.get(name)?.is_some() {
            return Err(DirectoryError::ArchiveAlreadyExists(name.to_string()));
        }
        let creator = self.registry.get(creator)?;
        debug!(archive = name, creator = %creator.username, "creating archive");

        let archive = Archive::new(name, description, creator.username);
        self.store.insert(&archive)?;
        Ok(archive)
    }

    /// Rename an archive.
    ///
    /// Fails `ArchiveAlreadyExists` for the new name, `ArchiveNotFound`
    /// for the old one, `ArchivistNotFound` for the actor. Ownership is
    /// not checked.
    pub fn rename(&self, name: &str, new_name: &str, archivist: &str) -> DirectoryResult<()> {
        if self.store.get(new_name)?.is_some() {
            return Err(DirectoryError::ArchiveAlreadyExists(new_name.to_string()));
        }
        let mut archive = self.get(name)?;
        self.registry.get(archivist)?;
        debug!(archive = name, new_name, archivist, "renaming archive");

        self.store.remove(name)?;
        archive.name = new_name.to_string();
        archive.updated_at = Utc::now();
        self.store.insert(&archive)
    }

    /// Replace an archive's description. Existence-checked only.
    pub fn change_description(
        &self,
        name: &str,
        description: &str,
        archivist: &str,
    ) -> DirectoryResult<()> {
        let mut archive = self.get(name)?;
        let archivist = self.registry.get(archivist)?;
        debug!(archive = name, archivist = %archivist.username, "changing archive description");

        archive.description = description.to_string();
        if !archive.has_maintainer(&archivist.username) {
            archive.maintainers.push(archivist.username);
        }
        archive.updated_at = Utc::now();
        self.store.update(&archive)?;
        Ok(())
    }

    /// Append `archivist` to the maintainer list if absent. No-op when
    /// already present. Invoked as a side effect by the catalog and ledger.
    pub fn add_maintainer(&self, name: &str, archivist: &str) -> DirectoryResult<()> {
        let mut archive = self.get(name)?;
        if archive.has_maintainer(archivist) {
            return Ok(());
        }
        archive.maintainers.push(archivist.to_string());
        archive.updated_at = Utc::now();
        self.store.update(&archive)?;
        Ok(())
    }

    /// Delete an archive. Owner only.
    ///
    /// Fails `ArchiveNotFound`, `ArchivistNotFound`, then `NotAuthorized`
    /// unless the actor is the owner. Contained documents and records are
    /// not cascaded; their rows remain until reconciled.
    pub fn delete(&self, name: &str, archivist: &str) -> DirectoryResult<()> {
        let archive = self.get(name)?;
        let archivist = self.registry.get(archivist)?;
        if archive.owner != archivist.username {
            return Err(DirectoryError::NotAuthorized {
                archive: name.to_string(),
                archivist: archivist.username,
            });
        }
        debug!(archive = name, owner = %archive.owner, "deleting archive");

        self.store.remove(name)?;
        Ok(())
    }
}
