use std::sync::Arc;

use arca_types::normalize_username;
use chrono::Utc;
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::traits::ArchivistStore;
use crate::types::Archivist;

/// The archivist registry service.
///
/// Normalizes usernames once at this boundary and applies the normalized
/// form to every lookup and write. The storage handle is injected at
/// construction; the service holds no other state.
///
/// Deleting an archivist performs no dependency check: archives, documents
/// and records created by the deleted identity keep the now-dangling
/// username. This mirrors the reference behavior and is a documented
/// design gap.
pub struct ArchivistRegistry {
    store: Arc<dyn ArchivistStore>,
}

impl ArchivistRegistry {
    pub fn new(store: Arc<dyn ArchivistStore>) -> Self {
        Self { store }
    }

    /// Check whether an archivist exists.
    pub fn exists(&self, username: &str) -> RegistryResult<bool> {
        let username = normalize_username(username);
        Ok(self.store.get(&username)?.is_some())
    }

    /// Look up an archivist. Fails `ArchivistNotFound`.
    pub fn get(&self, username: &str) -> RegistryResult<Archivist> {
        let username = normalize_username(username);
        self.store
            .get(&username)?
            .ok_or(RegistryError::ArchivistNotFound(username))
    }

    /// Create a new archivist. Fails `ArchivistAlreadyExists` if the
    /// normalized username collides.
    pub fn create(&self, username: &str) -> RegistryResult<Archivist> {
        let username = normalize_username(username);
        debug!(%username, "creating archivist");

        let archivist = Archivist::new(username);
        self.store.insert(&archivist)?;
        Ok(archivist)
    }

    /// Rename an archivist. Fails `ArchivistNotFound` for the old name and
    /// `ArchivistAlreadyExists` for the new one.
    pub fn rename(&self, username: &str, new_username: &str) -> RegistryResult<()> {
        let username = normalize_username(username);
        let new_username = normalize_username(new_username);
        debug!(%username, %new_username, "renaming archivist");

        let mut archivist = self
            .store
            .get(&username)?
            .ok_or(RegistryError::ArchivistNotFound(username.clone()))?;
        if self.store.get(&new_username)?.is_some() {
            return Err(RegistryError::ArchivistAlreadyExists(new_username));
        }

        self.store.remove(&username)?;
        archivist.username = new_username;
        archivist.updated_at = Utc::now();
        self.store.insert(&archivist)
    }

    /// Replace an archivist's bio. Fails `ArchivistNotFound`.
    pub fn update_bio(&self, username: &str, bio: &str) -> RegistryResult<()> {
        let username = normalize_username(username);
        debug!(%username, "updating archivist bio");

        let mut archivist = self
            .store
            .get(&username)?
            .ok_or(RegistryError::ArchivistNotFound(username))?;
        archivist.bio = bio.to_string();
        archivist.updated_at = Utc::now();
        self.store.update(&archivist)?;
        Ok(())
    }

    /// Delete an archivist. Fails `ArchivistNotFound`.
    pub fn delete(&self, username: &str) -> RegistryResult<()> {
        let username = normalize_username(username);
        debug!(%username, "deleting archivist");

        if !self.store.remove(&username)? {
            return Err(RegistryError::ArchivistNotFound(username));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryArchivistStore;

    fn registry() -> ArchivistRegistry {
        ArchivistRegistry::new(Arc::new(InMemoryArchivistStore::new()))
    }

    #[test]
    fn create_then_exists() {
        let registry = registry();
        registry.create("alice").unwrap();
        assert!(registry.exists("alice").unwrap());
        assert!(!registry.exists("bob").unwrap());
    }

    #[test]
    fn usernames_are_normalized_on_create_and_lookup() {
        let registry = registry();
        let archivist = registry.create("  Alice ").unwrap();
        assert_eq!(archivist.username, "alice");

        // Any casing or padding resolves to the same identity.
        assert!(registry.exists("ALICE").unwrap());
        assert!(registry.exists(" alice  ").unwrap());
    }

    #[test]
    fn normalized_collision_is_rejected() {
        let registry = registry();
        registry.create("alice").unwrap();
        let err = registry.create(" ALICE ").unwrap_err();
        assert_eq!(err, RegistryError::ArchivistAlreadyExists("alice".into()));
    }

    #[test]
    fn rename_moves_the_key() {
        let registry = registry();
        registry.create("alice").unwrap();
        registry.rename("alice", "alicia").unwrap();

        assert!(!registry.exists("alice").unwrap());
        assert!(registry.exists("alicia").unwrap());
    }

    #[test]
    fn rename_missing_fails_not_found() {
        let registry = registry();
        let err = registry.rename("ghost", "anything").unwrap_err();
        assert_eq!(err, RegistryError::ArchivistNotFound("ghost".into()));
    }

    #[test]
    fn rename_to_taken_name_fails() {
        let registry = registry();
        registry.create("alice").unwrap();
        registry.create("bob").unwrap();
        let err = registry.rename("alice", "Bob").unwrap_err();
        assert_eq!(err, RegistryError::ArchivistAlreadyExists("bob".into()));
        // Nothing moved.
        assert!(registry.exists("alice").unwrap());
    }

    #[test]
    fn update_bio_bumps_updated_at() {
        let registry = registry();
        let created = registry.create("alice").unwrap();
        registry.update_bio("alice", "keeper of the lab notebooks").unwrap();

        let fetched = registry.get("alice").unwrap();
        assert_eq!(fetched.bio, "keeper of the lab notebooks");
        assert!(fetched.updated_at >= created.updated_at);
    }

    #[test]
    fn delete_then_not_found() {
        let registry = registry();
        registry.create("alice").unwrap();
        registry.delete("alice").unwrap();
        let err = registry.delete("alice").unwrap_err();
        assert_eq!(err, RegistryError::ArchivistNotFound("alice".into()));
    }
}
