use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use arca_types::ContentHash;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::StoreResult;
use crate::traits::ObjectStore;

/// Durable object store sharded by hash prefix.
///
/// Layout under the root directory: `<2-char hash prefix>/<remaining 38
/// hex chars>`. Content always lands via an atomic rename, either from a
/// caller-provided staging path (`put_file`) or from a temp file created
/// next to the shards (`put_bytes`), so readers never observe partial
/// writes. Staging files handed to `put_file` must live on the same
/// filesystem as the store root for the rename to be atomic.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Open (and create if absent) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shard directory for `hash`.
    fn object_folder(&self, hash: &ContentHash) -> PathBuf {
        self.root.join(hash.shard_prefix())
    }

    /// Final sharded location for `hash`.
    pub fn object_path(&self, hash: &ContentHash) -> PathBuf {
        self.object_folder(hash).join(hash.shard_rest())
    }
}

impl ObjectStore for FsObjectStore {
    fn put_bytes(&self, hash: &ContentHash, bytes: &[u8]) -> StoreResult<()> {
        let path = self.object_path(hash);
        if path.exists() {
            return Ok(());
        }
        fs::create_dir_all(self.object_folder(hash))?;

        // Write-then-rename via a temp file on the same filesystem.
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(bytes)?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(hash = %hash.short_hex(), size = bytes.len(), "stored object");
        Ok(())
    }

    fn put_file(&self, hash: &ContentHash, staging: &Path) -> StoreResult<PathBuf> {
        let path = self.object_path(hash);
        if path.exists() {
            // Duplicate content: discard the staged upload.
            fs::remove_file(staging)?;
            debug!(hash = %hash.short_hex(), "object already stored, staging discarded");
            return Ok(path);
        }
        fs::create_dir_all(self.object_folder(hash))?;
        fs::rename(staging, &path)?;
        debug!(hash = %hash.short_hex(), "object moved into store");
        Ok(path)
    }

    fn get(&self, hash: &ContentHash) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.object_path(hash)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, hash: &ContentHash) -> StoreResult<bool> {
        Ok(self.object_path(hash).exists())
    }

    fn delete(&self, hash: &ContentHash) -> StoreResult<bool> {
        match fs::remove_file(self.object_path(hash)) {
            Ok(()) => {
                debug!(hash = %hash.short_hex(), "deleted object");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> StoreResult<Vec<ContentHash>> {
        let mut hashes = Vec::new();
        for shard in fs::read_dir(&self.root)? {
            let shard = shard?;
            if !shard.file_type()?.is_dir() {
                // Temp files from in-flight puts live at the root level.
                continue;
            }
            let prefix = shard.file_name();
            for entry in fs::read_dir(shard.path())? {
                let entry = entry?;
                let name = entry.file_name();
                let full = format!(
                    "{}{}",
                    prefix.to_string_lossy(),
                    name.to_string_lossy()
                );
                if let Ok(hash) = ContentHash::from_hex(&full) {
                    hashes.push(hash);
                }
            }
        }
        hashes.sort();
        Ok(hashes)
    }
}

impl std::fmt::Debug for FsObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsObjectStore")
            .field("root", &self.root)
            .finish()
    }
}
