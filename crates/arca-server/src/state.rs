use std::path::PathBuf;
use std::sync::Arc;

use arca_catalog::{DocumentCatalog, InMemoryDocumentStore};
use arca_directory::{ArchiveDirectory, InMemoryArchiveStore};
use arca_ledger::{InMemoryRecordStore, RecordLedger, RecordStore};
use arca_query::QueryEngine;
use arca_registry::{ArchivistRegistry, InMemoryArchivistStore};
use arca_store::{FsObjectStore, ObjectStore};

use crate::config::ServerConfig;

/// Shared handles for every request handler.
///
/// All services are constructed once at startup with their storage
/// handles injected, and shared behind `Arc` — no global singletons.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ArchivistRegistry>,
    pub directory: Arc<ArchiveDirectory>,
    pub catalog: Arc<DocumentCatalog>,
    pub ledger: Arc<RecordLedger>,
    pub query: Arc<QueryEngine>,
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Wire the full service stack: durable object store under
    /// `config.data_root`, embedded in-memory metadata stores.
    pub fn build(config: &ServerConfig) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.upload_dir)?;
        let objects: Arc<dyn ObjectStore> = Arc::new(FsObjectStore::open(&config.data_root)?);
        Ok(Self::wire(objects, config.upload_dir.clone()))
    }

    /// Wire the service stack over any object store. Tests use this with
    /// an in-memory store and a temp upload directory.
    pub fn wire(objects: Arc<dyn ObjectStore>, upload_dir: PathBuf) -> Self {
        let registry = Arc::new(ArchivistRegistry::new(Arc::new(
            InMemoryArchivistStore::new(),
        )));
        let directory = Arc::new(ArchiveDirectory::new(
            Arc::new(InMemoryArchiveStore::new()),
            Arc::clone(&registry),
        ));
        let catalog = Arc::new(DocumentCatalog::new(
            Arc::new(InMemoryDocumentStore::new()),
            objects,
            Arc::clone(&directory),
            Arc::clone(&registry),
        ));
        let records: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
        let ledger = Arc::new(RecordLedger::new(
            Arc::clone(&records),
            Arc::clone(&catalog),
            Arc::clone(&directory),
            Arc::clone(&registry),
        ));
        let query = Arc::new(QueryEngine::new(records, Arc::clone(&directory)));

        Self {
            registry,
            directory,
            catalog,
            ledger,
            query,
            upload_dir,
        }
    }
}
