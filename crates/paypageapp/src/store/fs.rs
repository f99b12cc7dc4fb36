use super::fs_backend::FsBackend;
use super::record_store::RecordStore;
use std::path::PathBuf;

/// Compositions as `checkout-{id}.json` files in a data directory.
pub type FileStore = RecordStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        RecordStore::with_backend(FsBackend::new(root))
    }
}
