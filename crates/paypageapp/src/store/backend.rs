use crate::error::Result;
use crate::model::CompositionId;
use std::path::PathBuf;

/// Abstract interface for raw record I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (timestamps, upserts, ordering).
pub trait StorageBackend {
    /// Read the raw JSON of a record.
    /// Returns Ok(None) if it does not exist.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_record(&self, id: &CompositionId) -> Result<Option<String>>;

    /// Write a record.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_record(&self, id: &CompositionId, json: &str) -> Result<()>;

    /// Remove a record. Returns false if there was nothing to remove.
    fn delete_record(&self, id: &CompositionId) -> Result<bool>;

    /// Ids of every stored record, in no particular order.
    fn list_record_ids(&self) -> Result<Vec<CompositionId>>;

    /// Where the record lives. Virtual for MemBackend.
    fn record_path(&self, id: &CompositionId) -> PathBuf;
}
