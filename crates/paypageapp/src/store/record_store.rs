use super::backend::StorageBackend;
use super::{CompositionRecord, CompositionStore, CompositionSummary};
use crate::error::{PaypageError, Result};
use crate::model::{Composition, CompositionId};
use chrono::Utc;
use tracing::{info, warn};

pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read(&self, id: &CompositionId) -> Result<Option<CompositionRecord>> {
        match self.backend.read_record(id)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn write(&self, composition: &Composition) -> Result<CompositionId> {
        let id = composition
            .id
            .clone()
            .unwrap_or_else(CompositionId::generate);
        let now = Utc::now();
        // Upsert: an existing record keeps its creation time.
        let created_at = match self.read(&id) {
            Ok(Some(existing)) => existing.created_at,
            _ => now,
        };

        let record = CompositionRecord {
            id: id.clone(),
            name: composition.name.clone(),
            columns: composition.columns.clone(),
            created_at,
            updated_at: now,
        };
        let json = serde_json::to_string_pretty(&record)?;
        self.backend.write_record(&id, &json)?;
        Ok(id)
    }
}

impl<B: StorageBackend> CompositionStore for RecordStore<B> {
    fn save(&mut self, composition: &Composition) -> Result<CompositionId> {
        match self.write(composition) {
            Ok(id) => {
                info!(id = %id, name = %composition.name, "composition saved");
                Ok(id)
            }
            Err(e) => {
                warn!(name = %composition.name, error = %e, "failed to save composition");
                Err(e)
            }
        }
    }

    fn load(&self, id: &CompositionId) -> Result<Composition> {
        match self.read(id) {
            Ok(Some(record)) => Ok(record.into_composition()),
            Ok(None) => Err(PaypageError::CompositionNotFound(id.clone())),
            Err(e) => {
                warn!(id = %id, error = %e, "failed to load composition");
                Err(e)
            }
        }
    }

    fn list(&self) -> Result<Vec<CompositionSummary>> {
        let mut summaries = Vec::new();
        for id in self.backend.list_record_ids()? {
            match self.read(&id) {
                Ok(Some(record)) => summaries.push(record.summary()),
                Ok(None) => {}
                Err(e) => warn!(id = %id, error = %e, "skipping unreadable composition"),
            }
        }
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    fn delete(&mut self, id: &CompositionId) -> Result<()> {
        match self.backend.delete_record(id) {
            Ok(true) => {
                info!(id = %id, "composition deleted");
                Ok(())
            }
            Ok(false) => Err(PaypageError::CompositionNotFound(id.clone())),
            Err(e) => {
                warn!(id = %id, error = %e, "failed to delete composition");
                Err(e)
            }
        }
    }
}
