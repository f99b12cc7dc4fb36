use super::backend::StorageBackend;
use crate::error::{PaypageError, Result};
use crate::model::CompositionId;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const PREFIX: &str = "checkout-";
const EXT: &str = ".json";

/// One JSON file per composition under `root`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // Ids come from the command line; keep them inside `root`.
    fn is_safe(id: &CompositionId) -> bool {
        !id.as_str().is_empty()
            && id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(PaypageError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_record(&self, id: &CompositionId) -> Result<Option<String>> {
        if !Self::is_safe(id) {
            return Ok(None);
        }
        match fs::read_to_string(self.record_path(id)) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PaypageError::Io(e)),
        }
    }

    fn write_record(&self, id: &CompositionId, json: &str) -> Result<()> {
        if !Self::is_safe(id) {
            return Err(PaypageError::Store(format!("Invalid composition id: {}", id)));
        }
        self.ensure_dir()?;
        let tmp_file = self.root.join(format!(".checkout-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, json).map_err(PaypageError::Io)?;
        fs::rename(&tmp_file, self.record_path(id)).map_err(PaypageError::Io)?;
        Ok(())
    }

    fn delete_record(&self, id: &CompositionId) -> Result<bool> {
        if !Self::is_safe(id) {
            return Ok(false);
        }
        match fs::remove_file(self.record_path(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PaypageError::Io(e)),
        }
    }

    fn list_record_ids(&self) -> Result<Vec<CompositionId>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(PaypageError::Io)? {
            let path = entry.map_err(PaypageError::Io)?.path();
            if !path.is_file() {
                continue;
            }
            let id = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|name| name.strip_prefix(PREFIX))
                .and_then(|rest| rest.strip_suffix(EXT));
            if let Some(id) = id {
                ids.push(CompositionId::new(id));
            }
        }
        Ok(ids)
    }

    fn record_path(&self, id: &CompositionId) -> PathBuf {
        self.root.join(format!("{}{}{}", PREFIX, id, EXT))
    }
}
