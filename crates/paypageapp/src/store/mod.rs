//! # Storage Layer
//!
//! This module defines the persistence boundary for compositions. The
//! [`CompositionStore`] trait is all the rest of the library sees: save,
//! load, list and delete, keyed by a [`CompositionId`] the store assigns on
//! first save.
//!
//! ## Two Layers
//!
//! ```text
//!   CompositionStore (trait)
//!          ▲
//!   RecordStore<B>          what: records, timestamps, upsert, ordering
//!          │
//!   StorageBackend (trait)  how: raw JSON strings by id
//!      ├── FsBackend        checkout-{id}.json files, atomic writes
//!      └── MemBackend       RefCell map, for tests
//! ```
//!
//! ## Record Format
//!
//! ```json
//! {
//!   "id": "6f0c…",
//!   "name": "Promo",
//!   "columns": [{"id": "column-top-…", "position": "top", "components": [ … ]}],
//!   "created_at": "2026-01-01T10:00:00Z",
//!   "updated_at": "2026-01-02T09:30:00Z"
//! }
//! ```
//!
//! Records from the flat canvas era carry a top-level `components` list
//! instead of `columns`; they load as a single `top` column.
//!
//! ## Semantics
//!
//! - `save` is an upsert. Saving an existing id keeps its `created_at`.
//! - `list` orders by `updated_at`, newest first. Unreadable records are
//!   skipped with a warning so one bad file does not hide the rest.
//! - `load` and `delete` of an unknown id fail with
//!   [`PaypageError::CompositionNotFound`](crate::error::PaypageError).
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production store in the data directory.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::model::{
    decode_blocks, BlockWire, Column, ColumnId, ColumnPosition, Composition, CompositionId,
};

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod record_store;

/// Abstract interface for composition persistence.
pub trait CompositionStore {
    /// Create or update. Returns the id the composition is stored under.
    fn save(&mut self, composition: &Composition) -> Result<CompositionId>;

    fn load(&self, id: &CompositionId) -> Result<Composition>;

    /// Summaries, most recently updated first.
    fn list(&self) -> Result<Vec<CompositionSummary>>;

    fn delete(&mut self, id: &CompositionId) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionRecord {
    pub id: CompositionId,
    pub name: String,
    pub columns: Vec<Column>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompositionRecord {
    pub fn into_composition(self) -> Composition {
        Composition {
            id: Some(self.id),
            name: self.name,
            columns: self.columns,
            ..Default::default()
        }
    }

    pub fn summary(&self) -> CompositionSummary {
        CompositionSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            columns: self.columns.len(),
            blocks: self.columns.iter().map(|c| c.blocks.len()).sum(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Deserialize)]
struct RecordHelper {
    id: CompositionId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    columns: Option<Vec<Column>>,
    #[serde(default)]
    components: Option<Vec<BlockWire>>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

// Flat `components` records become one top column.
impl<'de> Deserialize<'de> for CompositionRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let helper = RecordHelper::deserialize(deserializer)?;

        let columns = match (helper.columns, helper.components) {
            (Some(columns), _) => columns,
            (None, Some(flat)) => vec![Column {
                id: ColumnId::new(format!("column-top-{}", helper.id)),
                position: ColumnPosition::Top,
                width: None,
                blocks: decode_blocks(flat),
            }],
            (None, None) => Vec::new(),
        };
        let created_at = helper.created_at.unwrap_or_default();

        Ok(CompositionRecord {
            id: helper.id,
            name: helper.name,
            columns,
            created_at,
            updated_at: helper.updated_at.unwrap_or(created_at),
        })
    }
}

/// Listing entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionSummary {
    pub id: CompositionId,
    pub name: String,
    pub columns: usize,
    pub blocks: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
