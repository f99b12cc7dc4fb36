//! Self-contained preview hand-off.
//!
//! A [`PreviewSnapshot`] carries everything a separate rendering context
//! needs to show a read-only preview: the name, the layout and the view
//! mode. It has no link back to the session or the store it came from.
//!
//! ```json
//! {"name": "Promo", "viewMode": "mobile", "columns": [ … ]}
//! ```
//!
//! Snapshots written by the flat canvas (`components` instead of `columns`)
//! are still accepted and come back as a single top column.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::model::{
    decode_blocks, BlockWire, Column, ColumnId, ColumnPosition, Composition, ViewMode,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSnapshot {
    pub name: String,
    pub view_mode: ViewMode,
    pub columns: Vec<Column>,
}

impl PreviewSnapshot {
    pub fn from_composition(composition: &Composition) -> Self {
        Self {
            name: composition.name.clone(),
            view_mode: composition.view_mode,
            columns: composition.columns.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// A detached composition: no store id.
    pub fn into_composition(self) -> Composition {
        Composition {
            id: None,
            name: self.name,
            columns: self.columns,
            view_mode: self.view_mode,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotHelper {
    #[serde(default)]
    name: String,
    #[serde(default)]
    view_mode: ViewMode,
    #[serde(default)]
    columns: Option<Vec<Column>>,
    #[serde(default)]
    components: Option<Vec<BlockWire>>,
}

impl<'de> Deserialize<'de> for PreviewSnapshot {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let helper = SnapshotHelper::deserialize(deserializer)?;
        let columns = match (helper.columns, helper.components) {
            (Some(columns), _) => columns,
            (None, Some(flat)) => vec![Column {
                id: ColumnId::new("column-top-preview"),
                position: ColumnPosition::Top,
                width: None,
                blocks: decode_blocks(flat),
            }],
            (None, None) => Vec::new(),
        };
        Ok(PreviewSnapshot {
            name: helper.name,
            view_mode: helper.view_mode,
            columns,
        })
    }
}
