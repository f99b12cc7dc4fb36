//! # API Facade
//!
//! The API layer is a **thin facade** over the session and command layers.
//! It is the single entry point for every stored-composition operation,
//! regardless of the UI in front of it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Loads and saves** around an [`EditingSession`]: every edit is
//!   `load → session mutation → save`
//! - **Applies configuration**: default view mode, render options
//! - **Returns structured types** (`Result<CmdResult>`, [`VisualTree`],
//!   [`PreviewSnapshot`])
//!
//! ## What the API Does NOT Do
//!
//! - **Editing logic**: that belongs in `commands/*.rs` and the session
//! - **I/O formatting**: no stdout, stderr or colours
//! - **Id generation**: the session mints block and column ids, the store
//!   mints composition ids
//!
//! ## Stale References
//!
//! An edit naming a column or block the composition does not have changes
//! nothing. The facade skips the save and reports a warning message rather
//! than an error, mirroring the no-op contract of the command layer.
//!
//! ## Generic Over CompositionStore
//!
//! `PaypageApi<S: CompositionStore>` is generic over the storage backend:
//! - Production: `PaypageApi<FileStore>`
//! - Testing: `PaypageApi<InMemoryStore>`

use crate::commands::block::BlockUpdate;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::PaypageConfig;
use crate::error::Result;
use crate::model::{BlockId, BlockVariant, ColumnId, ColumnPosition, CompositionId, ViewMode};
use crate::preview::PreviewSnapshot;
use crate::render::{self, RenderOptions, VisualTree};
use crate::session::EditingSession;
use crate::store::CompositionStore;

/// The main API facade for paypage operations.
pub struct PaypageApi<S: CompositionStore> {
    store: S,
    config: PaypageConfig,
}

impl<S: CompositionStore> PaypageApi<S> {
    pub fn new(store: S, config: PaypageConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &PaypageConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create(&mut self, name: &str) -> Result<CmdResult> {
        let mut session = EditingSession::new(name);
        let id = session.save(&mut self.store)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "Created composition \"{}\" ({})",
            name, id
        )));
        Ok(result.with_composition(session.into_composition()))
    }

    pub fn list(&self) -> Result<CmdResult> {
        let listed = self.store.list()?;
        let mut result = CmdResult::default();
        if listed.is_empty() {
            result.add_message(CmdMessage::info("No compositions yet."));
        }
        Ok(result.with_listed(listed))
    }

    pub fn show(&self, id: &CompositionId) -> Result<CmdResult> {
        let composition = self.store.load(id)?;
        Ok(CmdResult::default().with_composition(composition))
    }

    /// Render a stored composition. `None` uses the configured view mode.
    pub fn render(&self, id: &CompositionId, mode: Option<ViewMode>) -> Result<VisualTree> {
        let composition = self.store.load(id)?;
        let mode = mode.unwrap_or_else(|| self.config.view_mode());
        Ok(render::render_with(
            &composition,
            mode,
            &RenderOptions::from(&self.config),
        ))
    }

    /// Self-contained snapshot for a preview context.
    pub fn preview(&self, id: &CompositionId, mode: Option<ViewMode>) -> Result<PreviewSnapshot> {
        let mut session = EditingSession::open(self.store.load(id)?);
        session.set_view_mode(mode.unwrap_or_else(|| self.config.view_mode()));
        Ok(session.export_preview())
    }

    pub fn delete(&mut self, id: &CompositionId) -> Result<CmdResult> {
        let name = self.store.load(id)?.name;
        self.store.delete(id)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "Deleted composition \"{}\"",
            name
        )));
        Ok(result)
    }

    pub fn rename(&mut self, id: &CompositionId, name: &str) -> Result<CmdResult> {
        let (mut result, _) = self.edit(id, |s| s.rename(name))?;
        if result.is_changed() {
            result.add_message(CmdMessage::success(format!("Renamed to \"{}\"", name)));
        }
        Ok(result)
    }

    pub fn add_column(
        &mut self,
        id: &CompositionId,
        position: ColumnPosition,
        width: Option<String>,
    ) -> Result<CmdResult> {
        let (mut result, column_id) = self.edit(id, |s| {
            let column_id = s.add_column(position);
            if width.is_some() {
                s.set_column_width(&column_id, width);
            }
            column_id
        })?;
        result.add_message(CmdMessage::success(format!(
            "Added {} column {}",
            position, column_id
        )));
        Ok(result)
    }

    pub fn set_column_width(
        &mut self,
        id: &CompositionId,
        column_id: &ColumnId,
        width: Option<String>,
    ) -> Result<CmdResult> {
        let (result, _) = self.edit(id, |s| s.set_column_width(column_id, width))?;
        Ok(result)
    }

    pub fn delete_column(&mut self, id: &CompositionId, column_id: &ColumnId) -> Result<CmdResult> {
        let (mut result, _) = self.edit(id, |s| s.delete_column(column_id))?;
        if result.is_changed() {
            result.add_message(CmdMessage::success(format!("Removed column {}", column_id)));
        }
        Ok(result)
    }

    pub fn add_block(
        &mut self,
        id: &CompositionId,
        column_id: &ColumnId,
        variant: BlockVariant,
    ) -> Result<CmdResult> {
        let (mut result, block_id) = self.edit(id, |s| s.add_block(column_id, variant))?;
        if let Some(block_id) = block_id {
            result.add_message(CmdMessage::success(format!(
                "Added {} block {}",
                variant, block_id
            )));
        }
        Ok(result)
    }

    pub fn update_block(
        &mut self,
        id: &CompositionId,
        column_id: &ColumnId,
        block_id: &BlockId,
        update: &BlockUpdate,
    ) -> Result<CmdResult> {
        let (mut result, _) = self.edit(id, |s| s.update_block(column_id, block_id, update))?;
        if result.is_changed() {
            result.add_message(CmdMessage::success(format!("Updated block {}", block_id)));
        }
        Ok(result)
    }

    pub fn duplicate_block(
        &mut self,
        id: &CompositionId,
        column_id: &ColumnId,
        block_id: &BlockId,
    ) -> Result<CmdResult> {
        let (mut result, copy) = self.edit(id, |s| s.duplicate_block(column_id, block_id))?;
        if let Some(copy) = copy {
            result.add_message(CmdMessage::success(format!(
                "Duplicated {} as {}",
                block_id, copy
            )));
        }
        Ok(result)
    }

    pub fn move_block(
        &mut self,
        id: &CompositionId,
        from: &ColumnId,
        to: &ColumnId,
        block_id: &BlockId,
    ) -> Result<CmdResult> {
        let (mut result, _) = self.edit(id, |s| s.move_block(from, to, block_id))?;
        if result.is_changed() {
            result.add_message(CmdMessage::success(format!("Moved {} to {}", block_id, to)));
        }
        Ok(result)
    }

    pub fn delete_block(
        &mut self,
        id: &CompositionId,
        column_id: &ColumnId,
        block_id: &BlockId,
    ) -> Result<CmdResult> {
        let (mut result, _) = self.edit(id, |s| s.delete_block(column_id, block_id))?;
        if result.is_changed() {
            result.add_message(CmdMessage::success(format!("Removed block {}", block_id)));
        }
        Ok(result)
    }

    // load → edit → save. Nothing is written when the edit changed nothing.
    fn edit<T>(
        &mut self,
        id: &CompositionId,
        f: impl FnOnce(&mut EditingSession) -> T,
    ) -> Result<(CmdResult, T)> {
        let mut session = EditingSession::open(self.store.load(id)?);
        let out = f(&mut session);
        let mut result = CmdResult::default();
        if session.has_unsaved_changes() {
            session.save(&mut self.store)?;
            result.changed = true;
        } else {
            result.add_message(CmdMessage::warning(
                "Nothing changed: unknown column or block, or same value",
            ));
        }
        Ok((result.with_composition(session.into_composition()), out))
    }
}
