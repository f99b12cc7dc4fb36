//! # Editing Session
//!
//! An [`EditingSession`] is one operator working on one composition. It
//! wraps the pure Column Store commands with the state a builder UI needs:
//!
//! - **Selection**: at most one block is open in the settings surface.
//! - **Unsaved changes**: set by every operation that changes the
//!   composition, cleared only when a save succeeds.
//! - **Id generation**: a session-owned [`IdGenerator`].
//! - **Drag state**: the item currently being dragged, if any.
//!
//! ## Selection
//!
//! ```text
//!                 select(id)
//!   Unselected ─────────────────▶ Selected(block, column)
//!        ▲                               │
//!        └── clear / finish_inline_edit ─┤
//!        └── selected block deleted ─────┤
//!        └── its column deleted ─────────┘
//! ```
//!
//! The selection holds ids only. [`EditingSession::selected`] resolves them
//! against the current composition every time, so a stale selection can
//! never dangle.
//!
//! Loading another composition into the session resets the selection.

use tracing::debug;

use crate::commands::block::{self, BlockUpdate};
use crate::commands::column;
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::model::{
    Block, BlockId, BlockVariant, ColumnId, ColumnPosition, Composition, CompositionId, ViewMode,
};
use crate::preview::PreviewSnapshot;
use crate::store::CompositionStore;
use crate::style::BlockStyle;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected {
        block_id: BlockId,
        column_id: ColumnId,
    },
}

/// What the operator is dragging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    /// A new block from the palette.
    Palette(BlockVariant),
    /// An existing block.
    Block { column: ColumnId, block: BlockId },
}

/// The selected block and the column it lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedBlock<'a> {
    pub block: &'a Block,
    pub column_id: &'a ColumnId,
}

#[derive(Debug, Default)]
pub struct EditingSession {
    composition: Composition,
    selection: Selection,
    unsaved: bool,
    ids: IdGenerator,
    drag: Option<DragItem>,
}

impl EditingSession {
    /// A fresh, empty composition.
    pub fn new(name: impl Into<String>) -> Self {
        Self::open(Composition::new(name))
    }

    /// Start editing an existing composition.
    pub fn open(composition: Composition) -> Self {
        Self {
            composition,
            ..Default::default()
        }
    }

    /// Swap in another composition, dropping selection and drag state.
    pub fn load(&mut self, composition: Composition) {
        self.composition = composition;
        self.selection = Selection::Unselected;
        self.drag = None;
        self.unsaved = false;
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn into_composition(self) -> Composition {
        self.composition
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn view_mode(&self) -> ViewMode {
        self.composition.view_mode
    }

    // --- Columns ---

    pub fn add_column(&mut self, position: ColumnPosition) -> ColumnId {
        let id = self.ids.column_id(position);
        let next = column::add(&self.composition, id.clone(), position);
        self.apply(next);
        id
    }

    pub fn delete_column(&mut self, column_id: &ColumnId) {
        let next = column::delete(&self.composition, column_id);
        self.apply(next);
    }

    pub fn set_column_width(&mut self, column_id: &ColumnId, width: Option<String>) {
        let next = column::set_width(&self.composition, column_id, width);
        self.apply(next);
    }

    // --- Blocks ---

    /// `None` when the column does not exist.
    pub fn add_block(&mut self, column_id: &ColumnId, variant: BlockVariant) -> Option<BlockId> {
        if self.composition.column(column_id).is_none() {
            debug!(column = %column_id, "add_block: no such column");
            return None;
        }
        let id = self.ids.block_id(variant);
        let next = block::add(&self.composition, column_id, id.clone(), variant);
        self.apply(next);
        Some(id)
    }

    pub fn delete_block(&mut self, column_id: &ColumnId, block_id: &BlockId) {
        let next = block::delete(&self.composition, column_id, block_id);
        self.apply(next);
    }

    pub fn update_block(&mut self, column_id: &ColumnId, block_id: &BlockId, update: &BlockUpdate) {
        let next = block::update(&self.composition, column_id, block_id, update);
        self.apply(next);
    }

    /// Id of the copy, or `None` when the block was not found.
    pub fn duplicate_block(&mut self, column_id: &ColumnId, block_id: &BlockId) -> Option<BlockId> {
        let variant = self
            .composition
            .column(column_id)
            .and_then(|c| c.block(block_id))
            .map(Block::variant)?;
        let new_id = self.ids.block_id(variant);
        let next = block::duplicate(&self.composition, column_id, block_id, new_id.clone());
        self.apply(next);
        Some(new_id)
    }

    pub fn move_block(&mut self, from: &ColumnId, to: &ColumnId, block_id: &BlockId) {
        let next = block::move_block(&self.composition, from, to, block_id);
        self.apply(next);
    }

    // --- Composition ---

    pub fn rename(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name != self.composition.name {
            self.composition.name = name;
            self.unsaved = true;
        }
    }

    /// Presentation only; never marks the session dirty.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.composition.view_mode = mode;
    }

    // --- Selection ---

    /// Select a block wherever it lives. Unknown ids leave the selection alone.
    pub fn select(&mut self, block_id: &BlockId) -> bool {
        match self.composition.find_block(block_id) {
            Some((column, _)) => {
                self.selection = Selection::Selected {
                    block_id: block_id.clone(),
                    column_id: column.id.clone(),
                };
                true
            }
            None => {
                debug!(block = %block_id, "select: no such block");
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.selection = Selection::Unselected;
    }

    pub fn selected(&self) -> Option<SelectedBlock<'_>> {
        let Selection::Selected { block_id, .. } = &self.selection else {
            return None;
        };
        self.composition
            .find_block(block_id)
            .map(|(column, block)| SelectedBlock {
                block,
                column_id: &column.id,
            })
    }

    fn selected_ids(&self) -> Option<(ColumnId, BlockId)> {
        self.selected()
            .map(|s| (s.column_id.clone(), s.block.id.clone()))
    }

    pub fn update_selected_content(&mut self, raw: impl Into<String>) {
        if let Some((column, block)) = self.selected_ids() {
            self.update_block(&column, &block, &BlockUpdate::content(raw));
        }
    }

    pub fn update_selected_style(&mut self, patch: BlockStyle) {
        if let Some((column, block)) = self.selected_ids() {
            self.update_block(&column, &block, &BlockUpdate::style(patch));
        }
    }

    /// Commit inline text editing and close the selection.
    pub fn finish_inline_edit(&mut self, raw: impl Into<String>) {
        self.update_selected_content(raw);
        self.clear();
    }

    pub fn duplicate_selected(&mut self) -> Option<BlockId> {
        let (column, block) = self.selected_ids()?;
        self.duplicate_block(&column, &block)
    }

    pub fn delete_selected(&mut self) {
        if let Some((column, block)) = self.selected_ids() {
            self.delete_block(&column, &block);
        }
    }

    // --- Drag and drop ---

    pub fn start_drag(&mut self, item: DragItem) {
        self.drag = Some(item);
    }

    pub fn dragging(&self) -> Option<&DragItem> {
        self.drag.as_ref()
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Finish the drag over `target`. Returns the id of the block that landed.
    pub fn drop_on(&mut self, target: &ColumnId) -> Option<BlockId> {
        match self.drag.take()? {
            DragItem::Palette(variant) => self.add_block(target, variant),
            DragItem::Block { column, block } => {
                self.move_block(&column, target, &block);
                self.composition
                    .column(target)
                    .filter(|c| c.contains(&block))
                    .map(|_| block)
            }
        }
    }

    // --- Persistence ---

    /// Save through `store`. The unsaved flag clears only on success; on
    /// failure the edits stay in memory and the error is returned.
    pub fn save<S: CompositionStore>(&mut self, store: &mut S) -> Result<CompositionId> {
        let id = store.save(&self.composition)?;
        self.composition.id = Some(id.clone());
        self.unsaved = false;
        Ok(id)
    }

    pub fn export_preview(&self) -> PreviewSnapshot {
        PreviewSnapshot::from_composition(&self.composition)
    }

    fn apply(&mut self, next: Composition) {
        if next == self.composition {
            return;
        }
        self.composition = next;
        self.unsaved = true;
        self.reconcile_selection();
    }

    // Follow a moved block; drop the selection when the block is gone.
    fn reconcile_selection(&mut self) {
        let Selection::Selected { block_id, .. } = &self.selection else {
            return;
        };
        self.selection = match self.composition.find_block(block_id) {
            Some((column, _)) => Selection::Selected {
                block_id: block_id.clone(),
                column_id: column.id.clone(),
            },
            None => Selection::Unselected,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BlockContent;
    use crate::store::memory::InMemoryStore;
    use crate::style::TextAlign;

    fn session_with_block() -> (EditingSession, ColumnId, BlockId) {
        let mut session = EditingSession::new("Promo");
        let col = session.add_column(ColumnPosition::Left);
        let block = session.add_block(&col, BlockVariant::Text).unwrap();
        (session, col, block)
    }

    #[test]
    fn new_session_is_clean_and_unselected() {
        let session = EditingSession::new("Promo");
        assert!(!session.has_unsaved_changes());
        assert_eq!(session.selection(), &Selection::Unselected);
        assert!(session.selected().is_none());
    }

    #[test]
    fn mutations_mark_unsaved() {
        let (session, _, _) = session_with_block();
        assert!(session.has_unsaved_changes());
    }

    #[test]
    fn view_mode_does_not_mark_unsaved() {
        let mut session = EditingSession::new("Promo");
        session.set_view_mode(ViewMode::Mobile);
        assert_eq!(session.view_mode(), ViewMode::Mobile);
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn no_op_edits_leave_the_flag_alone() {
        let mut session = EditingSession::new("Promo");
        session.delete_column(&ColumnId::new("ghost"));
        session.rename("Promo");
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn add_block_to_missing_column_returns_none() {
        let mut session = EditingSession::new("Promo");
        assert!(session
            .add_block(&ColumnId::new("ghost"), BlockVariant::Image)
            .is_none());
    }

    #[test]
    fn selected_resolves_block_and_column() {
        let (mut session, col, block) = session_with_block();
        assert!(session.select(&block));
        let selected = session.selected().unwrap();
        assert_eq!(selected.block.id, block);
        assert_eq!(selected.column_id, &col);
    }

    #[test]
    fn selecting_unknown_block_keeps_selection() {
        let (mut session, _, block) = session_with_block();
        session.select(&block);
        assert!(!session.select(&BlockId::new("ghost")));
        assert_eq!(session.selected().unwrap().block.id, block);
    }

    #[test]
    fn deleting_selected_block_clears_selection() {
        let (mut session, col, block) = session_with_block();
        session.select(&block);
        session.delete_block(&col, &block);
        assert_eq!(session.selection(), &Selection::Unselected);
    }

    #[test]
    fn deleting_column_of_selected_block_clears_selection() {
        let (mut session, col, block) = session_with_block();
        session.select(&block);
        session.delete_column(&col);
        assert_eq!(session.selection(), &Selection::Unselected);
    }

    #[test]
    fn deleting_another_block_keeps_selection() {
        let (mut session, col, block) = session_with_block();
        let other = session.add_block(&col, BlockVariant::Image).unwrap();
        session.select(&block);
        session.delete_block(&col, &other);
        assert!(session.selected().is_some());
    }

    #[test]
    fn selection_follows_a_moved_block() {
        let (mut session, col, block) = session_with_block();
        let right = session.add_column(ColumnPosition::Right);
        session.select(&block);
        session.move_block(&col, &right, &block);
        assert_eq!(session.selected().unwrap().column_id, &right);
    }

    #[test]
    fn loading_resets_selection() {
        let (mut session, _, block) = session_with_block();
        session.select(&block);
        session.load(Composition::new("Other"));
        assert_eq!(session.selection(), &Selection::Unselected);
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn settings_edits_route_to_selected_block() {
        let (mut session, _, block) = session_with_block();
        session.select(&block);
        session.update_selected_content("Frete grátis");
        session.update_selected_style(BlockStyle {
            text_align: Some(TextAlign::Justify),
            ..Default::default()
        });
        let selected = session.selected().unwrap().block;
        assert_eq!(selected.content, BlockContent::Text("Frete grátis".into()));
        assert_eq!(
            selected.style.as_ref().and_then(|s| s.text_align),
            Some(TextAlign::Justify)
        );
    }

    #[test]
    fn settings_edits_without_selection_are_no_ops() {
        let mut session = EditingSession::new("Promo");
        session.update_selected_content("nothing");
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn finishing_inline_edit_commits_and_clears() {
        let (mut session, _, block) = session_with_block();
        session.select(&block);
        session.finish_inline_edit("Compre agora");
        assert_eq!(session.selection(), &Selection::Unselected);
        let (_, stored) = session.composition().find_block(&block).unwrap();
        assert_eq!(stored.content, BlockContent::Text("Compre agora".into()));
    }

    #[test]
    fn duplicate_selected_mints_a_new_id() {
        let (mut session, col, block) = session_with_block();
        session.select(&block);
        let copy = session.duplicate_selected().unwrap();
        assert_ne!(copy, block);
        let ids: Vec<_> = session
            .composition()
            .column(&col)
            .unwrap()
            .blocks
            .iter()
            .map(|b| b.id.clone())
            .collect();
        assert_eq!(ids, vec![block, copy]);
    }

    #[test]
    fn delete_selected_removes_block() {
        let (mut session, _, block) = session_with_block();
        session.select(&block);
        session.delete_selected();
        assert!(session.composition().find_block(&block).is_none());
        assert_eq!(session.selection(), &Selection::Unselected);
    }

    #[test]
    fn palette_drop_adds_a_block() {
        let mut session = EditingSession::new("Promo");
        let col = session.add_column(ColumnPosition::Top);
        session.start_drag(DragItem::Palette(BlockVariant::Countdown));
        let id = session.drop_on(&col).unwrap();
        assert!(session.dragging().is_none());
        let (_, block) = session.composition().find_block(&id).unwrap();
        assert_eq!(block.variant(), BlockVariant::Countdown);
    }

    #[test]
    fn block_drop_moves_between_columns() {
        let (mut session, col, block) = session_with_block();
        let bottom = session.add_column(ColumnPosition::Bottom);
        session.start_drag(DragItem::Block {
            column: col.clone(),
            block: block.clone(),
        });
        assert_eq!(session.drop_on(&bottom), Some(block.clone()));
        assert!(session.composition().column(&col).unwrap().blocks.is_empty());
    }

    #[test]
    fn cancelled_drag_drops_nothing() {
        let mut session = EditingSession::new("Promo");
        let col = session.add_column(ColumnPosition::Top);
        session.start_drag(DragItem::Palette(BlockVariant::Text));
        session.cancel_drag();
        assert!(session.drop_on(&col).is_none());
        assert_eq!(session.composition().block_count(), 0);
    }

    #[test]
    fn drag_state_is_per_session() {
        let mut a = EditingSession::new("A");
        let b = EditingSession::new("B");
        a.start_drag(DragItem::Palette(BlockVariant::Video));
        assert!(a.dragging().is_some());
        assert!(b.dragging().is_none());
    }

    #[test]
    fn successful_save_clears_flag_and_assigns_id() {
        let (mut session, _, _) = session_with_block();
        let mut store = InMemoryStore::new();
        let id = session.save(&mut store).unwrap();
        assert!(!session.has_unsaved_changes());
        assert_eq!(session.composition().id, Some(id));
    }

    #[test]
    fn failed_save_keeps_flag_and_edits() {
        let (mut session, _, block) = session_with_block();
        let mut store = InMemoryStore::new();
        store.backend().set_simulate_write_error(true);

        assert!(session.save(&mut store).is_err());
        assert!(session.has_unsaved_changes());
        assert!(session.composition().find_block(&block).is_some());
        assert_eq!(session.composition().id, None);
    }
}
