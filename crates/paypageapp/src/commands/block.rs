use tracing::debug;

use crate::content;
use crate::model::{Block, BlockId, BlockVariant, ColumnId, Composition};
use crate::style::BlockStyle;

/// Partial edit of a block. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockUpdate {
    /// Raw stored form; decoded against the block's variant.
    pub content: Option<String>,
    /// Merged field by field over the current overrides.
    pub style: Option<BlockStyle>,
}

impl BlockUpdate {
    pub fn content(raw: impl Into<String>) -> Self {
        Self {
            content: Some(raw.into()),
            style: None,
        }
    }

    pub fn style(patch: BlockStyle) -> Self {
        Self {
            content: None,
            style: Some(patch),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.style.is_none()
    }
}

/// Append a block with the variant's default content.
pub fn add(
    composition: &Composition,
    column_id: &ColumnId,
    id: BlockId,
    variant: BlockVariant,
) -> Composition {
    let mut next = composition.clone();
    match next.column_mut(column_id) {
        Some(column) => column.blocks.push(Block::new(id, variant)),
        None => debug!(column = %column_id, %variant, "add: no such column"),
    }
    next
}

pub fn delete(composition: &Composition, column_id: &ColumnId, block_id: &BlockId) -> Composition {
    let mut next = composition.clone();
    match next.column_mut(column_id) {
        Some(column) => {
            let before = column.blocks.len();
            column.blocks.retain(|b| &b.id != block_id);
            if column.blocks.len() == before {
                debug!(column = %column_id, block = %block_id, "delete: no such block");
            }
        }
        None => debug!(column = %column_id, "delete: no such column"),
    }
    next
}

pub fn update(
    composition: &Composition,
    column_id: &ColumnId,
    block_id: &BlockId,
    update: &BlockUpdate,
) -> Composition {
    let mut next = composition.clone();
    let block = next
        .column_mut(column_id)
        .and_then(|c| c.blocks.iter_mut().find(|b| &b.id == block_id));
    let Some(block) = block else {
        debug!(column = %column_id, block = %block_id, "update: no such block");
        return next;
    };

    if let Some(raw) = &update.content {
        block.content = content::decode(block.variant(), raw);
    }
    if let Some(patch) = &update.style {
        block
            .style
            .get_or_insert_with(BlockStyle::default)
            .merge(patch);
    }
    next
}

/// Insert a copy right after the original, under `new_id`.
pub fn duplicate(
    composition: &Composition,
    column_id: &ColumnId,
    block_id: &BlockId,
    new_id: BlockId,
) -> Composition {
    let mut next = composition.clone();
    let Some(column) = next.column_mut(column_id) else {
        debug!(column = %column_id, "duplicate: no such column");
        return next;
    };
    match column.blocks.iter().position(|b| &b.id == block_id) {
        Some(at) => {
            let mut copy = column.blocks[at].clone();
            copy.id = new_id;
            column.blocks.insert(at + 1, copy);
        }
        None => debug!(column = %column_id, block = %block_id, "duplicate: no such block"),
    }
    next
}

/// Take the block out of `from` and append it to `to`.
///
/// Nothing happens unless the block is in `from` and `to` exists.
pub fn move_block(
    composition: &Composition,
    from: &ColumnId,
    to: &ColumnId,
    block_id: &BlockId,
) -> Composition {
    let mut next = composition.clone();
    if next.column(to).is_none() {
        debug!(column = %to, "move: no such destination column");
        return next;
    }
    let taken = next.column_mut(from).and_then(|column| {
        let at = column.blocks.iter().position(|b| &b.id == block_id)?;
        Some(column.blocks.remove(at))
    });
    match taken {
        Some(block) => {
            if let Some(dest) = next.column_mut(to) {
                dest.blocks.push(block);
            }
        }
        None => debug!(column = %from, block = %block_id, "move: block not in source"),
    }
    next
}
