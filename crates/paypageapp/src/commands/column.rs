use tracing::debug;

use crate::model::{Column, ColumnId, ColumnPosition, Composition};

/// Append an empty column at `position`.
pub fn add(composition: &Composition, id: ColumnId, position: ColumnPosition) -> Composition {
    let mut next = composition.clone();
    next.columns.push(Column::new(id, position));
    next
}

/// Remove the column and every block in it.
pub fn delete(composition: &Composition, column_id: &ColumnId) -> Composition {
    let mut next = composition.clone();
    let before = next.columns.len();
    next.columns.retain(|c| &c.id != column_id);
    if next.columns.len() == before {
        debug!(column = %column_id, "delete: no such column");
    }
    next
}

/// Set or clear the layout width hint.
pub fn set_width(
    composition: &Composition,
    column_id: &ColumnId,
    width: Option<String>,
) -> Composition {
    let mut next = composition.clone();
    match next.column_mut(column_id) {
        Some(column) => column.width = width,
        None => debug!(column = %column_id, "set_width: no such column"),
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockId, BlockVariant};

    fn with_columns() -> Composition {
        let comp = Composition::new("Promo");
        let comp = add(&comp, ColumnId::new("c1"), ColumnPosition::Left);
        add(&comp, ColumnId::new("c2"), ColumnPosition::Left)
    }

    #[test]
    fn same_position_columns_keep_append_order() {
        let comp = with_columns();
        let ids: Vec<_> = comp
            .columns_at(ColumnPosition::Left)
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c1", "c2"]);
        assert!(comp.columns.iter().all(|c| c.blocks.is_empty()));
    }

    #[test]
    fn add_leaves_the_input_untouched() {
        let comp = Composition::new("Promo");
        let next = add(&comp, ColumnId::new("c1"), ColumnPosition::Top);
        assert!(comp.columns.is_empty());
        assert_eq!(next.columns.len(), 1);
    }

    #[test]
    fn delete_cascades_to_blocks() {
        let mut comp = with_columns();
        comp.columns[0]
            .blocks
            .push(Block::new(BlockId::new("b1"), BlockVariant::Text));
        let next = delete(&comp, &ColumnId::new("c1"));
        assert_eq!(next.columns.len(), 1);
        assert!(next.find_block(&BlockId::new("b1")).is_none());
    }

    #[test]
    fn deleting_unknown_column_is_a_no_op() {
        let comp = with_columns();
        assert_eq!(delete(&comp, &ColumnId::new("ghost")), comp);
    }

    #[test]
    fn width_hint_can_be_set_and_cleared() {
        let comp = with_columns();
        let next = set_width(&comp, &ColumnId::new("c2"), Some("280px".into()));
        assert_eq!(next.columns[1].width.as_deref(), Some("280px"));
        let cleared = set_width(&next, &ColumnId::new("c2"), None);
        assert_eq!(cleared.columns[1].width, None);
    }
}
