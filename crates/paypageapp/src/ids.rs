//! Session-scoped id generation for blocks and columns.
//!
//! Ids follow the stored format `{prefix}-{unix_millis}-{counter}{random}`:
//! blocks use the variant name as prefix (`text-…`), columns use
//! `column-{position}` (`column-left-…`). The counter is owned by the
//! generator, so two ids minted by the same session never collide even when
//! they share a millisecond. The random part separates sessions.

use chrono::Utc;
use uuid::Uuid;

use crate::model::{BlockId, BlockVariant, ColumnId, ColumnPosition};

const RANDOM_LEN: usize = 9;

#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_id(&mut self, variant: BlockVariant) -> BlockId {
        BlockId::new(self.mint(variant.as_str()))
    }

    pub fn column_id(&mut self, position: ColumnPosition) -> ColumnId {
        ColumnId::new(self.mint(&format!("column-{}", position.as_str())))
    }

    fn mint(&mut self, prefix: &str) -> String {
        self.counter += 1;
        let random = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}{}",
            prefix,
            Utc::now().timestamp_millis(),
            self.counter,
            &random[..RANDOM_LEN]
        )
    }
}
