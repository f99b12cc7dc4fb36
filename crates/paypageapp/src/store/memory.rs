use super::mem_backend::MemBackend;
use super::record_store::RecordStore;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RecordStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::commands::{block, column};
    use crate::model::{BlockId, BlockVariant, ColumnId, ColumnPosition, Composition, CompositionId};
    use crate::store::CompositionStore;

    pub struct StoreFixture {
        pub store: InMemoryStore,
        pub ids: Vec<CompositionId>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                ids: Vec::new(),
            }
        }

        pub fn with_empty(mut self, name: &str) -> Self {
            let id = self.store.save(&Composition::new(name)).unwrap();
            self.ids.push(id);
            self
        }

        /// A page with one column per position and one block of each variant
        /// spread across them.
        pub fn with_full_page(mut self, name: &str) -> Self {
            let mut comp = Composition::new(name);
            for position in ColumnPosition::ALL {
                let id = ColumnId::new(format!("column-{}", position));
                comp = column::add(&comp, id, position);
            }
            let targets = ["top", "left", "left", "right", "top", "right", "bottom"];
            for (variant, target) in BlockVariant::ALL.into_iter().zip(targets) {
                let col = ColumnId::new(format!("column-{}", target));
                let id = BlockId::new(format!("{}-fixture", variant));
                comp = block::add(&comp, &col, id, variant);
            }
            let id = self.store.save(&comp).unwrap();
            self.ids.push(id);
            self
        }
    }
}
