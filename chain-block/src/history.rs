//! In-memory chain history

use crate::{Block, BlockId, History};
use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Set of accepted block ids, shared between threads.
///
/// Does not validate anything: callers check blocks before appending them.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    ids: RwLock<HashSet<BlockId>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History bootstrapped with the genesis block. Genesis is accepted
    /// unconditionally since it carries no verifiable signature.
    pub fn with_genesis<CD, TD>(genesis: &Block<CD, TD>) -> Self {
        let history = Self::new();
        match genesis.id() {
            Some(id) => history.insert(id),
            None => warn!("Genesis block has no id, history left empty"),
        }
        history
    }

    /// Record an accepted block. Returns `false` for an unsigned block or
    /// one that was already present.
    pub fn append<CD, TD>(&self, block: &Block<CD, TD>) -> bool {
        let Some(id) = block.id() else {
            warn!("Refusing to append unsigned block");
            return false;
        };
        let inserted = self.ids.write().insert(id);
        if inserted {
            debug!("Appended block {} to history", block);
        }
        inserted
    }

    pub fn insert(&self, id: BlockId) {
        self.ids.write().insert(id);
    }

    pub fn len(&self) -> usize {
        self.ids.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.read().is_empty()
    }
}

impl History for InMemoryHistory {
    fn contains(&self, id: &BlockId) -> bool {
        self.ids.read().contains(id)
    }
}
