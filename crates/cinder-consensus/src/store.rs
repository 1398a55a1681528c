use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use cinder_core::error::StoreError;
use cinder_core::header::BlockHeader;
use cinder_core::types::{BlockHash, Height};

/// Read access to resident blocks, keyed by hash.
///
/// This is the only capability the consensus checks need from storage.
/// Implementations may block on I/O; callers never retry. "Not found" is
/// `Ok(None)`; `Err` is reserved for backend failures.
pub trait BlockStore {
    fn get(&self, hash: &BlockHash) -> Result<Option<StoredBlock>, StoreError>;
}

/// A block header annotated with its position in the chain.
///
/// The hash is computed once at construction; `StoredBlock` values are
/// cheap to clone and compare.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBlock {
    header: BlockHeader,
    height: Height,
    hash: BlockHash,
}

impl StoredBlock {
    pub fn new(header: BlockHeader, height: Height) -> Self {
        let hash = header.hash();
        Self {
            header,
            height,
            hash,
        }
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn hash(&self) -> BlockHash {
        self.hash
    }

    /// Fetch this block's parent, `Ok(None)` when it is not resident.
    pub fn prev<S: BlockStore + ?Sized>(&self, store: &S) -> Result<Option<StoredBlock>, StoreError> {
        store.get(&self.header.prev_hash)
    }
}

/// Hash-map backed store, used by tests and light tooling.
#[derive(Debug, Default)]
pub struct MemoryBlockStore {
    blocks: HashMap<BlockHash, StoredBlock>,
}

impl MemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a block, replacing any previous entry with the same hash.
    pub fn put(&mut self, block: StoredBlock) {
        self.blocks.insert(block.hash(), block);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl BlockStore for MemoryBlockStore {
    fn get(&self, hash: &BlockHash) -> Result<Option<StoredBlock>, StoreError> {
        Ok(self.blocks.get(hash).cloned())
    }
}
