use primitive_types::U256;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::target::CompactTarget;
use crate::types::{BlockHash, Timestamp};

/// The six consensus fields of a block header.
///
/// Hashing is double SHA-256 over the 80-byte little-endian encoding, the
/// same for every Cinder network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_hash: BlockHash,
    pub merkle_root: BlockHash,
    /// Miner-declared time, 32 bits on the wire.
    pub time: u32,
    /// Declared proof-of-work target in compact form.
    pub bits: CompactTarget,
    pub nonce: u32,
}

impl BlockHeader {
    /// The 80-byte wire encoding.
    pub fn serialize(&self) -> [u8; 80] {
        let mut buf = [0u8; 80];
        buf[0..4].copy_from_slice(&self.version.to_le_bytes());
        buf[4..36].copy_from_slice(self.prev_hash.as_bytes());
        buf[36..68].copy_from_slice(self.merkle_root.as_bytes());
        buf[68..72].copy_from_slice(&self.time.to_le_bytes());
        buf[72..76].copy_from_slice(&self.bits.to_consensus().to_le_bytes());
        buf[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        buf
    }

    /// Double SHA-256 of the wire encoding.
    pub fn hash(&self) -> BlockHash {
        let first = Sha256::digest(self.serialize());
        let second = Sha256::digest(first);
        BlockHash(second.into())
    }

    /// Declared time widened for signed arithmetic.
    pub fn time_secs(&self) -> Timestamp {
        Timestamp::from(self.time)
    }

    /// The declared target expanded to its 256-bit threshold.
    pub fn target(&self) -> U256 {
        self.bits.to_target()
    }
}
