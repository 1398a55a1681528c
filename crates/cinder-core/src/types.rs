use serde::{Deserialize, Serialize};
use std::fmt;

/// Block height (distance from genesis along the chain).
pub type Height = u32;

/// Unix timestamp (seconds, UTC). Block headers carry 32-bit times on the
/// wire; arithmetic on them is done at this width so differences can go
/// negative.
pub type Timestamp = i64;

// ── BlockHash ────────────────────────────────────────────────────────────────

/// 32-byte double-SHA-256 block hash.
///
/// Bytes are held in internal (wire) order; hex conversion uses the reversed
/// display order every explorer and log line expects.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    pub fn from_bytes(b: [u8; 32]) -> Self {
        Self(b)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Display-order (byte-reversed) hex string.
    pub fn to_hex(&self) -> String {
        let mut rev = self.0;
        rev.reverse();
        hex::encode(rev)
    }

    /// Parse a display-order hex string (64 characters).
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        arr.reverse();
        Ok(Self(arr))
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({}…)", &self.to_hex()[..16])
    }
}
