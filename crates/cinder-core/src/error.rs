use thiserror::Error;

use crate::target::CompactTarget;
use crate::types::Height;

/// Failure surfaced by a block-store backend.
///
/// Distinct from "block not found", which stores report as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("block store backend failure: {0}")]
    Backend(String),
}

/// Consensus rejection of a candidate block.
///
/// Every variant is deterministic and non-retryable: the caller must treat
/// the block as invalid, never retry, never partially accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    // ── Difficulty transitions ───────────────────────────────────────────────
    #[error("unexpected change in difficulty at height {height}: expected {expected}, got {got}")]
    UnexpectedDifficultyChange {
        height: Height,
        expected: CompactTarget,
        got: CompactTarget,
    },

    #[error("difficulty target mismatch at retarget height {height}: computed {computed}, got {got}")]
    BadDifficultyTarget {
        height: Height,
        computed: CompactTarget,
        got: CompactTarget,
    },

    #[error("testnet difficulty transition that is not allowed: expected {expected}, got {got}")]
    DisallowedTestnetTransition {
        expected: CompactTarget,
        got: CompactTarget,
    },

    #[error("ran out of stored ancestors during a difficulty check")]
    ChainTooShort,

    #[error(transparent)]
    Store(#[from] StoreError),
}
