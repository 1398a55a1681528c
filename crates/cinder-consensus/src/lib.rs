//! cinder-consensus
//!
//! The difficulty-transition validator and the block-store read contract it
//! walks over. The block-acceptance pipeline calls
//! [`check_difficulty_transitions`] once per candidate block after linking
//! it at `stored_prev`; everything here is stateless and synchronous, so
//! different chain tips can be validated concurrently.

pub mod difficulty;
pub mod store;

pub use cinder_core::error::VerificationError;
pub use difficulty::check_difficulty_transitions;
pub use store::{BlockStore, MemoryBlockStore, StoredBlock};
