pub mod constants;
pub mod error;
pub mod header;
pub mod target;
pub mod types;

pub use constants::*;
pub use error::{StoreError, VerificationError};
pub use header::BlockHeader;
pub use target::CompactTarget;
pub use types::*;
