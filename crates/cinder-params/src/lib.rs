//! cinder-params
//!
//! Per-network consensus configuration: magic bytes, genesis block,
//! difficulty schedule, checkpoint tables, seed lists. One immutable
//! `NetworkParameters` value exists per network identity, built lazily on
//! first use and shared for the life of the process.
//!
//! Construction is self-checking: the genesis header is rebuilt from its
//! hardcoded `(time, bits, nonce)` triple and must hash to the expected
//! constant, otherwise the network is unusable and first access panics.

pub mod networks;
pub mod params;
pub mod registry;

pub use params::{
    ConfigError, NetworkDefinition, NetworkId, NetworkParameters, RetargetPolicy,
};
pub use registry::{mainnet, testnet};
