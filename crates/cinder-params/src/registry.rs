//! Process-wide parameter singletons.
//!
//! Each network is built at most once, on first access, and shared as an
//! immutable `&'static` afterwards. `Lazy` guarantees single construction
//! under concurrent first use; every later access is a plain read.

use once_cell::sync::Lazy;

use crate::networks;
use crate::params::NetworkParameters;

static MAINNET: Lazy<NetworkParameters> = Lazy::new(|| {
    networks::mainnet_definition()
        .build()
        .expect("mainnet parameters failed their genesis self-check")
});

static TESTNET: Lazy<NetworkParameters> = Lazy::new(|| {
    networks::testnet_definition()
        .build()
        .expect("testnet parameters failed their genesis self-check")
});

/// The main production network.
pub fn mainnet() -> &'static NetworkParameters {
    &MAINNET
}

/// The public test network with relaxed difficulty transitions.
pub fn testnet() -> &'static NetworkParameters {
    &TESTNET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_the_same_instance() {
        let a: *const NetworkParameters = mainnet();
        let b: *const NetworkParameters = mainnet();
        assert_eq!(a, b);
    }

    #[test]
    fn networks_are_distinct() {
        assert_ne!(mainnet().packet_magic(), testnet().packet_magic());
        // One shared genesis, two identities.
        assert_eq!(mainnet().genesis_hash(), testnet().genesis_hash());
    }
}
