//! The shipped network definitions.
//!
//! Both networks share one genesis block, mined against the shipped maximum
//! target: version 1, a zero back-link, the founding coinbase digest as
//! merkle root, and the `(time, bits, nonce)` triple below. The testnet
//! relaxes difficulty transitions for blocks timestamped after June 15th
//! 2024, so development chains stay minable after a burst of high-difficulty
//! blocks.

use cinder_core::constants::{INTERVAL, TARGET_TIMESPAN};
use cinder_core::target::CompactTarget;
use cinder_core::types::Height;

use crate::params::{NetworkDefinition, NetworkId, RetargetPolicy};

/// The easiest proof-of-work target either network accepts.
const MAX_TARGET_BITS: CompactTarget = CompactTarget::from_consensus(0x1e0ffff0);

/// Shared genesis triple. 2024-05-01 00:00:00 UTC.
const GENESIS_TIME: u32 = 1714521600;
const GENESIS_BITS: CompactTarget = MAX_TARGET_BITS;
const GENESIS_NONCE: u32 = 2910931;

/// Double SHA-256 of the founding coinbase text:
/// "Reuters 01/May/2024 Central banks hold rates steady as inflation cools"
const GENESIS_MERKLE_ROOT: &str =
    "0aabe0ae8a98e7c69531c8b14aab240f4640df00425ebd1824eb75c270092efa";

const GENESIS_HASH: &str =
    "000002dfa0f7daf03dd7b36eb52799320f2aafefb1959b9538c22143d9c9c753";

/// Testnet blocks timestamped strictly after this instant use the relaxed
/// transition rule. 2024-06-15 00:00:00 UTC.
const TESTNET_RELAXED_ACTIVATION: i64 = 1718409600;

const MAINNET_CHECKPOINTS: &[(Height, &str)] = &[
    (500, "00000000415b6f16bddddb777d26137b635061f295d8764c1bf5c2f423859689"),
    (30_000, "00000000c067d2621cd60c26c506944a23c0da865d393e93dae10c6f118164f2"),
    (80_000, "00000000008d391dd8c85d2532919265c1c078cf2c43e5f3793fc1f78d5ef61d"),
    (125_000, "00000000000f077709ac793eee220f82a6ac10f17328e0f14cdb16e71da0131c"),
    (155_555, "00000000000cf40fb088b87478d4d1cc0a69deaf45f04b986fad9485b812d530"),
    (190_000, "0000000000008b86aea4f52103d134463854d7865594e3b97916f4885a9f6738"),
    (210_000, "0000000000000382189d7eeb6ec7127a9bd75f8efaae5a6ca94e69e00762158f"),
];

const MAINNET_DNS_SEEDS: &[&str] = &[
    "seed.cinder.network",
    "seed2.cinder.network",
    "dnsseed.cinderforge.org",
    "seed.cinderpool.io",
    "cinder.seednode.dev",
];

const TESTNET_DNS_SEEDS: &[&str] = &[
    "testnet-seed.cinder.network",
    "testnet-seed.cinderforge.org",
];

/// Parameters for the main production network.
pub fn mainnet_definition() -> NetworkDefinition {
    NetworkDefinition {
        id: NetworkId::Mainnet,
        packet_magic: 0xe4d2c8a1,
        default_port: 9567,

        interval: INTERVAL,
        target_timespan: TARGET_TIMESPAN,
        max_target_bits: MAX_TARGET_BITS,
        retarget_policy: RetargetPolicy::Standard,

        genesis_version: 1,
        genesis_time: GENESIS_TIME,
        genesis_bits: GENESIS_BITS,
        genesis_nonce: GENESIS_NONCE,
        genesis_merkle_root: GENESIS_MERKLE_ROOT,
        expected_genesis_hash: GENESIS_HASH,

        checkpoints: MAINNET_CHECKPOINTS,
        dns_seeds: MAINNET_DNS_SEEDS,
        addr_seeds: &[],

        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1000,
        subsidy_decrease_block_count: 840_000,
        spendable_coinbase_depth: 100,
    }
}

/// Parameters for the public test network. Relaxed difficulty rules keep it
/// minable for development even after someone runs the difficulty up and
/// leaves.
pub fn testnet_definition() -> NetworkDefinition {
    NetworkDefinition {
        id: NetworkId::Testnet,
        packet_magic: 0x9f3b5ce7,
        default_port: 19567,

        interval: INTERVAL,
        target_timespan: TARGET_TIMESPAN,
        max_target_bits: MAX_TARGET_BITS,
        retarget_policy: RetargetPolicy::RelaxedAfter(TESTNET_RELAXED_ACTIVATION),

        genesis_version: 1,
        genesis_time: GENESIS_TIME,
        genesis_bits: GENESIS_BITS,
        genesis_nonce: GENESIS_NONCE,
        genesis_merkle_root: GENESIS_MERKLE_ROOT,
        expected_genesis_hash: GENESIS_HASH,

        checkpoints: &[],
        dns_seeds: TESTNET_DNS_SEEDS,
        addr_seeds: &[],

        majority_enforce_block_upgrade: 51,
        majority_reject_block_outdated: 75,
        majority_window: 100,
        subsidy_decrease_block_count: 840_000,
        spendable_coinbase_depth: 100,
    }
}
