use std::collections::BTreeMap;
use std::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use cinder_core::header::BlockHeader;
use cinder_core::target::CompactTarget;
use cinder_core::types::{BlockHash, Height, Timestamp};

// ── Network identity ─────────────────────────────────────────────────────────

/// Which Cinder network a parameter bundle (or a peer, or a block chain)
/// belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkId {
    Mainnet,
    Testnet,
}

impl NetworkId {
    /// The shared, lazily-built parameters for this network.
    pub fn params(self) -> &'static NetworkParameters {
        match self {
            NetworkId::Mainnet => crate::registry::mainnet(),
            NetworkId::Testnet => crate::registry::testnet(),
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Mainnet => write!(f, "mainnet"),
            NetworkId::Testnet => write!(f, "testnet"),
        }
    }
}

// ── Retargeting policy ───────────────────────────────────────────────────────

/// How a network validates difficulty transitions.
///
/// `RelaxedAfter` is the testnet rule: for candidate blocks timestamped
/// strictly after the activation instant, non-boundary blocks may drop to
/// the easiest target once the chain has been quiet for two block spacings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetargetPolicy {
    Standard,
    RelaxedAfter(Timestamp),
}

// ── Configuration errors ─────────────────────────────────────────────────────

/// Fatal parameter-construction fault. A network that fails to build must
/// not be used at all; the registry turns this into a panic at first access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("genesis self-check failed for {id}: computed {computed}, expected {expected}")]
    GenesisHashMismatch {
        id: NetworkId,
        computed: BlockHash,
        expected: BlockHash,
    },

    #[error("malformed hash constant in {id} parameters: {value:?}")]
    MalformedHashConstant { id: NetworkId, value: String },
}

// ── Definition ───────────────────────────────────────────────────────────────

/// The raw, hardcoded description of one network. `build` turns it into a
/// validated `NetworkParameters`, running the genesis self-check.
///
/// Hash constants are 64-character display-order hex, exactly as block
/// explorers print them.
#[derive(Clone, Debug)]
pub struct NetworkDefinition {
    pub id: NetworkId,
    pub packet_magic: u32,
    pub default_port: u16,

    pub interval: u32,
    pub target_timespan: u32,
    pub max_target_bits: CompactTarget,
    pub retarget_policy: RetargetPolicy,

    pub genesis_version: i32,
    pub genesis_time: u32,
    pub genesis_bits: CompactTarget,
    pub genesis_nonce: u32,
    pub genesis_merkle_root: &'static str,
    pub expected_genesis_hash: &'static str,

    pub checkpoints: &'static [(Height, &'static str)],
    pub dns_seeds: &'static [&'static str],
    pub addr_seeds: &'static [&'static str],

    pub majority_enforce_block_upgrade: u32,
    pub majority_reject_block_outdated: u32,
    pub majority_window: u32,
    pub subsidy_decrease_block_count: u32,
    pub spendable_coinbase_depth: u32,
}

impl NetworkDefinition {
    /// Validate the definition and produce the immutable parameter bundle.
    ///
    /// The genesis header is rebuilt from the hardcoded triple and hashed;
    /// any mismatch with the expected constant is a configuration fault,
    /// surfaced before a single block can be validated against this network.
    pub fn build(self) -> Result<NetworkParameters, ConfigError> {
        let parse = |value: &str| {
            BlockHash::from_hex(value).map_err(|_| ConfigError::MalformedHashConstant {
                id: self.id,
                value: value.to_string(),
            })
        };

        let genesis = BlockHeader {
            version: self.genesis_version,
            prev_hash: BlockHash::zero(),
            merkle_root: parse(self.genesis_merkle_root)?,
            time: self.genesis_time,
            bits: self.genesis_bits,
            nonce: self.genesis_nonce,
        };
        let genesis_hash = genesis.hash();
        let expected = parse(self.expected_genesis_hash)?;
        if genesis_hash != expected {
            return Err(ConfigError::GenesisHashMismatch {
                id: self.id,
                computed: genesis_hash,
                expected,
            });
        }

        let mut checkpoints = BTreeMap::new();
        for &(height, hash) in self.checkpoints {
            checkpoints.insert(height, parse(hash)?);
        }

        info!(
            network = %self.id,
            genesis = %genesis_hash,
            checkpoints = checkpoints.len(),
            "network parameters initialised"
        );

        Ok(NetworkParameters {
            id: self.id,
            packet_magic: self.packet_magic,
            default_port: self.default_port,
            interval: self.interval,
            target_timespan: self.target_timespan,
            max_target: self.max_target_bits.to_target(),
            max_target_bits: self.max_target_bits,
            retarget_policy: self.retarget_policy,
            genesis,
            genesis_hash,
            checkpoints,
            dns_seeds: self.dns_seeds,
            addr_seeds: self.addr_seeds,
            majority_enforce_block_upgrade: self.majority_enforce_block_upgrade,
            majority_reject_block_outdated: self.majority_reject_block_outdated,
            majority_window: self.majority_window,
            subsidy_decrease_block_count: self.subsidy_decrease_block_count,
            spendable_coinbase_depth: self.spendable_coinbase_depth,
        })
    }
}

// ── Parameters ───────────────────────────────────────────────────────────────

/// Immutable consensus configuration for one network.
///
/// Safe for unsynchronised concurrent reads; nothing here mutates after
/// construction.
#[derive(Clone, Debug)]
pub struct NetworkParameters {
    id: NetworkId,
    packet_magic: u32,
    default_port: u16,

    interval: u32,
    target_timespan: u32,
    max_target: U256,
    max_target_bits: CompactTarget,
    retarget_policy: RetargetPolicy,

    genesis: BlockHeader,
    genesis_hash: BlockHash,

    checkpoints: BTreeMap<Height, BlockHash>,
    dns_seeds: &'static [&'static str],
    addr_seeds: &'static [&'static str],

    majority_enforce_block_upgrade: u32,
    majority_reject_block_outdated: u32,
    majority_window: u32,
    subsidy_decrease_block_count: u32,
    spendable_coinbase_depth: u32,
}

impl NetworkParameters {
    pub fn id(&self) -> NetworkId {
        self.id
    }

    /// First four bytes of every P2P message on this network.
    pub fn packet_magic(&self) -> u32 {
        self.packet_magic
    }

    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    /// Blocks between mandatory difficulty recalculations.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Expected wall-clock seconds for one full retarget window.
    pub fn target_timespan(&self) -> u32 {
        self.target_timespan
    }

    /// Expected seconds between blocks.
    pub fn target_spacing(&self) -> u32 {
        self.target_timespan / self.interval
    }

    /// The easiest allowed proof-of-work target, expanded.
    pub fn max_target(&self) -> U256 {
        self.max_target
    }

    /// The easiest allowed target in compact form.
    pub fn max_target_bits(&self) -> CompactTarget {
        self.max_target_bits
    }

    pub fn retarget_policy(&self) -> RetargetPolicy {
        self.retarget_policy
    }

    pub fn genesis_header(&self) -> &BlockHeader {
        &self.genesis
    }

    pub fn genesis_hash(&self) -> BlockHash {
        self.genesis_hash
    }

    /// True iff the block at `height + 1` must recalculate difficulty.
    pub fn is_difficulty_transition_point(&self, height: Height) -> bool {
        (height + 1) % self.interval == 0
    }

    /// The hardcoded hash the chain must carry at `height`, if any.
    pub fn checkpoint_at(&self, height: Height) -> Option<&BlockHash> {
        self.checkpoints.get(&height)
    }

    /// Number of hardcoded checkpoints for this network.
    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn dns_seeds(&self) -> &'static [&'static str] {
        self.dns_seeds
    }

    /// Fixed fallback peer addresses, used when DNS seeding fails.
    pub fn addr_seeds(&self) -> &'static [&'static str] {
        self.addr_seeds
    }

    /// Blocks in a majority window that activate enforcement of an upgrade.
    pub fn majority_enforce_block_upgrade(&self) -> u32 {
        self.majority_enforce_block_upgrade
    }

    /// Blocks in a majority window past which outdated blocks are rejected.
    pub fn majority_reject_block_outdated(&self) -> u32 {
        self.majority_reject_block_outdated
    }

    /// Size of the rolling window used for upgrade majority counting.
    pub fn majority_window(&self) -> u32 {
        self.majority_window
    }

    /// Blocks between block-subsidy halvings.
    pub fn subsidy_decrease_block_count(&self) -> u32 {
        self.subsidy_decrease_block_count
    }

    /// Depth before a coinbase output may be spent.
    pub fn spendable_coinbase_depth(&self) -> u32 {
        self.spendable_coinbase_depth
    }
}
