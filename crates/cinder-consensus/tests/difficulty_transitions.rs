//! Scenario tests for difficulty-transition validation.
//!
//! Synthetic chains are assembled in a `MemoryBlockStore` and candidate
//! headers are checked against them: the frozen-bits rule between retarget
//! boundaries, the proportional retarget at a boundary (including both
//! clamp directions and the max-target cap), and the testnet quiet-chain
//! relaxation with its ancestor walk.

use cinder_consensus::{
    check_difficulty_transitions, MemoryBlockStore, StoredBlock, VerificationError,
};
use cinder_core::target::CompactTarget;
use cinder_core::types::BlockHash;
use cinder_core::BlockHeader;
use cinder_params::NetworkParameters;

/// The shipped easiest-target compact form.
const EASY: u32 = 0x1e0ffff0;
/// A target a real miner would carry, harder than `EASY`.
const HARD: u32 = 0x1d00ffff;
/// First block time used for post-activation testnet chains.
const AFTER_ACTIVATION: u32 = 1_718_410_000;

// ── Chain building ────────────────────────────────────────────────────────────

fn genesis(params: &NetworkParameters) -> StoredBlock {
    StoredBlock::new(params.genesis_header().clone(), 0)
}

/// A child of `parent`. The parent hash doubles as the merkle root so every
/// block in a synthetic chain hashes uniquely.
fn child(parent: &StoredBlock, time: u32, bits: u32) -> StoredBlock {
    let header = BlockHeader {
        version: 1,
        prev_hash: parent.hash(),
        merkle_root: parent.hash(),
        time,
        bits: CompactTarget::from_consensus(bits),
        nonce: 0,
    };
    StoredBlock::new(header, parent.height() + 1)
}

fn candidate(parent: &StoredBlock, time: u32, bits: u32) -> BlockHeader {
    BlockHeader {
        version: 1,
        prev_hash: parent.hash(),
        merkle_root: parent.hash(),
        time,
        bits: CompactTarget::from_consensus(bits),
        nonce: 0,
    }
}

/// Mainnet chain from genesis to height 2015, every block at `EASY` bits,
/// blocks ten minutes apart except the tip, which lands `window` seconds
/// after genesis.
fn retarget_window_chain(window: u32) -> (MemoryBlockStore, StoredBlock) {
    let params = cinder_params::mainnet();
    let mut store = MemoryBlockStore::new();
    let mut tip = genesis(params);
    store.put(tip.clone());
    let t0 = params.genesis_header().time;
    for height in 1..=2015u32 {
        let time = if height == 2015 {
            t0 + window
        } else {
            t0 + height * 600
        };
        tip = child(&tip, time, EASY);
        store.put(tip.clone());
    }
    (store, tip)
}

/// Testnet chain: one `HARD` block at height 1, then `easy_run` blocks of
/// `EASY` filler, all timestamped after the relaxation activates.
fn testnet_easy_run(easy_run: u32) -> (MemoryBlockStore, StoredBlock) {
    let params = cinder_params::testnet();
    let mut store = MemoryBlockStore::new();
    let mut tip = genesis(params);
    store.put(tip.clone());
    tip = child(&tip, AFTER_ACTIVATION + 600, HARD);
    store.put(tip.clone());
    for i in 0..easy_run {
        tip = child(&tip, AFTER_ACTIVATION + (i + 2) * 600, EASY);
        store.put(tip.clone());
    }
    (store, tip)
}

fn tip_time(tip: &StoredBlock) -> u32 {
    tip.header().time
}

// ── Standard policy ───────────────────────────────────────────────────────────

#[test]
fn non_boundary_block_must_repeat_parent_bits() {
    let params = cinder_params::mainnet();
    let store = MemoryBlockStore::new();
    let parent = StoredBlock::new(
        BlockHeader {
            version: 1,
            prev_hash: BlockHash::zero(),
            merkle_root: BlockHash::zero(),
            time: 1_714_800_000,
            bits: CompactTarget::from_consensus(HARD),
            nonce: 42,
        },
        99_999,
    );

    let ok = candidate(&parent, 1_714_800_600, HARD);
    assert_eq!(
        check_difficulty_transitions(params, &parent, &ok, &store),
        Ok(())
    );

    let bad = candidate(&parent, 1_714_800_600, EASY);
    assert!(matches!(
        check_difficulty_transitions(params, &parent, &bad, &store),
        Err(VerificationError::UnexpectedDifficultyChange { height: 100_000, .. })
    ));
}

#[test]
fn exact_timespan_window_retargets_to_the_same_bits() {
    let (store, tip) = retarget_window_chain(1_209_600);
    let params = cinder_params::mainnet();
    let next = candidate(&tip, tip_time(&tip) + 600, EASY);
    assert_eq!(
        check_difficulty_transitions(params, &tip, &next, &store),
        Ok(())
    );
}

#[test]
fn fast_window_is_clamped_to_a_quarter() {
    // An eighth of the expected timespan clamps to a quarter, so the new
    // target is exactly a quarter of the old one.
    let (store, tip) = retarget_window_chain(151_200);
    let params = cinder_params::mainnet();

    let ok = candidate(&tip, tip_time(&tip) + 600, 0x1e03fffc);
    assert_eq!(
        check_difficulty_transitions(params, &tip, &ok, &store),
        Ok(())
    );

    let unchanged = candidate(&tip, tip_time(&tip) + 600, EASY);
    match check_difficulty_transitions(params, &tip, &unchanged, &store) {
        Err(VerificationError::BadDifficultyTarget {
            height, computed, ..
        }) => {
            assert_eq!(height, 2016);
            assert_eq!(computed, CompactTarget::from_consensus(0x1e03fffc));
        }
        other => panic!("expected a retarget mismatch, got {other:?}"),
    }
}

#[test]
fn slow_window_is_capped_at_the_max_target() {
    // Eight times the expected timespan clamps to four, and four times the
    // easiest target is capped back down to the easiest target.
    let (store, tip) = retarget_window_chain(9_676_800);
    let params = cinder_params::mainnet();

    let ok = candidate(&tip, tip_time(&tip) + 600, EASY);
    assert_eq!(
        check_difficulty_transitions(params, &tip, &ok, &store),
        Ok(())
    );

    let harder = candidate(&tip, tip_time(&tip) + 600, 0x1e03fffc);
    assert!(matches!(
        check_difficulty_transitions(params, &tip, &harder, &store),
        Err(VerificationError::BadDifficultyTarget { .. })
    ));
}

#[test]
fn retarget_with_missing_window_is_chain_too_short() {
    let params = cinder_params::mainnet();
    let store = MemoryBlockStore::new();
    // A boundary parent whose ancestry is simply not resident.
    let parent = StoredBlock::new(
        BlockHeader {
            version: 1,
            prev_hash: BlockHash::zero(),
            merkle_root: BlockHash::zero(),
            time: 1_716_000_000,
            bits: CompactTarget::from_consensus(EASY),
            nonce: 7,
        },
        2015,
    );
    let next = candidate(&parent, 1_716_000_600, EASY);
    assert_eq!(
        check_difficulty_transitions(params, &parent, &next, &store),
        Err(VerificationError::ChainTooShort)
    );
}

// ── Relaxed (testnet) policy ──────────────────────────────────────────────────

#[test]
fn active_chain_walks_back_to_the_last_real_difficulty() {
    let (store, tip) = testnet_easy_run(5);
    let params = cinder_params::testnet();

    // Within two spacings of the parent: the easy-block shortcut is closed,
    // and the walk lands on the hard block no matter how long the easy run.
    let ok = candidate(&tip, tip_time(&tip) + 600, HARD);
    assert_eq!(
        check_difficulty_transitions(params, &tip, &ok, &store),
        Ok(())
    );

    let bad = candidate(&tip, tip_time(&tip) + 600, EASY);
    assert_eq!(
        check_difficulty_transitions(params, &tip, &bad, &store),
        Err(VerificationError::DisallowedTestnetTransition {
            expected: CompactTarget::from_consensus(HARD),
            got: CompactTarget::from_consensus(EASY),
        })
    );
}

#[test]
fn quiet_chain_accepts_any_target() {
    let (store, tip) = testnet_easy_run(5);
    let params = cinder_params::testnet();

    // One second past the two-spacing window.
    let quiet = candidate(&tip, tip_time(&tip) + 1201, EASY);
    assert_eq!(
        check_difficulty_transitions(params, &tip, &quiet, &store),
        Ok(())
    );
}

#[test]
fn the_two_spacing_boundary_is_inclusive() {
    let (store, tip) = testnet_easy_run(5);
    let params = cinder_params::testnet();

    // Exactly two spacings is still "active", so the walk still constrains.
    let at_bound = candidate(&tip, tip_time(&tip) + 1200, EASY);
    assert!(matches!(
        check_difficulty_transitions(params, &tip, &at_bound, &store),
        Err(VerificationError::DisallowedTestnetTransition { .. })
    ));
}

#[test]
fn negative_time_delta_accepts_any_target() {
    let (store, tip) = testnet_easy_run(5);
    let params = cinder_params::testnet();

    // Clock skew: the candidate claims a time before its parent. The
    // underflow quirk treats this as a long silence, not an error.
    let skewed = candidate(&tip, tip_time(&tip) - 100, EASY);
    assert_eq!(
        check_difficulty_transitions(params, &tip, &skewed, &store),
        Ok(())
    );
}

#[test]
fn easy_run_reaching_genesis_stops_there() {
    let params = cinder_params::testnet();
    let mut store = MemoryBlockStore::new();
    let mut tip = genesis(params);
    store.put(tip.clone());
    for i in 0..3u32 {
        tip = child(&tip, AFTER_ACTIVATION + (i + 1) * 600, EASY);
        store.put(tip.clone());
    }

    // Genesis itself carries the easiest target, so the candidate must too.
    let ok = candidate(&tip, tip_time(&tip) + 600, EASY);
    assert_eq!(
        check_difficulty_transitions(params, &tip, &ok, &store),
        Ok(())
    );

    let bad = candidate(&tip, tip_time(&tip) + 600, HARD);
    assert_eq!(
        check_difficulty_transitions(params, &tip, &bad, &store),
        Err(VerificationError::DisallowedTestnetTransition {
            expected: params.max_target_bits(),
            got: CompactTarget::from_consensus(HARD),
        })
    );
}

#[test]
fn easy_run_stops_at_a_retarget_boundary() {
    let params = cinder_params::testnet();
    let mut store = MemoryBlockStore::new();
    let mut tip = genesis(params);
    store.put(tip.clone());
    // Easy filler straddling the boundary at height 2016.
    for i in 1..=2020u32 {
        tip = child(&tip, AFTER_ACTIVATION + i * 600, EASY);
        store.put(tip.clone());
    }

    // The walk must stop at height 2016 even though that block is easy.
    let ok = candidate(&tip, tip_time(&tip) + 600, EASY);
    assert_eq!(
        check_difficulty_transitions(params, &tip, &ok, &store),
        Ok(())
    );

    let bad = candidate(&tip, tip_time(&tip) + 600, HARD);
    assert!(matches!(
        check_difficulty_transitions(params, &tip, &bad, &store),
        Err(VerificationError::DisallowedTestnetTransition { .. })
    ));
}

#[test]
fn walk_running_off_the_store_is_chain_too_short() {
    let params = cinder_params::testnet();
    let full = testnet_easy_run(5);
    // Rebuild a store holding only the last two easy blocks; the walk needs
    // to go deeper and must fail hard rather than accept.
    let mut sparse = MemoryBlockStore::new();
    let tip = full.1;
    sparse.put(tip.clone());
    let prev = tip.prev(&full.0).unwrap().unwrap();
    sparse.put(prev);

    let next = candidate(&tip, tip_time(&tip) + 600, HARD);
    assert_eq!(
        check_difficulty_transitions(params, &tip, &next, &sparse),
        Err(VerificationError::ChainTooShort)
    );
}

#[test]
fn before_activation_the_standard_rule_applies() {
    let params = cinder_params::testnet();
    let mut store = MemoryBlockStore::new();
    let g = genesis(params);
    store.put(g.clone());
    let t0 = params.genesis_header().time;
    let parent = child(&g, t0 + 600, EASY);
    store.put(parent.clone());

    // Timestamped before the activation instant: frozen-bits rule, not the
    // relaxed walk.
    let bad = candidate(&parent, t0 + 1200, HARD);
    assert!(matches!(
        check_difficulty_transitions(params, &parent, &bad, &store),
        Err(VerificationError::UnexpectedDifficultyChange { .. })
    ));
}

#[test]
fn boundary_blocks_use_the_standard_rule_even_on_testnet() {
    let params = cinder_params::testnet();
    let store = MemoryBlockStore::new();
    let parent = StoredBlock::new(
        BlockHeader {
            version: 1,
            prev_hash: BlockHash::zero(),
            merkle_root: BlockHash::zero(),
            time: AFTER_ACTIVATION,
            bits: CompactTarget::from_consensus(EASY),
            nonce: 3,
        },
        2015,
    );

    // A transition-point candidate goes through the full retarget, which
    // needs the window ancestry; none of it is resident here.
    let next = candidate(&parent, AFTER_ACTIVATION + 600, EASY);
    assert_eq!(
        check_difficulty_transitions(params, &parent, &next, &store),
        Err(VerificationError::ChainTooShort)
    );
}

#[test]
fn validation_is_idempotent_over_an_unmodified_store() {
    let (store, tip) = testnet_easy_run(5);
    let params = cinder_params::testnet();

    let ok = candidate(&tip, tip_time(&tip) + 600, HARD);
    let bad = candidate(&tip, tip_time(&tip) + 600, EASY);
    for _ in 0..2 {
        assert_eq!(
            check_difficulty_transitions(params, &tip, &ok, &store),
            Ok(())
        );
        assert_eq!(
            check_difficulty_transitions(params, &tip, &bad, &store),
            Err(VerificationError::DisallowedTestnetTransition {
                expected: CompactTarget::from_consensus(HARD),
                got: CompactTarget::from_consensus(EASY),
            })
        );
    }
}
