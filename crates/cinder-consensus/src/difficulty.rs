//! Difficulty-transition validation.
//!
//! Given a candidate header extending a known chain at `stored_prev`, decide
//! whether its declared proof-of-work target is consensus-valid. Two
//! policies exist: the standard proportional retarget every `interval`
//! blocks, and the testnet relaxation that tolerates easiest-target blocks
//! after twenty minutes of silence. Which one applies is a pure function of
//! the network's policy tag and the candidate's timestamp.

use primitive_types::{U256, U512};
use tracing::debug;

use cinder_core::error::VerificationError;
use cinder_core::header::BlockHeader;
use cinder_core::target::CompactTarget;
use cinder_params::{NetworkParameters, RetargetPolicy};

use crate::store::{BlockStore, StoredBlock};

/// Validate the difficulty declared by `next`, which extends the chain at
/// `stored_prev`.
///
/// `store` is only read, and only for ancestor lookups; every walk is
/// bounded by `interval` because any retarget boundary terminates it. A
/// rejection is deterministic and final; the caller must not retry.
pub fn check_difficulty_transitions<S: BlockStore>(
    params: &NetworkParameters,
    stored_prev: &StoredBlock,
    next: &BlockHeader,
    store: &S,
) -> Result<(), VerificationError> {
    match params.retarget_policy() {
        RetargetPolicy::RelaxedAfter(activation)
            if next.time_secs() > activation
                && !params.is_difficulty_transition_point(stored_prev.height()) =>
        {
            check_relaxed_transition(params, stored_prev, next, store)
        }
        _ => check_standard_transition(params, stored_prev, next, store),
    }
}

/// The always-on rule: bits are frozen between retarget boundaries, and at a
/// boundary they must equal the proportional retarget over the window that
/// just closed.
fn check_standard_transition<S: BlockStore>(
    params: &NetworkParameters,
    stored_prev: &StoredBlock,
    next: &BlockHeader,
    store: &S,
) -> Result<(), VerificationError> {
    let prev = stored_prev.header();
    let next_height = stored_prev.height() + 1;

    if !params.is_difficulty_transition_point(stored_prev.height()) {
        if next.bits != prev.bits {
            return Err(VerificationError::UnexpectedDifficultyChange {
                height: next_height,
                expected: prev.bits,
                got: next.bits,
            });
        }
        return Ok(());
    }

    // Walk back to the first block of the window that just closed.
    let mut cursor = stored_prev.clone();
    for _ in 0..params.interval() - 1 {
        cursor = cursor
            .prev(store)?
            .ok_or(VerificationError::ChainTooShort)?;
    }
    let interval_ago = cursor.header();

    let target_timespan = i64::from(params.target_timespan());
    let timespan = (prev.time_secs() - interval_ago.time_secs())
        .clamp(target_timespan / 4, target_timespan * 4);

    // Widen through 512 bits so target × timespan cannot overflow.
    let work = prev.target().full_mul(U256::from(timespan as u64))
        / U512::from(params.target_timespan());
    let new_target = if work > U512::from(params.max_target()) {
        params.max_target()
    } else {
        narrow_u512(work)
    };

    // The declared compact form carries less precision than the computed
    // target: truncate to the declared exponent's precision, then compare
    // after re-encoding.
    let accuracy_bytes = (next.bits.to_consensus() >> 24) as i32 - 3;
    let computed = CompactTarget::from_target(compact_precision(new_target, accuracy_bytes));
    debug!(height = next_height, timespan, %computed, "difficulty retarget");

    if computed != next.bits {
        return Err(VerificationError::BadDifficultyTarget {
            height: next_height,
            computed,
            got: next.bits,
        });
    }
    Ok(())
}

/// The testnet relaxation for non-boundary blocks after the activation
/// instant: a quiet chain accepts anything, an active one must echo the
/// difficulty of the last block that was not an easiest-target filler.
fn check_relaxed_transition<S: BlockStore>(
    params: &NetworkParameters,
    stored_prev: &StoredBlock,
    next: &BlockHeader,
    store: &S,
) -> Result<(), VerificationError> {
    let time_delta = next.time_secs() - stored_prev.header().time_secs();
    let window = 2 * i64::from(params.target_spacing());

    // Clock skew can drive the delta negative. The upstream client had an
    // integer underflow here that let easiest-target blocks through when
    // time ran backwards, and that behaviour is consensus now: anything
    // outside [0, window] is unconstrained by this rule.
    if time_delta < 0 || time_delta > window {
        debug!(time_delta, "quiet-chain window open, any target accepted");
        return Ok(());
    }

    // Walk backwards past the run of easiest-target blocks. The genesis
    // block and any retarget boundary stop the walk, so it is bounded by
    // `interval` lookups; running off the resident chain before a stop is a
    // hard failure, never an acceptance.
    let mut cursor = stored_prev.clone();
    while cursor.hash() != params.genesis_hash()
        && cursor.height() % params.interval() != 0
        && cursor.header().target() == params.max_target()
    {
        cursor = cursor
            .prev(store)?
            .ok_or(VerificationError::ChainTooShort)?;
    }

    if cursor.header().target() != next.target() {
        return Err(VerificationError::DisallowedTestnetTransition {
            expected: cursor.header().bits,
            got: next.bits,
        });
    }
    Ok(())
}

/// Drop a 512-bit intermediate back to 256 bits. Callers guarantee the value
/// has already been capped below the 256-bit range.
fn narrow_u512(value: U512) -> U256 {
    let mut be = [0u8; 64];
    value.to_big_endian(&mut be);
    U256::from_big_endian(&be[32..])
}

/// Zero every bit of `target` below the precision of a compact encoding
/// whose exponent places its three mantissa bytes `accuracy_bytes` above the
/// low end.
fn compact_precision(target: U256, accuracy_bytes: i32) -> U256 {
    let mask = U256::from(0x00ff_ffffu64);
    let mask = if accuracy_bytes >= 0 {
        mask << (8 * accuracy_bytes as usize)
    } else {
        mask >> (8 * (-accuracy_bytes) as usize)
    };
    target & mask
}
