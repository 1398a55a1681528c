//! The compact difficulty-target representation.
//!
//! Block headers declare their proof-of-work threshold as a packed 32-bit
//! value: one exponent byte followed by three mantissa bytes, radix 256,
//! offset 3. It is a lossy floating-point encoding of a 256-bit unsigned
//! integer, and the exact bit pattern is consensus-critical: a recomputed
//! target must be pushed back through this encoding before it is compared
//! against the value a header declares.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mask selecting the 23 usable mantissa bits (bit 23 is the sign bit,
/// reserved and never set on a valid target).
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Bit that would collide with the sign position when encoding.
const SIGN_BIT: u32 = 0x0080_0000;

/// A difficulty target in compact (packed exponent/mantissa) form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompactTarget(u32);

impl CompactTarget {
    pub const fn from_consensus(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn to_consensus(self) -> u32 {
        self.0
    }

    /// Expand to the full 256-bit threshold.
    ///
    /// The sign bit is masked off. Exponents large enough to push the
    /// mantissa past 256 bits lose those bits; such encodings never appear
    /// on a valid chain and simply fail the equality checks downstream.
    pub fn to_target(self) -> U256 {
        let exponent = (self.0 >> 24) as usize;
        let mantissa = self.0 & MANTISSA_MASK;
        if exponent <= 3 {
            U256::from(mantissa >> (8 * (3 - exponent)))
        } else {
            U256::from(mantissa) << (8 * (exponent - 3))
        }
    }

    /// Re-encode a 256-bit target, losing precision below the top three
    /// bytes. When the leading mantissa byte would set the sign bit, the
    /// mantissa is shifted down and the exponent bumped, matching the
    /// reference encoder byte for byte.
    pub fn from_target(target: U256) -> Self {
        let mut size = (target.bits() + 7) / 8;
        let mut compact = if size <= 3 {
            (target.low_u64() as u32) << (8 * (3 - size))
        } else {
            (target >> (8 * (size - 3))).low_u64() as u32
        };
        if compact & SIGN_BIT != 0 {
            compact >>= 8;
            size += 1;
        }
        Self(compact | (size as u32) << 24)
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::Debug for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactTarget({:#010x})", self.0)
    }
}
