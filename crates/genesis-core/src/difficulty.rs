//! Compact difficulty ("bits") decoding and target comparison.

use crate::error::{GenesisError, Result};
use crate::hash::reverse_bytes;
use std::fmt;

/// Bits of the original Bitcoin genesis block, the "difficulty 1" target.
pub const DIFFICULTY_ONE_BITS: u32 = 0x1d00ffff;

/// A 256-bit proof-of-work target, stored big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target([u8; 32]);

impl Target {
    /// The largest possible target, 2^256 - 1. Every hash meets it.
    pub const MAX: Target = Target([0xff; 32]);

    /// Create a target from 32 big-endian bytes.
    pub const fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Target(bytes)
    }

    /// The target as 32 big-endian bytes.
    pub const fn to_be_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Check a header digest against the target.
    ///
    /// The digest is read as a 256-bit integer by reversing it and treating
    /// it as big-endian; it meets the target when it is `<=` the target.
    #[inline]
    pub fn is_met_by(&self, hash: &[u8; 32]) -> bool {
        reverse_bytes(hash) <= self.0
    }

    /// Approximate value as f64, for reporting only.
    pub fn to_f64(&self) -> f64 {
        self.0.iter().fold(0.0, |acc, byte| acc * 256.0 + *byte as f64)
    }

    /// Difficulty relative to [`DIFFICULTY_ONE_BITS`], for reporting only.
    pub fn difficulty(&self) -> f64 {
        // 0xffff * 256^26, the decoded difficulty-one target
        let one = 65535.0 * 2f64.powi(208);
        let current = self.to_f64();
        if current == 0.0 {
            return f64::INFINITY;
        }
        one / current
    }

    /// Average number of hashes needed to meet this target.
    pub fn expected_hashes(&self) -> f64 {
        2f64.powi(256) / (self.to_f64() + 1.0)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Convert compact "bits" representation to a 256-bit target.
///
/// The bits format is `[exponent (1 byte)][mantissa (3 bytes)]` and
/// `target = mantissa * 256^(exponent - 3)`. Exponents below 3 shift the
/// mantissa right, dropping low bytes. A result wider than 256 bits is an
/// error. The mantissa sign bit is not interpreted.
pub fn bits_to_target(bits: u32) -> Result<Target> {
    let exponent = (bits >> 24) as usize;
    let mantissa = bits & 0x00ff_ffff;
    let mut target = [0u8; 32];

    if exponent <= 3 {
        let value = mantissa >> (8 * (3 - exponent));
        target[29..].copy_from_slice(&value.to_be_bytes()[1..]);
        return Ok(Target(target));
    }

    // Most significant mantissa byte lands at index 32 - exponent
    for (i, &byte) in mantissa.to_be_bytes()[1..].iter().enumerate() {
        match (32 + i).checked_sub(exponent) {
            Some(pos) => target[pos] = byte,
            None if byte != 0 => return Err(GenesisError::TargetOverflow { bits }),
            None => {}
        }
    }

    Ok(Target(target))
}

/// Format a large count for display (e.g., "1.23T" for trillion).
pub fn format_magnitude(value: f64) -> String {
    if value >= 1e15 {
        format!("{:.2}P", value / 1e15)
    } else if value >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if value >= 1e9 {
        format!("{:.2}G", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{:.2}", value)
    }
}
