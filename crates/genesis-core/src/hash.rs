//! SHA256 double-hashing and byte-order helpers.

use sha2::{Digest, Sha256};

/// Bitcoin's double SHA256: SHA256(SHA256(data)).
///
/// This is used for block header hashing, transaction IDs, and merkle trees.
#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut result = [0u8; 32];
    result.copy_from_slice(&second);
    result
}

/// Reverse the byte order of a 32-byte array.
///
/// Bitcoin displays hashes in reverse byte order.
#[inline]
pub fn reverse_bytes(bytes: &[u8; 32]) -> [u8; 32] {
    let mut reversed = *bytes;
    reversed.reverse();
    reversed
}

/// Convert a hash to its display format (reversed hex).
pub fn hash_to_display_hex(hash: &[u8; 32]) -> String {
    hex::encode(reverse_bytes(hash))
}
