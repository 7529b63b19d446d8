//! Merkle root computation over transaction IDs.

use crate::hash::double_sha256;

/// Compute the merkle root from a list of transaction IDs (internal byte order).
///
/// A block holding only the genesis coinbase has the coinbase txid as its
/// root, unchanged. Larger lists are paired level by level, duplicating the
/// last entry of an odd level.
pub fn compute_merkle_root(txids: &[[u8; 32]]) -> [u8; 32] {
    match txids {
        [] => [0u8; 32],
        [single] => *single,
        _ => {
            let mut level = txids.to_vec();
            while level.len() > 1 {
                level = level
                    .chunks(2)
                    .map(|pair| hash_pair(&pair[0], pair.get(1).unwrap_or(&pair[0])))
                    .collect();
            }
            level[0]
        }
    }
}

fn hash_pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut combined = [0u8; 64];
    combined[..32].copy_from_slice(left);
    combined[32..].copy_from_slice(right);
    double_sha256(&combined)
}
