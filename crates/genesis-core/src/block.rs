//! Genesis block header construction and serialization.

use crate::hash::{double_sha256, hash_to_display_hex};

/// Version of the genesis block header.
pub const GENESIS_BLOCK_VERSION: i32 = 1;

/// Size of a block header in bytes.
pub const BLOCK_HEADER_SIZE: usize = 80;

/// Byte offset of the timestamp field in a serialized header.
pub const TIME_OFFSET: usize = 68;

/// Byte offset of the nonce field in a serialized header.
pub const NONCE_OFFSET: usize = 76;

/// A Bitcoin block header (80 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Block version.
    pub version: i32,
    /// Hash of the previous block; all zeros for genesis.
    pub prev_block_hash: [u8; 32],
    /// Merkle root in internal byte order (the reverse of its display form).
    pub merkle_root: [u8; 32],
    /// Block timestamp (Unix time).
    pub timestamp: u32,
    /// Difficulty target in compact "bits" format.
    pub bits: u32,
    /// Nonce for proof of work.
    pub nonce: u32,
}

impl BlockHeader {
    /// Create a genesis header: version 1, no previous block.
    pub fn genesis(merkle_root: [u8; 32], timestamp: u32, bits: u32, nonce: u32) -> Self {
        BlockHeader {
            version: GENESIS_BLOCK_VERSION,
            prev_block_hash: [0u8; 32],
            merkle_root,
            timestamp,
            bits,
            nonce,
        }
    }

    /// Serialize the block header to 80 bytes.
    pub fn serialize(&self) -> [u8; BLOCK_HEADER_SIZE] {
        let mut header = [0u8; BLOCK_HEADER_SIZE];

        header[0..4].copy_from_slice(&self.version.to_le_bytes());
        header[4..36].copy_from_slice(&self.prev_block_hash);
        header[36..68].copy_from_slice(&self.merkle_root);
        header[TIME_OFFSET..TIME_OFFSET + 4].copy_from_slice(&self.timestamp.to_le_bytes());
        header[72..76].copy_from_slice(&self.bits.to_le_bytes());
        header[NONCE_OFFSET..NONCE_OFFSET + 4].copy_from_slice(&self.nonce.to_le_bytes());

        header
    }

    /// Compute the block hash (double SHA256), internal byte order.
    pub fn hash(&self) -> [u8; 32] {
        double_sha256(&self.serialize())
    }

    /// Block hash in display byte order.
    pub fn hash_hex(&self) -> String {
        hash_to_display_hex(&self.hash())
    }
}

/// Hash a genesis header built from the given fields.
pub fn header_hash(merkle_root: &[u8; 32], time: u32, bits: u32, nonce: u32) -> [u8; 32] {
    BlockHeader::genesis(*merkle_root, time, bits, nonce).hash()
}
