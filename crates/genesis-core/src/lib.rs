//! Genesis block construction for Bitcoin-derived chains.
//!
//! This crate provides pure Rust implementations of:
//! - CompactSize and ScriptNum integer encodings
//! - Script push-data assembly and the pay-to-pubkey template
//! - Genesis coinbase transaction building and its merkle root
//! - Compact difficulty ("bits") decoding into a 256-bit target
//! - Block header serialization and SHA256 double-hashing
//! - A (time, nonce) proof-of-work search per network profile

pub mod block;
pub mod coinbase;
pub mod config;
pub mod difficulty;
pub mod encoding;
pub mod error;
pub mod genesis;
pub mod hash;
pub mod merkle;
pub mod network;
pub mod script;
pub mod search;

pub use block::{header_hash, BlockHeader};
pub use coinbase::{build_coinbase, CoinbaseTransaction};
pub use config::GenesisConfig;
pub use difficulty::{bits_to_target, Target};
pub use encoding::{decode_compact_size, encode_compact_size, encode_script_num};
pub use error::{GenesisError, Result};
pub use genesis::{find_genesis, GenesisFinder, GenesisParams, GenesisReport, SearchMode};
pub use hash::double_sha256;
pub use merkle::compute_merkle_root;
pub use network::{Network, NetworkProfile, COIN};
pub use script::push_data;
pub use search::{SearchCursor, SearchResult, SearchState, Searcher};
