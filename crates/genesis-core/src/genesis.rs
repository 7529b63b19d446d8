//! Genesis driver: one coinbase, one search per network profile.

use crate::coinbase::{build_coinbase, CoinbaseTransaction};
use crate::difficulty::format_magnitude;
use crate::error::{GenesisError, Result};
use crate::hash::hash_to_display_hex;
use crate::merkle::compute_merkle_root;
use crate::network::{NetworkProfile, COIN, DEFAULT_REWARD_COINS};
use crate::search::{SearchResult, Searcher};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use tracing::info;

/// How profiles are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// One profile after another, in input order.
    #[default]
    Sequential,
    /// One rayon task per profile.
    Parallel,
}

/// Validated input for a genesis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisParams {
    /// Message embedded in the coinbase script-sig.
    pub message: Vec<u8>,
    /// Public key paid by the coinbase output.
    pub pubkey: Vec<u8>,
    /// Reward in base units.
    pub reward: u64,
    /// Profiles to search, never empty.
    pub profiles: Vec<NetworkProfile>,
}

impl GenesisParams {
    /// Validate raw inputs. An empty profile list selects the defaults.
    pub fn new(
        message: impl Into<Vec<u8>>,
        pubkey_hex: &str,
        reward: u64,
        profiles: Vec<NetworkProfile>,
    ) -> Result<Self> {
        let pubkey = hex::decode(pubkey_hex.trim())
            .map_err(|e| GenesisError::InvalidPubkey(e.to_string()))?;
        if pubkey.is_empty() {
            return Err(GenesisError::InvalidPubkey("key is empty".to_string()));
        }

        let profiles = if profiles.is_empty() {
            NetworkProfile::defaults()
        } else {
            profiles
        };

        Ok(GenesisParams {
            message: message.into(),
            pubkey,
            reward,
            profiles,
        })
    }

    /// The default genesis reward in base units.
    pub fn default_reward() -> u64 {
        DEFAULT_REWARD_COINS * COIN
    }
}

/// Everything a genesis run reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenesisReport {
    /// Merkle root in display byte order.
    pub merkle_root: String,
    /// Serialized coinbase transaction, hex.
    pub coinbase_tx: String,
    /// One result per completed profile, in input order.
    pub results: Vec<SearchResult>,
}

/// A prepared genesis run.
///
/// Construction builds the coinbase and decodes every profile's target,
/// so all input errors surface before any search starts.
#[derive(Debug, Clone)]
pub struct GenesisFinder {
    coinbase: CoinbaseTransaction,
    merkle_root: [u8; 32],
    searchers: Vec<Searcher>,
}

impl GenesisFinder {
    /// Build the coinbase and one searcher per profile.
    pub fn new(params: &GenesisParams) -> Result<Self> {
        let coinbase = build_coinbase(&params.message, &params.pubkey, params.reward)?;
        let merkle_root = compute_merkle_root(&[coinbase.txid]);

        let searchers = params
            .profiles
            .iter()
            .map(|profile| Searcher::new(profile, &merkle_root))
            .collect::<Result<Vec<_>>>()?;

        Ok(GenesisFinder {
            coinbase,
            merkle_root,
            searchers,
        })
    }

    /// The shared coinbase transaction.
    pub fn coinbase(&self) -> &CoinbaseTransaction {
        &self.coinbase
    }

    /// Merkle root in display byte order.
    pub fn merkle_root_hex(&self) -> String {
        hash_to_display_hex(&self.merkle_root)
    }

    /// Search every profile to completion.
    pub fn run(self, mode: SearchMode) -> GenesisReport {
        self.run_until_cancelled(mode, &AtomicBool::new(false))
    }

    /// Search every profile until found or `cancel` is set.
    ///
    /// Profiles that finish before cancellation are still reported.
    pub fn run_until_cancelled(self, mode: SearchMode, cancel: &AtomicBool) -> GenesisReport {
        let merkle_root = self.merkle_root_hex();
        info!(
            merkle_root = %merkle_root,
            profiles = self.searchers.len(),
            mode = ?mode,
            "starting genesis search"
        );

        let search = |mut searcher: Searcher| {
            info!(
                network = searcher.name(),
                target = %searcher.target(),
                difficulty = searcher.target().difficulty(),
                expected_hashes = %format_magnitude(searcher.target().expected_hashes()),
                "searching"
            );
            let result = searcher.run_until_cancelled(cancel);
            if let Some(found) = &result {
                info!(
                    network = %found.name,
                    time = found.time,
                    nonce = found.nonce,
                    hashes = found.hashes,
                    hash = %found.hash,
                    "genesis found"
                );
            }
            result
        };

        let outcomes: Vec<Option<SearchResult>> = match mode {
            SearchMode::Sequential => self.searchers.into_iter().map(search).collect(),
            SearchMode::Parallel => self.searchers.into_par_iter().map(search).collect(),
        };

        GenesisReport {
            merkle_root,
            coinbase_tx: self.coinbase.raw_tx_hex(),
            results: outcomes.into_iter().flatten().collect(),
        }
    }
}

/// Validate, build and search in one call.
pub fn find_genesis(params: &GenesisParams, mode: SearchMode) -> Result<GenesisReport> {
    Ok(GenesisFinder::new(params)?.run(mode))
}
