//! Proof-of-work search over (time, nonce).
//!
//! A [`Searcher`] is an explicit state machine. It starts `Searching` at the
//! profile's `(start_time, start_nonce)` and moves to `Found` the first time
//! a header hash meets the target. Each step hashes exactly one header.
//! The nonce wraps modulo 2^32 and carries into the timestamp.

use crate::block::{BlockHeader, BLOCK_HEADER_SIZE, NONCE_OFFSET, TIME_OFFSET};
use crate::difficulty::{bits_to_target, Target};
use crate::error::Result;
use crate::hash::{double_sha256, hash_to_display_hex, reverse_bytes};
use crate::network::NetworkProfile;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Attempts between progress log lines.
const PROGRESS_INTERVAL: u64 = 1 << 20;

/// The mutable (time, nonce) position of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCursor {
    /// Header timestamp.
    pub time: u32,
    /// Header nonce.
    pub nonce: u32,
}

impl SearchCursor {
    /// Move to the next nonce, carrying into the timestamp on wrap.
    #[inline]
    pub fn advance(&mut self) {
        self.nonce = self.nonce.wrapping_add(1);
        if self.nonce == 0 {
            self.time = self.time.wrapping_add(1);
        }
    }
}

/// The outcome of one profile's search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Profile name.
    pub name: String,
    /// Winning timestamp.
    pub time: u32,
    /// Winning nonce.
    pub nonce: u32,
    /// Block hash in display byte order.
    pub hash: String,
    /// Number of headers hashed, including the winning one.
    pub hashes: u64,
}

/// Search state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Still looking; the cursor is the next header to try.
    Searching(SearchCursor),
    /// Terminal.
    Found(SearchResult),
}

/// Proof-of-work search for one network profile.
#[derive(Debug, Clone)]
pub struct Searcher {
    name: String,
    target: Target,
    header: [u8; BLOCK_HEADER_SIZE],
    state: SearchState,
    hashes: u64,
}

impl Searcher {
    /// Create a searcher for `profile`, decoding its target from the bits.
    ///
    /// `merkle_root` is the commitment digest as hashed; the header carries
    /// it byte-reversed.
    pub fn new(profile: &NetworkProfile, merkle_root: &[u8; 32]) -> Result<Self> {
        let target = bits_to_target(profile.bits)?;
        Ok(Self::with_target(profile, merkle_root, target))
    }

    /// Create a searcher with an explicit target instead of the profile's bits.
    ///
    /// The bits are still written into the header.
    pub fn with_target(profile: &NetworkProfile, merkle_root: &[u8; 32], target: Target) -> Self {
        let header = BlockHeader::genesis(
            reverse_bytes(merkle_root),
            profile.start_time,
            profile.bits,
            profile.start_nonce,
        )
        .serialize();

        Searcher {
            name: profile.name.clone(),
            target,
            header,
            state: SearchState::Searching(SearchCursor {
                time: profile.start_time,
                nonce: profile.start_nonce,
            }),
            hashes: 0,
        }
    }

    /// Profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The target header hashes are compared against.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Current state.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Headers hashed so far.
    pub fn hashes(&self) -> u64 {
        self.hashes
    }

    /// The result, once found.
    pub fn result(&self) -> Option<&SearchResult> {
        match &self.state {
            SearchState::Found(result) => Some(result),
            SearchState::Searching(_) => None,
        }
    }

    /// Hash the header at the current cursor and advance the state.
    ///
    /// Once `Found`, further calls do nothing.
    pub fn step(&mut self) -> &SearchState {
        let cursor = match self.state {
            SearchState::Searching(cursor) => cursor,
            SearchState::Found(_) => return &self.state,
        };

        self.header[TIME_OFFSET..TIME_OFFSET + 4].copy_from_slice(&cursor.time.to_le_bytes());
        self.header[NONCE_OFFSET..NONCE_OFFSET + 4].copy_from_slice(&cursor.nonce.to_le_bytes());

        let hash = double_sha256(&self.header);
        self.hashes += 1;

        self.state = if self.target.is_met_by(&hash) {
            SearchState::Found(SearchResult {
                name: self.name.clone(),
                time: cursor.time,
                nonce: cursor.nonce,
                hash: hash_to_display_hex(&hash),
                hashes: self.hashes,
            })
        } else {
            let mut next = cursor;
            next.advance();
            SearchState::Searching(next)
        };

        &self.state
    }

    /// Step until the target is met. Does not return before then.
    pub fn run(&mut self) -> SearchResult {
        loop {
            if let SearchState::Found(result) = self.step() {
                return result.clone();
            }
            self.log_progress();
        }
    }

    /// Step until the target is met or `cancel` is set.
    ///
    /// The flag is checked before every attempt; `None` means cancelled.
    pub fn run_until_cancelled(&mut self, cancel: &AtomicBool) -> Option<SearchResult> {
        loop {
            if let Some(result) = self.result() {
                return Some(result.clone());
            }
            if cancel.load(Ordering::Relaxed) {
                debug!(network = %self.name, hashes = self.hashes, "search cancelled");
                return None;
            }
            self.step();
            self.log_progress();
        }
    }

    fn log_progress(&self) {
        if self.hashes % PROGRESS_INTERVAL != 0 {
            return;
        }
        if let SearchState::Searching(cursor) = &self.state {
            debug!(
                network = %self.name,
                hashes = self.hashes,
                time = cursor.time,
                nonce = cursor.nonce,
                "search progress"
            );
        }
    }
}
