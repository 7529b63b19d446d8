//! Network profiles: the per-network starting point of a genesis search.

use crate::error::{GenesisError, Result};
use std::fmt;
use std::str::FromStr;

/// Base units per coin.
pub const COIN: u64 = 100_000_000;

/// Number of fractional digits a coin amount may carry.
const COIN_DECIMALS: usize = 8;

/// Default genesis reward in coins.
pub const DEFAULT_REWARD_COINS: u64 = 50;

/// Well-known network variants with historical starting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Production network
    Main,
    /// Public test network
    Test,
    /// Local regression-test network
    Regtest,
}

impl Network {
    /// All built-in networks, in reporting order.
    pub const ALL: [Network; 3] = [Network::Main, Network::Test, Network::Regtest];

    /// Get network name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Regtest => "regtest",
        }
    }

    /// Historical genesis timestamp used as the search start.
    pub fn start_time(&self) -> u32 {
        match self {
            Network::Main => 1390009218,
            Network::Test => 1390579806,
            Network::Regtest => 1417626937,
        }
    }

    /// Compact difficulty of the genesis block.
    pub fn bits(&self) -> u32 {
        match self {
            Network::Main | Network::Test => 0x1e0ffff0,
            Network::Regtest => 0x207fffff,
        }
    }

    /// The default search profile for this network.
    pub fn default_profile(&self) -> NetworkProfile {
        NetworkProfile::new(self.name(), self.start_time(), self.bits())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Starting parameters of one genesis search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    /// Identifier reported with the result.
    pub name: String,
    /// First timestamp tried.
    pub start_time: u32,
    /// Compact difficulty target.
    pub bits: u32,
    /// First nonce tried.
    pub start_nonce: u32,
}

impl NetworkProfile {
    /// Create a profile starting at nonce 0.
    pub fn new(name: impl Into<String>, start_time: u32, bits: u32) -> Self {
        NetworkProfile {
            name: name.into(),
            start_time,
            bits,
            start_nonce: 0,
        }
    }

    /// Set the first nonce tried.
    pub fn with_start_nonce(mut self, start_nonce: u32) -> Self {
        self.start_nonce = start_nonce;
        self
    }

    /// Profiles used when none are configured: main, test and regtest.
    pub fn defaults() -> Vec<NetworkProfile> {
        Network::ALL.iter().map(Network::default_profile).collect()
    }

    /// Parse a list of `name:time:bits[:nonce]` specs, failing on the first bad one.
    pub fn parse_all<I, S>(specs: I) -> Result<Vec<NetworkProfile>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        specs.into_iter().map(|spec| spec.as_ref().parse()).collect()
    }
}

impl FromStr for NetworkProfile {
    type Err = GenesisError;

    /// Parse `name:time:bits[:nonce]`. Numbers are decimal or 0x-prefixed hex.
    fn from_str(spec: &str) -> Result<Self> {
        let parts: Vec<&str> = spec.split(':').collect();

        if parts.len() < 3 {
            return Err(GenesisError::profile(
                spec,
                format!("expected at least 3 fields, got {}", parts.len()),
            ));
        }
        if parts.len() > 4 {
            return Err(GenesisError::profile(
                spec,
                format!("expected at most 4 fields, got {}", parts.len()),
            ));
        }

        let name = parts[0].trim();
        if name.is_empty() {
            return Err(GenesisError::profile(spec, "network name is empty"));
        }

        let start_time = parse_u32("time", parts[1])?;
        let bits = parse_u32("bits", parts[2])?;
        let start_nonce = match parts.get(3) {
            Some(nonce) => parse_u32("nonce", nonce)?,
            None => 0,
        };

        Ok(NetworkProfile {
            name: name.to_string(),
            start_time,
            bits,
            start_nonce,
        })
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{:#010x}:{}",
            self.name, self.start_time, self.bits, self.start_nonce
        )
    }
}

/// Parse a u32 written in decimal or with a `0x` prefix.
pub fn parse_u32(field: &'static str, value: &str) -> Result<u32> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => trimmed.parse::<u32>(),
    };

    parsed.map_err(|_| GenesisError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Convert a decimal coin amount ("50", "0.5", "12.34567890") to base units.
pub fn parse_coin_amount(value: &str) -> Result<u64> {
    let invalid = || GenesisError::InvalidAmount(value.to_string());
    let trimmed = value.trim();

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > COIN_DECIMALS {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid());
    }

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u64>()
            .ok()
            .and_then(|coins| coins.checked_mul(COIN))
            .ok_or_else(invalid)?
    };

    let fraction_units = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = COIN_DECIMALS);
        padded.parse::<u64>().map_err(|_| invalid())?
    };

    whole_units.checked_add(fraction_units).ok_or_else(invalid)
}
