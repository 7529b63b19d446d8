//! Run configuration: a JSON file merged with command-line overrides.
//!
//! Every field is optional at this layer. [`GenesisConfig::into_params`]
//! validates the merged result into [`GenesisParams`].

use crate::error::{GenesisError, Result};
use crate::genesis::{GenesisParams, SearchMode};
use crate::network::{parse_coin_amount, NetworkProfile};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A reward written either as a JSON number or as a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RewardValue {
    /// `"50.5"`
    Text(String),
    /// `50.5`
    Number(serde_json::Number),
}

impl RewardValue {
    /// Reward in base units.
    pub fn to_base_units(&self) -> Result<u64> {
        match self {
            RewardValue::Text(text) => parse_coin_amount(text),
            RewardValue::Number(number) => parse_coin_amount(&plain_decimal(number)?),
        }
    }
}

/// Render a JSON number without an exponent, shifting the decimal point.
///
/// serde_json prints small and large floats as `1e-8`; the digits are kept
/// exactly so the amount parser sees the literal value.
fn plain_decimal(number: &serde_json::Number) -> Result<String> {
    let text = number.to_string();
    let Some((mantissa, exponent)) = text.split_once(['e', 'E']) else {
        return Ok(text);
    };

    let invalid = || GenesisError::InvalidAmount(text.clone());
    let exponent: i64 = exponent.parse().map_err(|_| invalid())?;
    // Anything this far out cannot be an amount of at most 8 decimals in a u64
    if exponent.abs() > 32 {
        return Err(invalid());
    }

    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = format!("{whole}{fraction}");
    let point = whole.len() as i64 + exponent;

    let plain = if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point as usize >= digits.len() {
        format!("{}{}", digits, "0".repeat(point as usize - digits.len()))
    } else {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{int_part}.{frac_part}")
    };

    Ok(format!("{sign}{plain}"))
}

/// Raw, unvalidated configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenesisConfig {
    /// Message placed inside the coinbase script-sig.
    pub message: Option<String>,
    /// Hex-encoded reward public key.
    pub pubkey: Option<String>,
    /// Reward in coins.
    pub reward: Option<RewardValue>,
    /// Network specs, `name:time:bits[:nonce]`.
    #[serde(default)]
    pub networks: Vec<String>,
    /// Search profiles concurrently.
    pub parallel: Option<bool>,
}

impl GenesisConfig {
    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Err(GenesisError::config(format!("{} is empty", path.display())));
        }
        Self::from_json_str(&contents)
    }

    /// Overlay `overrides` on top of `self`.
    ///
    /// Scalar fields present in `overrides` win. A non-empty network list in
    /// `overrides` replaces the whole list.
    pub fn merge(self, overrides: GenesisConfig) -> GenesisConfig {
        GenesisConfig {
            message: overrides.message.or(self.message),
            pubkey: overrides.pubkey.or(self.pubkey),
            reward: overrides.reward.or(self.reward),
            networks: if overrides.networks.is_empty() {
                self.networks
            } else {
                overrides.networks
            },
            parallel: overrides.parallel.or(self.parallel),
        }
    }

    /// Scheduling mode selected by the config.
    pub fn search_mode(&self) -> SearchMode {
        if self.parallel.unwrap_or(false) {
            SearchMode::Parallel
        } else {
            SearchMode::Sequential
        }
    }

    /// Validate into run parameters. Every profile is parsed before returning.
    pub fn into_params(self) -> Result<GenesisParams> {
        let message = self.message.ok_or(GenesisError::MissingField("message"))?;
        let pubkey = self.pubkey.ok_or(GenesisError::MissingField("pubkey"))?;
        let reward = match &self.reward {
            Some(reward) => reward.to_base_units()?,
            None => GenesisParams::default_reward(),
        };
        let profiles = NetworkProfile::parse_all(&self.networks)?;

        GenesisParams::new(message, &pubkey, reward, profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::COIN;
    use std::io::Write;

    const FULL_CONFIG: &str = r#"{
        "message": "hello genesis",
        "pubkey": "04ab",
        "reward": "12.5",
        "networks": ["main:1390009218:0x1e0ffff0", "dev:1:0x207fffff:9"],
        "parallel": true
    }"#;

    #[test]
    fn test_full_config_into_params() {
        let config = GenesisConfig::from_json_str(FULL_CONFIG).unwrap();
        assert_eq!(config.search_mode(), SearchMode::Parallel);

        let params = config.into_params().unwrap();
        assert_eq!(params.message, b"hello genesis".to_vec());
        assert_eq!(params.pubkey, vec![0x04, 0xab]);
        assert_eq!(params.reward, 1_250_000_000);
        assert_eq!(params.profiles.len(), 2);
        assert_eq!(params.profiles[1].start_nonce, 9);
    }

    #[test]
    fn test_numeric_reward() {
        let config =
            GenesisConfig::from_json_str(r#"{"message": "m", "pubkey": "02", "reward": 0.25}"#)
                .unwrap();
        assert_eq!(config.into_params().unwrap().reward, COIN / 4);
    }

    #[test]
    fn test_numeric_reward_in_exponent_form() {
        let reward = |json: &str| {
            let config = format!(r#"{{"message": "m", "pubkey": "02", "reward": {json}}}"#);
            GenesisConfig::from_json_str(&config).unwrap().into_params().map(|p| p.reward)
        };

        assert_eq!(reward("0.00000001").unwrap(), 1);
        assert_eq!(reward("0.00000015").unwrap(), 15);
        assert_eq!(reward("1e2").unwrap(), 100 * COIN);
        assert_eq!(reward("2.5e3").unwrap(), 2_500 * COIN);
        assert!(matches!(
            reward("0.000000001"),
            Err(GenesisError::InvalidAmount(_))
        ));
        assert!(matches!(reward("1e300"), Err(GenesisError::InvalidAmount(_))));
    }

    #[test]
    fn test_plain_decimal() {
        let plain = |json: &str| {
            let number: serde_json::Number = serde_json::from_str(json).unwrap();
            plain_decimal(&number).unwrap()
        };
        assert_eq!(plain("12"), "12");
        assert_eq!(plain("1e-8"), "0.00000001");
        assert_eq!(plain("1.5e-7"), "0.00000015");
        assert_eq!(plain("-2e-3"), "-0.002");
    }

    #[test]
    fn test_defaults_when_omitted() {
        let config = GenesisConfig::from_json_str(r#"{"message": "m", "pubkey": "02"}"#).unwrap();
        assert_eq!(config.search_mode(), SearchMode::Sequential);

        let params = config.into_params().unwrap();
        assert_eq!(params.reward, 50 * COIN);
        assert_eq!(params.profiles, NetworkProfile::defaults());
    }

    #[test]
    fn test_missing_required_fields() {
        let no_message = GenesisConfig {
            pubkey: Some("02".into()),
            ..Default::default()
        };
        assert!(matches!(
            no_message.into_params(),
            Err(GenesisError::MissingField("message"))
        ));

        let no_pubkey = GenesisConfig {
            message: Some("m".into()),
            ..Default::default()
        };
        assert!(matches!(
            no_pubkey.into_params(),
            Err(GenesisError::MissingField("pubkey"))
        ));
    }

    #[test]
    fn test_malformed_network_fails_whole_config() {
        let config = GenesisConfig {
            message: Some("m".into()),
            pubkey: Some("02".into()),
            networks: vec!["main:1:2".into(), "oops".into()],
            ..Default::default()
        };
        assert!(matches!(
            config.into_params(),
            Err(GenesisError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(matches!(
            GenesisConfig::from_json_str(r#"{"mesage": "typo"}"#),
            Err(GenesisError::Json(_))
        ));
    }

    #[test]
    fn test_merge_overrides() {
        let base = GenesisConfig::from_json_str(FULL_CONFIG).unwrap();
        let overrides = GenesisConfig {
            message: Some("override".into()),
            networks: vec!["only:1:0x207fffff".into()],
            ..Default::default()
        };

        let merged = base.merge(overrides);
        assert_eq!(merged.message.as_deref(), Some("override"));
        assert_eq!(merged.pubkey.as_deref(), Some("04ab"));
        assert_eq!(merged.networks, vec!["only:1:0x207fffff".to_string()]);
        assert_eq!(merged.parallel, Some(true));
    }

    #[test]
    fn test_merge_keeps_base_networks_when_override_empty() {
        let base = GenesisConfig::from_json_str(FULL_CONFIG).unwrap();
        let merged = base.clone().merge(GenesisConfig::default());
        assert_eq!(merged, base);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL_CONFIG.as_bytes()).unwrap();

        let config = GenesisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.message.as_deref(), Some("hello genesis"));

        assert!(matches!(
            GenesisConfig::from_file(file.path().with_extension("missing")),
            Err(GenesisError::Io(_))
        ));
    }

    #[test]
    fn test_empty_file_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            GenesisConfig::from_file(file.path()),
            Err(GenesisError::Config(_))
        ));
    }
}
