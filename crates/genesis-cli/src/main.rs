//! find-genesis: generate genesis block parameters for a new network.
//!
//! Example:
//!   find-genesis \
//!     --message "Example 13/Nov/2025 Rebooting the chain" \
//!     --pubkey 04678afd...1d5f \
//!     --net main:1390009218:0x1e0ffff0 --net regtest:1417626937:0x207fffff

use anyhow::{Context, Result};
use clap::Parser;
use genesis_core::config::RewardValue;
use genesis_core::{GenesisConfig, GenesisFinder, GenesisReport};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Genesis block finder for Bitcoin-derived chains.
#[derive(Parser, Debug)]
#[command(name = "find-genesis", version, about)]
struct Args {
    /// Message placed inside the coinbase scriptSig
    #[arg(long, alias = "timestamp", env = "GENESIS_MESSAGE")]
    message: Option<String>,

    /// Hex-encoded public key for the genesis output
    #[arg(long, env = "GENESIS_PUBKEY")]
    pubkey: Option<String>,

    /// Block subsidy in coins (default: 50)
    #[arg(long)]
    reward: Option<String>,

    /// Network spec name:time:bits[:nonce]; time, bits and nonce accept 0x hex.
    /// Repeat for multiple networks. Defaults to main, test and regtest.
    #[arg(long = "net", value_name = "NAME:TIME:BITS[:NONCE]")]
    nets: Vec<String>,

    /// JSON config file; command-line flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Search all networks concurrently
    #[arg(long)]
    parallel: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Flag values as a config layer, absent flags left unset.
    fn overrides(&self) -> GenesisConfig {
        GenesisConfig {
            message: self.message.clone(),
            pubkey: self.pubkey.clone(),
            reward: self.reward.clone().map(RewardValue::Text),
            networks: self.nets.clone(),
            parallel: self.parallel.then_some(true),
        }
    }

    fn load_config(&self) -> Result<GenesisConfig> {
        let base = match &self.config {
            Some(path) => GenesisConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => GenesisConfig::default(),
        };
        Ok(base.merge(self.overrides()))
    }
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn format_text_report(report: &GenesisReport) -> String {
    let mut lines = vec![format!("Merkle root: {}", report.merkle_root)];
    lines.extend(report.results.iter().map(|result| {
        format!(
            "[{}] time={} nonce={} hash={}",
            result.name, result.time, result.nonce, result.hash
        )
    }));
    lines.join("\n")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = args.load_config()?;
    let mode = config.search_mode();
    let params = config.into_params().context("invalid genesis parameters")?;
    debug!(
        profiles = params.profiles.len(),
        reward = params.reward,
        mode = ?mode,
        "configuration loaded"
    );

    // All profiles are validated here, before any search starts
    let finder = GenesisFinder::new(&params).context("failed to prepare genesis search")?;
    let report = finder.run(mode);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format_text_report(&report));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use genesis_core::{SearchMode, SearchResult};

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("find-genesis").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_become_params() {
        let args = parse(&[
            "--timestamp",
            "hello",
            "--pubkey",
            "04ab",
            "--reward",
            "1.5",
            "--net",
            "main:1:0x1e0ffff0",
            "--net",
            "regtest:2:0x207fffff:7",
            "--parallel",
        ]);

        let config = args.load_config().unwrap();
        assert_eq!(config.search_mode(), SearchMode::Parallel);

        let params = config.into_params().unwrap();
        assert_eq!(params.message, b"hello".to_vec());
        assert_eq!(params.reward, 150_000_000);
        assert_eq!(params.profiles.len(), 2);
        assert_eq!(params.profiles[1].start_nonce, 7);
    }

    #[test]
    fn test_absent_flags_do_not_override() {
        let args = parse(&["--message", "m"]);
        let overrides = args.overrides();
        assert_eq!(overrides.pubkey, None);
        assert_eq!(overrides.parallel, None);
        assert!(overrides.networks.is_empty());
    }

    #[test]
    fn test_text_report_format() {
        let report = GenesisReport {
            merkle_root: "ab".repeat(32),
            coinbase_tx: String::new(),
            results: vec![SearchResult {
                name: "main".into(),
                time: 1390009218,
                nonce: 42,
                hash: "00".repeat(32),
                hashes: 43,
            }],
        };

        let text = format_text_report(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("Merkle root: {}", "ab".repeat(32)));
        assert_eq!(
            lines[1],
            format!("[main] time=1390009218 nonce=42 hash={}", "00".repeat(32))
        );
    }
}
