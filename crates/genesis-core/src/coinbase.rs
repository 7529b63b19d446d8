//! Genesis coinbase transaction construction.
//!
//! The genesis coinbase is a version-1 transaction with one null-prevout
//! input carrying the message, and one pay-to-pubkey output carrying the
//! block reward.

use crate::encoding::{encode_script_num, write_compact_size};
use crate::error::Result;
use crate::hash::{double_sha256, hash_to_display_hex};
use crate::script::{pay_to_pubkey, ScriptBuilder};

/// First script-sig push of every genesis coinbase (the original `0x1d00ffff` bits).
pub const GENESIS_SCRIPT_SIG_BITS: i64 = 486_604_799;

/// Second script-sig push of every genesis coinbase.
pub const GENESIS_SCRIPT_SIG_EXTRA: i64 = 4;

/// Transaction version used by the genesis coinbase.
pub const COINBASE_TX_VERSION: u32 = 1;

/// Previous-output index marking "no previous output".
const NULL_PREVOUT_INDEX: u32 = 0xFFFFFFFF;

/// Final sequence number.
const SEQUENCE_FINAL: u32 = 0xFFFFFFFF;

/// A constructed coinbase transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinbaseTransaction {
    /// Serialized transaction bytes.
    pub raw_tx: Vec<u8>,
    /// Transaction ID (double SHA256 of raw_tx), internal byte order.
    pub txid: [u8; 32],
}

impl CoinbaseTransaction {
    /// Hex of the serialized transaction.
    pub fn raw_tx_hex(&self) -> String {
        hex::encode(&self.raw_tx)
    }

    /// Transaction ID in display byte order.
    pub fn txid_hex(&self) -> String {
        hash_to_display_hex(&self.txid)
    }
}

/// Build the script-sig: `<486604799> <4> <message>`.
pub fn genesis_script_sig(message: &[u8]) -> Result<Vec<u8>> {
    Ok(ScriptBuilder::new()
        .push_slice(&encode_script_num(GENESIS_SCRIPT_SIG_BITS))?
        .push_slice(&encode_script_num(GENESIS_SCRIPT_SIG_EXTRA))?
        .push_slice(message)?
        .into_bytes())
}

/// Build the genesis coinbase paying `reward` base units to `reward_pubkey`.
pub fn build_coinbase(
    message: &[u8],
    reward_pubkey: &[u8],
    reward: u64,
) -> Result<CoinbaseTransaction> {
    let script_sig = genesis_script_sig(message)?;
    let script_pubkey = pay_to_pubkey(reward_pubkey)?;

    let raw_tx = serialize_transaction(&script_sig, reward, &script_pubkey);
    let txid = double_sha256(&raw_tx);

    Ok(CoinbaseTransaction { raw_tx, txid })
}

fn serialize_transaction(script_sig: &[u8], value: u64, script_pubkey: &[u8]) -> Vec<u8> {
    let mut raw_tx = Vec::with_capacity(60 + script_sig.len() + script_pubkey.len());

    // Version (4 bytes, little-endian)
    raw_tx.extend_from_slice(&COINBASE_TX_VERSION.to_le_bytes());

    // Input count
    write_compact_size(1, &mut raw_tx);

    // Input: previous output (null for coinbase)
    raw_tx.extend_from_slice(&[0u8; 32]);
    raw_tx.extend_from_slice(&NULL_PREVOUT_INDEX.to_le_bytes());

    write_compact_size(script_sig.len() as u64, &mut raw_tx);
    raw_tx.extend_from_slice(script_sig);

    raw_tx.extend_from_slice(&SEQUENCE_FINAL.to_le_bytes());

    // Output count
    write_compact_size(1, &mut raw_tx);

    raw_tx.extend_from_slice(&value.to_le_bytes());
    write_compact_size(script_pubkey.len() as u64, &mut raw_tx);
    raw_tx.extend_from_slice(script_pubkey);

    // Locktime
    raw_tx.extend_from_slice(&0u32.to_le_bytes());

    raw_tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::COIN;

    const SATOSHI_MESSAGE: &[u8] =
        b"The Times 03/Jan/2009 Chancellor on brink of second bailout for banks";
    const SATOSHI_PUBKEY: &str = "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f";

    fn zero_pubkey() -> [u8; 65] {
        let mut pubkey = [0u8; 65];
        pubkey[0] = 0x04;
        pubkey
    }

    #[test]
    fn test_genesis_script_sig_prefix() {
        let script_sig = genesis_script_sig(b"test").unwrap();
        assert_eq!(hex::encode(script_sig), "04ffff001d01040474657374");
    }

    #[test]
    fn test_coinbase_golden_digest() {
        let coinbase = build_coinbase(b"test", &zero_pubkey(), 50 * COIN).unwrap();

        let parts: [&str; 12] = [
            "01000000",
            "01",
            &"00".repeat(32),
            "ffffffff",
            "0c04ffff001d01040474657374",
            "ffffffff",
            "01",
            "00f2052a01000000",
            "434104",
            &"00".repeat(64),
            "ac",
            "00000000",
        ];
        let expected = parts.concat();

        assert_eq!(coinbase.raw_tx.len(), 139);
        assert_eq!(coinbase.raw_tx_hex(), expected);
        assert_eq!(
            hex::encode(coinbase.txid),
            "a8bfe0244d7bb8ed4c3ba4b3b768d4dda29315336a6d2782e3fc7d493e1950bf"
        );
        assert_eq!(
            coinbase.txid_hex(),
            "bf50193e497dfce382276d6a331593a2ddd468b7b3a43b4cedb87b4d24e0bfa8"
        );
    }

    #[test]
    fn test_bitcoin_genesis_coinbase() {
        let pubkey = hex::decode(SATOSHI_PUBKEY).unwrap();
        let coinbase = build_coinbase(SATOSHI_MESSAGE, &pubkey, 50 * COIN).unwrap();

        assert_eq!(coinbase.raw_tx.len(), 204);
        assert_eq!(
            coinbase.txid_hex(),
            "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"
        );
    }

    #[test]
    fn test_coinbase_is_deterministic() {
        let a = build_coinbase(b"same", &zero_pubkey(), 1).unwrap();
        let b = build_coinbase(b"same", &zero_pubkey(), 1).unwrap();
        let c = build_coinbase(b"same", &zero_pubkey(), 2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.txid, c.txid);
    }

    #[test]
    fn test_long_message_uses_pushdata1() {
        let message = vec![b'x'; 100];
        let script_sig = genesis_script_sig(&message).unwrap();
        // 5 bytes of bits push, 2 bytes of extra push, then OP_PUSHDATA1 100
        assert_eq!(&script_sig[7..9], &[0x4c, 100]);
        assert_eq!(script_sig.len(), 9 + 100);
    }
}
