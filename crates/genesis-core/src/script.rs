//! Script assembly: minimal data pushes and the pay-to-pubkey template.

use crate::error::{GenesisError, Result};

/// Push the next byte as a length, then that many bytes.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Push the next 2 bytes (LE) as a length, then that many bytes.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Push the next 4 bytes (LE) as a length, then that many bytes.
pub const OP_PUSHDATA4: u8 = 0x4e;
/// Verify a signature against the public key on the stack.
pub const OP_CHECKSIG: u8 = 0xac;

/// Encode `payload` as a single push using the smallest opcode for its length.
pub fn push_data(payload: &[u8]) -> Result<Vec<u8>> {
    let mut script = Vec::with_capacity(payload.len() + 5);
    write_push(payload, &mut script)?;
    Ok(script)
}

fn write_push(payload: &[u8], script: &mut Vec<u8>) -> Result<()> {
    let len = payload.len();

    if len < OP_PUSHDATA1 as usize {
        script.push(len as u8);
    } else if len <= 0xff {
        script.push(OP_PUSHDATA1);
        script.push(len as u8);
    } else if len <= 0xffff {
        script.push(OP_PUSHDATA2);
        script.extend_from_slice(&(len as u16).to_le_bytes());
    } else {
        let len32 = u32::try_from(len).map_err(|_| GenesisError::PayloadTooLarge(len))?;
        script.push(OP_PUSHDATA4);
        script.extend_from_slice(&len32.to_le_bytes());
    }

    script.extend_from_slice(payload);
    Ok(())
}

/// Incremental builder for script byte strings.
#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder {
    bytes: Vec<u8>,
}

impl ScriptBuilder {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a minimal push of `payload`.
    pub fn push_slice(mut self, payload: &[u8]) -> Result<Self> {
        write_push(payload, &mut self.bytes)?;
        Ok(self)
    }

    /// Append a raw opcode.
    pub fn push_opcode(mut self, opcode: u8) -> Self {
        self.bytes.push(opcode);
        self
    }

    /// Finish and return the script bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Build a pay-to-pubkey script: `<pubkey> OP_CHECKSIG`.
pub fn pay_to_pubkey(pubkey: &[u8]) -> Result<Vec<u8>> {
    Ok(ScriptBuilder::new()
        .push_slice(pubkey)?
        .push_opcode(OP_CHECKSIG)
        .into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_data_boundaries() {
        let cases: [(usize, &[u8]); 6] = [
            (75, &[75]),
            (76, &[OP_PUSHDATA1, 76]),
            (255, &[OP_PUSHDATA1, 0xff]),
            (256, &[OP_PUSHDATA2, 0x00, 0x01]),
            (65535, &[OP_PUSHDATA2, 0xff, 0xff]),
            (65536, &[OP_PUSHDATA4, 0x00, 0x00, 0x01, 0x00]),
        ];

        for (len, prefix) in cases {
            let payload = vec![0x5a; len];
            let script = push_data(&payload).unwrap();
            assert_eq!(&script[..prefix.len()], prefix, "prefix for length {}", len);
            assert_eq!(script.len(), prefix.len() + len, "total length for {}", len);
            assert!(script[prefix.len()..].iter().all(|b| *b == 0x5a));
        }
    }

    #[test]
    fn test_push_empty_payload() {
        assert_eq!(push_data(&[]).unwrap(), vec![0x00]);
    }

    #[test]
    fn test_pay_to_pubkey() {
        let mut pubkey = [0u8; 65];
        pubkey[0] = 0x04;
        let script = pay_to_pubkey(&pubkey).unwrap();

        assert_eq!(script.len(), 67);
        assert_eq!(script[0], 0x41);
        assert_eq!(&script[1..66], &pubkey[..]);
        assert_eq!(script[66], OP_CHECKSIG);
    }

    #[test]
    fn test_builder_concatenates_in_order() {
        let script = ScriptBuilder::new()
            .push_slice(&[0x01, 0x02])
            .unwrap()
            .push_opcode(0x51)
            .push_slice(&[])
            .unwrap()
            .into_bytes();
        assert_eq!(script, vec![0x02, 0x01, 0x02, 0x51, 0x00]);
    }
}
