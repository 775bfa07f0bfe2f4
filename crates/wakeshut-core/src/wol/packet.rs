//! MAC parsing and magic packet construction

use crate::{Result, WakeshutError};

/// 6-byte hardware address
pub type MacAddress = [u8; 6];

const SYNC_STREAM_LEN: usize = 6;
const MAC_REPETITIONS: usize = 16;

/// Size of a magic packet payload (102 bytes)
pub const MAGIC_PACKET_LEN: usize = SYNC_STREAM_LEN + MAC_REPETITIONS * 6;

/// Parse `AA:BB:CC:DD:EE:FF`, `AA-BB-CC-DD-EE-FF` or `AABBCCDDEEFF`
pub fn parse_mac(mac: &str) -> Result<MacAddress> {
    let cleaned: String = mac
        .trim()
        .chars()
        .filter(|c| *c != ':' && *c != '-')
        .collect();

    if cleaned.len() != 12 {
        return Err(WakeshutError::MalformedInput(format!(
            "MAC address must have 12 hex digits: {}",
            mac
        )));
    }

    let bytes = hex::decode(&cleaned)
        .map_err(|e| WakeshutError::MalformedInput(format!("Invalid MAC address {}: {}", mac, e)))?;

    let mut out = [0u8; 6];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Wake-on-LAN payload for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicPacket {
    mac: MacAddress,
    bytes: [u8; MAGIC_PACKET_LEN],
}

impl MagicPacket {
    pub fn new(mac: MacAddress) -> Self {
        let mut bytes = [0xFFu8; MAGIC_PACKET_LEN];
        for chunk in bytes[SYNC_STREAM_LEN..].chunks_exact_mut(6) {
            chunk.copy_from_slice(&mac);
        }
        Self { mac, bytes }
    }

    pub fn from_mac_str(mac: &str) -> Result<Self> {
        Ok(Self::new(parse_mac(mac)?))
    }

    pub fn mac(&self) -> &MacAddress {
        &self.mac
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
