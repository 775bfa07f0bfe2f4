//! Wake-on-LAN port

use async_trait::async_trait;

/// Sends a Wake-on-LAN magic packet
#[async_trait]
pub trait WakeSender: Send + Sync {
    /// Returns `true` only if the datagram was handed to the network
    async fn send_wake(&self, mac: &str, broadcast: Option<&str>, port: u16) -> bool;
}
