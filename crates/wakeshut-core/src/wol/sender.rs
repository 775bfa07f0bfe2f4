//! UDP broadcast sender

use super::packet::MagicPacket;
use crate::ports::WakeSender;
use crate::{Result, WakeshutError};
use async_trait::async_trait;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, error, info};
use wakeshut_types::LIMITED_BROADCAST;

/// Send one magic packet for `mac` to `broadcast:port`.
///
/// A blank or missing broadcast address means 255.255.255.255. Returns
/// `false` for an invalid MAC (before any socket is opened) and for any
/// resolution or socket error.
pub async fn send_wake(mac: &str, broadcast: Option<&str>, port: u16) -> bool {
    let packet = match MagicPacket::from_mac_str(mac) {
        Ok(packet) => packet,
        Err(e) => {
            error!("Invalid MAC: {} ({})", mac, e);
            return false;
        }
    };

    let addr = broadcast
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(LIMITED_BROADCAST);

    match transmit(&packet, addr, port).await {
        Ok(target) => {
            info!("Magic packet sent to {} via {}", mac, target);
            true
        }
        Err(e) => {
            error!("Failed to send WOL packet to {} via {}:{}: {}", mac, addr, port, e);
            false
        }
    }
}

async fn transmit(packet: &MagicPacket, addr: &str, port: u16) -> Result<SocketAddr> {
    let target = tokio::net::lookup_host((addr, port))
        .await?
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| WakeshutError::Validation(format!("No IPv4 address for {}", addr)))?;

    let socket = UdpSocket::bind(("0.0.0.0", 0)).await?;
    socket.set_broadcast(true)?;

    let sent = socket.send_to(packet.as_bytes(), target).await?;
    debug!("Sent {} byte datagram to {}", sent, target);
    if sent != packet.as_bytes().len() {
        return Err(WakeshutError::Io(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            format!("short datagram write ({} bytes)", sent),
        )));
    }

    Ok(target)
}

/// Stateless [`WakeSender`] backed by [`send_wake`]
#[derive(Debug, Clone, Copy, Default)]
pub struct UdpWakeSender;

#[async_trait]
impl WakeSender for UdpWakeSender {
    async fn send_wake(&self, mac: &str, broadcast: Option<&str>, port: u16) -> bool {
        send_wake(mac, broadcast, port).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wol::MAGIC_PACKET_LEN;

    #[tokio::test]
    async fn test_send_wake_delivers_packet() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = receiver.local_addr().unwrap().port();

        assert!(send_wake("AA-BB-CC-DD-EE-FF", Some("127.0.0.1"), port).await);

        let mut buf = [0u8; 256];
        let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
        assert_eq!(len, MAGIC_PACKET_LEN);

        let expected = MagicPacket::from_mac_str("AABBCCDDEEFF").unwrap();
        assert_eq!(&buf[..len], expected.as_bytes());
    }

    #[tokio::test]
    async fn test_invalid_mac_returns_false() {
        assert!(!send_wake("AA:BB:CC", Some("127.0.0.1"), 9).await);
        assert!(!UdpWakeSender.send_wake("not a mac", None, 9).await);
    }

    #[tokio::test]
    async fn test_unresolvable_broadcast_returns_false() {
        assert!(!send_wake("AABBCCDDEEFF", Some("no-such-host.invalid"), 9).await);
    }
}
