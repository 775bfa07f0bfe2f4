//! Wake-on-LAN magic packets
//!
//! A magic packet is 6 bytes of `0xFF` followed by the target MAC address
//! repeated 16 times, broadcast in a single UDP datagram. There is no
//! acknowledgement.

mod packet;
mod sender;

pub use packet::{parse_mac, MacAddress, MagicPacket, MAGIC_PACKET_LEN};
pub use sender::{send_wake, UdpWakeSender};
