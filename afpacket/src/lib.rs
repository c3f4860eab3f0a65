#![cfg(target_os = "linux")]
mod interface;
mod linux;
mod sockets;

pub use interface::{hardware_addr, index, HardwareAddr};
pub use sockets::{BoundSocket, Socket};

/// Ethertype for ARP, in host byte order.
pub const ETH_P_ARP: u16 = 0x0806;

/// Hardware address family reported for Ethernet-like interfaces.
pub const ARPHRD_ETHER: u16 = 1;

/// Hardware address family reported for the loopback interface.
pub const ARPHRD_LOOPBACK: u16 = 772;
