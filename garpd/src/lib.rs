//! Periodic gratuitous ARP announcements.
//!
//! An [`Announcer`] resolves an interface once, opens a link-layer socket bound to it, and then
//! broadcasts an ARP reply claiming the configured IPv4 address every interval. Neighbors that
//! hear it update their caches, which is what makes an address move between hosts visible.

mod announcer;
mod clock;
mod config;
mod error;
pub mod frame;
mod interface;
mod link;

pub use announcer::{Announcer, State};
pub use clock::{Clock, SystemClock};
pub use config::{AnnounceConfig, DEFAULT_INTERVAL};
pub use error::Error;
pub use interface::{InterfaceInfo, Resolver};
pub use link::{Link, Transmitter};

#[cfg(target_os = "linux")]
pub use interface::SystemResolver;
#[cfg(target_os = "linux")]
pub use link::{AfPacketLink, AfPacketTransmitter};
