use crate::Error;
use garp_packets::MacAddr;

/// The identity of the interface announcements go out on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub index: i32,
    pub mac: MacAddr,
}

/// Maps an interface name to its index and hardware address.
pub trait Resolver {
    fn resolve(&self, name: &str) -> Result<InterfaceInfo, Error>;
}

#[cfg(target_os = "linux")]
pub use self::system::SystemResolver;

#[cfg(target_os = "linux")]
mod system {
    use super::{InterfaceInfo, Resolver};
    use crate::Error;
    use garp_packets::MacAddr;
    use std::ffi::CString;
    use std::io;
    use tracing::debug;

    /// Resolves interfaces with `SIOCGIFINDEX` and `SIOCGIFHWADDR`.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SystemResolver;

    impl Resolver for SystemResolver {
        fn resolve(&self, name: &str) -> Result<InterfaceInfo, Error> {
            let not_found = || Error::InterfaceNotFound {
                name: name.to_string(),
            };

            // Names the kernel could never have handed out are not worth a syscall.
            if name.is_empty() || name.len() >= libc::IFNAMSIZ {
                return Err(not_found());
            }
            let iface = CString::new(name).map_err(|_| not_found())?;

            let index = afpacket::index(&iface).map_err(|err| classify(name, err))?;
            let hwaddr = afpacket::hardware_addr(&iface).map_err(|err| classify(name, err))?;

            let mac = MacAddr::new(hwaddr.octets);
            if hwaddr.family != afpacket::ARPHRD_ETHER || mac.is_zero() {
                debug!(
                    interface = name,
                    family = hwaddr.family,
                    "interface has no Ethernet address"
                );
                return Err(Error::InterfaceHasNoHardwareAddress {
                    name: name.to_string(),
                });
            }

            Ok(InterfaceInfo { index, mac })
        }
    }

    fn classify(name: &str, err: io::Error) -> Error {
        match err.raw_os_error() {
            Some(libc::EPERM) | Some(libc::EACCES) => Error::PermissionDenied {
                interface: name.to_string(),
                cause: err,
            },
            _ => {
                debug!(interface = name, error = %err, "interface lookup failed");
                Error::InterfaceNotFound {
                    name: name.to_string(),
                }
            }
        }
    }

}
