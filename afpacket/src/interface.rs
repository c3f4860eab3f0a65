#![deny(missing_docs)]

use crate::linux;
use libc;
use std::{ffi::CStr, io, mem::MaybeUninit};

/// Hardware address of a network interface, as reported by `SIOCGIFHWADDR`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HardwareAddr {
    /// The `ARPHRD_*` family of the address.
    pub family: u16,
    /// The first six octets of the address.
    pub octets: [u8; linux::ETH_ALEN],
}

/// A throwaway datagram socket used only as a target for interface ioctls. Querying interfaces
/// this way does not require any privileges.
struct ControlSocket {
    fd: libc::c_int,
}

impl ControlSocket {
    fn new() -> io::Result<Self> {
        // No Rust-owned memory is involved; a negative return is mapped to the OS error.
        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM | libc::SOCK_CLOEXEC, 0) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Self { fd })
    }

    /// Issues an interface ioctl for `iface` and returns the filled-in request.
    fn request(&self, iface: &CStr, request: libc::c_ulong) -> io::Result<linux::ifreq> {
        let name = iface.to_bytes_with_nul();
        if name.len() > libc::IFNAMSIZ {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "interface name is longer than IFNAMSIZ",
            ));
        }

        // The name is copied with its terminator into a zeroed request no larger than IFNAMSIZ,
        // and the kernel writes only into the request we own.
        // Resources:
        // man 7 netdevice
        unsafe {
            let mut ifr: linux::ifreq = MaybeUninit::zeroed().assume_init();
            for (dst, src) in ifr.ifr_ifrn.ifrn_name.iter_mut().zip(name) {
                *dst = *src as libc::c_char;
            }
            let err = libc::ioctl(self.fd, request as _, &mut ifr as *mut linux::ifreq);
            if err < 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(ifr)
        }
    }
}

impl Drop for ControlSocket {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.fd);
        }
    }
}

/// Returns the kernel index of the interface named `iface`.
///
/// Fails with `ENODEV` when no such interface exists.
pub fn index(iface: &CStr) -> io::Result<i32> {
    let ifr = ControlSocket::new()?.request(iface, linux::SIOCGIFINDEX)?;
    // `ifr_ifindex` in the kernel headers expands to this union member.
    Ok(unsafe { ifr.ifr_ifru.ifru_ivalue })
}

/// Returns the hardware address of the interface named `iface`. Interfaces without an Ethernet
/// address (such as loopback) report a non-Ethernet family and a zeroed address.
pub fn hardware_addr(iface: &CStr) -> io::Result<HardwareAddr> {
    let ifr = ControlSocket::new()?.request(iface, linux::SIOCGIFHWADDR)?;
    let hwaddr = unsafe { ifr.ifr_ifru.ifru_hwaddr };

    let mut octets = [0; linux::ETH_ALEN];
    for (dst, src) in octets.iter_mut().zip(hwaddr.sa_data.iter()) {
        *dst = *src as u8;
    }
    Ok(HardwareAddr {
        family: hwaddr.sa_family,
        octets,
    })
}
