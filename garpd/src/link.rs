use crate::Error;

/// An open link-layer transmit handle, scoped to one interface and one ethertype.
/// Dropping the link releases it.
pub trait Link {
    /// Transmits one complete frame as a single broadcast.
    fn send(&mut self, frame: &[u8]) -> Result<(), Error>;
}

/// Opens transmit handles.
pub trait Transmitter {
    type Link: Link;

    fn open(&mut self, index: i32) -> Result<Self::Link, Error>;
}

#[cfg(target_os = "linux")]
pub use self::afpacket_link::{AfPacketLink, AfPacketTransmitter};

#[cfg(target_os = "linux")]
mod afpacket_link {
    use super::{Link, Transmitter};
    use crate::Error;
    use afpacket::{BoundSocket, Socket, ETH_P_ARP};
    use std::io;

    /// Opens `AF_PACKET` sockets that only carry ARP.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct AfPacketTransmitter;

    /// An `AF_PACKET` socket bound to one interface. The socket is closed on drop.
    pub struct AfPacketLink {
        socket: BoundSocket,
    }

    impl Transmitter for AfPacketTransmitter {
        type Link = AfPacketLink;

        fn open(&mut self, index: i32) -> Result<AfPacketLink, Error> {
            let socket = Socket::new(ETH_P_ARP).map_err(|e| classify_open(index, e))?;
            let socket = socket.bind(index).map_err(|e| classify_open(index, e))?;
            Ok(AfPacketLink { socket })
        }
    }

    /// Privilege refusals keep their own kind; any other failure to open means the link is
    /// unavailable.
    fn classify_open(index: i32, cause: io::Error) -> Error {
        match cause.raw_os_error() {
            Some(libc::EPERM) | Some(libc::EACCES) => Error::PermissionDenied {
                interface: format!("index {}", index),
                cause,
            },
            _ => Error::TransmitUnavailable { index, cause },
        }
    }

    impl Link for AfPacketLink {
        fn send(&mut self, frame: &[u8]) -> Result<(), Error> {
            let index = self.socket.ifindex();
            let sent = self
                .socket
                .send(frame)
                .map_err(|cause| Error::SendFailed { index, cause })?;
            if sent != frame.len() {
                return Err(Error::SendFailed {
                    index,
                    cause: io::Error::new(
                        io::ErrorKind::WriteZero,
                        format!("sent {} of {} bytes", sent, frame.len()),
                    ),
                });
            }
            Ok(())
        }
    }

}
