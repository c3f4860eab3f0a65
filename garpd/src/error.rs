use failure::Fail;
use std::io;

/// Everything that can stop an announcement. None of these are retried; each one names a
/// precondition the operator has to fix.
#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "invalid configuration: {}", _0)]
    Configuration(String),

    #[fail(display = "unable to find interface named {}", name)]
    InterfaceNotFound { name: String },

    #[fail(display = "interface {} has no Ethernet hardware address", name)]
    InterfaceHasNoHardwareAddress { name: String },

    #[fail(display = "permission denied on interface {}: {}", interface, cause)]
    PermissionDenied {
        interface: String,
        #[fail(cause)]
        cause: io::Error,
    },

    #[fail(
        display = "unable to open link-layer socket on interface index {}: {}",
        index, cause
    )]
    TransmitUnavailable {
        index: i32,
        #[fail(cause)]
        cause: io::Error,
    },

    #[fail(display = "unable to send on interface index {}: {}", index, cause)]
    SendFailed {
        index: i32,
        #[fail(cause)]
        cause: io::Error,
    },
}

impl Error {
    /// Process exit status for this kind of failure. Each kind gets its own non-zero code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Configuration(_) => 1,
            Error::InterfaceNotFound { .. } => 2,
            Error::InterfaceHasNoHardwareAddress { .. } => 3,
            Error::PermissionDenied { .. } => 4,
            Error::TransmitUnavailable { .. } => 5,
            Error::SendFailed { .. } => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn every_kind() -> Vec<Error> {
        let os = || io::Error::from_raw_os_error(1);
        vec![
            Error::Configuration("bad".into()),
            Error::InterfaceNotFound { name: "eth9".into() },
            Error::InterfaceHasNoHardwareAddress { name: "lo".into() },
            Error::PermissionDenied {
                interface: "eth0".into(),
                cause: os(),
            },
            Error::TransmitUnavailable {
                index: 2,
                cause: os(),
            },
            Error::SendFailed {
                index: 2,
                cause: os(),
            },
        ]
    }

    #[test]
    fn exit_codes_are_distinct_and_nonzero() {
        let codes: HashSet<i32> = every_kind().iter().map(Error::exit_code).collect();
        assert_eq!(codes.len(), 6);
        assert!(!codes.contains(&0));
    }

    #[test]
    fn messages_name_the_parameter() {
        let err = Error::InterfaceNotFound {
            name: "eth9".into(),
        };
        assert_eq!(err.to_string(), "unable to find interface named eth9");

        let err = Error::SendFailed {
            index: 3,
            cause: io::Error::new(io::ErrorKind::Other, "network is down"),
        };
        assert_eq!(
            err.to_string(),
            "unable to send on interface index 3: network is down"
        );
        assert!(err.cause().is_some());
    }
}
