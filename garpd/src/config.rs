use crate::Error;
use std::net::Ipv4Addr;
use std::time::Duration;

/// How often an announcement goes out when no interval is given.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// What to announce, where, and how often. Validated on construction and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnounceConfig {
    interface: String,
    target: Ipv4Addr,
    interval: Duration,
    pad: bool,
}

impl AnnounceConfig {
    pub fn new(
        interface: impl Into<String>,
        target: Ipv4Addr,
        interval: Duration,
    ) -> Result<Self, Error> {
        let interface = interface.into();
        if interface.is_empty() {
            return Err(Error::Configuration(
                "interface name must not be empty".to_string(),
            ));
        }
        if interval == Duration::from_secs(0) {
            return Err(Error::Configuration(
                "interval must be greater than zero".to_string(),
            ));
        }
        Ok(AnnounceConfig {
            interface,
            target,
            interval,
            pad: false,
        })
    }

    /// Builds a config from command-line strings: a dotted-quad address and, optionally, an
    /// interval in whole seconds.
    pub fn parse(
        interface: &str,
        target: &str,
        interval_secs: Option<&str>,
    ) -> Result<Self, Error> {
        let target: Ipv4Addr = target.parse().map_err(|_| {
            Error::Configuration(format!("{:?} is not a dotted-quad IPv4 address", target))
        })?;
        let interval = match interval_secs {
            Some(secs) => secs.parse().map(Duration::from_secs).map_err(|_| {
                Error::Configuration(format!("{:?} is not a whole number of seconds", secs))
            })?,
            None => DEFAULT_INTERVAL,
        };
        AnnounceConfig::new(interface, target, interval)
    }

    /// Pads every frame to the 60-byte Ethernet minimum instead of sending the bare 42 bytes.
    pub fn with_padding(mut self, pad: bool) -> Self {
        self.pad = pad;
        self
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn target(&self) -> Ipv4Addr {
        self.target
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pad(&self) -> bool {
        self.pad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let config = AnnounceConfig::parse("eth0", "192.0.2.10", Some("5")).unwrap();
        assert_eq!(config.interface(), "eth0");
        assert_eq!(config.target(), Ipv4Addr::new(192, 0, 2, 10));
        assert_eq!(config.interval(), Duration::from_secs(5));
        assert!(!config.pad());
        assert!(config.with_padding(true).pad());

        let config = AnnounceConfig::parse("eth0", "192.0.2.10", None).unwrap();
        assert_eq!(config.interval(), DEFAULT_INTERVAL);
    }

    #[test]
    fn reject_bad_addresses() {
        for bad in &["", "192.0.2", "192.0.2.256", "192.0.2.10.1", "host.example", "::1"] {
            match AnnounceConfig::parse("eth0", bad, None) {
                Err(Error::Configuration(_)) => {}
                other => panic!("{:?} parsed as {:?}", bad, other),
            }
        }
    }

    #[test]
    fn reject_bad_intervals() {
        for bad in &["0", "-1", "1.5", "soon"] {
            match AnnounceConfig::parse("eth0", "192.0.2.10", Some(*bad)) {
                Err(Error::Configuration(_)) => {}
                other => panic!("{:?} parsed as {:?}", bad, other),
            }
        }
    }

    #[test]
    fn reject_empty_interface() {
        let err = AnnounceConfig::new("", Ipv4Addr::LOCALHOST, DEFAULT_INTERVAL).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
