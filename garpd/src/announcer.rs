use crate::frame;
use crate::{AnnounceConfig, Clock, Error, Link, Resolver, Transmitter};
use std::convert::Infallible;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Not started yet, or still resolving the interface and opening the link.
    Idle,
    /// The link is open and announcements are going out.
    Running,
    /// An error stopped the loop. Any open link has been released.
    Terminated,
}

/// Resolves the interface once, then broadcasts a gratuitous ARP every interval until something
/// fails.
pub struct Announcer<R, T, C> {
    config: AnnounceConfig,
    resolver: R,
    transmitter: T,
    clock: C,
    state: State,
    sent: u64,
}

impl<R, T, C> Announcer<R, T, C>
where
    R: Resolver,
    T: Transmitter,
    C: Clock,
{
    pub fn new(config: AnnounceConfig, resolver: R, transmitter: T, clock: C) -> Self {
        Announcer {
            config,
            resolver,
            transmitter,
            clock,
            state: State::Idle,
            sent: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Number of frames sent so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Announces forever. Only returns on failure, after the link has been released.
    pub fn run(&mut self) -> Result<Infallible, Error> {
        let result = self.announce();
        self.state = State::Terminated;
        result
    }

    fn announce(&mut self) -> Result<Infallible, Error> {
        let iface = self.resolver.resolve(self.config.interface())?;
        info!(
            interface = self.config.interface(),
            index = iface.index,
            mac = %iface.mac,
            "resolved interface"
        );

        // The link lives on this frame only, so every exit below releases it.
        let mut link = self.transmitter.open(iface.index)?;
        self.state = State::Running;
        info!(
            target_addr = %self.config.target(),
            interval = ?self.config.interval(),
            "announcing"
        );

        loop {
            let frame = if self.config.pad() {
                frame::build_padded(&iface, self.config.target())
            } else {
                frame::build(&iface, self.config.target())
            };
            link.send(&frame)?;
            self.sent += 1;
            debug!(sequence = self.sent, len = frame.len(), "sent gratuitous ARP");

            self.clock.sleep(self.config.interval());
        }
    }
}
