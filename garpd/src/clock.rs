use std::thread;
use std::time::Duration;

/// The suspension between two announcements.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
