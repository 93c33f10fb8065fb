//! Per-side thinking time.
//!
//! The host owns the timing loop: it starts the clock for the side on move and
//! calls [`TurnClock::tick`] whenever it likes. Whole seconds are credited to
//! the running side; the sub-second remainder carries over to the next tick.

use std::time::Duration;

use web_time::Instant;

use crate::types::Side;

#[derive(Debug, Default)]
pub struct TurnClock {
    seconds: [u64; 2],
    running: Option<Side>,
    /// Start of the interval not yet credited.
    since: Option<Instant>,
}

impl TurnClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts timing `side`, crediting the previous side first.
    pub fn start(&mut self, side: Side) {
        self.tick();
        self.running = Some(side);
        self.since = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        self.tick();
        self.running = None;
        self.since = None;
    }

    pub fn running(&self) -> Option<Side> {
        self.running
    }

    /// Credits elapsed whole seconds to the running side.
    pub fn tick(&mut self) {
        if let Some(since) = self.since {
            let consumed = self.credit(since.elapsed());
            self.since = Some(since + consumed);
        }
    }

    pub fn seconds_elapsed(&self, side: Side) -> u64 {
        self.seconds[side.index()]
    }

    pub fn set_seconds_elapsed(&mut self, side: Side, seconds: u64) {
        self.seconds[side.index()] = seconds;
    }

    /// Adds the whole seconds of `elapsed` and returns the part consumed.
    fn credit(&mut self, elapsed: Duration) -> Duration {
        let Some(side) = self.running else {
            return Duration::ZERO;
        };
        let whole = elapsed.as_secs();
        self.seconds[side.index()] += whole;
        Duration::from_secs(whole)
    }
}
