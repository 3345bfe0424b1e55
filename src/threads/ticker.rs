//! Fixed-period tick scheduling without catch-up

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps to the next period boundary.
///
/// Boundaries are anchored to the creation time, so work duration does not
/// accumulate as drift. If the work overran one or more whole periods, those
/// ticks are dropped and the schedule realigns to the next boundary; a late
/// tick never triggers a burst of make-up iterations.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    /// Deadline of the upcoming tick
    next: Instant,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    fn starting_at(period: Duration, start: Instant) -> Self {
        Self {
            period,
            next: start + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next tick. Returns the number of ticks skipped.
    pub fn wait(&mut self) -> u64 {
        let (sleep, skipped) = self.schedule(Instant::now());
        if skipped > 0 {
            log::trace!("Tick overran, skipped {} tick(s)", skipped);
        }
        if !sleep.is_zero() {
            thread::sleep(sleep);
        }
        skipped
    }

    /// How long to sleep before the tick due at `next`, and how many whole
    /// periods were missed.
    ///
    /// When `now` is already past the deadline the tick runs immediately and
    /// `next` jumps to the first boundary after `now`.
    fn schedule(&mut self, now: Instant) -> (Duration, u64) {
        if now < self.next {
            let sleep = self.next - now;
            self.next += self.period;
            return (sleep, 0);
        }

        let period_ns = self.period.as_nanos().max(1);
        let late_ns = (now - self.next).as_nanos();
        let skipped = (late_ns / period_ns) as u64;
        let into_period = Duration::from_nanos((late_ns % period_ns) as u64);

        self.next = now - into_period + self.period;
        (Duration::ZERO, skipped)
    }
}
