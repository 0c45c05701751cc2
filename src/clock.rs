use std::time::{Duration, Instant};

/// Monotonic time source consumed by the frame loop.
pub trait MonotonicClock {
    fn now(&self) -> Instant;
}

/// Wall-clock source backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl MonotonicClock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Fixed-timestep pacer.
///
/// Each instance owns its own last-tick timestamp, so independent sessions
/// never share pacing state.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    period: Duration,
    tolerance: Duration,
    last_tick: Instant,
}

impl SimulationClock {
    #[must_use]
    pub fn new(period: Duration, tolerance: Duration, start: Instant) -> Self {
        Self {
            period,
            tolerance,
            last_tick: start,
        }
    }

    /// Returns true when a tick is due at `now` and records it.
    ///
    /// The remainder past a whole period is carried into the next interval,
    /// which keeps the tick rate locked to the period instead of to however
    /// often this is polled.
    pub fn poll(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.last_tick);
        if elapsed + self.tolerance < self.period {
            return false;
        }

        self.last_tick = now - carry_over(elapsed, self.period);
        true
    }

    /// Restarts pacing from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.last_tick = now;
    }
}

// Ticks fired inside the tolerance window (elapsed just under one period)
// carry nothing over.
fn carry_over(elapsed: Duration, period: Duration) -> Duration {
    if elapsed < period || period.is_zero() {
        return Duration::ZERO;
    }
    let remainder = elapsed.as_nanos() % period.as_nanos();
    Duration::from_nanos(u64::try_from(remainder).unwrap_or(u64::MAX))
}
