use log::debug;

use crate::clock::{MonotonicClock, SimulationClock};
use crate::game::{GameSession, Snapshot, TickOutcome};
use crate::input::GestureDelta;

/// Display-synchronised callback source driving the frame loop.
///
/// Every frame the host fires corresponds to one earlier `schedule_next`.
pub trait FrameScheduler {
    type Handle;

    /// Requests one more frame callback.
    fn schedule_next(&mut self) -> Self::Handle;

    /// Withdraws a request that has not fired yet.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Binds a session to its pacing clock and frame scheduler.
///
/// At most one frame request is outstanding. It is not renewed once the
/// session is over, and it is cancelled when the loop is dropped.
pub struct FrameLoop<C: MonotonicClock, S: FrameScheduler> {
    session: GameSession,
    clock: SimulationClock,
    time: C,
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<C: MonotonicClock, S: FrameScheduler> FrameLoop<C, S> {
    /// Wraps `session` and requests the first frame.
    pub fn start(session: GameSession, mut clock: SimulationClock, time: C, scheduler: S) -> Self {
        clock.reset(time.now());
        let mut frame_loop = Self {
            session,
            clock,
            time,
            scheduler,
            pending: None,
        };
        frame_loop.ensure_scheduled();
        frame_loop
    }

    /// Frame callback: runs a tick when one is due, then re-arms unless the
    /// session just ended.
    pub fn on_frame(&mut self) -> Option<TickOutcome> {
        self.pending = None;
        let outcome = self.tick();
        self.ensure_scheduled();
        outcome
    }

    /// Advances the session if a tick is due; no-op when over or not due.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.session.is_over() {
            return None;
        }
        if !self.clock.poll(self.time.now()) {
            return None;
        }

        let outcome = self.session.tick();
        if self.session.is_over() {
            self.cancel_pending();
        }
        Some(outcome)
    }

    pub fn set_direction(&mut self, gesture: GestureDelta) -> bool {
        self.session.set_direction(gesture)
    }

    /// Starts a fresh session and resumes frame requests.
    pub fn restart(&mut self) {
        self.session.restart();
        self.clock.reset(self.time.now());
        self.ensure_scheduled();
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    fn ensure_scheduled(&mut self) {
        if self.pending.is_none() && !self.session.is_over() {
            self.pending = Some(self.scheduler.schedule_next());
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<C: MonotonicClock, S: FrameScheduler> Drop for FrameLoop<C, S> {
    fn drop(&mut self) {
        if self.pending.is_some() {
            debug!("frame loop dropped, cancelling pending frame");
        }
        self.cancel_pending();
    }
}
