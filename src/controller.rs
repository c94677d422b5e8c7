use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{DateTime, TimeDelta, TimeZone};

use crate::{
    clock::Clock,
    dial::{fraction_of_circle, hour_angle, DEGREES_PER_HOUR},
    schedule::PeriodicTask,
    session::{FastingSession, SessionError, TickOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    /// How often the session recomputes its progress
    pub tick_period: TimeDelta,
    /// How often the hour hand is resampled
    pub sample_period: TimeDelta,
    pub clear_arc_on_completion: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            tick_period: TimeDelta::seconds(1),
            sample_period: TimeDelta::seconds(1),
            clear_arc_on_completion: false,
        }
    }
}

/// Last sampled wall-clock time; only drives the hour hand
#[derive(Debug, Clone)]
pub struct WallClockSample<Tz: TimeZone> {
    pub at: DateTime<Tz>,
    pub hour_angle: f64,
}

impl<Tz: TimeZone> WallClockSample<Tz> {
    pub fn new(at: DateTime<Tz>) -> Self {
        Self {
            hour_angle: hour_angle(&at),
            at,
        }
    }
}

/// Everything the view needs to draw one frame
#[derive(Debug, Clone)]
pub struct FastSnapshot<Tz: TimeZone> {
    pub is_active: bool,
    pub duration_hours: u32,
    pub end_time: Option<DateTime<Tz>>,
    pub start_angle: f64,
    pub elapsed_fraction: f64,
    /// Seconds left as of the last session tick
    pub remaining_secs: i64,
    pub clock: WallClockSample<Tz>,
}

impl<Tz: TimeZone> FastSnapshot<Tz> {
    /// Degrees of dial covered by the progress arc: the elapsed share of the
    /// fast, measured in dial hours.
    pub fn arc_sweep_degrees(&self) -> f64 {
        (self.elapsed_fraction * f64::from(self.duration_hours) * DEGREES_PER_HOUR).min(360.0)
    }

    /// The arc as a `(from, to)` trim of the dial outline, in fractions of a
    /// full turn starting at the hour the fast began
    pub fn arc_trim(&self) -> (f64, f64) {
        let from = fraction_of_circle(self.start_angle);
        (from, from + fraction_of_circle(self.arc_sweep_degrees()))
    }

    pub fn has_progress(&self) -> bool {
        self.elapsed_fraction > 0.0
    }

    /// Completed naturally and the arc was kept
    pub fn is_complete(&self) -> bool {
        !self.is_active && self.elapsed_fraction >= 1.0
    }
}

/// Owns the fasting session and the two periodic tasks that drive it.
///
/// Nothing runs in the background: the event loop calls [`FastController::poll`]
/// and the controller fires whichever task is due against its [`Clock`].
pub struct FastController<C: Clock> {
    clock: C,
    session: FastingSession<C::Tz>,
    wall: WallClockSample<C::Tz>,
    sampler: PeriodicTask<C::Tz>,
    ticker: PeriodicTask<C::Tz>,
    subscribers: Vec<Sender<FastSnapshot<C::Tz>>>,
}

impl<C: Clock> FastController<C> {
    pub fn new(clock: C, settings: ControllerSettings) -> Self {
        let wall = WallClockSample::new(clock.now());
        Self {
            clock,
            session: FastingSession::new(settings.clear_arc_on_completion),
            wall,
            sampler: PeriodicTask::new("clock sampler", settings.sample_period),
            ticker: PeriodicTask::new("session tick", settings.tick_period),
            subscribers: Vec::new(),
        }
    }

    pub fn session(&self) -> &FastingSession<C::Tz> {
        &self.session
    }

    pub fn is_sampling(&self) -> bool {
        self.sampler.is_scheduled()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_scheduled()
    }

    /// Starts sampling the wall clock for the lifetime of the view
    pub fn attach(&mut self) {
        let now = self.clock.now();
        self.wall = WallClockSample::new(now.clone());
        self.sampler.start(&now);
        self.publish();
    }

    pub fn detach(&mut self) {
        self.sampler.cancel();
    }

    pub fn start(&mut self, duration_hours: u32) -> Result<(), SessionError> {
        let now = self.clock.now();
        self.session.start(duration_hours, now.clone())?;
        self.ticker.start(&now);
        self.wall = WallClockSample::new(now);
        self.publish();
        Ok(())
    }

    /// Ends the fast early. Returns false if no fast was running.
    pub fn stop(&mut self) -> bool {
        if !self.session.stop() {
            return false;
        }
        self.ticker.cancel();
        self.publish();
        true
    }

    /// Start/end button behaviour. Returns whether a fast is running afterwards.
    pub fn toggle(&mut self, duration_hours: u32) -> Result<bool, SessionError> {
        if self.session.is_active {
            self.stop();
            Ok(false)
        } else {
            self.start(duration_hours)?;
            Ok(true)
        }
    }

    /// Fires due tasks, clock sampler first. Returns true if a snapshot was published.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let mut changed = false;

        if self.sampler.poll(&now) {
            self.wall = WallClockSample::new(now.clone());
            changed = true;
        }

        if self.ticker.poll(&now) {
            match self.session.tick(&now) {
                TickOutcome::Progress(_) => changed = true,
                TickOutcome::Completed => {
                    self.ticker.cancel();
                    changed = true;
                }
                TickOutcome::Idle => self.ticker.cancel(),
            }
        }

        if changed {
            self.publish();
        }
        changed
    }

    pub fn shutdown(&mut self) {
        self.sampler.cancel();
        self.ticker.cancel();
    }

    pub fn snapshot(&self) -> FastSnapshot<C::Tz> {
        FastSnapshot {
            is_active: self.session.is_active,
            duration_hours: self.session.duration_hours,
            end_time: self.session.end_time.clone(),
            start_angle: self.session.start_angle,
            elapsed_fraction: self.session.elapsed_fraction,
            remaining_secs: self.session.remaining_secs,
            clock: self.wall.clone(),
        }
    }

    /// Observe state changes. The receiver gets the current snapshot right away.
    pub fn subscribe(&mut self) -> Receiver<FastSnapshot<C::Tz>> {
        let (tx, rx) = mpsc::channel();
        if tx.send(self.snapshot()).is_ok() {
            self.subscribers.push(tx);
        }
        rx
    }

    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}
