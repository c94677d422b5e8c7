use chrono::{DateTime, TimeDelta, TimeZone};
use log::{info, warn};
use thiserror::Error;

use crate::dial::hour_angle;

pub const SECONDS_PER_HOUR: i64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("fasting duration must be at least one hour")]
    ZeroDuration,
    #[error("a fast is already in progress")]
    AlreadyFasting,
}

/// Result of feeding one tick into a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No fast in progress, nothing changed
    Idle,
    Progress(f64),
    /// Remaining time hit zero; the session is now inactive
    Completed,
}

/// Zero or one in-progress fast.
///
/// Explicit `stop` clears the arc fields. Natural completion leaves
/// `elapsed_fraction` at 1 and keeps `start_angle` unless the session was
/// built with `clear_on_completion`.
#[derive(Debug, Clone)]
pub struct FastingSession<Tz: TimeZone> {
    pub is_active: bool,
    pub duration_hours: u32,
    pub end_time: Option<DateTime<Tz>>,
    pub start_angle: f64,
    pub elapsed_fraction: f64,
    /// Countdown as of the last `start` or `tick`
    pub remaining_secs: i64,
    clear_on_completion: bool,
}

impl<Tz: TimeZone> Default for FastingSession<Tz> {
    fn default() -> Self {
        Self {
            is_active: false,
            duration_hours: 0,
            end_time: None,
            start_angle: 0.0,
            elapsed_fraction: 0.0,
            remaining_secs: 0,
            clear_on_completion: false,
        }
    }
}

impl<Tz: TimeZone> FastingSession<Tz> {
    pub fn new(clear_on_completion: bool) -> Self {
        Self {
            clear_on_completion,
            ..Self::default()
        }
    }

    pub fn start(&mut self, duration_hours: u32, now: DateTime<Tz>) -> Result<(), SessionError> {
        if duration_hours == 0 {
            return Err(SessionError::ZeroDuration);
        }
        if self.is_active {
            return Err(SessionError::AlreadyFasting);
        }

        self.start_angle = hour_angle(&now);
        self.end_time = Some(end_time_after(&now, duration_hours));
        self.duration_hours = duration_hours;
        self.elapsed_fraction = 0.0;
        self.remaining_secs = self.remaining_secs_at(&now);
        self.is_active = true;

        info!(
            "fast started: {}h, start angle {:.2}",
            duration_hours, self.start_angle
        );
        Ok(())
    }

    /// Ends the fast early. Returns false when there was nothing to stop.
    pub fn stop(&mut self) -> bool {
        if !self.is_active {
            return false;
        }
        self.reset_progress();
        info!("fast ended early");
        true
    }

    pub fn tick(&mut self, now: &DateTime<Tz>) -> TickOutcome {
        if !self.is_active {
            return TickOutcome::Idle;
        }

        let total_secs = i64::from(self.duration_hours) * SECONDS_PER_HOUR;
        self.remaining_secs = self.remaining_secs_at(now);
        let elapsed_secs = total_secs - self.remaining_secs;

        if self.remaining_secs > 0 {
            self.elapsed_fraction = elapsed_secs as f64 / total_secs as f64;
            log::trace!("fast progress {:.4}", self.elapsed_fraction);
            TickOutcome::Progress(self.elapsed_fraction)
        } else {
            self.elapsed_fraction = 1.0;
            self.is_active = false;
            if self.clear_on_completion {
                self.reset_progress();
            }
            info!("fast completed after {}h", self.duration_hours);
            TickOutcome::Completed
        }
    }

    /// Whole seconds left until `end_time`, never negative
    pub fn remaining_secs_at(&self, now: &DateTime<Tz>) -> i64 {
        self.end_time
            .as_ref()
            .map(|end| end.clone().signed_duration_since(now.clone()).num_seconds())
            .unwrap_or_default()
            .max(0)
    }

    fn reset_progress(&mut self) {
        self.is_active = false;
        self.elapsed_fraction = 0.0;
        self.start_angle = 0.0;
        self.remaining_secs = 0;
    }
}

/// `now + hours`, or `now` itself when the addition cannot be represented.
///
/// The hours are an absolute duration: across a UTC offset change the end
/// instant is still exactly `hours` later, so its wall-clock reading shifts
/// by the offset difference. The fallback makes the fast complete on its
/// next tick.
pub fn end_time_after<Tz: TimeZone>(now: &DateTime<Tz>, hours: u32) -> DateTime<Tz> {
    TimeDelta::try_hours(i64::from(hours))
        .and_then(|delta| now.clone().checked_add_signed(delta))
        .unwrap_or_else(|| {
            warn!("could not add {hours}h to {now:?}; fast will end immediately");
            now.clone()
        })
}
