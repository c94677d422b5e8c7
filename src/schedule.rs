use chrono::{DateTime, TimeDelta, TimeZone};

/// A cancellable repeating task driven by whatever "now" the caller supplies.
///
/// The task does not run anything itself; the owner polls it and performs the
/// work when [`PeriodicTask::poll`] reports it due. Missed periods collapse
/// into a single firing.
#[derive(Debug, Clone)]
pub struct PeriodicTask<Tz: TimeZone> {
    name: &'static str,
    period: TimeDelta,
    next_due: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> PeriodicTask<Tz> {
    pub fn new(name: &'static str, period: TimeDelta) -> Self {
        Self {
            name,
            period,
            next_due: None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<&DateTime<Tz>> {
        self.next_due.as_ref()
    }

    /// Arms the task so it first fires one period after `now`.
    /// Restarting an armed task replaces its schedule.
    pub fn start(&mut self, now: &DateTime<Tz>) {
        self.next_due = Some(now.clone() + self.period);
        log::debug!("{} scheduled every {}ms", self.name, self.period.num_milliseconds());
    }

    pub fn cancel(&mut self) {
        if self.next_due.take().is_some() {
            log::debug!("{} cancelled", self.name);
        }
    }

    /// True when the task should fire at `now`; the next firing is then set
    /// one period after `now`. A clock that jumped backwards by more than a
    /// period also fires, so the task cannot stall.
    pub fn poll(&mut self, now: &DateTime<Tz>) -> bool {
        let Some(due) = self.next_due.as_ref() else {
            return false;
        };

        let lead = due.clone().signed_duration_since(now.clone());
        if lead > TimeDelta::zero() && lead <= self.period {
            return false;
        }

        self.next_due = Some(now.clone() + self.period);
        true
    }
}
