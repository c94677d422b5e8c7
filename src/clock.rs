use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone};

/// Source of "now" for the controller
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock<Tz: TimeZone> {
    now: Arc<Mutex<DateTime<Tz>>>,
}

impl<Tz: TimeZone> ManualClock<Tz> {
    pub fn new(start: DateTime<Tz>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, time: DateTime<Tz>) {
        *self.lock() = time;
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.lock();
        *now = now.clone() + by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Tz>> {
        // A poisoned lock still holds a valid timestamp
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<Tz: TimeZone> Clock for ManualClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.lock().clone()
    }
}
