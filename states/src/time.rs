use chrono::{DateTime, Utc};

use crate::State;

/// Wall-clock time as seen by the UI.
///
/// The app refreshes it once per frame; tests set it explicitly so anything that
/// expires (toasts) stays deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    virt: DateTime<Utc>,
}

impl State for Time {}

impl Time {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { virt: now }
    }

    pub fn set(&mut self, now: DateTime<Utc>) {
        self.virt = now;
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.virt
    }
}

impl AsMut<DateTime<Utc>> for Time {
    fn as_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.virt
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.virt
    }
}
