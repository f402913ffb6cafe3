use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of "now" for the ledger.
///
/// `now` carries the user's UTC offset so that `today` is the local calendar
/// day. Deriving the day from UTC fields shifts late-evening expenses into
/// the wrong day in positive-offset zones.
pub trait Clock {
    /// Current instant in the user's local offset.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Current local calendar day.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Milliseconds since the Unix epoch.
    fn timestamp_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall clock in the system (or browser) time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock that only moves when told to. Used for deterministic tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Parse an RFC 3339 timestamp such as `2026-04-01T00:30:00+08:00`.
    pub fn at(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(rfc3339).map(Self::new)
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn utc_now(&self) -> DateTime<Utc> {
        self.now.get().with_timezone(&Utc)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}

/// Lets a test keep a handle on the clock it gave away.
impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}
