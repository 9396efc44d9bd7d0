use chrono::{Datelike, Local, NaiveDate};

/// Source of the current calendar date.
///
/// Scoring code takes a `&dyn Clock` instead of reading the system time so a
/// diagnosis can be replayed, or tested, for any date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Current month, `1..=12`.
    fn month(&self) -> u32 {
        self.today().month()
    }
}

/// Wall clock in the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Pin to the first day of `month` in `year`. Returns `None` for an
    /// invalid month.
    pub fn for_month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::new)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}
