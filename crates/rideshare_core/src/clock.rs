use chrono::{DateTime, Utc};

/// Source of "now" for newly requested trips.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_time;

    #[test]
    fn fixed_clock_does_not_advance() {
        let clock = FixedClock(test_time("2018-05-25T18:52:40Z"));
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), test_time("2018-05-25T18:52:40Z"));
    }

    #[test]
    fn system_clock_is_monotone_enough() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
