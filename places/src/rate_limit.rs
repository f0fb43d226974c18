use chrono::{DateTime, Duration, Utc};

use crate::error::PlacesError;

/// Shortest accepted refill period. Shorter ones are raised to this.
pub const MIN_PERIOD_MS: i64 = 1;

/// Token bucket that refills completely once per period.
///
/// Every outbound call to the Google web services takes one token. When the
/// bucket is empty, calls are refused until the current period ends.
#[derive(Debug, Clone)]
pub struct RequestBudget {
    capacity: u32,
    period: Duration,
    used: u32,
    window_start: DateTime<Utc>,
}

impl RequestBudget {
    pub fn new(capacity: u32, period: Duration, now: DateTime<Utc>) -> Self {
        Self {
            capacity,
            period: period.max(Duration::milliseconds(MIN_PERIOD_MS)),
            used: 0,
            window_start: now,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn remaining(&mut self, now: DateTime<Utc>) -> u32 {
        self.refill(now);
        self.capacity - self.used
    }

    pub fn resets_at(&self) -> DateTime<Utc> {
        self.window_start + self.period
    }

    /// Takes one token, returning how many calls have been made in the current period.
    pub fn try_acquire(&mut self, now: DateTime<Utc>) -> Result<u32, PlacesError> {
        self.refill(now);
        if self.used >= self.capacity {
            return Err(PlacesError::BudgetExhausted {
                capacity: self.capacity,
                resets_at: self.resets_at(),
            });
        }
        self.used += 1;
        Ok(self.used)
    }

    fn refill(&mut self, now: DateTime<Utc>) {
        let elapsed = now - self.window_start;
        if elapsed < self.period {
            return;
        }
        // Keep windows aligned to the first one even after a long idle stretch.
        let periods = elapsed.num_milliseconds() / self.period.num_milliseconds();
        self.window_start += Duration::milliseconds(periods * self.period.num_milliseconds());
        self.used = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn refuses_the_call_after_capacity() {
        let now = start();
        let mut budget = RequestBudget::new(50, Duration::hours(24), now);
        for expected in 1..=50 {
            assert_eq!(budget.try_acquire(now).unwrap(), expected);
        }
        let err = budget.try_acquire(now).unwrap_err();
        match err {
            PlacesError::BudgetExhausted {
                capacity,
                resets_at,
            } => {
                assert_eq!(capacity, 50);
                assert_eq!(resets_at, now + Duration::hours(24));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(budget.used(), 50);
        assert_eq!(budget.remaining(now), 0);
    }

    #[test]
    fn refills_once_the_period_has_passed() {
        let now = start();
        let mut budget = RequestBudget::new(2, Duration::hours(24), now);
        budget.try_acquire(now).unwrap();
        budget.try_acquire(now).unwrap();

        let almost = now + Duration::hours(23) + Duration::minutes(59);
        assert!(budget.try_acquire(almost).is_err());

        let next_day = now + Duration::hours(24);
        assert_eq!(budget.try_acquire(next_day).unwrap(), 1);
        assert_eq!(budget.remaining(next_day), 1);
    }

    #[test]
    fn windows_stay_aligned_after_idle_periods() {
        let now = start();
        let mut budget = RequestBudget::new(1, Duration::hours(24), now);
        budget.try_acquire(now).unwrap();

        let later = now + Duration::hours(24 * 3 + 5);
        budget.try_acquire(later).unwrap();
        assert_eq!(budget.resets_at(), now + Duration::hours(24 * 4));
    }

    #[test]
    fn sub_millisecond_periods_are_raised_to_the_minimum() {
        let now = start();
        let mut budget = RequestBudget::new(1, Duration::microseconds(500), now);
        assert_eq!(budget.resets_at(), now + Duration::milliseconds(MIN_PERIOD_MS));

        budget.try_acquire(now).unwrap();
        assert!(budget.try_acquire(now).is_err());
        assert_eq!(budget.try_acquire(now + Duration::milliseconds(5)).unwrap(), 1);

        let mut zero = RequestBudget::new(1, Duration::zero(), now);
        zero.try_acquire(now).unwrap();
        assert_eq!(zero.try_acquire(now + Duration::milliseconds(1)).unwrap(), 1);
    }
}
