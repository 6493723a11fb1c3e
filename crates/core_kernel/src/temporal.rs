//! Cover period handling
//!
//! A [`CoverPeriod`] is a bounded, half-open span of time `[start, end)`.
//! Calendar dates map to midnight UTC so whole-day periods measure an
//! exact number of days; timestamps are accepted for custom periods that
//! need sub-day precision.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SECONDS_PER_DAY: i64 = 86_400;
const NANOSECOND_SCALE: u32 = 9;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must be before end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Gap in temporal sequence: {previous_end} is followed by {next_start}")]
    GapInSequence {
        previous_end: String,
        next_start: String,
    },

    #[error("Periods overlap: {previous_end} is followed by {next_start}")]
    PeriodsOverlap {
        previous_end: String,
        next_start: String,
    },
}

/// Length of `duration` in seconds, down to the nanosecond
fn exact_seconds(duration: Duration) -> Decimal {
    let whole = duration.num_seconds();
    let nanos = (duration - Duration::seconds(whole)).num_nanoseconds().unwrap_or(0);
    if nanos == 0 {
        Decimal::from(whole)
    } else {
        Decimal::from(whole) + Decimal::new(nanos, NANOSECOND_SCALE)
    }
}

/// Converts a calendar date to the instant it starts, in UTC
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// A half-open period of cover, `[start, end)`
///
/// Invariant: `start < end`. Deserialization enforces the same rule as
/// [`CoverPeriod::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CoverPeriodRecord")]
pub struct CoverPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct CoverPeriodRecord {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<CoverPeriodRecord> for CoverPeriod {
    type Error = TemporalError;

    fn try_from(record: CoverPeriodRecord) -> Result<Self, Self::Error> {
        CoverPeriod::new(record.start, record.end)
    }
}

impl CoverPeriod {
    /// Creates a period from two instants
    ///
    /// # Errors
    ///
    /// Returns `TemporalError::InvalidPeriod` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TemporalError> {
        if start >= end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a period covering `start` up to but excluding `end`
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start >= end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start: start_of_day_utc(start),
            end: start_of_day_utc(end),
        })
    }

    /// Creates a period of `days` whole days starting on `start`
    pub fn days_from(start: NaiveDate, days: i64) -> Result<Self, TemporalError> {
        Self::from_dates(start, start + Duration::days(days))
    }

    /// Start of the period (inclusive)
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the period (exclusive)
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length of the period in seconds, with sub-second precision.
    ///
    /// Always positive, since `start < end`.
    pub fn seconds(&self) -> Decimal {
        exact_seconds(self.duration())
    }

    /// Seconds of the period still to run at `instant`, clamped to
    /// `[0, seconds()]`
    pub fn remaining_seconds(&self, instant: DateTime<Utc>) -> Decimal {
        if instant <= self.start {
            return self.seconds();
        }
        if instant >= self.end {
            return Decimal::ZERO;
        }
        exact_seconds(self.end - instant)
    }

    /// Length of the period in days, fractional for sub-day boundaries
    pub fn days(&self) -> Decimal {
        self.seconds() / Decimal::from(SECONDS_PER_DAY)
    }

    /// Returns true if the instant falls within `[start, end)`
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Returns the share of the period still to run at `instant`
    ///
    /// 1 at or before the start, 0 at or after the end, and the exact
    /// remaining-over-total ratio in between. The ratio is not rounded.
    pub fn remaining_fraction(&self, instant: DateTime<Utc>) -> Decimal {
        self.remaining_seconds(instant) / self.seconds()
    }

    /// Checks that `next` continues this period with neither gap nor overlap
    pub fn ensure_followed_by(&self, next: &CoverPeriod) -> Result<(), TemporalError> {
        if next.start > self.end {
            return Err(TemporalError::GapInSequence {
                previous_end: self.end.to_rfc3339(),
                next_start: next.start.to_rfc3339(),
            });
        }
        if next.start < self.end {
            return Err(TemporalError::PeriodsOverlap {
                previous_end: self.end.to_rfc3339(),
                next_start: next.start.to_rfc3339(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_dates_counts_whole_days() {
        let period = CoverPeriod::from_dates(date(2019, 7, 1), date(2019, 10, 9)).unwrap();
        assert_eq!(period.days(), dec!(100));
    }

    #[test]
    fn test_sub_day_period_has_fractional_days() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
        let period = CoverPeriod::new(start, end).unwrap();
        assert_eq!(period.days(), dec!(0.25));
    }

    #[test]
    fn test_sub_second_period_is_measured_exactly() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let period = CoverPeriod::new(start, start + Duration::milliseconds(500)).unwrap();

        assert_eq!(period.seconds(), dec!(0.5));
        assert!(period.days() > Decimal::ZERO);
        assert_eq!(period.remaining_fraction(start + Duration::milliseconds(125)), dec!(0.75));
    }

    #[test]
    fn test_fractional_second_boundaries_are_not_truncated() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::milliseconds(250);
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 10).unwrap();
        let period = CoverPeriod::new(start, end).unwrap();

        assert_eq!(period.seconds(), dec!(9.75));
        assert_eq!(period.remaining_seconds(end - Duration::nanoseconds(1)), dec!(0.000000001));
    }

    #[test]
    fn test_zero_length_period_is_rejected() {
        let result = CoverPeriod::from_dates(date(2024, 1, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_remaining_fraction() {
        let period = CoverPeriod::days_from(date(2019, 7, 1), 100).unwrap();
        assert_eq!(period.remaining_fraction(start_of_day_utc(date(2019, 6, 1))), Decimal::ONE);
        assert_eq!(period.remaining_fraction(start_of_day_utc(date(2019, 8, 25))), dec!(0.45));
        assert_eq!(period.remaining_fraction(period.end()), Decimal::ZERO);
    }

    #[test]
    fn test_ensure_followed_by() {
        let first = CoverPeriod::days_from(date(2024, 1, 1), 10).unwrap();
        let next = CoverPeriod::days_from(date(2024, 1, 11), 10).unwrap();
        let gap = CoverPeriod::days_from(date(2024, 1, 12), 10).unwrap();
        let overlap = CoverPeriod::days_from(date(2024, 1, 10), 10).unwrap();

        assert!(first.ensure_followed_by(&next).is_ok());
        assert!(matches!(first.ensure_followed_by(&gap), Err(TemporalError::GapInSequence { .. })));
        assert!(matches!(first.ensure_followed_by(&overlap), Err(TemporalError::PeriodsOverlap { .. })));
    }

    #[test]
    fn test_deserialize_rejects_inverted_period() {
        let json = r#"{"start":"2024-02-01T00:00:00Z","end":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<CoverPeriod>(json).is_err());
    }
}
