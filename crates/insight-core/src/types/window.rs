//! Analysis time windows.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::Timeframe;
use crate::error::DataError;

/// Trailing window used when no date bounds are given: one month of hourly bars.
pub const DEFAULT_TRAILING_DAYS: i64 = 30;

/// Window requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl AnalysisWindow {
    /// Window with optional inclusive date bounds.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Trailing default window.
    pub fn trailing() -> Self {
        Self::default()
    }

    /// Reject bounds that cannot select any bars as of `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), DataError> {
        for (bound, date) in [("start", self.start), ("end", self.end)] {
            if let Some(date) = date.filter(|d| *d > today) {
                return Err(DataError::InvalidWindow(format!(
                    "{} date {} is in the future",
                    bound, date
                )));
            }
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => Err(DataError::InvalidWindow(format!(
                "start date {} is after end date {}",
                start, end
            ))),
            _ => Ok(()),
        }
    }

    /// Resolve the window into concrete fetch parameters at time `now`.
    ///
    /// Without bounds this is the trailing month at hourly resolution. With
    /// bounds, a missing end means `now`, a missing start means one month
    /// before the end, the end date is inclusive, and the interval is the
    /// finest one the provider serves for that span.
    pub fn resolve(&self, now: DateTime<Utc>) -> FetchWindow {
        if self.start.is_none() && self.end.is_none() {
            return FetchWindow::Trailing {
                days: DEFAULT_TRAILING_DAYS,
                timeframe: Timeframe::Hour1,
            };
        }

        let end = self
            .end
            .map(|d| (d + Duration::days(1)).and_time(NaiveTime::MIN).and_utc())
            .map_or(now, |end| end.min(now));
        let start = self
            .start
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
            .unwrap_or(end - Duration::days(DEFAULT_TRAILING_DAYS))
            .min(end);

        FetchWindow::Range {
            start,
            end,
            timeframe: Timeframe::for_span(now - start),
        }
    }
}

/// Concrete parameters handed to a market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchWindow {
    /// The most recent `days` days.
    Trailing { days: i64, timeframe: Timeframe },
    /// An explicit time range.
    Range {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        timeframe: Timeframe,
    },
}

impl FetchWindow {
    /// Bar interval to request.
    pub fn timeframe(&self) -> Timeframe {
        match self {
            FetchWindow::Trailing { timeframe, .. } | FetchWindow::Range { timeframe, .. } => {
                *timeframe
            }
        }
    }

    /// Whether a bar timestamp (Unix ms) falls inside the window at time `now`.
    pub fn contains(&self, timestamp_ms: i64, now: DateTime<Utc>) -> bool {
        let (start, end) = match self {
            FetchWindow::Trailing { days, .. } => (now - Duration::days(*days), now),
            FetchWindow::Range { start, end, .. } => (*start, *end),
        };
        timestamp_ms >= start.timestamp_millis() && timestamp_ms <= end.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_no_bounds_is_trailing_month() {
        let window = AnalysisWindow::trailing().resolve(now());
        assert_eq!(
            window,
            FetchWindow::Trailing {
                days: 30,
                timeframe: Timeframe::Hour1
            }
        );
    }

    #[test]
    fn test_bounds_are_honored() {
        let window = AnalysisWindow::new(NaiveDate::from_ymd_opt(2025, 2, 1), NaiveDate::from_ymd_opt(2025, 2, 10))
            .resolve(now());

        match window {
            FetchWindow::Range { start, end, timeframe } => {
                assert_eq!(start, Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
                // End date is inclusive
                assert_eq!(end, Utc.with_ymd_and_hms(2025, 2, 11, 0, 0, 0).unwrap());
                assert_eq!(timeframe, Timeframe::Hour1);
            }
            other => panic!("unexpected window {:?}", other),
        }
    }

    #[test]
    fn test_long_range_falls_back_to_daily() {
        let window = AnalysisWindow::new(NaiveDate::from_ymd_opt(2021, 1, 1), None).resolve(now());
        assert_eq!(window.timeframe(), Timeframe::Daily);
    }

    #[test]
    fn test_end_clamped_to_now() {
        // An end of today reaches past `now` once made inclusive
        let window = AnalysisWindow::new(None, Some(now().date_naive())).resolve(now());
        match window {
            FetchWindow::Range { start, end, .. } => {
                assert_eq!(end, now());
                assert_eq!(start, now() - Duration::days(30));
            }
            other => panic!("unexpected window {:?}", other),
        }
    }

    #[test]
    fn test_validate() {
        let day = |d| NaiveDate::from_ymd_opt(2025, 3, d);
        let today = now().date_naive();

        assert!(AnalysisWindow::trailing().validate(today).is_ok());
        assert!(AnalysisWindow::new(day(1), day(1)).validate(today).is_ok());

        let err = AnalysisWindow::new(day(1), NaiveDate::from_ymd_opt(2025, 2, 1))
            .validate(today)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid date range: start date 2025-03-01 is after end date 2025-02-01"
        );

        let err = AnalysisWindow::new(day(5), None).validate(today).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid date range: start date 2025-03-05 is in the future"
        );
        assert!(matches!(
            AnalysisWindow::new(None, day(2)).validate(today),
            Err(DataError::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_contains() {
        let window = FetchWindow::Trailing {
            days: 1,
            timeframe: Timeframe::Hour1,
        };
        let inside = (now() - Duration::hours(2)).timestamp_millis();
        let outside = (now() - Duration::days(2)).timestamp_millis();
        assert!(window.contains(inside, now()));
        assert!(!window.contains(outside, now()));
    }
}
