use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::shared::errors::{AppError, AppResult};

/// Closed time interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if start > end {
            return Err(AppError::InvalidArgument(format!(
                "Window start {} is after its end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    /// Half-year containing `now` in `tz`: January 1 through June 30 when
    /// the month is in the first half, July 1 through December 31 otherwise.
    /// The end is the last nanosecond before the next half starts.
    pub fn half_year_containing(now: DateTime<Utc>, tz: Tz) -> AppResult<Self> {
        let local = now.with_timezone(&tz);
        let year = local.year();

        let (start, next) = if local.month0() < 6 {
            (local_midnight(tz, year, 1)?, local_midnight(tz, year, 7)?)
        } else {
            (local_midnight(tz, year, 7)?, local_midnight(tz, year + 1, 1)?)
        };

        Self::new(start, next - Duration::nanoseconds(1))
    }
}

/// First instant of the first day of `month` in `tz`
fn local_midnight(tz: Tz, year: i32, month: u32) -> AppResult<DateTime<Utc>> {
    let naive = NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            AppError::InternalError(format!("Invalid calendar date {}-{}-01", year, month))
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            AppError::InternalError(format!("{} does not exist in {}", naive, tz.name()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_first_half_window() {
        let window = TimeWindow::half_year_containing(utc(2024, 3, 15, 12, 0, 0), Tz::UTC).unwrap();
        assert_eq!(window.start, utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(window.end, utc(2024, 7, 1, 0, 0, 0) - Duration::nanoseconds(1));
    }

    #[test]
    fn test_second_half_window() {
        let window = TimeWindow::half_year_containing(utc(2024, 7, 1, 0, 0, 0), Tz::UTC).unwrap();
        assert_eq!(window.start, utc(2024, 7, 1, 0, 0, 0));
        assert_eq!(window.end, utc(2025, 1, 1, 0, 0, 0) - Duration::nanoseconds(1));
    }

    #[test]
    fn test_last_second_of_june_is_in_first_half() {
        let window = TimeWindow::half_year_containing(utc(2024, 2, 1, 0, 0, 0), Tz::UTC).unwrap();
        let half_past = utc(2024, 6, 30, 23, 59, 59) + Duration::milliseconds(500);

        assert!(window.contains(half_past));
        assert!(!window.contains(utc(2024, 7, 1, 0, 0, 0)));
    }

    #[test]
    fn test_window_follows_catalog_timezone() {
        // 2024-06-30T20:00Z is already July 1st in Jakarta (UTC+7)
        let window = TimeWindow::half_year_containing(
            utc(2024, 6, 30, 20, 0, 0),
            chrono_tz::Asia::Jakarta,
        )
        .unwrap();
        assert_eq!(window.start, utc(2024, 6, 30, 17, 0, 0));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let window =
            TimeWindow::new(utc(2024, 1, 1, 0, 0, 0), utc(2024, 6, 30, 23, 59, 59)).unwrap();
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(utc(2024, 7, 1, 0, 0, 0)));
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        assert!(TimeWindow::new(utc(2024, 2, 1, 0, 0, 0), utc(2024, 1, 1, 0, 0, 0)).is_err());
    }
}
