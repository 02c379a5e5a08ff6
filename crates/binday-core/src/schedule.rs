//! Schedule generation.
//!
//! A [`Schedule`] applies the Nth-weekday rule to every month of a fixed
//! span of years and anchors each resulting date at a wall-clock hour in a
//! named time zone. Resolving the wall-clock time through the tz database is
//! what keeps the timestamps correct across daylight-saving transitions.

use chrono::{DateTime, NaiveDateTime, TimeZone, Weekday};
use chrono_tz::Tz;
use thiserror::Error;

use crate::rule::nth_weekday_with_offset;

/// Errors produced while generating a schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The rule found no matching day in the month.
    #[error("no matching day in {year}-{month:02}")]
    NoMatchingDay { year: i32, month: u32 },

    /// The configured hour does not name a valid time of day.
    #[error("invalid hour of day: {0}")]
    InvalidHour(u32),

    /// The wall-clock time does not exist, or exists twice, in the zone
    /// (daylight-saving gap or fold).
    #[error("local time {0} is not unique in time zone {1}")]
    UnresolvableLocalTime(NaiveDateTime, Tz),
}

/// A fixed monthly recurrence over a span of years.
///
/// One target per month: the `occurrence`-th `weekday`, shifted by
/// `day_offset` days, at `hour`:00 local time in `tz`.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// First year to generate.
    pub start_year: i32,
    /// Number of consecutive years to generate.
    pub years: u32,
    /// Target weekday.
    pub weekday: Weekday,
    /// Which occurrence of the weekday within the month (1-based).
    pub occurrence: u32,
    /// Days added to the matched date (negative steps back).
    pub day_offset: i64,
    /// Local hour of day the event is anchored at.
    pub hour: u32,
    /// Time zone all targets are resolved in.
    pub tz: Tz,
}

impl Schedule {
    /// Resolves the rule for a single month.
    pub fn target_for_month(&self, year: i32, month: u32) -> Result<DateTime<Tz>, ScheduleError> {
        let day = nth_weekday_with_offset(year, month, self.weekday, self.occurrence, self.day_offset)
            .ok_or(ScheduleError::NoMatchingDay { year, month })?;
        let naive = day
            .and_hms_opt(self.hour, 0, 0)
            .ok_or(ScheduleError::InvalidHour(self.hour))?;
        self.tz
            .from_local_datetime(&naive)
            .single()
            .ok_or(ScheduleError::UnresolvableLocalTime(naive, self.tz))
    }

    /// Generates every target in the window, one per month, in
    /// chronological order. The result always holds `years * 12` entries.
    pub fn target_dates(&self) -> Result<Vec<DateTime<Tz>>, ScheduleError> {
        let mut dates = Vec::with_capacity(self.years as usize * 12);
        for year in self.start_year..self.start_year + self.years as i32 {
            for month in 1..=12 {
                dates.push(self.target_for_month(year, month)?);
            }
        }
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Offset, Timelike};
    use chrono_tz::Europe::Paris;

    fn bin_schedule() -> Schedule {
        Schedule {
            start_year: 2023,
            years: 10,
            weekday: Weekday::Thu,
            occurrence: 4,
            day_offset: -1,
            hour: 16,
            tz: Paris,
        }
    }

    #[test]
    fn one_date_per_month_in_order() {
        let dates = bin_schedule().target_dates().unwrap();
        assert_eq!(dates.len(), 120);
        for (i, date) in dates.iter().enumerate() {
            assert_eq!(date.year(), 2023 + (i / 12) as i32);
            assert_eq!(date.month(), (i % 12) as u32 + 1);
        }
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn targets_keep_the_local_hour() {
        let dates = bin_schedule().target_dates().unwrap();
        assert!(dates.iter().all(|d| d.hour() == 16 && d.minute() == 0));
    }

    #[test]
    fn dst_offsets_are_honored() {
        let schedule = bin_schedule();
        // Paris is UTC+1 in winter, UTC+2 in summer.
        let january = schedule.target_for_month(2024, 1).unwrap();
        assert_eq!(january.offset().fix().local_minus_utc(), 3600);
        let july = schedule.target_for_month(2024, 7).unwrap();
        assert_eq!(july.offset().fix().local_minus_utc(), 7200);
    }

    #[test]
    fn fourth_thursday_minus_one_lands_on_wednesday() {
        let date = bin_schedule().target_for_month(2024, 1).unwrap();
        assert_eq!(date.date_naive(), chrono::NaiveDate::from_ymd_opt(2024, 1, 24).unwrap());
        assert_eq!(date.weekday(), Weekday::Wed);
    }

    #[test]
    fn dst_gap_is_a_defined_error() {
        // 2024-03-31 is the 5th Sunday of March; 02:00 falls in the
        // spring-forward gap in Paris.
        let schedule = Schedule {
            occurrence: 5,
            weekday: Weekday::Sun,
            day_offset: 0,
            hour: 2,
            ..bin_schedule()
        };
        let err = schedule.target_for_month(2024, 3).unwrap_err();
        assert!(matches!(err, ScheduleError::UnresolvableLocalTime(..)));
    }

    #[test]
    fn dst_fold_is_a_defined_error() {
        // 2024-10-27 is the 4th Sunday of October; 02:00 occurs twice.
        let schedule = Schedule {
            weekday: Weekday::Sun,
            day_offset: 0,
            hour: 2,
            ..bin_schedule()
        };
        let err = schedule.target_for_month(2024, 10).unwrap_err();
        assert!(matches!(err, ScheduleError::UnresolvableLocalTime(..)));
    }

    #[test]
    fn missing_occurrence_is_a_defined_error() {
        let schedule = Schedule {
            occurrence: 5,
            ..bin_schedule()
        };
        let err = schedule.target_dates().unwrap_err();
        assert!(matches!(err, ScheduleError::NoMatchingDay { .. }));
    }

    #[test]
    fn invalid_hour_is_a_defined_error() {
        let schedule = Schedule {
            hour: 24,
            ..bin_schedule()
        };
        assert_eq!(
            schedule.target_for_month(2024, 1).unwrap_err(),
            ScheduleError::InvalidHour(24)
        );
    }
}
