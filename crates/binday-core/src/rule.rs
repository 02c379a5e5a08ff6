//! The Nth-weekday date rule.
//!
//! Collection day is derived from a simple rule: take the Nth occurrence of
//! a weekday within a month, then shift it by a fixed number of days.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Returns the date of the `occurrence`-th `weekday` of the given month.
///
/// Scans forward from the first day of the month, counting matches. Returns
/// `None` when the month runs out before the requested occurrence is reached
/// (possible for occurrence 5, never for 4 or less), when `occurrence` is
/// zero, or when `year`/`month` do not name a valid month.
pub fn nth_weekday(year: i32, month: u32, weekday: Weekday, occurrence: u32) -> Option<NaiveDate> {
    if occurrence == 0 {
        return None;
    }

    let mut date = NaiveDate::from_ymd_opt(year, month, 1)?;
    let mut seen = 0;
    while date.month() == month {
        if date.weekday() == weekday {
            seen += 1;
            if seen == occurrence {
                return Some(date);
            }
        }
        date = date.succ_opt()?;
    }
    None
}

/// Same as [`nth_weekday`], shifted by `day_offset` days.
///
/// The shift is applied after the occurrence is found, so a negative offset
/// steps back from it (the shipped rule uses -1 to land on the day before
/// the 4th occurrence). The shifted date may leave the month for larger
/// offsets; callers wanting the in-month invariant pick offsets that cannot
/// escape it.
pub fn nth_weekday_with_offset(
    year: i32,
    month: u32,
    weekday: Weekday,
    occurrence: u32,
    day_offset: i64,
) -> Option<NaiveDate> {
    let date = nth_weekday(year, month, weekday, occurrence)?;
    date.checked_add_signed(Duration::days(day_offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourth_thursday_of_january_2024() {
        let date = nth_weekday(2024, 1, Weekday::Thu, 4).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 25).unwrap());
        assert_eq!(date.weekday(), Weekday::Thu);
    }

    #[test]
    fn offset_lands_on_the_preceding_wednesday() {
        // The day before the 4th Thursday of January 2024.
        let date = nth_weekday_with_offset(2024, 1, Weekday::Thu, 4, -1).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 24).unwrap());
        assert_eq!(date.weekday(), Weekday::Wed);
    }

    #[test]
    fn occurrence_on_last_day_of_month_stays_in_month_after_offset() {
        // The 4th Tuesday of February 2023 is the 28th, the last day.
        let date = nth_weekday(2023, 2, Weekday::Tue, 4).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());

        let shifted = nth_weekday_with_offset(2023, 2, Weekday::Tue, 4, -1).unwrap();
        assert_eq!(shifted, NaiveDate::from_ymd_opt(2023, 2, 27).unwrap());
        assert_eq!(shifted.month(), 2);
    }

    #[test]
    fn fifth_occurrence_may_not_exist() {
        // January 2024 has four Thursdays.
        assert_eq!(nth_weekday(2024, 1, Weekday::Thu, 5), None);
    }

    #[test]
    fn occurrence_zero_is_invalid() {
        assert_eq!(nth_weekday(2024, 1, Weekday::Thu, 0), None);
    }

    #[test]
    fn invalid_month_is_none() {
        assert_eq!(nth_weekday(2024, 13, Weekday::Thu, 1), None);
    }

    #[test]
    fn result_matches_weekday_and_month_for_all_occurrences() {
        for year in 2023..2033 {
            for month in 1..=12 {
                for occurrence in 1..=4 {
                    let date = nth_weekday(year, month, Weekday::Thu, occurrence)
                        .expect("occurrences 1-4 always exist");
                    assert_eq!(date.weekday(), Weekday::Thu);
                    assert_eq!(date.month(), month);
                    assert_eq!(date.year(), year);
                }
            }
        }
    }

    #[test]
    fn larger_offsets_may_cross_the_month_boundary() {
        // March 1st 2024 is a Friday; two days earlier is February.
        let date = nth_weekday_with_offset(2024, 3, Weekday::Fri, 1, -2).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
    }
}
