// Week calendar: Monday enumeration per year and detection of years with gaps.
// Filling the gaps (store access, batching) lives in calendar::filler.

mod filler;

pub use filler::{FillError, FillPolicy, FillSummary, WeekStore, fill_next_missing_weeks};

use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::HashSet;

/// Every Monday within one calendar year, earliest first.
///
/// Searches forward from January 1 only, so the first item is always in the
/// requested year (never the last Monday of December of the previous year).
/// Cloning restarts the sequence.
#[derive(Debug, Clone)]
pub struct Mondays {
    year: i32,
    next: Option<NaiveDate>,
}

impl Iterator for Mondays {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next.filter(|d| d.year() == self.year)?;
        self.next = current.checked_add_days(Days::new(7));
        Some(current)
    }
}

/// Mondays of `year` (52 or 53 of them). Years outside chrono's range yield nothing.
pub fn mondays_of_year(year: i32) -> Mondays {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).and_then(|jan1| {
        let offset = (7 - jan1.weekday().num_days_from_monday()) % 7;
        jan1.checked_add_days(Days::new(u64::from(offset)))
    });
    debug_assert!(first.is_none_or(|d| d.weekday() == Weekday::Mon));
    Mondays { year, next: first }
}

/// Mondays of `year` that are not in `known`, ascending.
pub fn missing_mondays(known: &HashSet<NaiveDate>, year: i32) -> Vec<NaiveDate> {
    mondays_of_year(year).filter(|d| !known.contains(d)).collect()
}

/// Years in `[start_year, start_year + horizon - 1]` with at least one Monday
/// absent from `existing`, ascending.
pub fn years_with_missing_weeks(existing: &[NaiveDate], start_year: i32, horizon: u32) -> Vec<i32> {
    let known: HashSet<NaiveDate> = existing.iter().copied().collect();
    missing_years(&known, start_year, horizon).collect()
}

/// Earliest year in the horizon with a gap, if any.
pub fn next_missing_year(existing: &[NaiveDate], start_year: i32, horizon: u32) -> Option<i32> {
    let known: HashSet<NaiveDate> = existing.iter().copied().collect();
    missing_years(&known, start_year, horizon).next()
}

pub(crate) fn missing_years(
    known: &HashSet<NaiveDate>,
    start_year: i32,
    horizon: u32,
) -> impl Iterator<Item = i32> {
    horizon_years(start_year, horizon)
        .filter(move |&year| mondays_of_year(year).any(|d| !known.contains(&d)))
}

fn horizon_years(start_year: i32, horizon: u32) -> impl Iterator<Item = i32> {
    (0..horizon).map_while(move |offset| {
        i32::try_from(offset)
            .ok()
            .and_then(|o| start_year.checked_add(o))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_monday_is_searched_forward_from_jan_1() {
        // 2024-01-01 is itself a Monday.
        assert_eq!(mondays_of_year(2024).next(), Some(ymd(2024, 1, 1)));
        // 2023-01-01 is a Sunday.
        assert_eq!(mondays_of_year(2023).next(), Some(ymd(2023, 1, 2)));
        // 2027-01-01 is a Friday; the Monday of that ISO week (2026-12-28) is not used.
        assert_eq!(mondays_of_year(2027).next(), Some(ymd(2027, 1, 4)));
    }

    #[test]
    fn last_monday_stays_in_year() {
        assert_eq!(mondays_of_year(2024).last(), Some(ymd(2024, 12, 30)));
        assert_eq!(mondays_of_year(2026).last(), Some(ymd(2026, 12, 28)));
    }

    #[test]
    fn horizon_years_is_inclusive_of_start() {
        let years: Vec<i32> = horizon_years(2026, 3).collect();
        assert_eq!(years, vec![2026, 2027, 2028]);
        assert_eq!(horizon_years(2026, 0).count(), 0);
    }

    #[test]
    fn out_of_range_year_is_empty() {
        assert_eq!(mondays_of_year(i32::MAX).count(), 0);
    }
}
