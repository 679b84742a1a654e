//! Lunar months and days.
//!
//! A month begins on the civil date (UTC+8) of a new moon. The month holding
//! 冬至 is the eleventh. When the span between two such months holds thirteen
//! months, the first one with no 中气 is the leap month and repeats the number
//! before it.

use std::ops::RangeInclusive;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::astro;
use crate::calendar::LunarDate;
use crate::error::{ChartError, ChartResult};
use crate::solar_terms::{self, WINTER_SOLSTICE};

/// Years the conversion accepts.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1000..=3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthSpan {
    /// Lunar year label; it turns at the first month.
    pub year: i32,
    /// Negative for a leap month.
    pub month: i8,
    pub start: NaiveDate,
    pub days: u8,
}

fn new_moon_day(k: i64) -> NaiveDate {
    astro::cst_from_jd(astro::new_moon(k)).date()
}

/// Lunation whose new moon falls on or before `date`.
fn new_moon_on_or_before(date: NaiveDate) -> i64 {
    let midnight = astro::julian_day(date.year(), date.month(), f64::from(date.day())) - 8.0 / 24.0;
    let mean = astro::lunation_index(midnight);
    (mean - 2..=mean + 1).rev().find(|&k| new_moon_day(k) <= date).unwrap_or(mean - 2)
}

fn first_month_without_zhongqi(starts: &[NaiveDate], zhongqi: &[NaiveDate]) -> Option<usize> {
    (1..starts.len() - 1).find(|&i| !zhongqi.iter().any(|q| (starts[i]..starts[i + 1]).contains(q)))
}

/// Months from the one holding 冬至 of `year - 1` up to the one holding
/// 冬至 of `year`, exclusive.
pub fn months_between_solstices(year: i32) -> Vec<MonthSpan> {
    let first = new_moon_on_or_before(solar_terms::term_moment(year - 1, WINTER_SOLSTICE).at.date());
    let last = new_moon_on_or_before(solar_terms::term_moment(year, WINTER_SOLSTICE).at.date());
    let starts: Vec<NaiveDate> = (first..=last).map(new_moon_day).collect();
    let count = starts.len().saturating_sub(1);

    let leap = if count == 13 {
        let zhongqi: Vec<NaiveDate> =
            solar_terms::terms_of_year(year).filter(|t| !t.term.is_jie).map(|t| t.at.date()).collect();
        first_month_without_zhongqi(&starts, &zhongqi)
    } else {
        None
    };

    let mut number: i8 = 11;
    let mut label = year - 1;
    let mut months = Vec::with_capacity(count);
    for (i, pair) in starts.windows(2).enumerate() {
        let month = if i == 0 {
            11
        } else if leap == Some(i) {
            -number
        } else {
            number = number % 12 + 1;
            if number == 1 {
                label = year;
            }
            number
        };
        let days = u8::try_from((pair[1] - pair[0]).num_days()).unwrap_or(30);
        months.push(MonthSpan { year: label, month, start: pair[0], days });
    }
    months
}

pub fn lunar_date(date: NaiveDate) -> Option<LunarDate> {
    if !SUPPORTED_YEARS.contains(&date.year()) {
        return None;
    }
    let next = months_between_solstices(date.year() + 1);
    let months = match next.first() {
        Some(m) if date >= m.start => next,
        _ => months_between_solstices(date.year()),
    };
    months.iter().rev().find(|m| m.start <= date).map(|m| LunarDate {
        year: m.year,
        month: m.month,
        day: u8::try_from((date - m.start).num_days() + 1).unwrap_or(1),
    })
}

/// Civil date of a lunar date. Fails for a leap month the year does not have
/// or a day past the month's end.
pub fn solar_date(lunar: LunarDate) -> ChartResult<NaiveDate> {
    let invalid = || ChartError::InvalidDate(format!("农历{}年{}月{}日不存在", lunar.year, lunar.month, lunar.day));
    if !SUPPORTED_YEARS.contains(&lunar.year) || !(1..=12).contains(&lunar.month.unsigned_abs()) {
        return Err(invalid());
    }
    let span = months_between_solstices(lunar.year)
        .into_iter()
        .chain(months_between_solstices(lunar.year + 1))
        .find(|m| m.year == lunar.year && m.month == lunar.month)
        .ok_or_else(invalid)?;
    if lunar.day == 0 || lunar.day > span.days {
        return Err(invalid());
    }
    span.start.checked_add_days(Days::new(u64::from(lunar.day - 1))).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("date")
    }

    fn lunar(year: i32, month: i8, day: u8) -> LunarDate {
        LunarDate { year, month, day }
    }

    #[test]
    fn spring_festival_dates() {
        let festivals = [(2020, d(2020, 1, 25)), (2023, d(2023, 1, 22)), (2024, d(2024, 2, 10)), (2025, d(2025, 1, 29))];
        for (year, date) in festivals {
            assert_eq!(lunar_date(date), Some(lunar(year, 1, 1)), "{date}");
            assert_eq!(solar_date(lunar(year, 1, 1)), Ok(date));
        }
        assert_eq!(lunar_date(d(2024, 2, 9)), Some(lunar(2023, 12, 30)));
    }

    #[test]
    fn leap_months_repeat_the_previous_number() {
        let months = months_between_solstices(2023);
        assert_eq!(months.len(), 13);
        let numbers: Vec<i8> = months.iter().map(|m| m.month).collect();
        assert_eq!(numbers, [11, 12, 1, 2, -2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(months_between_solstices(2024).len(), 12);

        assert_eq!(lunar_date(d(2023, 3, 22)), Some(lunar(2023, -2, 1)));
        assert_eq!(lunar_date(d(2023, 4, 20)), Some(lunar(2023, 3, 1)));
        assert_eq!(lunar_date(d(2025, 7, 25)), Some(lunar(2025, -6, 1)));
        assert_eq!(lunar_date(d(2020, 5, 23)), Some(lunar(2020, -4, 1)));
    }

    #[test]
    fn month_lengths_come_from_new_moons() {
        let first = months_between_solstices(2024).into_iter().find(|m| m.month == 1).expect("正月");
        assert_eq!((first.start, first.days), (d(2024, 2, 10), 29));
        assert!(matches!(solar_date(lunar(2024, 1, 30)), Err(ChartError::InvalidDate(_))));
        assert_eq!(solar_date(lunar(2024, 2, 1)), Ok(d(2024, 3, 10)));
    }

    #[test]
    fn missing_leap_month_is_invalid() {
        assert!(matches!(solar_date(lunar(2024, -4, 1)), Err(ChartError::InvalidDate(_))));
        assert!(matches!(solar_date(lunar(2024, 13, 1)), Err(ChartError::InvalidDate(_))));
        assert_eq!(solar_date(lunar(2023, -2, 29)), Ok(d(2023, 4, 19)));
    }

    #[test]
    fn out_of_range_years() {
        assert_eq!(lunar_date(d(100, 1, 1)), None);
        assert!(solar_date(lunar(5000, 1, 1)).is_err());
    }
}
