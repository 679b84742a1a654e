//! The twenty-four solar terms as instants in China Standard Time.
//!
//! Each term is the moment the sun's apparent longitude reaches a multiple of
//! 15°. Month pillars change at the 节 terms, the year pillar at 立春.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::astro;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTerm {
    pub name: &'static str,
    /// Apparent solar longitude in degrees.
    pub longitude: u16,
    /// 节 terms open a month; 气 terms fall mid-month.
    pub is_jie: bool,
}

const fn jie(name: &'static str, longitude: u16) -> SolarTerm {
    SolarTerm { name, longitude, is_jie: true }
}

const fn qi(name: &'static str, longitude: u16) -> SolarTerm {
    SolarTerm { name, longitude, is_jie: false }
}

/// In calendar order from January.
pub static SOLAR_TERMS: [SolarTerm; 24] = [
    jie("小寒", 285), qi("大寒", 300),
    jie("立春", 315), qi("雨水", 330),
    jie("惊蛰", 345), qi("春分", 0),
    jie("清明", 15), qi("谷雨", 30),
    jie("立夏", 45), qi("小满", 60),
    jie("芒种", 75), qi("夏至", 90),
    jie("小暑", 105), qi("大暑", 120),
    jie("立秋", 135), qi("处暑", 150),
    jie("白露", 165), qi("秋分", 180),
    jie("寒露", 195), qi("霜降", 210),
    jie("立冬", 225), qi("小雪", 240),
    jie("大雪", 255), qi("冬至", 270),
];

pub const SPRING_START: usize = 2;
pub const WINTER_SOLSTICE: usize = 23;

/// A term and the civil time it begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermMoment {
    pub term: &'static SolarTerm,
    pub at: NaiveDateTime,
}

/// UT Julian day of term `index` (0 = 小寒) in civil `year`.
pub fn term_jd(year: i32, index: usize) -> f64 {
    let index = index % SOLAR_TERMS.len();
    let new_year = astro::julian_day(year, 1, 1.0) - 8.0 / 24.0;
    let guess = new_year + 5.0 + 15.2184 * index as f64;
    astro::sun_reaches(f64::from(SOLAR_TERMS[index].longitude), guess)
}

pub fn term_moment(year: i32, index: usize) -> TermMoment {
    let index = index % SOLAR_TERMS.len();
    TermMoment { term: &SOLAR_TERMS[index], at: astro::cst_from_jd(term_jd(year, index)) }
}

/// All 24 terms of a civil year, 小寒 first.
pub fn terms_of_year(year: i32) -> impl Iterator<Item = TermMoment> {
    (0..SOLAR_TERMS.len()).map(move |i| term_moment(year, i))
}

/// Term that begins on `date`, if any.
pub fn term_on(date: NaiveDate) -> Option<TermMoment> {
    terms_of_year(date.year()).find(|t| t.at.date() == date)
}

fn next_matching(at: NaiveDateTime, is_jie: bool) -> TermMoment {
    let year = at.year();
    terms_of_year(year)
        .chain(terms_of_year(year + 1))
        .filter(|t| t.term.is_jie == is_jie)
        .find(|t| t.at > at)
        .unwrap_or_else(|| term_moment(year + 1, if is_jie { 0 } else { 1 }))
}

/// First 节 strictly after `at`.
pub fn next_jie(at: NaiveDateTime) -> TermMoment {
    next_matching(at, true)
}

/// First 气 strictly after `at`.
pub fn next_qi(at: NaiveDateTime) -> TermMoment {
    next_matching(at, false)
}

/// Earthly branch (子 = 0) of the solar month containing `at`.
pub fn month_branch(at: NaiveDateTime) -> usize {
    let longitude = astro::sun_longitude(astro::ut_to_tt(astro::jd_from_cst(at)));
    // 立春 at 315° opens 寅
    let months_since = ((longitude - 315.0).rem_euclid(360.0) / 30.0).floor() as usize;
    (months_since + 2) % 12
}

pub fn spring_start(year: i32) -> NaiveDateTime {
    term_moment(year, SPRING_START).at
}

/// Year whose 干支 applies at `at`; it turns over at the instant of 立春.
pub fn solar_year(at: NaiveDateTime) -> i32 {
    if at >= spring_start(at.year()) {
        at.year()
    } else {
        at.year() - 1
    }
}
