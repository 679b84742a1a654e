//! Turning numbers into a figure.
//!
//! Every seed is reduced with the same rule: `n mod m`, where a remainder of
//! zero stands for `m` itself, since trigram and line numbers start at 1.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::calendar::LunarDate;
use crate::hexagram::Hexagram;
use crate::trigram::Trigram;

/// `n mod m` in `1..=m`. Negative and very large inputs are fine.
pub fn wrap_index(n: i64, m: i64) -> i64 {
    match n.rem_euclid(m) {
        0 => m,
        r => r,
    }
}

/// `sum(parts) mod m` in `1..=m` without overflowing on large parts.
fn wrap_sum(parts: &[i64], m: i64) -> i64 {
    let r = parts.iter().map(|p| p.rem_euclid(m)).sum::<i64>();
    wrap_index(r, m)
}

/// Hour number for time casting: `(hour + 1) / 2 mod 12`, zero read as 12.
/// 23:00 and 00:00 both give 12.
pub fn hour_branch_number(hour: u32) -> i64 {
    wrap_index(i64::from((hour + 1) / 2 % 12), 12)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CastMethod {
    Numbers([i64; 3]),
    Time,
}

impl CastMethod {
    pub fn describe(&self) -> String {
        match self {
            CastMethod::Numbers([a, b, c]) => format!("数字起卦（{a}、{b}、{c}）"),
            CastMethod::Time => "时间起卦".to_string(),
        }
    }
}

/// A cast figure plus its moving line (1 = bottom, 6 = top).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cast {
    pub hexagram: Hexagram,
    pub moving_line: u8,
    pub method: CastMethod,
}

/// Numbers a time cast is seeded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSeeds {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
}

impl TimeSeeds {
    /// Lunar year branch, lunar month and day, hour branch.
    pub fn lunar(lunar: &LunarDate, at: NaiveDateTime) -> Self {
        Self {
            year: lunar.year_branch_number(),
            month: i64::from(lunar.month.unsigned_abs()),
            day: i64::from(lunar.day),
            hour: hour_branch_number(at.hour()),
        }
    }

    /// Plain civil date: `year mod 12` stands in for the year branch.
    pub fn gregorian(at: NaiveDateTime) -> Self {
        use chrono::Datelike;
        Self {
            year: wrap_index(i64::from(at.year()), 12),
            month: i64::from(at.month()),
            day: i64::from(at.day()),
            hour: hour_branch_number(at.hour()),
        }
    }
}

impl Cast {
    /// `n1` picks the upper trigram, `n2` the lower, and their sum with `n3`
    /// the moving line.
    pub fn from_numbers(n1: i64, n2: i64, n3: i64) -> Self {
        Self {
            hexagram: Hexagram::new(Trigram::wrapping(n1), Trigram::wrapping(n2)),
            moving_line: wrap_sum(&[n1, n2, n3], 6) as u8,
            method: CastMethod::Numbers([n1, n2, n3]),
        }
    }

    pub fn from_time(seeds: TimeSeeds) -> Self {
        let TimeSeeds { year, month, day, hour } = seeds;
        let upper = wrap_sum(&[year, month, day], 8);
        let full = [year, month, day, hour];
        Self {
            hexagram: Hexagram::new(Trigram::wrapping(upper), Trigram::wrapping(wrap_sum(&full, 8))),
            moving_line: wrap_sum(&full, 6) as u8,
            method: CastMethod::Time,
        }
    }

    pub fn transformed(&self) -> Hexagram {
        self.hexagram.transformed(self.moving_line)
    }
}
