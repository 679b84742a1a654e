//! Calendrical conversion behind a trait, plus the built-in Chinese calendar.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::error::ChartResult;
use crate::ganzhi::Pillar;
use crate::lunisolar;
use crate::solar_terms::{self, TermMoment};

const LUNAR_MONTHS: [&str; 12] = ["正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "腊"];
const DIGITS: [&str; 10] = ["", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// A date in the Chinese lunisolar calendar. A negative month is a leap month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: i8,
    pub day: u8,
}

impl LunarDate {
    /// Branch number of the lunar year, 子 = 1 through 亥 = 12.
    pub fn year_branch_number(&self) -> i64 {
        (i64::from(self.year) - 4).rem_euclid(12) + 1
    }

    pub fn year_pillar(&self) -> Pillar {
        Pillar::from_cycle(i64::from(self.year) - 4)
    }

    /// `闰四`, `正`, `腊`
    pub fn month_in_chinese(&self) -> String {
        let name = LUNAR_MONTHS[usize::from(self.month.unsigned_abs().clamp(1, 12)) - 1];
        if self.month < 0 { format!("闰{name}") } else { name.to_string() }
    }

    /// `初一`, `十五`, `廿三`, `三十`
    pub fn day_in_chinese(&self) -> String {
        let d = usize::from(self.day);
        match d {
            1..=10 => format!("初{}", if d == 10 { "十" } else { DIGITS[d] }),
            11..=19 => format!("十{}", DIGITS[d - 10]),
            20 => "二十".to_string(),
            21..=29 => format!("廿{}", DIGITS[d - 20]),
            30 => "三十".to_string(),
            _ => d.to_string(),
        }
    }
}

/// Year, month, day and hour pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    pub fn all(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTermInfo {
    /// Set only on the day a term falls on.
    pub current: Option<TermMoment>,
    /// Strictly after the moment asked about.
    pub next_jie: TermMoment,
    pub next_qi: TermMoment,
}

/// Converts civil time to the traditional calendar.
///
/// `lunar_date` may return `None` for converters that do not track the lunar
/// months; callers then fall back to the civil date.
pub trait CalendarConverter: Send + Sync {
    fn four_pillars(&self, at: NaiveDateTime) -> ChartResult<FourPillars>;

    fn lunar_date(&self, at: NaiveDateTime) -> Option<LunarDate>;

    fn solar_from_lunar(&self, date: LunarDate, time: NaiveTime) -> ChartResult<NaiveDateTime>;

    fn solar_terms(&self, at: NaiveDateTime) -> SolarTermInfo;
}

/// Pillars from day counting and solar-term instants, lunar dates from new
/// moons. Civil times are read as China Standard Time.
///
/// The year turns at the instant of 立春 and months at each 节. The day pillar
/// advances at midnight, but from 23:00 the 子 hour already takes the next
/// day's stem.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChineseCalendar;

impl ChineseCalendar {
    /// 甲子 falls 14 days before a multiple of 60 in the CE day count
    /// (2000-01-01 is 戊午).
    pub fn day_pillar(date: NaiveDate) -> Pillar {
        Pillar::from_cycle(i64::from(date.num_days_from_ce()) + 14)
    }

    pub fn year_pillar(at: NaiveDateTime) -> Pillar {
        Pillar::from_cycle(i64::from(solar_terms::solar_year(at)) - 4)
    }

    /// 五虎遁: the 寅 month of a 甲 or 己 year is 丙寅, and so on.
    pub fn month_pillar(at: NaiveDateTime) -> Pillar {
        let year_stem = Self::year_pillar(at).stem_index();
        let branch = solar_terms::month_branch(at);
        let first = (year_stem % 5) * 2 + 2;
        let stem = (first + (branch + 10) % 12) % 10;
        pillar(stem, branch)
    }

    /// 五鼠遁: the 子 hour of a 甲 or 己 day is 甲子. `day` is the pillar whose
    /// stem governs the hour, the next day's from 23:00.
    pub fn hour_pillar(day: Pillar, hour: u32) -> Pillar {
        let branch = ((hour as usize + 1) / 2) % 12;
        let stem = ((day.stem_index() % 5) * 2 + branch) % 10;
        pillar(stem, branch)
    }
}

fn pillar(stem: usize, branch: usize) -> Pillar {
    // both tables above keep stem and branch parity equal
    Pillar::from_parts(stem, branch).unwrap_or_else(|| Pillar::from_cycle(0))
}

impl CalendarConverter for ChineseCalendar {
    fn four_pillars(&self, at: NaiveDateTime) -> ChartResult<FourPillars> {
        let date = at.date();
        let day = Self::day_pillar(date);
        let hour_day = match at.hour() {
            23 => date.checked_add_days(Days::new(1)).map_or(day, Self::day_pillar),
            _ => day,
        };
        Ok(FourPillars {
            year: Self::year_pillar(at),
            month: Self::month_pillar(at),
            day,
            hour: Self::hour_pillar(hour_day, at.hour()),
        })
    }

    fn lunar_date(&self, at: NaiveDateTime) -> Option<LunarDate> {
        lunisolar::lunar_date(at.date())
    }

    fn solar_from_lunar(&self, date: LunarDate, time: NaiveTime) -> ChartResult<NaiveDateTime> {
        Ok(lunisolar::solar_date(date)?.and_time(time))
    }

    fn solar_terms(&self, at: NaiveDateTime) -> SolarTermInfo {
        SolarTermInfo {
            current: solar_terms::term_on(at.date()),
            next_jie: solar_terms::next_jie(at),
            next_qi: solar_terms::next_qi(at),
        }
    }
}
