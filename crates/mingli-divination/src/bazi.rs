//! Four-pillar (八字) birth charts.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::{CalendarConverter, FourPillars, LunarDate};
use crate::element::{Element, ElementTally};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "男命",
            Gender::Female => "女命",
        }
    }
}

/// Birth moment as entered. `lunar` means year/month/day are a lunar date
/// (negative month for a leap month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthInput {
    pub year: i32,
    pub month: i32,
    pub day: u32,
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    pub gender: Gender,
    #[serde(default)]
    pub lunar: bool,
}

impl BirthInput {
    pub fn solar(year: i32, month: u32, day: u32, hour: u32, minute: u32, gender: Gender) -> Self {
        Self { year, month: month as i32, day, hour, minute, gender, lunar: false }
    }

    fn time(&self) -> ChartResult<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
            .ok_or_else(|| ChartError::InvalidDate(format!("{}时{}分", self.hour, self.minute)))
    }

    /// Civil birth time, converting from the lunar calendar when needed.
    pub fn resolve(&self, calendar: &dyn CalendarConverter) -> ChartResult<NaiveDateTime> {
        let time = self.time()?;
        if self.lunar {
            let month = i8::try_from(self.month)
                .ok()
                .filter(|m| (1..=12).contains(&m.unsigned_abs()))
                .ok_or_else(|| ChartError::InvalidDate(format!("农历{}月", self.month)))?;
            let day = u8::try_from(self.day).map_err(|_| ChartError::InvalidDate(format!("农历{}日", self.day)))?;
            return calendar.solar_from_lunar(LunarDate { year: self.year, month, day }, time);
        }
        let date = u32::try_from(self.month)
            .ok()
            .and_then(|m| NaiveDate::from_ymd_opt(self.year, m, self.day))
            .ok_or_else(|| ChartError::InvalidDate(format!("{}年{}月{}日", self.year, self.month, self.day)))?;
        Ok(date.and_time(time))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaziChart {
    pub gender: Gender,
    pub solar: NaiveDateTime,
    pub lunar: Option<LunarDate>,
    pub pillars: FourPillars,
    pub day_master: &'static str,
    pub day_master_element: Element,
    pub tally: ElementTally,
}

impl BaziChart {
    pub fn compute(input: &BirthInput, calendar: &dyn CalendarConverter) -> ChartResult<Self> {
        let solar = input.resolve(calendar)?;
        let pillars = calendar.four_pillars(solar)?;
        Ok(Self {
            gender: input.gender,
            solar,
            lunar: calendar.lunar_date(solar),
            pillars,
            day_master: pillars.day.stem(),
            day_master_element: pillars.day.stem_element(),
            tally: tally_pillars(&pillars),
        })
    }

    pub fn missing(&self) -> Vec<Element> {
        self.tally.missing()
    }
}

/// Element of every stem and branch across the four pillars.
pub fn tally_pillars(pillars: &FourPillars) -> ElementTally {
    pillars.all().into_iter().flat_map(|p| [p.stem_element(), p.branch_element()]).collect()
}

impl fmt::Display for BaziChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use chrono::{Datelike, Timelike};
        let s = &self.solar;
        let p = &self.pillars;
        writeln!(f, "【八字排盘结果】")?;
        writeln!(f, "{}", self.gender.label())?;
        writeln!(f, "出生公历：{}年{}月{}日 {}时{}分", s.year(), s.month(), s.day(), s.hour(), s.minute())?;
        match &self.lunar {
            Some(l) => writeln!(
                f,
                "出生农历：{}年 {}月{} {}年",
                l.year_pillar(),
                l.month_in_chinese(),
                l.day_in_chinese(),
                l.year_pillar().zodiac()
            )?,
            None => writeln!(f, "生肖：{}", p.year.zodiac())?,
        }
        writeln!(f)?;
        writeln!(f, "四柱八字：")?;
        for (label, pillar) in [("年柱", p.year), ("月柱", p.month), ("日柱", p.day), ("时柱", p.hour)] {
            writeln!(f, "  {label}：{pillar}（{}）", pillar.nayin())?;
        }
        writeln!(f)?;
        writeln!(f, "日主：{}（{}）", self.day_master, self.day_master_element)?;
        writeln!(f, "五行分布：{}", self.tally)?;
        let missing = self.missing();
        if missing.is_empty() {
            write!(f, "五行缺失：五行俱全")
        } else {
            let names: Vec<&str> = missing.iter().map(|e| e.name()).collect();
            write!(f, "五行缺失：{}", names.join("、"))
        }
    }
}
