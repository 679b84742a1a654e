use chrono::{Datelike, NaiveDateTime, Timelike};
use std::sync::Arc;
use tracing::{debug, warn};

use mingli_core::config::CalendarConfig;

use crate::bazi::{BaziChart, BirthInput};
use crate::calendar::{CalendarConverter, ChineseCalendar};
use crate::casting::{Cast, TimeSeeds};
use crate::chart::{ChartStyle, LiuyaoChart, MeihuaChart};
use crate::clock::{Clock, SystemClock};
use crate::error::{ChartError, ChartResult};

const WEEKDAYS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];

pub const BAZI_UNAVAILABLE: &str = "八字排盘功能需要历法组件支持，当前未启用";

/// Entry point for every chart. Holds the optional calendar and the clock;
/// cheap to clone and safe to share.
#[derive(Clone)]
pub struct DivinationEngine {
    calendar: Option<Arc<dyn CalendarConverter>>,
    clock: Arc<dyn Clock>,
}

impl Default for DivinationEngine {
    fn default() -> Self {
        Self { calendar: Some(Arc::new(ChineseCalendar)), clock: Arc::new(SystemClock) }
    }
}

impl DivinationEngine {
    pub fn new(calendar: Option<Arc<dyn CalendarConverter>>, clock: Arc<dyn Clock>) -> Self {
        Self { calendar, clock }
    }

    pub fn from_settings(config: &CalendarConfig) -> Self {
        let mut engine = Self::default();
        if !config.enabled {
            engine.calendar = None;
        }
        engine
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn without_calendar(mut self) -> Self {
        self.calendar = None;
        self
    }

    pub fn has_calendar(&self) -> bool {
        self.calendar.is_some()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Lunar seeds when the calendar knows the lunar date, civil ones otherwise.
    pub fn time_seeds(&self) -> TimeSeeds {
        let now = self.now();
        match self.calendar.as_ref().and_then(|c| c.lunar_date(now)) {
            Some(lunar) => TimeSeeds::lunar(&lunar, now),
            None => {
                debug!("no lunar date, seeding time cast from the civil date");
                TimeSeeds::gregorian(now)
            }
        }
    }

    pub fn cast_by_time(&self) -> Cast {
        Cast::from_time(self.time_seeds())
    }

    /// Three or more numbers cast from the first three; anything less casts
    /// from the current time.
    pub fn cast(&self, numbers: &[i64]) -> Cast {
        match numbers {
            [a, b, c, ..] => Cast::from_numbers(*a, *b, *c),
            _ => self.cast_by_time(),
        }
    }

    pub fn compute_meihua(&self, n1: i64, n2: i64, n3: i64) -> String {
        MeihuaChart::from_cast(&Cast::from_numbers(n1, n2, n3)).to_string()
    }

    pub fn compute_meihua_by_time(&self) -> String {
        MeihuaChart::from_cast(&self.cast_by_time()).to_string()
    }

    pub fn compute_liuyao(&self, n1: i64, n2: i64, n3: i64) -> String {
        LiuyaoChart::from_cast(&Cast::from_numbers(n1, n2, n3)).to_string()
    }

    pub fn compute_liuyao_by_time(&self) -> String {
        LiuyaoChart::from_cast(&self.cast_by_time()).to_string()
    }

    pub fn compute_chart(&self, style: ChartStyle, numbers: &[i64]) -> String {
        let cast = self.cast(numbers);
        debug!(?style, upper = cast.hexagram.upper.id, lower = cast.hexagram.lower.id, moving = cast.moving_line, "cast");
        match style {
            ChartStyle::Meihua => MeihuaChart::from_cast(&cast).to_string(),
            ChartStyle::Liuyao => LiuyaoChart::from_cast(&cast).to_string(),
        }
    }

    pub fn bazi_chart(&self, input: &BirthInput) -> ChartResult<BaziChart> {
        let calendar = self.calendar.as_deref().ok_or(ChartError::CalendarUnavailable)?;
        BaziChart::compute(input, calendar)
    }

    /// Chart text, or a one-line explanation of why there is none.
    pub fn compute_bazi(&self, input: &BirthInput) -> String {
        match self.bazi_chart(input) {
            Ok(chart) => chart.to_string(),
            Err(ChartError::CalendarUnavailable) => BAZI_UNAVAILABLE.to_string(),
            Err(e) => {
                warn!(error = %e, "bazi chart failed");
                format!("八字排盘出错：{e}")
            }
        }
    }

    /// Snapshot of the current moment in both calendars.
    pub fn get_time_context(&self) -> String {
        let now = self.now();
        let civil = civil_line(now);
        let Some(calendar) = self.calendar.as_deref() else {
            return format!("【当前时间】\n{civil}\n（注：农历/节气信息暂不可用）");
        };
        let pillars = match calendar.four_pillars(now) {
            Ok(p) => p,
            Err(e) => return format!("【当前时间】\n{civil}\n（详细农历信息获取异常：{e}）"),
        };

        let mut lines = vec!["【当前时间信息】".to_string(), civil];
        match calendar.lunar_date(now) {
            Some(l) => lines.push(format!(
                "农历：{}年（{}年）{}月{}",
                l.year_pillar(),
                l.year_pillar().zodiac(),
                l.month_in_chinese(),
                l.day_in_chinese()
            )),
            None => lines.push(format!("干支纪年：{}年（{}年）", pillars.year, pillars.year.zodiac())),
        }
        let [y, m, d, h] = pillars.all();
        lines.push(format!("四柱（当前时刻）：{y} {m} {d} {h}"));
        lines.push(format!("纳音：{} {} {} {}", y.nayin(), m.nayin(), d.nayin(), h.nayin()));

        let terms = calendar.solar_terms(now);
        if let Some(t) = terms.current {
            lines.push(format!("当前节气：{}", t.term.name));
        }
        lines.push(format!("下一节：{}", terms.next_jie.term.name));
        lines.push(format!("下一气：{}", terms.next_qi.term.name));
        lines.join("\n")
    }
}

fn civil_line(now: NaiveDateTime) -> String {
    format!(
        "公历：{}年{}月{}日 星期{} {}:{:02}",
        now.year(),
        now.month(),
        now.day(),
        WEEKDAYS[now.weekday().num_days_from_monday() as usize],
        now.hour(),
        now.minute()
    )
}
