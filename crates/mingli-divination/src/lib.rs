//! mingli-divination
//!
//! Deterministic symbolic charts: trigram and hexagram casting (梅花易数 and
//! 六爻 styles), five-element relations, the Chinese calendar (solar terms
//! and lunar months) and four pillar (八字) birth charts. `DivinationEngine`
//! is the entry point; it returns chart text and never fails a request.

pub mod astro;
pub mod bazi;
pub mod calendar;
pub mod casting;
pub mod chart;
pub mod clock;
pub mod element;
pub mod engine;
pub mod error;
pub mod ganzhi;
pub mod hexagram;
pub mod lunisolar;
pub mod solar_terms;
pub mod trigram;

pub use bazi::{BaziChart, BirthInput, Gender};
pub use calendar::{CalendarConverter, ChineseCalendar, FourPillars, LunarDate, SolarTermInfo};
pub use casting::{Cast, CastMethod, TimeSeeds};
pub use chart::{ChartStyle, LiuyaoChart, MeihuaChart};
pub use clock::{Clock, FixedClock, SystemClock};
pub use element::{Element, ElementTally, Relation};
pub use engine::DivinationEngine;
pub use error::{ChartError, ChartResult};
pub use ganzhi::Pillar;
pub use hexagram::{hexagram_name, Hexagram};
pub use trigram::Trigram;
