//! Hexagram charts in two styles and their text form.

use serde::Serialize;
use std::fmt;

use crate::casting::{Cast, CastMethod};
use crate::element::Relation;
use crate::hexagram::{Hexagram, MovingHalf};
use crate::trigram::Trigram;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━";
const LINE_NAMES: [&str; 6] = ["初", "二", "三", "四", "五", "上"];
const YANG: &str = "━━━━━━━━━";
const YIN: &str = "━━━━ ━━━━";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartStyle {
    /// 梅花易数: subject/object analysis.
    Meihua,
    /// 六爻: six-line drawing.
    Liuyao,
}

impl std::str::FromStr for ChartStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "meihua" | "梅花" | "梅花易数" => Ok(ChartStyle::Meihua),
            "liuyao" | "六爻" => Ok(ChartStyle::Liuyao),
            other => Err(format!("unknown chart style {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeihuaChart {
    pub method: CastMethod,
    pub original: Hexagram,
    pub moving_line: u8,
    pub moving_half: MovingHalf,
    pub transformed: Hexagram,
    pub mutual: Hexagram,
    pub subject: &'static Trigram,
    pub object: &'static Trigram,
    pub relation: Relation,
}

impl MeihuaChart {
    pub fn from_cast(cast: &Cast) -> Self {
        let (subject, object) = cast.hexagram.subject_object(cast.moving_line);
        Self {
            method: cast.method.clone(),
            original: cast.hexagram,
            moving_line: cast.moving_line,
            moving_half: MovingHalf::of(cast.moving_line),
            transformed: cast.transformed(),
            mutual: cast.hexagram.mutual(),
            subject,
            object,
            relation: Relation::classify(subject.element, object.element),
        }
    }
}

fn write_trigrams(f: &mut fmt::Formatter<'_>, h: &Hexagram) -> fmt::Result {
    writeln!(f, "  上卦：{}", h.upper.describe())?;
    writeln!(f, "  下卦：{}", h.lower.describe())
}

fn write_header(f: &mut fmt::Formatter<'_>, title: &str, method: &CastMethod, original: &Hexagram) -> fmt::Result {
    writeln!(f, "【{title}】")?;
    writeln!(f, "起卦方式：{}", method.describe())?;
    writeln!(f, "{RULE}")?;
    writeln!(f)?;
    writeln!(f, "本 卦：{}", original.name())?;
    write_trigrams(f, original)
}

impl fmt::Display for MeihuaChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, "梅花易数排盘", &self.method, &self.original)?;
        writeln!(f)?;
        writeln!(f, "动 爻：第{}爻（位于{}）", self.moving_line, self.moving_half.label())?;
        writeln!(f)?;
        writeln!(f, "变 卦：{}", self.transformed.name())?;
        write_trigrams(f, &self.transformed)?;
        writeln!(f)?;
        writeln!(f, "互 卦：{}", self.mutual.name())?;
        writeln!(f)?;
        writeln!(f, "体用分析：")?;
        writeln!(f, "  体卦：{} {}（{}）", self.subject.symbol, self.subject.name, self.subject.element)?;
        writeln!(f, "  用卦：{} {}（{}）", self.object.symbol, self.object.name, self.object.element)?;
        write!(f, "  关系：{} —— {}", self.relation.label(), self.relation.reading())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiuyaoChart {
    pub method: CastMethod,
    pub original: Hexagram,
    pub moving_line: u8,
    pub transformed: Hexagram,
}

impl LiuyaoChart {
    pub fn from_cast(cast: &Cast) -> Self {
        Self {
            method: cast.method.clone(),
            original: cast.hexagram,
            moving_line: cast.moving_line,
            transformed: cast.transformed(),
        }
    }

    /// One row per line, top line first, moving line marked.
    pub fn drawing(&self) -> String {
        draw_lines(&self.original.lines(), self.moving_line)
    }
}

/// `lines` run bottom to top.
pub fn draw_lines(lines: &[u8; 6], moving_line: u8) -> String {
    (0..6)
        .rev()
        .map(|i| {
            let bar = if lines[i] == 1 { YANG } else { YIN };
            let mark = if i + 1 == usize::from(moving_line) { " ◀ 动" } else { "" };
            format!("  {}爻  {bar}{mark}", LINE_NAMES[i])
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for LiuyaoChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, "六爻排卦", &self.method, &self.original)?;
        writeln!(f)?;
        writeln!(f, "动 爻：第{}爻", self.moving_line)?;
        writeln!(f)?;
        writeln!(f, "变 卦：{}", self.transformed.name())?;
        writeln!(f)?;
        writeln!(f, "卦象（从上到下）：")?;
        f.write_str(&self.drawing())
    }
}
