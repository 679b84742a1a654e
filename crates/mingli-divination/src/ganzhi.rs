//! Heavenly stems, earthly branches and the sixty-pillar cycle.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::element::Element;

pub const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
pub const BRANCHES: [&str; 12] = ["子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥"];
pub const ZODIAC: [&str; 12] = ["鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪"];

const STEM_ELEMENTS: [Element; 5] = [Element::Wood, Element::Fire, Element::Earth, Element::Metal, Element::Water];

const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water, Element::Earth, Element::Wood, Element::Wood, Element::Earth, Element::Fire,
    Element::Fire, Element::Earth, Element::Metal, Element::Metal, Element::Earth, Element::Water,
];

/// One entry per pair of consecutive pillars.
const NAYIN: [&str; 30] = [
    "海中金", "炉中火", "大林木", "路旁土", "剑锋金", "山头火",
    "涧下水", "城头土", "白蜡金", "杨柳木", "泉中水", "屋上土",
    "霹雳火", "松柏木", "长流水", "沙中金", "山下火", "平地木",
    "壁上土", "金箔金", "覆灯火", "天河水", "大驿土", "钗钏金",
    "桑柘木", "大溪水", "沙中土", "天上火", "石榴木", "大海水",
];

pub fn stem_element(stem: usize) -> Element {
    STEM_ELEMENTS[(stem % 10) / 2]
}

pub fn branch_element(branch: usize) -> Element {
    BRANCH_ELEMENTS[branch % 12]
}

/// Element of a single stem or branch character, if it is one.
pub fn element_of_char(c: &str) -> Option<Element> {
    if let Some(i) = STEMS.iter().position(|s| *s == c) {
        return Some(stem_element(i));
    }
    BRANCHES.iter().position(|b| *b == c).map(branch_element)
}

/// A stem-branch pair, stored as its position in the sixty cycle (甲子 = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pillar(u8);

impl Pillar {
    pub fn from_cycle(i: i64) -> Self {
        Pillar(i.rem_euclid(60) as u8)
    }

    /// `None` when stem and branch differ in parity; such pairs never occur.
    pub fn from_parts(stem: usize, branch: usize) -> Option<Self> {
        let (s, b) = (stem % 10, branch % 12);
        if s % 2 != b % 2 {
            return None;
        }
        Some(Pillar::from_cycle(6 * s as i64 - 5 * b as i64))
    }

    pub fn cycle(self) -> usize {
        usize::from(self.0)
    }

    pub fn stem_index(self) -> usize {
        self.cycle() % 10
    }

    pub fn branch_index(self) -> usize {
        self.cycle() % 12
    }

    pub fn stem(self) -> &'static str {
        STEMS[self.stem_index()]
    }

    pub fn branch(self) -> &'static str {
        BRANCHES[self.branch_index()]
    }

    pub fn stem_element(self) -> Element {
        stem_element(self.stem_index())
    }

    pub fn branch_element(self) -> Element {
        branch_element(self.branch_index())
    }

    pub fn nayin(self) -> &'static str {
        NAYIN[self.cycle() / 2]
    }

    pub fn zodiac(self) -> &'static str {
        ZODIAC[self.branch_index()]
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem(), self.branch())
    }
}

impl Serialize for Pillar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_round_trip_through_the_cycle() {
        for i in 0..60 {
            let p = Pillar::from_cycle(i);
            assert_eq!(Pillar::from_parts(p.stem_index(), p.branch_index()), Some(p));
        }
        assert_eq!(Pillar::from_parts(0, 1), None);
    }

    #[test]
    fn named_pillars() {
        assert_eq!(Pillar::from_cycle(0).to_string(), "甲子");
        assert_eq!(Pillar::from_cycle(59).to_string(), "癸亥");
        assert_eq!(Pillar::from_cycle(0).nayin(), "海中金");
        assert_eq!(Pillar::from_cycle(40).nayin(), "覆灯火");
        assert_eq!(Pillar::from_cycle(40).zodiac(), "龙");
        assert_eq!(element_of_char("庚"), Some(Element::Metal));
        assert_eq!(element_of_char("未"), Some(Element::Earth));
        assert_eq!(element_of_char("x"), None);
    }
}
