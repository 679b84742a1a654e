//! The eight trigrams in Earlier Heaven (先天) numbering, 1 through 8.
//!
//! Lines are listed bottom to top; `1` is a solid (yang) line.

use serde::Serialize;

use crate::casting::wrap_index;
use crate::element::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trigram {
    pub id: u8,
    pub name: &'static str,
    pub nature: &'static str,
    pub element: Element,
    pub symbol: &'static str,
    pub lines: [u8; 3],
}

pub static TRIGRAMS: [Trigram; 8] = [
    Trigram { id: 1, name: "乾", nature: "天", element: Element::Metal, symbol: "☰", lines: [1, 1, 1] },
    Trigram { id: 2, name: "兑", nature: "泽", element: Element::Metal, symbol: "☱", lines: [1, 1, 0] },
    Trigram { id: 3, name: "离", nature: "火", element: Element::Fire, symbol: "☲", lines: [1, 0, 1] },
    Trigram { id: 4, name: "震", nature: "雷", element: Element::Wood, symbol: "☳", lines: [1, 0, 0] },
    Trigram { id: 5, name: "巽", nature: "风", element: Element::Wood, symbol: "☴", lines: [0, 1, 1] },
    Trigram { id: 6, name: "坎", nature: "水", element: Element::Water, symbol: "☵", lines: [0, 1, 0] },
    Trigram { id: 7, name: "艮", nature: "山", element: Element::Earth, symbol: "☶", lines: [0, 0, 1] },
    Trigram { id: 8, name: "坤", nature: "地", element: Element::Earth, symbol: "☷", lines: [0, 0, 0] },
];

impl Trigram {
    /// Lookup by id; `None` outside `1..=8`.
    pub fn get(id: u8) -> Option<&'static Trigram> {
        match id {
            1..=8 => TRIGRAMS.get(usize::from(id - 1)),
            _ => None,
        }
    }

    /// Lookup by any integer, reduced modulo 8 with 0 meaning 8.
    pub fn wrapping(n: i64) -> &'static Trigram {
        &TRIGRAMS[wrap_index(n, 8) as usize - 1]
    }

    pub fn from_lines(lines: [u8; 3]) -> Option<&'static Trigram> {
        TRIGRAMS.iter().find(|t| t.lines == lines)
    }

    /// Toggle the line at `pos` (1 = bottom, 3 = top) and return the trigram
    /// with the resulting pattern. Positions outside `1..=3` change nothing.
    pub fn flip(&'static self, pos: u8) -> &'static Trigram {
        if !(1..=3).contains(&pos) {
            return self;
        }
        let mut lines = self.lines;
        let i = usize::from(pos - 1);
        lines[i] = 1 - lines[i];
        Trigram::from_lines(lines).unwrap_or(self)
    }

    /// `☰ 乾（天·金）`
    pub fn describe(&self) -> String {
        format!("{} {}（{}·{}）", self.symbol, self.name, self.nature, self.element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_is_a_trigram() {
        for bits in 0u8..8 {
            let lines = [bits & 1, (bits >> 1) & 1, (bits >> 2) & 1];
            assert!(Trigram::from_lines(lines).is_some(), "{lines:?}");
        }
    }

    #[test]
    fn wrapping_maps_zero_to_eight() {
        assert_eq!(Trigram::wrapping(0).id, 8);
        assert_eq!(Trigram::wrapping(8).id, 8);
        assert_eq!(Trigram::wrapping(9).id, 1);
        assert_eq!(Trigram::wrapping(-1).id, 7);
    }
}
