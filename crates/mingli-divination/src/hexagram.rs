use serde::Serialize;

use crate::trigram::Trigram;

/// Names indexed by `[upper - 1][lower - 1]`.
pub const HEXAGRAM_NAMES: [[&str; 8]; 8] = [
    ["乾为天", "天泽履", "天火同人", "天雷无妄", "天风姤", "天水讼", "天山遁", "天地否"],
    ["泽天夬", "兑为泽", "泽火革", "泽雷随", "泽风大过", "泽水困", "泽山咸", "泽地萃"],
    ["火天大有", "火泽睽", "离为火", "火雷噬嗑", "火风鼎", "火水未济", "火山旅", "火地晋"],
    ["雷天大壮", "雷泽归妹", "雷火丰", "震为雷", "雷风恒", "雷水解", "雷山小过", "雷地豫"],
    ["风天小畜", "风泽中孚", "风火家人", "风雷益", "巽为风", "风水涣", "风山渐", "风地观"],
    ["水天需", "水泽节", "水火既济", "水雷屯", "水风井", "坎为水", "水山蹇", "水地比"],
    ["山天大畜", "山泽损", "山火贲", "山雷颐", "山风蛊", "山水蒙", "艮为山", "山地剥"],
    ["地天泰", "地泽临", "地火明夷", "地雷复", "地风升", "地水师", "地山谦", "坤为地"],
];

pub fn hexagram_name(upper: u8, lower: u8) -> Option<&'static str> {
    if !(1..=8).contains(&upper) || !(1..=8).contains(&lower) {
        return None;
    }
    Some(HEXAGRAM_NAMES[usize::from(upper - 1)][usize::from(lower - 1)])
}

/// A six-line figure: a lower and an upper trigram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hexagram {
    pub upper: &'static Trigram,
    pub lower: &'static Trigram,
}

/// Which trigram holds the moving line. The other one is the subject (体).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MovingHalf {
    Lower,
    Upper,
}

impl MovingHalf {
    pub fn of(moving_line: u8) -> MovingHalf {
        if moving_line <= 3 { MovingHalf::Lower } else { MovingHalf::Upper }
    }

    pub fn label(self) -> &'static str {
        match self {
            MovingHalf::Lower => "下卦",
            MovingHalf::Upper => "上卦",
        }
    }
}

impl Hexagram {
    pub fn new(upper: &'static Trigram, lower: &'static Trigram) -> Self {
        Self { upper, lower }
    }

    pub fn name(&self) -> &'static str {
        // ids in a Trigram are always 1..=8
        hexagram_name(self.upper.id, self.lower.id).unwrap_or("未知卦")
    }

    /// Lines bottom to top: the lower trigram's three, then the upper's.
    pub fn lines(&self) -> [u8; 6] {
        let (l, u) = (self.lower.lines, self.upper.lines);
        [l[0], l[1], l[2], u[0], u[1], u[2]]
    }

    /// The figure after the moving line changes. Lines 1-3 live in the lower
    /// trigram, 4-6 in the upper.
    pub fn transformed(&self, moving_line: u8) -> Hexagram {
        match MovingHalf::of(moving_line) {
            MovingHalf::Lower => Hexagram::new(self.upper, self.lower.flip(moving_line)),
            MovingHalf::Upper => Hexagram::new(self.upper.flip(moving_line - 3), self.lower),
        }
    }

    /// Lines 2-4 form the lower trigram, lines 3-5 the upper.
    pub fn mutual(&self) -> Hexagram {
        let l = self.lines();
        let lower = Trigram::from_lines([l[1], l[2], l[3]]).unwrap_or(self.lower);
        let upper = Trigram::from_lines([l[2], l[3], l[4]]).unwrap_or(self.upper);
        Hexagram::new(upper, lower)
    }

    /// `(subject, object)`: the trigram without the moving line is the subject.
    pub fn subject_object(&self, moving_line: u8) -> (&'static Trigram, &'static Trigram) {
        match MovingHalf::of(moving_line) {
            MovingHalf::Lower => (self.upper, self.lower),
            MovingHalf::Upper => (self.lower, self.upper),
        }
    }
}
