//! The five elements and the relations between a subject and an object.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Element {
    Metal,
    Wood,
    Water,
    Fire,
    Earth,
}

impl Element {
    /// Tally order used in chart text: 金 木 水 火 土.
    pub const ALL: [Element; 5] = [Element::Metal, Element::Wood, Element::Water, Element::Fire, Element::Earth];

    pub fn name(self) -> &'static str {
        match self {
            Element::Metal => "金",
            Element::Wood => "木",
            Element::Water => "水",
            Element::Fire => "火",
            Element::Earth => "土",
        }
    }

    /// 金生水 水生木 木生火 火生土 土生金
    pub fn generates(self) -> Element {
        match self {
            Element::Metal => Element::Water,
            Element::Water => Element::Wood,
            Element::Wood => Element::Fire,
            Element::Fire => Element::Earth,
            Element::Earth => Element::Metal,
        }
    }

    /// 金克木 木克土 土克水 水克火 火克金
    pub fn overcomes(self) -> Element {
        match self {
            Element::Metal => Element::Wood,
            Element::Wood => Element::Earth,
            Element::Earth => Element::Water,
            Element::Water => Element::Fire,
            Element::Fire => Element::Metal,
        }
    }

    fn index(self) -> usize {
        match self {
            Element::Metal => 0,
            Element::Wood => 1,
            Element::Water => 2,
            Element::Fire => 3,
            Element::Earth => 4,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the object (用) trigram's element bears on the subject (体).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relation {
    Same,
    ObjectGeneratesSubject,
    SubjectGeneratesObject,
    SubjectOvercomesObject,
    ObjectOvercomesSubject,
}

impl Relation {
    pub fn classify(subject: Element, object: Element) -> Relation {
        if subject == object {
            Relation::Same
        } else if object.generates() == subject {
            Relation::ObjectGeneratesSubject
        } else if subject.generates() == object {
            Relation::SubjectGeneratesObject
        } else if subject.overcomes() == object {
            Relation::SubjectOvercomesObject
        } else {
            // any two distinct elements are related by exactly one of the four
            Relation::ObjectOvercomesSubject
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Relation::Same => "比和",
            Relation::ObjectGeneratesSubject => "用生体",
            Relation::SubjectGeneratesObject => "体生用",
            Relation::SubjectOvercomesObject => "体克用",
            Relation::ObjectOvercomesSubject => "用克体",
        }
    }

    pub fn reading(self) -> &'static str {
        match self {
            Relation::Same => "体用五行相同，比和之象，事可顺遂",
            Relation::ObjectGeneratesSubject => "用卦生助体卦，大吉，主有贵人相助、收获丰厚",
            Relation::SubjectGeneratesObject => "体卦生出用卦，泄气之象，主付出多、消耗心力",
            Relation::SubjectOvercomesObject => "体卦克制用卦，小吉，事可成但需费些周折",
            Relation::ObjectOvercomesSubject => "用卦克制体卦，不利，主阻碍、压力较大",
        }
    }
}

/// Element counts in 金 木 水 火 土 order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElementTally([u32; 5]);

impl ElementTally {
    pub fn add(&mut self, e: Element) {
        self.0[e.index()] += 1;
    }

    pub fn count(&self, e: Element) -> u32 {
        self.0[e.index()]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn missing(&self) -> Vec<Element> {
        Element::ALL.into_iter().filter(|e| self.count(*e) == 0).collect()
    }
}

impl FromIterator<Element> for ElementTally {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut tally = ElementTally::default();
        for e in iter {
            tally.add(e);
        }
        tally
    }
}

impl fmt::Display for ElementTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Element::ALL.iter().map(|e| format!("{}{}", e.name(), self.count(*e))).collect();
        f.write_str(&parts.join("  "))
    }
}
