use std::sync::Arc;

use chrono::NaiveDate;
use mingli_divination::chart::draw_lines;
use mingli_divination::{
    hexagram_name, Cast, ChartStyle, DivinationEngine, Element, FixedClock, Hexagram, LiuyaoChart, MeihuaChart,
    Relation, ChineseCalendar, TimeSeeds, Trigram,
};
use proptest::prelude::*;

fn engine_at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DivinationEngine {
    let at = NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(h, min, 0)).expect("datetime");
    DivinationEngine::new(Some(Arc::new(ChineseCalendar)), Arc::new(FixedClock(at)))
}

#[test]
fn cast_three_five_seven() {
    let cast = Cast::from_numbers(3, 5, 7);
    assert_eq!(cast.hexagram.upper.name, "离");
    assert_eq!(cast.hexagram.lower.name, "巽");
    assert_eq!(cast.moving_line, 3);
    assert_eq!(cast.hexagram.name(), "火风鼎");

    // line 3 is the top of the lower trigram: 巽 becomes 坎
    let t = cast.transformed();
    assert_eq!((t.upper.name, t.lower.name), ("离", "坎"));
    assert_eq!(t.name(), "火水未济");

    let chart = MeihuaChart::from_cast(&cast);
    assert_eq!(chart.subject.name, "离");
    assert_eq!(chart.object.name, "巽");
    assert_eq!(chart.relation, Relation::ObjectGeneratesSubject);
    assert_eq!(chart.mutual.name(), "泽天夬");
}

#[test]
fn seeds_wrap_zero_to_max_and_accept_negatives() {
    let cast = Cast::from_numbers(8, 16, 24);
    assert_eq!((cast.hexagram.upper.id, cast.hexagram.lower.id, cast.moving_line), (8, 8, 6));
    let cast = Cast::from_numbers(-1, -9, 0);
    assert_eq!((cast.hexagram.upper.id, cast.hexagram.lower.id), (7, 7));
    assert_eq!(cast.moving_line, 2);
    let big = Cast::from_numbers(i64::MAX, i64::MAX, i64::MAX);
    assert!((1..=6).contains(&big.moving_line));
}

#[test]
fn upper_moving_line_swaps_subject_and_object() {
    // line 4 is the bottom line of the upper trigram
    let cast = Cast::from_numbers(1, 1, 2);
    assert_eq!(cast.moving_line, 4);
    let t = cast.transformed();
    assert_eq!((t.upper.name, t.lower.name), ("巽", "乾"));
    let (subject, object) = cast.hexagram.subject_object(cast.moving_line);
    assert_eq!((subject.name, object.name), ("乾", "乾"));
    assert_eq!(MeihuaChart::from_cast(&cast).relation, Relation::Same);
}

#[test]
fn every_pair_has_a_distinct_name() {
    let mut names = std::collections::HashSet::new();
    for u in 1..=8 {
        for l in 1..=8 {
            let name = hexagram_name(u, l).expect("name");
            assert!(names.insert(name), "duplicate {name}");
        }
    }
    assert_eq!(names.len(), 64);
    assert_eq!(hexagram_name(0, 1), None);
    assert_eq!(hexagram_name(1, 9), None);
    assert_ne!(hexagram_name(1, 8), hexagram_name(8, 1));
    assert_eq!(hexagram_name(8, 1), Some("地天泰"));
}

#[test]
fn relations_cover_all_element_pairs() {
    use Element::*;
    assert_eq!(Relation::classify(Wood, Wood), Relation::Same);
    assert_eq!(Relation::classify(Wood, Water), Relation::ObjectGeneratesSubject);
    assert_eq!(Relation::classify(Wood, Fire), Relation::SubjectGeneratesObject);
    assert_eq!(Relation::classify(Wood, Earth), Relation::SubjectOvercomesObject);
    assert_eq!(Relation::classify(Wood, Metal), Relation::ObjectOvercomesSubject);
    for a in Element::ALL {
        assert_eq!(a.generates().generates().generates().generates().generates(), a);
        assert_ne!(a.generates(), a.overcomes());
    }
}

#[test]
fn mutual_of_pure_figures_is_itself() {
    let qian = Trigram::get(1).expect("乾");
    let kun = Trigram::get(8).expect("坤");
    assert_eq!(Hexagram::new(qian, qian).mutual().name(), "乾为天");
    assert_eq!(Hexagram::new(kun, kun).mutual().name(), "坤为地");
    // 地天泰 is 111000 bottom up: lines 2-4 give 兑, lines 3-5 give 震
    assert_eq!(Hexagram::new(kun, qian).mutual().name(), "雷泽归妹");
}

#[test]
fn meihua_text_layout() {
    let text = DivinationEngine::default().compute_meihua(3, 5, 7);
    assert!(text.starts_with("【梅花易数排盘】\n起卦方式：数字起卦（3、5、7）\n"));
    assert!(text.contains("本 卦：火风鼎\n  上卦：☲ 离（火·火）\n  下卦：☴ 巽（风·木）\n"));
    assert!(text.contains("动 爻：第3爻（位于下卦）"));
    assert!(text.contains("变 卦：火水未济\n  上卦：☲ 离（火·火）\n  下卦：☵ 坎（水·水）"));
    assert!(text.contains("互 卦：泽天夬"));
    assert!(text.contains("  体卦：☲ 离（火）\n  用卦：☴ 巽（木）\n  关系：用生体 —— 用卦生助体卦，大吉，主有贵人相助、收获丰厚"));
}

#[test]
fn liuyao_drawing_runs_top_down() {
    let chart = LiuyaoChart::from_cast(&Cast::from_numbers(3, 5, 7));
    let expected = [
        "  上爻  ━━━━━━━━━",
        "  五爻  ━━━━ ━━━━",
        "  四爻  ━━━━━━━━━",
        "  三爻  ━━━━━━━━━ ◀ 动",
        "  二爻  ━━━━━━━━━",
        "  初爻  ━━━━ ━━━━",
    ]
    .join("\n");
    assert_eq!(chart.drawing(), expected);
    let text = chart.to_string();
    assert!(text.starts_with("【六爻排卦】"));
    assert!(text.contains("动 爻：第3爻\n"));
    assert!(text.ends_with(&expected));
}

#[test]
fn short_number_lists_fall_back_to_time() {
    let engine = engine_at(2024, 2, 10, 12, 0);
    // 甲辰年正月初一 午时: 辰 = 5, month 1, day 1, hour number 6
    let cast = engine.cast(&[1, 2]);
    assert_eq!(engine.time_seeds(), TimeSeeds { year: 5, month: 1, day: 1, hour: 6 });
    assert_eq!(cast.hexagram.name(), "山风蛊");
    assert_eq!(cast.moving_line, 1);
    assert_eq!(cast.transformed().name(), "山天大畜");
    assert!(engine.compute_chart(ChartStyle::Liuyao, &[]).contains("起卦方式：时间起卦"));
    assert!(engine.compute_chart(ChartStyle::Meihua, &[3, 5, 7, 9]).contains("火风鼎"));
    assert_eq!(engine.compute_meihua_by_time(), engine.compute_chart(ChartStyle::Meihua, &[]));
    assert_eq!(engine.compute_liuyao_by_time(), engine.compute_chart(ChartStyle::Liuyao, &[]));
}

#[test]
fn time_cast_without_calendar_still_answers() {
    // civil seeds: 2024 % 12 = 8, month 2, day 10, hour number 6
    let engine = engine_at(2024, 2, 10, 12, 0).without_calendar();
    assert_eq!(engine.time_seeds(), TimeSeeds { year: 8, month: 2, day: 10, hour: 6 });
    assert!(engine.compute_liuyao_by_time().contains("雷泽归妹"));
}

#[test]
fn chart_styles_parse() {
    assert_eq!("meihua".parse::<ChartStyle>(), Ok(ChartStyle::Meihua));
    assert_eq!("六爻".parse::<ChartStyle>(), Ok(ChartStyle::Liuyao));
    assert!("tarot".parse::<ChartStyle>().is_err());
}

#[test]
fn drawing_marks_top_line() {
    let d = draw_lines(&[1, 1, 1, 1, 1, 1], 6);
    assert!(d.lines().next().is_some_and(|l| l.ends_with("◀ 动")));
    assert_eq!(d.matches("◀").count(), 1);
}

proptest! {
    #[test]
    fn flipping_twice_is_identity(id in 1u8..=8, pos in 1u8..=3) {
        let t = Trigram::get(id).expect("trigram");
        prop_assert_eq!(t.flip(pos).flip(pos).id, id);
        prop_assert_ne!(t.flip(pos).id, id);
    }

    #[test]
    fn any_numbers_give_a_named_chart(a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
        let cast = Cast::from_numbers(a, b, c);
        prop_assert!((1..=6).contains(&cast.moving_line));
        prop_assert!(hexagram_name(cast.hexagram.upper.id, cast.hexagram.lower.id).is_some());
        let t = cast.transformed();
        // exactly one trigram changes
        prop_assert!((t.upper.id == cast.hexagram.upper.id) != (t.lower.id == cast.hexagram.lower.id));
    }
}
