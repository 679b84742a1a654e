//! Query expansion groups for the keyword tier.
//!
//! If a query mentions any member of a group, every member of that group
//! becomes a match term.

pub const SYNONYM_GROUPS: [&[&str]; 19] = [
    &["八字", "四柱", "命局", "命造"],
    &["格局", "格", "局", "取格"],
    &["用神", "取用", "喜用", "喜神", "忌神"],
    &["月令", "月建", "提纲", "月支"],
    &["冲", "六冲", "子午冲", "卯酉冲", "寅申冲", "巳亥冲", "辰戌冲", "丑未冲", "刑冲合害"],
    &["刑", "三刑", "无恩之刑", "恃势之刑", "无礼之刑"],
    &["合", "六合", "三合", "半合", "天干五合", "地支六合"],
    &["害", "六害"],
    &["大运", "运", "运程", "行运"],
    &["流年", "岁", "太岁", "岁运"],
    &["十神", "正官", "偏官", "七杀", "正财", "偏财", "正印", "偏印", "食神", "伤官", "比肩", "劫财"],
    &["日主", "日干", "日元", "身"],
    &["身旺", "身强", "旺"],
    &["身弱", "身衰", "弱", "衰"],
    &["五行", "金木水火土", "木火土金水"],
    &["伤官", "食神", "伤官见官"],
    &["财", "财星", "正财", "偏财"],
    &["官", "官星", "正官", "偏官", "七杀"],
    &["印", "印星", "正印", "偏印", "枭神"],
];

/// Groups triggered by `query` (already lowercased), in table order.
pub fn matching_groups(query: &str) -> impl Iterator<Item = &'static [&'static str]> + '_ {
    SYNONYM_GROUPS.iter().copied().filter(move |group| group.iter().any(|term| query.contains(term)))
}
