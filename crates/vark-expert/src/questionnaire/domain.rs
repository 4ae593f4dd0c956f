use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Learning style categories of the VARK model, ordered canonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VarkStyle {
    #[serde(rename = "V")]
    Visual,
    #[serde(rename = "A")]
    Auditory,
    #[serde(rename = "R")]
    ReadWrite,
    #[serde(rename = "K")]
    Kinesthetic,
}

impl VarkStyle {
    pub const ALL: [VarkStyle; 4] = [
        VarkStyle::Visual,
        VarkStyle::Auditory,
        VarkStyle::ReadWrite,
        VarkStyle::Kinesthetic,
    ];

    pub fn code(self) -> &'static str {
        match self {
            VarkStyle::Visual => "V",
            VarkStyle::Auditory => "A",
            VarkStyle::ReadWrite => "R",
            VarkStyle::Kinesthetic => "K",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VarkStyle::Visual => "Visual",
            VarkStyle::Auditory => "Auditory",
            VarkStyle::ReadWrite => "Read/Write",
            VarkStyle::Kinesthetic => "Kinesthetic",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            VarkStyle::Visual => "👁️",
            VarkStyle::Auditory => "👂",
            VarkStyle::ReadWrite => "📖",
            VarkStyle::Kinesthetic => "🤸",
        }
    }

    /// Accepts the single-letter code or the full label, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "v" | "visual" => Some(Self::Visual),
            "a" | "auditory" | "aural" => Some(Self::Auditory),
            "r" | "read/write" | "readwrite" | "read-write" => Some(Self::ReadWrite),
            "k" | "kinesthetic" | "kinaesthetic" => Some(Self::Kinesthetic),
            _ => None,
        }
    }
}

impl fmt::Display for VarkStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Yes/no prompt contributing `weight` points to its category when affirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub code: String,
    pub text: String,
    pub category: VarkStyle,
    pub weight: u32,
}

/// Conjunction of required "yes" answers that corroborates a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub category: VarkStyle,
    pub conditions: Vec<String>,
}

impl Rule {
    /// Condition codes with blank entries removed.
    pub fn required_codes(&self) -> impl Iterator<Item = &str> {
        self.conditions
            .iter()
            .map(|code| code.trim())
            .filter(|code| !code.is_empty())
    }
}

pub const MISSING_STRATEGY_PLACEHOLDER: &str = "-";

/// Recommended study strategy per category. Later inserts replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyBook {
    entries: BTreeMap<VarkStyle, String>,
}

impl StrategyBook {
    pub fn insert(&mut self, category: VarkStyle, text: impl Into<String>) -> Option<String> {
        self.entries.insert(category, text.into())
    }

    pub fn get(&self, category: VarkStyle) -> Option<&str> {
        self.entries.get(&category).map(String::as_str)
    }

    /// Strategy text for `category`, or the placeholder when none is on record.
    pub fn recommendation(&self, category: VarkStyle) -> &str {
        match self.get(category) {
            Some(text) if !text.trim().is_empty() => text,
            _ => MISSING_STRATEGY_PLACEHOLDER,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Recorded yes/no answers keyed by question code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    entries: BTreeMap<String, bool>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the answer for `code`, returning the one it replaced.
    pub fn record(&mut self, code: impl Into<String>, yes: bool) -> Option<bool> {
        self.entries.insert(code.into(), yes)
    }

    pub fn get(&self, code: &str) -> Option<bool> {
        self.entries.get(code).copied()
    }

    pub fn is_yes(&self, code: &str) -> bool {
        self.get(code).unwrap_or(false)
    }

    pub fn yes_codes(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|(_, yes)| **yes)
            .map(|(code, _)| code.clone())
            .collect()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Answers {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut answers = Answers::new();
        for (code, yes) in iter {
            answers.record(code, yes);
        }
        answers
    }
}

/// Accumulated points per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreVector {
    totals: BTreeMap<VarkStyle, u32>,
}

impl ScoreVector {
    pub fn zeroed() -> Self {
        Self {
            totals: VarkStyle::ALL.iter().map(|style| (*style, 0)).collect(),
        }
    }

    pub fn get(&self, category: VarkStyle) -> u32 {
        self.totals.get(&category).copied().unwrap_or(0)
    }

    pub fn add(&mut self, category: VarkStyle, points: u32) {
        let total = self.totals.entry(category).or_insert(0);
        *total = total.saturating_add(points);
    }

    /// Highest total, 0 for an empty vector.
    pub fn max(&self) -> u32 {
        self.totals.values().copied().max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarkStyle, u32)> + '_ {
        self.totals.iter().map(|(style, total)| (*style, *total))
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl Default for ScoreVector {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl From<BTreeMap<VarkStyle, u32>> for ScoreVector {
    fn from(totals: BTreeMap<VarkStyle, u32>) -> Self {
        Self { totals }
    }
}

/// Fully satisfied rule ids grouped by category, in rule-table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchedRules {
    by_category: BTreeMap<VarkStyle, Vec<String>>,
}

impl MatchedRules {
    pub fn push(&mut self, category: VarkStyle, rule_id: impl Into<String>) {
        self.by_category
            .entry(category)
            .or_default()
            .push(rule_id.into());
    }

    pub fn for_category(&self, category: VarkStyle) -> &[String] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, rule_id: &str) -> bool {
        self.by_category
            .values()
            .any(|ids| ids.iter().any(|id| id == rule_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarkStyle, &[String])> + '_ {
        self.by_category
            .iter()
            .map(|(style, ids)| (*style, ids.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_parse_accepts_codes_and_labels() {
        assert_eq!(VarkStyle::parse("v"), Some(VarkStyle::Visual));
        assert_eq!(VarkStyle::parse(" Read/Write "), Some(VarkStyle::ReadWrite));
        assert_eq!(VarkStyle::parse("K"), Some(VarkStyle::Kinesthetic));
        assert_eq!(VarkStyle::parse("X"), None);
        assert_eq!(VarkStyle::parse(""), None);
    }

    #[test]
    fn canonical_order_matches_vark() {
        let mut styles = vec![
            VarkStyle::Kinesthetic,
            VarkStyle::Visual,
            VarkStyle::ReadWrite,
            VarkStyle::Auditory,
        ];
        styles.sort();
        assert_eq!(styles, VarkStyle::ALL.to_vec());
    }

    #[test]
    fn strategy_book_falls_back_to_placeholder() {
        let mut book = StrategyBook::default();
        book.insert(VarkStyle::Visual, "Use mind maps");
        book.insert(VarkStyle::Auditory, "  ");

        assert_eq!(book.recommendation(VarkStyle::Visual), "Use mind maps");
        assert_eq!(book.recommendation(VarkStyle::Auditory), "-");
        assert_eq!(book.recommendation(VarkStyle::Kinesthetic), "-");
    }

    #[test]
    fn answers_overwrite_on_revisit() {
        let mut answers = Answers::new();
        assert_eq!(answers.record("Q1", true), None);
        assert_eq!(answers.record("Q1", false), Some(true));
        assert_eq!(answers.len(), 1);
        assert!(!answers.is_yes("Q1"));
        assert!(!answers.is_yes("Q9"));
        assert!(answers.yes_codes().is_empty());
    }

    #[test]
    fn score_vector_serializes_with_style_codes() {
        let mut scores = ScoreVector::zeroed();
        scores.add(VarkStyle::ReadWrite, 3);
        let json = serde_json::to_value(&scores).expect("serialize");
        assert_eq!(json, serde_json::json!({ "V": 0, "A": 0, "R": 3, "K": 0 }));
    }

    #[test]
    fn rule_required_codes_skip_blanks() {
        let rule = Rule {
            id: "R1".to_string(),
            category: VarkStyle::Visual,
            conditions: vec!["Q1".to_string(), " ".to_string(), String::new()],
        };
        assert_eq!(rule.required_codes().collect::<Vec<_>>(), vec!["Q1"]);
    }
}
