use crate::questionnaire::domain::VarkStyle;
use crate::questionnaire::inference::DominantProfile;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisView {
    pub headline: String,
    pub profile: DominantProfile,
    pub dominant: Vec<VarkStyle>,
    pub scores: Vec<StyleScoreEntry>,
    pub matched_rules: Vec<MatchedRuleEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_note: Option<String>,
    pub recommendations: Vec<RecommendationView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StyleScoreEntry {
    pub code: &'static str,
    pub label: &'static str,
    pub score: u32,
    pub max_score: u32,
    pub dominant: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchedRuleEntry {
    pub code: &'static str,
    pub label: &'static str,
    pub rule_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub code: &'static str,
    pub label: &'static str,
    pub strategy: String,
}
