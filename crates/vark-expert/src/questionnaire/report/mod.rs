pub mod views;

pub use views::{DiagnosisView, MatchedRuleEntry, RecommendationView, StyleScoreEntry};

use super::inference::Diagnosis;
use super::knowledge::KnowledgeBase;

pub const NO_RULE_MATCHED_NOTE: &str =
    "No rule was fully satisfied; the result is based on the weighted score.";

/// Builds the presentation model for a diagnosis.
pub fn build_view(diagnosis: &Diagnosis, knowledge: &KnowledgeBase) -> DiagnosisView {
    let profile = diagnosis.profile();

    let scores = diagnosis
        .scores
        .iter()
        .map(|(style, score)| StyleScoreEntry {
            code: style.code(),
            label: style.label(),
            score,
            max_score: knowledge.max_score(style),
            dominant: diagnosis.dominant.contains(&style),
        })
        .collect();

    let matched_rules: Vec<MatchedRuleEntry> = diagnosis
        .matched_rules
        .iter()
        .map(|(style, ids)| MatchedRuleEntry {
            code: style.code(),
            label: style.label(),
            rule_ids: ids.to_vec(),
        })
        .collect();

    let rule_note = if matched_rules.is_empty() {
        Some(NO_RULE_MATCHED_NOTE.to_string())
    } else {
        None
    };

    let recommendations = diagnosis
        .recommendations
        .iter()
        .map(|recommendation| RecommendationView {
            code: recommendation.category.code(),
            label: recommendation.category.label(),
            strategy: recommendation.strategy.clone(),
        })
        .collect();

    DiagnosisView {
        headline: profile.summary(),
        profile,
        dominant: diagnosis.dominant.clone(),
        scores,
        matched_rules,
        rule_note,
        recommendations,
    }
}
