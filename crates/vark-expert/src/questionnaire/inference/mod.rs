mod dominant;
mod rules;
mod scoring;

pub use dominant::select_dominant;
pub use rules::evaluate;
pub use scoring::score;

use super::domain::{Answers, MatchedRules, ScoreVector, VarkStyle};
use super::knowledge::KnowledgeBase;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Stateless engine that diagnoses answer snapshots against a knowledge base.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    knowledge: Arc<KnowledgeBase>,
}

impl InferenceEngine {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn diagnose(&self, answers: &Answers) -> Diagnosis {
        diagnose(&self.knowledge, answers)
    }
}

/// Scores are the primary signal; matched rules corroborate them.
pub fn diagnose(knowledge: &KnowledgeBase, answers: &Answers) -> Diagnosis {
    let scores = score(knowledge.questions(), answers);
    let matched_rules = evaluate(knowledge.rules(), &answers.yes_codes());
    let dominant = select_dominant(&scores);

    let recommendations = dominant
        .iter()
        .map(|style| Recommendation {
            category: *style,
            strategy: knowledge.strategies().recommendation(*style).to_string(),
        })
        .collect();

    Diagnosis {
        scores,
        dominant,
        matched_rules,
        recommendations,
    }
}

/// Whether one style stands out or several are tied at the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "styles")]
pub enum DominantProfile {
    Single(VarkStyle),
    Combination(Vec<VarkStyle>),
}

impl DominantProfile {
    pub fn summary(&self) -> String {
        match self {
            DominantProfile::Single(style) => format!(
                "You show a strong preference for the {} learning style.",
                style.label()
            ),
            DominantProfile::Combination(_) => {
                "Your learning style is balanced and adapts to several methods.".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: VarkStyle,
    pub strategy: String,
}

/// Final outcome of a completed questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub scores: ScoreVector,
    pub dominant: Vec<VarkStyle>,
    pub matched_rules: MatchedRules,
    pub recommendations: Vec<Recommendation>,
}

impl Diagnosis {
    pub fn profile(&self) -> DominantProfile {
        match self.dominant.as_slice() {
            [single] => DominantProfile::Single(*single),
            many => DominantProfile::Combination(many.to_vec()),
        }
    }

    /// Rules corroborating one of the dominant styles.
    pub fn corroborating_rules(&self) -> Vec<&str> {
        self.dominant
            .iter()
            .flat_map(|style| self.matched_rules.for_category(*style))
            .map(String::as_str)
            .collect()
    }
}
