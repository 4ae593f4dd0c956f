use super::super::domain::{ScoreVector, VarkStyle};

/// Categories tied at the highest score, in canonical V, A, R, K order.
///
/// When no points were collected at all every category is returned.
pub fn select_dominant(scores: &ScoreVector) -> Vec<VarkStyle> {
    let max_score = scores.max();
    if max_score == 0 {
        return VarkStyle::ALL.to_vec();
    }

    VarkStyle::ALL
        .into_iter()
        .filter(|style| scores.get(*style) == max_score)
        .collect()
}
