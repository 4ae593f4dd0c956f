use super::super::domain::{MatchedRules, Rule};
use std::collections::BTreeSet;

/// Reports every rule whose full condition set was answered "yes".
///
/// Rules without any non-blank condition never match. Partial matches are not
/// reported.
pub fn evaluate(rules: &[Rule], yes_codes: &BTreeSet<String>) -> MatchedRules {
    let mut matched = MatchedRules::default();

    for rule in rules {
        let mut conditions = rule.required_codes().peekable();
        if conditions.peek().is_none() {
            continue;
        }

        if conditions.all(|code| yes_codes.contains(code)) {
            matched.push(rule.category, rule.id.clone());
        }
    }

    matched
}
