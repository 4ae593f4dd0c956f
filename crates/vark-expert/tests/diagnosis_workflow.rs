use std::collections::BTreeSet;
use std::sync::Arc;

use vark_expert::questionnaire::{
    diagnose, evaluate, score, select_dominant, Answers, DominantProfile, KnowledgeBase,
    QuestionnaireSession, Question, Rule, SessionId, SessionPhase, StrategyBook, VarkStyle,
};

fn question(code: &str, category: VarkStyle, weight: u32) -> Question {
    Question {
        code: code.to_string(),
        text: format!("Prompt {code}"),
        category,
        weight,
    }
}

fn sample_questions() -> Vec<Question> {
    vec![
        question("Q1", VarkStyle::Visual, 2),
        question("Q2", VarkStyle::Auditory, 1),
        question("Q3", VarkStyle::Visual, 1),
    ]
}

fn sample_answers() -> Answers {
    [("Q1", true), ("Q2", true), ("Q3", false)]
        .into_iter()
        .collect()
}

#[test]
fn weighted_scores_select_visual() {
    let scores = score(&sample_questions(), &sample_answers());

    assert_eq!(scores.get(VarkStyle::Visual), 2);
    assert_eq!(scores.get(VarkStyle::Auditory), 1);
    assert_eq!(scores.get(VarkStyle::ReadWrite), 0);
    assert_eq!(scores.get(VarkStyle::Kinesthetic), 0);
    assert_eq!(select_dominant(&scores), vec![VarkStyle::Visual]);
}

#[test]
fn rule_with_unanswered_condition_does_not_match() {
    let rules = vec![Rule {
        id: "R1".to_string(),
        category: VarkStyle::Visual,
        conditions: vec!["Q1".to_string(), "Q3".to_string()],
    }];

    let matched = evaluate(&rules, &sample_answers().yes_codes());

    assert!(matched.is_empty());
}

#[test]
fn no_yes_answers_is_fully_ambiguous() {
    let answers: Answers = [("Q1", false), ("Q2", false), ("Q3", false)]
        .into_iter()
        .collect();

    let scores = score(&sample_questions(), &answers);

    assert_eq!(select_dominant(&scores), VarkStyle::ALL.to_vec());
    assert!(evaluate(&[], &BTreeSet::new()).is_empty());
}

#[test]
fn bundled_questionnaire_runs_end_to_end() {
    let knowledge = Arc::new(KnowledgeBase::bundled().expect("bundled dataset"));
    let mut session = QuestionnaireSession::new(SessionId("cli".to_string()), knowledge.clone());

    // Affirm every read/write prompt and nothing else.
    while let Some(question) = session.current_question() {
        let yes = question.category == VarkStyle::ReadWrite;
        session.answer(yes).expect("answer accepted");
    }

    assert_eq!(session.phase(), SessionPhase::Scored);
    let diagnosis = session.diagnosis().expect("diagnosis");
    assert_eq!(diagnosis.profile(), DominantProfile::Single(VarkStyle::ReadWrite));
    assert_eq!(
        diagnosis.matched_rules.for_category(VarkStyle::ReadWrite),
        ["RR1".to_string(), "RR2".to_string()]
    );
    assert_eq!(
        diagnosis.scores.get(VarkStyle::ReadWrite),
        knowledge.max_score(VarkStyle::ReadWrite)
    );
    assert_ne!(diagnosis.recommendations[0].strategy, "-");
}

#[test]
fn tied_styles_recommend_each_strategy() {
    let questions = vec![
        question("V1", VarkStyle::Visual, 2),
        question("K1", VarkStyle::Kinesthetic, 2),
    ];
    let mut strategies = StrategyBook::default();
    strategies.insert(VarkStyle::Visual, "Draw it");
    let knowledge =
        KnowledgeBase::new(questions, Vec::new(), strategies).expect("valid knowledge base");
    let answers: Answers = [("V1", true), ("K1", true)].into_iter().collect();

    let diagnosis = diagnose(&knowledge, &answers);

    assert_eq!(
        diagnosis.profile(),
        DominantProfile::Combination(vec![VarkStyle::Visual, VarkStyle::Kinesthetic])
    );
    let strategies: Vec<_> = diagnosis
        .recommendations
        .iter()
        .map(|rec| rec.strategy.as_str())
        .collect();
    assert_eq!(strategies, vec!["Draw it", "-"]);
}
