use crate::infra::bootstrap_cli;
use crate::render::render_diagnosis;
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use vark_expert::error::AppError;
use vark_expert::questionnaire::{
    build_view, diagnose, Answers, DiagnosisView, KnowledgeBase, QuestionnaireServiceError,
    VarkStyle,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DiagnoseArgs {
    /// Question code answered "yes" (repeatable)
    #[arg(long = "yes", value_name = "CODE")]
    pub(crate) yes: Vec<String>,
    /// Question code answered "no" (repeatable; unlisted codes already count as "no")
    #[arg(long = "no", value_name = "CODE")]
    pub(crate) no: Vec<String>,
    /// Print the diagnosis as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_diagnose(args: DiagnoseArgs, dataset: Option<PathBuf>) -> Result<(), AppError> {
    let knowledge = bootstrap_cli(dataset)?;
    let view = diagnose_codes(&knowledge, &args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &view)?;
        writeln!(out)?;
    } else {
        render_diagnosis(&mut out, &view)?;
    }
    Ok(())
}

pub(crate) fn diagnose_codes(
    knowledge: &KnowledgeBase,
    args: &DiagnoseArgs,
) -> Result<DiagnosisView, AppError> {
    let answers: Answers = args
        .no
        .iter()
        .map(|code| (code.trim().to_string(), false))
        .chain(args.yes.iter().map(|code| (code.trim().to_string(), true)))
        .collect();

    if let Some(unknown) = answers.codes().find(|code| !knowledge.contains_question(code)) {
        return Err(QuestionnaireServiceError::UnknownQuestion(unknown.to_string()).into());
    }

    Ok(build_view(&diagnose(knowledge, &answers), knowledge))
}

#[derive(Args, Debug, Default)]
pub(crate) struct InspectArgs {
    /// Print the summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct DatasetSummary {
    pub(crate) questions: usize,
    pub(crate) rules: usize,
    pub(crate) strategies: usize,
    pub(crate) styles: Vec<StyleSummary>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StyleSummary {
    pub(crate) code: &'static str,
    pub(crate) label: &'static str,
    pub(crate) questions: usize,
    pub(crate) max_score: u32,
    pub(crate) rules: usize,
    pub(crate) has_strategy: bool,
}

impl DatasetSummary {
    pub(crate) fn from_knowledge(knowledge: &KnowledgeBase) -> Self {
        let styles = VarkStyle::ALL
            .iter()
            .map(|&style| StyleSummary {
                code: style.code(),
                label: style.label(),
                questions: knowledge.question_count(style),
                max_score: knowledge.max_score(style),
                rules: knowledge
                    .rules()
                    .iter()
                    .filter(|rule| rule.category == style)
                    .count(),
                has_strategy: knowledge.strategies().get(style).is_some(),
            })
            .collect();

        Self {
            questions: knowledge.questions().len(),
            rules: knowledge.rules().len(),
            strategies: knowledge.strategies().len(),
            styles,
        }
    }
}

pub(crate) fn run_dataset_inspect(
    args: InspectArgs,
    dataset: Option<PathBuf>,
) -> Result<(), AppError> {
    let knowledge = bootstrap_cli(dataset)?;
    let summary = DatasetSummary::from_knowledge(&knowledge);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &summary)?;
        writeln!(out)?;
    } else {
        render_inspection(&mut out, &summary)?;
    }
    Ok(())
}

pub(crate) fn render_inspection<W: Write>(out: &mut W, summary: &DatasetSummary) -> io::Result<()> {
    writeln!(
        out,
        "Dataset: {} questions, {} rules, {} strategies",
        summary.questions, summary.rules, summary.strategies
    )?;

    for style in &summary.styles {
        writeln!(
            out,
            "- {} ({}): {} questions, max score {}, {} rules, strategy {}",
            style.label,
            style.code,
            style.questions,
            style.max_score,
            style.rules,
            if style.has_strategy { "yes" } else { "missing" }
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(yes: &[&str], no: &[&str]) -> DiagnoseArgs {
        DiagnoseArgs {
            yes: yes.iter().map(|code| code.to_string()).collect(),
            no: no.iter().map(|code| code.to_string()).collect(),
            json: false,
        }
    }

    #[test]
    fn yes_wins_when_a_code_is_listed_twice() {
        let knowledge = KnowledgeBase::bundled().expect("bundled dataset");

        let view = diagnose_codes(&knowledge, &args(&["G13"], &["G13"])).expect("diagnosis");

        assert_eq!(view.dominant, vec![VarkStyle::Kinesthetic]);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let knowledge = KnowledgeBase::bundled().expect("bundled dataset");

        let error = diagnose_codes(&knowledge, &args(&["ZZ"], &[])).expect_err("rejected");

        assert!(matches!(
            error,
            AppError::Questionnaire(QuestionnaireServiceError::UnknownQuestion(_))
        ));
    }

    #[test]
    fn summary_serializes_per_style_counts() {
        let knowledge = KnowledgeBase::bundled().expect("bundled dataset");

        let json = serde_json::to_value(DatasetSummary::from_knowledge(&knowledge)).expect("json");

        assert_eq!(json["questions"], 16);
        assert_eq!(json["styles"][3]["code"], "K");
        assert_eq!(json["styles"][3]["has_strategy"], true);
    }

    #[test]
    fn inspection_lists_every_style() {
        let knowledge = KnowledgeBase::bundled().expect("bundled dataset");
        let mut out = Vec::new();

        render_inspection(&mut out, &DatasetSummary::from_knowledge(&knowledge)).expect("render");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("Dataset: 16 questions, 8 rules, 4 strategies"));
        assert!(text.contains("- Read/Write (R): 4 questions, max score 6, 2 rules, strategy yes"));
    }
}
