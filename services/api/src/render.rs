use std::io::{self, Write};
use vark_expert::questionnaire::{DiagnosisView, ScoreVector, VarkStyle};

pub(crate) fn render_scores<W: Write>(out: &mut W, scores: &ScoreVector) -> io::Result<()> {
    let line = VarkStyle::ALL
        .iter()
        .map(|style| format!("{} {}: {}", style.icon(), style.label(), scores.get(*style)))
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(out, "Running scores: {line}")
}

pub(crate) fn render_diagnosis<W: Write>(out: &mut W, view: &DiagnosisView) -> io::Result<()> {
    writeln!(out, "VARK learning style diagnosis")?;

    writeln!(out, "\nFinal scores")?;
    for entry in &view.scores {
        let marker = if entry.dominant { " *" } else { "" };
        writeln!(
            out,
            "- {}: {}/{}{}",
            entry.label, entry.score, entry.max_score, marker
        )?;
    }

    writeln!(out, "\nDominant learning style")?;
    let dominant = view
        .dominant
        .iter()
        .map(|style| format!("{} {}", style.icon(), style.label()))
        .collect::<Vec<_>>()
        .join(", ");
    if view.dominant.len() == 1 {
        writeln!(out, "{dominant}")?;
    } else {
        writeln!(out, "Combination: {dominant}")?;
    }
    writeln!(out, "{}", view.headline)?;

    writeln!(out, "\nRule validation (IF-THEN)")?;
    match &view.rule_note {
        Some(note) => writeln!(out, "{note}")?,
        None => {
            for entry in &view.matched_rules {
                writeln!(out, "- {}: {}", entry.label, entry.rule_ids.join(", "))?;
            }
        }
    }

    writeln!(out, "\nRecommended study strategies")?;
    for recommendation in &view.recommendations {
        writeln!(out, "- {}: {}", recommendation.label, recommendation.strategy)?;
    }

    Ok(())
}
