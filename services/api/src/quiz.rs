use crate::infra::bootstrap_cli;
use crate::render::{render_diagnosis, render_scores};
use clap::Args;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::debug;
use vark_expert::error::AppError;
use vark_expert::questionnaire::{
    build_view, DiagnosisView, QuestionnaireSession, SessionError, SessionId,
};

#[derive(Args, Debug, Default)]
pub(crate) struct QuizArgs {
    /// Print the final diagnosis as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

/// One line of respondent input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuizInput {
    Yes,
    No,
    Back,
    Reset,
    Quit,
}

impl QuizInput {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" | "ya" => Some(Self::Yes),
            "n" | "no" | "tidak" => Some(Self::No),
            "b" | "back" => Some(Self::Back),
            "r" | "reset" | "restart" => Some(Self::Reset),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub(crate) enum QuizOutcome {
    Completed(Box<DiagnosisView>),
    Quit,
}

pub(crate) fn run_quiz(args: QuizArgs, dataset: Option<PathBuf>) -> Result<(), AppError> {
    let knowledge = bootstrap_cli(dataset)?;
    let mut session = QuestionnaireSession::new(SessionId("terminal".to_string()), knowledge);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_interactive(&mut session, &mut stdin.lock(), &mut stdout.lock(), args.json)
}

/// Runs questionnaires until the respondent quits or declines a new round.
pub(crate) fn run_interactive<R: BufRead, W: Write>(
    session: &mut QuestionnaireSession,
    input: &mut R,
    out: &mut W,
    json: bool,
) -> Result<(), AppError> {
    loop {
        match ask_questions(session, input, out)? {
            QuizOutcome::Quit => {
                writeln!(out, "Questionnaire stopped; no diagnosis produced.")?;
                return Ok(());
            }
            QuizOutcome::Completed(view) => {
                if json {
                    serde_json::to_writer_pretty(&mut *out, &view)?;
                    writeln!(out)?;
                } else {
                    render_diagnosis(out, &view)?;
                }
                if let Some(completed_at) = session.completed_at() {
                    let elapsed: chrono::Duration = completed_at - session.started_at();
                    writeln!(out, "\nCompleted in {}s.", elapsed.num_seconds())?;
                }
            }
        }

        write!(out, "\nStart a new diagnosis? [y/N]: ")?;
        out.flush()?;
        match read_input(input)? {
            Some(line) if QuizInput::parse(&line) == Some(QuizInput::Yes) => session.reset(),
            _ => return Ok(()),
        }
    }
}

/// Presents questions until the session is scored or the respondent quits.
pub(crate) fn ask_questions<R: BufRead, W: Write>(
    session: &mut QuestionnaireSession,
    input: &mut R,
    out: &mut W,
) -> Result<QuizOutcome, AppError> {
    loop {
        let Some(question) = session.current_question() else {
            let diagnosis = session.diagnosis()?;
            let view = build_view(&diagnosis, session.knowledge());
            return Ok(QuizOutcome::Completed(Box::new(view)));
        };

        writeln!(
            out,
            "\nQuestion {} of {} [{}] ({} {})",
            session.current_index() + 1,
            session.total_questions(),
            question.code,
            question.category.icon(),
            question.category.label()
        )?;
        writeln!(out, "{}", question.text)?;
        if let Some(previous) = session.answers().get(&question.code) {
            writeln!(out, "(previous answer: {})", if previous { "yes" } else { "no" })?;
        }
        write!(out, "[y]es / [n]o / [b]ack / [r]eset / [q]uit: ")?;
        out.flush()?;

        let Some(line) = read_input(input)? else {
            return Ok(QuizOutcome::Quit);
        };

        match QuizInput::parse(&line) {
            Some(QuizInput::Yes) => {
                session.answer(true)?;
                render_scores(out, session.scores())?;
            }
            Some(QuizInput::No) => {
                session.answer(false)?;
                render_scores(out, session.scores())?;
            }
            Some(QuizInput::Back) => match session.back() {
                Ok(()) => {}
                Err(SessionError::AtFirstQuestion) => {
                    writeln!(out, "Already at the first question.")?;
                }
                Err(other) => return Err(other.into()),
            },
            Some(QuizInput::Reset) => {
                session.reset();
                writeln!(out, "Questionnaire restarted.")?;
            }
            Some(QuizInput::Quit) => return Ok(QuizOutcome::Quit),
            None => {
                debug!(input = line.trim(), "unrecognised quiz input");
                writeln!(out, "Please answer y or n (b = back, r = reset, q = quit).")?;
            }
        }
    }
}

/// `None` at end of input.
fn read_input<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
