use crate::commands::{run_dataset_inspect, run_diagnose, DiagnoseArgs, InspectArgs};
use crate::quiz::{run_quiz, QuizArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vark_expert::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "VARK Learning Style Expert System",
    about = "Identify a dominant VARK learning style through a weighted, rule-checked questionnaire",
    version
)]
struct Cli {
    /// Dataset CSV to load instead of VARK_DATASET_PATH or the bundled dataset
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Answer the questionnaire interactively in the terminal
    Quiz(QuizArgs),
    /// Diagnose a known set of answers without prompting
    Diagnose(DiagnoseArgs),
    /// Inspect the questionnaire dataset
    Dataset {
        #[command(subcommand)]
        command: DatasetCommand,
    },
}

#[derive(Subcommand, Debug)]
enum DatasetCommand {
    /// Print question, rule and strategy counts per learning style
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let dataset = cli.dataset;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args, dataset).await,
        Command::Quiz(args) => run_quiz(args, dataset),
        Command::Diagnose(args) => run_diagnose(args, dataset),
        Command::Dataset {
            command: DatasetCommand::Inspect(args),
        } => run_dataset_inspect(args, dataset),
    }
}
