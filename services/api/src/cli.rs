use crate::server;
use crate::surveys::{
    run_delete, run_export, run_list, run_score, run_show, ExportArgs, ScoreArgs, SurveyIdArgs,
};
use clap::{Args, Parser, Subcommand};
use solar_survey::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Solar Survey",
    about = "Serve the solar suitability survey and manage collected leads",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect, remove, or export stored survey submissions
    Surveys {
        #[command(subcommand)]
        command: SurveysCommand,
    },
    /// Score an answer set without storing it
    Score(ScoreArgs),
}

#[derive(Subcommand, Debug)]
enum SurveysCommand {
    /// Print one line per stored survey
    List(StoreArgs),
    /// Print a stored survey as JSON
    Show(SurveyIdArgs),
    /// Remove a stored survey
    Delete(SurveyIdArgs),
    /// Write all stored surveys as CSV
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct StoreArgs {
    /// Override the configured survey data file
    #[arg(long)]
    pub(crate) data_path: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) store: StoreArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Surveys { command } => match command {
            SurveysCommand::List(args) => run_list(args),
            SurveysCommand::Show(args) => run_show(args),
            SurveysCommand::Delete(args) => run_delete(args),
            SurveysCommand::Export(args) => run_export(args),
        },
        Command::Score(args) => run_score(args),
    }
}
