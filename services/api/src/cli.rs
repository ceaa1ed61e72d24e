use crate::demo::{
    run_demo, run_roster_show, run_score_compute, DemoArgs, RosterShowArgs, ScoreComputeArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fieldscore::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Station Scorecard Service",
    about = "Score field engineer station inspections and serve the monthly scorecard API",
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
    /// Score visit facts from the command line
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
    /// Inspect the station roster the service would load
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },
    /// Run an end-to-end CLI demo covering roster lookup and monthly scoring
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Compute a monthly scorecard from an explicit quota, plan, and facts
    Compute(ScoreComputeArgs),
}

#[derive(Subcommand, Debug)]
enum RosterCommand {
    /// List the companies and station quotas in the roster CSV
    Show(RosterShowArgs),
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
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score {
            command: ScoreCommand::Compute(args),
        } => run_score_compute(args),
        Command::Roster {
            command: RosterCommand::Show(args),
        } => run_roster_show(args),
        Command::Demo(args) => run_demo(args),
    }
}
