use crate::demo::{
    run_crew_match, run_demo, run_timeline_layout, CrewMatchArgs, DemoArgs, TimelineLayoutArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hangar_crew::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hangar Crew Planner",
    about = "Match technicians to maintenance visits and lay out hangar timelines",
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
    /// Rank technicians and propose crews for a visit snapshot
    Crew {
        #[command(subcommand)]
        command: CrewCommand,
    },
    /// Compute day-grid geometry for a schedule
    Timeline {
        #[command(subcommand)]
        command: TimelineCommand,
    },
    /// Run an end-to-end demo over a built-in hangar dataset
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CrewCommand {
    /// Score, propose, and optionally assign crew for one visit
    Match(CrewMatchArgs),
}

#[derive(Subcommand, Debug)]
enum TimelineCommand {
    /// Lay out visits and intervals on a day grid
    Layout(TimelineLayoutArgs),
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
        Command::Crew {
            command: CrewCommand::Match(args),
        } => run_crew_match(args),
        Command::Timeline {
            command: TimelineCommand::Layout(args),
        } => run_timeline_layout(args),
        Command::Demo(args) => run_demo(args),
    }
}
