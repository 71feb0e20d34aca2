use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use macrodash::cli::show::ShowArgs;
use macrodash::core::log::init_logging;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ShowCommand {
    /// Category to show, by slug or label. Repeat in overlay mode.
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Restrict to these instrument names
    #[arg(long = "instrument")]
    instruments: Vec<String>,

    #[arg(short, long)]
    region: Option<String>,

    /// Lookback window, e.g. 1mo, 1y, max
    #[arg(short, long)]
    period: Option<String>,

    /// Combine all given categories into one table
    #[arg(long)]
    overlay: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run the web dashboard
    Serve {
        /// Address to bind, overrides the config file
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on, overrides the config file
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print a dashboard view to the terminal
    Show(ShowCommand),
}

impl From<Commands> for macrodash::AppCommand {
    fn from(cmd: Commands) -> macrodash::AppCommand {
        match cmd {
            Commands::Serve { bind, port } => macrodash::AppCommand::Serve { bind, port },
            Commands::Show(show) => macrodash::AppCommand::Show(ShowArgs {
                categories: show.categories,
                instruments: show.instruments,
                region: show.region,
                period: show.period,
                overlay: show.overlay,
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let quiet = match cli.command {
        Some(Commands::Serve { .. }) => LevelFilter::INFO,
        _ => LevelFilter::OFF,
    };
    init_logging(cli.verbose, quiet);

    let result = match cli.command {
        Some(Commands::Setup) => macrodash::cli::setup::setup(),
        Some(cmd) => macrodash::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
