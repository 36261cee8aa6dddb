use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use convkit::AppCommand;
use convkit::core::Language;
use convkit::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Display language (pt or en)
    #[arg(short, long, global = true)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run commands interactively
    Shell,
    #[command(flatten)]
    App(AppCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => convkit::cli::setup::setup(),
        Some(Commands::Shell) => convkit::run_shell(config_path, cli.lang).await,
        Some(Commands::App(cmd)) => convkit::run_command(cmd, config_path, cli.lang).await,
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
