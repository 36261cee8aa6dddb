pub mod cli;
pub mod core;
pub mod providers;
pub mod session;
pub mod store;

pub use cli::AppCommand;

use crate::core::config::AppConfig;
use crate::core::i18n::Language;
use crate::session::Session;
use anyhow::Result;
use tracing::{debug, info};

/// Loads the config from `config_path`, or from the default location.
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Runs a single command and prints its output.
pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    language: Option<Language>,
) -> Result<()> {
    info!("convkit starting...");
    let config = load_config(config_path)?;
    let mut session = Session::new(config, language)?;

    let output = cli::execute(&mut session, command).await?;
    println!("{output}");
    Ok(())
}

/// Reads commands from stdin until `exit` or end of input.
pub async fn run_shell(config_path: Option<&str>, language: Option<Language>) -> Result<()> {
    info!("convkit shell starting...");
    let config = load_config(config_path)?;
    let mut session = Session::new(config, language)?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    cli::shell::run_shell(&mut session, stdin, &mut stdout).await
}
