//! rawkey - print every byte the terminal sends, press q to quit

use std::io::{self, IsTerminal};
use std::os::fd::AsFd;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use rawkey::{config::Config, logging, Echo, RawModeGuard, RawOptions, TtyReader};
use tracing::info;

#[derive(Parser)]
#[command(name = "rawkey")]
#[command(about = "Put the terminal in raw mode and print each byte read - press q to quit")]
#[command(version)]
struct Cli {
    /// Append logs to this file
    #[arg(long, env = "RAWKEY_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    /// Override config file path
    #[arg(long, short = 'c', env = "RAWKEY_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Echo bytes until q is pressed (default)
    Run,

    /// Show current config
    Config,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), rawkey::Error> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path);
    if let Some(log_file) = cli.log_file {
        config.log_file = Some(log_file);
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => echo(&config),
        Commands::Config => {
            println!("Config file: {}", config_path.display());
            println!();
            match &config.log_file {
                Some(path) => println!("log_file: {}", path.display()),
                None => println!("log_file: (none)"),
            }
            Ok(())
        }
    }
}

fn echo(config: &Config) -> Result<(), rawkey::Error> {
    logging::init(config.log_file.as_deref())?;

    let stdin = io::stdin();
    info!(tty = stdin.is_terminal(), "starting");

    // Restored on every return path below
    let guard = RawModeGuard::enter(stdin.as_fd(), RawOptions::default())?;

    let stdout = io::stdout();
    let mut echo = Echo::new(TtyReader::new(stdin.as_fd())?, stdout.lock());
    let count = echo.run()?;
    drop(echo);
    drop(guard);

    info!(count, "quit key pressed");
    Ok(())
}
