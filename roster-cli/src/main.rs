use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use roster_core::{LoggingConfig, Roster, RosterConfig};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use tracing::{error, info};

mod display;
mod input;
mod session;

use input::{EditorPrompt, NoPrompt};
use session::Session;

#[derive(Parser, Debug)]
#[command(name = "roster-cli")]
#[command(about = "Roster CLI - student records with flat-file persistence", long_about = None)]
#[command(version)]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data file (overrides storage.path from the configuration)
    #[arg(short = 'f', long)]
    data_file: Option<PathBuf>,

    /// Command to execute (if not in interactive mode)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RosterConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => RosterConfig::default(),
    };
    if let Some(path) = args.data_file {
        config.storage.path = path;
    }

    init_tracing(&config.logging);

    let storage = config.to_storage_config();
    let roster = Roster::open(storage.clone())
        .with_context(|| format!("Failed to open roster at {:?}", storage.path))?;
    let mut session = Session::new(roster);

    // Check if running in command mode or interactive mode
    if !args.command.is_empty() {
        let cmd = &args.command[0];
        let cmd_args: Vec<String> = args.command[1..].to_vec();

        match session.execute_command(cmd, &cmd_args, &mut NoPrompt) {
            Ok(output) => {
                info!("{}", output);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "{}", format!("Error: {}", e).red());
                std::process::exit(1);
            }
        }
    } else {
        run_interactive(session)
    }
}

fn init_tracing(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false);

    if logging.is_json() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_interactive(mut session: Session) -> Result<()> {
    info!(
        "{}",
        format!("Roster CLI v{}", env!("CARGO_PKG_VERSION"))
            .bold()
            .cyan()
    );
    info!(
        "{} students loaded from {:?}",
        session.roster().len(),
        session.roster().path()
    );
    info!("Type {} for available commands\n", "HELP".bold());

    let mut rl = DefaultEditor::new()?;

    loop {
        let prompt = format!("{}> ", "roster".green());
        let readline = rl.readline(&prompt);

        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                rl.add_history_entry(&line)?;

                let parts = match input::split_args(&line) {
                    Ok(parts) if !parts.is_empty() => parts,
                    Ok(_) => continue,
                    Err(e) => {
                        error!(error = %e, "{}", format!("Error: {}", e).red());
                        continue;
                    }
                };

                let cmd = &parts[0];
                let args = &parts[1..];

                if matches!(cmd.to_uppercase().as_str(), "QUIT" | "EXIT" | "6") {
                    info!("Exiting...");
                    break;
                }

                let mut prompt = EditorPrompt::new(&mut rl);
                match session.execute_command(cmd, args, &mut prompt) {
                    Ok(output) => info!("{}", output),
                    Err(e) => {
                        error!(error = %e, "{}", format!("Error: {}", e).red());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                info!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                info!("Exiting...");
                break;
            }
            Err(err) => {
                error!(error = ?err, "Readline error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
