use amascut_cli::{commands, logging, readline};
use clap::{Parser, Subcommand};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Held for the process lifetime so buffered log lines are flushed
    let _log_guard = logging::init();

    let cli = Cli::parse();
    if let Some(command) = &cli.command {
        execute(command).await?;
        return Ok(());
    }

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line).await {
            Ok(true) => break,
            Ok(false) => {}
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Tombs of Amascut raid helper replay tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines recording of host events
    Replay {
        #[arg(short, long)]
        path: String,
        /// TOML config file; defaults to the persisted config
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Print the active configuration
    Config {
        #[arg(short, long)]
        config: Option<String>,
        /// Store the printed configuration as the persisted config
        #[arg(long)]
        save: bool,
    },
    Exit,
}

/// Returns true when the caller should quit.
async fn execute(command: &Commands) -> Result<bool, String> {
    match command {
        Commands::Replay { path, config } => commands::replay(path, config.as_deref()).await?,
        Commands::Config { config, save } => commands::show_config(config.as_deref(), *save)?,
        Commands::Exit => {
            commands::exit();
            return Ok(true);
        }
    }
    Ok(false)
}

async fn respond(line: &str) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "amascut".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(command) => execute(command).await,
        None => Ok(false),
    }
}
