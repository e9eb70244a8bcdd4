// reconview CLI - headless reconciliation view projection

mod exit_codes;
mod fetch;
mod mark;
mod project;
mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{service_exit_code, EXIT_USAGE};
use reconview_client::ServiceError;

#[derive(Parser)]
#[command(name = "reconview")]
#[command(about = "Side-by-side reconciliation views from bank and ledger data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project CSV datasets and a match list into a display view
    #[command(after_help = "\
Examples:
  reconview project bank.csv ledger.csv --matches matches.json
  reconview project bank.csv ledger.csv --matches matches.json --json
  reconview project bank.csv ledger.csv --config proj.toml --output view.json
  reconview project bank.csv ledger.csv --fail-on-unmatched")]
    Project {
        /// Bank statement CSV (header row required)
        bank: PathBuf,

        /// General ledger CSV (header row required)
        ledger: PathBuf,

        /// Match list JSON (omit for an all-unmatched view)
        #[arg(long)]
        matches: Option<PathBuf>,

        /// Projector config TOML (omit for built-in defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the projection as JSON instead of a table
        #[arg(long, conflicts_with = "output")]
        json: bool,

        /// Write the projection JSON to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit non-zero when unmatched rows remain
        #[arg(long)]
        fail_on_unmatched: bool,
    },

    /// Check a projector config without projecting anything
    Validate {
        /// Projector config TOML
        config: PathBuf,
    },

    /// Fetch a session from the reconciliation service and project it
    #[command(after_help = "\
Examples:
  reconview fetch 0d1f4e --api-base http://localhost:8000
  RECONVIEW_API_BASE=http://localhost:8000 reconview fetch 0d1f4e --json")]
    Fetch {
        /// Session id on the service
        session_id: String,

        /// Service base URL
        #[arg(long, env = "RECONVIEW_API_BASE")]
        api_base: String,

        /// Projector config TOML (omit for built-in defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the projection as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Set the status of one match on the service
    #[command(after_help = "\
Examples:
  reconview mark 0d1f4e 3 approved --api-base http://localhost:8000
  reconview mark 0d1f4e 3 rejected --api-base http://localhost:8000")]
    Mark {
        /// Session id on the service
        session_id: String,

        /// Bank row index of the match
        bank_index: usize,

        /// New status: pending, approved, rejected, or verified
        status: String,

        /// Service base URL
        #[arg(long, env = "RECONVIEW_API_BASE")]
        api_base: String,
    },
}

/// Command failure carrying its registry exit code and an optional
/// remediation hint for stderr.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn io(path: &Path, err: &std::io::Error) -> Self {
        Self {
            code: EXIT_USAGE,
            message: format!("{}: {}", path.display(), err),
            hint: None,
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            code: exit_codes::EXIT_ERROR,
            message: message.into(),
            hint: None,
        }
    }

    fn service(err: ServiceError) -> Self {
        let hint = match &err {
            ServiceError::Network(_) => {
                Some("is the reconciliation service running? check --api-base".to_string())
            }
            ServiceError::NotFound(_) => Some("list sessions on the service side".to_string()),
            _ => None,
        };
        Self {
            code: service_exit_code(&err),
            message: err.to_string(),
            hint,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Project {
            bank,
            ledger,
            matches,
            config,
            json,
            output,
            fail_on_unmatched,
        } => project::cmd_project(project::ProjectArgs {
            bank: &bank,
            ledger: &ledger,
            matches: matches.as_deref(),
            config: config.as_deref(),
            json,
            output: output.as_deref(),
            fail_on_unmatched,
        }),
        Commands::Validate { config } => project::cmd_validate(&config),
        Commands::Fetch {
            session_id,
            api_base,
            config,
            json,
        } => fetch::cmd_fetch(&session_id, &api_base, config.as_deref(), json),
        Commands::Mark {
            session_id,
            bank_index,
            status,
            api_base,
        } => mark::cmd_mark(&session_id, bank_index, &status, &api_base),
    };

    match result {
        Ok(()) => ExitCode::from(exit_codes::EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = &err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(err.code)
        }
    }
}
