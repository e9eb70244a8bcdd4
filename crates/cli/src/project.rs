//! `reconview project` and `reconview validate`.

use std::fs;
use std::path::Path;

use reconview_projector::{load_rows, project, MatchCandidate, ProjectorConfig};

use crate::exit_codes::{EXIT_PROJECT_CONFIG, EXIT_PROJECT_PARSE, EXIT_PROJECT_UNMATCHED, EXIT_USAGE};
use crate::render;
use crate::CliError;

pub struct ProjectArgs<'a> {
    pub bank: &'a Path,
    pub ledger: &'a Path,
    pub matches: Option<&'a Path>,
    pub config: Option<&'a Path>,
    pub json: bool,
    pub output: Option<&'a Path>,
    pub fail_on_unmatched: bool,
}

pub fn cmd_project(args: ProjectArgs) -> Result<(), CliError> {
    if args.json && args.output.is_some() {
        return Err(CliError {
            code: EXIT_USAGE,
            message: "--json and --output cannot be combined".to_string(),
            hint: Some("--output always writes JSON; drop one of the flags".to_string()),
        });
    }

    let config = load_config(args.config)?;

    let bank_rows = load_rows(&read_input(args.bank)?).map_err(|e| CliError {
        code: EXIT_PROJECT_PARSE,
        message: format!("{}: {}", args.bank.display(), e),
        hint: Some("input must be CSV with a header row".to_string()),
    })?;
    let gl_rows = load_rows(&read_input(args.ledger)?).map_err(|e| CliError {
        code: EXIT_PROJECT_PARSE,
        message: format!("{}: {}", args.ledger.display(), e),
        hint: Some("input must be CSV with a header row".to_string()),
    })?;

    let matches: Vec<MatchCandidate> = match args.matches {
        Some(path) => serde_json::from_str(&read_input(path)?).map_err(|e| CliError {
            code: EXIT_PROJECT_PARSE,
            message: format!("{}: {}", path.display(), e),
            hint: Some("expected a JSON array of match records".to_string()),
        })?,
        None => Vec::new(),
    };

    let projection = project(&bank_rows, &gl_rows, &matches, &config);

    if let Some(path) = args.output {
        let json = serde_json::to_string_pretty(&projection)
            .map_err(|e| CliError::internal(e.to_string()))?;
        fs::write(path, json).map_err(|e| CliError::io(path, &e))?;
        eprintln!("wrote {}", path.display());
    } else if args.json {
        let json = serde_json::to_string_pretty(&projection)
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", json);
    } else {
        print!("{}", render::render(&projection));
    }

    eprintln!("{}", render::summary_line(&projection.summary));

    let unmatched = projection.summary.unmatched_bank + projection.summary.unmatched_gl;
    if args.fail_on_unmatched && unmatched > 0 {
        return Err(CliError {
            code: EXIT_PROJECT_UNMATCHED,
            message: format!("{} unmatched rows remain", unmatched),
            hint: None,
        });
    }
    Ok(())
}

pub fn cmd_validate(path: &Path) -> Result<(), CliError> {
    let config = load_config(Some(path))?;
    eprintln!(
        "{} OK: thresholds low={} high={}, {} date columns, {} date formats",
        path.display(),
        config.thresholds.low,
        config.thresholds.high,
        config.dates.columns.len(),
        config.dates.formats.len(),
    );
    Ok(())
}

/// Shared by `project`, `validate`, and `fetch`. No path means
/// built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<ProjectorConfig, CliError> {
    let Some(path) = path else {
        return Ok(ProjectorConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| CliError::io(path, &e))?;
    ProjectorConfig::from_toml(&text).map_err(|e| CliError {
        code: EXIT_PROJECT_CONFIG,
        message: format!("{}: {}", path.display(), e),
        hint: Some("see [thresholds] and [dates] sections".to_string()),
    })
}

fn read_input(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::io(path, &e))
}
