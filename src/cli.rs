//! Argument parsing, the folder prompt and the top-level run.

use crate::config::{CollisionPolicy, Config, ConfigError};
use crate::output::OutputFormatter;
use crate::sorter::{SortError, Sorter};
use crate::validator::check_directory;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What the user types at the prompt to give up.
pub const CANCEL: &str = "n";

/// Prompt shown after an unusable path.
pub const PROMPT: &str = "Enter the correct folder path or \"n\" to cancel: ";

/// Sort a folder into audio, archives, documents, images, video and others.
#[derive(Debug, Parser)]
#[command(name = "clean-folder", version)]
pub struct Cli {
    /// Folder to sort
    pub path: String,

    /// Configuration file (defaults to ./.clean-folder.toml, then
    /// ~/.config/clean-folder/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// What to do when a file with the same name is already sorted:
    /// overwrite, rename or fail
    #[arg(long, value_name = "POLICY")]
    pub on_collision: Option<CollisionPolicy>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Errors that end the program with a failure exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Error loading configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Sort(#[from] SortError),
    #[error("Error serializing report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error reading input: {0}")]
    Io(#[from] io::Error),
}

/// Asks for a folder until one passes [`check_directory`].
///
/// Returns the absolute path of the accepted folder, or `None` if the user
/// typed [`CANCEL`] or closed the input.
pub fn resolve_target<R, W>(initial: &str, input: &mut R, output: &mut W) -> io::Result<Option<PathBuf>>
where
    R: BufRead,
    W: Write,
{
    let mut candidate = initial.to_string();
    loop {
        match check_directory(Path::new(&candidate)) {
            Ok(()) => return std::path::absolute(&candidate).map(Some),
            Err(_) if candidate == CANCEL => return Ok(None),
            Err(e) => {
                writeln!(output, "\n{}\n", e)?;
                write!(output, "{}", PROMPT)?;
                output.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    return Ok(None);
                }
                candidate = line.trim_end_matches(['\r', '\n']).to_string();
            }
        }
    }
}

/// Runs the program for parsed arguments.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref())?;
    let policy = cli.on_collision.unwrap_or(config.sort.on_collision);

    let stdin = io::stdin();
    let target = resolve_target(&cli.path, &mut stdin.lock(), &mut io::stdout())?;
    let Some(target) = target else {
        log::debug!("cancelled by user");
        return Ok(());
    };

    log::debug!("sorting {} (on collision: {})", target.display(), policy);
    let sorter = Sorter::new().with_collision_policy(policy);
    // Reported as they happen; a later error may leave no report.
    let sorter = if cli.json {
        sorter.on_archive_failure(|failure| {
            log::warn!("Archive is broken: {}", failure.path.display())
        })
    } else {
        sorter.on_archive_failure(OutputFormatter::archive_failure)
    };
    let report = sorter.sort(&target)?;

    if cli.json {
        OutputFormatter::plain(&serde_json::to_string_pretty(&report)?);
    } else {
        OutputFormatter::report(&report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn prompt(initial: &str, typed: &str) -> (Option<PathBuf>, String) {
        let mut input = Cursor::new(typed.as_bytes().to_vec());
        let mut output = Vec::new();
        let target = resolve_target(initial, &mut input, &mut output).unwrap();
        (target, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_valid_path_needs_no_prompt() {
        let temp = TempDir::new().unwrap();
        let (target, output) = prompt(temp.path().to_str().unwrap(), "");
        assert_eq!(target.as_deref(), Some(temp.path()));
        assert!(output.is_empty());
    }

    #[test]
    fn test_invalid_path_reprompts_until_valid() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let typed = format!("{}\n", temp.path().display());

        let (target, output) = prompt(missing.to_str().unwrap(), &typed);

        assert_eq!(target.as_deref(), Some(temp.path()));
        assert!(output.contains("does not exist"));
        assert_eq!(output.matches(PROMPT).count(), 1);
    }

    #[test]
    fn test_cancel_at_prompt() {
        let (target, output) = prompt("/definitely/not/here", "n\n");
        assert_eq!(target, None);
        assert_eq!(output.matches(PROMPT).count(), 1);
    }

    #[test]
    fn test_end_of_input_cancels() {
        let (target, _) = prompt("/definitely/not/here", "");
        assert_eq!(target, None);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "clean-folder",
            "/tmp/in",
            "--on-collision",
            "rename",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.path, "/tmp/in");
        assert_eq!(cli.on_collision, Some(CollisionPolicy::Rename));
        assert!(cli.json);
    }

    #[test]
    fn test_cli_requires_exactly_one_path() {
        assert!(Cli::try_parse_from(["clean-folder"]).is_err());
        assert!(Cli::try_parse_from(["clean-folder", "a", "b"]).is_err());
    }
}
