//! Cortex Edit CLI - apply or preview edit batches from the command line.
//!
//! The engine itself never writes; this front end is the caller that decides
//! whether to print the patch or persist the result (`--write`).

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing::info;

use cortex_edit::{
    Edit, EditConfig, EditEngine, EditError, ToolUse, build_preview, resolve_path,
};

/// Exit code for I/O, configuration and input errors.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code for a batch the engine rejected (as opposed to an I/O or usage failure).
pub const EXIT_REJECTED: u8 = 3;

/// Cortex edit engine
#[derive(Debug, Parser)]
#[command(name = "cortex-edit")]
#[command(about = "Apply batched search/replace edits to a file")]
#[command(version)]
pub struct Cli {
    /// Log level
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply an edit batch to a file and print the resulting patch.
    Apply(ApplyArgs),
    /// Show what a tool call would change, as JSON.
    Preview(PreviewArgs),
}

/// Options shared by every subcommand that runs the engine.
#[derive(Debug, clap::Args)]
pub struct EngineArgs {
    /// Base directory for relative paths (default: current directory)
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Configuration file (.toml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct ApplyArgs {
    /// File to edit, absolute or relative to --cwd
    pub file: String,

    /// Edit batch: inline JSON, a path to a JSON file, or `-` for stdin
    #[arg(short, long)]
    pub edits: String,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the updated content back to the file
    #[arg(long)]
    pub write: bool,
}

#[derive(Debug, clap::Args)]
pub struct PreviewArgs {
    /// Tool call: inline JSON, a path to a JSON file, or `-` for stdin
    #[arg(short, long)]
    pub tool_use: String,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Unified diff
    Text,
    /// `{"updatedContent", "patch"}` object
    Json,
}

/// Either a bare array of edits or an object wrapping one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EditBatch {
    Bare(Vec<Edit>),
    Wrapped { edits: Vec<Edit> },
}

impl EditBatch {
    fn into_edits(self) -> Vec<Edit> {
        match self {
            Self::Bare(edits) | Self::Wrapped { edits } => edits,
        }
    }
}

impl EngineArgs {
    fn base_dir(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir().context("Failed to determine current directory"),
        }
    }

    fn load_config(&self) -> Result<EditConfig> {
        let config = match &self.config {
            Some(path) => EditConfig::load(path)?.with_overrides(|var| std::env::var(var).ok())?,
            None => EditConfig::from_env()?,
        };
        Ok(config)
    }
}

/// Run a parsed command, writing its report to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Command::Apply(args) => run_apply(args, out),
        Command::Preview(args) => run_preview(args, out),
    }
}

fn run_apply(args: ApplyArgs, out: &mut impl Write) -> Result<()> {
    let base_dir = args.engine.base_dir()?;
    let config = args.engine.load_config()?;
    let edits = serde_json::from_str::<EditBatch>(&read_input(&args.edits)?)
        .context("Invalid edit batch")?
        .into_edits();

    let engine = EditEngine::from_config(config);
    let result = engine.apply_edits(&base_dir, &args.file, &edits)?;

    match args.format {
        OutputFormat::Text => write!(out, "{}", result.patch)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
    }

    if args.write {
        let path = resolve_path(&base_dir, &args.file);
        persist(&path, &result.updated_content)?;
        info!(
            "Wrote {} (+{} -{})",
            path.display(),
            result.patch.lines_added(),
            result.patch.lines_removed()
        );
    }

    Ok(())
}

fn run_preview(args: PreviewArgs, out: &mut impl Write) -> Result<()> {
    let base_dir = args.engine.base_dir()?;
    let config = args.engine.load_config()?;
    let tool_use: ToolUse =
        serde_json::from_str(&read_input(&args.tool_use)?).context("Invalid tool use")?;

    let engine = EditEngine::from_config(config);
    let preview = build_preview(&engine, &base_dir, &tool_use)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&preview)?)?;
    Ok(())
}

/// Read an argument that is `-` for stdin, an existing file, or inline JSON.
fn read_input(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }

    let trimmed = arg.trim_start();
    let looks_inline = trimmed.starts_with('[') || trimmed.starts_with('{');
    if looks_inline && !Path::new(arg).is_file() {
        return Ok(arg.to_string());
    }

    fs::read_to_string(arg).with_context(|| format!("Failed to read {arg}"))
}

fn persist(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Map a failure to the process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<EditError>() {
        Some(e) if e.is_batch_rejection() => EXIT_REJECTED,
        _ => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_apply() {
        let cli = parse(&[
            "cortex-edit",
            "apply",
            "a.txt",
            "--edits",
            "[]",
            "--format",
            "json",
            "--write",
        ]);
        let Command::Apply(args) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(args.file, "a.txt");
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.write);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_edit_batch_shapes() {
        let bare: EditBatch =
            serde_json::from_str(r#"[{"old_string": "a", "new_string": "b"}]"#).unwrap();
        assert_eq!(bare.into_edits(), vec![Edit::new("a", "b")]);

        let wrapped: EditBatch =
            serde_json::from_str(r#"{"edits": [{"old_string": "a", "new_string": "b"}]}"#)
                .unwrap();
        assert_eq!(wrapped.into_edits(), vec![Edit::new("a", "b")]);
    }

    #[test]
    fn test_read_input_inline_and_file() {
        assert_eq!(read_input(" [1]").unwrap(), " [1]");

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("edits.json");
        fs::write(&path, "[]").unwrap();
        assert_eq!(read_input(path.to_str().unwrap()).unwrap(), "[]");

        assert!(read_input(temp.path().join("missing.json").to_str().unwrap()).is_err());
    }

    #[test]
    fn test_run_apply_text() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "one\ntwo\n").unwrap();
        let cwd = temp.path().to_str().unwrap();

        let cli = parse(&[
            "cortex-edit",
            "apply",
            "a.txt",
            "--cwd",
            cwd,
            "--edits",
            r#"[{"old_string": "two", "new_string": "2"}]"#,
        ]);
        let mut out = Vec::new();
        run(cli, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "--- a.txt\n+++ a.txt\n@@ -1,2 +1,2 @@\n one\n-two\n+2\n"
        );
        assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_run_apply_write_creates_file() {
        let temp = TempDir::new().unwrap();
        let cwd = temp.path().to_str().unwrap();

        let cli = parse(&[
            "cortex-edit",
            "apply",
            "nested/new.txt",
            "--cwd",
            cwd,
            "--edits",
            r#"[{"old_string": "", "new_string": "hello\n"}]"#,
            "--write",
        ]);
        run(cli, &mut Vec::new()).unwrap();

        let written = fs::read_to_string(temp.path().join("nested/new.txt")).unwrap();
        assert_eq!(written, "hello\n");
    }

    #[test]
    fn test_rejection_exit_code() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "A\nB\n").unwrap();
        let cwd = temp.path().to_str().unwrap();

        let cli = parse(&[
            "cortex-edit",
            "apply",
            "a.txt",
            "--cwd",
            cwd,
            "--edits",
            r#"[{"old_string": "A", "new_string": "X"}, {"old_string": "X", "new_string": "Y"}]"#,
        ]);
        let err = run(cli, &mut Vec::new()).unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_REJECTED);

        let missing = anyhow::Error::from(EditError::not_found("/nope"));
        assert_eq!(exit_code_for(&missing), EXIT_FAILURE);
    }
}
