//! `progress-note` command line entry point.
//!
//! # Responsibility
//! - Read one markdown note from a file or stdin.
//! - Print the extracted title, tasks and completion as text or JSON.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use progress_note_core::{default_log_level, init_logging, Note, NoteParser};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "progress-note", version, about = "Summarize a markdown progress note")]
struct Cli {
    /// Markdown file to read; `-` or nothing reads stdin.
    path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[arg(long, env = "PROGRESS_NOTE_LOG")]
    log_level: Option<String>,

    /// Absolute directory for rotated log files; stderr when unset.
    #[arg(long, env = "PROGRESS_NOTE_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
    init_logging(level, cli.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    let source = open_source(cli.path.as_ref())?;
    let note = NoteParser::new(source)
        .parse()
        .context("could not extract progress note")?;

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&note)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&note)?),
    }
    log::info!(
        "event=cli_done module=cli status=ok tasks={}",
        note.tasks().len()
    );
    Ok(())
}

fn open_source(path: Option<&PathBuf>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) if path.as_os_str() != OsStr::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("failed to open `{}`", path.display()))?;
            Ok(Box::new(file))
        }
        _ => Ok(Box::new(io::stdin())),
    }
}

fn render_text(note: &Note) -> String {
    let mut out = format!(
        "{}\n{}/{} tasks complete ({:.1}%)\n",
        note.title(),
        note.completed_count(),
        note.tasks().len(),
        note.percent_of_completeness()
    );
    for task in note.tasks() {
        let mark = if task.is_completed() { 'x' } else { ' ' };
        out.push_str(&format!("- [{mark}] {}\n", task.text()));
    }
    out
}
