//! Workspace tasks: dump the options schema, check preset files.
//!
//! Run with `cargo xtask <task>`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use vantage::options::Options;

#[derive(Parser)]
#[command(about = "Build tasks for the vantage workspace")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Write the options JSON schema (stdout when no file is given).
    Schema {
        /// Output file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Load and validate TOML presets.
    Check {
        /// Preset files to check.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn schema(out: Option<PathBuf>) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(&Options::json_schema())?;
    match out {
        Some(path) => std::fs::write(&path, text)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{text}"),
    }
    Ok(())
}

fn check(files: &[PathBuf]) -> anyhow::Result<()> {
    let mut failed = 0usize;
    for path in files {
        if let Err(e) = Options::load(path) {
            eprintln!("{}: {e}", path.display());
            failed += 1;
        }
    }
    anyhow::ensure!(failed == 0, "{failed} of {} preset(s) invalid", files.len());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().task {
        Task::Schema { out } => schema(out),
        Task::Check { files } => check(&files),
    }
}
