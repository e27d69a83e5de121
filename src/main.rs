//! ncpgen CLI - pre-build and post-build step for ROM projects.
//!
//! ```text
//! ncpgen 0 rom/project.xml   # before linking: write header.bin, arm9ovt.bin, arm7ovt.bin
//! ncpgen 1 rom/project.xml   # after linking: restore overlay tables, remove artifacts
//! ```
//!
//! Log verbosity is controlled with `RUST_LOG` (default `warn`).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use ncpgen::prelude::*;

const USAGE: &str = "Invalid argument count, must be exactly 2.

Syntax:
ncpgen MODE XML_PATH

MODE = 0 for pre-build, 1 for post-build
XML_PATH = The path of the ROM XML project";

/// ncpgen - transcode a ROM project's header and overlay tables
#[derive(Parser)]
#[command(name = "ncpgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 0 for pre-build, 1 for post-build
    #[arg(allow_hyphen_values = true)]
    mode: String,

    /// The path of the ROM XML project
    project: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stdout)
        .with_target(false)
        .without_time()
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
    };

    match run_cli(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: &Cli) -> Result<()> {
    let direction = Direction::from_mode(&cli.mode);
    let layout = ProjectLayout::new(&cli.project)
        .with_context(|| format!("Failed to resolve \"{}\"", cli.project.display()))?;

    let action = match direction {
        Direction::PreBuild => "Pre-build",
        Direction::PostBuild => "Post-build",
    };
    run(direction, &layout).with_context(|| format!("{} failed", action))?;

    Ok(())
}
