// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the exclusion config (sibling linkcheck.yaml unless overridden)
// 3. Install the Ctrl-C watcher that requests a cooperative stop
// 4. Run the validator over the input file
// 5. Exit with the broken-link count (0 = all links resolve)
//
// Nothing below run() is allowed to crash the process: unexpected errors
// are caught here, printed with the input file named, and folded into a
// defined exit status.
// =============================================================================

mod checker;
mod cli;
mod document;
mod exclude;
mod validator;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use checker::HttpChecker;
use cli::Cli;
use exclude::ExclusionConfig;
use validator::Validator;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exit_code = match run(&cli).await {
        Ok(broken) => {
            // The count is the contract, but the Unix exit status is 8 bits;
            // anything past 255 would wrap around to a false success
            broken.min(255) as i32
        }
        Err(e) => {
            eprintln!("Error checking {}: {:#}", cli.file.display(), e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: &Cli) -> Result<usize> {
    // The config conventionally sits next to the file being checked; a
    // missing file just means no exclusions
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => cli
            .file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(exclude::CONFIG_FILE_NAME),
    };
    let exclusions = ExclusionConfig::load(&config_path);

    // A Ctrl-C sets this flag; the validator checks it between links and
    // finishes early with the tally accumulated so far
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = interrupted.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                flag.store(true, Ordering::SeqCst);
            }
        });
    }

    let mut validator = Validator::new(
        HttpChecker::new(),
        exclusions,
        cli.verbose,
        cli.json,
        interrupted,
    );
    let broken = validator.run(&cli.file).await;

    if cli.json {
        let report = serde_json::to_string_pretty(validator.results())
            .context("could not serialize results")?;
        println!("{}", report);
    }

    Ok(broken)
}
