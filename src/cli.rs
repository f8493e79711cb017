// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The tool has a single purpose, so there are no subcommands - just the
// file to check and a few flags.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "mdcheck",
    version,
    about = "Validates every link in a Markdown document",
    long_about = "mdcheck extracts every hyperlink from a Markdown file and verifies that it \
                  resolves: in-document anchors against the file's own headings, local paths \
                  against the filesystem (anchors included, one hop), and remote URLs over HTTP. \
                  The exit code is the number of broken links, which makes it usable as a docs \
                  CI gate."
)]
pub struct Cli {
    /// Path to the Markdown file to check
    pub file: PathBuf,

    /// Also print passing and skipped links (failures always print)
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit the per-link results as JSON instead of status lines
    #[arg(long)]
    pub json: bool,

    /// Exclusion config file (default: linkcheck.yaml next to FILE)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
