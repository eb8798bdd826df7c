//! Command-line argument definitions for the Stackplot CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Inputs come either from a project file or from explicit
//! data and reference lists; the remaining arguments select the output path,
//! configuration file and logging verbosity.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the Stackplot overlay tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Project file (JSON) listing data files, reference files and directives
    #[arg(short, long, conflicts_with_all = ["data", "refs"])]
    pub project: Option<PathBuf>,

    /// Data files, stacked top to bottom in the order given
    #[arg(short, long, num_args = 1..)]
    pub data: Vec<PathBuf>,

    /// Reference pattern files
    #[arg(short, long = "ref", num_args = 1..)]
    pub refs: Vec<PathBuf>,

    /// Text file with `key = value` plot directives
    ///
    /// Replaces the directives stored in a project file.
    #[arg(long)]
    pub directives: Option<PathBuf>,

    /// Output file; the extension selects the format (`.svg` or `.png`)
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for reference marker colors
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
