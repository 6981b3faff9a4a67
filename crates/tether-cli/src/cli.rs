//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Load a workflow snapshot and drive its jobs to completion.
#[derive(Debug, Parser)]
#[command(name = "tether", version, about)]
pub struct CliArgs {
    /// JSON file holding an array of job records.
    #[arg(short, long)]
    pub workflow: PathBuf,

    /// Longest predecessor chain accepted, counting the job itself.
    #[arg(long, default_value_t = tether_core::config::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Fail fast on dependency cycles instead of waiting for the depth limit.
    #[arg(long)]
    pub cycle_check: bool,

    /// Only report which jobs could start now; run nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Overrides TETHER_LOG.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}
