//! CLI module for the cutlist client
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// Cutlist retrieval client
///
/// Looks up the cutlists published for a recording on a cutlist server
/// and loads the best rated one that is consistent.
#[derive(Parser, Debug)]
#[command(name = "cutlist")]
#[command(about = "Retrieve the best rated cutlist for a recording")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file (defaults to cutlist.toml when present)
    #[arg(long, global = true, env = "CUTLIST_CONFIG")]
    pub config: Option<String>,

    /// Base URL of the cutlist server
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Retrieve the best consistent cutlist for one or more recordings
    Retrieve(args::RetrieveArgs),
    /// Check whether any cutlist is published for a recording
    Check(args::CheckArgs),
}
