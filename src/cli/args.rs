//! Command-line argument definitions

use clap::Args;

/// Arguments for the retrieve command
#[derive(Args, Debug)]
pub struct RetrieveArgs {
    /// Recording keys (file names) to look up
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Recording key (file name) to look up
    pub key: String,
}
