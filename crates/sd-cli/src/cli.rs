use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "sd")]
#[command(about = "Customer spending dashboard")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config and SD_API_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
