//! sd - customer spending dashboard CLI
//!
//! # Examples
//!
//! ```bash
//! sd login --user-id u1 --password secret
//! sd whoami --pretty
//! sd spending --customer 7 --year 2024 --month Mar
//! ```

use sd_cli::{App, Cli, CliResult, logger};
use sd_config::Config;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<String> {
    let mut config = Config::load()?;
    if let Some(server) = cli.server {
        config.api.base_url = server;
    }
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;
    config.log_summary();

    let app = App::new(&config, cli.pretty)?;
    app.run(cli.command).await
}
