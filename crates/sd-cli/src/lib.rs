//! sd-cli library
//!
//! Command dispatch and text rendering behind the `sd` binary, exported for
//! tests.

pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod render;


pub use app::App;
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliResult};
