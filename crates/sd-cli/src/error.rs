use error_location::ErrorLocation;
use sd_config::ConfigError;
use sd_dashboard::DashboardError;
use sd_session::SessionError;
use std::panic::Location;
use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("{source}")]
    Session {
        #[from]
        source: SessionError,
    },

    #[error("{source}")]
    Dashboard {
        #[from]
        source: DashboardError,
    },

    #[error("Error serializing output: {source}")]
    Output {
        #[from]
        source: serde_json::Error,
    },

    #[error("{message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("{message}")]
    LoginFailed { message: String },

    #[error("Not logged in; run `sd login` first")]
    NotLoggedIn,

    #[error("{message}")]
    LoadFailed { message: String },
}

impl CliError {
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CliError>;
