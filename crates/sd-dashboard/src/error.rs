use error_location::ErrorLocation;
use sd_client::ClientError;
use sd_core::CoreError;
use std::panic::Location;
use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("API error: {source} {location}")]
    Client {
        #[source]
        source: ClientError,
        location: ErrorLocation,
    },

    #[error("Invalid spending data: {source} {location}")]
    Data {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },
}

impl From<ClientError> for DashboardError {
    #[track_caller]
    fn from(source: ClientError) -> Self {
        Self::Client {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for DashboardError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Data {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, DashboardError>;
