mod api_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod session_config;
mod storage_config;

#[cfg(test)]
mod tests;

pub use api_config::ApiConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use session_config::SessionConfig;
pub use storage_config::StorageConfig;

const CONFIG_DIR_ENV: &str = "SD_CONFIG_DIR";
const DEFAULT_CONFIG_DIRNAME: &str = ".sd";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

// Session lifetimes
pub const DEFAULT_IDENTITY_TTL_SECS: u64 = 24 * 60 * 60;
pub const MIN_IDENTITY_TTL_SECS: u64 = 60;
pub const MAX_IDENTITY_TTL_SECS: u64 = 7 * 24 * 60 * 60;
pub const DEFAULT_PROFILE_STALE_SECS: u64 = 30 * 60;
pub const MIN_PROFILE_STALE_SECS: u64 = 1;
pub const DEFAULT_LOGIN_REDIRECT_DELAY_MS: u64 = 1000;
pub const MAX_LOGIN_REDIRECT_DELAY_MS: u64 = 10_000;

const DEFAULT_STORAGE_DIR: &str = "state";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
