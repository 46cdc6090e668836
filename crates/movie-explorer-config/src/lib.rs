pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{ApiConfig, Config, HistoryConfig, LoggingConfig, DEFAULT_API_BASE_URL, DEFAULT_IMAGE_BASE_URL, HISTORY_CAP_RANGE};
pub use credentials::{mask_secret, CredentialStore};
pub use paths::{home_override, PathManager};
