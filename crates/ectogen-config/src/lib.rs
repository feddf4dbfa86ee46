pub mod config;
pub mod error;
pub mod repo;

pub use config::{CONFIG_FILE, EctogenConfig, default_app};
pub use error::ConfigError;
pub use repo::RepoConfig;
