use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("repository '{0}' is not configured")]
    UnknownRepo(String),
    #[error("repository '{0}' has neither url nor urlEnv")]
    MissingUrl(String),
    #[error("repository '{repo}': environment variable {var} is not set")]
    MissingEnv { repo: String, var: String },
}
