use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// A provider key is needed by the command but was never set.
    #[error("{key} is not set (set it in the config file or as {env_var})")]
    MissingCredential {
        key: &'static str,
        env_var: &'static str,
    },
}
