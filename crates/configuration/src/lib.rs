use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalysisConfig, ApiConfig, OutputConfig, SeriesConfig};

/// Prefix of the environment variables that override file settings,
/// e.g. `CARRY__API__FRED_KEY`.
pub const ENV_PREFIX: &str = "CARRY";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file at `path` (optional;
/// a missing file is not an error), then `CARRY__*` environment variables. The
/// result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let file = config::File::from(path).required(false);
    build(file, environment())
}

/// Parses configuration from a TOML string, with the same layering and validation.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    build(config::File::from_str(toml, config::FileFormat::Toml), environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn build<S>(file: S, env: config::Environment) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}
