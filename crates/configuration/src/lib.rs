use std::path::Path;

// Declare the modules that make up this crate.
#[cfg(feature = "clap")]
pub mod cli;
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use cli::ServeArgs;
pub use error::ConfigError;
pub use logging::init_tracing;
pub use settings::{AnalyticsConfig, Config, DataConfig, LoggingConfig, ServerConfig};

/// Prefix of the environment variables that override file values,
/// e.g. `OVERNIGHT__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "OVERNIGHT";

/// Loads the application configuration.
///
/// This function is the primary entry point for this crate. Built-in defaults are
/// overlaid by the TOML file at `path` (if it exists) and then by `OVERNIGHT__*`
/// environment variables. The result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
