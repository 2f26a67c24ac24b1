//! Configuration loading for Gatherly.
//!
//! Configuration is layered: an optional `config/default.toml` file, an
//! optional file named by `RUN_ENV` (e.g. `config/production.toml`), then
//! environment variable overrides with the `APP_` prefix and `__` as the
//! nesting separator (`APP_SERVER__PORT=8080`, `APP_AUTH__JWT_SECRET=...`).

use config::{Config, ConfigError, Environment, File};
use std::sync::Once;
use tracing::debug;

pub mod models;
pub use models::*;

static DOTENV_ONCE: Once = Once::new();

/// Load `.env` exactly once per process; later calls are no-ops.
pub fn ensure_dotenv_loaded() {
    DOTENV_ONCE.call_once(|| {
        // Missing .env files are fine; env vars may come from the host.
        let _ = dotenv::dotenv();
    });
}

/// Load the application configuration.
///
/// # Errors
///
/// Returns an error if a present config file fails to parse or if the
/// resulting configuration is missing mandatory sections.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());
    debug!("Loading configuration for RUN_ENV={}", run_env);

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    config.try_deserialize()
}
