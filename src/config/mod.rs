// Configuration module entry point
// Loads the immutable application configuration at process start

mod types;

use std::net::SocketAddr;

pub use types::{AppConfig, Config, LoggingConfig, ServerConfig};

impl Config {
    /// Load configuration from the default "config.toml" in the working
    /// directory, if present.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension).
    ///
    /// Precedence, lowest to highest: built-in defaults, the optional config
    /// file, `SERVER_`-prefixed environment keys, then the container
    /// conventions `PORT` and `APP_ENV`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("app.environment", "development")?
            .set_default("logging.access_log", true)?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid listen address: {e}"))
    }
}
