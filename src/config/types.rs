// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
///
/// Read once at process start and shared immutably with every handler.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker thread count; runtime default (CPU cores) when unset
    pub workers: Option<usize>,
}

/// Application identity configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Environment label reported by the info endpoint
    pub environment: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}
