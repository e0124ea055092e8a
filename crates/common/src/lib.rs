//! restprobe common library
//!
//! Wire types for the reqres and GoRest user APIs, plus the configuration
//! shared by the check runner and the CLI.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{BrowserConfig, GorestConfig, HttpConfig, ProbeConfig, ReqresConfig};
pub use error::{Error, Result};
pub use types::*;

/// Environment variable holding the GoRest bearer token
pub const ACCESS_TOKEN_ENV: &str = "ACCESS_TOKEN";

/// Default config file location
pub fn default_config_path() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".restprobe")
        .join("config.toml")
}

/// Home directory helper
mod dirs {
    pub fn home_dir() -> Option<std::path::PathBuf> {
        std::env::var_os("HOME").map(std::path::PathBuf::from)
    }
}
