//! Probe configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Top-level configuration, resolved once at startup and injected
/// into the clients and flows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Directory for test-results.json
    pub output_dir: Option<PathBuf>,

    /// reqres (unauthenticated mock API)
    pub reqres: ReqresConfig,

    /// GoRest (bearer-token API)
    pub gorest: GorestConfig,

    /// HTTP client settings
    pub http: HttpConfig,

    /// Browser automation settings
    pub browser: BrowserConfig,
}

/// reqres configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReqresConfig {
    /// Base URL for API calls and the landing page
    pub base_url: String,
}

impl Default for ReqresConfig {
    fn default() -> Self {
        Self {
            base_url: "https://reqres.in".to_string(),
        }
    }
}

/// GoRest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GorestConfig {
    /// Base URL of the GoRest API
    pub base_url: String,

    /// Bearer token; required by every write
    pub access_token: Option<String>,
}

impl Default for GorestConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gorest.co.in".to_string(),
            access_token: None,
        }
    }
}

impl GorestConfig {
    /// The token, if present and non-blank
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Browser automation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser checks at all
    pub enabled: bool,

    /// chromium, firefox or webkit
    pub browser: String,

    /// Run without a visible window
    pub headless: bool,

    /// Timeout for waiting on selectors
    pub selector_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            browser: "chromium".to_string(),
            headless: true,
            selector_timeout_ms: 10_000,
        }
    }
}

impl ProbeConfig {
    /// Load configuration from file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            config.validate()?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings that cannot work
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("reqres", &self.reqres.base_url), ("gorest", &self.gorest.base_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::InvalidConfig(format!(
                    "{name}.base_url must be an http(s) URL, got '{url}'"
                )));
            }
        }
        if self.http.timeout_secs == 0 {
            return Err(Error::InvalidConfig("http.timeout_secs must be > 0".to_string()));
        }
        match self.browser.browser.as_str() {
            "chromium" | "firefox" | "webkit" => Ok(()),
            other => Err(Error::InvalidConfig(format!("unknown browser '{other}'"))),
        }
    }

    /// Copy of this config with the token masked, for display
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.gorest.access_token.is_some() {
            config.gorest.access_token = Some("***".to_string());
        }
        config
    }
}
