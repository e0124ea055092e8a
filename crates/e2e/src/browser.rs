//! Browser automation behind a small driver seam
//!
//! Checks talk to a [`BrowserDriver`]; [`PlaywrightDriver`] is the real
//! implementation and drives a headless browser through generated Node
//! scripts, one process per call.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command as TokioCommand;
use tracing::{debug, info};

use restprobe_common::BrowserConfig;

use crate::error::{E2eError, E2eResult};

/// What a check needs from a browser
#[async_trait]
pub trait BrowserDriver: Send {
    /// Open `url`
    async fn navigate(&mut self, url: &str) -> E2eResult<()>;

    /// Visible text of the first element matching a CSS selector
    async fn find_text(&mut self, selector: &str) -> E2eResult<String>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(E2eError::Configuration(format!("unknown browser '{other}'"))),
        }
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub browser: Browser,
    pub headless: bool,
    pub selector_timeout_ms: u64,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Directory whose `node_modules` provides `playwright`
    pub project_dir: PathBuf,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            headless: true,
            selector_timeout_ms: 10_000,
            viewport_width: 1280,
            viewport_height: 720,
            project_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl TryFrom<&BrowserConfig> for PlaywrightConfig {
    type Error = E2eError;

    fn try_from(config: &BrowserConfig) -> E2eResult<Self> {
        Ok(Self {
            browser: config.browser.parse()?,
            headless: config.headless,
            selector_timeout_ms: config.selector_timeout_ms,
            ..Default::default()
        })
    }
}

/// Line the generated scripts print on stdout
#[derive(Debug, Deserialize)]
struct ScriptOutput {
    success: bool,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Playwright-backed driver.
///
/// Each call runs a fresh browser, so `navigate` only checks that the page
/// loads and remembers the URL for the following `find_text` calls.
pub struct PlaywrightDriver {
    config: PlaywrightConfig,
    current_url: Option<String>,
}

impl PlaywrightDriver {
    /// Create a new driver; fails when Playwright is not installed
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        Self::check_playwright_installed(&config.project_dir)?;
        Ok(Self::unchecked(config))
    }

    fn unchecked(config: PlaywrightConfig) -> Self {
        Self {
            config,
            current_url: None,
        }
    }

    /// Check if Playwright is installed
    fn check_playwright_installed(project_dir: &Path) -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .current_dir(project_dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// Build a script that opens `url` and, with a selector, prints that element's text
    pub fn build_script(&self, url: &str, selector: Option<&str>) -> E2eResult<String> {
        let url = serde_json::to_string(url)?;
        let body = match selector {
            Some(selector) => format!(
                r#"    const locator = page.locator({selector}).first();
    await locator.waitFor({{ state: 'visible', timeout: {timeout} }});
    const text = await locator.innerText();
    console.log(JSON.stringify({{ success: true, text }}));"#,
                selector = serde_json::to_string(selector)?,
                timeout = self.config.selector_timeout_ms,
            ),
            None => "    console.log(JSON.stringify({ success: true }));".to_string(),
        };

        Ok(format!(
            r#"
const {{ chromium, firefox, webkit }} = require(
  require.resolve('playwright', {{ paths: [{project_dir}, process.cwd()] }})
);

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();

  try {{
    await page.goto({url});
{body}
  }} catch (error) {{
    console.log(JSON.stringify({{ success: false, error: error.message }}));
    process.exitCode = 1;
  }} finally {{
    await browser.close();
  }}
}})();
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            project_dir = serde_json::to_string(&self.config.project_dir.to_string_lossy())?,
        ))
    }

    /// `node <script>` run from the project directory so its modules resolve
    fn node_command(&self, script_path: &Path) -> TokioCommand {
        let mut command = TokioCommand::new("node");
        command.arg(script_path).current_dir(&self.config.project_dir);
        command
    }

    /// Execute a script via node and return its parsed output line
    async fn run_script(&self, script: &str) -> E2eResult<ScriptOutput> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("probe.js");
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let output = self.node_command(&script_path).output().await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let parsed = parse_script_output(&stdout);

        match parsed {
            Some(out) if out.success && output.status.success() => Ok(out),
            Some(out) => Err(E2eError::Playwright(
                out.error.unwrap_or_else(|| "script reported failure".to_string()),
            )),
            None => Err(E2eError::Playwright(format!(
                "Script failed:\nstdout: {}\nstderr: {}",
                stdout,
                String::from_utf8_lossy(&output.stderr)
            ))),
        }
    }
}

/// Last JSON line on stdout; earlier lines may be page console noise
fn parse_script_output(stdout: &str) -> Option<ScriptOutput> {
    stdout
        .lines()
        .rev()
        .find_map(|line| serde_json::from_str::<ScriptOutput>(line.trim()).ok())
}

#[async_trait]
impl BrowserDriver for PlaywrightDriver {
    async fn navigate(&mut self, url: &str) -> E2eResult<()> {
        let script = self.build_script(url, None)?;
        self.run_script(&script).await?;
        self.current_url = Some(url.to_string());
        Ok(())
    }

    async fn find_text(&mut self, selector: &str) -> E2eResult<String> {
        let url = self
            .current_url
            .clone()
            .ok_or_else(|| E2eError::Playwright("find_text called before navigate".to_string()))?;

        let script = self.build_script(&url, Some(selector))?;
        let out = self.run_script(&script).await?;
        out.text
            .ok_or_else(|| E2eError::Playwright(format!("no text returned for '{selector}'")))
    }
}

/// Landing-page header expectation
#[derive(Debug, Clone)]
pub struct HomePageCheck {
    pub url: String,
    pub selector: String,
    pub expected: String,
}

impl HomePageCheck {
    /// The reqres landing page tagline
    pub fn reqres(base_url: &str) -> Self {
        Self {
            url: base_url.to_string(),
            selector: "h2.tagline".to_string(),
            expected: "Test your front-end against a real API".to_string(),
        }
    }

    /// Navigate and compare the header text; returns the text found
    pub async fn verify(&self, driver: &mut dyn BrowserDriver) -> E2eResult<String> {
        driver.navigate(&self.url).await?;
        let header_text = driver.find_text(&self.selector).await?;
        info!("Header Text: {}", header_text);

        if header_text.trim() != self.expected {
            return Err(E2eError::AssertionFailed(format!(
                "header '{}' is '{}', expected '{}'",
                self.selector,
                header_text.trim(),
                self.expected
            )));
        }
        Ok(header_text)
    }
}
