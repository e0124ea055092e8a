//! Runner that executes the named checks and collects their results

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use restprobe_common::{BrowserConfig, ProbeConfig};

use crate::browser::{BrowserDriver, HomePageCheck, PlaywrightConfig, PlaywrightDriver};
use crate::combined::front_end_and_api;
use crate::error::{E2eError, E2eResult};
use crate::reqres::ReqresChecks;
use crate::users::UserFlow;

/// Every check restprobe knows, in execution order.
///
/// The GoRest checks share one [`UserFlow`] per runner, so update and delete
/// act on the user the create check made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Check {
    ReqresListUsers,
    ReqresSingleUser,
    ReqresUserNotFound,
    ReqresCreateUser,
    GorestCreateUser,
    GorestUpdateUser,
    GorestDeleteUser,
    BrowserHomePage,
    CombinedFrontEndAndApi,
}

impl Check {
    pub const ALL: [Check; 9] = [
        Check::ReqresListUsers,
        Check::ReqresSingleUser,
        Check::ReqresUserNotFound,
        Check::ReqresCreateUser,
        Check::GorestCreateUser,
        Check::GorestUpdateUser,
        Check::GorestDeleteUser,
        Check::BrowserHomePage,
        Check::CombinedFrontEndAndApi,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Check::ReqresListUsers => "reqres::list_users",
            Check::ReqresSingleUser => "reqres::single_user",
            Check::ReqresUserNotFound => "reqres::single_user_not_found",
            Check::ReqresCreateUser => "reqres::create_user",
            Check::GorestCreateUser => "gorest::create_user",
            Check::GorestUpdateUser => "gorest::update_user",
            Check::GorestDeleteUser => "gorest::delete_user",
            Check::BrowserHomePage => "browser::home_page",
            Check::CombinedFrontEndAndApi => "combined::front_end_and_api",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Check::ReqresListUsers
            | Check::ReqresSingleUser
            | Check::ReqresUserNotFound
            | Check::ReqresCreateUser => "reqres",
            Check::GorestCreateUser | Check::GorestUpdateUser | Check::GorestDeleteUser => "gorest",
            Check::BrowserHomePage | Check::CombinedFrontEndAndApi => "browser",
        }
    }

    pub fn needs_browser(&self) -> bool {
        self.tag() == "browser"
    }

    pub fn from_name(name: &str) -> Option<Check> {
        Check::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Result of running a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub tag: String,
    pub success: bool,
    pub skipped: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Result of running a set of checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Sequential check runner
pub struct TestRunner {
    config: ProbeConfig,
    reqres: ReqresChecks,
    users: UserFlow,
    browser: Option<Box<dyn BrowserDriver>>,
}

impl TestRunner {
    /// Create a runner with clients built from `config`
    pub fn new(config: ProbeConfig) -> E2eResult<Self> {
        let reqres = ReqresChecks::new(&config)?;
        let users = UserFlow::new(&config)?;
        Ok(Self {
            config,
            reqres,
            users,
            browser: None,
        })
    }

    pub fn with_reqres(mut self, reqres: ReqresChecks) -> Self {
        self.reqres = reqres;
        self
    }

    pub fn with_user_flow(mut self, users: UserFlow) -> Self {
        self.users = users;
        self
    }

    /// Use `driver` instead of launching Playwright
    pub fn with_browser(mut self, driver: Box<dyn BrowserDriver>) -> Self {
        self.browser = Some(driver);
        self
    }

    pub fn user_flow(&self) -> &UserFlow {
        &self.users
    }

    /// Run every check
    pub async fn run_all(&mut self) -> TestSuiteResult {
        self.run_checks(&Check::ALL).await
    }

    /// Run checks carrying `tag`
    pub async fn run_tagged(&mut self, tag: &str) -> TestSuiteResult {
        let checks: Vec<Check> = Check::ALL.into_iter().filter(|c| c.tag() == tag).collect();
        self.run_checks(&checks).await
    }

    /// Run one check by name
    pub async fn run_named(&mut self, name: &str) -> E2eResult<TestSuiteResult> {
        let check = Check::from_name(name)
            .ok_or_else(|| E2eError::Configuration(format!("Check not found: {}", name)))?;
        Ok(self.run_checks(&[check]).await)
    }

    /// Run a list of checks in order
    pub async fn run_checks(&mut self, checks: &[Check]) -> TestSuiteResult {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut results = Vec::new();
        let mut passed = 0;
        let mut failed = 0;
        let mut skipped = 0;

        info!("Running {} check(s)...", checks.len());

        for check in checks {
            let result = self.run_check(*check).await;
            if result.skipped {
                skipped += 1;
                info!("- {} (skipped)", result.name);
            } else if result.success {
                passed += 1;
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                failed += 1;
                error!("✗ {} - {}", result.name, result.error.as_deref().unwrap_or("unknown error"));
            }
            results.push(result);
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!("Test Results: {} passed, {} failed, {} skipped ({} ms)",
            passed, failed, skipped, duration_ms);

        TestSuiteResult {
            started_at,
            total: checks.len(),
            passed,
            failed,
            skipped,
            duration_ms,
            results,
        }
    }

    /// Run a single check
    pub async fn run_check(&mut self, check: Check) -> TestResult {
        let start = Instant::now();
        debug!("Running check: {}", check.name());

        let mut result = TestResult {
            name: check.name().to_string(),
            tag: check.tag().to_string(),
            success: true,
            skipped: false,
            duration_ms: 0,
            error: None,
        };

        if check.needs_browser() && !self.config.browser.enabled && self.browser.is_none() {
            result.skipped = true;
            return result;
        }

        if let Err(e) = self.execute(check).await {
            result.success = false;
            result.error = Some(e.to_string());
        }
        result.duration_ms = start.elapsed().as_millis() as u64;
        result
    }

    async fn execute(&mut self, check: Check) -> E2eResult<()> {
        match check {
            Check::ReqresListUsers => self.reqres.list_users_page_two().await.map(|_| ()),
            Check::ReqresSingleUser => self.reqres.single_user().await.map(|_| ()),
            Check::ReqresUserNotFound => self.reqres.single_user_not_found().await,
            Check::ReqresCreateUser => self.reqres.create_user_with_job().await.map(|_| ()),
            Check::GorestCreateUser => {
                let payload = self.users.next_payload();
                self.users.create_user(&payload).await.map(|_| ())
            }
            Check::GorestUpdateUser => {
                let payload = self.users.next_payload();
                self.users.update_user(&payload).await.map(|_| ())
            }
            Check::GorestDeleteUser => self.users.delete_user().await,
            Check::BrowserHomePage => {
                let home = HomePageCheck::reqres(&self.config.reqres.base_url);
                let driver = ensure_driver(&mut self.browser, &self.config.browser)?;
                home.verify(driver).await.map(|_| ())
            }
            Check::CombinedFrontEndAndApi => {
                let home = HomePageCheck::reqres(&self.config.reqres.base_url);
                let driver = ensure_driver(&mut self.browser, &self.config.browser)?;
                front_end_and_api(driver, &home, &self.reqres).await
            }
        }
    }

    /// Write results to `<dir>/test-results.json`
    pub fn write_results(&self, dir: &Path, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(dir)?;

        let path = dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

/// The injected driver, or a Playwright driver launched on first use
fn ensure_driver<'a>(
    slot: &'a mut Option<Box<dyn BrowserDriver>>,
    config: &BrowserConfig,
) -> E2eResult<&'a mut dyn BrowserDriver> {
    let driver = match slot.take() {
        Some(driver) => driver,
        None => Box::new(PlaywrightDriver::new(PlaywrightConfig::try_from(config)?)?),
    };
    Ok(&mut **slot.insert(driver))
}
