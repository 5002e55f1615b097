//! Sequential check runner and console reporting

use std::fmt;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::checks;
use crate::client::ApiClient;
use crate::error::{CheckResult, E2eResult};
use crate::fixtures::LoginFixture;

/// How a single check ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

/// Result of running a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub outcome: Outcome,
    pub duration_ms: u64,
    /// Failure message, set only for failed checks
    pub error: Option<String>,
    /// Why the check did not run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result of running the whole suite
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    fn record(&mut self, result: TestResult) {
        self.total += 1;
        match result.outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Skipped => self.skipped += 1,
        }
        self.results.push(result);
    }

    /// Look up a check by name
    pub fn get(&self, name: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Check names paired with outcomes, in run order
    pub fn outcomes(&self) -> Vec<(&str, Outcome)> {
        self.results
            .iter()
            .map(|r| (r.name.as_str(), r.outcome))
            .collect()
    }
}

pub const HEALTH_CHECK: &str = "API Health Check";
pub const INVALID_LOGIN: &str = "Invalid Login Handling";
pub const ADMIN_LOGIN: &str = "Admin Login";
pub const EMPLOYEE_LOGIN: &str = "Employee Login";
pub const MANAGER_LOGIN: &str = "Manager Login";
pub const PROTECTED_ROUTE: &str = "Protected Route Access";

/// Runs the checks one after another, writing a line per check to `out`
pub struct TestRunner<W: Write> {
    /// API client
    client: ApiClient,

    /// Console stream for the ✅/❌ lines
    out: W,

    /// Results of the current run
    results: TestSuiteResult,
}

impl TestRunner<std::io::Stdout> {
    /// Create a runner that reports to stdout
    pub fn new(config: &RunnerConfig) -> E2eResult<Self> {
        Self::with_output(config, std::io::stdout())
    }
}

impl<W: Write> TestRunner<W> {
    /// Create a runner that reports to the given writer
    pub fn with_output(config: &RunnerConfig, out: W) -> E2eResult<Self> {
        Ok(Self {
            client: ApiClient::new(&config.api_url, config.timeout)?,
            out,
            results: TestSuiteResult::default(),
        })
    }

    /// Write to the console. A broken stream is logged and otherwise ignored
    /// so the run still completes.
    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args).and_then(|_| self.out.flush()) {
            warn!("console write failed: {}", e);
        }
    }

    /// Run one check, report it and record it.
    ///
    /// Any failure of the check is reported and turned into `false`.
    pub async fn run_check<F>(&mut self, name: &str, check: F) -> bool
    where
        F: Future<Output = CheckResult<()>>,
    {
        self.run_check_value(name, check).await.is_some()
    }

    /// Like [`run_check`](Self::run_check), but keeps the value a passing
    /// check produces.
    pub async fn run_check_value<T, F>(&mut self, name: &str, check: F) -> Option<T>
    where
        F: Future<Output = CheckResult<T>>,
    {
        self.emit(format_args!("Testing {}... ", name));

        let start = Instant::now();
        let result = check.await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(value) => {
                self.emit(format_args!("✅ PASS\n"));
                info!("✓ {} ({} ms)", name, duration_ms);
                self.results.record(TestResult {
                    name: name.to_string(),
                    outcome: Outcome::Passed,
                    duration_ms,
                    error: None,
                    reason: None,
                });
                Some(value)
            }
            Err(e) => {
                self.emit(format_args!("❌ FAIL: {}\n", e));
                info!("✗ {} - {:?}", name, e);
                self.results.record(TestResult {
                    name: name.to_string(),
                    outcome: Outcome::Failed,
                    duration_ms,
                    error: Some(e.to_string()),
                    reason: None,
                });
                None
            }
        }
    }

    fn skip(&mut self, name: &str, reason: &str) {
        info!("- {} skipped: {}", name, reason);
        self.results.record(TestResult {
            name: name.to_string(),
            outcome: Outcome::Skipped,
            duration_ms: 0,
            error: None,
            reason: Some(reason.to_string()),
        });
    }

    /// Run the full suite in its fixed order.
    ///
    /// Neither check failures nor console errors stop the run.
    pub async fn run_suite(&mut self) -> TestSuiteResult {
        let start = Instant::now();
        let client = self.client.clone();
        self.results = TestSuiteResult::default();

        debug!("API at {}", client.base_url());
        self.emit(format_args!("🚀 Starting Automated Test Suite...\n\n"));

        self.run_check(HEALTH_CHECK, checks::health_check(&client))
            .await;
        self.run_check(INVALID_LOGIN, checks::invalid_login_check(&client))
            .await;

        let admin = LoginFixture::admin();
        let token = self
            .run_check_value(
                ADMIN_LOGIN,
                checks::login_check(&client, &admin.credentials, admin.expected_role),
            )
            .await;

        let employee = LoginFixture::employee();
        self.run_check(
            EMPLOYEE_LOGIN,
            discard(checks::login_check(
                &client,
                &employee.credentials,
                employee.expected_role,
            )),
        )
        .await;

        let manager = LoginFixture::manager();
        self.run_check(
            MANAGER_LOGIN,
            discard(checks::login_check(
                &client,
                &manager.credentials,
                manager.expected_role,
            )),
        )
        .await;

        match token {
            Some(token) => {
                self.run_check(
                    PROTECTED_ROUTE,
                    checks::protected_route_check(&client, &token),
                )
                .await;
            }
            None => self.skip(PROTECTED_ROUTE, "no administrator token"),
        }

        self.emit(format_args!("\n✨ Test Suite Completed\n"));

        let mut results = std::mem::take(&mut self.results);
        results.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "{} passed, {} failed, {} skipped ({} ms)",
            results.passed, results.failed, results.skipped, results.duration_ms
        );
        results
    }

    /// Consume the runner and hand back the console stream
    pub fn into_output(self) -> W {
        self.out
    }
}

async fn discard<T>(check: impl Future<Output = CheckResult<T>>) -> CheckResult<()> {
    check.await.map(|_| ())
}

/// Write a suite result or bench report as pretty JSON
pub fn write_results<T: Serialize>(results: &T, path: &Path) -> E2eResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)?;

    info!("Results written to: {}", path.display());
    Ok(())
}

/// Configuration for the check runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// API origin including the `/api` prefix
    pub api_url: String,

    /// Frontend origin, only requested by the benchmark
    pub frontend_url: String,

    /// Per-request timeout (None = client default)
    pub timeout: Option<Duration>,

    /// Where to write the JSON report, if anywhere
    pub output: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:4000/api".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            timeout: None,
            output: None,
        }
    }
}
