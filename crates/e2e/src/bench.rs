//! Response-time benchmark over the API and frontend
//!
//! Each endpoint is hit a fixed number of times in batches of concurrent
//! requests. Any answered request counts as a success regardless of its
//! status; only transport failures are dropped from the samples.

use std::fmt;
use std::io::Write;
use std::time::Instant;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use futures::future::join_all;
use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::error::{E2eError, E2eResult};
use crate::runner::RunnerConfig;

/// Batching parameters
#[derive(Debug, Clone, Copy)]
pub struct BenchConfig {
    /// Requests per endpoint
    pub iterations: usize,

    /// Requests in flight per batch
    pub concurrency: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            concurrency: 5,
        }
    }
}

/// One timed target
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub name: String,
    pub url: String,
    pub method: Method,
    pub body: Option<Value>,
}

impl Endpoint {
    fn get(name: &str, url: String) -> Self {
        Self {
            name: name.to_string(),
            url,
            method: Method::GET,
            body: None,
        }
    }
}

/// The fixed benchmark targets: API root, holidays, a failing login and
/// two frontend pages.
pub fn default_endpoints(api_url: &str, frontend_url: &str) -> Vec<Endpoint> {
    let api = api_url.trim_end_matches('/');
    let frontend = frontend_url.trim_end_matches('/');

    vec![
        Endpoint::get("API Health", api.to_string()),
        Endpoint::get("Holidays (Cached)", format!("{}/holidays", api)),
        Endpoint {
            name: "Login (Auth)".to_string(),
            url: format!("{}/auth/login", api),
            method: Method::POST,
            // Rejected with 401, still a full round trip through the auth path
            body: Some(json!({"email": "admin@hrms.com", "password": "wrongpassword"})),
        },
        Endpoint::get("Frontend Home", frontend.to_string()),
        Endpoint::get("Frontend Login", format!("{}/login", frontend)),
    ]
}

/// Timing summary for one endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointStats {
    pub name: String,
    pub url: String,
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub successes: usize,
    pub iterations: usize,
    /// Percentage of iterations that got an answer
    pub success_rate: f64,
}

impl EndpointStats {
    /// `None` when no request got an answer
    pub fn from_samples(endpoint: &Endpoint, samples: &[f64], iterations: usize) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let sum: f64 = samples.iter().sum();
        let min_ms = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max_ms = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            avg_ms: sum / samples.len() as f64,
            min_ms,
            max_ms,
            successes: samples.len(),
            iterations,
            success_rate: samples.len() as f64 / iterations as f64 * 100.0,
        })
    }
}

/// Rating of the global average response time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerformanceStatus {
    Excellent,
    Good,
    NeedsImprovement,
}

impl PerformanceStatus {
    pub fn from_average(avg_ms: f64) -> Self {
        if avg_ms < 200.0 {
            Self::Excellent
        } else if avg_ms < 500.0 {
            Self::Good
        } else {
            Self::NeedsImprovement
        }
    }
}

impl fmt::Display for PerformanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::NeedsImprovement => "NEEDS IMPROVEMENT",
        })
    }
}

/// Result of a full benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    /// Endpoints that answered at least once, in run order
    pub endpoints: Vec<EndpointStats>,
    /// Mean of the per-endpoint averages
    pub global_average_ms: Option<f64>,
    pub status: Option<PerformanceStatus>,
    pub duration_ms: u64,
}

impl BenchReport {
    pub fn get(&self, name: &str) -> Option<&EndpointStats> {
        self.endpoints.iter().find(|e| e.name == name)
    }
}

/// Benchmark driver writing progress and a summary table to `out`
pub struct Benchmark<W: Write> {
    client: ApiClient,
    config: BenchConfig,
    endpoints: Vec<Endpoint>,
    out: W,
}

impl Benchmark<std::io::Stdout> {
    pub fn new(runner: &RunnerConfig, config: BenchConfig) -> E2eResult<Self> {
        Self::with_output(runner, config, std::io::stdout())
    }
}

impl<W: Write> Benchmark<W> {
    pub fn with_output(runner: &RunnerConfig, config: BenchConfig, out: W) -> E2eResult<Self> {
        if config.iterations == 0 || config.concurrency == 0 {
            return Err(E2eError::InvalidConfig(
                "iterations and concurrency must be at least 1".to_string(),
            ));
        }
        Url::parse(&runner.frontend_url).map_err(|e| {
            E2eError::InvalidConfig(format!("bad frontend URL '{}': {}", runner.frontend_url, e))
        })?;

        Ok(Self {
            client: ApiClient::new(&runner.api_url, runner.timeout)?,
            config,
            endpoints: default_endpoints(&runner.api_url, &runner.frontend_url),
            out,
        })
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args).and_then(|_| self.out.flush()) {
            warn!("console write failed: {}", e);
        }
    }

    /// Time every endpoint, one after another, then print the summary
    pub async fn run(&mut self) -> BenchReport {
        let start = Instant::now();
        self.emit(format_args!("🚀 Starting Performance Benchmark...\n"));

        let mut stats = Vec::new();
        for endpoint in self.endpoints.clone() {
            if let Some(s) = self.measure(&endpoint).await {
                stats.push(s);
            }
        }

        let global_average_ms = if stats.is_empty() {
            None
        } else {
            Some(stats.iter().map(|s| s.avg_ms).sum::<f64>() / stats.len() as f64)
        };

        let report = BenchReport {
            endpoints: stats,
            global_average_ms,
            status: global_average_ms.map(PerformanceStatus::from_average),
            duration_ms: start.elapsed().as_millis() as u64,
        };
        self.print_summary(&report);

        info!(
            "benchmarked {} of {} endpoints ({} ms)",
            report.endpoints.len(),
            self.endpoints.len(),
            report.duration_ms
        );
        report
    }

    /// Hit one endpoint `iterations` times in batches of `concurrency`
    pub async fn measure(&mut self, endpoint: &Endpoint) -> Option<EndpointStats> {
        self.emit(format_args!("\nTesting {} ({})...\n", endpoint.name, endpoint.url));

        let BenchConfig { iterations, concurrency } = self.config;
        let mut samples = Vec::with_capacity(iterations);

        for batch_start in (0..iterations).step_by(concurrency) {
            let batch_size = concurrency.min(iterations - batch_start);
            let batch = (0..batch_size).map(|_| time_request(&self.client, endpoint));
            samples.extend(join_all(batch).await.into_iter().flatten());
        }

        match EndpointStats::from_samples(endpoint, &samples, iterations) {
            Some(stats) => {
                self.emit(format_args!(
                    "  Avg: {:.2}ms | Min: {:.2}ms | Max: {:.2}ms\n",
                    stats.avg_ms, stats.min_ms, stats.max_ms
                ));
                Some(stats)
            }
            None => {
                self.emit(format_args!("  No successful requests.\n"));
                None
            }
        }
    }

    fn print_summary(&mut self, report: &BenchReport) {
        let rule = "=".repeat(50);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Endpoint", "Avg", "Min", "Max", "Success Rate"]);
        for s in &report.endpoints {
            table.add_row(vec![
                s.name.clone(),
                format!("{:.2}ms", s.avg_ms),
                format!("{:.2}ms", s.min_ms),
                format!("{:.2}ms", s.max_ms),
                format!("{:.1}%", s.success_rate),
            ]);
        }

        self.emit(format_args!("\n\n📊 TEST RESULTS SUMMARY\n{rule}\n{table}\n{rule}\n"));

        match (report.global_average_ms, report.status) {
            (Some(avg), Some(status)) => {
                self.emit(format_args!("\n🌟 Global Average Response Time: {:.2}ms\n", avg));
                self.emit(format_args!("⚡ Performance Status: {}\n", status));
            }
            _ => self.emit(format_args!("\n🌟 Global Average Response Time: n/a\n")),
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

/// Round-trip time in ms including the body, or `None` on transport failure
async fn time_request(client: &ApiClient, endpoint: &Endpoint) -> Option<f64> {
    let start = Instant::now();
    match client
        .request(endpoint.method.clone(), &endpoint.url, endpoint.body.as_ref())
        .await
    {
        Ok(res) => {
            // Body errors still count; the server answered
            let _ = res.bytes().await;
            Some(start.elapsed().as_secs_f64() * 1000.0)
        }
        Err(e) => {
            debug!("{} {} failed: {}", endpoint.method, endpoint.url, e);
            None
        }
    }
}
