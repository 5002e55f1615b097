//! HRMS functional check harness
//!
//! This crate drives a running HRMS API over HTTP and reports one
//! pass/fail line per check:
//! - Probes the API root for liveness
//! - Logs in as each seeded role and verifies the returned role
//! - Rejects a known-bad credential with 401
//! - Replays the administrator token against a protected route
//!
//! A separate benchmark mode times the API and frontend pages.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   HRMS Check Runner (Rust)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                 │
//! │    ├── run_check(name, check) -> bool                       │
//! │    └── run_suite() -> TestSuiteResult                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  checks                                                     │
//! │    ├── health_check()            GET  /                     │
//! │    ├── invalid_login_check()     POST /auth/login  -> 401   │
//! │    ├── login_check(creds, role)  POST /auth/login  -> token │
//! │    └── protected_route_check()   GET  /users       200|403  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Benchmark                                                  │
//! │    └── run() -> BenchReport    batched timing per endpoint  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod bench;
pub mod checks;
pub mod client;
pub mod error;
pub mod fixtures;
pub mod runner;

pub use bench::{BenchConfig, BenchReport, Benchmark};
pub use client::ApiClient;
pub use error::{CheckError, CheckResult, E2eError, E2eResult};
pub use fixtures::{Credentials, Role};
pub use runner::{RunnerConfig, TestRunner, TestSuiteResult};
