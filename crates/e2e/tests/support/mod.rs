//! In-process fake of the HRMS API and frontend pages the harness requests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use hrms_e2e::runner::RunnerConfig;
use hrms_e2e::Credentials;

/// Knobs for bending the fake away from a well-behaved service
#[derive(Debug, Clone)]
pub struct Behavior {
    pub health_status: StatusCode,
    /// Status for `/users` when the admin token is presented
    pub users_status: StatusCode,
    /// Accept any password for a known email
    pub accept_any_password: bool,
    /// Emails whose logins are refused outright
    pub refuse: Vec<&'static str>,
    /// Report this role for every successful login
    pub role_override: Option<&'static str>,
    pub omit_token: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            health_status: StatusCode::OK,
            users_status: StatusCode::OK,
            accept_any_password: false,
            refuse: Vec::new(),
            role_override: None,
            omit_token: false,
        }
    }
}

const ACCOUNTS: &[(&str, &str, &str)] = &[
    ("admin@hrms.com", "Admin@123", "ADMIN"),
    ("manager@hrms.com", "Manager@123", "MANAGER"),
    ("employee@hrms.com", "Employee@123", "EMPLOYEE"),
];

fn token_for(role: &str) -> String {
    format!("token-{}", role.to_lowercase())
}

async fn root(State(behavior): State<Arc<Behavior>>) -> Response {
    (behavior.health_status, Json(json!({"message": "HRMS API"}))).into_response()
}

async fn holidays() -> Response {
    Json(json!([{"name": "New Year", "date": "2026-01-01"}])).into_response()
}

async fn page() -> Response {
    (
        [(header::CONTENT_TYPE, "text/html")],
        "<!doctype html><title>HRMS</title>",
    )
        .into_response()
}

async fn login(
    State(behavior): State<Arc<Behavior>>,
    Json(creds): Json<Credentials>,
) -> Response {
    let account = ACCOUNTS.iter().find(|(email, password, _)| {
        *email == creds.email && (behavior.accept_any_password || *password == creds.password)
    });

    let Some((email, _, role)) = account else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response();
    };

    if behavior.refuse.contains(email) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Account locked"})),
        )
            .into_response();
    }

    let role = behavior.role_override.unwrap_or(*role);
    let mut body = json!({
        "user": {"id": 1, "email": email, "role": role},
    });
    if !behavior.omit_token {
        body["token"] = json!(token_for(role));
    }

    (StatusCode::OK, Json(body)).into_response()
}

async fn users(State(behavior): State<Arc<Behavior>>, headers: HeaderMap) -> Response {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match bearer {
        Some(token) if token == token_for("ADMIN") => {
            (behavior.users_status, Json(json!([]))).into_response()
        }
        Some(token) if ACCOUNTS.iter().any(|(_, _, role)| token == token_for(role)) => {
            StatusCode::FORBIDDEN.into_response()
        }
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

/// A fake HRMS API listening on an ephemeral port
pub struct FakeHrms {
    pub addr: SocketAddr,
}

impl FakeHrms {
    pub async fn start(behavior: Behavior) -> Self {
        let app = Router::new()
            .route("/api", get(root))
            .route("/api/auth/login", post(login))
            .route("/api/users", get(users))
            .route("/api/holidays", get(holidays))
            .route("/", get(page))
            .route("/login", get(page))
            .with_state(Arc::new(behavior));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake HRMS listener");
        let addr = listener.local_addr().expect("fake HRMS local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve fake HRMS");
        });

        Self { addr }
    }

    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// The same listener also serves the frontend pages
    pub fn frontend_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> RunnerConfig {
        RunnerConfig {
            frontend_url: self.frontend_url(),
            ..config_for(self.api_url())
        }
    }
}

pub fn config_for(api_url: String) -> RunnerConfig {
    RunnerConfig {
        api_url,
        timeout: Some(Duration::from_secs(5)),
        ..Default::default()
    }
}

/// An address nothing is listening on
pub async fn unreachable_api_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway local addr");
    drop(listener);
    format!("http://{}/api", addr)
}
