//! Individual checks against the HRMS API
//!
//! Each check performs one round trip and returns `Err` on the first
//! expectation that does not hold. None of them retry.

use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::{CheckError, CheckResult};
use crate::fixtures::{invalid_credentials, Credentials, Role};

/// The API root must answer exactly 200.
pub async fn health_check(client: &ApiClient) -> CheckResult<()> {
    let res = client.root().await?;
    expect_status(res.status(), &[StatusCode::OK], "200")
}

/// A wrong password must be rejected with exactly 401.
pub async fn invalid_login_check(client: &ApiClient) -> CheckResult<()> {
    let res = client.login(&invalid_credentials()).await?;
    expect_status(res.status(), &[StatusCode::UNAUTHORIZED], "401")
}

/// Log in and verify the reported role. Yields the session token.
///
/// A `token` that is present but not a JSON string counts as missing.
pub async fn login_check(
    client: &ApiClient,
    credentials: &Credentials,
    expected_role: Role,
) -> CheckResult<String> {
    let res = client.login(credentials).await?;
    let status = res.status();
    let text = res.text().await?;

    if status != StatusCode::OK {
        return Err(CheckError::LoginRejected(text));
    }

    let body: Value = serde_json::from_str(&text)?;
    let token = body
        .get("token")
        .and_then(Value::as_str)
        .ok_or(CheckError::TokenMissing)?
        .to_string();

    let role = body.pointer("/user/role").and_then(Value::as_str);
    if role != Some(expected_role.as_str()) {
        return Err(CheckError::RoleMismatch {
            expected: expected_role.to_string(),
            actual: role.map(str::to_string),
        });
    }

    debug!("{} logged in as {}", credentials.email, expected_role);
    Ok(token)
}

/// The users listing must honor the bearer token.
///
/// 403 counts as a pass alongside 200: only the handling of the header is
/// verified, not the access decision.
pub async fn protected_route_check(client: &ApiClient, token: &str) -> CheckResult<()> {
    let res = client.list_users(token).await?;
    expect_status(
        res.status(),
        &[StatusCode::OK, StatusCode::FORBIDDEN],
        "200/403",
    )
}

fn expect_status(actual: StatusCode, accepted: &[StatusCode], expected: &str) -> CheckResult<()> {
    if accepted.contains(&actual) {
        Ok(())
    } else {
        Err(CheckError::status(expected, actual.as_u16()))
    }
}
