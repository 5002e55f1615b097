//! Thin HTTP client over the HRMS API surface the checks consume

use std::time::Duration;
use reqwest::{Method, Response, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::fixtures::Credentials;

/// HRMS API client bound to one base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:4000/api`).
    ///
    /// `timeout` of `None` keeps reqwest's default behavior.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> E2eResult<Self> {
        Url::parse(base_url)
            .map_err(|e| E2eError::InvalidConfig(format!("bad API URL '{}': {}", base_url, e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send an arbitrary request, optionally with a JSON body.
    ///
    /// `url` is absolute and need not live under the API base.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> reqwest::Result<Response> {
        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send().await
    }

    /// `GET {base}`
    pub async fn root(&self) -> reqwest::Result<Response> {
        debug!("GET {}", self.base_url);
        self.http.get(&self.base_url).send().await
    }

    /// `POST {base}/auth/login`
    pub async fn login(&self, credentials: &Credentials) -> reqwest::Result<Response> {
        let url = self.url("/auth/login");
        debug!("POST {} as {}", url, credentials.email);
        self.http.post(url).json(credentials).send().await
    }

    /// `GET {base}/users` with a bearer token
    pub async fn list_users(&self, token: &str) -> reqwest::Result<Response> {
        let url = self.url("/users");
        debug!("GET {}", url);
        self.http.get(url).bearer_auth(token).send().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:4000/api/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000/api");
        assert_eq!(client.url("/users"), "http://localhost:4000/api/users");
    }

    #[test]
    fn test_rejects_unparseable_url() {
        let err = ApiClient::new("not a url", None).unwrap_err();
        assert!(matches!(err, E2eError::InvalidConfig(_)));
    }
}
