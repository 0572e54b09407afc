//! HTTP client for the PhishGuard API

use std::time::Duration;

use phishguard_core::prelude::*;
use phishguard_core::{AuthMode, ScanOutcome};
use serde::Serialize;
use url::Url;

use crate::protocol::{
    parse_auth_response, parse_scan_response, AuthRequest, AuthSuccess, ScanRequest,
    UpdateProfileRequest, SCAN_PATH, UPDATE_PROFILE_PATH,
};
use crate::service::{AccountService, Classifier};

/// Default production endpoint
pub const DEFAULT_BASE_URL: &str = "https://phishguard-api-1-t6wy.onrender.com";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the scan, login, register and update-profile endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    timeout: Duration,
}

/// Raw response: status plus body text
struct RawResponse {
    status: u16,
    body: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `https://host:port`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| Error::config(format!("Invalid server URL '{base_url}': {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Server URL must use http or https, got '{}'",
                base_url.scheme()
            )));
        }

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// POST a JSON body and return status and body text.
    ///
    /// Transport failures become [`Error::Connection`]; exceeding the
    /// configured timeout becomes [`Error::Timeout`].
    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<RawResponse> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let request = async {
            let response = self
                .http
                .post(&url)
                .json(body)
                .send()
                .await
                .map_err(|e| Error::connection(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| Error::connection(format!("Failed to read response body: {e}")))?;

            Ok::<_, Error>(RawResponse { status, body })
        };

        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => {
                if let Ok(raw) = &result {
                    debug!("POST {} -> HTTP {}", url, raw.status);
                }
                result
            }
            Err(_) => {
                warn!("POST {} timed out after {:?}", url, self.timeout);
                Err(Error::Timeout {
                    secs: self.timeout.as_secs(),
                })
            }
        }
    }

    /// Submit a URL to the classifier.
    pub async fn scan(&self, url: &str) -> Result<ScanOutcome> {
        let raw = self.post_json(SCAN_PATH, &ScanRequest { url }).await?;
        let outcome = parse_scan_response(raw.status, &raw.body)?;
        info!("Scan of {} -> {}", url, outcome.result);
        Ok(outcome)
    }

    /// Log in or register, depending on `mode`.
    pub async fn authenticate(
        &self,
        mode: AuthMode,
        email: &str,
        password: &str,
    ) -> Result<AuthSuccess> {
        let raw = self
            .post_json(mode.endpoint(), &AuthRequest { email, password })
            .await?;
        parse_auth_response(raw.status, &raw.body)
    }

    /// Update the display name and photo of the account behind `email`.
    pub async fn update_profile(&self, email: &str, name: &str, photo: &str) -> Result<()> {
        let raw = self
            .post_json(UPDATE_PROFILE_PATH, &UpdateProfileRequest { email, name, photo })
            .await?;

        if (200..300).contains(&raw.status) {
            Ok(())
        } else {
            Err(Error::server(
                Some(raw.status),
                format!("Profile update failed (HTTP {})", raw.status),
            ))
        }
    }
}

impl Classifier for ApiClient {
    async fn classify(&self, url: &str) -> Result<ScanOutcome> {
        self.scan(url).await
    }
}

impl AccountService for ApiClient {
    async fn authenticate(
        &self,
        mode: AuthMode,
        email: &str,
        password: &str,
    ) -> Result<AuthSuccess> {
        ApiClient::authenticate(self, mode, email, password).await
    }

    async fn update_profile(&self, email: &str, name: &str, photo: &str) -> Result<()> {
        ApiClient::update_profile(self, email, name, photo).await
    }
}
