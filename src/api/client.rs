use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use yansi::Paint;

use crate::config;
use crate::error::{ApiError, ProvisionError};

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

pub fn is_silent() -> bool {
    SILENT.load(Ordering::Relaxed)
}

fn log_output(msg: String) {
    if !is_silent() {
        eprintln!("{}", msg);
    }
}

/// REST client for the compute and operation services.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    compute_endpoint: String,
    operation_endpoint: String,
    iam_token: String,
    poll_interval: Duration,
}

impl ApiClient {
    pub fn new(
        iam_token: impl Into<String>,
        compute_endpoint: impl Into<String>,
        operation_endpoint: impl Into<String>,
    ) -> Result<Self, ProvisionError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("ycvm/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config::HTTP_TIMEOUT)
            .build()
            .map_err(|e| ProvisionError::Client(e.to_string()))?;

        Ok(Self {
            http,
            compute_endpoint: compute_endpoint.into(),
            operation_endpoint: operation_endpoint.into(),
            iam_token: iam_token.into(),
            poll_interval: Duration::from_secs(config::DEFAULT_POLL_INTERVAL_SECS),
        })
    }

    /// Build a client from `IAM_TOKEN` and the endpoint overrides.
    pub fn from_env() -> Result<Self, ProvisionError> {
        Self::new(
            config::get_iam_token(),
            config::get_compute_endpoint(),
            config::get_operation_endpoint(),
        )
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub(crate) fn compute_url(&self, path: &str) -> String {
        format!("{}{}", self.compute_endpoint, path)
    }

    pub(crate) fn operation_url(&self, path: &str) -> String {
        format!("{}{}", self.operation_endpoint, path)
    }

    /// Send one request and decode the JSON body.
    /// Non-2xx statuses become `ApiError::Status`.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        params: Option<&[(&str, &str)]>,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        self.log_request(&method, url, params, body);

        let mut req = self.http.request(method, url);
        if !self.iam_token.is_empty() {
            req = req.bearer_auth(&self.iam_token);
        }
        if let Some(p) = params {
            req = req.query(p);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            log_output(format!(
                "Response:\n{}",
                Paint::new(format!("HTTP {}: {}", status, text)).fg(yansi::Color::Red)
            ));
            return Err(status_error(status.as_u16(), &text));
        }

        log_output(format!("Response:\n{}", Paint::new(&text).rgb(100, 100, 100)));
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn log_request(&self, method: &Method, url: &str, params: Option<&[(&str, &str)]>, body: Option<&Value>) {
        if is_silent() {
            return;
        }
        let mut url_for_log = url.to_string();
        if let Some(p) = params.filter(|p| !p.is_empty()) {
            let query_string = p
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<String>>()
                .join("&");
            url_for_log = format!("{}?{}", url_for_log, query_string);
        }

        let mut parts = Vec::new();
        parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
        parts.push(format!("-X {}", Paint::new(method.as_str()).fg(yansi::Color::Yellow).bold()));
        parts.push(format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)));
        if !self.iam_token.is_empty() {
            parts.push(format!(
                "{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new("'Authorization: Bearer ${IAM_TOKEN}'").fg(yansi::Color::Magenta)
            ));
        }
        if let Some(d) = body {
            let json_str = serde_json::to_string_pretty(d).unwrap_or_default();
            let escaped_json = json_str.replace('\'', "'\\''");
            parts.push(format!(
                "{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
            ));
            parts.push(format!(
                "{} {}",
                Paint::new("-d").fg(yansi::Color::Blue),
                Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
            ));
        }
        log_output(format!("Request:\n{}", parts.join(" ")));
    }
}

/// Build a status error, lifting `code`/`message` out of the provider's error body.
pub(crate) fn status_error(status: u16, text: &str) -> ApiError {
    let parsed: Option<Value> = serde_json::from_str(text).ok();
    let code = parsed.as_ref().and_then(|v| v.get("code")).map(|c| match c {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    });
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                "empty response body".to_string()
            } else {
                text.trim().to_string()
            }
        });
    ApiError::Status { status, code, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_reads_provider_body() {
        match status_error(404, r#"{"code": 5, "message": "Image not found"}"#) {
            ApiError::Status { status, code, message } => {
                assert_eq!(status, 404);
                assert_eq!(code.as_deref(), Some("5"));
                assert_eq!(message, "Image not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_status_error_falls_back_to_raw_text() {
        match status_error(502, "bad gateway\n") {
            ApiError::Status { code, message, .. } => {
                assert!(code.is_none());
                assert_eq!(message, "bad gateway");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_urls_join_endpoint_and_path() {
        let client = ApiClient::new("t", "http://compute.local", "http://ops.local").unwrap();
        assert_eq!(client.compute_url("/compute/v1/instances"), "http://compute.local/compute/v1/instances");
        assert_eq!(client.operation_url("/operations/op-1"), "http://ops.local/operations/op-1");
        assert_eq!(client.poll_interval(), Duration::from_secs(1));
    }
}
