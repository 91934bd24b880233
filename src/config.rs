use std::env;
use std::path::Path;
use std::time::Duration;

// Default configuration constants
pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_COMPUTE_ENDPOINT: &str = "https://compute.api.cloud.yandex.net";
pub const DEFAULT_OPERATION_ENDPOINT: &str = "https://operation.api.cloud.yandex.net";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;
// Bounds one HTTP exchange. The operation wait itself has no deadline.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub const IAM_TOKEN_VAR: &str = "IAM_TOKEN";
pub const SSH_PUBLIC_KEY_PATH_VAR: &str = "SSH_PUBLIC_KEY_PATH";
pub const COMPUTE_ENDPOINT_VAR: &str = "YC_COMPUTE_ENDPOINT";
pub const OPERATION_ENDPOINT_VAR: &str = "YC_OPERATION_ENDPOINT";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// Bearer credential for the provider. Empty when unset; the provider rejects it later.
pub fn get_iam_token() -> String {
    let token = env::var(IAM_TOKEN_VAR).unwrap_or_default();
    if token.trim().is_empty() {
        tracing::warn!("{} is not set; requests will be sent without credentials", IAM_TOKEN_VAR);
    }
    token
}

pub fn get_ssh_public_key_path() -> String {
    let path = env::var(SSH_PUBLIC_KEY_PATH_VAR).unwrap_or_default();
    if path.trim().is_empty() {
        tracing::warn!("{} is not set; reading the public key will fail", SSH_PUBLIC_KEY_PATH_VAR);
    }
    path
}

pub fn get_compute_endpoint() -> String {
    sanitize_base_url(
        &env::var(COMPUTE_ENDPOINT_VAR).unwrap_or_default(),
        DEFAULT_COMPUTE_ENDPOINT,
    )
}

pub fn get_operation_endpoint() -> String {
    sanitize_base_url(
        &env::var(OPERATION_ENDPOINT_VAR).unwrap_or_default(),
        DEFAULT_OPERATION_ENDPOINT,
    )
}

pub fn sanitize_base_url(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
