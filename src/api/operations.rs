use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Method;
use std::time::Duration;

use super::client::{is_silent, ApiClient};
use crate::error::ApiError;
use crate::models::Operation;

impl ApiClient {
    pub async fn get_operation(&self, operation_id: &str) -> Result<Operation, ApiError> {
        let url = self.operation_url(&format!("/operations/{}", operation_id));
        self.send(Method::GET, &url, None, None).await
    }

    /// Poll until the operation reports `done`. There is no local timeout.
    pub async fn wait_operation(&self, operation_id: &str) -> Result<Operation, ApiError> {
        let spinner = wait_spinner(operation_id);
        let mut polls = 0u64;
        let result = loop {
            polls += 1;
            match self.get_operation(operation_id).await {
                Ok(op) if op.done => break Ok(op),
                Ok(_) => {
                    tracing::debug!(operation_id, polls, "operation still running");
                    tokio::time::sleep(self.poll_interval()).await;
                }
                Err(e) => break Err(e),
            }
        };
        spinner.finish_and_clear();
        if result.is_ok() {
            tracing::info!(operation_id, polls, "operation finished");
        }
        result
    }
}

fn wait_spinner(operation_id: &str) -> ProgressBar {
    if is_silent() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Waiting for operation {}", operation_id));
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
