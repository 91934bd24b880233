use reqwest::Method;

use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::{CreateInstanceRequest, Operation};

impl ApiClient {
    /// Submit the creation request. Returns the operation tracking it.
    pub async fn create_instance(&self, request: &CreateInstanceRequest) -> Result<Operation, ApiError> {
        let url = self.compute_url("/compute/v1/instances");
        let payload = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        let op: Operation = self.send(Method::POST, &url, None, Some(&payload)).await?;
        if op.id.is_empty() {
            return Err(ApiError::Decode("create response carried no operation id".into()));
        }
        tracing::info!(operation_id = %op.id, name = %request.name, "instance creation submitted");
        Ok(op)
    }
}
