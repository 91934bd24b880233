//! Adapter for the cloud provider's compute and operation services.

pub mod client;
mod images;
mod instances;
mod operations;

pub use client::{set_silent, ApiClient};

use crate::error::ApiError;
use crate::models::{CreateInstanceRequest, Image, Operation};

/// The three provider calls a provisioning run makes.
///
/// `ApiClient` talks to the real REST API; tests substitute fakes.
#[allow(async_fn_in_trait)]
pub trait ComputeProvider {
    /// Latest image in `family` published in `folder_id`.
    async fn latest_image_by_family(&self, folder_id: &str, family: &str) -> Result<Image, ApiError>;

    /// Submit a creation request and return its operation handle.
    async fn create_instance(&self, request: &CreateInstanceRequest) -> Result<Operation, ApiError>;

    /// Block until the operation is terminal and return it.
    async fn wait_operation(&self, operation_id: &str) -> Result<Operation, ApiError>;
}

impl ComputeProvider for ApiClient {
    async fn latest_image_by_family(&self, folder_id: &str, family: &str) -> Result<Image, ApiError> {
        self.get_latest_by_family(folder_id, family).await
    }

    async fn create_instance(&self, request: &CreateInstanceRequest) -> Result<Operation, ApiError> {
        ApiClient::create_instance(self, request).await
    }

    async fn wait_operation(&self, operation_id: &str) -> Result<Operation, ApiError> {
        ApiClient::wait_operation(self, operation_id).await
    }
}
