pub mod instance_request;
pub mod operation;
pub mod provision_config;

pub use instance_request::CreateInstanceRequest;
pub use operation::{Image, Instance, Operation, OperationState, Status};
pub use provision_config::{load_ssh_public_key, ProvisionConfig};
