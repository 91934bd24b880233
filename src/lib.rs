//! Provision a single Yandex Cloud compute instance from a JSON config file.
//!
//! The run is strictly linear: load `config.json` and the SSH public key,
//! render the metadata placeholders, resolve the boot image by family,
//! submit one creation request and wait for its operation to finish.

pub mod api;
pub mod config;
pub mod error;
pub mod metadata;
pub mod models;
pub mod provision;

pub use error::{ApiError, ProvisionError};
