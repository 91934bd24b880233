use std::collections::BTreeMap;
use std::io::Write;

use crate::api::ComputeProvider;
use crate::error::{ApiError, ProvisionError};
use crate::metadata::{render_metadata, Substitutions};
use crate::models::instance_request::{AttachedDiskSpec, DiskSpec, NetworkInterfaceSpec, ResourcesSpec};
use crate::models::{CreateInstanceRequest, Instance, OperationState, ProvisionConfig};

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionOutcome {
    pub operation_id: String,
    pub instance_id: String,
}

/// Map config, rendered metadata and the resolved image onto a creation request.
///
/// Always exactly one interface, on the configured subnet, with a NAT'd public IPv4 address.
pub fn build_instance_request(
    config: &ProvisionConfig,
    metadata: BTreeMap<String, String>,
    image_id: &str,
) -> CreateInstanceRequest {
    let resources = &config.resources;
    CreateInstanceRequest {
        folder_id: config.folder_id.clone(),
        name: resources.name.clone(),
        zone_id: resources.zone_id.clone(),
        platform_id: resources.platform_id.clone(),
        resources_spec: ResourcesSpec {
            memory: resources.resources_spec.memory,
            cores: resources.resources_spec.cores,
        },
        boot_disk_spec: AttachedDiskSpec {
            auto_delete: resources.boot_disk_spec.auto_delete,
            disk_spec: DiskSpec {
                type_id: resources.boot_disk_spec.disk_spec.type_id.clone(),
                size: resources.boot_disk_spec.disk_spec.size,
                image_id: image_id.to_string(),
            },
        },
        metadata,
        labels: config.labels.clone(),
        network_interface_specs: vec![NetworkInterfaceSpec::public_ipv4(&resources.subnet_id)],
    }
}

/// Render metadata, resolve the boot image and build the request without submitting it.
pub async fn plan<P: ComputeProvider>(
    provider: &P,
    config: &ProvisionConfig,
    ssh_public_key: &str,
) -> Result<CreateInstanceRequest, ProvisionError> {
    let subs = Substitutions {
        username: &config.username,
        ssh_public_key,
    };
    let metadata = render_metadata(&config.metadata, &subs);

    let selector = &config.resources.image;
    let image = provider
        .latest_image_by_family(&selector.folder_family_id, &selector.family)
        .await
        .map_err(|source| ProvisionError::ImageResolution {
            family: selector.family.clone(),
            folder_id: selector.folder_family_id.clone(),
            source,
        })?;

    Ok(build_instance_request(config, metadata, &image.id))
}

/// Create the instance and wait for it.
///
/// Writes the operation id to `out` as soon as the request is accepted, and
/// the instance id once the operation succeeds. Both lines are plain text so
/// they stay parseable when stdout is piped. A failure after submission
/// may leave an instance behind whose id is never reported.
pub async fn run<P: ComputeProvider, W: Write>(
    provider: &P,
    config: &ProvisionConfig,
    ssh_public_key: &str,
    out: &mut W,
) -> Result<ProvisionOutcome, ProvisionError> {
    let request = plan(provider, config, ssh_public_key).await?;

    let op = provider
        .create_instance(&request)
        .await
        .map_err(ProvisionError::Submit)?;
    writeln!(out, "Running Yandex.Cloud operation. ID: {}", op.id)?;
    out.flush()?;

    let finished = provider
        .wait_operation(&op.id)
        .await
        .map_err(|source| ProvisionError::Wait {
            operation_id: op.id.clone(),
            source,
        })?;

    let instance: Instance = match finished.state() {
        OperationState::Succeeded(response) => serde_json::from_value(response).map_err(|e| ProvisionError::Wait {
            operation_id: op.id.clone(),
            source: ApiError::Decode(e.to_string()),
        })?,
        OperationState::Failed(status) => {
            return Err(ProvisionError::OperationFailed {
                operation_id: op.id.clone(),
                code: status.code,
                message: status.message,
            })
        }
        // Providers only hand back finished operations from a wait.
        OperationState::Pending => {
            return Err(ProvisionError::Wait {
                operation_id: op.id.clone(),
                source: ApiError::Decode("operation returned before completion".into()),
            })
        }
    };

    if instance.id.is_empty() {
        return Err(ProvisionError::Wait {
            operation_id: op.id.clone(),
            source: ApiError::Decode("operation response carried no instance id".into()),
        });
    }

    writeln!(out, "Instance with id {} was created", instance.id)?;
    out.flush()?;

    Ok(ProvisionOutcome {
        operation_id: op.id,
        instance_id: instance.id,
    })
}
