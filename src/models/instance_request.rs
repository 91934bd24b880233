use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /compute/v1/instances`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceRequest {
    pub folder_id: String,
    pub name: String,
    pub zone_id: String,
    pub platform_id: String,
    pub resources_spec: ResourcesSpec,
    pub boot_disk_spec: AttachedDiskSpec,
    pub metadata: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
    pub network_interface_specs: Vec<NetworkInterfaceSpec>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesSpec {
    pub memory: i64,
    pub cores: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttachedDiskSpec {
    pub auto_delete: bool,
    pub disk_spec: DiskSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiskSpec {
    pub type_id: String,
    pub size: i64,
    pub image_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceSpec {
    pub subnet_id: String,
    pub primary_v4_address_spec: PrimaryAddressSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryAddressSpec {
    pub one_to_one_nat_spec: OneToOneNatSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OneToOneNatSpec {
    pub ip_version: IpVersion,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum IpVersion {
    Ipv4,
}

impl NetworkInterfaceSpec {
    /// Interface on `subnet_id` with an ephemeral public IPv4 address.
    pub fn public_ipv4(subnet_id: impl Into<String>) -> Self {
        Self {
            subnet_id: subnet_id.into(),
            primary_v4_address_spec: PrimaryAddressSpec {
                one_to_one_nat_spec: OneToOneNatSpec {
                    ip_version: IpVersion::Ipv4,
                },
            },
        }
    }
}
