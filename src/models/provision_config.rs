use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ProvisionError;

/// Contents of `config.json`. Missing keys load as zero values; nothing is validated.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProvisionConfig {
    pub folder_id: String,
    pub username: String,
    pub resources: Resources,
    pub metadata: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Resources {
    pub image: ImageSelector,
    pub name: String,
    pub resources_spec: ResourcesSpec,
    pub boot_disk_spec: BootDiskSpec,
    pub zone_id: String,
    pub platform_id: String,
    pub subnet_id: String,
}

/// Which image family to boot from, and the folder that publishes it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ImageSelector {
    pub family: String,
    pub folder_family_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ResourcesSpec {
    /// Bytes
    pub memory: i64,
    pub cores: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BootDiskSpec {
    pub auto_delete: bool,
    pub disk_spec: DiskSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DiskSpec {
    pub type_id: String,
    /// Bytes
    pub size: i64,
}

impl ProvisionConfig {
    /// Read and decode a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProvisionError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ProvisionError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&raw).map_err(|source| ProvisionError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            metadata_keys = config.metadata.len(),
            labels = config.labels.len(),
            "loaded provisioning config"
        );
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Read the public key verbatim, trailing newline included.
pub fn load_ssh_public_key(path: impl AsRef<Path>) -> Result<String, ProvisionError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| ProvisionError::SshKeyRead {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keys_take_zero_values() {
        let cfg = ProvisionConfig::from_json(r#"{"folder_id": "b1g"}"#).unwrap();
        assert_eq!(cfg.folder_id, "b1g");
        assert_eq!(cfg.username, "");
        assert_eq!(cfg.resources.resources_spec.cores, 0);
        assert!(!cfg.resources.boot_disk_spec.auto_delete);
        assert!(cfg.metadata.is_empty());
    }

    #[test]
    fn test_nested_fields_decode() {
        let raw = json!({
            "resources": {
                "image": { "family": "ubuntu-2004-lts", "folder_family_id": "standard-images" },
                "resources_spec": { "memory": 2147483648i64, "cores": 2 },
                "boot_disk_spec": {
                    "auto_delete": true,
                    "disk_spec": { "type_id": "network-hdd", "size": 21474836480i64 }
                }
            }
        })
        .to_string();
        let cfg = ProvisionConfig::from_json(&raw).unwrap();
        assert_eq!(cfg.resources.image.family, "ubuntu-2004-lts");
        assert_eq!(cfg.resources.image.folder_family_id, "standard-images");
        assert_eq!(cfg.resources.resources_spec.memory, 2_147_483_648);
        assert_eq!(cfg.resources.boot_disk_spec.disk_spec.size, 21_474_836_480);
        assert_eq!(cfg.resources.boot_disk_spec.disk_spec.type_id, "network-hdd");
    }

    #[test]
    fn test_wrong_value_type_is_an_error() {
        assert!(ProvisionConfig::from_json(r#"{"resources": {"resources_spec": {"cores": "two"}}}"#).is_err());
        assert!(ProvisionConfig::from_json(r#"{"metadata": {"k": 1}}"#).is_err());
    }
}
