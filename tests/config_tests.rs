use once_cell::sync::Lazy;
use serde_json::json;
use std::collections::BTreeMap;
use std::env;
use std::io::Write;
use std::sync::Mutex;
use ycvm::config;
use ycvm::models::provision_config::{BootDiskSpec, DiskSpec, ImageSelector, Resources, ResourcesSpec};
use ycvm::models::{load_ssh_public_key, ProvisionConfig};
use ycvm::ProvisionError;

// Tests below mutate process environment variables.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn sample_config() -> ProvisionConfig {
    ProvisionConfig {
        folder_id: "b1gfolder".into(),
        username: "alice".into(),
        resources: Resources {
            image: ImageSelector {
                family: "ubuntu-2004-lts".into(),
                folder_family_id: "standard-images".into(),
            },
            name: "demo-vm".into(),
            resources_spec: ResourcesSpec {
                memory: 2_147_483_648,
                cores: 2,
            },
            boot_disk_spec: BootDiskSpec {
                auto_delete: true,
                disk_spec: DiskSpec {
                    type_id: "network-ssd".into(),
                    size: 21_474_836_480,
                },
            },
            zone_id: "ru-central1-a".into(),
            platform_id: "standard-v3".into(),
            subnet_id: "e9bsubnet".into(),
        },
        metadata: BTreeMap::from([("user-data".to_string(), "users:\n  - name: USERNAME".to_string())]),
        labels: BTreeMap::from([("go-sdk".to_string(), "yes".to_string())]),
    }
}

#[test]
fn test_sanitize_base_url_removes_trailing_slashes() {
    assert_eq!(
        config::sanitize_base_url("https://compute.api.cloud.yandex.net///", "fallback"),
        "https://compute.api.cloud.yandex.net"
    );
}

#[test]
fn test_sanitize_base_url_whitespace_only_uses_fallback() {
    assert_eq!(config::sanitize_base_url("   ", "https://fallback"), "https://fallback");
}

#[test]
fn test_get_compute_endpoint_uses_default() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::remove_var(config::COMPUTE_ENDPOINT_VAR);

    assert_eq!(config::get_compute_endpoint(), config::DEFAULT_COMPUTE_ENDPOINT);
}

#[test]
fn test_get_operation_endpoint_override() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var(config::OPERATION_ENDPOINT_VAR, "http://127.0.0.1:9000/");

    assert_eq!(config::get_operation_endpoint(), "http://127.0.0.1:9000");

    env::remove_var(config::OPERATION_ENDPOINT_VAR);
}

#[test]
fn test_unset_credentials_read_as_empty() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::remove_var(config::IAM_TOKEN_VAR);
    env::remove_var(config::SSH_PUBLIC_KEY_PATH_VAR);

    assert_eq!(config::get_iam_token(), "");
    assert_eq!(config::get_ssh_public_key_path(), "");
}

#[test]
fn test_load_round_trips_serialized_config() {
    let original = sample_config();
    let file = write_temp(&serde_json::to_string_pretty(&original).unwrap());

    let loaded = ProvisionConfig::load(file.path()).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_load_missing_key_yields_zero_value() {
    let mut raw = serde_json::to_value(sample_config()).unwrap();
    raw["resources"]["boot_disk_spec"]
        .as_object_mut()
        .unwrap()
        .remove("disk_spec");
    raw.as_object_mut().unwrap().remove("labels");
    let file = write_temp(&raw.to_string());

    let loaded = ProvisionConfig::load(file.path()).unwrap();
    assert_eq!(loaded.resources.boot_disk_spec.disk_spec, DiskSpec::default());
    assert!(loaded.labels.is_empty());
    assert_eq!(loaded.resources.name, "demo-vm");
}

#[test]
fn test_load_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    match ProvisionConfig::load(&path) {
        Err(ProvisionError::ConfigRead { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected ConfigRead, got {:?}", other),
    }
}

#[test]
fn test_load_invalid_json_is_parse_error() {
    let file = write_temp(r#"{"folder_id": "b1g", "resources": {"name": "vm""#);

    match ProvisionConfig::load(file.path()) {
        Err(ProvisionError::ConfigParse { .. }) => {}
        other => panic!("expected ConfigParse, got {:?}", other),
    }
}

#[test]
fn test_load_ignores_unknown_keys() {
    let file = write_temp(&json!({"folder_id": "b1g", "extra": {"nested": true}}).to_string());

    let loaded = ProvisionConfig::load(file.path()).unwrap();
    assert_eq!(loaded.folder_id, "b1g");
}

#[test]
fn test_ssh_key_read_verbatim() {
    let file = write_temp("ssh-ed25519 AAAAC3Nza alice@laptop\n");

    let key = load_ssh_public_key(file.path()).unwrap();
    assert_eq!(key, "ssh-ed25519 AAAAC3Nza alice@laptop\n");
}

#[test]
fn test_ssh_key_empty_path_is_error() {
    match load_ssh_public_key("") {
        Err(ProvisionError::SshKeyRead { .. }) => {}
        other => panic!("expected SshKeyRead, got {:?}", other),
    }
}
