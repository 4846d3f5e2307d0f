//! Drives [`AzureCli`] against a shell script standing in for `az`.

use std::{fs, os::unix::fs::PermissionsExt, path::Path};

use azure_cli::AzureCli;
use common::{config::AzureArgs, error::CommandError, provider::ScaleSetClient};

const FAKE_AZ: &str = r#"#!/bin/sh
echo "$@" >> "$(dirname "$0")/calls.log"
case "$2" in
  list)
    echo '["vmss1", "vmss2"]'
    ;;
  show)
    cat <<JSON
{
  "name": "$6",
  "resourceGroup": "$4",
  "virtualMachineProfile": {
    "networkProfile": {
      "networkInterfaceConfigurations": [{
        "name": "nic0",
        "ipConfigurations": [{ "name": "ipconfig1", "primary": true, "subnet": { "id": "subnet-a" } }]
      }]
    }
  }
}
JSON
    ;;
  update)
    echo "ERROR: (OperationNotAllowed) too many ip configurations" >&2
    exit 1
    ;;
  update-instances)
    ;;
esac
"#;

fn install(dir: &Path) -> String {
    let path = dir.join("az");
    fs::write(&path, FAKE_AZ).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_str().unwrap().to_owned()
}

// One test so that no other thread forks while the script is being written.
#[tokio::test]
async fn talks_to_az() {
    let dir = tempfile::tempdir().unwrap();
    let client = AzureCli::new(
        &AzureArgs {
            cli: install(dir.path()),
            subscription: Some("sub-1".to_owned()),
        },
        true,
    );

    let names = client.list_scale_sets("rg").await.unwrap();
    assert_eq!(names, ["vmss1", "vmss2"]);

    let vmss = client.show_scale_set("rg", "vmss1").await.unwrap();
    assert_eq!(vmss.name, "vmss1");
    assert_eq!(vmss.resource_group.as_deref(), Some("rg"));
    let nics = &vmss.virtual_machine_profile.network_profile.network_interface_configurations;
    let ips = nics[0].ip_configurations.as_ref().unwrap();
    assert_eq!(ips[0].name, "ipconfig1");
    assert!(ips[0].is_primary());

    let err = client
        .update_network_profile("rg", "vmss1", &vmss.virtual_machine_profile.network_profile)
        .await
        .unwrap_err();
    let err = err.downcast_ref::<CommandError>().unwrap();
    assert!(err.stderr().unwrap().contains("too many ip configurations"));

    client.update_instances("rg", "vmss1").await.unwrap();

    let calls = fs::read_to_string(dir.path().join("calls.log")).unwrap();
    let calls: Vec<&str> = calls.lines().collect();
    assert_eq!(calls.len(), 4);
    assert!(calls.iter().all(|c| c.ends_with("--subscription sub-1")));
    assert_eq!(
        calls[3],
        "vmss update-instances --resource-group rg --name vmss1 --instance-ids * --output none --subscription sub-1"
    );
}
