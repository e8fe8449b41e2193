//! Integration tests for guest definitions

use super::test_utils::{write_default_manifest, write_document};
use machine_config::guest::{plan_all, GuestSetup, SyncMethod};
use machine_config::{ConfigStore, Environment, FallbackBoxes, MachineManifest};
use tempfile::TempDir;

const DOCUMENT: &str = r#"{
    "folders": {
        "sshfs": [{ "host": "/home/dev/sssd", "guest": "/shared/sssd" }],
        "nfs": [{ "host": "/home/dev/data", "guest": "/shared/data" }]
    }
}"#;

fn plan(env: Environment) -> Result<Vec<machine_config::GuestDefinition>, machine_config::DocumentError> {
    let temp_dir = TempDir::new().unwrap();
    let store = ConfigStore::load(
        write_document(&temp_dir, DOCUMENT),
        FallbackBoxes::new("sssd-fedora", "sssd-windows"),
        env,
    )
    .unwrap();
    let machines = MachineManifest::load(&write_default_manifest(&temp_dir))
        .unwrap()
        .resolve(&store);
    plan_all(&machines, &store)
}

#[test]
fn test_linux_guest_gets_folders_windows_does_not() {
    let plan = plan(Environment::from_pairs([(
        "SSSD_TEST_SUITE_RSYNC",
        "/home/dev/scripts:/shared/scripts",
    )]))
    .unwrap();

    let client = &plan[0];
    let folders = client.synced_folders();
    assert_eq!(folders.len(), 3);
    assert_eq!(folders[0].guest, "/shared/sssd");
    assert!(matches!(folders[0].method, SyncMethod::Sshfs { .. }));
    assert_eq!(folders[1].method, SyncMethod::Nfs { nfs_udp: false });
    assert_eq!(folders[2].host, "/home/dev/scripts");
    assert_eq!(folders[2].method, SyncMethod::Rsync);

    let ad = &plan[1];
    assert!(ad.synced_folders().is_empty());
    match &ad.guest {
        GuestSetup::Windows(setup) => {
            assert_eq!(setup.communicator, "winrm");
            assert_eq!(setup.username, ".\\Administrator");
        }
        other => panic!("expected windows setup, got {:?}", other),
    }
}

#[test]
fn test_malformed_override_stops_planning() {
    let err = plan(Environment::from_pairs([("SSSD_TEST_SUITE_SSHFS", "no-separator")])).unwrap_err();
    assert!(err.to_string().contains("no-separator"));
}
