//! Integration tests for machine descriptors and manifests

use super::test_utils::{write_default_manifest, write_document, write_file};
use machine_config::{
    BoxKind, ConfigStore, Environment, FallbackBoxes, MachineDescriptor, MachineManifest,
    MachineSpec,
};
use tempfile::TempDir;

fn store_with(temp_dir: &TempDir, json: &str) -> ConfigStore {
    let path = write_document(temp_dir, json);
    ConfigStore::load(
        &path,
        FallbackBoxes::new("sssd-fedora", "sssd-windows"),
        Environment::empty(),
    )
    .unwrap()
}

#[test]
fn test_explicit_memory_beats_document() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_with(&temp_dir, r#"{ "boxes": { "ipa": { "memory": 3072 } } }"#);

    let explicit = MachineDescriptor::resolve(
        MachineSpec::new("ipa", BoxKind::Linux, "master.ipa.test", "192.168.100.10")
            .with_memory(1024),
        &store,
    );
    assert_eq!(explicit.memory(), 1024);

    let deferred = MachineDescriptor::resolve(
        MachineSpec::new("ipa", BoxKind::Linux, "master.ipa.test", "192.168.100.10"),
        &store,
    );
    assert_eq!(deferred.memory(), store.memory("ipa"));
    assert_eq!(deferred.memory(), 3072);
}

#[test]
fn test_explicit_zero_memory_is_kept() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_with(&temp_dir, r#"{ "boxes": { "ipa": { "memory": 3072 } } }"#);
    let machine = MachineDescriptor::resolve(
        MachineSpec::new("ipa", BoxKind::Linux, "master.ipa.test", "192.168.100.10").with_memory(0),
        &store,
    );
    assert_eq!(machine.memory(), 0);
}

#[test]
fn test_manifest_resolves_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_with(
        &temp_dir,
        r#"{ "boxes": { "client": { "name": "fedora-client", "memory": 1024 } } }"#,
    );
    let manifest = MachineManifest::load(&write_default_manifest(&temp_dir)).unwrap();

    let machines = manifest.resolve(&store);
    let names: Vec<&str> = machines.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["client", "ad"]);

    assert_eq!(machines[0].box_name(), "fedora-client");
    assert_eq!(machines[0].memory(), 1024);
    assert_eq!(machines[1].kind(), BoxKind::Windows);
    assert_eq!(machines[1].box_name(), "sssd-windows");
    assert_eq!(machines[1].memory(), 4096);
    assert_eq!(machines[1].ip(), "192.168.100.110");
}

#[test]
fn test_manifest_errors_name_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "broken.toml", "[[machine]]\nname = \"a\"\n");
    let err = MachineManifest::load(&path).unwrap_err();
    assert!(err.to_string().contains("broken.toml"), "{}", err);

    let err = MachineManifest::load(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("absent.toml"), "{}", err);
}
