#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::thread;

use device_policy_sdk::{PlatformServices, SerialNumber, UserHandle};
use in_memory_dp_plugin::{InMemoryDevice, InMemoryDpConfig, OwnerMode, Scope};

const SEED: &str = r#"
admin: "com.example.dpc/.Receiver"
owner: org_owned_profile_owner
users:
  - id: 10
    serial: 12
    name: work
    running: true
restrictions: [no_sms]
packages: [com.example.dpc]
"#;

fn seeded() -> InMemoryDevice {
    InMemoryDevice::new(serde_saphyr::from_str::<InMemoryDpConfig>(SEED).unwrap())
}

#[test]
fn yaml_seed_populates_the_device() {
    let device = seeded();

    assert_eq!(device.owner(), OwnerMode::OrgOwnedProfileOwner);
    assert_eq!(device.users(), vec![UserHandle::SYSTEM, UserHandle::of(10)]);
    assert!(device.is_running(UserHandle::of(10)));
    assert_eq!(device.user_name(UserHandle::of(10)).as_deref(), Some("work"));
    assert_eq!(device.admin_component().package(), "com.example.dpc");
    assert_eq!(device.restriction_bundle(Scope::Primary).get("no_sms"), Some(&true));
}

#[test]
fn serials_resolve_both_ways() {
    let device = seeded();
    let users = device.user_manager();

    assert_eq!(
        users.user_for_serial_number(SerialNumber::new(12)).unwrap(),
        Some(UserHandle::of(10))
    );
    assert_eq!(
        users.serial_number_for_user(UserHandle::of(10)).unwrap(),
        Some(SerialNumber::new(12))
    );
    assert_eq!(users.user_for_serial_number(SerialNumber::new(99)).unwrap(), None);
}

#[test]
fn handles_from_many_threads_share_one_device() {
    let device = seeded();
    let admin = device.admin_component();
    let parent = device.device_policy().parent_profile_instance(&admin).unwrap();
    let primary = device.device_policy();

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let (primary, parent) = (Arc::clone(&primary), Arc::clone(&parent));
            let admin = admin.clone();
            thread::spawn(move || {
                let key = format!("key_{i}");
                let target = if i % 2 == 0 { &primary } else { &parent };
                target.add_user_restriction(&admin, &key).unwrap();
                primary.lock_now(None).unwrap();
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(device.lock_count(), 8);
    assert_eq!(device.restriction_bundle(Scope::Primary).len(), 5);
    assert_eq!(device.restriction_bundle(Scope::ParentProfile).len(), 4);
    assert_eq!(device.call_count("add_user_restriction"), 8);
    assert!(device.user_manager().has_user_restriction("key_1").unwrap());
}
