#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::BTreeSet;

use device_policy_gw::Gateway;
use device_policy_sdk::{
    AdminComponent, CreateUserFlags, DevicePolicyError, DevicePolicyGatewayClient, ErrorKind,
    LockFlags, PasswordQuality, PlatformFault, SerialNumber, TransferBundle, UserHandle,
    UserOperationStatus, WipeFlags,
};

use common::{WORK_USER_ID, WORK_USER_SERIAL, device, device_owner_config};

#[test]
fn restriction_set_then_listed() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);

    gateway.set_user_restriction("no_config_wifi", true).unwrap();

    assert!(gateway.user_restrictions().unwrap().contains("no_config_wifi"));
    assert!(gateway.has_user_restriction("no_config_wifi").unwrap());
}

#[test]
fn cleared_restriction_is_not_listed() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);

    gateway.set_user_restriction("no_sms", true).unwrap();
    gateway.set_user_restriction("no_config_wifi", true).unwrap();
    gateway.set_user_restriction("no_sms", false).unwrap();

    assert_eq!(
        gateway.user_restrictions().unwrap(),
        BTreeSet::from(["no_config_wifi".to_owned()])
    );
}

#[test]
fn unresolved_serial_never_reaches_remove() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);

    let err = gateway
        .remove_user_by_serial(SerialNumber::new(999))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidResult);
    assert_eq!(
        err.to_string(),
        "invalid result (null) on remove_user_by_serial(999)"
    );
    assert_eq!(device.call_count("remove_user"), 0);
}

#[test]
fn resolved_serial_removes_user() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);

    gateway
        .remove_user_by_serial(SerialNumber::new(WORK_USER_SERIAL))
        .unwrap();

    assert_eq!(device.users(), vec![UserHandle::SYSTEM]);
    assert_eq!(device.call_count("remove_user"), 1);
}

#[test]
fn declined_removal_is_invalid_false() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);

    let err = gateway.remove_user(UserHandle::SYSTEM).unwrap_err();

    assert!(matches!(
        &err,
        DevicePolicyError::InvalidResult { value, .. } if value == "false"
    ));
    assert_eq!(err.call().unwrap().as_str(), "remove_user(UserHandle{0})");
}

#[test]
fn null_handle_carries_literal_and_signature() {
    let mut config = device_owner_config();
    config.overrides.create_user_returns_null = true;
    let device = device(config);
    let gateway = Gateway::from_services(&device);

    let err = gateway
        .create_and_manage_user(Some("guest"), CreateUserFlags::SKIP_SETUP_WIZARD)
        .unwrap_err();

    match err {
        DevicePolicyError::InvalidResult { value, call } => {
            assert_eq!(value, "null");
            assert_eq!(call.as_str(), "create_and_manage_user(guest, 1)");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn created_user_is_returned() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);

    let user = gateway
        .create_and_manage_user(None, CreateUserFlags::MAKE_USER_EPHEMERAL)
        .unwrap();

    assert_eq!(user, UserHandle::of(WORK_USER_ID + 1));
    assert!(device.is_ephemeral(user));
    assert_eq!(
        gateway.serial_number(user).unwrap(),
        Some(SerialNumber::new(WORK_USER_SERIAL + 1))
    );
}

#[test]
fn non_success_status_keeps_exact_code() {
    let mut config = device_owner_config();
    config.overrides.stop_user_status = Some(3);
    let device = device(config);
    let gateway = Gateway::from_services(&device);

    let err = gateway.stop_user(UserHandle::of(WORK_USER_ID)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FailedUserOperation);
    assert_eq!(err.status(), Some(UserOperationStatus::ERROR_MAX_RUNNING_USERS));
    assert_eq!(err.status().map(UserOperationStatus::code), Some(3));
}

#[test]
fn unknown_status_code_is_preserved() {
    let mut config = device_owner_config();
    config.overrides.start_user_status = Some(42);
    let device = device(config);
    let gateway = Gateway::from_services(&device);

    let err = gateway
        .start_user_in_background(UserHandle::of(WORK_USER_ID))
        .unwrap_err();

    assert_eq!(err.status().map(UserOperationStatus::code), Some(42));
}

#[test]
fn user_lifecycle_round_trip() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);
    let work = UserHandle::of(WORK_USER_ID);

    assert_eq!(
        gateway.start_user_in_background(work).unwrap(),
        UserOperationStatus::SUCCESS
    );
    assert!(device.is_running(work));
    gateway.stop_user(work).unwrap();
    assert!(!device.is_running(work));

    gateway.switch_user(work).unwrap();
    assert_eq!(device.foreground_user(), work);
}

#[test]
fn switch_to_unknown_user_is_failed_operation() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);

    let err = gateway.switch_user(UserHandle::of(77)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FailedOperation);
    assert_eq!(err.to_string(), "failed operation: switch_user(UserHandle{77})");
}

#[test]
fn refused_bugreport_is_failed_operation() {
    let mut config = device_owner_config();
    config.overrides.request_bugreport = Some(false);
    let device = device(config);
    let gateway = Gateway::from_services(&device);

    let err = gateway.request_bugreport().unwrap_err();

    assert_eq!(err.to_string(), "failed operation: request_bugreport()");
}

#[test]
fn platform_fault_is_forwarded_verbatim() {
    let mut config = device_owner_config();
    let fault = PlatformFault::Security("wipe not permitted".to_owned());
    config.faults.wipe_data = Some(fault.clone());
    let device = device(config);
    let gateway = Gateway::from_services(&device);

    let err = gateway.wipe_data(WipeFlags::WIPE_EXTERNAL_STORAGE).unwrap_err();

    assert_eq!(err, DevicePolicyError::Platform(fault));
    assert_eq!(err.to_string(), "security violation: wipe not permitted");
    assert!(!device.is_wiped());
}

#[test]
fn affiliation_ids_replace_and_clear() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);
    let ids = BTreeSet::from(["a".to_owned(), "b".to_owned()]);

    gateway.set_affiliation_ids(&ids).unwrap();
    assert_eq!(gateway.affiliation_ids().unwrap(), ids);

    gateway.set_affiliation_ids(&BTreeSet::new()).unwrap();
    assert!(gateway.affiliation_ids().unwrap().is_empty());
    assert!(gateway.is_affiliated_user().unwrap());
}

#[test]
fn device_wide_operations_complete() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);

    gateway
        .lock_now(Some(LockFlags::EVICT_CREDENTIAL_ENCRYPTION_KEY))
        .unwrap();
    gateway.lock_now(None).unwrap();
    gateway.reboot().unwrap();
    gateway.request_bugreport().unwrap();
    gateway.set_network_logging(true).unwrap();

    assert_eq!(device.lock_count(), 2);
    assert_eq!(device.reboot_count(), 1);
    assert_eq!(device.bugreport_count(), 1);
    assert!(gateway.is_network_logging_enabled().unwrap());
}

#[test]
fn organization_and_password_settings_round_trip() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);

    gateway.set_organization_name(Some("Acme")).unwrap();
    gateway.set_password_quality(PasswordQuality::Complex).unwrap();
    let packages = vec!["com.android.chrome".to_owned()];
    gateway.set_user_control_disabled_packages(&packages).unwrap();

    assert_eq!(gateway.organization_name().unwrap().as_deref(), Some("Acme"));
    assert_eq!(gateway.password_quality().unwrap(), PasswordQuality::Complex);
    assert_eq!(gateway.user_control_disabled_packages().unwrap(), packages);

    gateway.set_organization_name(None).unwrap();
    assert_eq!(gateway.organization_name().unwrap(), None);
}

#[test]
fn suspended_packages_report_failures() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);
    let packages = vec!["com.google.android.gm".to_owned(), "com.missing".to_owned()];

    let failed = gateway.set_packages_suspended(&packages, true).unwrap();

    assert_eq!(failed, vec!["com.missing".to_owned()]);
    assert!(gateway.is_package_suspended("com.google.android.gm").unwrap());
    assert!(matches!(
        gateway.is_package_suspended("com.missing"),
        Err(DevicePolicyError::Platform(PlatformFault::NameNotFound(_)))
    ));
}

#[test]
fn ownership_queries_and_release() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);

    assert!(gateway.is_device_owner_app().unwrap());
    assert!(!gateway.is_profile_owner_app().unwrap());

    gateway.clear_device_owner_app().unwrap();
    assert!(!gateway.is_device_owner_app().unwrap());

    gateway.remove_active_admin().unwrap();
    assert!(!device.is_admin_active());
}

#[test]
fn ownership_transfer_hands_over_extras() {
    let device = device(device_owner_config());
    let gateway = Gateway::from_services(&device);
    let target: AdminComponent = "com.android.chrome/.Admin".parse().unwrap();
    let bundle: TransferBundle = [("token".to_owned(), "42".to_owned())].into_iter().collect();

    gateway.transfer_ownership(&target, Some(&bundle)).unwrap();

    assert_eq!(device.transferred_to(), Some((target, bundle)));
}

#[test]
fn gateways_over_same_device_are_independent_objects() {
    let device = device(device_owner_config());
    let first = Gateway::from_services(&device);
    let second = Gateway::from_services(&device);

    first.set_user_restriction("no_sms", true).unwrap();

    assert!(second.user_restrictions().unwrap().contains("no_sms"));
    assert_eq!(first.admin(), second.admin());
    assert_eq!(
        first.to_string(),
        "DevicePolicyGateway[com.afwsamples.testdpc/.DeviceAdminReceiver]"
    );
}
