#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use device_policy_gw::{DevicePolicyGwConfig, Gateway};
use device_policy_sdk::{
    DevicePolicyError, DevicePolicyGatewayClient, ErrorKind, PasswordQuality, PlatformFault,
};

use common::{device, device_owner_config, org_owned_profile_config};

#[test]
fn parent_and_primary_gateways_are_independent() {
    let device = device(org_owned_profile_config());
    let primary = Gateway::from_services(&device);
    let parent = Gateway::for_parent_profile(&device).unwrap();

    parent.set_user_restriction("no_config_wifi", true).unwrap();
    primary.set_user_restriction("no_sms", true).unwrap();

    assert_eq!(parent.admin(), primary.admin());
    assert!(parent.user_restrictions().unwrap().contains("no_config_wifi"));
    assert!(!parent.user_restrictions().unwrap().contains("no_sms"));
    assert!(!primary.user_restrictions().unwrap().contains("no_config_wifi"));

    // Parent restrictions are still in effect for the calling user.
    assert!(primary.has_user_restriction("no_config_wifi").unwrap());
}

#[test]
fn parent_password_quality_is_scoped() {
    let device = device(org_owned_profile_config());
    let primary = Gateway::from_services(&device);
    let parent = Gateway::for_parent_profile(&device).unwrap();

    parent.set_password_quality(PasswordQuality::Numeric).unwrap();

    assert_eq!(parent.password_quality().unwrap(), PasswordQuality::Numeric);
    assert_eq!(primary.password_quality().unwrap(), PasswordQuality::Unspecified);
}

#[test]
fn parent_profile_requires_profile_owner() {
    let device = device(device_owner_config());

    let err = Gateway::for_parent_profile(&device).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::GenericFailure);
    assert!(matches!(err, DevicePolicyError::Platform(PlatformFault::Security(_))));
}

#[test]
fn parent_profile_fault_is_forwarded() {
    let mut config = org_owned_profile_config();
    config.faults.parent_profile_instance =
        Some(PlatformFault::Unsupported("no managed profile".to_owned()));
    let device = device(config);

    let err = Gateway::for_parent_profile(&device).unwrap_err();

    assert_eq!(err.to_string(), "unsupported operation: no managed profile");
}

#[test]
fn config_selects_parent_profile() {
    let device = device(org_owned_profile_config());
    let config = DevicePolicyGwConfig {
        parent_profile: true,
    };

    let parent = Gateway::from_config(&device, &config).unwrap();
    parent.set_user_restriction("no_sms", true).unwrap();

    let primary = Gateway::from_config(&device, &DevicePolicyGwConfig::default()).unwrap();
    assert!(!primary.user_restrictions().unwrap().contains("no_sms"));
    assert!(parent.user_restrictions().unwrap().contains("no_sms"));
}

#[test]
fn primary_only_operations_fail_on_parent() {
    let device = device(org_owned_profile_config());
    let parent = Gateway::for_parent_profile(&device).unwrap();

    assert!(matches!(
        parent.reboot(),
        Err(DevicePolicyError::Platform(PlatformFault::Security(_)))
    ));
}
