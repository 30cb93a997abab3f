//! Tests for configuration parsing.

#[cfg(test)]
mod tests {
    use device_policy_sdk::{CreateUserFlags, PasswordQuality, PlatformFault, PlatformServices};

    use crate::config::{InMemoryDpConfig, OwnerMode};
    use crate::domain::InMemoryDevice;

    #[test]
    fn test_config_default() {
        let config = InMemoryDpConfig::default();
        assert_eq!(
            config.admin.to_string(),
            "com.afwsamples.testdpc/.DeviceAdminReceiver"
        );
        assert_eq!(config.owner, OwnerMode::DeviceOwner);
        assert!(config.affiliated);
        assert_eq!(config.max_users, 4);
        assert!(config.users.is_empty());
        assert!(config.packages.contains("com.android.chrome"));
    }

    #[test]
    fn test_config_empty_document_applies_defaults() {
        let config: InMemoryDpConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, InMemoryDpConfig::default());
    }

    #[test]
    fn test_config_parse_seed() {
        let yaml = r#"
admin: "com.example.dpc/.Admin"
owner: org_owned_profile_owner
users:
  - id: 10
    serial: 12
    name: "work"
    running: true
restrictions: ["no_sms", "no_config_wifi"]
affiliation_ids: ["acme"]
organization_name: "Acme"
password_quality: alphanumeric
"#;
        let config: InMemoryDpConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.admin.package(), "com.example.dpc");
        assert_eq!(config.admin.class(), "com.example.dpc.Admin");
        assert_eq!(config.owner, OwnerMode::OrgOwnedProfileOwner);
        assert_eq!(config.users.len(), 1);
        assert_eq!(config.users[0].serial, 12);
        assert!(config.users[0].running);
        assert!(config.restrictions.contains("no_config_wifi"));
        assert_eq!(config.organization_name.as_deref(), Some("Acme"));
        assert_eq!(config.password_quality, PasswordQuality::Alphanumeric);
        assert_eq!(config.max_users, 4); // default
    }

    #[test]
    fn test_config_parse_overrides_and_faults() {
        let yaml = r#"
overrides:
  create_user_returns_null: true
  stop_user_status: 3
faults:
  reboot:
    kind: security
    message: "reboot is not allowed"
"#;
        let config: InMemoryDpConfig = serde_saphyr::from_str(yaml).unwrap();
        assert!(config.overrides.create_user_returns_null);
        assert_eq!(config.overrides.stop_user_status, Some(3));
        assert_eq!(
            config.faults.reboot,
            Some(PlatformFault::Security("reboot is not allowed".to_owned()))
        );
        assert_eq!(config.faults.wipe_data, None);
    }

    #[test]
    fn test_config_reject_unknown_fields() {
        let yaml = r#"
owner: device_owner
unknown_field: "should fail"
"#;
        let result: Result<InMemoryDpConfig, _> = serde_saphyr::from_str(yaml);
        assert!(
            result.is_err(),
            "Config should reject unknown fields due to deny_unknown_fields"
        );
    }

    #[test]
    fn test_config_reject_malformed_admin() {
        let result: Result<InMemoryDpConfig, _> = serde_saphyr::from_str("admin: \"no-slash\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_maximum_ids_seed_a_device() {
        let yaml = r"
users:
  - id: 4294967295
    serial: 18446744073709551615
";
        let config: InMemoryDpConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.users[0].id, u32::MAX);
        assert_eq!(config.users[0].serial, u64::MAX);

        let device = InMemoryDevice::new(config);
        let admin = device.admin_component();
        let created = device
            .device_policy()
            .create_and_manage_user(&admin, None, &admin, None, CreateUserFlags::default())
            .unwrap();
        assert_eq!(created, None);
    }
}
