//! Tests for configuration parsing.

#[cfg(test)]
mod tests {
    use crate::config::DevicePolicyGwConfig;

    #[test]
    fn test_config_default() {
        let cfg: DevicePolicyGwConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(cfg, DevicePolicyGwConfig::default());
        assert!(!cfg.parent_profile);
    }

    #[test]
    fn test_config_parent_profile() {
        let cfg: DevicePolicyGwConfig = serde_saphyr::from_str("parent_profile: true").unwrap();
        assert!(cfg.parent_profile);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let result: Result<DevicePolicyGwConfig, _> = serde_saphyr::from_str("vendor: acme");
        assert!(result.is_err());
    }
}
