#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use in_memory_dp_plugin::{InMemoryDevice, InMemoryDpConfig, OwnerMode, UserConfig};

pub const WORK_USER_ID: u32 = 10;
pub const WORK_USER_SERIAL: u64 = 12;

/// Device-owned device with one secondary user.
pub fn device_owner_config() -> InMemoryDpConfig {
    InMemoryDpConfig {
        users: vec![UserConfig {
            id: WORK_USER_ID,
            serial: WORK_USER_SERIAL,
            name: Some("work".to_owned()),
            running: false,
        }],
        ..InMemoryDpConfig::default()
    }
}

pub fn org_owned_profile_config() -> InMemoryDpConfig {
    InMemoryDpConfig {
        owner: OwnerMode::OrgOwnedProfileOwner,
        ..InMemoryDpConfig::default()
    }
}

pub fn device(config: InMemoryDpConfig) -> InMemoryDevice {
    InMemoryDevice::new(config)
}
