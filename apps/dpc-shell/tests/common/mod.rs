#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use device_policy_gw::Gateway;
use dpc_shell::Shell;
use in_memory_dp_plugin::{InMemoryDevice, InMemoryDpConfig, UserConfig};

pub const WORK_USER_ID: u32 = 10;
pub const WORK_USER_SERIAL: u64 = 12;

pub fn tokens(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| (*s).to_owned()).collect()
}

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

/// Runs one command against `device` and returns everything written.
pub fn dispatch(device: &InMemoryDevice, args: &[&str]) -> String {
    let gateway = Gateway::from_services(device);
    let mut shell = Shell::new(&gateway, Vec::new());
    shell.run(&tokens(args)).unwrap();
    String::from_utf8(shell.into_inner()).unwrap()
}
