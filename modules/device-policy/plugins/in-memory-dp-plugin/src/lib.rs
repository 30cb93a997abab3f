//! In-Memory Device Policy Plugin
//!
//! Simulates one device in process: the admin component, its ownership mode,
//! users, restrictions and the rest of the policy state are seeded from
//! configuration and kept behind a mutex. Primitives can be forced to return
//! failure values or to raise faults, which makes the plugin a stand-in for
//! the platform in tests and in the shell.
//!
//! ## Configuration
//!
//! ```yaml
//! device:
//!   admin: "com.afwsamples.testdpc/.DeviceAdminReceiver"
//!   owner: device_owner
//!   users:
//!     - id: 10
//!       serial: 12
//!       name: "work"
//!   restrictions: ["no_sms"]
//!   affiliation_ids: ["acme"]
//!   overrides:
//!     stop_user_status: 3
//!   faults:
//!     reboot:
//!       kind: security
//!       message: "reboot is not allowed"
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

#[cfg(test)]
mod config_tests;

pub use config::{FaultConfig, InMemoryDpConfig, OwnerMode, ReturnOverrides, UserConfig};
pub use domain::{InMemoryDevice, Scope};
