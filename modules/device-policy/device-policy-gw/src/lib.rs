//! Device Policy Gateway
//!
//! Wraps the device-management and user-management platform primitives behind
//! [`device_policy_sdk::DevicePolicyGatewayClient`]. Every operation returns a
//! single `Result`: platform faults are forwarded verbatim, and `null`,
//! `false` or non-success status returns are turned into typed errors by the
//! operation table in [`domain::operations`].

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

#[cfg(test)]
mod config_tests;

pub use config::DevicePolicyGwConfig;
pub use domain::{Gateway, RestrictionPanel, RestrictionState, enabled_restrictions};
