//! TestDPC shell.
//!
//! Dispatches one command per invocation against a device policy gateway
//! bound to the in-memory device described by the configuration.
//!
//! ```text
//! dpc-shell [--config dpc.yaml] [--parent-profile] <COMMAND> [ARGS]...
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod logging;
pub mod shell;

use std::io::Write;

use anyhow::Context;
use device_policy_gw::Gateway;
use in_memory_dp_plugin::InMemoryDevice;

pub use config::{AppConfig, CliOverrides, ConfigError, LogFormat, LoggingConfig};
pub use shell::{ArgumentError, Command, Shell};

/// Seeds the device, builds the configured gateway and runs one command.
///
/// Returns the sink so callers can inspect what was written.
///
/// # Errors
///
/// Fails if the gateway cannot be built or the sink cannot be written.
pub fn run<W: Write>(config: &AppConfig, tokens: &[String], out: W) -> anyhow::Result<W> {
    let device = InMemoryDevice::new(config.device.clone());
    let gateway = Gateway::from_config(&device, &config.gateway)
        .context("failed to build device policy gateway")?;
    tracing::debug!(gateway = %gateway, "Gateway ready");

    let mut shell = Shell::new(&gateway, out);
    shell.run(tokens).context("failed to write shell output")?;
    Ok(shell.into_inner())
}
