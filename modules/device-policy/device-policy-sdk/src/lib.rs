//! Device Policy SDK
//!
//! This crate provides the public contract of the device policy gateway:
//!
//! - [`DevicePolicyGatewayClient`] - Public API trait for consumers (UI screens, the shell)
//! - [`DevicePolicyPlatform`], [`UserManagerPlatform`] - Platform primitives the gateway wraps
//! - [`PlatformServices`] - Ambient context handing out the admin identity and service handles
//! - [`AdminComponent`], [`UserHandle`], [`SerialNumber`], [`UserOperationStatus`] - Domain models
//! - [`DevicePolicyError`], [`PlatformFault`] - Error taxonomy
//! - [`OutcomeExt`] - Success/error continuations over gateway results
//!
//! ## Usage
//!
//! ```ignore
//! use device_policy_sdk::{DevicePolicyGatewayClient, OutcomeExt};
//!
//! // React to both branches
//! gateway.request_bugreport().deliver(
//!     |()| println!("Bugreport requested"),
//!     |e| eprintln!("Error requesting bugreport: {e}"),
//! );
//!
//! // Audit only
//! gateway.set_network_logging(true).log_outcome("set_network_logging(true)");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;
pub mod outcome;
pub mod platform_api;
pub mod restrictions;

// Re-export main types at crate root
pub use api::DevicePolicyGatewayClient;
pub use error::{CallSignature, DevicePolicyError, ErrorKind, PlatformFault, or_null};
pub use models::{
    AdminComponent, CreateUserFlags, InvalidComponentError, LockFlags, PasswordQuality,
    RestrictionBundle, SerialNumber, TransferBundle, UserHandle, UserIcon, UserOperationStatus,
    WipeFlags,
};
pub use outcome::OutcomeExt;
pub use platform_api::{DevicePolicyPlatform, PlatformServices, UserManagerPlatform};
