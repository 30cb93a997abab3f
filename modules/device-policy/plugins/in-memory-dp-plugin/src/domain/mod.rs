//! Domain layer for the in-memory device policy plugin.

pub mod client;
pub mod service;

pub use client::{DevicePolicyHandle, UserManagerHandle};
pub use service::{InMemoryDevice, Scope};
