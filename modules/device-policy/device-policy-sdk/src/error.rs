//! Error types for the device policy gateway.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::UserOperationStatus;

/// Fault raised by a platform primitive itself.
///
/// The gateway never reinterprets a fault; it is forwarded to the caller as
/// [`DevicePolicyError::Platform`] with its original detail.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum PlatformFault {
    /// The caller is not allowed to perform the operation.
    #[error("security violation: {0}")]
    Security(String),

    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    /// The device is not in a state that allows the operation.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// A named package or component does not exist.
    #[error("name not found: {0}")]
    NameNotFound(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Other(String),
}

/// Rendered signature of a gateway call, e.g. `remove_user(UserHandle{10})`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallSignature(String);

impl CallSignature {
    /// Renders `operation(args)`.
    #[must_use]
    pub fn new(operation: &str, args: fmt::Arguments<'_>) -> Self {
        Self(format!("{operation}({args})"))
    }

    #[must_use]
    pub fn no_args(operation: &str) -> Self {
        Self(format!("{operation}()"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders an absent argument as `null`, the way the platform logs it.
#[must_use]
pub fn or_null(value: Option<&str>) -> &str {
    value.unwrap_or("null")
}

/// Discriminant of [`DevicePolicyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    GenericFailure,
    InvalidResult,
    FailedOperation,
    FailedUserOperation,
}

/// Errors delivered by gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DevicePolicyError {
    /// The platform call itself raised a fault.
    #[error(transparent)]
    Platform(#[from] PlatformFault),

    /// The platform call returned normally with a value signalling failure
    /// and no richer diagnostic (`null`, `false`).
    #[error("invalid result ({value}) on {call}")]
    InvalidResult {
        /// The literal failing value.
        value: String,
        call: CallSignature,
    },

    /// The platform call returned `false`, its sole failure signal.
    #[error("failed operation: {call}")]
    FailedOperation { call: CallSignature },

    /// A user lifecycle primitive returned a non-success status code.
    #[error("failed user operation ({status}) on {call}")]
    FailedUserOperation {
        status: UserOperationStatus,
        call: CallSignature,
    },
}

impl DevicePolicyError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Platform(_) => ErrorKind::GenericFailure,
            Self::InvalidResult { .. } => ErrorKind::InvalidResult,
            Self::FailedOperation { .. } => ErrorKind::FailedOperation,
            Self::FailedUserOperation { .. } => ErrorKind::FailedUserOperation,
        }
    }

    /// Signature of the call that produced a synthesized error.
    ///
    /// Platform faults carry no signature of their own.
    #[must_use]
    pub fn call(&self) -> Option<&CallSignature> {
        match self {
            Self::Platform(_) => None,
            Self::InvalidResult { call, .. }
            | Self::FailedOperation { call }
            | Self::FailedUserOperation { call, .. } => Some(call),
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<UserOperationStatus> {
        match self {
            Self::FailedUserOperation { status, .. } => Some(*status),
            _ => None,
        }
    }
}
