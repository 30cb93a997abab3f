//! Domain models for the device policy gateway.

use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key to enabled-flag mapping of user restrictions, as reported by the platform.
pub type RestrictionBundle = BTreeMap<String, bool>;

/// Extras handed to the new owner on ownership transfer, or to the admin of a new user.
pub type TransferBundle = BTreeMap<String, String>;

/// Errors produced when building an [`AdminComponent`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidComponentError {
    #[error("component package must not be empty")]
    EmptyPackage,

    #[error("component class must not be empty")]
    EmptyClass,

    #[error("malformed component name '{0}': expected <package>/<class>")]
    Malformed(String),
}

/// Identity of the registered device-admin component.
///
/// All policy operations execute under the authority of exactly one admin
/// component. A class starting with `.` is relative to the package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdminComponent {
    package: String,
    class: String,
}

impl AdminComponent {
    /// Builds a component from its package and class names.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidComponentError`] if either part is blank.
    pub fn new(
        package: impl Into<String>,
        class: impl Into<String>,
    ) -> Result<Self, InvalidComponentError> {
        let package = package.into();
        let class = class.into();

        if package.trim().is_empty() {
            return Err(InvalidComponentError::EmptyPackage);
        }
        if class.trim().is_empty() || class == "." {
            return Err(InvalidComponentError::EmptyClass);
        }

        let class = if class.starts_with('.') {
            format!("{package}{class}")
        } else {
            class
        };

        Ok(Self { package, class })
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Fully-qualified class name.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }
}

impl fmt::Display for AdminComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class.strip_prefix(self.package.as_str()) {
            Some(suffix) if suffix.starts_with('.') => write!(f, "{}/{suffix}", self.package),
            _ => write!(f, "{}/{}", self.package, self.class),
        }
    }
}

impl FromStr for AdminComponent {
    type Err = InvalidComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (package, class) = s
            .split_once('/')
            .ok_or_else(|| InvalidComponentError::Malformed(s.to_owned()))?;
        Self::new(package, class)
    }
}

impl TryFrom<String> for AdminComponent {
    type Error = InvalidComponentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AdminComponent> for String {
    fn from(value: AdminComponent) -> Self {
        value.to_string()
    }
}

/// Opaque identifier of an Android user or profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserHandle(u32);

impl UserHandle {
    /// The system user.
    pub const SYSTEM: Self = Self(0);

    #[must_use]
    pub const fn of(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserHandle{{{}}}", self.0)
    }
}

/// Stable serial number of a user, distinct from its runtime handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerialNumber(u64);

impl SerialNumber {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SerialNumber {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Status code returned by user lifecycle primitives.
///
/// The raw code is always preserved, including codes outside the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserOperationStatus(i32);

impl UserOperationStatus {
    pub const SUCCESS: Self = Self(0);
    pub const ERROR_UNKNOWN: Self = Self(1);
    pub const ERROR_MANAGED_PROFILE: Self = Self(2);
    pub const ERROR_MAX_RUNNING_USERS: Self = Self(3);
    pub const ERROR_CURRENT_USER: Self = Self(4);
    pub const ERROR_LOW_STORAGE: Self = Self(5);
    pub const ERROR_MAX_USERS: Self = Self(6);

    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        Self(code)
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    /// Symbolic name of a known status code.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("USER_OPERATION_SUCCESS"),
            1 => Some("USER_OPERATION_ERROR_UNKNOWN"),
            2 => Some("USER_OPERATION_ERROR_MANAGED_PROFILE"),
            3 => Some("USER_OPERATION_ERROR_MAX_RUNNING_USERS"),
            4 => Some("USER_OPERATION_ERROR_CURRENT_USER"),
            5 => Some("USER_OPERATION_ERROR_LOW_STORAGE"),
            6 => Some("USER_OPERATION_ERROR_MAX_USERS"),
            _ => None,
        }
    }
}

impl fmt::Display for UserOperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}({})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

bitflags! {
    /// Flags accepted by managed user creation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CreateUserFlags: u32 {
        const SKIP_SETUP_WIZARD = 0x0001;
        const MAKE_USER_EPHEMERAL = 0x0002;
        const LEAVE_ALL_SYSTEM_APPS_ENABLED = 0x0010;

        // Raw flags from the command line may carry bits without a name here.
        const _ = !0;
    }

    /// Flags accepted by the lock-now primitive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct LockFlags: u32 {
        const EVICT_CREDENTIAL_ENCRYPTION_KEY = 0x0001;

        const _ = !0;
    }

    /// Flags accepted by factory reset.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct WipeFlags: u32 {
        const WIPE_EXTERNAL_STORAGE = 0x0001;
        const WIPE_RESET_PROTECTION_DATA = 0x0002;
        const WIPE_EUICC = 0x0004;
        const WIPE_SILENTLY = 0x0008;

        const _ = !0;
    }
}

/// Flags render as the decimal value the platform receives.
macro_rules! decimal_flags {
    ($($name:ident),*) => {$(
        impl Default for $name {
            fn default() -> Self {
                Self::empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.bits())
            }
        }
    )*};
}

decimal_flags!(CreateUserFlags, LockFlags, WipeFlags);

/// Minimum password quality the admin can require.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordQuality {
    #[default]
    Unspecified,
    BiometricWeak,
    Something,
    Numeric,
    NumericComplex,
    Alphabetic,
    Alphanumeric,
    Complex,
    Managed,
}

impl PasswordQuality {
    /// Platform integer code of this quality level.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Unspecified => 0,
            Self::BiometricWeak => 0x8000,
            Self::Something => 0x1_0000,
            Self::Numeric => 0x2_0000,
            Self::NumericComplex => 0x3_0000,
            Self::Alphabetic => 0x4_0000,
            Self::Alphanumeric => 0x5_0000,
            Self::Complex => 0x6_0000,
            Self::Managed => 0x8_0000,
        }
    }

    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Unspecified),
            0x8000 => Some(Self::BiometricWeak),
            0x1_0000 => Some(Self::Something),
            0x2_0000 => Some(Self::Numeric),
            0x3_0000 => Some(Self::NumericComplex),
            0x4_0000 => Some(Self::Alphabetic),
            0x5_0000 => Some(Self::Alphanumeric),
            0x6_0000 => Some(Self::Complex),
            0x8_0000 => Some(Self::Managed),
            _ => None,
        }
    }
}

impl fmt::Display for PasswordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unspecified => "unspecified",
            Self::BiometricWeak => "biometric_weak",
            Self::Something => "something",
            Self::Numeric => "numeric",
            Self::NumericComplex => "numeric_complex",
            Self::Alphabetic => "alphabetic",
            Self::Alphanumeric => "alphanumeric",
            Self::Complex => "complex",
            Self::Managed => "managed",
        };
        f.write_str(name)
    }
}

/// Encoded bitmap used as a user icon.
#[derive(Clone, PartialEq, Eq)]
pub struct UserIcon(Vec<u8>);

impl UserIcon {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for UserIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserIcon({} bytes)", self.0.len())
    }
}

impl fmt::Display for UserIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
