//! Configuration for the in-memory device policy plugin.

use std::collections::BTreeSet;

use device_policy_sdk::{AdminComponent, PasswordQuality, PlatformFault};
use serde::{Deserialize, Serialize};

/// Seed state of the simulated device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InMemoryDpConfig {
    /// Registered admin component of the calling app.
    #[serde(default = "default_admin")]
    pub admin: AdminComponent,

    /// How the admin is provisioned.
    pub owner: OwnerMode,

    /// Whether the calling user is affiliated with the device owner.
    #[serde(default = "default_true")]
    pub affiliated: bool,

    /// Secondary users present at start; the system user always exists.
    pub users: Vec<UserConfig>,

    /// Maximum number of users including the system user.
    #[serde(default = "default_max_users")]
    pub max_users: usize,

    /// Restrictions the admin has enabled on the calling user.
    pub restrictions: BTreeSet<String>,

    /// Restrictions the admin has enabled on the parent profile.
    pub parent_restrictions: BTreeSet<String>,

    pub affiliation_ids: BTreeSet<String>,

    pub organization_name: Option<String>,

    pub password_quality: PasswordQuality,

    pub network_logging: bool,

    /// Installed packages other than the admin's own.
    #[serde(default = "default_packages")]
    pub packages: BTreeSet<String>,

    pub suspended_packages: BTreeSet<String>,

    pub user_control_disabled_packages: Vec<String>,

    /// Forced return values of primitives that report failure by value.
    pub overrides: ReturnOverrides,

    /// Faults raised by primitives instead of running them.
    pub faults: FaultConfig,
}

fn default_admin() -> AdminComponent {
    AdminComponent::new("com.afwsamples.testdpc", ".DeviceAdminReceiver")
        .unwrap_or_else(|_| unreachable!("static component name is valid"))
}

fn default_true() -> bool {
    true
}

fn default_max_users() -> usize {
    4
}

fn default_packages() -> BTreeSet<String> {
    ["com.android.chrome", "com.google.android.gm", "com.google.android.youtube"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

impl Default for InMemoryDpConfig {
    fn default() -> Self {
        Self {
            admin: default_admin(),
            owner: OwnerMode::default(),
            affiliated: default_true(),
            users: Vec::new(),
            max_users: default_max_users(),
            restrictions: BTreeSet::new(),
            parent_restrictions: BTreeSet::new(),
            affiliation_ids: BTreeSet::new(),
            organization_name: None,
            password_quality: PasswordQuality::default(),
            network_logging: false,
            packages: default_packages(),
            suspended_packages: BTreeSet::new(),
            user_control_disabled_packages: Vec::new(),
            overrides: ReturnOverrides::default(),
            faults: FaultConfig::default(),
        }
    }
}

/// How the admin component is provisioned on the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerMode {
    #[default]
    DeviceOwner,
    ProfileOwner,
    /// Profile owner of a managed profile on an organization-owned device.
    OrgOwnedProfileOwner,
    /// Active admin with no ownership.
    None,
}

impl OwnerMode {
    #[must_use]
    pub const fn is_device_owner(self) -> bool {
        matches!(self, Self::DeviceOwner)
    }

    #[must_use]
    pub const fn is_profile_owner(self) -> bool {
        matches!(self, Self::ProfileOwner | Self::OrgOwnedProfileOwner)
    }
}

/// A secondary user present at start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    /// Runtime user id.
    pub id: u32,

    /// Stable serial number.
    pub serial: u64,

    #[serde(default)]
    pub name: Option<String>,

    /// Whether the user starts running in the background.
    #[serde(default)]
    pub running: bool,
}

/// Forced return values.
///
/// `None` lets the simulation decide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReturnOverrides {
    /// Make user creation return no handle.
    pub create_user_returns_null: bool,
    pub remove_user: Option<bool>,
    pub switch_user: Option<bool>,
    pub request_bugreport: Option<bool>,
    /// Raw status code returned by start-user-in-background.
    pub start_user_status: Option<i32>,
    /// Raw status code returned by stop-user.
    pub stop_user_status: Option<i32>,
}

/// Injected faults, one slot per primitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaultConfig {
    pub create_and_manage_user: Option<PlatformFault>,
    pub set_user_icon: Option<PlatformFault>,
    pub remove_user: Option<PlatformFault>,
    pub switch_user: Option<PlatformFault>,
    pub start_user_in_background: Option<PlatformFault>,
    pub stop_user: Option<PlatformFault>,
    pub is_affiliated_user: Option<PlatformFault>,
    pub set_affiliation_ids: Option<PlatformFault>,
    pub affiliation_ids: Option<PlatformFault>,
    pub user_restrictions: Option<PlatformFault>,
    pub add_user_restriction: Option<PlatformFault>,
    pub clear_user_restriction: Option<PlatformFault>,
    pub lock_now: Option<PlatformFault>,
    pub reboot: Option<PlatformFault>,
    pub wipe_data: Option<PlatformFault>,
    pub request_bugreport: Option<PlatformFault>,
    pub set_network_logging_enabled: Option<PlatformFault>,
    pub set_organization_name: Option<PlatformFault>,
    pub set_user_control_disabled_packages: Option<PlatformFault>,
    pub remove_active_admin: Option<PlatformFault>,
    pub clear_device_owner_app: Option<PlatformFault>,
    pub clear_profile_owner: Option<PlatformFault>,
    pub set_password_quality: Option<PlatformFault>,
    pub transfer_ownership: Option<PlatformFault>,
    pub set_packages_suspended: Option<PlatformFault>,
    pub parent_profile_instance: Option<PlatformFault>,
    pub user_for_serial_number: Option<PlatformFault>,
    pub has_user_restriction: Option<PlatformFault>,
}
