//! Domain service for the in-memory device policy plugin.
//!
//! One [`InMemoryDevice`] simulates a single physical device. Every handle it
//! hands out shares the same state behind a mutex, so a primary and a
//! parent-profile handle observe each other's writes the way two views of one
//! device would.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use device_policy_sdk::{
    AdminComponent, DevicePolicyPlatform, PasswordQuality, PlatformFault, PlatformServices,
    RestrictionBundle, SerialNumber, TransferBundle, UserHandle, UserManagerPlatform,
};
use parking_lot::Mutex;
use tracing::info;

use crate::config::{FaultConfig, InMemoryDpConfig, OwnerMode, ReturnOverrides};

use super::client::{DevicePolicyHandle, UserManagerHandle};

/// Which policy view a device-policy handle addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Primary,
    ParentProfile,
}

#[derive(Debug, Clone)]
pub(crate) struct UserRecord {
    pub serial: SerialNumber,
    pub name: Option<String>,
    pub running: bool,
    pub ephemeral: bool,
    pub icon_len: Option<usize>,
}

/// Policy values held separately for each scope.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScopedPolicy {
    pub restrictions: RestrictionBundle,
    pub password_quality: PasswordQuality,
}

impl ScopedPolicy {
    fn seeded(keys: &BTreeSet<String>, password_quality: PasswordQuality) -> Self {
        Self {
            restrictions: keys.iter().map(|k| (k.clone(), true)).collect(),
            password_quality,
        }
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        self.restrictions.get(key).copied().unwrap_or(false)
    }
}

/// Mutable state of the simulated device.
#[derive(Debug)]
pub(crate) struct DeviceState {
    pub admin: AdminComponent,
    pub active: bool,
    pub owner: OwnerMode,
    pub affiliated: bool,
    pub users: BTreeMap<UserHandle, UserRecord>,
    pub foreground: UserHandle,
    pub max_users: usize,
    pub next_user_id: u32,
    pub next_serial: u64,
    pub primary: ScopedPolicy,
    pub parent: ScopedPolicy,
    pub affiliation_ids: BTreeSet<String>,
    pub organization_name: Option<String>,
    pub network_logging: bool,
    pub packages: BTreeSet<String>,
    pub suspended_packages: BTreeSet<String>,
    pub user_control_disabled_packages: Vec<String>,
    pub transferred_to: Option<(AdminComponent, TransferBundle)>,
    pub lock_count: u32,
    pub reboot_count: u32,
    pub bugreport_count: u32,
    pub wiped: bool,
    pub overrides: ReturnOverrides,
    pub faults: FaultConfig,
    /// Primitives invoked so far, in call order.
    pub calls: Vec<&'static str>,
}

impl DeviceState {
    fn from_config(cfg: &InMemoryDpConfig) -> Self {
        let mut users = BTreeMap::new();
        users.insert(
            UserHandle::SYSTEM,
            UserRecord {
                serial: SerialNumber::new(0),
                name: Some("Owner".to_owned()),
                running: true,
                ephemeral: false,
                icon_len: None,
            },
        );
        for user in &cfg.users {
            users.insert(
                UserHandle::of(user.id),
                UserRecord {
                    serial: SerialNumber::new(user.serial),
                    name: user.name.clone(),
                    running: user.running,
                    ephemeral: false,
                    icon_len: None,
                },
            );
        }

        // Saturates at the top of the id space; creation then finds the id taken.
        let next_user_id = cfg
            .users
            .iter()
            .map(|u| u.id.saturating_add(1))
            .max()
            .unwrap_or(10)
            .max(10);
        let next_serial = cfg
            .users
            .iter()
            .map(|u| u.serial.saturating_add(1))
            .max()
            .unwrap_or(10)
            .max(10);

        let mut packages = cfg.packages.clone();
        packages.insert(cfg.admin.package().to_owned());

        Self {
            admin: cfg.admin.clone(),
            active: true,
            owner: cfg.owner,
            affiliated: cfg.affiliated,
            users,
            foreground: UserHandle::SYSTEM,
            max_users: cfg.max_users,
            next_user_id,
            next_serial,
            primary: ScopedPolicy::seeded(&cfg.restrictions, cfg.password_quality),
            parent: ScopedPolicy::seeded(&cfg.parent_restrictions, PasswordQuality::default()),
            affiliation_ids: cfg.affiliation_ids.clone(),
            organization_name: cfg.organization_name.clone(),
            network_logging: cfg.network_logging,
            packages,
            suspended_packages: cfg.suspended_packages.clone(),
            user_control_disabled_packages: cfg.user_control_disabled_packages.clone(),
            transferred_to: None,
            lock_count: 0,
            reboot_count: 0,
            bugreport_count: 0,
            wiped: false,
            overrides: cfg.overrides.clone(),
            faults: cfg.faults.clone(),
            calls: Vec::new(),
        }
    }

    /// Records the call and raises the injected fault, if any.
    pub fn enter(
        &mut self,
        primitive: &'static str,
        fault: impl FnOnce(&FaultConfig) -> &Option<PlatformFault>,
    ) -> Result<(), PlatformFault> {
        self.calls.push(primitive);
        match fault(&self.faults) {
            Some(f) => Err(f.clone()),
            None => Ok(()),
        }
    }

    pub fn require_admin(&self, admin: &AdminComponent) -> Result<(), PlatformFault> {
        if *admin == self.admin && self.active {
            Ok(())
        } else {
            Err(PlatformFault::Security(format!("no active admin {admin}")))
        }
    }

    pub fn require_device_owner(&self, admin: &AdminComponent) -> Result<(), PlatformFault> {
        self.require_admin(admin)?;
        if self.owner.is_device_owner() {
            Ok(())
        } else {
            Err(PlatformFault::Security(format!(
                "admin {admin} does not own the device"
            )))
        }
    }

    pub fn require_owner(&self, admin: &AdminComponent) -> Result<(), PlatformFault> {
        self.require_admin(admin)?;
        if self.owner.is_device_owner() || self.owner.is_profile_owner() {
            Ok(())
        } else {
            Err(PlatformFault::Security(format!(
                "admin {admin} is neither the device owner nor a profile owner"
            )))
        }
    }

    pub fn scoped(&self, scope: Scope) -> &ScopedPolicy {
        match scope {
            Scope::Primary => &self.primary,
            Scope::ParentProfile => &self.parent,
        }
    }

    pub fn scoped_mut(&mut self, scope: Scope) -> &mut ScopedPolicy {
        match scope {
            Scope::Primary => &mut self.primary,
            Scope::ParentProfile => &mut self.parent,
        }
    }

    pub fn serial_of(&self, user: UserHandle) -> Option<SerialNumber> {
        self.users.get(&user).map(|u| u.serial)
    }

    pub fn user_of(&self, serial: SerialNumber) -> Option<UserHandle> {
        self.users
            .iter()
            .find(|(_, record)| record.serial == serial)
            .map(|(handle, _)| *handle)
    }
}

/// Simulated device, seeded from [`InMemoryDpConfig`].
///
/// Cloning is cheap and yields another view of the same device.
#[derive(Clone)]
pub struct InMemoryDevice {
    state: Arc<Mutex<DeviceState>>,
}

impl InMemoryDevice {
    #[must_use]
    pub fn new(cfg: InMemoryDpConfig) -> Self {
        info!(
            admin = %cfg.admin,
            owner = ?cfg.owner,
            users = cfg.users.len(),
            "Seeding in-memory device"
        );
        Self {
            state: Arc::new(Mutex::new(DeviceState::from_config(&cfg))),
        }
    }

    /// Primitives invoked so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().calls.clone()
    }

    /// How many times `primitive` was invoked.
    #[must_use]
    pub fn call_count(&self, primitive: &str) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| **c == primitive)
            .count()
    }

    /// Handles of all users currently on the device.
    #[must_use]
    pub fn users(&self) -> Vec<UserHandle> {
        self.state.lock().users.keys().copied().collect()
    }

    #[must_use]
    pub fn foreground_user(&self) -> UserHandle {
        self.state.lock().foreground
    }

    #[must_use]
    pub fn is_running(&self, user: UserHandle) -> bool {
        self.state.lock().users.get(&user).is_some_and(|u| u.running)
    }

    #[must_use]
    pub fn owner(&self) -> OwnerMode {
        self.state.lock().owner
    }

    #[must_use]
    pub fn lock_count(&self) -> u32 {
        self.state.lock().lock_count
    }

    #[must_use]
    pub fn reboot_count(&self) -> u32 {
        self.state.lock().reboot_count
    }

    #[must_use]
    pub fn bugreport_count(&self) -> u32 {
        self.state.lock().bugreport_count
    }

    #[must_use]
    pub fn is_wiped(&self) -> bool {
        self.state.lock().wiped
    }

    /// Target and extras of the last ownership transfer.
    #[must_use]
    pub fn transferred_to(&self) -> Option<(AdminComponent, TransferBundle)> {
        self.state.lock().transferred_to.clone()
    }

    #[must_use]
    pub fn is_admin_active(&self) -> bool {
        self.state.lock().active
    }

    /// Raw restriction bundle of `scope`, including cleared keys.
    #[must_use]
    pub fn restriction_bundle(&self, scope: Scope) -> RestrictionBundle {
        self.state.lock().scoped(scope).restrictions.clone()
    }

    #[must_use]
    pub fn is_ephemeral(&self, user: UserHandle) -> bool {
        self.state.lock().users.get(&user).is_some_and(|u| u.ephemeral)
    }

    /// Size of the icon set on `user`, if any.
    #[must_use]
    pub fn user_icon_len(&self, user: UserHandle) -> Option<usize> {
        self.state.lock().users.get(&user).and_then(|u| u.icon_len)
    }

    #[must_use]
    pub fn user_name(&self, user: UserHandle) -> Option<String> {
        self.state.lock().users.get(&user).and_then(|u| u.name.clone())
    }

    pub(crate) fn handle(&self, scope: Scope) -> DevicePolicyHandle {
        DevicePolicyHandle::new(Arc::clone(&self.state), scope)
    }
}

impl PlatformServices for InMemoryDevice {
    fn admin_component(&self) -> AdminComponent {
        self.state.lock().admin.clone()
    }

    fn device_policy(&self) -> Arc<dyn DevicePolicyPlatform> {
        Arc::new(self.handle(Scope::Primary))
    }

    fn user_manager(&self) -> Arc<dyn UserManagerPlatform> {
        Arc::new(UserManagerHandle::new(Arc::clone(&self.state)))
    }
}
