//! Client implementation for the in-memory device policy plugin.
//!
//! Implements the platform traits on handles sharing one [`DeviceState`].

use std::collections::BTreeSet;
use std::sync::Arc;

use device_policy_sdk::{
    AdminComponent, CreateUserFlags, DevicePolicyPlatform, LockFlags, PasswordQuality,
    PlatformFault, RestrictionBundle, SerialNumber, TransferBundle, UserHandle, UserIcon,
    UserManagerPlatform, UserOperationStatus, WipeFlags,
};
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, info};

use super::service::{DeviceState, Scope, UserRecord};
use crate::config::{FaultConfig, OwnerMode};

/// Users that may run at the same time, the foreground user included.
const MAX_RUNNING_USERS: usize = 3;

type FaultSlot = fn(&FaultConfig) -> &Option<PlatformFault>;

/// Device-policy view of the simulated device.
pub struct DevicePolicyHandle {
    state: Arc<Mutex<DeviceState>>,
    scope: Scope,
}

impl DevicePolicyHandle {
    pub(crate) fn new(state: Arc<Mutex<DeviceState>>, scope: Scope) -> Self {
        Self { state, scope }
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Locks the device, records the call and raises its injected fault.
    fn enter(
        &self,
        primitive: &'static str,
        fault: FaultSlot,
    ) -> Result<MutexGuard<'_, DeviceState>, PlatformFault> {
        let mut state = self.state.lock();
        state.enter(primitive, fault)?;
        Ok(state)
    }

    fn enter_query(&self, primitive: &'static str) -> MutexGuard<'_, DeviceState> {
        let mut state = self.state.lock();
        state.calls.push(primitive);
        state
    }

    fn primary_only(&self, primitive: &str) -> Result<(), PlatformFault> {
        match self.scope {
            Scope::Primary => Ok(()),
            Scope::ParentProfile => Err(PlatformFault::Security(format!(
                "{primitive} is not available on the parent profile instance"
            ))),
        }
    }
}

impl DevicePolicyPlatform for DevicePolicyHandle {
    fn is_profile_owner_app(&self, package: &str) -> Result<bool, PlatformFault> {
        let state = self.enter_query("is_profile_owner_app");
        Ok(state.active && state.owner.is_profile_owner() && package == state.admin.package())
    }

    fn is_device_owner_app(&self, package: &str) -> Result<bool, PlatformFault> {
        let state = self.enter_query("is_device_owner_app");
        Ok(state.active && state.owner.is_device_owner() && package == state.admin.package())
    }

    fn create_and_manage_user(
        &self,
        admin: &AdminComponent,
        name: Option<&str>,
        profile_owner: &AdminComponent,
        _admin_extras: Option<&TransferBundle>,
        flags: CreateUserFlags,
    ) -> Result<Option<UserHandle>, PlatformFault> {
        let mut state = self.enter("create_and_manage_user", |f| &f.create_and_manage_user)?;
        self.primary_only("create_and_manage_user")?;
        state.require_device_owner(admin)?;
        if !state.packages.contains(profile_owner.package()) {
            return Err(PlatformFault::IllegalArgument(format!(
                "profile owner {profile_owner} is not installed"
            )));
        }
        if state.overrides.create_user_returns_null || state.users.len() >= state.max_users {
            debug!(users = state.users.len(), "Declining user creation");
            return Ok(None);
        }

        let handle = UserHandle::of(state.next_user_id);
        let serial = SerialNumber::new(state.next_serial);
        if state.users.contains_key(&handle) || state.users.values().any(|u| u.serial == serial) {
            debug!(user = %handle, %serial, "User ids exhausted, declining user creation");
            return Ok(None);
        }
        state.next_user_id = state.next_user_id.saturating_add(1);
        state.next_serial = state.next_serial.saturating_add(1);
        state.users.insert(
            handle,
            UserRecord {
                serial,
                name: name.map(str::to_owned),
                running: false,
                ephemeral: flags.contains(CreateUserFlags::MAKE_USER_EPHEMERAL),
                icon_len: None,
            },
        );
        info!(user = %handle, %serial, "User created");
        Ok(Some(handle))
    }

    fn set_user_icon(&self, admin: &AdminComponent, icon: &UserIcon) -> Result<(), PlatformFault> {
        let mut state = self.enter("set_user_icon", |f| &f.set_user_icon)?;
        self.primary_only("set_user_icon")?;
        state.require_owner(admin)?;
        let foreground = state.foreground;
        if let Some(user) = state.users.get_mut(&foreground) {
            user.icon_len = Some(icon.as_bytes().len());
        }
        Ok(())
    }

    fn remove_user(&self, admin: &AdminComponent, user: UserHandle) -> Result<bool, PlatformFault> {
        let mut state = self.enter("remove_user", |f| &f.remove_user)?;
        self.primary_only("remove_user")?;
        state.require_device_owner(admin)?;
        if let Some(forced) = state.overrides.remove_user {
            return Ok(forced);
        }
        if user == UserHandle::SYSTEM || state.users.remove(&user).is_none() {
            return Ok(false);
        }
        if state.foreground == user {
            state.foreground = UserHandle::SYSTEM;
        }
        info!(%user, "User removed");
        Ok(true)
    }

    fn switch_user(&self, admin: &AdminComponent, user: UserHandle) -> Result<bool, PlatformFault> {
        let mut state = self.enter("switch_user", |f| &f.switch_user)?;
        self.primary_only("switch_user")?;
        state.require_device_owner(admin)?;
        if let Some(forced) = state.overrides.switch_user {
            return Ok(forced);
        }
        let Some(record) = state.users.get_mut(&user) else {
            return Ok(false);
        };
        record.running = true;
        state.foreground = user;
        Ok(true)
    }

    fn start_user_in_background(
        &self,
        admin: &AdminComponent,
        user: UserHandle,
    ) -> Result<UserOperationStatus, PlatformFault> {
        let mut state = self.enter("start_user_in_background", |f| &f.start_user_in_background)?;
        self.primary_only("start_user_in_background")?;
        state.require_device_owner(admin)?;
        if let Some(code) = state.overrides.start_user_status {
            return Ok(UserOperationStatus::from_code(code));
        }
        let running = state.users.values().filter(|u| u.running).count();
        let Some(record) = state.users.get_mut(&user) else {
            return Ok(UserOperationStatus::ERROR_UNKNOWN);
        };
        if !record.running && running >= MAX_RUNNING_USERS {
            return Ok(UserOperationStatus::ERROR_MAX_RUNNING_USERS);
        }
        record.running = true;
        Ok(UserOperationStatus::SUCCESS)
    }

    fn stop_user(
        &self,
        admin: &AdminComponent,
        user: UserHandle,
    ) -> Result<UserOperationStatus, PlatformFault> {
        let mut state = self.enter("stop_user", |f| &f.stop_user)?;
        self.primary_only("stop_user")?;
        state.require_device_owner(admin)?;
        if let Some(code) = state.overrides.stop_user_status {
            return Ok(UserOperationStatus::from_code(code));
        }
        if state.foreground == user {
            return Ok(UserOperationStatus::ERROR_CURRENT_USER);
        }
        match state.users.get_mut(&user) {
            Some(record) => {
                record.running = false;
                Ok(UserOperationStatus::SUCCESS)
            }
            None => Ok(UserOperationStatus::ERROR_UNKNOWN),
        }
    }

    fn is_affiliated_user(&self) -> Result<bool, PlatformFault> {
        let state = self.enter("is_affiliated_user", |f| &f.is_affiliated_user)?;
        Ok(state.affiliated)
    }

    fn set_affiliation_ids(
        &self,
        admin: &AdminComponent,
        ids: &BTreeSet<String>,
    ) -> Result<(), PlatformFault> {
        let mut state = self.enter("set_affiliation_ids", |f| &f.set_affiliation_ids)?;
        self.primary_only("set_affiliation_ids")?;
        state.require_owner(admin)?;
        if ids.iter().any(String::is_empty) {
            return Err(PlatformFault::IllegalArgument(
                "affiliation ids must not be empty".to_owned(),
            ));
        }
        state.affiliation_ids.clone_from(ids);
        Ok(())
    }

    fn affiliation_ids(&self, admin: &AdminComponent) -> Result<BTreeSet<String>, PlatformFault> {
        let state = self.enter("affiliation_ids", |f| &f.affiliation_ids)?;
        self.primary_only("affiliation_ids")?;
        state.require_admin(admin)?;
        Ok(state.affiliation_ids.clone())
    }

    fn user_restrictions(
        &self,
        admin: &AdminComponent,
    ) -> Result<RestrictionBundle, PlatformFault> {
        let state = self.enter("user_restrictions", |f| &f.user_restrictions)?;
        state.require_admin(admin)?;
        Ok(state.scoped(self.scope).restrictions.clone())
    }

    fn add_user_restriction(&self, admin: &AdminComponent, key: &str) -> Result<(), PlatformFault> {
        let mut state = self.enter("add_user_restriction", |f| &f.add_user_restriction)?;
        require_restriction_owner(&state, self.scope, admin)?;
        state
            .scoped_mut(self.scope)
            .restrictions
            .insert(key.to_owned(), true);
        info!(restriction = key, scope = ?self.scope, "User restriction added");
        Ok(())
    }

    fn clear_user_restriction(
        &self,
        admin: &AdminComponent,
        key: &str,
    ) -> Result<(), PlatformFault> {
        let mut state = self.enter("clear_user_restriction", |f| &f.clear_user_restriction)?;
        require_restriction_owner(&state, self.scope, admin)?;
        // Cleared keys stay in the bundle, reported as false.
        state
            .scoped_mut(self.scope)
            .restrictions
            .insert(key.to_owned(), false);
        info!(restriction = key, scope = ?self.scope, "User restriction cleared");
        Ok(())
    }

    fn lock_now(&self, flags: Option<LockFlags>) -> Result<(), PlatformFault> {
        let mut state = self.enter("lock_now", |f| &f.lock_now)?;
        state.lock_count += 1;
        debug!(flags = ?flags, count = state.lock_count, "Device locked");
        Ok(())
    }

    fn reboot(&self, admin: &AdminComponent) -> Result<(), PlatformFault> {
        let mut state = self.enter("reboot", |f| &f.reboot)?;
        self.primary_only("reboot")?;
        state.require_device_owner(admin)?;
        state.reboot_count += 1;
        Ok(())
    }

    fn wipe_data(&self, flags: WipeFlags) -> Result<(), PlatformFault> {
        let mut state = self.enter("wipe_data", |f| &f.wipe_data)?;
        if !state.active {
            return Err(PlatformFault::Security("no active admin".to_owned()));
        }
        state.wiped = true;
        state.users.retain(|handle, _| *handle == UserHandle::SYSTEM);
        state.foreground = UserHandle::SYSTEM;
        info!(%flags, scope = ?self.scope, "Data wiped");
        Ok(())
    }

    fn request_bugreport(&self, admin: &AdminComponent) -> Result<bool, PlatformFault> {
        let mut state = self.enter("request_bugreport", |f| &f.request_bugreport)?;
        self.primary_only("request_bugreport")?;
        state.require_device_owner(admin)?;
        if let Some(forced) = state.overrides.request_bugreport {
            return Ok(forced);
        }
        state.bugreport_count += 1;
        Ok(true)
    }

    fn set_network_logging_enabled(
        &self,
        admin: &AdminComponent,
        enabled: bool,
    ) -> Result<(), PlatformFault> {
        let mut state =
            self.enter("set_network_logging_enabled", |f| &f.set_network_logging_enabled)?;
        self.primary_only("set_network_logging_enabled")?;
        state.require_device_owner(admin)?;
        state.network_logging = enabled;
        Ok(())
    }

    fn is_network_logging_enabled(&self, admin: &AdminComponent) -> Result<bool, PlatformFault> {
        let state = self.enter_query("is_network_logging_enabled");
        state.require_admin(admin)?;
        Ok(state.network_logging)
    }

    fn set_organization_name(
        &self,
        admin: &AdminComponent,
        name: Option<&str>,
    ) -> Result<(), PlatformFault> {
        let mut state = self.enter("set_organization_name", |f| &f.set_organization_name)?;
        self.primary_only("set_organization_name")?;
        state.require_owner(admin)?;
        state.organization_name = name.map(str::to_owned);
        Ok(())
    }

    fn organization_name(&self, admin: &AdminComponent) -> Result<Option<String>, PlatformFault> {
        let state = self.enter_query("organization_name");
        state.require_admin(admin)?;
        Ok(state.organization_name.clone())
    }

    fn set_user_control_disabled_packages(
        &self,
        admin: &AdminComponent,
        packages: &[String],
    ) -> Result<(), PlatformFault> {
        let mut state = self.enter(
            "set_user_control_disabled_packages",
            |f| &f.set_user_control_disabled_packages,
        )?;
        self.primary_only("set_user_control_disabled_packages")?;
        state.require_device_owner(admin)?;
        state.user_control_disabled_packages = packages.to_vec();
        Ok(())
    }

    fn user_control_disabled_packages(
        &self,
        admin: &AdminComponent,
    ) -> Result<Vec<String>, PlatformFault> {
        let state = self.enter_query("user_control_disabled_packages");
        state.require_admin(admin)?;
        Ok(state.user_control_disabled_packages.clone())
    }

    fn remove_active_admin(&self, admin: &AdminComponent) -> Result<(), PlatformFault> {
        let mut state = self.enter("remove_active_admin", |f| &f.remove_active_admin)?;
        self.primary_only("remove_active_admin")?;
        state.require_admin(admin)?;
        state.active = false;
        state.owner = OwnerMode::None;
        info!(%admin, "Active admin removed");
        Ok(())
    }

    fn clear_device_owner_app(&self, package: &str) -> Result<(), PlatformFault> {
        let mut state = self.enter("clear_device_owner_app", |f| &f.clear_device_owner_app)?;
        self.primary_only("clear_device_owner_app")?;
        if !state.owner.is_device_owner() || package != state.admin.package() {
            return Err(PlatformFault::Security(format!(
                "{package} is not the device owner"
            )));
        }
        state.owner = OwnerMode::None;
        Ok(())
    }

    fn clear_profile_owner(&self, admin: &AdminComponent) -> Result<(), PlatformFault> {
        let mut state = self.enter("clear_profile_owner", |f| &f.clear_profile_owner)?;
        self.primary_only("clear_profile_owner")?;
        state.require_admin(admin)?;
        if !state.owner.is_profile_owner() {
            return Err(PlatformFault::Security(format!(
                "{admin} is not the profile owner"
            )));
        }
        state.owner = OwnerMode::None;
        Ok(())
    }

    fn set_password_quality(
        &self,
        admin: &AdminComponent,
        quality: PasswordQuality,
    ) -> Result<(), PlatformFault> {
        let mut state = self.enter("set_password_quality", |f| &f.set_password_quality)?;
        state.require_owner(admin)?;
        state.scoped_mut(self.scope).password_quality = quality;
        Ok(())
    }

    fn password_quality(&self, admin: &AdminComponent) -> Result<PasswordQuality, PlatformFault> {
        let state = self.enter_query("password_quality");
        state.require_admin(admin)?;
        Ok(state.scoped(self.scope).password_quality)
    }

    fn transfer_ownership(
        &self,
        admin: &AdminComponent,
        target: &AdminComponent,
        bundle: Option<&TransferBundle>,
    ) -> Result<(), PlatformFault> {
        let mut state = self.enter("transfer_ownership", |f| &f.transfer_ownership)?;
        self.primary_only("transfer_ownership")?;
        state.require_owner(admin)?;
        if target == admin {
            return Err(PlatformFault::IllegalArgument(
                "cannot transfer ownership to the current owner".to_owned(),
            ));
        }
        if !state.packages.contains(target.package()) {
            return Err(PlatformFault::IllegalArgument(format!(
                "unknown admin: {target}"
            )));
        }
        state.transferred_to = Some((target.clone(), bundle.cloned().unwrap_or_default()));
        state.owner = OwnerMode::None;
        state.active = false;
        info!(from = %admin, to = %target, "Ownership transferred");
        Ok(())
    }

    fn set_packages_suspended(
        &self,
        admin: &AdminComponent,
        packages: &[String],
        suspended: bool,
    ) -> Result<Vec<String>, PlatformFault> {
        let mut state = self.enter("set_packages_suspended", |f| &f.set_packages_suspended)?;
        self.primary_only("set_packages_suspended")?;
        state.require_owner(admin)?;

        let mut failed = Vec::new();
        for package in packages {
            if !state.packages.contains(package) || package == state.admin.package() {
                failed.push(package.clone());
            } else if suspended {
                state.suspended_packages.insert(package.clone());
            } else {
                state.suspended_packages.remove(package);
            }
        }
        Ok(failed)
    }

    fn is_package_suspended(
        &self,
        admin: &AdminComponent,
        package: &str,
    ) -> Result<bool, PlatformFault> {
        let state = self.enter_query("is_package_suspended");
        self.primary_only("is_package_suspended")?;
        state.require_admin(admin)?;
        if !state.packages.contains(package) {
            return Err(PlatformFault::NameNotFound(package.to_owned()));
        }
        Ok(state.suspended_packages.contains(package))
    }

    fn parent_profile_instance(
        &self,
        admin: &AdminComponent,
    ) -> Result<Arc<dyn DevicePolicyPlatform>, PlatformFault> {
        let state = self.enter("parent_profile_instance", |f| &f.parent_profile_instance)?;
        if self.scope == Scope::ParentProfile {
            return Err(PlatformFault::IllegalState(
                "already a parent profile instance".to_owned(),
            ));
        }
        state.require_admin(admin)?;
        if !state.owner.is_profile_owner() {
            return Err(PlatformFault::Security(format!(
                "{admin} is not the profile owner of a managed profile"
            )));
        }
        Ok(Arc::new(Self::new(
            Arc::clone(&self.state),
            Scope::ParentProfile,
        )))
    }
}

/// Restrictions on the parent profile need an organization-owned profile owner.
fn require_restriction_owner(
    state: &DeviceState,
    scope: Scope,
    admin: &AdminComponent,
) -> Result<(), PlatformFault> {
    state.require_owner(admin)?;
    if scope == Scope::ParentProfile && state.owner != OwnerMode::OrgOwnedProfileOwner {
        return Err(PlatformFault::Security(format!(
            "{admin} cannot set restrictions on the parent profile of a personal device"
        )));
    }
    Ok(())
}

/// User-management view of the simulated device.
pub struct UserManagerHandle {
    state: Arc<Mutex<DeviceState>>,
}

impl UserManagerHandle {
    pub(crate) fn new(state: Arc<Mutex<DeviceState>>) -> Self {
        Self { state }
    }
}

impl UserManagerPlatform for UserManagerHandle {
    fn user_for_serial_number(
        &self,
        serial: SerialNumber,
    ) -> Result<Option<UserHandle>, PlatformFault> {
        let mut state = self.state.lock();
        state.enter("user_for_serial_number", |f| &f.user_for_serial_number)?;
        Ok(state.user_of(serial))
    }

    fn serial_number_for_user(
        &self,
        user: UserHandle,
    ) -> Result<Option<SerialNumber>, PlatformFault> {
        let mut state = self.state.lock();
        state.calls.push("serial_number_for_user");
        Ok(state.serial_of(user))
    }

    fn has_user_restriction(&self, key: &str) -> Result<bool, PlatformFault> {
        let mut state = self.state.lock();
        state.enter("has_user_restriction", |f| &f.has_user_restriction)?;
        Ok(state.primary.is_enabled(key) || state.parent.is_enabled(key))
    }
}
