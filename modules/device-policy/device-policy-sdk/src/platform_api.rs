//! Platform primitives wrapped by the gateway.
//!
//! Implementations talk to the real device-management and user-management
//! services, or simulate them for tests. Every primitive returns the
//! platform's natural value (which may itself signal failure, e.g. `false` or
//! `None`) or a [`PlatformFault`]; judging that value is the gateway's job.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::PlatformFault;
use crate::models::{
    AdminComponent, CreateUserFlags, LockFlags, PasswordQuality, RestrictionBundle, SerialNumber,
    TransferBundle, UserHandle, UserIcon, UserOperationStatus, WipeFlags,
};

/// Device-management service primitive.
///
/// Methods taking an `admin` execute under that admin's authority.
#[allow(clippy::missing_errors_doc)]
pub trait DevicePolicyPlatform: Send + Sync {
    fn is_profile_owner_app(&self, package: &str) -> Result<bool, PlatformFault>;

    fn is_device_owner_app(&self, package: &str) -> Result<bool, PlatformFault>;

    /// Returns `None` when the platform declines to create the user.
    fn create_and_manage_user(
        &self,
        admin: &AdminComponent,
        name: Option<&str>,
        profile_owner: &AdminComponent,
        admin_extras: Option<&TransferBundle>,
        flags: CreateUserFlags,
    ) -> Result<Option<UserHandle>, PlatformFault>;

    fn set_user_icon(&self, admin: &AdminComponent, icon: &UserIcon) -> Result<(), PlatformFault>;

    fn remove_user(&self, admin: &AdminComponent, user: UserHandle)
    -> Result<bool, PlatformFault>;

    fn switch_user(&self, admin: &AdminComponent, user: UserHandle)
    -> Result<bool, PlatformFault>;

    fn start_user_in_background(
        &self,
        admin: &AdminComponent,
        user: UserHandle,
    ) -> Result<UserOperationStatus, PlatformFault>;

    fn stop_user(
        &self,
        admin: &AdminComponent,
        user: UserHandle,
    ) -> Result<UserOperationStatus, PlatformFault>;

    fn is_affiliated_user(&self) -> Result<bool, PlatformFault>;

    /// Replaces the affiliation id set; an empty set clears it.
    fn set_affiliation_ids(
        &self,
        admin: &AdminComponent,
        ids: &BTreeSet<String>,
    ) -> Result<(), PlatformFault>;

    fn affiliation_ids(&self, admin: &AdminComponent) -> Result<BTreeSet<String>, PlatformFault>;

    /// Full key to flag mapping of restrictions set by `admin`, including
    /// keys whose flag is `false`.
    fn user_restrictions(&self, admin: &AdminComponent)
    -> Result<RestrictionBundle, PlatformFault>;

    fn add_user_restriction(&self, admin: &AdminComponent, key: &str)
    -> Result<(), PlatformFault>;

    fn clear_user_restriction(
        &self,
        admin: &AdminComponent,
        key: &str,
    ) -> Result<(), PlatformFault>;

    fn lock_now(&self, flags: Option<LockFlags>) -> Result<(), PlatformFault>;

    fn reboot(&self, admin: &AdminComponent) -> Result<(), PlatformFault>;

    fn wipe_data(&self, flags: WipeFlags) -> Result<(), PlatformFault>;

    fn request_bugreport(&self, admin: &AdminComponent) -> Result<bool, PlatformFault>;

    fn set_network_logging_enabled(
        &self,
        admin: &AdminComponent,
        enabled: bool,
    ) -> Result<(), PlatformFault>;

    fn is_network_logging_enabled(&self, admin: &AdminComponent) -> Result<bool, PlatformFault>;

    fn set_organization_name(
        &self,
        admin: &AdminComponent,
        name: Option<&str>,
    ) -> Result<(), PlatformFault>;

    fn organization_name(&self, admin: &AdminComponent) -> Result<Option<String>, PlatformFault>;

    fn set_user_control_disabled_packages(
        &self,
        admin: &AdminComponent,
        packages: &[String],
    ) -> Result<(), PlatformFault>;

    fn user_control_disabled_packages(
        &self,
        admin: &AdminComponent,
    ) -> Result<Vec<String>, PlatformFault>;

    fn remove_active_admin(&self, admin: &AdminComponent) -> Result<(), PlatformFault>;

    fn clear_device_owner_app(&self, package: &str) -> Result<(), PlatformFault>;

    fn clear_profile_owner(&self, admin: &AdminComponent) -> Result<(), PlatformFault>;

    fn set_password_quality(
        &self,
        admin: &AdminComponent,
        quality: PasswordQuality,
    ) -> Result<(), PlatformFault>;

    fn password_quality(&self, admin: &AdminComponent) -> Result<PasswordQuality, PlatformFault>;

    fn transfer_ownership(
        &self,
        admin: &AdminComponent,
        target: &AdminComponent,
        bundle: Option<&TransferBundle>,
    ) -> Result<(), PlatformFault>;

    /// Returns the packages that could not be changed.
    fn set_packages_suspended(
        &self,
        admin: &AdminComponent,
        packages: &[String],
        suspended: bool,
    ) -> Result<Vec<String>, PlatformFault>;

    /// Fails with [`PlatformFault::NameNotFound`] for unknown packages.
    fn is_package_suspended(
        &self,
        admin: &AdminComponent,
        package: &str,
    ) -> Result<bool, PlatformFault>;

    /// Handle addressing the parent profile of the managed profile `admin` owns.
    fn parent_profile_instance(
        &self,
        admin: &AdminComponent,
    ) -> Result<Arc<dyn DevicePolicyPlatform>, PlatformFault>;
}

/// User-management service primitive.
#[allow(clippy::missing_errors_doc)]
pub trait UserManagerPlatform: Send + Sync {
    fn user_for_serial_number(
        &self,
        serial: SerialNumber,
    ) -> Result<Option<UserHandle>, PlatformFault>;

    fn serial_number_for_user(
        &self,
        user: UserHandle,
    ) -> Result<Option<SerialNumber>, PlatformFault>;

    /// Whether `key` is in effect for the calling user, whoever set it.
    fn has_user_restriction(&self, key: &str) -> Result<bool, PlatformFault>;
}

/// Ambient context of the calling application.
///
/// Resolves the registered admin component and hands out the two service
/// handles; gateways take everything they need from here at construction.
pub trait PlatformServices: Send + Sync {
    fn admin_component(&self) -> AdminComponent;

    fn device_policy(&self) -> Arc<dyn DevicePolicyPlatform>;

    fn user_manager(&self) -> Arc<dyn UserManagerPlatform>;
}
