//! Public API trait for the device policy gateway.
//!
//! Consumers (UI screens, the shell, the restriction panel) hold a
//! `&dyn DevicePolicyGatewayClient` and never touch the platform primitives
//! directly.

use std::collections::BTreeSet;

use crate::error::DevicePolicyError;
use crate::models::{
    AdminComponent, CreateUserFlags, LockFlags, PasswordQuality, SerialNumber, TransferBundle,
    UserHandle, UserIcon, UserOperationStatus, WipeFlags,
};

/// Public API trait for the device policy gateway.
///
/// Every operation runs under the authority of [`admin`](Self::admin) and
/// returns exactly one outcome. Failures follow a fixed taxonomy:
///
/// - [`DevicePolicyError::Platform`] when the primitive itself faulted
/// - [`DevicePolicyError::InvalidResult`] for a `null`/`false` return with no
///   richer diagnostic
/// - [`DevicePolicyError::FailedOperation`] when `false` is the only failure signal
/// - [`DevicePolicyError::FailedUserOperation`] for a non-success user status
///
/// ```ignore
/// let gateway: &dyn DevicePolicyGatewayClient = ...;
///
/// match gateway.create_and_manage_user(Some("guest"), CreateUserFlags::SKIP_SETUP_WIZARD) {
///     Ok(user) => println!("User created: {user}"),
///     Err(e) => eprintln!("Error creating user guest: {e}"),
/// }
/// ```
#[allow(clippy::missing_errors_doc)]
pub trait DevicePolicyGatewayClient: Send + Sync {
    /// The admin component this gateway acts for.
    fn admin(&self) -> &AdminComponent;

    // -- Ownership ---------------------------------------------------------

    fn is_profile_owner_app(&self) -> Result<bool, DevicePolicyError>;

    fn is_device_owner_app(&self) -> Result<bool, DevicePolicyError>;

    fn remove_active_admin(&self) -> Result<(), DevicePolicyError>;

    fn clear_device_owner_app(&self) -> Result<(), DevicePolicyError>;

    fn clear_profile_owner(&self) -> Result<(), DevicePolicyError>;

    /// Hands device or profile ownership to `target`.
    fn transfer_ownership(
        &self,
        target: &AdminComponent,
        bundle: Option<&TransferBundle>,
    ) -> Result<(), DevicePolicyError>;

    // -- Users -------------------------------------------------------------

    /// Creates a user managed by this admin, with the admin as its profile owner.
    ///
    /// Fails with `InvalidResult("null")` when the platform returns no handle.
    fn create_and_manage_user(
        &self,
        name: Option<&str>,
        flags: CreateUserFlags,
    ) -> Result<UserHandle, DevicePolicyError>;

    fn set_user_icon(&self, icon: &UserIcon) -> Result<(), DevicePolicyError>;

    /// Fails with `InvalidResult("false")` when the platform declines.
    fn remove_user(&self, user: UserHandle) -> Result<(), DevicePolicyError>;

    /// Resolves `serial` to a handle, then removes that user.
    ///
    /// An unknown serial fails with `InvalidResult("null")` and nothing is
    /// removed.
    fn remove_user_by_serial(&self, serial: SerialNumber) -> Result<(), DevicePolicyError>;

    fn switch_user(&self, user: UserHandle) -> Result<(), DevicePolicyError>;

    /// Returns the success status; any other status fails with
    /// `FailedUserOperation` carrying the raw code.
    fn start_user_in_background(
        &self,
        user: UserHandle,
    ) -> Result<UserOperationStatus, DevicePolicyError>;

    fn stop_user(&self, user: UserHandle) -> Result<UserOperationStatus, DevicePolicyError>;

    fn user_handle(&self, serial: SerialNumber) -> Result<Option<UserHandle>, DevicePolicyError>;

    fn serial_number(&self, user: UserHandle) -> Result<Option<SerialNumber>, DevicePolicyError>;

    // -- Affiliation -------------------------------------------------------

    fn is_affiliated_user(&self) -> Result<bool, DevicePolicyError>;

    /// Replaces the affiliation ids; an empty set clears them.
    fn set_affiliation_ids(&self, ids: &BTreeSet<String>) -> Result<(), DevicePolicyError>;

    fn affiliation_ids(&self) -> Result<BTreeSet<String>, DevicePolicyError>;

    // -- Restrictions ------------------------------------------------------

    /// Keys of the restrictions this admin has enabled.
    ///
    /// Keys the platform reports with a `false` flag are left out.
    fn user_restrictions(&self) -> Result<BTreeSet<String>, DevicePolicyError>;

    fn set_user_restriction(&self, key: &str, enabled: bool) -> Result<(), DevicePolicyError>;

    /// Whether `key` is in effect for the calling user, whoever set it.
    fn has_user_restriction(&self, key: &str) -> Result<bool, DevicePolicyError>;

    // -- Device ------------------------------------------------------------

    fn lock_now(&self, flags: Option<LockFlags>) -> Result<(), DevicePolicyError>;

    fn reboot(&self) -> Result<(), DevicePolicyError>;

    fn wipe_data(&self, flags: WipeFlags) -> Result<(), DevicePolicyError>;

    /// Fails with `FailedOperation` when the platform refuses the request.
    fn request_bugreport(&self) -> Result<(), DevicePolicyError>;

    fn set_network_logging(&self, enabled: bool) -> Result<(), DevicePolicyError>;

    fn is_network_logging_enabled(&self) -> Result<bool, DevicePolicyError>;

    // -- Organization and apps ---------------------------------------------

    /// Sets the organization name; `None` clears it.
    fn set_organization_name(&self, name: Option<&str>) -> Result<(), DevicePolicyError>;

    fn organization_name(&self) -> Result<Option<String>, DevicePolicyError>;

    fn set_user_control_disabled_packages(
        &self,
        packages: &[String],
    ) -> Result<(), DevicePolicyError>;

    fn user_control_disabled_packages(&self) -> Result<Vec<String>, DevicePolicyError>;

    fn set_password_quality(&self, quality: PasswordQuality) -> Result<(), DevicePolicyError>;

    fn password_quality(&self) -> Result<PasswordQuality, DevicePolicyError>;

    /// Returns the packages the platform could not change.
    fn set_packages_suspended(
        &self,
        packages: &[String],
        suspended: bool,
    ) -> Result<Vec<String>, DevicePolicyError>;

    fn is_package_suspended(&self, package: &str) -> Result<bool, DevicePolicyError>;
}
