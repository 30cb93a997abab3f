//! Client implementation for the device policy gateway.
//!
//! Implements `DevicePolicyGatewayClient` on top of the platform primitives.

use std::collections::BTreeSet;

use device_policy_sdk::{
    AdminComponent, CallSignature, CreateUserFlags, DevicePolicyError, DevicePolicyGatewayClient,
    LockFlags, PasswordQuality, SerialNumber, TransferBundle, UserHandle, UserIcon,
    UserOperationStatus, WipeFlags, or_null,
};
use tracing::debug;

use super::operations as ops;
use super::restrictions::enabled_restrictions;
use super::service::Gateway;

impl DevicePolicyGatewayClient for Gateway {
    fn admin(&self) -> &AdminComponent {
        self.admin_component()
    }

    fn is_profile_owner_app(&self) -> Result<bool, DevicePolicyError> {
        let package = self.admin_component().package();
        self.query("is_profile_owner_app", format_args!(""), || {
            self.device_policy().is_profile_owner_app(package)
        })
    }

    fn is_device_owner_app(&self) -> Result<bool, DevicePolicyError> {
        let package = self.admin_component().package();
        self.query("is_device_owner_app", format_args!(""), || {
            self.device_policy().is_device_owner_app(package)
        })
    }

    fn remove_active_admin(&self) -> Result<(), DevicePolicyError> {
        self.run(&ops::REMOVE_ACTIVE_ADMIN, format_args!(""), |dp, admin| {
            dp.remove_active_admin(admin)
        })
    }

    fn clear_device_owner_app(&self) -> Result<(), DevicePolicyError> {
        self.run(&ops::CLEAR_DEVICE_OWNER_APP, format_args!(""), |dp, admin| {
            dp.clear_device_owner_app(admin.package())
        })
    }

    fn clear_profile_owner(&self) -> Result<(), DevicePolicyError> {
        self.run(&ops::CLEAR_PROFILE_OWNER, format_args!(""), |dp, admin| {
            dp.clear_profile_owner(admin)
        })
    }

    fn transfer_ownership(
        &self,
        target: &AdminComponent,
        bundle: Option<&TransferBundle>,
    ) -> Result<(), DevicePolicyError> {
        self.run(
            &ops::TRANSFER_OWNERSHIP,
            format_args!("{target}, {bundle:?}"),
            |dp, admin| dp.transfer_ownership(admin, target, bundle),
        )
    }

    fn create_and_manage_user(
        &self,
        name: Option<&str>,
        flags: CreateUserFlags,
    ) -> Result<UserHandle, DevicePolicyError> {
        self.run(
            &ops::CREATE_AND_MANAGE_USER,
            format_args!("{}, {flags}", or_null(name)),
            |dp, admin| dp.create_and_manage_user(admin, name, admin, None, flags),
        )
    }

    fn set_user_icon(&self, icon: &UserIcon) -> Result<(), DevicePolicyError> {
        self.run(&ops::SET_USER_ICON, format_args!("{icon}"), |dp, admin| {
            dp.set_user_icon(admin, icon)
        })
    }

    fn remove_user(&self, user: UserHandle) -> Result<(), DevicePolicyError> {
        self.run(&ops::REMOVE_USER, format_args!("{user}"), |dp, admin| {
            dp.remove_user(admin, user)
        })
    }

    fn remove_user_by_serial(&self, serial: SerialNumber) -> Result<(), DevicePolicyError> {
        let resolved = self.user_manager().user_for_serial_number(serial)?;
        let call = CallSignature::new(ops::RESOLVE_USER_SERIAL.name, format_args!("{serial}"));
        let user = ops::RESOLVE_USER_SERIAL.judge(resolved, call)?;
        debug!(%serial, %user, "Resolved user serial number");
        self.remove_user(user)
    }

    fn switch_user(&self, user: UserHandle) -> Result<(), DevicePolicyError> {
        self.run(&ops::SWITCH_USER, format_args!("{user}"), |dp, admin| {
            dp.switch_user(admin, user)
        })
    }

    fn start_user_in_background(
        &self,
        user: UserHandle,
    ) -> Result<UserOperationStatus, DevicePolicyError> {
        self.run(
            &ops::START_USER_IN_BACKGROUND,
            format_args!("{user}"),
            |dp, admin| dp.start_user_in_background(admin, user),
        )
    }

    fn stop_user(&self, user: UserHandle) -> Result<UserOperationStatus, DevicePolicyError> {
        self.run(&ops::STOP_USER, format_args!("{user}"), |dp, admin| {
            dp.stop_user(admin, user)
        })
    }

    fn user_handle(&self, serial: SerialNumber) -> Result<Option<UserHandle>, DevicePolicyError> {
        self.query("user_handle", format_args!("{serial}"), || {
            self.user_manager().user_for_serial_number(serial)
        })
    }

    fn serial_number(&self, user: UserHandle) -> Result<Option<SerialNumber>, DevicePolicyError> {
        self.query("serial_number", format_args!("{user}"), || {
            self.user_manager().serial_number_for_user(user)
        })
    }

    fn is_affiliated_user(&self) -> Result<bool, DevicePolicyError> {
        self.query("is_affiliated_user", format_args!(""), || {
            self.device_policy().is_affiliated_user()
        })
    }

    fn set_affiliation_ids(&self, ids: &BTreeSet<String>) -> Result<(), DevicePolicyError> {
        self.run(&ops::SET_AFFILIATION_IDS, format_args!("{ids:?}"), |dp, admin| {
            dp.set_affiliation_ids(admin, ids)
        })
    }

    fn affiliation_ids(&self) -> Result<BTreeSet<String>, DevicePolicyError> {
        self.query("affiliation_ids", format_args!(""), || {
            self.device_policy().affiliation_ids(self.admin_component())
        })
    }

    fn user_restrictions(&self) -> Result<BTreeSet<String>, DevicePolicyError> {
        let bundle = self.query("user_restrictions", format_args!(""), || {
            self.device_policy().user_restrictions(self.admin_component())
        })?;
        Ok(enabled_restrictions(bundle))
    }

    fn set_user_restriction(&self, key: &str, enabled: bool) -> Result<(), DevicePolicyError> {
        self.run(
            &ops::SET_USER_RESTRICTION,
            format_args!("{key}, {enabled}"),
            |dp, admin| {
                if enabled {
                    dp.add_user_restriction(admin, key)
                } else {
                    dp.clear_user_restriction(admin, key)
                }
            },
        )
    }

    fn has_user_restriction(&self, key: &str) -> Result<bool, DevicePolicyError> {
        self.query("has_user_restriction", format_args!("{key}"), || {
            self.user_manager().has_user_restriction(key)
        })
    }

    fn lock_now(&self, flags: Option<LockFlags>) -> Result<(), DevicePolicyError> {
        let rendered = flags.map(|f| f.to_string());
        self.run(
            &ops::LOCK_NOW,
            format_args!("{}", or_null(rendered.as_deref())),
            |dp, _| dp.lock_now(flags),
        )
    }

    fn reboot(&self) -> Result<(), DevicePolicyError> {
        self.run(&ops::REBOOT, format_args!(""), |dp, admin| dp.reboot(admin))
    }

    fn wipe_data(&self, flags: WipeFlags) -> Result<(), DevicePolicyError> {
        self.run(&ops::WIPE_DATA, format_args!("{flags}"), |dp, _| {
            dp.wipe_data(flags)
        })
    }

    fn request_bugreport(&self) -> Result<(), DevicePolicyError> {
        self.run(&ops::REQUEST_BUGREPORT, format_args!(""), |dp, admin| {
            dp.request_bugreport(admin)
        })
    }

    fn set_network_logging(&self, enabled: bool) -> Result<(), DevicePolicyError> {
        self.run(&ops::SET_NETWORK_LOGGING, format_args!("{enabled}"), |dp, admin| {
            dp.set_network_logging_enabled(admin, enabled)
        })
    }

    fn is_network_logging_enabled(&self) -> Result<bool, DevicePolicyError> {
        self.query("is_network_logging_enabled", format_args!(""), || {
            self.device_policy()
                .is_network_logging_enabled(self.admin_component())
        })
    }

    fn set_organization_name(&self, name: Option<&str>) -> Result<(), DevicePolicyError> {
        self.run(
            &ops::SET_ORGANIZATION_NAME,
            format_args!("{}", or_null(name)),
            |dp, admin| dp.set_organization_name(admin, name),
        )
    }

    fn organization_name(&self) -> Result<Option<String>, DevicePolicyError> {
        self.query("organization_name", format_args!(""), || {
            self.device_policy().organization_name(self.admin_component())
        })
    }

    fn set_user_control_disabled_packages(
        &self,
        packages: &[String],
    ) -> Result<(), DevicePolicyError> {
        self.run(
            &ops::SET_USER_CONTROL_DISABLED_PACKAGES,
            format_args!("{packages:?}"),
            |dp, admin| dp.set_user_control_disabled_packages(admin, packages),
        )
    }

    fn user_control_disabled_packages(&self) -> Result<Vec<String>, DevicePolicyError> {
        self.query("user_control_disabled_packages", format_args!(""), || {
            self.device_policy()
                .user_control_disabled_packages(self.admin_component())
        })
    }

    fn set_password_quality(&self, quality: PasswordQuality) -> Result<(), DevicePolicyError> {
        self.run(
            &ops::SET_PASSWORD_QUALITY,
            format_args!("{quality}"),
            |dp, admin| dp.set_password_quality(admin, quality),
        )
    }

    fn password_quality(&self) -> Result<PasswordQuality, DevicePolicyError> {
        self.query("password_quality", format_args!(""), || {
            self.device_policy().password_quality(self.admin_component())
        })
    }

    fn set_packages_suspended(
        &self,
        packages: &[String],
        suspended: bool,
    ) -> Result<Vec<String>, DevicePolicyError> {
        self.run(
            &ops::SET_PACKAGES_SUSPENDED,
            format_args!("{packages:?}, {suspended}"),
            |dp, admin| dp.set_packages_suspended(admin, packages, suspended),
        )
    }

    fn is_package_suspended(&self, package: &str) -> Result<bool, DevicePolicyError> {
        self.query("is_package_suspended", format_args!("{package}"), || {
            self.device_policy()
                .is_package_suspended(self.admin_component(), package)
        })
    }
}
