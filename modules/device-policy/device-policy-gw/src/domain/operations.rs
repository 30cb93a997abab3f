//! Success predicates and error constructors of the result-delivered operations.
//!
//! Each platform primitive signals failure its own way: some fault, some
//! return `None` or `false`, some return a status code. An [`OperationSpec`]
//! captures how one operation's raw return is judged, so the gateway body
//! only invokes the primitive and hands the raw value to the table.

use device_policy_sdk::{CallSignature, DevicePolicyError, UserHandle, UserOperationStatus};

/// How the raw return of one platform primitive is judged.
pub struct OperationSpec<R, T> {
    /// Operation name used in the rendered call signature.
    pub name: &'static str,
    /// Success predicate. Projects the success value or hands the raw value back.
    pub accept: fn(R) -> Result<T, R>,
    /// Builds the error for a rejected raw value.
    pub reject: fn(R, CallSignature) -> DevicePolicyError,
}

impl<R> OperationSpec<R, R> {
    /// An operation that succeeds whenever the primitive returns.
    #[must_use]
    pub const fn completes(name: &'static str) -> Self {
        Self {
            name,
            accept: Ok,
            reject: failed_operation,
        }
    }
}

impl<R, T> OperationSpec<R, T> {
    /// Judges `raw` against the success predicate.
    ///
    /// # Errors
    ///
    /// Returns the error built by [`reject`](Self::reject) from the literal
    /// failing value.
    pub fn judge(&self, raw: R, call: CallSignature) -> Result<T, DevicePolicyError> {
        (self.accept)(raw).map_err(|raw| (self.reject)(raw, call))
    }
}

fn present<V>(raw: Option<V>) -> Result<V, Option<V>> {
    raw.ok_or(None)
}

fn confirmed(raw: bool) -> Result<(), bool> {
    if raw { Ok(()) } else { Err(raw) }
}

fn succeeded(status: UserOperationStatus) -> Result<UserOperationStatus, UserOperationStatus> {
    if status.is_success() {
        Ok(status)
    } else {
        Err(status)
    }
}

fn invalid_null<V>(_raw: Option<V>, call: CallSignature) -> DevicePolicyError {
    DevicePolicyError::InvalidResult {
        value: "null".to_owned(),
        call,
    }
}

fn invalid_bool(raw: bool, call: CallSignature) -> DevicePolicyError {
    DevicePolicyError::InvalidResult {
        value: raw.to_string(),
        call,
    }
}

fn failed_operation<R>(_raw: R, call: CallSignature) -> DevicePolicyError {
    DevicePolicyError::FailedOperation { call }
}

fn failed_user_operation(status: UserOperationStatus, call: CallSignature) -> DevicePolicyError {
    DevicePolicyError::FailedUserOperation { status, call }
}

pub const CREATE_AND_MANAGE_USER: OperationSpec<Option<UserHandle>, UserHandle> = OperationSpec {
    name: "create_and_manage_user",
    accept: present,
    reject: invalid_null,
};

pub const REMOVE_USER: OperationSpec<bool, ()> = OperationSpec {
    name: "remove_user",
    accept: confirmed,
    reject: invalid_bool,
};

/// Resolution step of removing a user by serial number.
pub const RESOLVE_USER_SERIAL: OperationSpec<Option<UserHandle>, UserHandle> = OperationSpec {
    name: "remove_user_by_serial",
    accept: present,
    reject: invalid_null,
};

pub const SWITCH_USER: OperationSpec<bool, ()> = OperationSpec {
    name: "switch_user",
    accept: confirmed,
    reject: failed_operation,
};

pub const REQUEST_BUGREPORT: OperationSpec<bool, ()> = OperationSpec {
    name: "request_bugreport",
    accept: confirmed,
    reject: failed_operation,
};

pub const START_USER_IN_BACKGROUND: OperationSpec<UserOperationStatus, UserOperationStatus> =
    OperationSpec {
        name: "start_user_in_background",
        accept: succeeded,
        reject: failed_user_operation,
    };

pub const STOP_USER: OperationSpec<UserOperationStatus, UserOperationStatus> = OperationSpec {
    name: "stop_user",
    accept: succeeded,
    reject: failed_user_operation,
};

pub const SET_USER_ICON: OperationSpec<(), ()> = OperationSpec::completes("set_user_icon");
pub const SET_AFFILIATION_IDS: OperationSpec<(), ()> =
    OperationSpec::completes("set_affiliation_ids");
pub const SET_USER_RESTRICTION: OperationSpec<(), ()> =
    OperationSpec::completes("set_user_restriction");
pub const LOCK_NOW: OperationSpec<(), ()> = OperationSpec::completes("lock_now");
pub const REBOOT: OperationSpec<(), ()> = OperationSpec::completes("reboot");
pub const WIPE_DATA: OperationSpec<(), ()> = OperationSpec::completes("wipe_data");
pub const SET_NETWORK_LOGGING: OperationSpec<(), ()> =
    OperationSpec::completes("set_network_logging");
pub const SET_ORGANIZATION_NAME: OperationSpec<(), ()> =
    OperationSpec::completes("set_organization_name");
pub const SET_USER_CONTROL_DISABLED_PACKAGES: OperationSpec<(), ()> =
    OperationSpec::completes("set_user_control_disabled_packages");
pub const REMOVE_ACTIVE_ADMIN: OperationSpec<(), ()> =
    OperationSpec::completes("remove_active_admin");
pub const CLEAR_DEVICE_OWNER_APP: OperationSpec<(), ()> =
    OperationSpec::completes("clear_device_owner_app");
pub const CLEAR_PROFILE_OWNER: OperationSpec<(), ()> =
    OperationSpec::completes("clear_profile_owner");
pub const SET_PASSWORD_QUALITY: OperationSpec<(), ()> =
    OperationSpec::completes("set_password_quality");
pub const TRANSFER_OWNERSHIP: OperationSpec<(), ()> =
    OperationSpec::completes("transfer_ownership");
pub const SET_PACKAGES_SUSPENDED: OperationSpec<Vec<String>, Vec<String>> =
    OperationSpec::completes("set_packages_suspended");
