//! Domain service for the device policy gateway.
//!
//! The gateway holds only the admin identity and the two platform handles;
//! it keeps no mutable state of its own, so it is cheap to clone and safe to
//! share across threads as far as the platform itself is.

use std::fmt;
use std::sync::Arc;

use device_policy_sdk::{
    AdminComponent, CallSignature, DevicePolicyError, DevicePolicyPlatform, PlatformFault,
    PlatformServices, UserManagerPlatform,
};
use tracing::{debug, info};

use super::operations::OperationSpec;
use crate::config::DevicePolicyGwConfig;

/// Device policy gateway bound to one admin component.
#[derive(Clone)]
pub struct Gateway {
    admin: AdminComponent,
    device_policy: Arc<dyn DevicePolicyPlatform>,
    user_manager: Arc<dyn UserManagerPlatform>,
}

impl Gateway {
    /// Builds a gateway over explicit platform handles.
    #[must_use]
    pub fn new(
        admin: AdminComponent,
        device_policy: Arc<dyn DevicePolicyPlatform>,
        user_manager: Arc<dyn UserManagerPlatform>,
    ) -> Self {
        Self {
            admin,
            device_policy,
            user_manager,
        }
    }

    /// Builds the primary gateway from the ambient platform context.
    #[must_use]
    pub fn from_services(services: &dyn PlatformServices) -> Self {
        Self::new(
            services.admin_component(),
            services.device_policy(),
            services.user_manager(),
        )
    }

    /// Builds a gateway addressing the parent profile of the managed profile.
    ///
    /// The returned gateway shares no state with the primary one; only the
    /// device-policy handle differs, the user-management handle is the same.
    ///
    /// # Errors
    ///
    /// Returns the platform fault if the parent profile instance cannot be
    /// obtained, e.g. when the admin does not own an organization-owned
    /// managed profile.
    #[tracing::instrument(skip_all)]
    pub fn for_parent_profile(services: &dyn PlatformServices) -> Result<Self, DevicePolicyError> {
        let admin = services.admin_component();
        let parent = services.device_policy().parent_profile_instance(&admin)?;
        info!(admin = %admin, "Built parent profile gateway");
        Ok(Self::new(admin, parent, services.user_manager()))
    }

    /// Builds the gateway selected by `config`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::for_parent_profile`].
    pub fn from_config(
        services: &dyn PlatformServices,
        config: &DevicePolicyGwConfig,
    ) -> Result<Self, DevicePolicyError> {
        if config.parent_profile {
            Self::for_parent_profile(services)
        } else {
            Ok(Self::from_services(services))
        }
    }

    pub(crate) fn admin_component(&self) -> &AdminComponent {
        &self.admin
    }

    pub(crate) fn device_policy(&self) -> &dyn DevicePolicyPlatform {
        self.device_policy.as_ref()
    }

    pub(crate) fn user_manager(&self) -> &dyn UserManagerPlatform {
        self.user_manager.as_ref()
    }

    /// Runs a result-delivered operation.
    ///
    /// Platform faults are forwarded verbatim; a normal return is judged by
    /// `spec`.
    pub(crate) fn run<R, T>(
        &self,
        spec: &OperationSpec<R, T>,
        args: fmt::Arguments<'_>,
        primitive: impl FnOnce(
            &dyn DevicePolicyPlatform,
            &AdminComponent,
        ) -> Result<R, PlatformFault>,
    ) -> Result<T, DevicePolicyError> {
        let call = CallSignature::new(spec.name, args);
        debug!(admin = %self.admin, %call, "Invoking platform");
        let raw = primitive(self.device_policy(), &self.admin)?;
        spec.judge(raw, call)
    }

    /// Runs a read-only accessor; a platform fault is its only failure.
    pub(crate) fn query<T>(
        &self,
        operation: &str,
        args: fmt::Arguments<'_>,
        primitive: impl FnOnce() -> Result<T, PlatformFault>,
    ) -> Result<T, DevicePolicyError> {
        let call = CallSignature::new(operation, args);
        debug!(admin = %self.admin, %call, "Querying platform");
        primitive().map_err(DevicePolicyError::from)
    }
}

impl fmt::Display for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DevicePolicyGateway[{}]", self.admin)
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("admin", &self.admin)
            .finish_non_exhaustive()
    }
}
