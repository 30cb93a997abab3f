//! Parent-profile restriction panel.
//!
//! Models the policy screen that lists the restrictions a profile owner of an
//! organization-owned device may set on the parent profile. Rendering is left
//! to the host; the panel only tracks what each switch should show.

use std::sync::Arc;

use device_policy_sdk::DevicePolicyGatewayClient;
use device_policy_sdk::restrictions::{ORG_OWNED_DEVICE_RESTRICTIONS, RestrictionEntry};
use tracing::error;

/// State of one restriction switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionState {
    pub entry: RestrictionEntry,
    pub checked: bool,
}

pub struct RestrictionPanel {
    gateway: Arc<dyn DevicePolicyGatewayClient>,
    entries: &'static [RestrictionEntry],
}

impl RestrictionPanel {
    /// Panel over the organization-owned device catalog.
    #[must_use]
    pub fn new(gateway: Arc<dyn DevicePolicyGatewayClient>) -> Self {
        Self::with_entries(gateway, ORG_OWNED_DEVICE_RESTRICTIONS)
    }

    #[must_use]
    pub fn with_entries(
        gateway: Arc<dyn DevicePolicyGatewayClient>,
        entries: &'static [RestrictionEntry],
    ) -> Self {
        Self { gateway, entries }
    }

    #[must_use]
    pub fn entries(&self) -> &'static [RestrictionEntry] {
        self.entries
    }

    /// Current state of every entry, in catalog order.
    ///
    /// An entry whose state cannot be read shows as unchecked.
    #[must_use]
    pub fn refresh(&self) -> Vec<RestrictionState> {
        self.entries
            .iter()
            .map(|entry| RestrictionState {
                entry: *entry,
                checked: self.is_checked(entry.key),
            })
            .collect()
    }

    /// Applies a switch change.
    ///
    /// Returns whether the change was accepted; on success the switch should
    /// show [`is_checked`](Self::is_checked) for `key`.
    pub fn toggle(&self, key: &str, enabled: bool) -> bool {
        match self.gateway.set_user_restriction(key, enabled) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    restriction = key,
                    error = %e,
                    "Error occurred while updating user restriction"
                );
                false
            }
        }
    }

    /// Whether `key` is in effect for the calling user.
    #[must_use]
    pub fn is_checked(&self, key: &str) -> bool {
        self.gateway.has_user_restriction(key).unwrap_or_else(|e| {
            error!(restriction = key, error = %e, "Error reading user restriction");
            false
        })
    }
}
