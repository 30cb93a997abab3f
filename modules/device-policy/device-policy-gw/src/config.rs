//! Configuration for the device policy gateway.

use serde::{Deserialize, Serialize};

/// Gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevicePolicyGwConfig {
    /// Address the parent profile of the managed profile instead of the
    /// calling user.
    pub parent_profile: bool,
}
