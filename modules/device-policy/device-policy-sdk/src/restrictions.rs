//! Well-known user restriction keys.
//!
//! Keys are platform-defined strings; the gateway accepts any key, these are
//! only the ones consumers refer to by name.

pub const DISALLOW_CONFIG_WIFI: &str = "no_config_wifi";
pub const DISALLOW_CONFIG_BLUETOOTH: &str = "no_config_bluetooth";
pub const DISALLOW_BLUETOOTH: &str = "no_bluetooth";
pub const DISALLOW_CONFIG_LOCATION: &str = "no_config_location";
pub const DISALLOW_SHARE_LOCATION: &str = "no_share_location";
pub const DISALLOW_CONFIG_DATE_TIME: &str = "no_config_date_time";
pub const DISALLOW_CONFIG_PRIVATE_DNS: &str = "disallow_config_private_dns";
pub const DISALLOW_CONFIG_TETHERING: &str = "no_config_tethering";
pub const DISALLOW_CONFIG_MOBILE_NETWORKS: &str = "no_config_mobile_networks";
pub const DISALLOW_AIRPLANE_MODE: &str = "no_airplane_mode";
pub const DISALLOW_DEBUGGING_FEATURES: &str = "no_debugging_features";
pub const DISALLOW_USB_FILE_TRANSFER: &str = "no_usb_file_transfer";
pub const DISALLOW_MOUNT_PHYSICAL_MEDIA: &str = "no_physical_media";
pub const DISALLOW_OUTGOING_CALLS: &str = "no_outgoing_calls";
pub const DISALLOW_SMS: &str = "no_sms";
pub const DISALLOW_FACTORY_RESET: &str = "no_factory_reset";
pub const DISALLOW_SAFE_BOOT: &str = "no_safe_boot";
pub const DISALLOW_ADD_USER: &str = "no_add_user";
pub const DISALLOW_REMOVE_USER: &str = "no_remove_user";
pub const DISALLOW_INSTALL_UNKNOWN_SOURCES: &str = "no_install_unknown_sources";
pub const DISALLOW_CAMERA_TOGGLE: &str = "disallow_camera_toggle";
pub const DISALLOW_MICROPHONE_TOGGLE: &str = "disallow_microphone_toggle";

/// A restriction shown on a policy screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestrictionEntry {
    pub key: &'static str,
    pub title: &'static str,
}

impl RestrictionEntry {
    #[must_use]
    pub const fn new(key: &'static str, title: &'static str) -> Self {
        Self { key, title }
    }
}

/// Restrictions a profile owner of an organization-owned device may set on
/// the parent profile.
pub const ORG_OWNED_DEVICE_RESTRICTIONS: &[RestrictionEntry] = &[
    RestrictionEntry::new(DISALLOW_CONFIG_DATE_TIME, "Disallow config date and time"),
    RestrictionEntry::new(DISALLOW_CONFIG_TETHERING, "Disallow config tethering"),
    RestrictionEntry::new(DISALLOW_DEBUGGING_FEATURES, "Disallow debugging features"),
    RestrictionEntry::new(DISALLOW_FACTORY_RESET, "Disallow factory reset"),
    RestrictionEntry::new(DISALLOW_CONFIG_WIFI, "Disallow config Wi-Fi"),
    RestrictionEntry::new(DISALLOW_CONFIG_BLUETOOTH, "Disallow config Bluetooth"),
    RestrictionEntry::new(DISALLOW_BLUETOOTH, "Disallow Bluetooth"),
    RestrictionEntry::new(DISALLOW_CONFIG_LOCATION, "Disallow config location"),
    RestrictionEntry::new(DISALLOW_CONFIG_PRIVATE_DNS, "Disallow config private DNS"),
    RestrictionEntry::new(DISALLOW_CONFIG_MOBILE_NETWORKS, "Disallow config mobile networks"),
    RestrictionEntry::new(DISALLOW_AIRPLANE_MODE, "Disallow airplane mode"),
    RestrictionEntry::new(DISALLOW_MOUNT_PHYSICAL_MEDIA, "Disallow mount physical media"),
    RestrictionEntry::new(DISALLOW_OUTGOING_CALLS, "Disallow outgoing calls"),
    RestrictionEntry::new(DISALLOW_SMS, "Disallow SMS"),
    RestrictionEntry::new(DISALLOW_SAFE_BOOT, "Disallow safe boot"),
    RestrictionEntry::new(DISALLOW_USB_FILE_TRANSFER, "Disallow USB file transfer"),
    RestrictionEntry::new(DISALLOW_CAMERA_TOGGLE, "Disallow camera toggle"),
    RestrictionEntry::new(DISALLOW_MICROPHONE_TOGGLE, "Disallow microphone toggle"),
];
