//! Layered configuration of the shell binary.
//!
//! Layers, lowest first: built-in defaults, the YAML file given with
//! `--config`, `DPC__*` environment variables (`__` separates nested keys),
//! then command-line overrides applied by [`AppConfig::apply_cli_overrides`].

use std::path::{Path, PathBuf};

use device_policy_gw::DevicePolicyGwConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use in_memory_dp_plugin::InMemoryDpConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "DPC__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    #[error("failed to render configuration as yaml: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,

    /// Seed state of the simulated device.
    pub device: InMemoryDpConfig,

    pub gateway: DevicePolicyGwConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `warn` or `dpc_shell=debug,info`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Overrides taken from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    /// Verbosity count: 1 info, 2 debug, 3 or more trace.
    pub verbose: u8,
    pub parent_profile: bool,
}

impl AppConfig {
    /// Loads defaults, the optional YAML file and the environment.
    ///
    /// # Errors
    ///
    /// Fails if `path` is given but is not a file, or if any layer does not
    /// match the configuration schema.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Ok(figment.extract().map_err(Box::new)?)
    }

    pub fn apply_cli_overrides(&mut self, cli: CliOverrides) {
        let level = match cli.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        };
        if let Some(level) = level {
            level.clone_into(&mut self.logging.level);
        }
        if cli.parent_profile {
            self.gateway.parent_profile = true;
        }
    }

    /// Renders the effective configuration as YAML.
    ///
    /// # Errors
    ///
    /// Fails if a value cannot be represented in YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_saphyr::to_string(self).map_err(|e| ConfigError::Render(e.to_string()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::io::Write;

    use in_memory_dp_plugin::OwnerMode;
    use tempfile::NamedTempFile;

    use super::*;

    const VARS: [&str; 3] = [
        "DPC__LOGGING__LEVEL",
        "DPC__LOGGING__FORMAT",
        "DPC__GATEWAY__PARENT_PROFILE",
    ];

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file_or_env() {
        temp_env::with_vars_unset(VARS, || {
            let config = AppConfig::load(None).unwrap();
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.logging.level, "warn");
        });
    }

    #[test]
    fn missing_file_is_rejected() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/dpc.yaml"))).unwrap_err();

        assert!(matches!(err, ConfigError::MissingFile(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn yaml_file_seeds_device_and_gateway() {
        let file = yaml_file(
            r"
device:
  owner: org_owned_profile_owner
  affiliation_ids: [acme]
  users:
    - id: 10
      serial: 12
gateway:
  parent_profile: true
",
        );

        let config =
            temp_env::with_vars_unset(VARS, || AppConfig::load(Some(file.path())).unwrap());

        assert_eq!(config.device.owner, OwnerMode::OrgOwnedProfileOwner);
        assert_eq!(config.device.users.len(), 1);
        assert!(config.device.affiliation_ids.contains("acme"));
        assert!(config.gateway.parent_profile);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn environment_overrides_file() {
        let file = yaml_file("logging:\n  level: info\n");

        temp_env::with_vars(
            [
                ("DPC__LOGGING__LEVEL", Some("debug")),
                ("DPC__LOGGING__FORMAT", Some("json")),
            ],
            || {
                let config = AppConfig::load(Some(file.path())).unwrap();
                assert_eq!(config.logging.level, "debug");
                assert_eq!(config.logging.format, LogFormat::Json);
            },
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = yaml_file("gateway:\n  parent: true\n");

        let err = AppConfig::load(Some(file.path())).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = AppConfig::default();

        config.apply_cli_overrides(CliOverrides {
            verbose: 2,
            parent_profile: true,
        });

        assert_eq!(config.logging.level, "debug");
        assert!(config.gateway.parent_profile);

        config.apply_cli_overrides(CliOverrides::default());
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn yaml_dump_reloads_to_the_same_config() {
        let mut config = AppConfig::default();
        config.device.organization_name = Some("Acme".to_owned());
        let file = yaml_file(&config.to_yaml().unwrap());

        let reloaded =
            temp_env::with_vars_unset(VARS, || AppConfig::load(Some(file.path())).unwrap());

        assert_eq!(reloaded, config);
    }
}
