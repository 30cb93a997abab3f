//! Tracing subscriber bootstrap.
//!
//! Events go to stderr so that the shell's own output on stdout stays clean.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Builds the filter: `RUST_LOG` when set, otherwise `logging.level`.
#[must_use]
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber. `try_init` also bridges `log` records.
///
/// Calling it again is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(e) = installed {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn configured_level_applies_without_rust_log() {
        let config = LoggingConfig {
            level: "debug".to_owned(),
            ..LoggingConfig::default()
        };

        let filter = temp_env::with_var_unset("RUST_LOG", || env_filter(&config));

        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn rust_log_takes_precedence() {
        let filter = temp_env::with_var("RUST_LOG", Some("dpc_shell=trace"), || {
            env_filter(&LoggingConfig::default())
        });

        assert_eq!(filter.to_string(), "dpc_shell=trace");
    }

    #[test]
    fn malformed_level_falls_back_to_warn() {
        let config = LoggingConfig {
            level: "dpc_shell=loud".to_owned(),
            ..LoggingConfig::default()
        };

        let filter = temp_env::with_var_unset("RUST_LOG", || env_filter(&config));

        assert_eq!(filter.to_string(), "warn");
    }
}
