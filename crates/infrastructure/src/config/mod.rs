//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `PODCHAOS_*` environment variables. Nested keys use `__` in
//! variable names, e.g. `PODCHAOS_INJECTION__RECOVERY_TIMEOUT_SECS=90`.
//!
//! - `injection`: polling intervals and timeouts of a run
//! - `cluster`: how to reach the Kubernetes API
//! - `telemetry`: logging and OTLP export

mod cluster;

use std::path::Path;

use application::ApplicationError;
use application::services::InjectionConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::TelemetryConfig;

pub use cluster::ClusterAppConfig;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "podchaos.toml";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "PODCHAOS";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Polling timing of injection runs
    #[serde(default)]
    pub injection: InjectionConfig,

    /// Kubernetes API connection
    #[serde(default)]
    pub cluster: ClusterAppConfig,

    /// Logging and trace export
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from defaults, a config file, and the environment
    ///
    /// An explicit `path` must exist. Without one, `podchaos.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("injection.default_namespace", "default")?
            .set_default("telemetry.service_name", "podchaos")?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables
            .add_source(environment);

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Check values that deserialize fine but cannot drive a run
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.injection.validate()?;

        if self.cluster.connect_timeout_secs == 0 || self.cluster.read_timeout_secs == 0 {
            return Err(ApplicationError::Configuration(
                "cluster timeouts must be greater than zero".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.telemetry.sampling_ratio) {
            return Err(ApplicationError::Configuration(format!(
                "telemetry.sampling_ratio must be between 0.0 and 1.0, got {}",
                self.telemetry.sampling_ratio
            )));
        }

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn no_env() -> config::Environment {
        AppConfig::environment().source(Some(config::Map::new()))
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<config::Map<_, _>>();
        AppConfig::environment().source(Some(map))
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::load_with(None, no_env()).unwrap();

        assert_eq!(config.injection, InjectionConfig::default());
        assert_eq!(config.cluster, ClusterAppConfig::default());
        assert_eq!(config.telemetry.service_name, "podchaos");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overrides_defaults() {
        let file = write_config(
            r#"
[injection]
recovery_timeout_secs = 300
default_namespace = "shop"

[cluster]
context = "kind-chaos"
"#,
        );

        let config = AppConfig::load_with(Some(file.path()), no_env()).unwrap();

        assert_eq!(config.injection.recovery_timeout_secs, 300);
        assert_eq!(config.injection.deletion_timeout_secs, 60);
        assert_eq!(config.injection.default_namespace, "shop");
        assert_eq!(config.cluster.context.as_deref(), Some("kind-chaos"));
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config("[injection]\nrecovery_timeout_secs = 300\n");

        let config = AppConfig::load_with(
            Some(file.path()),
            env(&[
                ("PODCHAOS_INJECTION__RECOVERY_TIMEOUT_SECS", "90"),
                ("PODCHAOS_TELEMETRY__JSON_LOGS", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.injection.recovery_timeout_secs, 90);
        assert!(config.telemetry.json_logs);
    }

    #[test]
    fn unrelated_environment_is_ignored() {
        let config =
            AppConfig::load_with(None, env(&[("OTHER_INJECTION__RECOVERY_TIMEOUT_SECS", "1")]))
                .unwrap();
        assert_eq!(config.injection.recovery_timeout_secs, 120);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = AppConfig::load_with(Some(Path::new("/nonexistent/podchaos.toml")), no_env());
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_zero_timeouts() {
        let mut config = AppConfig::default();
        config.cluster.read_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.injection.recovery_poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_sampling_ratio() {
        let mut config = AppConfig::default();
        config.telemetry.sampling_ratio = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sampling_ratio"));
    }

    #[test]
    fn toml_rendering_parses_back() {
        let mut config = AppConfig::default();
        config.injection.default_namespace = "shop".to_string();

        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[injection]"));
        assert!(rendered.contains("recovery_timeout_secs = 120"));

        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
