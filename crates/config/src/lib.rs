use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "urbanroot.toml",
    "config/urbanroot.toml",
    "crates/config/urbanroot.toml",
    "../urbanroot.toml",
    "../config/urbanroot.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub enrollment: EnrollmentConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Settings for the signup and login flow.
///
/// ```
/// use std::time::Duration;
/// use urbanroot_config::EnrollmentConfig;
///
/// let enrollment = EnrollmentConfig::default();
/// assert_eq!(enrollment.latency(), Duration::from_millis(1_000));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentConfig {
    /// Simulated round trip applied to every submission.
    #[serde(default = "EnrollmentConfig::default_latency_ms")]
    pub latency_ms: u64,
}

impl EnrollmentConfig {
    const fn default_latency_ms() -> u64 {
        1_000
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            latency_ms: Self::default_latency_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "TelemetryConfig::default_filter")]
    pub filter: String,
}

impl TelemetryConfig {
    fn default_filter() -> String {
        "info".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use urbanroot_config::load;
///
/// std::env::remove_var("URBANROOT_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.telemetry.filter.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let latency_ms = i64::try_from(defaults.enrollment.latency_ms).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("enrollment.latency_ms", latency_ms)
        .context("invalid default for enrollment.latency_ms")?
        .set_default("telemetry.filter", defaults.telemetry.filter.clone())
        .context("invalid default for telemetry.filter")?;

    let environment_overrides = config::Environment::with_prefix("URBANROOT").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("URBANROOT_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via URBANROOT_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded configuration");
    Ok(config)
}
