use crate::constants::{CONFIG_ENV_VAR, NULL_SERVICE_CENTER, SMS_LABEL};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Timezone used to turn row dates into epoch milliseconds.
///
/// PIM Backup writes wall-clock time of the exporting device without an offset,
/// so `Local` reproduces what the phone showed when converted on the same machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateZone {
    #[default]
    Local,
    Utc,
}

/// Resolved configuration with all values filled in (no Options).
///
/// Deserializable from TOML; every key is optional and falls back to the default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Classification label identifying SMS rows (matched case-insensitively)
    pub sms_label: String,
    /// Value for the `service_center` attribute, e.g. `"null"` or a fixed number
    pub service_center: String,
    /// Timezone the row dates are interpreted in
    pub timezone: DateZone,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            sms_label: SMS_LABEL.to_string(),
            service_center: NULL_SERVICE_CENTER.to_string(),
            timezone: DateZone::Local,
        }
    }
}

impl ResolvedConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// Keys left out of the file keep their defaults. Unknown keys are rejected to catch
    /// typos, and the SMS label and service center must not be blank.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file can't be read and `InvalidInput` if the TOML is
    /// malformed, unknown keys are present, or a string value is blank.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config: ResolvedConfig = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        if config.sms_label.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "SMS label must not be empty".into(),
            ));
        }
        if config.service_center.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Service center must not be empty, use \"null\" to leave it unset".into(),
            ));
        }

        Ok(config)
    }
}

/// Resolves the configuration for a run.
///
/// When `PIM2SMS_CONFIG` names a file, it is loaded; otherwise defaults apply.
pub fn load_config() -> AppResult<ResolvedConfig> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => {
            let path = PathBuf::from(path);
            ResolvedConfig::from_toml_file(&path)
        }
        _ => Ok(ResolvedConfig::default()),
    }
}
