//! User configuration at ~/.config/unisync/config.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CALENDAR_NAME, DEFAULT_TIMEZONE};
use crate::error::{SyncError, SyncResult};
use crate::institution::Institution;
use crate::time::TimeOfDay;

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_calendar_name() -> String {
    DEFAULT_CALENDAR_NAME.to_string()
}

/// Settings shared by every sync run. All keys are optional.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UnisyncConfig {
    /// Institution identifier (`zcas`, `unza`, `cbu`, `unilus`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,

    /// Timezone written on every event; passed through to the calendar as-is.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Name of the calendar the executor writes to.
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,

    /// Leave out classes starting at or after this time (e.g. "17:30").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_from: Option<TimeOfDay>,
}

impl Default for UnisyncConfig {
    fn default() -> Self {
        UnisyncConfig {
            institution: None,
            timezone: default_timezone(),
            calendar_name: default_calendar_name(),
            exclude_from: None,
        }
    }
}

impl UnisyncConfig {
    pub fn config_path() -> SyncResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SyncError::Config("Could not determine config directory".into()))?
            .join("unisync");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, or defaults when there is no config file.
    pub fn load() -> SyncResult<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> SyncResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| SyncError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> SyncResult<Self> {
        toml::from_str(content).map_err(|e| SyncError::Config(e.to_string()))
    }

    /// The configured institution, falling back to the default.
    pub fn institution(&self) -> Institution {
        Institution::resolve(self.institution.as_deref())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SyncResult<()> {
        let contents = format!(
            "\
# unisync configuration

# Institution whose timetable page you sync (zcas, unza, cbu, unilus):
# institution = \"{}\"

# Timezone written on every class event:
# timezone = \"{}\"

# Calendar the classes are written to:
# calendar_name = \"{}\"

# Leave out classes starting at or after this time (e.g. part-time sessions):
# exclude_from = \"17:30\"
",
            Institution::default(),
            DEFAULT_TIMEZONE,
            DEFAULT_CALENDAR_NAME
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SyncError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SyncError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = UnisyncConfig::from_toml("").unwrap();

        assert_eq!(config, UnisyncConfig::default());
        assert_eq!(config.timezone, "Africa/Lusaka");
        assert_eq!(config.institution(), Institution::Zcas);
    }

    #[test]
    fn test_full_config() {
        let config = UnisyncConfig::from_toml(
            r#"
            institution = "unza"
            timezone = "Africa/Harare"
            calendar_name = "Lectures"
            exclude_from = "17:30"
            "#,
        )
        .unwrap();

        assert_eq!(config.institution(), Institution::Unza);
        assert_eq!(config.timezone, "Africa/Harare");
        assert_eq!(config.calendar_name, "Lectures");
        assert_eq!(config.exclude_from, TimeOfDay::new(17, 30));
    }

    #[test]
    fn test_unknown_institution_falls_back() {
        let config = UnisyncConfig::from_toml("institution = \"hogwarts\"").unwrap();
        assert_eq!(config.institution(), Institution::Zcas);
    }

    #[test]
    fn test_invalid_cutoff_is_config_error() {
        let err = UnisyncConfig::from_toml("exclude_from = \"half past five\"").unwrap_err();
        assert!(matches!(err, SyncError::Config(_)), "Unexpected error: {}", err);
    }

    #[test]
    fn test_default_config_file_parses_to_defaults() {
        let dir = std::env::temp_dir().join(format!("unisync-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");

        UnisyncConfig::create_default_config(&path).unwrap();
        let config = UnisyncConfig::load_from(&path).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(config, UnisyncConfig::default());
    }
}
