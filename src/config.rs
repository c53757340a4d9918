// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::{Category, Locale};
use crate::storage::ScheduleStore;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_locale() -> String {
    "auto".to_string()
}

fn default_categories() -> Vec<Category> {
    vec![
        Category::new("cat-1", "Work"),
        Category::new("cat-2", "Personal"),
        Category::new("cat-3", "Study"),
    ]
}

fn default_work_start() -> String {
    "09:00".to_string()
}
fn default_work_end() -> String {
    "18:00".to_string()
}

fn default_work_days() -> Vec<String> {
    ["Mon", "Tue", "Wed", "Thu", "Fri"]
        .iter()
        .map(|d| d.to_string())
        .collect()
}

fn default_chunking() -> u32 {
    90
}
fn default_break() -> u32 {
    15
}

/// Self-reported energy, 1 (low) to 5 (high), by part of the day.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EnergyLevels {
    pub morning: u8,
    pub afternoon: u8,
    pub evening: u8,
    pub night: u8,
}

impl Default for EnergyLevels {
    fn default() -> Self {
        Self {
            morning: 4,
            afternoon: 3,
            evening: 2,
            night: 1,
        }
    }
}

/// What the assistant is told about the user.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AssistantProfile {
    #[serde(default = "default_work_start")]
    pub work_start_time: String, // Format "HH:MM"
    #[serde(default = "default_work_end")]
    pub work_end_time: String,
    #[serde(default = "default_work_days")]
    pub preferred_work_days: Vec<String>,
    #[serde(default)]
    pub energy: EnergyLevels,
    #[serde(default = "default_chunking")]
    pub task_chunking_minutes: u32,
    #[serde(default = "default_break")]
    pub break_minutes: u32,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub notes: String,
}

impl Default for AssistantProfile {
    fn default() -> Self {
        Self {
            work_start_time: default_work_start(),
            work_end_time: default_work_end(),
            preferred_work_days: default_work_days(),
            energy: EnergyLevels::default(),
            task_chunking_minutes: default_chunking(),
            break_minutes: default_break(),
            occupation: String::new(),
            notes: String::new(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// "auto" follows the OS language; otherwise a tag such as "en" or "ru".
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Replaces the locale's block separator.
    #[serde(default)]
    pub separator: Option<String>,
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub profile: AssistantProfile,
    /// Full keyword table; wins over `locale` when present.
    #[serde(default)]
    pub custom_locale: Option<Locale>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            separator: None,
            categories: default_categories(),
            profile: AssistantProfile::default(),
            custom_locale: None,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Load, or fall back to defaults when no file exists yet.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// True when the error means the config file does not exist.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        ScheduleStore::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            ScheduleStore::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// The locale the engine should run with.
    pub fn resolve_locale(&self) -> Locale {
        let mut locale = match &self.custom_locale {
            Some(custom) => custom.clone(),
            None if self.locale.trim().eq_ignore_ascii_case("auto") => Locale::detect(),
            None => Locale::from_tag(&self.locale),
        };
        if let Some(sep) = &self.separator
            && !sep.trim().is_empty()
        {
            locale.separator = sep.trim().to_string();
        }
        locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_missing_config_detected() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
        assert_eq!(Config::load_or_default(&ctx).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file_gets_defaults() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "locale = \"ru\"\n[profile]\nbreak_minutes = 5\n").unwrap();
        let cfg = Config::load(&ctx).unwrap();
        assert_eq!(cfg.locale, "ru");
        assert_eq!(cfg.profile.break_minutes, 5);
        assert_eq!(cfg.profile.work_start_time, "09:00");
        assert_eq!(cfg.categories.len(), 3);
        assert_eq!(cfg.resolve_locale().tag, "ru");
    }

    #[test]
    fn test_separator_override() {
        let cfg = Config {
            locale: "en".to_string(),
            separator: Some(" ### ".to_string()),
            ..Config::default()
        };
        assert_eq!(cfg.resolve_locale().separator, "###");
    }

    #[test]
    fn test_broken_file_is_not_missing() {
        let ctx = TestContext::new();
        fs::write(ctx.get_config_file_path().unwrap(), "locale = [").unwrap();
        let err = Config::load(&ctx).unwrap_err();
        assert!(!Config::is_missing_config_error(&err));
        assert!(Config::load_or_default(&ctx).is_err());
    }
}
