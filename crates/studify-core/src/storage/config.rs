//! TOML-based application configuration.
//!
//! Holds the per-device state the pages read and write:
//! - Profile (name, major)
//! - Upcoming exam (subject, date, prep level)
//! - Current task (subject, title)
//! - Attendance counters
//! - Planner defaults (hours, intensity)
//! - UI theme
//!
//! Configuration is stored at `~/.config/studify/config.toml`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::data_dir;
use crate::attendance::AttendanceStats;
use crate::error::ConfigError;
use crate::exam::PrepLevel;
use crate::plan::{hours_to_minutes, Intensity, TaskRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_major")]
    pub major: String,
}

/// The exam being prepared for. Unset until the student fills in setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamConfig {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default = "default_prep")]
    pub prep: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_hours")]
    pub hours: f64,
    #[serde(default)]
    pub intensity: Intensity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub dark_mode: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studify/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub exam: ExamConfig,
    /// Current task, used for the task blocks of a balanced plan.
    #[serde(default)]
    pub task: TaskRef,
    #[serde(default)]
    pub attendance: AttendanceStats,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

fn default_name() -> String {
    "Student".into()
}
fn default_major() -> String {
    "General".into()
}
fn default_prep() -> u8 {
    50
}
fn default_hours() -> f64 {
    2.0
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            major: default_major(),
        }
    }
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            subject: None,
            date: None,
            prep: default_prep(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            hours: default_hours(),
            intensity: Intensity::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        value
                            .parse::<f64>()
                            .ok()
                            .and_then(serde_json::Number::from_f64)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                // Strings and unset optional fields. `null` clears an
                // optional field; required string fields reject it later.
                _ if value == "null" => serde_json::Value::Null,
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Path of the config file in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be resolved.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// defaults cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let mut cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                cfg.normalize();
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("using default configuration: {e}");
            Self::default()
        })
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value has the wrong type,
    /// or the resulting config fails validation. On error `self` is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate().map_err(|e| match e {
            ConfigError::InvalidValue { message, .. } => ConfigError::InvalidValue {
                key: key.to_string(),
                message,
            },
            other => other,
        })?;
        *self = updated;
        Ok(())
    }

    /// Check the values the pages constrain with sliders and presets.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        hours_to_minutes(self.planner.hours)
            .map_err(|e| invalid("planner.hours", e.to_string()))?;
        PrepLevel::new(self.exam.prep).map_err(|e| invalid("exam.prep", e.to_string()))?;
        let att = &self.attendance;
        AttendanceStats::new(att.total, att.attended, att.required)
            .map_err(|e| invalid("attendance", e.to_string()))?;
        if att.attended > att.total {
            return Err(invalid(
                "attendance.attended",
                format!("{} attended exceeds {} held", att.attended, att.total),
            ));
        }
        Ok(())
    }

    /// Apply the limits the pages enforce on input to values read from disk.
    fn normalize(&mut self) {
        let att = &mut self.attendance;
        if att.attended > att.total {
            warn!(
                attended = att.attended,
                total = att.total,
                "attended exceeds classes held, capping"
            );
            att.set_total(att.total);
        }
    }

    /// Forget the exam: clears subject and date, prep back to 50.
    pub fn reset_exam(&mut self) {
        self.exam = ExamConfig::default();
        info!("exam data reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.profile.name, "Student");
        assert_eq!(cfg.profile.major, "General");
        assert_eq!(cfg.exam.subject, None);
        assert_eq!(cfg.exam.prep, 50);
        assert_eq!(cfg.task.subject, "Task");
        assert_eq!(cfg.task.title, "Assignment");
        assert_eq!(cfg.attendance.total, 20);
        assert_eq!(cfg.attendance.attended, 18);
        assert_eq!(cfg.attendance.required, 70);
        assert_eq!(cfg.planner.hours, 2.0);
        assert_eq!(cfg.planner.intensity, Intensity::Balanced);
        assert!(!cfg.ui.dark_mode);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [exam]
            subject = "Anatomy 101"
            date = "2026-10-19"

            [planner]
            intensity = "panic"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.exam.subject.as_deref(), Some("Anatomy 101"));
        assert_eq!(cfg.exam.date, NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(cfg.exam.prep, 50);
        assert_eq!(cfg.planner.intensity, Intensity::Panic);
        assert_eq!(cfg.planner.hours, 2.0);
        assert_eq!(cfg.task, TaskRef::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("task.title").as_deref(), Some("Assignment"));
        assert_eq!(cfg.get("attendance.required").as_deref(), Some("70"));
        assert_eq!(cfg.get("planner.intensity").as_deref(), Some("balanced"));
        assert_eq!(cfg.get("exam.subject").as_deref(), Some("null"));
        assert!(cfg.get("ui.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "ui.dark_mode", "true").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "ui.dark_mode").unwrap(),
            &serde_json::Value::Bool(true)
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "ui.nonexistent_key", "value");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "ui.dark_mode", "not_a_bool");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn set_fills_unset_optional_fields() {
        let mut cfg = Config::default();
        cfg.set("exam.subject", "Anatomy 101").unwrap();
        cfg.set("exam.date", "2026-11-02").unwrap();
        assert_eq!(cfg.exam.subject.as_deref(), Some("Anatomy 101"));
        assert_eq!(cfg.exam.date, NaiveDate::from_ymd_opt(2026, 11, 2));
    }

    #[test]
    fn set_accepts_half_hours_and_rejects_off_slider_values() {
        let mut cfg = Config::default();
        cfg.set("planner.hours", "3.5").unwrap();
        assert_eq!(cfg.planner.hours, 3.5);

        let err = cfg.set("planner.hours", "9").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "planner.hours"));
        assert_eq!(cfg.planner.hours, 3.5);
    }

    #[test]
    fn set_rejects_bad_enum_and_date() {
        let mut cfg = Config::default();
        assert!(cfg.set("planner.intensity", "chill").is_err());
        assert!(cfg.set("exam.date", "next tuesday").is_err());
        assert!(cfg.set("exam.prep", "150").is_err());
        assert!(cfg.set("attendance.attended", "30").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn reset_exam_clears_exam_only() {
        let mut cfg = Config::default();
        cfg.exam.subject = Some("Chemistry".into());
        cfg.exam.prep = 90;
        cfg.task.title = "Lab report".into();
        cfg.reset_exam();
        assert_eq!(cfg.exam, ExamConfig::default());
        assert_eq!(cfg.task.title, "Lab report");
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("task.subject", "Math").unwrap();
        cfg.set("planner.intensity", "panic").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.task.subject, "Math");
        assert_eq!(loaded.planner.intensity, Intensity::Panic);
    }

    #[test]
    fn load_from_caps_attended_at_total() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[attendance]\ntotal = 20\nattended = 30\nrequired = 70\n",
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.attendance.attended, 20);
        assert_eq!(cfg.attendance.total, 20);
        assert_eq!(cfg.attendance.percentage(), 100);
    }

    #[test]
    fn set_null_clears_optional_fields() {
        let mut cfg = Config::default();
        cfg.set("exam.subject", "Chemistry").unwrap();
        cfg.set("exam.date", "2026-11-02").unwrap();

        cfg.set("exam.subject", "null").unwrap();
        cfg.set("exam.date", "null").unwrap();
        assert_eq!(cfg.exam.subject, None);
        assert_eq!(cfg.exam.date, None);
    }

    #[test]
    fn set_null_rejected_for_required_fields() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("task.title", "null"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg.task.title, "Assignment");
    }

    #[test]
    fn load_from_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
