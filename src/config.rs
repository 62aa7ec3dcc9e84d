//! Application configuration.
//!
//! Loaded from `config.toml` in the platform config directory. A missing or
//! invalid file falls back to the built-in defaults; configuration problems
//! never stop the clock from starting.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root directory of the image assets.
    pub assets_dir: PathBuf,
    /// Holiday table location, relative to `assets_dir`.
    pub holidays_file: String,
    /// Fixed display time zone. Never follows the host locale.
    pub time_zone: Tz,
    /// First day of the day counter; the anchor itself is day 1.
    pub anchor_date: NaiveDate,
    /// strftime format for the date in the top-left corner.
    pub date_format: String,
    /// strftime format for the time in the top-right corner.
    pub time_format: String,
    /// Label template for the day counter; `{n}` is replaced by the count.
    pub day_counter_label: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            holidays_file: "holidays/holidays.json".to_string(),
            time_zone: chrono_tz::Europe::Moscow,
            anchor_date: NaiveDate::from_ymd_opt(2022, 2, 24).unwrap(),
            date_format: "%d.%m.%Y".to_string(),
            time_format: "%H:%M:%S".to_string(),
            day_counter_label: "Day {n}".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the standard location.
    pub fn load() -> Self {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(data) => match toml::from_str(&data) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!(
                        "invalid config {}: {}; using defaults",
                        path.display(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "failed to read config {}: {}; using defaults",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Absolute-ish path of the holiday table file.
    pub fn holidays_path(&self) -> PathBuf {
        self.assets_dir.join(&self.holidays_file)
    }

    pub fn day_counter_text(&self, days: i64) -> String {
        self.day_counter_label.replace("{n}", &days.to_string())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "holiday-clock")
}

fn config_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Location of the persisted preference flags.
pub fn preferences_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("preferences.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml"));
        assert_eq!(config.time_zone, chrono_tz::Europe::Moscow);
        assert_eq!(
            config.anchor_date,
            NaiveDate::from_ymd_opt(2022, 2, 24).unwrap()
        );
    }

    #[test]
    fn file_overrides_are_applied() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
                assets_dir = "/opt/clock/assets"
                time_zone = "Europe/Minsk"
                anchor_date = "2020-01-01"
                day_counter_label = "DAY {n}"
            "#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.assets_dir, PathBuf::from("/opt/clock/assets"));
        assert_eq!(config.time_zone, chrono_tz::Europe::Minsk);
        assert_eq!(config.day_counter_text(5), "DAY 5");
        // Unspecified fields keep their defaults.
        assert_eq!(config.time_format, "%H:%M:%S");
    }

    #[test]
    fn invalid_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "time_zone = \"Not/AZone\"").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.time_zone, chrono_tz::Europe::Moscow);
    }

    #[test]
    fn holidays_path_is_rooted_at_the_assets_dir() {
        let config = AppConfig::default();
        assert_eq!(
            config.holidays_path(),
            PathBuf::from("assets/holidays/holidays.json")
        );
    }
}
