use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::filter::DEFAULT_PUBLIC_COLUMNS;
use crate::data::model::DatasetKind;

/// Env var naming an optional JSON config file.
pub const CONFIG_PATH_VAR: &str = "ADSHARK_CONFIG";
/// Env var holding the password for restricted columns.
pub const PASSWORD_VAR: &str = "ADSHARK_PASSWORD";
/// Env var overriding the directory the default datasets live in.
pub const DATA_DIR_VAR: &str = "ADSHARK_DATA_DIR";

/// File name of each dataset, relative to `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatasetFiles {
    pub past: String,
    pub future: String,
    pub yearly: String,
    pub weekly: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            past: DatasetKind::Past.default_file_name().to_string(),
            future: DatasetKind::Future.default_file_name().to_string(),
            yearly: DatasetKind::Yearly.default_file_name().to_string(),
            weekly: DatasetKind::Weekly.default_file_name().to_string(),
        }
    }
}

impl DatasetFiles {
    pub fn get(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Past => &self.past,
            DatasetKind::Future => &self.future,
            DatasetKind::Yearly => &self.yearly,
            DatasetKind::Weekly => &self.weekly,
        }
    }
}

/// Startup configuration. Read once, then handed to the gate, the column
/// policy and the loader; nothing reads it from global state.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub caption: String,
    pub data_dir: PathBuf,
    pub files: DatasetFiles,
    pub public_columns: Vec<String>,
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Adshark bets".to_string(),
            caption: "Past bets/model performance below, future bets will be password protected."
                .to_string(),
            data_dir: PathBuf::from("."),
            files: DatasetFiles::default(),
            public_columns: DEFAULT_PUBLIC_COLUMNS.iter().map(|c| c.to_string()).collect(),
            password: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("title", &self.title)
            .field("caption", &self.caption)
            .field("data_dir", &self.data_dir)
            .field("files", &self.files)
            .field("public_columns", &self.public_columns)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Build the runtime config: `.env`, then the optional JSON file named by
    /// `ADSHARK_CONFIG`, then individual env overrides.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("reading .env"),
        }

        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid dashboard config JSON")
    }

    /// Apply overrides from an env-like lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(password) = lookup(PASSWORD_VAR) {
            self.password = Some(password);
        }
        if let Some(dir) = lookup(DATA_DIR_VAR) {
            self.data_dir = PathBuf::from(dir);
        }
    }

    /// Default on-disk location of a dataset.
    pub fn source_path(&self, kind: DatasetKind) -> PathBuf {
        self.data_dir.join(self.files.get(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_files() {
        let config = Config::default();
        assert_eq!(config.source_path(DatasetKind::Past), Path::new("./past.csv"));
        assert_eq!(
            config.source_path(DatasetKind::Weekly),
            Path::new("./bet_summary_by_season_week.csv")
        );
        assert_eq!(config.public_columns.len(), 6);
        assert!(config.password.is_none());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json_str(
            r#"{ "data_dir": "/srv/bets", "files": { "future": "upcoming.csv" }, "password": "pw" }"#,
        )
        .unwrap();
        assert_eq!(config.source_path(DatasetKind::Future), Path::new("/srv/bets/upcoming.csv"));
        assert_eq!(config.source_path(DatasetKind::Past), Path::new("/srv/bets/past.csv"));
        assert_eq!(config.password.as_deref(), Some("pw"));
        assert_eq!(config.title, "Adshark bets");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Config::from_json_str("{ not json").is_err());
    }

    #[test]
    fn env_overrides_win() {
        let mut config = Config::from_json_str(r#"{ "password": "from-file" }"#).unwrap();
        config.apply_overrides(|key| match key {
            PASSWORD_VAR => Some("from-env".to_string()),
            DATA_DIR_VAR => Some("/data".to_string()),
            _ => None,
        });
        assert_eq!(config.password.as_deref(), Some("from-env"));
        assert_eq!(config.data_dir, PathBuf::from("/data"));
    }

    #[test]
    fn debug_redacts_password() {
        let config = Config {
            password: Some("Sharp$2025".into()),
            ..Config::default()
        };
        let shown = format!("{config:?}");
        assert!(!shown.contains("Sharp$2025"), "{shown}");
        assert!(shown.contains("<redacted>"));
        assert!(!format!("{:?}", Config::default()).contains("<redacted>"));
    }

    #[test]
    fn missing_override_leaves_value() {
        let mut config = Config::default();
        config.apply_overrides(|_| None);
        assert_eq!(config, Config::default());
    }
}
