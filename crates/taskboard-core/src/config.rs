use crate::{TaskboardError, TaskboardResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_NAME: &str = "taskboard.json";
pub const DEFAULT_COLUMNS: [&str; 4] = ["BACKLOG", "TODO", "DOING", "DONE"];

/// Where the card file lives when no explicit path is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataLocation {
    Home,
    #[default]
    WorkingDir,
}

/// Text of the placeholder card that keeps the board from being empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultCardConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Default for DefaultCardConfig {
    fn default() -> Self {
        Self {
            name: "The default card".to_string(),
            description: "Create the new one".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub location: DataLocation,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub default_card: Option<DefaultCardConfig>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("taskboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("taskboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Loads the user config, falling back to defaults when it is missing or unreadable.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str::<Self>(&content).map_err(|e| e.to_string()));
        match parsed {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn effective_file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }

    /// Column names in display order. Rejects an explicitly empty list.
    pub fn effective_columns(&self) -> TaskboardResult<Vec<String>> {
        match &self.columns {
            None => Ok(DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect()),
            Some(columns) if columns.is_empty() => Err(TaskboardError::Config(
                "at least one column must be configured".to_string(),
            )),
            Some(columns) => Ok(columns.clone()),
        }
    }

    pub fn effective_default_card(&self) -> DefaultCardConfig {
        self.default_card.clone().unwrap_or_default()
    }

    /// Resolves the card file path from `location` and `file_name`.
    pub fn data_path(&self) -> TaskboardResult<PathBuf> {
        let file_name = self.effective_file_name();
        match self.location {
            DataLocation::Home => dirs::home_dir()
                .map(|home| home.join(file_name))
                .ok_or_else(|| {
                    TaskboardError::Config("could not determine the home directory".to_string())
                }),
            DataLocation::WorkingDir => Ok(PathBuf::from(file_name)),
        }
    }
}
