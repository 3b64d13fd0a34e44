use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::models::PageSize;
use crate::error::{Error, Result};

pub const API_URL_ENV: &str = "CONTACT_MANAGER_API_URL";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
            page_size: PageSize::default().get(),
        }
    }
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "example", "ContactManager")
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|p| p.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from the platform config dir, falling back to defaults when there is no file.
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let config: AppConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_path().ok_or_else(|| Error::Config("no config dir".into()))?;
        self.save_to(&path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(Error::Config("api_url must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be at least 1".into()));
        }
        PageSize::try_from(self.page_size)
            .map_err(|_| Error::Config(format!("page_size must be one of {:?}", PageSize::ALLOWED)))?;
        Ok(())
    }

    pub fn page_size(&self) -> PageSize {
        PageSize::try_from(self.page_size).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"https://contacts.example.com\"\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api_url, "https://contacts.example.com");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.page_size().get(), 10);
    }

    #[test]
    fn rejects_unsupported_page_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 7\n").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig { page_size: 25, ..AppConfig::default() };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }
}
