//! Export settings management
//!
//! Settings are kept in a JSON file. A missing file means defaults; a file
//! that fails to parse is logged and replaced by defaults in memory so that
//! an export never fails on a bad settings file.

use crate::{Result, StoreError};
use layout_engine::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bucket that receives exported manuals
pub const DEFAULT_BUCKET: &str = "documents";

/// Largest exported PDF accepted for upload (10 MiB)
pub const DEFAULT_MAX_ARTIFACT_BYTES: u64 = 10 * 1024 * 1024;

/// Lifetime of signed download URLs, in seconds
pub const DEFAULT_SIGNED_URL_TTL_SECS: u64 = 3600;

/// Settings for the export pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    /// Storage bucket for exported PDFs
    pub bucket: String,
    /// Lifetime of the returned signed URL
    pub signed_url_ttl_secs: u64,
    /// Exports larger than this are rejected before upload
    pub max_artifact_bytes: u64,
    /// Flate-compress page content streams
    pub compress: bool,
    /// Page geometry and typography
    pub layout: LayoutConfig,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            signed_url_ttl_secs: DEFAULT_SIGNED_URL_TTL_SECS,
            max_artifact_bytes: DEFAULT_MAX_ARTIFACT_BYTES,
            compress: true,
            layout: LayoutConfig::default(),
        }
    }
}

impl ExportSettings {
    /// Check the settings before use
    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(StoreError::InvalidSettings("bucket must not be empty".to_string()));
        }
        if self.signed_url_ttl_secs == 0 {
            return Err(StoreError::InvalidSettings(
                "signedUrlTtlSecs must be positive".to_string(),
            ));
        }
        if self.max_artifact_bytes == 0 {
            return Err(StoreError::InvalidSettings(
                "maxArtifactBytes must be positive".to_string(),
            ));
        }
        self.layout.validate()?;
        Ok(())
    }
}

fn parse_or_default(content: &str, path: &Path) -> ExportSettings {
    match serde_json::from_str::<ExportSettings>(content) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(
                "Failed to parse settings file {}, using defaults: {}",
                path.display(),
                e
            );
            ExportSettings::default()
        }
    }
}

/// Settings manager for loading, saving, and updating export settings
pub struct SettingsManager {
    settings_path: PathBuf,
    current: ExportSettings,
}

impl SettingsManager {
    /// Manage the settings file at `settings_path`
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            current: ExportSettings::default(),
        }
    }

    /// Manage `settings.json` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join("settings.json"))
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or defaults if the file doesn't exist
    pub async fn load(&mut self) -> Result<&ExportSettings> {
        self.current = if tokio::fs::try_exists(&self.settings_path).await? {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            parse_or_default(&content, &self.settings_path)
        } else {
            ExportSettings::default()
        };
        Ok(&self.current)
    }

    /// Load settings synchronously
    pub fn load_sync(&mut self) -> Result<&ExportSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            parse_or_default(&content, &self.settings_path)
        } else {
            ExportSettings::default()
        };
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, content).await?;
        Ok(())
    }

    /// Save settings synchronously
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    pub fn get(&self) -> &ExportSettings {
        &self.current
    }

    /// Validate, replace and save settings
    pub async fn update(&mut self, settings: ExportSettings) -> Result<()> {
        settings.validate()?;
        self.current = settings;
        self.save().await
    }

    /// Validate, replace and save settings synchronously
    pub fn update_sync(&mut self, settings: ExportSettings) -> Result<()> {
        settings.validate()?;
        self.current = settings;
        self.save_sync()
    }

    /// Reset settings to defaults and save
    pub fn reset_sync(&mut self) -> Result<&ExportSettings> {
        self.current = ExportSettings::default();
        self.save_sync()?;
        Ok(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = ExportSettings::default();
        assert_eq!(settings.bucket, "documents");
        assert_eq!(settings.signed_url_ttl_secs, 3600);
        assert_eq!(settings.max_artifact_bytes, 10 * 1024 * 1024);
        assert!(settings.compress);
        assert_eq!(settings.layout, LayoutConfig::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let settings: ExportSettings =
            serde_json::from_str(r#"{"signedUrlTtlSecs": 60, "layout": {"margin": 40}}"#).unwrap();
        assert_eq!(settings.signed_url_ttl_secs, 60);
        assert_eq!(settings.layout.margin, 40.0);
        assert_eq!(settings.bucket, "documents");
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let settings = ExportSettings {
            signed_url_ttl_secs: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(StoreError::InvalidSettings(_))));
    }

    #[test]
    fn test_validate_checks_layout() {
        let mut settings = ExportSettings::default();
        settings.layout.margin = 500.0;
        assert!(matches!(settings.validate(), Err(StoreError::Layout(_))));
    }

    #[test]
    fn test_settings_manager_load_save_sync() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::in_dir(temp_dir.path());

        let settings = manager.load_sync().unwrap();
        assert_eq!(settings, &ExportSettings::default());

        let mut new_settings = ExportSettings::default();
        new_settings.bucket = "temp".to_string();
        new_settings.compress = false;
        manager.update_sync(new_settings).unwrap();

        let mut manager2 = SettingsManager::in_dir(temp_dir.path());
        let loaded = manager2.load_sync().unwrap();
        assert_eq!(loaded.bucket, "temp");
        assert!(!loaded.compress);
    }

    #[test]
    fn test_invalid_update_is_not_saved() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::in_dir(temp_dir.path());
        let bad = ExportSettings {
            bucket: " ".to_string(),
            ..Default::default()
        };
        assert!(manager.update_sync(bad).is_err());
        assert!(!manager.settings_path().exists());
        assert_eq!(manager.get().bucket, "documents");
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut manager = SettingsManager::new(&path);
        let settings = manager.load_sync().unwrap();
        assert_eq!(settings, &ExportSettings::default());
    }

    #[test]
    fn test_settings_manager_reset_sync() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::in_dir(temp_dir.path());
        let settings = ExportSettings {
            signed_url_ttl_secs: 30,
            ..Default::default()
        };
        manager.update_sync(settings).unwrap();

        let settings = manager.reset_sync().unwrap();
        assert_eq!(settings.signed_url_ttl_secs, 3600);
    }

    #[tokio::test]
    async fn test_settings_manager_async() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::in_dir(temp_dir.path().join("nested"));

        manager.load().await.unwrap();

        let settings = ExportSettings {
            max_artifact_bytes: 2048,
            ..Default::default()
        };
        manager.update(settings).await.unwrap();

        let mut manager2 = SettingsManager::in_dir(temp_dir.path().join("nested"));
        let loaded = manager2.load().await.unwrap();
        assert_eq!(loaded.max_artifact_bytes, 2048);
    }
}
