//! Application settings management
//!
//! Settings persistence, loading, and updating for the cover page
//! generator.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the settings file inside the app data directory
pub const SETTINGS_FILE: &str = "cover_page_settings.json";

/// Main application settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Where exported PDFs are saved
    pub output: OutputSettings,
    /// Fonts, logo, and pixel density for rasterizing
    pub render: RenderSettings,
    /// PDF document settings
    pub pdf: PdfSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputSettings {
    /// Directory exported PDFs are saved into
    pub directory: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderSettings {
    /// System font family looked up when no font files are given
    pub font_family: String,
    /// Explicit regular font file, overriding discovery
    pub regular_font_path: Option<PathBuf>,
    /// Explicit bold font file, overriding discovery
    pub bold_font_path: Option<PathBuf>,
    /// PNG drawn as the logo and watermark
    pub logo_path: Option<PathBuf>,
    /// Device pixels per logical pixel
    pub scale: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            regular_font_path: None,
            bold_font_path: None,
            logo_path: None,
            scale: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PdfSettings {
    /// Flate-compress the embedded image
    pub compress: bool,
    /// Creator and producer name written to the document
    pub creator: String,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            compress: true,
            creator: crate::pdf::DEFAULT_CREATOR.to_string(),
        }
    }
}

/// Settings manager for loading, saving, and updating application settings
pub struct SettingsManager {
    settings_path: PathBuf,
    current: AppSettings,
}

impl SettingsManager {
    /// Create a new settings manager with the given app data directory
    pub fn new(app_data_dir: PathBuf) -> Self {
        Self {
            settings_path: app_data_dir.join(SETTINGS_FILE),
            current: AppSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub async fn load(&mut self) -> Result<&AppSettings> {
        self.current = if tokio::fs::try_exists(&self.settings_path).await? {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            parse_or_default(&content)
        } else {
            AppSettings::default()
        };
        Ok(&self.current)
    }

    /// Load settings synchronously (for use during app startup)
    pub fn load_sync(&mut self) -> Result<&AppSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            parse_or_default(&content)
        } else {
            AppSettings::default()
        };
        Ok(&self.current)
    }

    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, content).await?;
        Ok(())
    }

    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    pub fn get(&self) -> &AppSettings {
        &self.current
    }

    /// Update settings and save to disk
    pub async fn update(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save().await
    }

    pub fn update_sync(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save_sync()
    }
}

fn parse_or_default(content: &str) -> AppSettings {
    match serde_json::from_str::<AppSettings>(content) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to parse settings file, using defaults: {}", e);
            AppSettings::default()
        }
    }
}
