use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Directory shown in the explorer. `None` uses the bundled portfolio.
    #[serde(default)]
    pub workspace_dir: Option<PathBuf>,

    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_line_numbers")]
    pub line_numbers_enabled: bool,

    /// Fixed explorer width in pixels
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: i32,

    /// Fallback filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_welcome_on_start")]
    pub welcome_on_start: bool,
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Dark
}

fn default_font_size() -> u32 {
    14
}

fn default_line_numbers() -> bool {
    true
}

fn default_sidebar_width() -> i32 {
    250
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_welcome_on_start() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            workspace_dir: None,
            theme_mode: default_theme_mode(),
            font_size: default_font_size(),
            line_numbers_enabled: default_line_numbers(),
            sidebar_width: default_sidebar_width(),
            log_level: default_log_level(),
            welcome_on_start: default_welcome_on_start(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        let config_path = Self::get_config_path();
        if !config_path.exists() {
            let default = Self::default();
            // Try to save defaults for next time
            if let Err(e) = default.save_to(&config_path) {
                tracing::warn!("Failed to write default settings: {}", e);
            }
            return default;
        }

        match Self::load_from(&config_path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to parse settings: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(8..=72).contains(&self.font_size) {
            return Err(AppError::Settings(format!(
                "font size {} out of range",
                self.font_size
            )));
        }
        if self.sidebar_width < 0 {
            return Err(AppError::Settings("negative sidebar width".to_string()));
        }
        Ok(())
    }

    pub fn is_dark(&self) -> bool {
        self.theme_mode == ThemeMode::Dark
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("codefolio");
        path.push("settings.json");
        path
    }
}
