use dragboard_core::config::TransformConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Editor configuration (persistent)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Container width in board units
    #[serde(default = "default_container_width")]
    pub container_width: f64,

    /// Container height in board units
    #[serde(default = "default_container_height")]
    pub container_height: f64,

    /// Transform policy passed to the core engine
    #[serde(default)]
    pub transform: TransformConfig,
}

fn default_container_width() -> f64 {
    300.0
}

fn default_container_height() -> f64 {
    300.0
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            container_width: default_container_width(),
            container_height: default_container_height(),
            transform: TransformConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Load config from the standard location
    /// Returns the default config if the file is missing or malformed
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("failed to load config, using defaults: {e}");
                Self::default()
            }
        }
    }

    fn try_load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let config: EditorConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save config; logs the error but does not block on failure
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            tracing::warn!("failed to save config: {e}");
        }
    }

    /// Atomic save: write to a temp file, then rename
    fn try_save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        let temp_path = config_path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(temp_path, config_path)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        use directories::ProjectDirs;

        let proj_dirs = ProjectDirs::from("", "", "dragboard")
            .ok_or("Failed to determine config directory")?;

        Ok(proj_dirs.config_dir().join("config.json"))
    }
}
