use aviator_common::Color;
use aviator_scene::{LightCommand, Lighting, PROPELLER_STEP};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Initial window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Aviator".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Fixed per-frame increments, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub sea_step: f32,
    pub sky_step: f32,
    pub propeller_step: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            sea_step: 0.005,
            sky_step: 0.01,
            propeller_step: PROPELLER_STEP,
        }
    }
}

/// Starting light colors, written as `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    pub shadow_color: Color,
    pub hemisphere_color: Color,
}

impl Default for LightsConfig {
    fn default() -> Self {
        let lighting = Lighting::default();
        Self {
            shadow_color: lighting.shadow().color(),
            hemisphere_color: lighting.hemisphere().sky,
        }
    }
}

impl LightsConfig {
    /// Commands that move a default `Lighting` to these colors.
    pub fn commands(&self) -> [LightCommand; 2] {
        [
            LightCommand::SetShadowColor(self.shadow_color),
            LightCommand::SetHemisphereColor(self.hemisphere_color),
        ]
    }
}

/// Everything tunable at startup. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
    pub lights: LightsConfig,
    /// Seed for cloud placement.
    pub sky_seed: u64,
    pub shadow_map_size: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            animation: AnimationConfig::default(),
            lights: LightsConfig::default(),
            sky_seed: 42,
            shadow_map_size: 2048,
        }
    }
}

impl GameConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !(1..=8192).contains(&self.shadow_map_size) {
            return Err(ConfigError::Invalid(format!(
                "shadow_map_size must be in 1..=8192, got {}",
                self.shadow_map_size
            )));
        }
        let a = &self.animation;
        if ![a.sea_step, a.sky_step, a.propeller_step]
            .iter()
            .all(|s| s.is_finite())
        {
            return Err(ConfigError::Invalid(
                "animation steps must be finite".into(),
            ));
        }
        Ok(())
    }
}
