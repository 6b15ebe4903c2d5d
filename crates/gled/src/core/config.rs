//! # Application Configuration
//!
//! Window and shader settings for the entry point. Everything here has a
//! default matching the stock application, so a config file only needs to
//! name the values it overrides.
//!
//! The GL context version and profile are deliberately absent: they are
//! build-time constants of the window module, not runtime settings.

use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::config::{Config, ConfigError};

/// Default window title
pub const DEFAULT_TITLE: &str = "Conway's Game of Life";

/// Default window edge length in pixels
pub const DEFAULT_SIZE: u32 = 800;

/// # Window Configuration
///
/// Title and size of the (non-resizable) main window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
}

impl WindowConfig {
    /// Create a new window configuration
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
        }
    }

    /// Width and height must both be positive
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Window dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_SIZE, DEFAULT_SIZE)
    }
}

/// # Shader Configuration
///
/// Paths of the vertex and fragment GLSL sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Path to the vertex shader source
    pub vertex_shader_path: String,
    /// Path to the fragment shader source
    pub fragment_shader_path: String,
}

impl ShaderConfig {
    /// Vertex shader file name of the stock application
    pub const VERTEX_SHADER: &'static str = "basic.vert";
    /// Fragment shader file name of the stock application
    pub const FRAGMENT_SHADER: &'static str = "basic_orange.frag";

    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
        }
    }

    /// Create shader config with automatic path resolution
    ///
    /// Tries a few common locations so the application can be started from
    /// the workspace root or from its own crate directory.
    pub fn with_path_resolution(base_vertex: &str, base_fragment: &str) -> Self {
        let shader_dirs = [
            "resources/shaders/",
            "shaders/",
            "../resources/shaders/",
            "./",
        ];

        let find = |name: &str| {
            shader_dirs
                .iter()
                .map(|dir| format!("{dir}{name}"))
                .find(|candidate| Path::new(candidate).exists())
                .unwrap_or_else(|| format!("resources/shaders/{name}"))
        };

        Self {
            vertex_shader_path: find(base_vertex),
            fragment_shader_path: find(base_fragment),
        }
    }

    /// Validate that shader files exist
    pub fn validate(&self) -> Result<(), String> {
        if !Path::new(&self.vertex_shader_path).exists() {
            return Err(format!("Vertex shader not found: {}", self.vertex_shader_path));
        }
        if !Path::new(&self.fragment_shader_path).exists() {
            return Err(format!("Fragment shader not found: {}", self.fragment_shader_path));
        }
        Ok(())
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::with_path_resolution(Self::VERTEX_SHADER, Self::FRAGMENT_SHADER)
    }
}

/// # Application Configuration
///
/// Top-level settings read by the entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Main window settings
    pub window: WindowConfig,
    /// Shader asset paths
    pub shaders: ShaderConfig,
}

impl AppConfig {
    /// Environment variable naming an alternative config file
    pub const PATH_ENV: &'static str = "GLED_CONFIG";
    /// Config file looked up when the environment variable is unset
    pub const DEFAULT_PATH: &'static str = "gled.toml";

    /// Resolve the config path from the environment and load it
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(Self::PATH_ENV).unwrap_or_else(|_| Self::DEFAULT_PATH.to_string());
        let config = Self::load_or_default(&path)?;
        config.window.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

impl Config for AppConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_defaults_match_stock_application() {
        let config = WindowConfig::default();
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!((config.width, config.height), (800, 800));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(WindowConfig::new("x", 0, 600).validate().is_err());
        assert!(WindowConfig::new("x", 600, 0).validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = r#"
            [window]
            title = "Square"
            width = 640
        "#;
        let config = AppConfig::from_str_with(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.window.title, "Square");
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, DEFAULT_SIZE);
        assert!(config.shaders.fragment_shader_path.ends_with(ShaderConfig::FRAGMENT_SHADER));
    }

    #[test]
    fn test_ron_config() {
        let text = r#"(window: (title: "Ron", width: 320, height: 200), shaders: (vertex_shader_path: "a.vert", fragment_shader_path: "b.frag"))"#;
        let config = AppConfig::from_str_with(text, ConfigFormat::Ron).unwrap();
        assert_eq!(config.window, WindowConfig::new("Ron", 320, 200));
        assert_eq!(config.shaders, ShaderConfig::new("a.vert", "b.frag"));
    }

    #[test]
    fn test_toml_written_config_reads_back() {
        let config = AppConfig {
            window: WindowConfig::new("Written", 1024, 768),
            shaders: ShaderConfig::new("v.vert", "f.frag"),
        };
        let text = config.to_string_with(ConfigFormat::Toml).unwrap();
        assert_eq!(AppConfig::from_str_with(&text, ConfigFormat::Toml).unwrap(), config);
    }

    #[test]
    fn test_missing_shader_reported() {
        let config = ShaderConfig::new("does/not/exist.vert", "does/not/exist.frag");
        let err = config.validate().unwrap_err();
        assert!(err.contains("Vertex shader not found"));
    }
}
