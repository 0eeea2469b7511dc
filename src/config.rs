//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/diomindmap/diomindmap.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `DIOMINDMAP_*` prefix
//! 5. Command-line flags (applied by the caller)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::DEFAULT_COLORS;

/// Default upper bound of the brightness shift between a base color and leaves.
pub const DEFAULT_MAX_BRIGHTNESS_OFFSET: i32 = 10;

/// Geometry used by the draw.io tree layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutSettings {
    pub node_width: u32,
    pub node_height: u32,
    /// Space between neighbouring leaves
    pub horizontal_gap: u32,
    /// Space between tree levels
    pub vertical_gap: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            node_width: 120,
            node_height: 60,
            horizontal_gap: 40,
            vertical_gap: 80,
        }
    }
}

/// Raw layout settings (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLayoutSettings {
    pub node_width: Option<u32>,
    pub node_height: Option<u32>,
    pub horizontal_gap: Option<u32>,
    pub vertical_gap: Option<u32>,
}

impl LayoutSettings {
    fn merge(&self, overlay: &RawLayoutSettings) -> Self {
        Self {
            node_width: overlay.node_width.unwrap_or(self.node_width),
            node_height: overlay.node_height.unwrap_or(self.node_height),
            horizontal_gap: overlay.horizontal_gap.unwrap_or(self.horizontal_gap),
            vertical_gap: overlay.vertical_gap.unwrap_or(self.vertical_gap),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_brightness_offset: Option<i32>,
    pub colors: Option<Vec<String>>,
    pub layout: RawLayoutSettings,
}

/// Unified configuration for diomindmap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Maximum brightness offset between a base color and the deepest leaf
    pub max_brightness_offset: i32,
    /// Base colors for children of page roots, cycled by sibling position
    pub colors: Vec<String>,
    pub layout: LayoutSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_brightness_offset: DEFAULT_MAX_BRIGHTNESS_OFFSET,
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            layout: LayoutSettings::default(),
        }
    }
}

/// Get the XDG config directory for diomindmap.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "diomindmap").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("diomindmap.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    parse_raw_settings(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn parse_raw_settings(content: &str) -> Result<RawSettings, toml::de::Error> {
    toml::from_str(content)
}

/// Split a comma separated color list, dropping empty entries.
pub fn parse_color_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

impl Settings {
    /// Overlay config onto self. Scalars win if set; a color list replaces
    /// the palette entirely since palette order is significant.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_brightness_offset: overlay
                .max_brightness_offset
                .unwrap_or(self.max_brightness_offset),
            colors: overlay
                .colors
                .clone()
                .unwrap_or_else(|| self.colors.clone()),
            layout: self.layout.merge(&overlay.layout),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;

        Ok(current)
    }

    /// Apply DIOMINDMAP_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(Environment::with_prefix("DIOMINDMAP").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_int("max_brightness_offset") {
            settings.max_brightness_offset = i32::try_from(val).map_err(|_| {
                ApplicationError::Config {
                    message: format!("max_brightness_offset out of range: {val}"),
                }
            })?;
        }
        if let Ok(val) = config.get_string("colors") {
            settings.colors = parse_color_list(&val);
        }
        let layout_keys: [(&str, &mut u32); 4] = [
            ("layout.node_width", &mut settings.layout.node_width),
            ("layout.node_height", &mut settings.layout.node_height),
            ("layout.horizontal_gap", &mut settings.layout.horizontal_gap),
            ("layout.vertical_gap", &mut settings.layout.vertical_gap),
        ];
        for (key, slot) in layout_keys {
            if let Ok(val) = config.get_int(key) {
                *slot = u32::try_from(val).map_err(|_| ApplicationError::Config {
                    message: format!("{key} out of range: {val}"),
                })?;
            }
        }

        Ok(settings)
    }

    /// Reject settings the generator cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.colors.is_empty() {
            return Err(ApplicationError::Config {
                message: "colors must contain at least one color".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# diomindmap configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/diomindmap/diomindmap.toml
#   File:   --config <path>
#   Env:    DIOMINDMAP_* environment variables (DIOMINDMAP_LAYOUT__NODE_WIDTH=...)
#   Flags:  -b / -c on the generate command

# Maximum brightness offset between the base color and leaf nodes
# max_brightness_offset = 10

# Base colors for children of the diagram root nodes (cycled in order)
# colors = ["#e6194B", "#3cb44b", "#ffe119", "#4363d8"]

[layout]
# node_width = 120
# node_height = 60
# horizontal_gap = 40
# vertical_gap = 80
"##
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_nineteen_colors_and_offset_ten() {
        let settings = Settings::default();
        assert_eq!(settings.max_brightness_offset, 10);
        assert_eq!(settings.colors.len(), 19);
        assert_eq!(settings.colors[0], "#e6194B");
        assert_eq!(settings.layout.node_width, 120);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_inherit() {
        let raw = parse_raw_settings(
            r##"
max_brightness_offset = 30
[layout]
vertical_gap = 10
"##,
        )
        .unwrap();

        let merged = Settings::default().merge_with(&raw);

        assert_eq!(merged.max_brightness_offset, 30);
        assert_eq!(merged.colors, Settings::default().colors);
        assert_eq!(merged.layout.vertical_gap, 10);
        assert_eq!(merged.layout.node_width, 120);
    }

    #[test]
    fn given_color_overlay_when_merging_then_replaces_palette_in_order() {
        let raw = parse_raw_settings(r##"colors = ["#000000", "#ffffff"]"##).unwrap();

        let merged = Settings::default().merge_with(&raw);

        assert_eq!(merged.colors, vec!["#000000", "#ffffff"]);
    }

    #[test]
    fn given_empty_colors_when_validating_then_config_error() {
        let settings = Settings {
            colors: vec![],
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_comma_list_when_parsing_colors_then_trims_and_drops_empty() {
        assert_eq!(
            parse_color_list(" #111111, #222222,,"),
            vec!["#111111", "#222222"]
        );
    }

    #[test]
    fn given_template_when_parsed_then_valid_toml() {
        let raw = parse_raw_settings(&Settings::template()).unwrap();
        assert!(raw.colors.is_none());
        assert!(raw.max_brightness_offset.is_none());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips() {
        let settings = Settings::default();
        let toml = settings.to_toml().unwrap();
        let back: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(back, settings);
    }
}
