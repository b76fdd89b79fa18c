//! Configuration module for the mind map exporter

use crate::core::builder::TreeLimits;
use crate::core::export::visualization::{ImageSettings, LayoutSettings};
use crate::core::export::{DocumentMeta, OutputFormat};
use crate::core::models::MindMapTheme;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path values
const DIR_VARIABLE: &str = "$MINDMAP";

const LOG_LEVELS: [&str; 4] = ["error", "warn", "info", "debug"];

/// Every key accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: [&str; 20] = [
    "level",
    "file",
    "verbose",
    "out_dir",
    "author",
    "utc_offset_hours",
    "default_format",
    "default_theme",
    "max_depth",
    "max_nodes",
    "max_canvas_dimension",
    "min_width",
    "min_height",
    "padding",
    "node_padding",
    "level_spacing",
    "min_font_size",
    "max_font_size",
    "label_max_chars",
    "font_paths",
];

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory generated documents are written to
    #[serde(default)]
    pub out_dir: String,
}

/// Document generation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Name written as author / owner and in the image watermark
    #[serde(default)]
    pub author: String,
    /// Offset from UTC, in hours, used for timestamps
    #[serde(default)]
    pub utc_offset_hours: i32,
    /// Format used when none is given on the command line
    #[serde(default)]
    pub default_format: String,
    /// Theme used when none is given; empty means unstyled
    #[serde(default)]
    pub default_theme: String,
}

/// Size guards
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Deepest allowed level (root is 0)
    #[serde(default)]
    pub max_depth: usize,
    /// Largest allowed node count
    #[serde(default)]
    pub max_nodes: usize,
    /// Largest allowed image side in pixels
    #[serde(default)]
    pub max_canvas_dimension: u32,
}

/// Image rendering settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Minimum canvas width
    #[serde(default)]
    pub min_width: u32,
    /// Minimum canvas height
    #[serde(default)]
    pub min_height: u32,
    /// Margin around the drawing
    #[serde(default)]
    pub padding: u32,
    /// Padding inside node boxes
    #[serde(default)]
    pub node_padding: u32,
    /// Radius step per level
    #[serde(default)]
    pub level_spacing: u32,
    /// Smallest label font size
    #[serde(default)]
    pub min_font_size: u32,
    /// Largest label font size
    #[serde(default)]
    pub max_font_size: u32,
    /// Labels are cut to this many characters
    #[serde(default)]
    pub label_max_chars: usize,
    /// Candidate font files, tried in order
    #[serde(default)]
    pub font_paths: Vec<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Generation settings
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Size guards
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Image settings
    #[serde(default)]
    pub image: ImageConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override output directory
    pub out_dir: Option<String>,
    /// Override author name
    pub author: Option<String>,
}

/// Copy `default` into `value` when `value` is unset
fn fill<T: Clone + PartialEq + Default>(value: &mut T, default: &T) -> bool {
    let unset = T::default();
    if *value == unset && *default != unset {
        value.clone_from(default);
        true
    } else {
        false
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid value for '{key}': expected a number, got '{value}'"))
}

impl Config {
    /// Get the `$MINDMAP` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/mindmap`
    /// - macOS: `~/Library/Application Support/mindmap`
    /// - Windows: `%APPDATA%\mindmap`
    #[must_use]
    pub fn get_mindmap_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mindmap")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Fields left empty (or zero) in the current config take the default
    /// value, so upgrading adds new settings without touching user choices.
    /// `utc_offset_hours` is exempt because zero is a meaningful offset.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let changed = [
            fill(&mut self.logging.level, &defaults.logging.level),
            fill(&mut self.logging.file, &defaults.logging.file),
            fill(&mut self.paths.out_dir, &defaults.paths.out_dir),
            fill(&mut self.generation.author, &defaults.generation.author),
            fill(&mut self.generation.default_format, &defaults.generation.default_format),
            fill(&mut self.limits.max_depth, &defaults.limits.max_depth),
            fill(&mut self.limits.max_nodes, &defaults.limits.max_nodes),
            fill(
                &mut self.limits.max_canvas_dimension,
                &defaults.limits.max_canvas_dimension,
            ),
            fill(&mut self.image.min_width, &defaults.image.min_width),
            fill(&mut self.image.min_height, &defaults.image.min_height),
            fill(&mut self.image.padding, &defaults.image.padding),
            fill(&mut self.image.node_padding, &defaults.image.node_padding),
            fill(&mut self.image.level_spacing, &defaults.image.level_spacing),
            fill(&mut self.image.min_font_size, &defaults.image.min_font_size),
            fill(&mut self.image.max_font_size, &defaults.image.max_font_size),
            fill(&mut self.image.label_max_chars, &defaults.image.label_max_chars),
            fill(&mut self.image.font_paths, &defaults.image.font_paths),
        ];
        changed.contains(&true)
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the file on disk is
    /// not modified.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }
        if let Some(author) = &overrides.author {
            self.generation.author.clone_from(author);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_mindmap_dir`](Self::get_mindmap_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_mindmap_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$MINDMAP` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_mindmap_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$MINDMAP` is expanded in
    /// path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);
        for path in &mut config.image.font_paths {
            *path = Self::expand_variables(path);
        }

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file has missing fields merged from defaults (and is
    /// re-saved when that changes anything). On first run the defaults are
    /// written out. Any read or parse failure falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Keys are field names (`level`, `out_dir`, `max_nodes`, ...); dashes
    /// may be used instead of underscores. `font_paths` is returned
    /// comma-separated.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "out_dir" => self.paths.out_dir.clone(),
            "author" => self.generation.author.clone(),
            "utc_offset_hours" => self.generation.utc_offset_hours.to_string(),
            "default_format" => self.generation.default_format.clone(),
            "default_theme" => self.generation.default_theme.clone(),
            "max_depth" => self.limits.max_depth.to_string(),
            "max_nodes" => self.limits.max_nodes.to_string(),
            "max_canvas_dimension" => self.limits.max_canvas_dimension.to_string(),
            "min_width" => self.image.min_width.to_string(),
            "min_height" => self.image.min_height.to_string(),
            "padding" => self.image.padding.to_string(),
            "node_padding" => self.image.node_padding.to_string(),
            "level_spacing" => self.image.level_spacing.to_string(),
            "min_font_size" => self.image.min_font_size.to_string(),
            "max_font_size" => self.image.max_font_size.to_string(),
            "label_max_chars" => self.image.label_max_chars.to_string(),
            "font_paths" => self.image.font_paths.join(","),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key
    ///
    /// Values are validated: numbers must parse, `level` must be a known
    /// level, `default_format` a known format and `default_theme` a known
    /// theme (or empty). `font_paths` takes a comma-separated list.
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(format!(
                        "Invalid log level '{value}': expected one of {}",
                        LOG_LEVELS.join(", ")
                    ));
                }
                self.logging.level = level;
            }
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => {
                self.logging.verbose = value
                    .parse()
                    .map_err(|_| format!("Invalid value for 'verbose': expected true or false, got '{value}'"))?;
            }
            "out_dir" => self.paths.out_dir = Self::expand_variables(value),
            "author" => self.generation.author = value.to_string(),
            "utc_offset_hours" => {
                let hours: i32 = parse_number(key, value)?;
                if !(-23..=23).contains(&hours) {
                    return Err(format!("Invalid UTC offset '{value}': expected -23..=23"));
                }
                self.generation.utc_offset_hours = hours;
            }
            "default_format" => {
                let format: OutputFormat = value.parse().map_err(|e| format!("{e}"))?;
                self.generation.default_format = format.to_string();
            }
            "default_theme" => {
                if !value.is_empty() && MindMapTheme::named(value).is_none() {
                    return Err(format!("Unknown theme '{value}'"));
                }
                self.generation.default_theme = value.to_lowercase();
            }
            "max_depth" => self.limits.max_depth = parse_number(key, value)?,
            "max_nodes" => self.limits.max_nodes = parse_number(key, value)?,
            "max_canvas_dimension" => self.limits.max_canvas_dimension = parse_number(key, value)?,
            "min_width" => self.image.min_width = parse_number(key, value)?,
            "min_height" => self.image.min_height = parse_number(key, value)?,
            "padding" => self.image.padding = parse_number(key, value)?,
            "node_padding" => self.image.node_padding = parse_number(key, value)?,
            "level_spacing" => self.image.level_spacing = parse_number(key, value)?,
            "min_font_size" => self.image.min_font_size = parse_number(key, value)?,
            "max_font_size" => self.image.max_font_size = parse_number(key, value)?,
            "label_max_chars" => self.image.label_max_chars = parse_number(key, value)?,
            "font_paths" => {
                self.image.font_paths = value
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(Self::expand_variables)
                    .collect();
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "out_dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            "author" => self.generation.author.clone_from(&defaults.generation.author),
            "utc_offset_hours" => {
                self.generation.utc_offset_hours = defaults.generation.utc_offset_hours;
            }
            "default_format" => self
                .generation
                .default_format
                .clone_from(&defaults.generation.default_format),
            "default_theme" => self
                .generation
                .default_theme
                .clone_from(&defaults.generation.default_theme),
            "max_depth" => self.limits.max_depth = defaults.limits.max_depth,
            "max_nodes" => self.limits.max_nodes = defaults.limits.max_nodes,
            "max_canvas_dimension" => {
                self.limits.max_canvas_dimension = defaults.limits.max_canvas_dimension;
            }
            "min_width" => self.image.min_width = defaults.image.min_width,
            "min_height" => self.image.min_height = defaults.image.min_height,
            "padding" => self.image.padding = defaults.image.padding,
            "node_padding" => self.image.node_padding = defaults.image.node_padding,
            "level_spacing" => self.image.level_spacing = defaults.image.level_spacing,
            "min_font_size" => self.image.min_font_size = defaults.image.min_font_size,
            "max_font_size" => self.image.max_font_size = defaults.image.max_font_size,
            "label_max_chars" => self.image.label_max_chars = defaults.image.label_max_chars,
            "font_paths" => self.image.font_paths.clone_from(&defaults.image.font_paths),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Tree size guards
    #[must_use]
    pub const fn tree_limits(&self) -> TreeLimits {
        TreeLimits {
            max_depth: self.limits.max_depth,
            max_nodes: self.limits.max_nodes,
        }
    }

    /// Authorship and clock settings for generated documents
    #[must_use]
    pub fn document_meta(&self) -> DocumentMeta {
        DocumentMeta::new(
            self.generation.author.clone(),
            self.generation.utc_offset_hours,
        )
    }

    /// Image renderer settings
    #[must_use]
    pub fn image_settings(&self) -> ImageSettings {
        ImageSettings {
            layout: LayoutSettings {
                min_width: self.image.min_width,
                min_height: self.image.min_height,
                padding: self.image.padding,
                level_spacing: self.image.level_spacing,
            },
            node_padding: self.image.node_padding,
            min_font_size: self.image.min_font_size,
            max_font_size: self.image.max_font_size,
            label_max_chars: self.image.label_max_chars,
            font_paths: self.image.font_paths.iter().map(PathBuf::from).collect(),
            max_canvas_dimension: self.limits.max_canvas_dimension,
            system_fonts: true,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        writeln!(f, "\n[generation]")?;
        writeln!(f, "  author = \"{}\"", self.generation.author)?;
        writeln!(f, "  utc_offset_hours = {}", self.generation.utc_offset_hours)?;
        writeln!(f, "  default_format = \"{}\"", self.generation.default_format)?;
        writeln!(f, "  default_theme = \"{}\"", self.generation.default_theme)?;

        writeln!(f, "\n[limits]")?;
        writeln!(f, "  max_depth = {}", self.limits.max_depth)?;
        writeln!(f, "  max_nodes = {}", self.limits.max_nodes)?;
        writeln!(f, "  max_canvas_dimension = {}", self.limits.max_canvas_dimension)?;

        writeln!(f, "\n[image]")?;
        writeln!(f, "  min_width = {}", self.image.min_width)?;
        writeln!(f, "  min_height = {}", self.image.min_height)?;
        writeln!(f, "  padding = {}", self.image.padding)?;
        writeln!(f, "  node_padding = {}", self.image.node_padding)?;
        writeln!(f, "  level_spacing = {}", self.image.level_spacing)?;
        writeln!(f, "  min_font_size = {}", self.image.min_font_size)?;
        writeln!(f, "  max_font_size = {}", self.image.max_font_size)?;
        writeln!(f, "  label_max_chars = {}", self.image.label_max_chars)?;
        let paths: Vec<String> = self
            .image
            .font_paths
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect();
        writeln!(f, "  font_paths = [{}]", paths.join(", "))?;

        Ok(())
    }
}
