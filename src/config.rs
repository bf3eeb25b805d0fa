use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "PHOTOCAT_CONFIG";
/// Environment variable overriding `magick.binary`.
pub const MAGICK_ENV: &str = "PHOTOCAT_MAGICK";
/// Environment variable overriding `db_path`.
pub const DB_ENV: &str = "PHOTOCAT_DB";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    #[serde(default)]
    pub magick: MagickConfig,

    #[serde(default)]
    pub thumbnails: ThumbnailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagickConfig {
    /// Path to the ImageMagick 7 `magick` executable, or a name on PATH.
    #[serde(default = "default_magick_binary")]
    pub binary: PathBuf,
}

fn default_magick_binary() -> PathBuf {
    PathBuf::from("magick")
}

impl Default for MagickConfig {
    fn default() -> Self {
        Self {
            binary: default_magick_binary(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    #[serde(default = "default_thumbnails_enabled")]
    pub enabled: bool,

    /// Longest edge in pixels.
    #[serde(default = "default_thumbnail_size")]
    pub size: u32,

    /// JPEG quality (1-100).
    #[serde(default = "default_thumbnail_quality")]
    pub quality: u8,
}

fn default_thumbnails_enabled() -> bool {
    true
}

fn default_thumbnail_size() -> u32 {
    256
}

fn default_thumbnail_quality() -> u8 {
    75
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            enabled: default_thumbnails_enabled(),
            size: default_thumbnail_size(),
            quality: default_thumbnail_quality(),
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("photocat")
        .join("photocat.db")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            magick: MagickConfig::default(),
            thumbnails: ThumbnailConfig::default(),
        }
    }
}

impl Config {
    /// Load from `$PHOTOCAT_CONFIG` or the default location, writing a default
    /// file on first run, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_path);

        let mut config = Self::load_or_create(&config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read `path`, or write the defaults there if it does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::read(path);
        }

        let config = Config::default();
        config.save_to(path)?;
        Ok(config)
    }

    /// Load from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Apply `PHOTOCAT_MAGICK` and `PHOTOCAT_DB` from the given lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(binary) = lookup(MAGICK_ENV).filter(|v| !v.is_empty()) {
            self.magick.binary = PathBuf::from(binary);
        }
        if let Some(db) = lookup(DB_ENV).filter(|v| !v.is_empty()) {
            self.db_path = PathBuf::from(db);
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("photocat")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}
