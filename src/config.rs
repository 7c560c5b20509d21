//! Application configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top of it, so
//! a config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! cdn_host = "ucarecdn.com"   # Host used in generated smart-crop URLs
//! # catalog = "sizes.json"    # Platform catalog; omit to use the bundled one
//!
//! [default_theme]             # Colors for platforms missing from [themes]
//! color = "#000000"
//! hover_color = "#333333"
//!
//! [themes.Facebook]           # One table per platform, exact name match
//! color = "#4267B2"
//! hover_color = "#395c9a"
//! ```
//!
//! ## Partial Configuration
//!
//! Theme tables merge per platform, so adding a platform or recoloring one
//! keeps the rest of the stock table:
//!
//! ```toml
//! [themes.MySpace]
//! color = "#003399"
//! hover_color = "#002266"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::cdn::DEFAULT_CDN_HOST;
use crate::types::ColorTheme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Host substituted into the smart-crop URL template.
    pub cdn_host: String,
    /// Catalog JSON path. Relative paths resolve against the config directory.
    pub catalog: Option<String>,
    /// Theme for platforms without an entry in `themes`.
    pub default_theme: ColorTheme,
    /// Platform name → button colors. Lookup is exact and case-sensitive.
    pub themes: BTreeMap<String, ColorTheme>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cdn_host: DEFAULT_CDN_HOST.to_string(),
            catalog: None,
            default_theme: ColorTheme::neutral(),
            themes: default_themes(),
        }
    }
}

impl AppConfig {
    /// Validate host and colors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let host = &self.cdn_host;
        let bad_port = match host.rsplit_once(':') {
            Some((name, port)) => {
                name.is_empty()
                    || name.contains(':')
                    || port.is_empty()
                    || !port.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        };
        if host.is_empty()
            || host.contains('/')
            || host.chars().any(char::is_whitespace)
            || bad_port
        {
            return Err(ConfigError::Validation(format!(
                "cdn_host must be a bare host name, got {host:?}"
            )));
        }
        check_theme("default_theme", &self.default_theme)?;
        for (name, theme) in &self.themes {
            check_theme(&format!("themes.{name}"), theme)?;
        }
        Ok(())
    }

    /// Catalog file to load, if the config names one.
    pub fn catalog_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.catalog.as_ref().map(|p| config_dir.join(p))
    }
}

fn check_theme(key: &str, theme: &ColorTheme) -> Result<(), ConfigError> {
    for (field, value) in [("color", &theme.color), ("hover_color", &theme.hover_color)] {
        if !is_hex_color(value) {
            return Err(ConfigError::Validation(format!(
                "{key}.{field} must be a #rgb or #rrggbb color, got {value:?}"
            )));
        }
    }
    Ok(())
}

/// `#rgb` or `#rrggbb`, case-insensitive.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Stock platform color table.
pub fn default_themes() -> BTreeMap<String, ColorTheme> {
    [
        ("Facebook", "#4267B2", "#395c9a"),
        ("Facebook Ads", "#4267B2", "#395c9a"),
        ("Instagram", "#E4405F", "#c83a54"),
        ("Twitter", "#1DA1F2", "#1a8fd9"),
        ("YouTube", "#FF0000", "#cc0000"),
        ("TikTok", "#69C9D0", "#55a8b1"),
        ("LinkedIn", "#0077B5", "#00679c"),
        ("Pinterest", "#E60023", "#cc001f"),
        ("Snapchat", "#FFFC00", "#d6ce00"),
        ("Open Graph", "#000000", "#333333"),
        ("Email", "#D44638", "#b0352a"),
        ("Google Banner Ads", "#4285F4", "#357ae8"),
    ]
    .into_iter()
    .map(|(name, color, hover)| (name.to_string(), ColorTheme::new(color, hover)))
    .collect()
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    tracing::debug!(path = %config_path.display(), "read config file");
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of stock defaults.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# social-crop Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Each table only needs the keys it wants to override.
# Unknown keys will cause an error.

# Host of the image CDN. Generated links look like
#   https://<cdn_host>/<asset id>/-/scale_crop/<width>x<height>/smart/
cdn_host = "ucarecdn.com"

# Platform catalog (JSON). Relative paths resolve against this directory.
# Omit to use the catalog bundled with social-crop.
# catalog = "sizes.json"

# ---------------------------------------------------------------------------
# Colors for platforms without an entry under [themes]
# ---------------------------------------------------------------------------
[default_theme]
color = "#000000"
hover_color = "#333333"

# ---------------------------------------------------------------------------
# Per-platform colors. Table names must match catalog platform names exactly.
# ---------------------------------------------------------------------------
[themes.Email]
color = "#D44638"
hover_color = "#b0352a"

[themes.Facebook]
color = "#4267B2"
hover_color = "#395c9a"

[themes."Facebook Ads"]
color = "#4267B2"
hover_color = "#395c9a"

[themes."Google Banner Ads"]
color = "#4285F4"
hover_color = "#357ae8"

[themes.Instagram]
color = "#E4405F"
hover_color = "#c83a54"

[themes.LinkedIn]
color = "#0077B5"
hover_color = "#00679c"

[themes."Open Graph"]
color = "#000000"
hover_color = "#333333"

[themes.Pinterest]
color = "#E60023"
hover_color = "#cc001f"

[themes.Snapchat]
color = "#FFFC00"
hover_color = "#d6ce00"

[themes.TikTok]
color = "#69C9D0"
hover_color = "#55a8b1"

[themes.Twitter]
color = "#1DA1F2"
hover_color = "#1a8fd9"

[themes.YouTube]
color = "#FF0000"
hover_color = "#cc0000"
"##
}
