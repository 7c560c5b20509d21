//! Platform catalog loading and render config flattening.
//!
//! The catalog is a JSON array of platforms, each with the list of sizes it
//! needs. [`build_render_configs`] flattens it into one [`RenderConfig`] per
//! (platform, size) pair, attaching the platform's color theme.
//!
//! Order is significant: platforms keep catalog order, sizes keep their order
//! within a platform. Everything downstream (links, downloads, CLI output)
//! follows this order.
//!
//! A default catalog is compiled into the binary from `assets/sizes.json`.

use crate::types::{ColorTheme, PlatformEntry, RenderConfig, SizeSpec};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Catalog shipped with the crate.
pub const BUNDLED_CATALOG: &str = include_str!("../assets/sizes.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid catalog entry \"{platform}\" / \"{size}\": {reason}")]
    InvalidCatalogEntry {
        platform: String,
        size: String,
        reason: &'static str,
    },
}

/// Parse a catalog from JSON text.
///
/// Rejects platforms with an empty name. Dimensions are checked later by
/// [`build_render_configs`].
pub fn parse_catalog(json: &str) -> Result<Vec<PlatformEntry>, CatalogError> {
    let entries: Vec<PlatformEntry> = serde_json::from_str(json)?;
    if let Some(entry) = entries.iter().find(|e| e.platform_name.trim().is_empty()) {
        return Err(CatalogError::InvalidCatalogEntry {
            platform: entry.platform_name.clone(),
            size: String::new(),
            reason: "platform name must not be empty",
        });
    }
    Ok(entries)
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<Vec<PlatformEntry>, CatalogError> {
    let content = fs::read_to_string(path)?;
    let entries = parse_catalog(&content)?;
    tracing::debug!(path = %path.display(), platforms = entries.len(), "loaded catalog");
    Ok(entries)
}

/// The compiled-in catalog.
pub fn bundled_catalog() -> Result<Vec<PlatformEntry>, CatalogError> {
    let entries = parse_catalog(BUNDLED_CATALOG)?;
    tracing::debug!(platforms = entries.len(), "loaded bundled catalog");
    Ok(entries)
}

/// Look up a platform's theme by exact name, falling back to `default_theme`.
pub fn theme_for<'a>(
    themes: &'a BTreeMap<String, ColorTheme>,
    default_theme: &'a ColorTheme,
    platform_name: &str,
) -> &'a ColorTheme {
    themes.get(platform_name).unwrap_or(default_theme)
}

/// Aspect label shown next to a size: its description, or `"<w>:<h>"`.
pub fn aspect_ratio_label(size: &SizeSpec) -> String {
    match size.description.as_deref() {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => format!("{}:{}", size.width, size.height),
    }
}

/// Flatten the catalog into render configs, in catalog order.
///
/// Fails with [`CatalogError::InvalidCatalogEntry`] on a zero width or height.
pub fn build_render_configs(
    catalog: &[PlatformEntry],
    themes: &BTreeMap<String, ColorTheme>,
    default_theme: &ColorTheme,
) -> Result<Vec<RenderConfig>, CatalogError> {
    let mut configs = Vec::with_capacity(catalog.iter().map(|e| e.sizes.len()).sum());

    for entry in catalog {
        let theme = theme_for(themes, default_theme, &entry.platform_name);
        for size in &entry.sizes {
            if size.width == 0 || size.height == 0 {
                return Err(CatalogError::InvalidCatalogEntry {
                    platform: entry.platform_name.clone(),
                    size: size.name.clone(),
                    reason: "width and height must be positive",
                });
            }
            configs.push(RenderConfig {
                label: format!("{} - {}", entry.platform_name, size.name),
                aspect_ratio_label: aspect_ratio_label(size),
                width: size.width,
                height: size.height,
                color: theme.color.clone(),
                hover_color: theme.hover_color.clone(),
            });
        }
    }

    Ok(configs)
}
