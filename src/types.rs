//! Shared data model for the catalog, the session and the CLI.
//!
//! Catalog types deserialize from the JSON catalog file (camelCase keys, the
//! platform name is stored under `app`). Derived types serialize with the same
//! camelCase convention so `--json` output can be handed straight to a
//! presentation layer.

use serde::{Deserialize, Serialize};

/// One target output dimension for a platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeSpec {
    /// Display name of the size, e.g. `"Profile Picture"`.
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Human-readable aspect label (e.g. `"16:9"`). Falls back to `"<width>:<height>"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Marks the size as one of the platform's primary formats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple: Option<bool>,
    /// Illustration of where the size is placed on the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_src: Option<String>,
}

/// A platform and the sizes it needs, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformEntry {
    /// Display name, also the key into the color theme table.
    #[serde(rename = "app")]
    pub platform_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_src: Option<String>,
    /// May be empty, in which case the platform contributes no render configs.
    #[serde(default)]
    pub sizes: Vec<SizeSpec>,
}

/// Button colors for a platform (hex strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorTheme {
    pub color: String,
    pub hover_color: String,
}

impl ColorTheme {
    pub fn new(color: impl Into<String>, hover_color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            hover_color: hover_color.into(),
        }
    }

    /// Theme used for platforms missing from the theme table.
    pub fn neutral() -> Self {
        Self::new("#000000", "#333333")
    }
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self::neutral()
    }
}

/// One (platform, size) pairing with its display metadata.
///
/// Independent of any uploaded asset; computed once from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    /// `"<platform> - <size>"`
    pub label: String,
    pub aspect_ratio_label: String,
    pub width: u32,
    pub height: u32,
    pub color: String,
    pub hover_color: String,
}

/// The asset currently held by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    /// CDN identifier (last path segment of the upload URL). Never empty.
    pub asset_id: String,
    pub source_url: String,
    pub is_ready: bool,
    pub display_name: String,
}

/// A render config bound to the current asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedImage {
    pub label: String,
    pub url: String,
    pub aspect_ratio_label: String,
    pub color: String,
    pub hover_color: String,
}

/// A file save the host environment should perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
}
