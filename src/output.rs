//! CLI output formatting.
//!
//! Every entity leads with its 1-based position in catalog order and its
//! label; details follow on indented context lines.
//!
//! # Output Format
//!
//! ## list
//!
//! ```text
//! 001 Facebook - Profile Picture
//!     Size: 170x170 (1:1)
//!     Colors: #4267B2 / #395c9a
//!
//! 37 render configs
//! ```
//!
//! ## links
//!
//! ```text
//! Asset abc-123
//!     Source: https://ucarecdn.com/abc-123/
//! 001 Facebook - Profile Picture (1:1)
//!     https://ucarecdn.com/abc-123/-/scale_crop/170x170/smart/
//! ```
//!
//! ## downloads
//!
//! ```text
//! 001 smart-crop-facebook---profile-picture.jpg
//!     https://ucarecdn.com/abc-123/-/scale_crop/170x170/smart/
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::types::{DownloadRequest, ProcessedImage, RenderConfig, UploadedAsset};
use std::error::Error;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// list
// ============================================================================

pub fn format_catalog_output(configs: &[RenderConfig]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, config) in configs.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), config.label));
        lines.push(format!(
            "{}Size: {}x{} ({})",
            indent(1),
            config.width,
            config.height,
            config.aspect_ratio_label
        ));
        lines.push(format!(
            "{}Colors: {} / {}",
            indent(1),
            config.color,
            config.hover_color
        ));
    }
    lines.push(String::new());
    lines.push(plural(configs.len(), "render config"));
    lines
}

pub fn print_catalog_output(configs: &[RenderConfig]) {
    for line in format_catalog_output(configs) {
        println!("{}", line);
    }
}

// ============================================================================
// links
// ============================================================================

pub fn format_links_output(asset: &UploadedAsset, images: &[ProcessedImage]) -> Vec<String> {
    let mut lines = vec![
        format!("Asset {}", asset.asset_id),
        format!("{}Source: {}", indent(1), asset.source_url),
    ];
    for (i, image) in images.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            image.label,
            image.aspect_ratio_label
        ));
        lines.push(format!("{}{}", indent(1), image.url));
    }
    lines
}

pub fn print_links_output(asset: &UploadedAsset, images: &[ProcessedImage]) {
    for line in format_links_output(asset, images) {
        println!("{}", line);
    }
}

// ============================================================================
// downloads
// ============================================================================

pub fn format_download_plan(requests: &[DownloadRequest]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, request) in requests.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), request.filename));
        lines.push(format!("{}{}", indent(1), request.url));
    }
    lines.push(String::new());
    lines.push(plural(requests.len(), "download"));
    lines
}

pub fn print_download_plan(requests: &[DownloadRequest]) {
    for line in format_download_plan(requests) {
        println!("{}", line);
    }
}

// ============================================================================
// Errors
// ============================================================================

/// The line shown on stderr when a command fails. Uses `Display`, not `Debug`.
pub fn format_error(err: &dyn Error) -> String {
    format!("Error: {err}")
}
