//! Identifier and filename derivation.
//!
//! Two small string conventions live here so the session and the CLI agree on
//! them:
//!
//! - The CDN asset identifier is the last non-empty `/` segment of the URL
//!   handed back by the upload widget.
//! - Downloaded files are named `smart-crop-<label>.jpg`, where the label is
//!   lowercased and every whitespace character becomes a dash.
//!
//! ## Examples
//!
//! - `https://ucarecdn.com/abc-123-uuid/` → `abc-123-uuid`
//! - `Facebook - Cover Photo` → `smart-crop-facebook---cover-photo.jpg`

/// Extract the asset identifier from an upload URL.
///
/// Splits on `/`, ignores empty segments and takes the last one. Returns
/// `None` when no non-empty segment exists (`""`, `"/"`, `"///"`).
pub fn extract_asset_id(url: &str) -> Option<&str> {
    url.split('/').filter(|segment| !segment.is_empty()).next_back()
}

/// Filename the host should save a processed image under.
pub fn download_filename(label: &str) -> String {
    let slug: String = label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    format!("smart-crop-{slug}.jpg")
}
