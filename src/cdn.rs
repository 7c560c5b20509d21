//! Transformation URLs for the image CDN.
//!
//! The CDN resizes and crops on the fly based on path operations appended to
//! the asset identifier. Only one operation is used here:
//!
//! ```text
//! https://<host>/<asset_id>/-/scale_crop/<width>x<height>/smart/
//! ```
//!
//! The `smart` crop mode asks the CDN for content-aware cropping. The layout
//! must match the CDN's path grammar exactly, including the trailing slash.

/// Host used when the config doesn't override it.
pub const DEFAULT_CDN_HOST: &str = "ucarecdn.com";

/// Crop mode passed to `scale_crop`. Not configurable.
pub const CROP_MODE: &str = "smart";

/// Build the smart-crop URL for an asset at the given dimensions.
///
/// ```
/// # use social_crop::cdn::scale_crop_url;
/// assert_eq!(
///     scale_crop_url("ucarecdn.com", "abc-123", 1080, 1080),
///     "https://ucarecdn.com/abc-123/-/scale_crop/1080x1080/smart/"
/// );
/// ```
pub fn scale_crop_url(host: &str, asset_id: &str, width: u32, height: u32) -> String {
    format!("https://{host}/{asset_id}/-/scale_crop/{width}x{height}/{CROP_MODE}/")
}
