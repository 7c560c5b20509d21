//! # social-crop
//!
//! Pre-sized social media images from a single upload. Given the CDN URL of
//! an uploaded image, social-crop produces one smart-crop link per platform
//! size in its catalog. The CDN does the cropping server-side; this crate only
//! builds URLs and never issues a request.
//!
//! # Flow
//!
//! ```text
//! sizes.json + config.toml  →  RenderConfig list      (once, at startup)
//! upload URL                →  UploadedAsset          (Session::record_upload)
//! asset × RenderConfig      →  ProcessedImage / URL   (Session::processed_images)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Platform catalog parsing and flattening into render configs |
//! | [`session`] | Current upload, loading/error state and derived links |
//! | [`cdn`] | The `scale_crop/<w>x<h>/smart/` URL template |
//! | [`naming`] | Asset id extraction and download filenames |
//! | [`config`] | `config.toml` loading: CDN host, catalog path, color themes |
//! | [`types`] | Shared serializable data model |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Derived On Read
//!
//! Links are not cached. [`session::Session::processed_images`] recomputes
//! them from the current asset on every call, which keeps them consistent with
//! the latest upload without any change notification.
//!
//! ## Catalog As Data
//!
//! Platforms and sizes live in JSON, colors in TOML. The binary bundles a
//! default catalog, and either file can be replaced without rebuilding.

pub mod catalog;
pub mod cdn;
pub mod config;
pub mod naming;
pub mod output;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
