//! Upload session state.
//!
//! A [`Session`] holds at most one uploaded asset and derives every link from
//! it on demand. The render configs are computed once from the catalog and
//! shared read-only (`Arc<[RenderConfig]>`), so many sessions can sit on top
//! of the same catalog.
//!
//! ## States
//!
//! ```text
//! Empty ──record_upload(ok)──▶ Ready ──record_upload(ok)──▶ Ready (asset replaced)
//! ```
//!
//! A failed `record_upload` changes neither state nor asset; it only records
//! the error for [`last_error`](Session::last_error).
//!
//! There is no terminal state and no explicit clear: a new successful upload
//! replaces the asset.
//!
//! [`processed_images`](Session::processed_images) is recomputed on every
//! call, so it always reflects the latest asset. Uploading itself happens
//! elsewhere; the session only receives the resulting CDN URL.

use crate::catalog::{CatalogError, build_render_configs};
use crate::cdn::scale_crop_url;
use crate::config::AppConfig;
use crate::naming::{download_filename, extract_asset_id};
use crate::types::{DownloadRequest, PlatformEntry, ProcessedImage, RenderConfig, UploadedAsset};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Display name given to every upload; the upload URL carries no filename.
pub const DEFAULT_DISPLAY_NAME: &str = "uploaded_image";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("failed to get a valid asset identifier from the upload URL")]
    MissingIdentifier { url: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Empty,
    Ready(UploadedAsset),
}

#[derive(Debug, Clone)]
pub struct Session {
    cdn_host: String,
    configs: Arc<[RenderConfig]>,
    state: SessionState,
    error: Option<UploadError>,
    is_loading: bool,
    upload_progress: u8,
}

impl Session {
    pub fn new(cdn_host: impl Into<String>, configs: impl Into<Arc<[RenderConfig]>>) -> Self {
        Self {
            cdn_host: cdn_host.into(),
            configs: configs.into(),
            state: SessionState::Empty,
            error: None,
            is_loading: false,
            upload_progress: 0,
        }
    }

    /// Build render configs from `catalog` with the config's themes and host.
    pub fn from_config(
        config: &AppConfig,
        catalog: &[PlatformEntry],
    ) -> Result<Self, CatalogError> {
        let configs = build_render_configs(catalog, &config.themes, &config.default_theme)?;
        tracing::debug!(configs = configs.len(), host = %config.cdn_host, "session ready");
        Ok(Self::new(config.cdn_host.clone(), configs))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn render_configs(&self) -> &[RenderConfig] {
        &self.configs
    }

    pub fn cdn_host(&self) -> &str {
        &self.cdn_host
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Upload progress in percent (0..=100).
    pub fn upload_progress(&self) -> u8 {
        self.upload_progress
    }

    /// Error from the most recent failed [`record_upload`](Self::record_upload).
    pub fn last_error(&self) -> Option<&UploadError> {
        self.error.as_ref()
    }

    /// Mark an upload as in flight. Clears any previous error.
    pub fn begin_upload(&mut self) {
        self.is_loading = true;
        self.upload_progress = 0;
        self.error = None;
    }

    pub fn set_upload_progress(&mut self, percent: u8) {
        self.upload_progress = percent.min(100);
    }

    /// Take the CDN URL returned by the upload widget and make it the current asset.
    ///
    /// On failure the current asset is left untouched and the error is also
    /// kept for [`last_error`](Self::last_error).
    pub fn record_upload(&mut self, source_url: &str) -> Result<(), UploadError> {
        self.is_loading = false;

        let Some(asset_id) = extract_asset_id(source_url) else {
            let err = UploadError::MissingIdentifier {
                url: source_url.to_string(),
            };
            tracing::debug!(url = source_url, "upload rejected");
            self.error = Some(err.clone());
            return Err(err);
        };

        tracing::info!(asset_id, "upload recorded");
        self.state = SessionState::Ready(UploadedAsset {
            asset_id: asset_id.to_string(),
            source_url: source_url.to_string(),
            is_ready: true,
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
        });
        self.error = None;
        self.upload_progress = 100;
        Ok(())
    }

    pub fn current_asset(&self) -> Option<&UploadedAsset> {
        match &self.state {
            SessionState::Empty => None,
            SessionState::Ready(asset) => Some(asset),
        }
    }

    /// One processed image per render config, in catalog order. Empty without an asset.
    pub fn processed_images(&self) -> Vec<ProcessedImage> {
        let Some(asset) = self.current_asset() else {
            return Vec::new();
        };
        self.configs
            .iter()
            .map(|config| ProcessedImage {
                label: config.label.clone(),
                url: scale_crop_url(&self.cdn_host, &asset.asset_id, config.width, config.height),
                aspect_ratio_label: config.aspect_ratio_label.clone(),
                color: config.color.clone(),
                hover_color: config.hover_color.clone(),
            })
            .collect()
    }

    /// Smart-crop URL of the current asset at `config`'s dimensions.
    pub fn build_download_url(&self, config: &RenderConfig) -> Option<String> {
        let asset = self.current_asset()?;
        Some(scale_crop_url(
            &self.cdn_host,
            &asset.asset_id,
            config.width,
            config.height,
        ))
    }

    /// "Download all": one request per processed image, in catalog order.
    pub fn download_requests(&self) -> Vec<DownloadRequest> {
        self.processed_images().iter().map(download_request).collect()
    }
}

/// File save for a single processed image.
pub fn download_request(image: &ProcessedImage) -> DownloadRequest {
    DownloadRequest {
        url: image.url.clone(),
        filename: download_filename(&image.label),
    }
}

/// A [`Session`] behind a mutex for hosts that touch it from several threads.
///
/// Each method takes the lock once, so an upload and the links derived from
/// it are never observed half-updated.
#[derive(Debug)]
pub struct SharedSession {
    inner: Mutex<Session>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record_upload(&self, source_url: &str) -> Result<(), UploadError> {
        self.lock().record_upload(source_url)
    }

    pub fn current_asset(&self) -> Option<UploadedAsset> {
        self.lock().current_asset().cloned()
    }

    pub fn processed_images(&self) -> Vec<ProcessedImage> {
        self.lock().processed_images()
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    // =========================================================================
    // record_upload
    // =========================================================================

    #[test]
    fn new_session_is_empty() {
        let session = sample_session();
        assert_eq!(session.state(), &SessionState::Empty);
        assert!(session.current_asset().is_none());
        assert!(session.processed_images().is_empty());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn record_upload_extracts_asset_id() {
        let mut session = sample_session();
        session
            .record_upload("https://ucarecdn.com/abc-123-uuid/")
            .unwrap();

        let asset = session.current_asset().unwrap();
        assert_eq!(asset.asset_id, "abc-123-uuid");
        assert_eq!(asset.source_url, "https://ucarecdn.com/abc-123-uuid/");
        assert!(asset.is_ready);
        assert_eq!(asset.display_name, DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn record_upload_empty_url_fails_without_state_change() {
        let mut session = sample_session();
        let err = session.record_upload("").unwrap_err();
        assert_eq!(err, UploadError::MissingIdentifier { url: String::new() });
        assert_eq!(session.state(), &SessionState::Empty);
        assert_eq!(session.last_error(), Some(&err));
    }

    #[test]
    fn failed_upload_keeps_prior_asset() {
        let mut session = sample_session();
        session.record_upload("https://ucarecdn.com/first/").unwrap();
        assert!(session.record_upload("///").is_err());

        assert_eq!(session.current_asset().unwrap().asset_id, "first");
        assert!(session.last_error().is_some());
    }

    #[test]
    fn successful_upload_clears_error() {
        let mut session = sample_session();
        session.record_upload("").unwrap_err();
        session.record_upload("https://ucarecdn.com/abc/").unwrap();
        assert!(session.last_error().is_none());
    }

    #[test]
    fn second_upload_replaces_first() {
        let mut session = sample_session();
        session.record_upload("https://ucarecdn.com/first/").unwrap();
        session.record_upload("https://ucarecdn.com/second/").unwrap();

        assert_eq!(session.current_asset().unwrap().asset_id, "second");
        for image in session.processed_images() {
            assert!(image.url.contains("/second/"));
            assert!(!image.url.contains("first"));
        }
    }

    #[test]
    fn error_message_is_user_facing() {
        let err = UploadError::MissingIdentifier { url: "/".into() };
        assert_eq!(
            err.to_string(),
            "failed to get a valid asset identifier from the upload URL"
        );
    }

    // =========================================================================
    // Loading flag and progress
    // =========================================================================

    #[test]
    fn begin_upload_sets_loading_and_clears_error() {
        let mut session = sample_session();
        session.record_upload("").unwrap_err();
        session.begin_upload();
        assert!(session.is_loading());
        assert_eq!(session.upload_progress(), 0);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn record_upload_ends_loading() {
        let mut session = sample_session();
        session.begin_upload();
        session.set_upload_progress(40);
        session.record_upload("https://ucarecdn.com/abc/").unwrap();
        assert!(!session.is_loading());
        assert_eq!(session.upload_progress(), 100);

        session.begin_upload();
        session.record_upload("").unwrap_err();
        assert!(!session.is_loading());
    }

    #[test]
    fn progress_is_clamped() {
        let mut session = sample_session();
        session.set_upload_progress(250);
        assert_eq!(session.upload_progress(), 100);
    }

    // =========================================================================
    // Derived links
    // =========================================================================

    #[test]
    fn processed_images_follow_catalog_order() {
        let mut session = sample_session();
        session.record_upload("https://ucarecdn.com/abc-123/").unwrap();

        let images = session.processed_images();
        assert_eq!(images.len(), session.render_configs().len());
        assert_eq!(images[0].label, "Facebook - Profile Picture");
        assert_eq!(
            images[0].url,
            "https://ucarecdn.com/abc-123/-/scale_crop/170x170/smart/"
        );
        assert_eq!(images[0].color, "#4267B2");
        assert_eq!(images[2].label, "Instagram - Square Post");
        assert_eq!(
            images[2].url,
            "https://ucarecdn.com/abc-123/-/scale_crop/1080x1080/smart/"
        );
        assert_eq!(images[3].aspect_ratio_label, "9:16");
        assert_eq!(images[4].color, "#000000");
    }

    #[test]
    fn every_url_contains_asset_id_once() {
        let mut session = sample_session();
        session.record_upload("https://ucarecdn.com/abc-123/").unwrap();
        for image in session.processed_images() {
            assert_eq!(image.url.matches("abc-123").count(), 1, "{}", image.url);
        }
    }

    #[test]
    fn build_download_url_matches_processed_images() {
        let mut session = sample_session();
        let config = session.render_configs()[1].clone();
        assert_eq!(session.build_download_url(&config), None);

        session.record_upload("https://ucarecdn.com/abc/").unwrap();
        assert_eq!(
            session.build_download_url(&config).as_deref(),
            Some("https://ucarecdn.com/abc/-/scale_crop/820x312/smart/")
        );
        assert_eq!(
            session.build_download_url(&config),
            Some(session.processed_images()[1].url.clone())
        );
    }

    #[test]
    fn custom_host_is_used() {
        let mut session = Session::new("cdn.example.org", sample_configs());
        session.record_upload("https://cdn.example.org/xyz").unwrap();
        assert!(
            session.processed_images()[0]
                .url
                .starts_with("https://cdn.example.org/xyz/")
        );
    }

    #[test]
    fn download_requests_empty_without_asset() {
        assert!(sample_session().download_requests().is_empty());
    }

    #[test]
    fn download_requests_in_catalog_order() {
        let mut session = sample_session();
        session.record_upload("https://ucarecdn.com/abc/").unwrap();

        let requests = session.download_requests();
        assert_eq!(requests.len(), 5);
        assert_eq!(
            requests[0].filename,
            "smart-crop-facebook---profile-picture.jpg"
        );
        assert_eq!(
            requests[0].url,
            "https://ucarecdn.com/abc/-/scale_crop/170x170/smart/"
        );
        assert_eq!(requests[4].filename, "smart-crop-myspace---banner.jpg");
    }

    #[test]
    fn from_config_uses_config_host_and_themes() {
        let config = AppConfig {
            cdn_host: "cdn.example.org".into(),
            ..AppConfig::default()
        };
        let session = Session::from_config(&config, &sample_catalog()).unwrap();
        assert_eq!(session.cdn_host(), "cdn.example.org");
        assert_eq!(session.render_configs()[2].color, "#E4405F");
    }

    #[test]
    fn from_config_rejects_invalid_catalog() {
        let catalog = vec![platform("Facebook", vec![size("Broken", 0, 0)])];
        let result = Session::from_config(&AppConfig::default(), &catalog);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidCatalogEntry { .. })
        ));
    }

    // =========================================================================
    // SharedSession
    // =========================================================================

    #[test]
    fn shared_session_never_mixes_assets() {
        let shared = SharedSession::new(sample_session());

        std::thread::scope(|scope| {
            for id in ["alpha", "bravo", "charlie"] {
                let shared = &shared;
                scope.spawn(move || {
                    for _ in 0..50 {
                        shared
                            .record_upload(&format!("https://ucarecdn.com/{id}/"))
                            .unwrap();
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..50 {
                    let images = shared.processed_images();
                    if let Some(first) = images.first() {
                        let id = first.url.split('/').nth(3).unwrap().to_string();
                        assert!(images.iter().all(|i| i.url.contains(&format!("/{id}/"))));
                    }
                }
            });
        });

        let asset = shared.current_asset().unwrap();
        assert!(["alpha", "bravo", "charlie"].contains(&asset.asset_id.as_str()));
    }

    #[test]
    fn shared_session_with_gives_mutable_access() {
        let shared = SharedSession::new(sample_session());
        shared.with(|s| s.begin_upload());
        assert!(shared.with(|s| s.is_loading()));
    }
}
