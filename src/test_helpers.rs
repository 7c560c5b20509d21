//! Shared test utilities for the social-crop test suite.
//!
//! Builders for catalog entries plus a small fixed catalog that mixes themed
//! platforms (Facebook, Instagram) with one the theme table doesn't know
//! (MySpace).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = sample_catalog();
//! let session = sample_session();
//! assert_eq!(labels(session.render_configs())[0], "Facebook - Profile Picture");
//! ```

use crate::catalog::build_render_configs;
use crate::cdn::DEFAULT_CDN_HOST;
use crate::config::default_themes;
use crate::session::Session;
use crate::types::{ColorTheme, PlatformEntry, RenderConfig, SizeSpec};
use std::io;
use std::sync::{Arc, Mutex};

// =========================================================================
// Builders
// =========================================================================

/// A size with no optional metadata.
pub fn size(name: &str, width: u32, height: u32) -> SizeSpec {
    SizeSpec {
        name: name.to_string(),
        width,
        height,
        description: None,
        simple: None,
        position_src: None,
    }
}

pub fn platform(name: &str, sizes: Vec<SizeSpec>) -> PlatformEntry {
    PlatformEntry {
        platform_name: name.to_string(),
        description: None,
        logo_src: None,
        sizes,
    }
}

// =========================================================================
// Fixtures
// =========================================================================

/// Three platforms, five sizes. MySpace has no theme entry.
pub fn sample_catalog() -> Vec<PlatformEntry> {
    let mut story = size("Story", 1080, 1920);
    story.description = Some("9:16".to_string());
    vec![
        platform(
            "Facebook",
            vec![size("Profile Picture", 170, 170), size("Cover Photo", 820, 312)],
        ),
        platform("Instagram", vec![size("Square Post", 1080, 1080), story]),
        platform("MySpace", vec![size("Banner", 800, 200)]),
    ]
}

pub fn sample_configs() -> Vec<RenderConfig> {
    build_render_configs(&sample_catalog(), &default_themes(), &ColorTheme::neutral()).unwrap()
}

/// An empty session over [`sample_configs`] on the default host.
pub fn sample_session() -> Session {
    Session::new(DEFAULT_CDN_HOST, sample_configs())
}

// =========================================================================
// Extractors
// =========================================================================

pub fn labels(configs: &[RenderConfig]) -> Vec<&str> {
    configs.iter().map(|c| c.label.as_str()).collect()
}

// =========================================================================
// Log capture
// =========================================================================

/// In-memory sink for a test subscriber.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a debug-level subscriber and return everything it logged.
pub fn capture_debug_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}
