//! Embedded content and background loading from the CMS.

use eframe::egui;
use portfolio_canvas::SiteContent;
use portfolio_canvas::cms::{CmsClient, CmsConfig};
use rust_embed::RustEmbed;
use std::sync::mpsc;
use std::thread;
use thiserror::Error;

/// Embeds all assets from the assets/ directory into the binary.
/// In debug mode, assets are loaded from the filesystem for faster iteration.
/// In release mode, assets are compressed and embedded in the binary.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Errors that can occur when loading the embedded content.
#[derive(Error, Debug)]
pub enum ContentLoadError {
    #[error("content.ron not found in embedded assets")]
    ContentNotFound,
    #[error("invalid UTF-8 in content.ron: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to parse content.ron: {0}")]
    ParseError(#[from] ron::de::SpannedError),
}

/// Loads the site content snapshot from embedded assets.
pub fn load_content() -> Result<SiteContent, ContentLoadError> {
    let file = Assets::get("content.ron").ok_or(ContentLoadError::ContentNotFound)?;
    let ron_string = std::str::from_utf8(&file.data)?;
    Ok(ron::from_str(ron_string)?)
}

/// Content fetched live from the CMS, delivered to the UI thread.
pub struct LiveContent {
    rx: mpsc::Receiver<SiteContent>,
}

impl LiveContent {
    /// Fetches all content on a background thread and repaints when done.
    ///
    /// Returns `None` if a runtime could not be created.
    pub fn spawn(ctx: egui::Context, config: CmsConfig) -> Option<Self> {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(err) => {
                log::error!("Failed to start runtime for content fetch: {err}");
                return None;
            }
        };

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let client = CmsClient::new(config);
            let content = runtime.block_on(client.fetch_site_content());
            log::info!(
                "Fetched {} projects, {} experience, {} education, {} testimonials",
                content.projects.len(),
                content.experience.len(),
                content.education.len(),
                content.testimonials.len()
            );
            let _ = tx.send(content);
            ctx.request_repaint();
        });

        Some(Self { rx })
    }

    /// Returns the fetched content once it has arrived.
    pub fn poll(&mut self) -> Option<SiteContent> {
        match self.rx.try_recv() {
            Ok(content) => Some(content),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                log::warn!("Content fetch thread exited without a result");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_parses() {
        let content = load_content().unwrap();
        assert!(!content.sections.is_empty());
    }
}
