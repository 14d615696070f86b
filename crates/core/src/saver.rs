//! Metadata savers and the registry that fans update events out to them.

use crate::config::SaverConfig;
use crate::eligibility::is_eligible;
use crate::error::SaveError;
use crate::models::Item;
use crate::refresh::RefreshTracker;
use crate::renderers::{CommonNodes, MediaInfoNodes, StandardCommonNodes, StandardMediaInfo};
use crate::save_path::resolve_save_path;
use crate::update::ItemUpdateType;
use crate::writer::{AtomicXmlWriter, MetadataWriter};
use crate::xml::{assemble_movie_xml, DESCRIPTION_ELEMENT, RATING_ELEMENT};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Elements of `movie.xml` this saver may overwrite in an existing file.
pub const MOVIE_XML_ELEMENTS: &[&str] = &[RATING_ELEMENT, DESCRIPTION_ELEMENT];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Skipped,
}

#[async_trait::async_trait]
pub trait MetadataSaver: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_enabled_for(&self, item: &Item, update: ItemUpdateType) -> bool;

    fn save_path(&self, item: &Item) -> Result<PathBuf, SaveError>;

    /// Writes the item's metadata unconditionally and returns the path written.
    async fn save(&self, item: &Item, cancel: &CancellationToken) -> Result<PathBuf, SaveError>;

    /// Saves only if this saver is enabled for `update`. Skipping is not an error.
    async fn save_for_update(
        &self,
        item: &Item,
        update: ItemUpdateType,
        cancel: &CancellationToken,
    ) -> Result<SaveOutcome, SaveError> {
        if !self.is_enabled_for(item, update) {
            debug!("{} skipped {:?} for {:?}", self.name(), update, item.path);
            return Ok(SaveOutcome::Skipped);
        }
        self.save(item, cancel).await.map(SaveOutcome::Saved)
    }
}

/// Saves `movie.xml` for movies, music videos and downloaded trailers.
pub struct MovieXmlSaver {
    config: SaverConfig,
    writer: Arc<dyn MetadataWriter>,
    tracker: Arc<dyn RefreshTracker>,
    common: Arc<dyn CommonNodes>,
    media_info: Arc<dyn MediaInfoNodes>,
}

impl MovieXmlSaver {
    pub fn new(config: SaverConfig, tracker: Arc<dyn RefreshTracker>) -> Self {
        Self {
            config,
            writer: Arc::new(AtomicXmlWriter::default()),
            tracker,
            common: Arc::new(StandardCommonNodes),
            media_info: Arc::new(StandardMediaInfo),
        }
    }

    pub fn with_writer(mut self, writer: Arc<dyn MetadataWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn with_renderers(
        mut self,
        common: Arc<dyn CommonNodes>,
        media_info: Arc<dyn MediaInfoNodes>,
    ) -> Self {
        self.common = common;
        self.media_info = media_info;
        self
    }

    pub fn render(&self, item: &Item) -> String {
        assemble_movie_xml(item, self.common.as_ref(), self.media_info.as_ref())
    }
}

#[async_trait::async_trait]
impl MetadataSaver for MovieXmlSaver {
    fn name(&self) -> &'static str {
        "movie.xml"
    }

    fn is_enabled_for(&self, item: &Item, update: ItemUpdateType) -> bool {
        is_eligible(item, update, &self.config)
    }

    fn save_path(&self, item: &Item) -> Result<PathBuf, SaveError> {
        resolve_save_path(item)
    }

    async fn save(&self, item: &Item, cancel: &CancellationToken) -> Result<PathBuf, SaveError> {
        let xml = self.render(item);
        let path = self.save_path(item)?;
        let item_path = item.path().ok_or(SaveError::MissingPath)?.to_path_buf();

        if cancel.is_cancelled() {
            return Err(SaveError::Cancelled);
        }

        let writer = Arc::clone(&self.writer);
        let target = path.clone();
        // The blocking write cannot be aborted once handed off, so its result
        // decides the outcome even if cancellation arrives meanwhile.
        let written =
            tokio::task::spawn_blocking(move || writer.write(&xml, &target, MOVIE_XML_ELEMENTS))
                .await?;
        if let Err(source) = written {
            if cancel.is_cancelled() {
                return Err(SaveError::Cancelled);
            }
            return Err(SaveError::Write { path, source });
        }
        if cancel.is_cancelled() {
            debug!("cancelled after {:?} was written, recording refresh anyway", path);
        }

        // Mark the item refreshed so the scan does not treat our own write as an outside edit.
        self.tracker.set_last_refreshed(&item_path, Utc::now());
        info!("saved {:?}", path);
        Ok(path)
    }
}

#[derive(Default, Clone)]
pub struct SaverRegistry {
    savers: Vec<Arc<dyn MetadataSaver>>,
}

impl SaverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saver(mut self, saver: Arc<dyn MetadataSaver>) -> Self {
        self.savers.push(saver);
        self
    }

    pub fn is_enabled_for(&self, item: &Item, update: ItemUpdateType) -> bool {
        self.savers.iter().any(|s| s.is_enabled_for(item, update))
    }

    /// Runs every saver enabled for `update`. A failing saver does not stop
    /// the others; each result is reported by saver name.
    pub async fn save_all(
        &self,
        item: &Item,
        update: ItemUpdateType,
        cancel: &CancellationToken,
    ) -> Vec<(&'static str, Result<SaveOutcome, SaveError>)> {
        let mut results = Vec::with_capacity(self.savers.len());
        for saver in &self.savers {
            let result = saver.save_for_update(item, update, cancel).await;
            if let Err(e) = &result {
                error!("{} failed for {:?}: {}", saver.name(), item.path, e);
            }
            results.push((saver.name(), result));
        }
        results
    }
}
