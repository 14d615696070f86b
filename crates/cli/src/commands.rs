use anyhow::{Context, Result};
use saver_core::config::AppConfig;
use saver_core::models::Item;
use saver_core::refresh::MemoryRefreshTracker;
use saver_core::update::ItemUpdateType;
use saver_core::{MetadataSaver, MovieXmlSaver, SaveOutcome};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Reads an item document (JSON) from disk.
pub fn load_item(path: &Path) -> Result<Item> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading item {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing item {:?}", path))
}

pub fn build_saver(cfg: &AppConfig) -> MovieXmlSaver {
    MovieXmlSaver::new(cfg.saver, Arc::new(MemoryRefreshTracker::new()))
}

pub fn check(cfg: &AppConfig, item: &Item, update: ItemUpdateType) -> bool {
    build_saver(cfg).is_enabled_for(item, update)
}

pub fn save_path(cfg: &AppConfig, item: &Item) -> Result<String> {
    let path = build_saver(cfg)
        .save_path(item)
        .context("resolving movie.xml path")?;
    Ok(path.to_string_lossy().into_owned())
}

pub fn render(cfg: &AppConfig, item: &Item) -> String {
    build_saver(cfg).render(item)
}

pub async fn save(
    cfg: &AppConfig,
    item: &Item,
    update: ItemUpdateType,
    cancel: &CancellationToken,
) -> Result<SaveOutcome> {
    let outcome = build_saver(cfg)
        .save_for_update(item, update, cancel)
        .await
        .with_context(|| format!("saving movie.xml for {:?}", item.path))?;
    Ok(outcome)
}
