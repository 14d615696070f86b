//! Decides whether an update to an item should be written to `movie.xml`.

use crate::config::SaverConfig;
use crate::models::{Item, ItemKind};
use crate::update::ItemUpdateType;

/// Downloads are saved only when `save_local_metadata` is on; manual edits
/// are always saved. Local trailers are never written.
pub fn is_eligible(item: &Item, update: ItemUpdateType, config: &SaverConfig) -> bool {
    let edited = update.was_edited();
    let downloaded = update.was_downloaded();
    if !edited && !downloaded {
        return false;
    }

    if !((config.save_local_metadata && (edited || downloaded)) || edited) {
        return false;
    }

    match item.kind {
        ItemKind::Trailer => !item.is_local_trailer,
        ItemKind::Movie | ItemKind::MusicVideo => true,
        _ => false,
    }
}
