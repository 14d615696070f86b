use crate::error::SaveError;
use crate::models::{Item, StorageLayout};
use std::path::PathBuf;

pub const MOVIE_XML_FILE_NAME: &str = "movie.xml";

/// File and disc-image items keep `movie.xml` in their parent directory;
/// folder rips keep it inside the item's own directory.
pub fn resolve_save_path(item: &Item) -> Result<PathBuf, SaveError> {
    let path = item.path().ok_or(SaveError::MissingPath)?;
    let directory = match item.layout() {
        StorageLayout::SingleFile | StorageLayout::DiscImage => {
            path.parent().ok_or(SaveError::MissingPath)?
        }
        StorageLayout::Directory => path,
    };
    Ok(directory.join(MOVIE_XML_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemKind, VideoType};
    use std::path::Path;

    #[test]
    fn single_file_saves_next_to_the_file() {
        let item = Item::new(
            "/lib/Movie (2001)/film.mkv",
            ItemKind::Movie,
            VideoType::VideoFile,
        );
        assert_eq!(
            resolve_save_path(&item).unwrap(),
            Path::new("/lib/Movie (2001)/movie.xml")
        );
    }

    #[test]
    fn disc_image_saves_next_to_the_image() {
        let item = Item::new("/lib/Movie (2001)/disc.iso", ItemKind::Movie, VideoType::Iso);
        assert_eq!(
            resolve_save_path(&item).unwrap(),
            Path::new("/lib/Movie (2001)/movie.xml")
        );
    }

    #[test]
    fn directory_layout_saves_inside_the_directory() {
        for video_type in [VideoType::Dvd, VideoType::BluRay, VideoType::HdDvd] {
            let item = Item::new("/lib/Movie (2001)/", ItemKind::Movie, video_type);
            assert_eq!(
                resolve_save_path(&item).unwrap(),
                Path::new("/lib/Movie (2001)/movie.xml")
            );
        }
    }

    #[test]
    fn missing_or_empty_path_is_a_configuration_error() {
        let mut item = Item::default();
        assert!(matches!(
            resolve_save_path(&item),
            Err(SaveError::MissingPath)
        ));

        item.path = Some(PathBuf::new());
        let err = resolve_save_path(&item).unwrap_err();
        assert!(err.is_configuration());
    }
}
