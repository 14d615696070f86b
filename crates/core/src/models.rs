use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[default]
    Movie,
    Trailer,
    MusicVideo,
    Series,
    Episode,
    Audio,
    Folder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoType {
    #[default]
    VideoFile,
    Iso,
    Dvd,
    BluRay,
    HdDvd,
}

/// How an item's path maps onto the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageLayout {
    /// The path names a single media file.
    SingleFile,
    /// The path names a disc image file.
    DiscImage,
    /// The path is the directory holding the media (DVD/Blu-ray folder rips).
    Directory,
}

impl From<VideoType> for StorageLayout {
    fn from(video_type: VideoType) -> Self {
        match video_type {
            VideoType::VideoFile => StorageLayout::SingleFile,
            VideoType::Iso => StorageLayout::DiscImage,
            VideoType::Dvd | VideoType::BluRay | VideoType::HdDvd => StorageLayout::Directory,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    #[default]
    Video,
    Audio,
    Subtitle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaStream {
    #[serde(default)]
    pub kind: StreamKind,
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub frame_rate: Option<f32>,
    #[serde(default)]
    pub bit_rate: Option<u32>,
    #[serde(default)]
    pub channels: Option<u32>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_forced: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// A library item as seen by metadata savers. Savers only read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub path: Option<PathBuf>,
    pub kind: ItemKind,
    #[serde(default)]
    pub video_type: VideoType,
    #[serde(default)]
    pub is_local_trailer: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub sort_title: Option<String>,
    #[serde(default)]
    pub official_rating: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub community_rating: Option<f32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub premiere_date: Option<NaiveDate>,
    #[serde(default)]
    pub production_year: Option<i32>,
    /// Runtime in minutes.
    #[serde(default)]
    pub run_time_minutes: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub studios: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub people: Vec<Person>,
    /// External ids keyed by provider name, e.g. `imdb`, `tmdb`.
    #[serde(default)]
    pub provider_ids: BTreeMap<String, String>,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub media_streams: Vec<MediaStream>,
}

impl Item {
    pub fn new(path: impl Into<PathBuf>, kind: ItemKind, video_type: VideoType) -> Self {
        Self {
            path: Some(path.into()),
            kind,
            video_type,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> StorageLayout {
        StorageLayout::from(self.video_type)
    }

    /// The item's path, treating an empty path the same as a missing one.
    pub fn path(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    pub fn provider_id(&self, provider: &str) -> Option<&str> {
        self.provider_ids.get(provider).map(String::as_str)
    }
}
