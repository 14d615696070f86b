//! Element groups shared by the xml savers: descriptive fields common to
//! every item and the technical media-info block of video items.

use crate::models::{Item, MediaStream, StreamKind};
use crate::xml::push_element;

/// Top-level elements written by [`StandardCommonNodes`].
pub const COMMON_ELEMENTS: &[&str] = &[
    "LockData",
    "LocalTitle",
    "OriginalTitle",
    "SortTitle",
    "ContentRating",
    "TagLine",
    "PremiereDate",
    "ProductionYear",
    "RunningTime",
    "IMDB",
    "TMDbId",
    "Genres",
    "Studios",
    "Tags",
    "Persons",
];

/// Top-level elements written by [`StandardMediaInfo`].
pub const MEDIA_INFO_ELEMENTS: &[&str] = &["MediaInfo"];

/// Appends shared descriptive elements. Implementations must escape text.
pub trait CommonNodes: Send + Sync {
    fn append(&self, item: &Item, out: &mut String);
}

/// Appends technical stream details. Implementations must escape text.
pub trait MediaInfoNodes: Send + Sync {
    fn append(&self, item: &Item, out: &mut String);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StandardCommonNodes;

impl CommonNodes for StandardCommonNodes {
    fn append(&self, item: &Item, out: &mut String) {
        if item.is_locked {
            push_element(out, "LockData", "true");
        }
        if let Some(name) = non_empty(&item.name) {
            push_element(out, "LocalTitle", name);
        }
        if let Some(title) = non_empty(&item.original_title) {
            push_element(out, "OriginalTitle", title);
        }
        if let Some(title) = non_empty(&item.sort_title) {
            push_element(out, "SortTitle", title);
        }
        if let Some(rating) = non_empty(&item.official_rating) {
            push_element(out, "ContentRating", rating);
        }
        if let Some(tagline) = non_empty(&item.tagline) {
            push_element(out, "TagLine", tagline);
        }
        if let Some(date) = item.premiere_date {
            push_element(out, "PremiereDate", &date.format("%Y-%m-%d").to_string());
        }
        if let Some(year) = item.production_year {
            push_element(out, "ProductionYear", &year.to_string());
        }
        if let Some(minutes) = item.run_time_minutes {
            push_element(out, "RunningTime", &minutes.to_string());
        }
        if let Some(imdb) = item.provider_id("imdb").filter(|id| !id.is_empty()) {
            push_element(out, "IMDB", imdb);
        }
        if let Some(tmdb) = item.provider_id("tmdb").filter(|id| !id.is_empty()) {
            push_element(out, "TMDbId", tmdb);
        }
        push_list(out, "Genres", "Genre", &item.genres);
        push_list(out, "Studios", "Studio", &item.studios);
        push_list(out, "Tags", "Tag", &item.tags);

        if !item.people.is_empty() {
            out.push_str("<Persons>");
            for person in &item.people {
                out.push_str("<Person>");
                push_element(out, "Name", &person.name);
                if let Some(kind) = non_empty(&person.kind) {
                    push_element(out, "Type", kind);
                }
                if let Some(role) = non_empty(&person.role) {
                    push_element(out, "Role", role);
                }
                out.push_str("</Person>");
            }
            out.push_str("</Persons>");
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StandardMediaInfo;

impl MediaInfoNodes for StandardMediaInfo {
    fn append(&self, item: &Item, out: &mut String) {
        if item.media_streams.is_empty() {
            return;
        }
        out.push_str("<MediaInfo>");
        for stream in &item.media_streams {
            let element = match stream.kind {
                StreamKind::Video => "Video",
                StreamKind::Audio => "Audio",
                StreamKind::Subtitle => "Subtitle",
            };
            out.push('<');
            out.push_str(element);
            out.push('>');
            push_stream_fields(out, stream);
            out.push_str("</");
            out.push_str(element);
            out.push('>');
        }
        out.push_str("</MediaInfo>");
    }
}

fn push_stream_fields(out: &mut String, stream: &MediaStream) {
    if let Some(codec) = stream.codec.as_deref() {
        push_element(out, "Codec", codec);
    }
    if let Some(language) = stream.language.as_deref() {
        push_element(out, "Language", language);
    }
    match stream.kind {
        StreamKind::Video => {
            if let Some(width) = stream.width {
                push_element(out, "Width", &width.to_string());
            }
            if let Some(height) = stream.height {
                push_element(out, "Height", &height.to_string());
            }
            if let Some(ratio) = stream.aspect_ratio.as_deref() {
                push_element(out, "AspectRatio", ratio);
            }
            if let Some(rate) = stream.frame_rate {
                push_element(out, "FrameRate", &rate.to_string());
            }
            if let Some(bit_rate) = stream.bit_rate {
                push_element(out, "BitRate", &bit_rate.to_string());
            }
        }
        StreamKind::Audio => {
            if let Some(channels) = stream.channels {
                push_element(out, "Channels", &channels.to_string());
            }
            if let Some(bit_rate) = stream.bit_rate {
                push_element(out, "BitRate", &bit_rate.to_string());
            }
            push_element(out, "Default", bool_text(stream.is_default));
        }
        StreamKind::Subtitle => {
            push_element(out, "Default", bool_text(stream.is_default));
            push_element(out, "Forced", bool_text(stream.is_forced));
        }
    }
}

fn push_list(out: &mut String, outer: &str, inner: &str, values: &[String]) {
    let values: Vec<&String> = values.iter().filter(|v| !v.is_empty()).collect();
    if values.is_empty() {
        return;
    }
    out.push('<');
    out.push_str(outer);
    out.push('>');
    for value in values {
        push_element(out, inner, value);
    }
    out.push_str("</");
    out.push_str(outer);
    out.push('>');
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemKind, Person, VideoType};
    use chrono::NaiveDate;

    fn render_common(item: &Item) -> String {
        let mut out = String::new();
        StandardCommonNodes.append(item, &mut out);
        out
    }

    fn render_media(item: &Item) -> String {
        let mut out = String::new();
        StandardMediaInfo.append(item, &mut out);
        out
    }

    #[test]
    fn common_fields_are_escaped() {
        let mut item = Item::new("/m/a.mkv", ItemKind::Movie, VideoType::VideoFile);
        item.name = Some("Tom & Jerry".to_string());
        item.genres = vec!["Action <Adventure>".to_string(), String::new()];
        item.premiere_date = NaiveDate::from_ymd_opt(2001, 3, 9);
        item.provider_ids.insert("imdb".to_string(), "tt0000001".to_string());
        item.people = vec![Person {
            name: "Jane \"JD\" Doe".to_string(),
            kind: Some("Actor".to_string()),
            role: None,
        }];

        let xml = render_common(&item);
        assert!(xml.contains("<LocalTitle>Tom &amp; Jerry</LocalTitle>"));
        assert!(xml.contains("<Genres><Genre>Action &lt;Adventure&gt;</Genre></Genres>"));
        assert!(xml.contains("<PremiereDate>2001-03-09</PremiereDate>"));
        assert!(xml.contains("<IMDB>tt0000001</IMDB>"));
        assert!(xml.contains(
            "<Person><Name>Jane &quot;JD&quot; Doe</Name><Type>Actor</Type></Person>"
        ));
    }

    #[test]
    fn element_lists_match_what_each_renderer_writes() {
        let mut item = Item::new("/m/a.mkv", ItemKind::Movie, VideoType::VideoFile);
        item.name = Some("A".to_string());
        item.genres = vec!["Drama".to_string()];
        item.media_streams = vec![MediaStream::default()];

        let common = render_common(&item);
        let media = render_media(&item);
        assert!(!COMMON_ELEMENTS.contains(&"MediaInfo"));
        assert!(!common.contains("<MediaInfo>"));
        assert!(MEDIA_INFO_ELEMENTS
            .iter()
            .all(|name| media.starts_with(&format!("<{name}>"))));
    }

    #[test]
    fn empty_item_renders_nothing() {
        let item = Item::default();
        assert_eq!(render_common(&item), "");
        assert_eq!(render_media(&item), "");
    }

    #[test]
    fn media_streams_are_grouped_under_media_info() {
        let mut item = Item::new("/m/a.mkv", ItemKind::Movie, VideoType::VideoFile);
        item.media_streams = vec![
            MediaStream {
                kind: StreamKind::Video,
                codec: Some("h264".to_string()),
                width: Some(1920),
                height: Some(1080),
                frame_rate: Some(23.976),
                ..MediaStream::default()
            },
            MediaStream {
                kind: StreamKind::Audio,
                codec: Some("ac3".to_string()),
                language: Some("eng".to_string()),
                channels: Some(6),
                is_default: true,
                ..MediaStream::default()
            },
        ];

        let xml = render_media(&item);
        assert_eq!(
            xml,
            "<MediaInfo>\
             <Video><Codec>h264</Codec><Width>1920</Width><Height>1080</Height><FrameRate>23.976</FrameRate></Video>\
             <Audio><Codec>ac3</Codec><Language>eng</Language><Channels>6</Channels><Default>true</Default></Audio>\
             </MediaInfo>"
        );
    }
}
