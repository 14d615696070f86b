//! Assembly of the `movie.xml` document body.

use crate::models::Item;
use crate::renderers::{CommonNodes, MediaInfoNodes};
use std::borrow::Cow;

pub const ROOT_ELEMENT: &str = "Title";
pub const RATING_ELEMENT: &str = "IMDBrating";
pub const DESCRIPTION_ELEMENT: &str = "Description";

/// Escapes `& < > " '` for use in element text.
pub fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Wraps `text` in a CDATA section. An embedded `]]>` would end the
/// section early, so it is split across two sections.
pub fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

/// Formats a rating with a `.` decimal separator and no trailing zeros.
pub fn format_rating(rating: f32) -> String {
    rating.to_string()
}

pub fn push_element(out: &mut String, name: &str, text: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&escape(text));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

pub fn assemble_movie_xml(
    item: &Item,
    common: &dyn CommonNodes,
    media_info: &dyn MediaInfoNodes,
) -> String {
    let mut out = String::new();
    out.push_str("<Title>");

    common.append(item, &mut out);

    if let Some(rating) = item.community_rating {
        push_element(&mut out, RATING_ELEMENT, &format_rating(rating));
    }

    if let Some(overview) = item.overview.as_deref().filter(|o| !o.is_empty()) {
        out.push_str("<Description>");
        out.push_str(&cdata(overview));
        out.push_str("</Description>");
    }

    media_info.append(item, &mut out);

    out.push_str("</Title>");
    out
}
