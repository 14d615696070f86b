//! Writes assembled xml to disk, keeping elements other tools added.

use crate::renderers::{COMMON_ELEMENTS, MEDIA_INFO_ELEMENTS};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, warn};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>"#;

pub trait MetadataWriter: Send + Sync {
    /// Writes `xml` to `path`. `managed` names the elements this saver owns;
    /// they may be replaced in an existing file.
    fn write(&self, xml: &str, path: &Path, managed: &[&str]) -> io::Result<()>;
}

/// Merges into any existing file and replaces it through a temp file in the
/// same directory, so readers see either the old or the new file.
#[derive(Debug, Clone)]
pub struct AtomicXmlWriter {
    vocabulary: Vec<String>,
}

impl Default for AtomicXmlWriter {
    fn default() -> Self {
        Self::new(COMMON_ELEMENTS.iter().chain(MEDIA_INFO_ELEMENTS).copied())
    }
}

impl AtomicXmlWriter {
    /// `vocabulary` lists elements owned by the shared renderers, on top of
    /// the per-call `managed` names.
    pub fn new<'a>(vocabulary: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            vocabulary: vocabulary.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn merged_document(&self, xml: &str, existing: Option<&str>, managed: &[&str]) -> String {
        let mut body = xml.to_string();
        if let Some(existing) = existing {
            match self.foreign_elements(xml, existing, managed) {
                Ok(kept) if !kept.is_empty() => {
                    if let Some(close) = body.rfind("</") {
                        body.insert_str(close, &kept.concat());
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("existing xml is unreadable, replacing it: {e}"),
            }
        }
        format!("{XML_DECLARATION}\n{body}")
    }

    fn foreign_elements(
        &self,
        xml: &str,
        existing: &str,
        managed: &[&str],
    ) -> quick_xml::Result<Vec<String>> {
        let mut owned: HashSet<String> = top_level_elements(xml)?
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        owned.extend(managed.iter().map(|m| m.to_string()));
        owned.extend(self.vocabulary.iter().cloned());

        Ok(top_level_elements(existing)?
            .into_iter()
            .filter(|(name, _)| !owned.contains(name))
            .map(|(_, raw)| raw)
            .collect())
    }
}

impl MetadataWriter for AtomicXmlWriter {
    fn write(&self, xml: &str, path: &Path, managed: &[&str]) -> io::Result<()> {
        let existing = match fs::read(path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(content) => Some(content),
                Err(e) => {
                    warn!("existing xml {:?} is not utf-8, replacing it: {e}", path);
                    None
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };
        let document = self.merged_document(xml, existing.as_deref(), managed);

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(document.as_bytes())?;
        tmp.as_file().sync_all()?;
        set_readable(tmp.path(), path)?;
        tmp.persist(path).map_err(|e| e.error)?;
        debug!("wrote {:?} ({} bytes)", path, document.len());
        Ok(())
    }
}

/// Keeps the target's permissions, or makes a new file world readable.
fn set_readable(tmp: &Path, target: &Path) -> io::Result<()> {
    match fs::metadata(target) {
        Ok(meta) => fs::set_permissions(tmp, meta.permissions()),
        #[cfg(unix)]
        Err(_) => {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp, fs::Permissions::from_mode(0o644))
        }
        #[cfg(not(unix))]
        Err(_) => Ok(()),
    }
}

/// Direct children of the root element as `(name, raw markup)`.
fn top_level_elements(xml: &str) -> quick_xml::Result<Vec<(String, String)>> {
    let mut reader = Reader::from_str(xml);
    let mut elements = Vec::new();
    let mut depth = 0usize;
    let mut current: Option<(String, usize)> = None;

    loop {
        let start = reader.buffer_position();
        match reader.read_event()? {
            Event::Start(e) => {
                if depth == 1 {
                    current = Some((element_name(e.name().as_ref()), start));
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 1 {
                    if let Some((name, from)) = current.take() {
                        elements.push((name, xml[from..reader.buffer_position()].to_string()));
                    }
                }
            }
            Event::Empty(e) => {
                if depth == 1 {
                    let raw = xml[start..reader.buffer_position()].to_string();
                    elements.push((element_name(e.name().as_ref()), raw));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(elements)
}

fn element_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}
