//! Document writer driving a serde serializer.
use crate::{JsonResult, EMBEDDED_FIELD, LINKS_FIELD, PAGE_FIELD, TEMPLATES_FIELD};
use halforms_core::document::Document;
use halforms_core::indexmap::IndexMap;
use halforms_core::link::Link;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io::Write;

/// Encodes a document as json into `writer`.
pub fn encode<W: Write>(document: &Document, writer: &mut W) -> JsonResult<()> {
    let mut ser = serde_json::Serializer::new(writer);
    serialize(document, &mut ser)?;
    Ok(())
}

/// Writes payload fields first, then the reserved sections. The in memory
/// collection payload has no wire form and is skipped.
fn serialize<S: Serializer>(document: &Document, ser: S) -> Result<S::Ok, S::Error> {
    let mut map = ser.serialize_map(None)?;
    if let Some(payload) = &document.payload {
        for (name, value) in payload {
            map.serialize_entry(name, value)?;
        }
    }
    if !document.links.is_empty() {
        map.serialize_entry(LINKS_FIELD, &LinkSection(&document.links))?;
    }
    if !document.templates.is_empty() {
        map.serialize_entry(TEMPLATES_FIELD, &document.templates)?;
    }
    if let Some(embedded) = &document.embedded {
        map.serialize_entry(EMBEDDED_FIELD, embedded)?;
    }
    if let Some(page) = &document.page {
        map.serialize_entry(PAGE_FIELD, page)?;
    }
    map.end()
}

/// Groups links by relation: a lone link renders as an object, links
/// sharing a relation render as an array.
struct LinkSection<'a>(&'a [Link]);

impl Serialize for LinkSection<'_> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut grouped: IndexMap<&str, Vec<&Link>> = IndexMap::new();
        for link in self.0 {
            grouped.entry(link.rel.as_str()).or_default().push(link);
        }
        let mut map = ser.serialize_map(Some(grouped.len()))?;
        for (rel, links) in grouped {
            if links.len() == 1 {
                map.serialize_entry(rel, &LinkObject(links[0]))?;
            } else {
                let objects: Vec<LinkObject> = links.into_iter().map(LinkObject).collect();
                map.serialize_entry(rel, &objects)?;
            }
        }
        map.end()
    }
}

struct LinkObject<'a>(&'a Link);

impl Serialize for LinkObject<'_> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let link = self.0;
        let mut map = ser.serialize_map(None)?;
        map.serialize_entry("href", &link.href)?;
        if link.is_templated() {
            map.serialize_entry("templated", &true)?;
        }
        if let Some(title) = &link.title {
            map.serialize_entry("title", title)?;
        }
        if let Some(name) = &link.name {
            map.serialize_entry("name", name)?;
        }
        map.end()
    }
}
