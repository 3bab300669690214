//! Conversions from source shapes into documents.
use crate::document::Document;
use crate::error::EncodeError;
use crate::extract::extract_templates;
use crate::source::{Collection, Embedded, Record, Resource, Source};
use serde_json::Value;

impl TryFrom<Resource> for Document {
    type Error = EncodeError;

    fn try_from(resource: Resource) -> Result<Self, Self::Error> {
        let templates = extract_templates(&resource.links)?;
        Ok(Self {
            payload: Some(resource.payload),
            links: resource.links,
            templates,
            ..Self::default()
        })
    }
}

impl TryFrom<Collection> for Document {
    type Error = EncodeError;

    /// A collection of exactly one raw map collapses into the single
    /// payload case; everything else stays a collection payload.
    fn try_from(collection: Collection) -> Result<Self, Self::Error> {
        let templates = extract_templates(&collection.links)?;
        let mut document = Self {
            links: collection.links,
            templates,
            ..Self::default()
        };
        let mut items = collection.items;
        match items.pop() {
            Some(Value::Object(payload)) if items.is_empty() => {
                document.payload = Some(payload);
            }
            Some(other) => {
                items.push(other);
                document.collection = Some(items);
            }
            None => document.collection = Some(items),
        }
        Ok(document)
    }
}

impl TryFrom<Embedded> for Document {
    type Error = EncodeError;

    fn try_from(embedded: Embedded) -> Result<Self, Self::Error> {
        let templates = extract_templates(&embedded.links)?;
        Ok(Self {
            embedded: Some(embedded.content),
            page: embedded.page,
            links: embedded.links,
            templates,
            ..Self::default()
        })
    }
}

impl From<Record> for Document {
    /// Records never carry affordances, so the template map stays empty.
    fn from(record: Record) -> Self {
        Self {
            payload: Some(record.fields),
            links: record.links,
            ..Self::default()
        }
    }
}

impl TryFrom<Source> for Document {
    type Error = EncodeError;

    fn try_from(source: Source) -> Result<Self, Self::Error> {
        match source {
            Source::Resource(resource) => resource.try_into(),
            Source::Collection(collection) => collection.try_into(),
            Source::Embedded(embedded) => embedded.try_into(),
            Source::Record(record) => Ok(record.into()),
        }
    }
}
