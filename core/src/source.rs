//! Source shapes a document can be built from.
use crate::document::{OneOrMany, PageMetadata};
use crate::error::EncodeError;
use crate::link::Link;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Payload fields stripped when flattening a record.
pub const RECORD_EXCLUSIONS: [&str; 2] = ["id", "links"];

/// The closed set of source shapes accepted by the document conversions.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    /// A single resource.
    Resource(Resource),
    /// A homogeneous resource collection.
    Collection(Collection),
    /// Embedded content mapped by relation, with optional page metadata.
    Embedded(Embedded),
    /// A plain record exposing links but no affordances.
    Record(Record),
}

/// A single resource: payload plus its own links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resource {
    /// Key value payload.
    pub payload: Map<String, Value>,
    /// Links of the resource.
    pub links: Vec<Link>,
}

impl Resource {
    /// Creates a resource from an already flattened payload.
    pub fn new(payload: Map<String, Value>, links: Vec<Link>) -> Self {
        Self { payload, links }
    }

    /// Flattens a serializable value into a resource payload.
    pub fn from_serialize<T: Serialize>(value: &T, links: Vec<Link>) -> Result<Self, EncodeError> {
        Ok(Self {
            payload: flatten(value)?,
            links,
        })
    }
}

/// A resource collection: item payloads plus collection level links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collection {
    /// Item payloads in collection order.
    pub items: Vec<Value>,
    /// Links of the collection, not of its items.
    pub links: Vec<Link>,
}

impl Collection {
    /// Creates a collection from already converted items.
    pub fn new(items: Vec<Value>, links: Vec<Link>) -> Self {
        Self { items, links }
    }

    /// Converts an iterator of serializable items into a collection.
    pub fn from_serialize<T, I>(items: I, links: Vec<Link>) -> Result<Self, EncodeError>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        let items = items
            .into_iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()?;
        Ok(Self { items, links })
    }
}

/// Embedded content keyed by relation, with optional page metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Embedded {
    /// Content per relation, preserving multiplicity.
    pub content: IndexMap<String, OneOrMany<Value>>,
    /// Pagination metadata.
    pub page: Option<PageMetadata>,
    /// Links of the enclosing collection.
    pub links: Vec<Link>,
}

impl Embedded {
    /// Creates embedded content without page metadata.
    pub fn new(content: IndexMap<String, OneOrMany<Value>>, links: Vec<Link>) -> Self {
        Self {
            content,
            page: None,
            links,
        }
    }

    /// Sets the page metadata.
    pub fn with_page(mut self, page: PageMetadata) -> Self {
        self.page = Some(page);
        self
    }
}

/// A plain record: named fields plus links, no affordances.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    /// Named fields in declaration order.
    pub fields: Map<String, Value>,
    /// Links of the record.
    pub links: Vec<Link>,
}

impl Record {
    /// Creates a record from already flattened fields.
    pub fn new(fields: Map<String, Value>, links: Vec<Link>) -> Self {
        Self { fields, links }
    }

    /// Flattens a serializable value, stripping the excluded fields.
    pub fn from_serialize<T: Serialize>(value: &T, links: Vec<Link>) -> Result<Self, EncodeError> {
        let mut fields = flatten(value)?;
        for key in RECORD_EXCLUSIONS {
            fields.shift_remove(key);
        }
        Ok(Self { fields, links })
    }
}

/// Flattens a value through serde, rejecting anything but a key value map.
fn flatten<T: Serialize>(value: &T) -> Result<Map<String, Value>, EncodeError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(EncodeError::UnsupportedShape {
            type_name: std::any::type_name::<T>(),
        }),
    }
}
