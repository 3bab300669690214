//! The document aggregate produced and consumed by the codecs.
use crate::link::Link;
use crate::template::{Template, Templates};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Content of one embedded relation: a single value or an ordered sequence.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A relation holding exactly one value, written as a bare value.
    One(T),
    /// A relation holding a sequence, written as an array.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Returns the values regardless of multiplicity.
    pub fn values(&self) -> &[T] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Returns true when the relation holds no values.
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

/// Pagination metadata of a paged collection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Requested page size.
    pub size: u64,
    /// Total number of elements across all pages.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Zero based index of the current page.
    pub number: u64,
}

impl PageMetadata {
    /// Creates page metadata, deriving the page count from size and total.
    pub fn new(size: u64, number: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };
        Self {
            size,
            total_elements,
            total_pages,
            number,
        }
    }
}

/// The wire aggregate: payload, links, templates, embedded content, page.
///
/// A document is a short lived value built fresh per encode or decode call.
/// At most one of `payload`, `collection` and `embedded` is populated by
/// the conversions in [`crate::convert`]; this is a convention, not an
/// enforced invariant. `collection` never serializes, collections travel
/// the wire through `embedded`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Payload of a single resource, unwrapped at the top level on the wire.
    pub payload: Option<Map<String, Value>>,
    /// Payload of a resource collection, in memory only.
    pub collection: Option<Vec<Value>>,
    /// Embedded content keyed by relation.
    pub embedded: Option<IndexMap<String, OneOrMany<Value>>>,
    /// Pagination metadata.
    pub page: Option<PageMetadata>,
    /// Links in insertion order.
    pub links: Vec<Link>,
    /// Templates keyed by relation.
    pub templates: Templates,
}

impl Document {
    /// Returns the template stored under the default key.
    pub fn template(&self) -> Option<&Template> {
        self.templates.get(Template::DEFAULT_KEY)
    }

    /// Returns the template stored under the given key.
    pub fn template_at(&self, key: &str) -> Option<&Template> {
        self.templates.get(key)
    }

    /// Reads the payload back into a typed value.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        match &self.payload {
            Some(map) => serde_json::from_value(Value::Object(map.clone())).map(Some),
            None => Ok(None),
        }
    }

    /// Reads the collection payload back into typed values.
    pub fn collection_as<T: DeserializeOwned>(&self) -> Result<Vec<T>, serde_json::Error> {
        self.collection
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(serde_json::from_value)
            .collect()
    }

    /// Reads the embedded content of one relation back into typed values.
    pub fn embedded_as<T: DeserializeOwned>(&self, rel: &str) -> Result<Vec<T>, serde_json::Error> {
        let content = match self.embedded.as_ref().and_then(|map| map.get(rel)) {
            Some(content) => content,
            None => return Ok(Vec::new()),
        };
        content
            .values()
            .iter()
            .cloned()
            .map(serde_json::from_value)
            .collect()
    }
}
