//! Templates describing the state transitions of a resource.
use crate::link::Method;
use crate::media::MediaType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered template map keyed by relation, as stored in a document.
///
/// Insertion order is preserved for deterministic output; inserting an
/// existing key replaces the previous template (last write wins).
pub type Templates = IndexMap<String, Template>;

/// One input field of a template.
///
/// Identity is the name. The extractor fills in name and required only;
/// the remaining attributes stay unset unless the host supplies them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name, unique within a template.
    pub name: String,
    /// Prefilled value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Prompt shown when rendering the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Validation pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// Whether the field may not be edited.
    #[serde(default, skip_serializing_if = "is_false")]
    pub read_only: bool,
    /// Whether a value must be provided.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
}

impl Property {
    /// Creates a property with every attribute unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// The wire rendering of one affordance: a verb plus ordered properties.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Key under which the template is stored. The enclosing document map
    /// is authoritative, so the key never serializes with the template and
    /// is force set from the map key on decode.
    #[serde(skip)]
    pub key: String,
    /// Transition verb.
    #[serde(default)]
    pub method: Method,
    /// Input properties in affordance field order.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Accepted request media types, comma joined on the wire.
    #[serde(
        rename = "contentType",
        default,
        skip_serializing_if = "Vec::is_empty",
        with = "crate::media::comma_list"
    )]
    pub content_type: Vec<MediaType>,
}

impl Template {
    /// Key assigned to the first template extracted for a resource.
    pub const DEFAULT_KEY: &'static str = "default";

    /// Creates an empty template for the given verb.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_serializes_set_attributes_only() {
        let property = Property {
            required: true,
            ..Property::new("email")
        };
        let json = serde_json::to_string(&property).unwrap();
        assert_eq!(json, r#"{"name":"email","required":true}"#);
    }

    #[test]
    fn template_key_stays_off_the_wire() {
        let mut template = Template::new(Method::Post);
        template.key = "create".into();
        template.properties.push(Property::new("total"));
        let json = serde_json::to_string(&template).unwrap();
        assert_eq!(json, r#"{"method":"POST","properties":[{"name":"total"}]}"#);
    }

    #[test]
    fn content_type_round_trips_comma_joined() {
        let mut template = Template::new(Method::Put);
        template.content_type = vec![
            MediaType::new("application", "json"),
            MediaType::new("application", "xml"),
        ];
        let json = serde_json::to_string(&template).unwrap();
        assert_eq!(
            json,
            r#"{"method":"PUT","properties":[],"contentType":"application/json, application/xml"}"#
        );

        let back: Template = serde_json::from_str(&json).unwrap();
        assert_eq!(back.content_type, template.content_type);
    }

    #[test]
    fn missing_method_defaults_to_get() {
        let template: Template = serde_json::from_str(r#"{"properties":[]}"#).unwrap();
        assert_eq!(template.method, Method::Get);
        assert_eq!(template.key, "");
    }
}
