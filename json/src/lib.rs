//! Json codec for hal-forms documents.
#![deny(missing_docs)]
#![deny(warnings)]

use halforms_core::codec::{Codec, Decode, Encode};
use halforms_core::document::Document;
use std::io::{Read, Write};
use thiserror::Error;

mod decode;
mod encode;
mod token;

pub use decode::{
    from_reader, from_slice, from_slice_typed, from_str, ContentDecoder, Decoder, RawContent,
    TypedContent,
};
pub use encode::encode;
pub use token::{Token, TokenCursor, TokenStream};

/// Media type of the wire format.
pub const MEDIA_TYPE: &str = "application/prs.hal-forms+json";

/// Reserved field holding the link section.
pub const LINKS_FIELD: &str = "_links";
/// Reserved field holding the template section.
pub const TEMPLATES_FIELD: &str = "_templates";
/// Reserved field holding the embedded section.
pub const EMBEDDED_FIELD: &str = "_embedded";
/// Reserved field holding page metadata.
pub const PAGE_FIELD: &str = "page";

/// Json codec.
#[derive(Clone, Copy, Debug)]
pub struct HalFormsCodec;

impl Codec for HalFormsCodec {
    type Error = JsonError;
}

impl Encode<HalFormsCodec> for Document {
    fn encode<W: Write>(&self, w: &mut W) -> Result<(), JsonError> {
        encode::encode(self, w)
    }
}

impl Decode<HalFormsCodec> for Document {
    fn decode<R: Read>(r: &mut R) -> Result<Self, JsonError> {
        decode::from_reader(r)
    }
}

/// Json codec error.
#[derive(Debug, Error)]
pub enum JsonError {
    /// The token stream violated the document grammar.
    #[error("expected {expected} but found {found} at token {at}")]
    Parse {
        /// What the grammar required at this point.
        expected: &'static str,
        /// What the stream held instead.
        found: String,
        /// Offset of the offending token.
        at: usize,
    },
    /// An `_embedded` section was hit without a content decoder.
    #[error("no content decoder configured for the embedded section")]
    MissingTypeContext,
    /// Underlying json reader or writer failure.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl JsonError {
    /// Creates a parse error from an expectation and what was found.
    pub fn unexpected(expected: &'static str, found: impl Into<String>, at: usize) -> Self {
        Self::Parse {
            expected,
            found: found.into(),
            at,
        }
    }
}

/// Json codec result.
pub type JsonResult<T> = Result<T, JsonError>;

#[cfg(test)]
mod tests {
    use super::*;
    use halforms_core::link::{Link, Method};
    use halforms_core::template::Template;
    use serde_json::json;

    #[test]
    fn encode_decode_document() {
        // A contact document that looks like:
        // { name: "Hello World!" } with a self link and a default template.
        let mut payload = serde_json::Map::new();
        payload.insert("name".into(), json!("Hello World!"));
        let mut template = Template::new(Method::Post);
        template.key = Template::DEFAULT_KEY.into();
        let mut document = Document {
            payload: Some(payload),
            links: vec![Link::self_link("/contacts/1")],
            ..Document::default()
        };
        document
            .templates
            .insert(Template::DEFAULT_KEY.into(), template);

        let bytes = HalFormsCodec::encode(&document).unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"name":"Hello World!","_links":{"self":{"href":"/contacts/1"}},"_templates":{"default":{"method":"POST","properties":[]}}}"#
        );

        let decoded: Document = HalFormsCodec::decode(&bytes).unwrap();
        assert_eq!(decoded, document);
    }
}
