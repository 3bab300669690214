//! The hal-forms crate.
//!
//! Builds documents out of resource graphs and runs them through the wire
//! codecs. The core model lives in `halforms-core`, the json codec in
//! `halforms-json`; this crate re-exports both surfaces.

#![deny(missing_docs)]
#![deny(warnings)]

pub use halforms_core::codec::{Codec, Decode, Encode};
pub use halforms_core::document::{Document, OneOrMany, PageMetadata};
pub use halforms_core::error::EncodeError;
pub use halforms_core::extract::extract_templates;
pub use halforms_core::indexmap::IndexMap;
pub use halforms_core::link::{Affordance, FieldSpec, Link, Method, SELF_REL};
pub use halforms_core::media::{parse_media_types, MediaType, MediaTypeError};
pub use halforms_core::source::{Collection, Embedded, Record, Resource, Source};
pub use halforms_core::template::{Property, Template, Templates};

#[cfg(feature = "json")]
pub use halforms_json as json;
#[cfg(feature = "json")]
pub use halforms_json::{HalFormsCodec, JsonError, JsonResult, MEDIA_TYPE};
