//! Core hal-forms types used by hal-forms codecs.
#![deny(missing_docs)]
#![deny(warnings)]

pub mod codec;
pub mod convert;
pub mod document;
pub mod error;
pub mod extract;
pub mod link;
pub mod media;
pub mod source;
pub mod template;

pub use indexmap;
