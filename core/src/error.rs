//! Document error definitions.
use thiserror::Error;

/// Errors raised while building a document from a source shape.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// An affordance targets a different resource than the self link.
    #[error("affordance uri {affordance_uri:?} does not match self link path {self_path:?}")]
    UriMismatch {
        /// Target uri declared by the affordance.
        affordance_uri: String,
        /// Path of the expanded self link.
        self_path: String,
    },
    /// The source value does not flatten to a key value payload.
    #[error("cannot build a payload from a {type_name} value")]
    UnsupportedShape {
        /// Type name of the rejected value.
        type_name: &'static str,
    },
    /// Reading a payload field failed.
    #[error("{0}")]
    Flatten(#[from] serde_json::Error),
}

impl EncodeError {
    /// Creates a mismatch error from the offending uri pair.
    pub fn mismatch(affordance_uri: &str, self_path: &str) -> Self {
        Self::UriMismatch {
            affordance_uri: affordance_uri.into(),
            self_path: self_path.into(),
        }
    }
}
