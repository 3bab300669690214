//! Media type parsing for the `contentType` wire attribute.
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Media type error.
#[derive(Debug, Error)]
pub enum MediaTypeError {
    /// Missing the `/` between type and subtype.
    #[error("media type {0:?} has no type/subtype separator")]
    MissingSlash(String),
    /// Empty type or subtype component.
    #[error("media type {0:?} has an empty type or subtype")]
    EmptyComponent(String),
    /// Parameter without a `key=value` form.
    #[error("malformed media type parameter {0:?}")]
    MalformedParameter(String),
}

/// A parsed `type/subtype` media type with optional parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MediaType {
    /// Primary type.
    pub main: String,
    /// Subtype.
    pub sub: String,
    /// Parameters in declaration order.
    pub params: Vec<(String, String)>,
}

impl MediaType {
    /// Creates a media type without parameters.
    pub fn new(main: impl Into<String>, sub: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            sub: sub.into(),
            params: Vec::new(),
        }
    }
}

impl FromStr for MediaType {
    type Err = MediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (essence, rest) = match s.split_once(';') {
            Some((essence, rest)) => (essence, rest),
            None => (s, ""),
        };
        let (main, sub) = essence
            .trim()
            .split_once('/')
            .ok_or_else(|| MediaTypeError::MissingSlash(s.trim().into()))?;
        let main = main.trim();
        let sub = sub.trim();
        if main.is_empty() || sub.is_empty() {
            return Err(MediaTypeError::EmptyComponent(s.trim().into()));
        }
        let mut params = Vec::new();
        for param in rest.split(';') {
            let param = param.trim();
            if param.is_empty() {
                continue;
            }
            let (key, value) = param
                .split_once('=')
                .ok_or_else(|| MediaTypeError::MalformedParameter(param.into()))?;
            params.push((key.trim().into(), value.trim().into()));
        }
        Ok(Self {
            main: main.into(),
            sub: sub.into(),
            params,
        })
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main, self.sub)?;
        for (key, value) in &self.params {
            write!(f, ";{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Parses a comma joined list of media types, preserving order.
pub fn parse_media_types(s: &str) -> Result<Vec<MediaType>, MediaTypeError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(MediaType::from_str)
        .collect()
}

/// Serde helpers for the comma joined wire form of a media type list.
pub mod comma_list {
    use super::{parse_media_types, MediaType};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes the list as one comma joined string.
    pub fn serialize<S: Serializer>(types: &[MediaType], ser: S) -> Result<S::Ok, S::Error> {
        let joined = types
            .iter()
            .map(MediaType::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        ser.serialize_str(&joined)
    }

    /// Deserializes a comma joined string back into the list.
    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<MediaType>, D::Error> {
        let raw = String::deserialize(de)?;
        parse_media_types(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single() {
        let mt: MediaType = "application/json".parse().unwrap();
        assert_eq!(mt, MediaType::new("application", "json"));
    }

    #[test]
    fn parse_list_with_params() {
        let types = parse_media_types("application/json, text/html;charset=utf-8").unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0], MediaType::new("application", "json"));
        assert_eq!(types[1].params, vec![("charset".into(), "utf-8".into())]);
    }

    #[test]
    fn parse_rejects_missing_slash() {
        match parse_media_types("application").unwrap_err() {
            MediaTypeError::MissingSlash(raw) => assert_eq!(raw, "application"),
            x => panic!("unexpected error: {:?}", x),
        }
    }

    #[test]
    fn parse_rejects_bare_parameter() {
        match "text/html;charset".parse::<MediaType>().unwrap_err() {
            MediaTypeError::MalformedParameter(raw) => assert_eq!(raw, "charset"),
            x => panic!("unexpected error: {:?}", x),
        }
    }

    #[test]
    fn display_preserves_params() {
        let mt: MediaType = "text/html; charset=utf-8".parse().unwrap();
        assert_eq!(mt.to_string(), "text/html;charset=utf-8");
    }
}
