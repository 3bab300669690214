//! Document codecs.
use std::io::{Read, Write};

/// Codec trait.
pub trait Codec: Sized {
    /// Error type.
    type Error: std::error::Error + Send + 'static;

    /// Encodes an encodable type.
    fn encode<T: Encode<Self> + ?Sized>(obj: &T) -> Result<Box<[u8]>, Self::Error> {
        let mut buf = Vec::new();
        obj.encode(&mut buf)?;
        Ok(buf.into_boxed_slice())
    }

    /// Decodes a decodable type.
    fn decode<T: Decode<Self>>(mut bytes: &[u8]) -> Result<T, Self::Error> {
        T::decode(&mut bytes)
    }
}

/// Encode trait.
pub trait Encode<C: Codec> {
    /// Encodes into a `impl Write`.
    fn encode<W: Write>(&self, w: &mut W) -> Result<(), C::Error>;
}

/// Decode trait.
pub trait Decode<C: Codec>: Sized {
    /// Decode from an `impl Read`.
    fn decode<R: Read>(r: &mut R) -> Result<Self, C::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use thiserror::Error;

    struct CodecImpl;

    #[derive(Debug, Error)]
    enum CodecImplError {
        #[error("can only encode an empty document")]
        NotEmpty,
        #[error("io: {0}")]
        Io(#[from] std::io::Error),
    }

    impl Codec for CodecImpl {
        type Error = CodecImplError;
    }

    impl Encode<CodecImpl> for Document {
        fn encode<W: Write>(&self, w: &mut W) -> Result<(), <CodecImpl as Codec>::Error> {
            if *self == Document::default() {
                Ok(w.write_all(&[0])?)
            } else {
                Err(CodecImplError::NotEmpty)
            }
        }
    }

    impl Decode<CodecImpl> for Document {
        fn decode<R: Read>(r: &mut R) -> Result<Self, <CodecImpl as Codec>::Error> {
            let mut buf = [0; 1];
            r.read_exact(&mut buf)?;
            if buf[0] == 0 {
                Ok(Document::default())
            } else {
                Err(CodecImplError::NotEmpty)
            }
        }
    }

    #[test]
    fn test_codec() {
        let bytes = CodecImpl::encode(&Document::default()).unwrap();
        let document: Document = CodecImpl::decode(&bytes).unwrap();
        assert_eq!(document, Document::default());
    }
}
