//! Token stream decoder for documents.
use crate::token::{Token, TokenCursor, TokenStream};
use crate::{JsonError, JsonResult, EMBEDDED_FIELD, LINKS_FIELD, PAGE_FIELD, TEMPLATES_FIELD};
use halforms_core::document::{Document, OneOrMany, PageMetadata};
use halforms_core::indexmap::IndexMap;
use halforms_core::link::Link;
use halforms_core::template::{Template, Templates};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Read;
use std::marker::PhantomData;

/// Decodes the values of the embedded section.
///
/// The decoder itself cannot know what an embedded value is supposed to
/// be, so resolving its shape is delegated through this trait.
pub trait ContentDecoder {
    /// Decodes one embedded value, `at` being its token offset.
    fn decode_value(&self, value: Value, at: usize) -> JsonResult<Value>;
}

/// Content decoder that passes every value through unchecked.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawContent;

impl ContentDecoder for RawContent {
    fn decode_value(&self, value: Value, _at: usize) -> JsonResult<Value> {
        Ok(value)
    }
}

/// Content decoder validating every value against a payload type.
#[derive(Clone, Copy, Debug)]
pub struct TypedContent<T>(PhantomData<T>);

impl<T> TypedContent<T> {
    /// Creates the typed content decoder.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for TypedContent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> ContentDecoder for TypedContent<T> {
    fn decode_value(&self, value: Value, at: usize) -> JsonResult<Value> {
        if let Err(err) = T::deserialize(&value) {
            return Err(JsonError::unexpected("embedded content", err.to_string(), at));
        }
        Ok(value)
    }
}

/// Wire form of one link, relation and affordances excluded.
///
/// Unknown attributes are skipped; a missing href is malformed.
#[derive(Deserialize)]
struct LinkObject {
    href: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Document decoder over an abstract token cursor.
///
/// The caller consumes the opening object token, `decode_document` walks
/// fields until the matching object end. Decoding never recovers: the
/// first grammar violation aborts the whole document.
pub struct Decoder<'a, C> {
    cursor: C,
    content: Option<&'a dyn ContentDecoder>,
}

impl<'a, C: TokenCursor> Decoder<'a, C> {
    /// Creates a decoder without embedded content support.
    ///
    /// Hitting an `_embedded` section fails with
    /// [`JsonError::MissingTypeContext`].
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            content: None,
        }
    }

    /// Creates a decoder resolving embedded values through `content`.
    pub fn with_content(cursor: C, content: &'a dyn ContentDecoder) -> Self {
        Self {
            cursor,
            content: Some(content),
        }
    }

    /// Decodes the document body after the opening object token.
    ///
    /// Reserved fields dispatch into their sections; every other field is
    /// payload and is preserved in encounter order.
    pub fn decode_document(&mut self) -> JsonResult<Document> {
        let mut document = Document::default();
        let mut payload = Map::new();
        loop {
            let at = self.cursor.pos();
            match self.cursor.next() {
                Some(Token::ObjectEnd) => break,
                Some(Token::Field(name)) => {
                    if name == LINKS_FIELD {
                        document.links = self.decode_links()?;
                    } else if name == TEMPLATES_FIELD {
                        document.templates = self.decode_templates()?;
                    } else if name == EMBEDDED_FIELD {
                        document.embedded = Some(self.decode_embedded()?);
                    } else if name == PAGE_FIELD {
                        document.page = Some(self.decode_page()?);
                    } else {
                        payload.insert(name, self.cursor.read_value()?);
                    }
                }
                Some(token) => {
                    return Err(JsonError::unexpected("field name", token.describe(), at))
                }
                None => return Err(JsonError::unexpected("field name", "end of stream", at)),
            }
        }
        if !payload.is_empty() {
            document.payload = Some(payload);
        }
        Ok(document)
    }

    fn decode_links(&mut self) -> JsonResult<Vec<Link>> {
        self.cursor.expect(&Token::ObjectStart)?;
        let mut links = Vec::new();
        loop {
            let at = self.cursor.pos();
            match self.cursor.next() {
                Some(Token::ObjectEnd) => break,
                Some(Token::Field(rel)) => {
                    if matches!(self.cursor.peek(), Some(Token::ArrayStart)) {
                        self.cursor.next();
                        while !matches!(self.cursor.peek(), Some(Token::ArrayEnd)) {
                            links.push(self.decode_link(&rel)?);
                        }
                        self.cursor.next();
                    } else {
                        links.push(self.decode_link(&rel)?);
                    }
                }
                Some(token) => {
                    return Err(JsonError::unexpected("relation", token.describe(), at))
                }
                None => return Err(JsonError::unexpected("relation", "end of stream", at)),
            }
        }
        Ok(links)
    }

    fn decode_link(&mut self, rel: &str) -> JsonResult<Link> {
        let at = self.cursor.pos();
        let value = self.cursor.read_value()?;
        let object: LinkObject = serde_json::from_value(value)
            .map_err(|err| JsonError::unexpected("link object", err.to_string(), at))?;
        let mut link = Link::new(rel, object.href);
        link.title = object.title;
        link.name = object.name;
        Ok(link)
    }

    /// Relation keys map to one template or an array of templates. Array
    /// elements share the relation key, so a later element overwrites an
    /// earlier one (last write wins).
    fn decode_templates(&mut self) -> JsonResult<Templates> {
        self.cursor.expect(&Token::ObjectStart)?;
        let mut templates = Templates::new();
        loop {
            let at = self.cursor.pos();
            match self.cursor.next() {
                Some(Token::ObjectEnd) => break,
                Some(Token::Field(key)) => {
                    if matches!(self.cursor.peek(), Some(Token::ArrayStart)) {
                        self.cursor.next();
                        while !matches!(self.cursor.peek(), Some(Token::ArrayEnd)) {
                            let template = self.decode_template(&key)?;
                            templates.insert(key.clone(), template);
                        }
                        self.cursor.next();
                    } else {
                        let template = self.decode_template(&key)?;
                        templates.insert(key, template);
                    }
                }
                Some(token) => {
                    return Err(JsonError::unexpected("relation", token.describe(), at))
                }
                None => return Err(JsonError::unexpected("relation", "end of stream", at)),
            }
        }
        Ok(templates)
    }

    fn decode_template(&mut self, key: &str) -> JsonResult<Template> {
        let at = self.cursor.pos();
        let value = self.cursor.read_value()?;
        let mut template: Template = serde_json::from_value(value)
            .map_err(|err| JsonError::unexpected("template object", err.to_string(), at))?;
        // The document key is authoritative over anything the nested
        // decode produced.
        template.key = key.into();
        Ok(template)
    }

    fn decode_embedded(&mut self) -> JsonResult<IndexMap<String, OneOrMany<Value>>> {
        let content = match self.content {
            Some(content) => content,
            None => return Err(JsonError::MissingTypeContext),
        };
        self.cursor.expect(&Token::ObjectStart)?;
        let mut embedded = IndexMap::new();
        loop {
            let at = self.cursor.pos();
            match self.cursor.next() {
                Some(Token::ObjectEnd) => break,
                Some(Token::Field(rel)) => {
                    if matches!(self.cursor.peek(), Some(Token::ArrayStart)) {
                        self.cursor.next();
                        let mut values = Vec::new();
                        while !matches!(self.cursor.peek(), Some(Token::ArrayEnd)) {
                            let value_at = self.cursor.pos();
                            let value = self.cursor.read_value()?;
                            values.push(content.decode_value(value, value_at)?);
                        }
                        self.cursor.next();
                        embedded.insert(rel, OneOrMany::Many(values));
                    } else {
                        let value_at = self.cursor.pos();
                        let value = self.cursor.read_value()?;
                        let value = content.decode_value(value, value_at)?;
                        embedded.insert(rel, OneOrMany::One(value));
                    }
                }
                Some(token) => {
                    return Err(JsonError::unexpected("relation", token.describe(), at))
                }
                None => return Err(JsonError::unexpected("relation", "end of stream", at)),
            }
        }
        Ok(embedded)
    }

    fn decode_page(&mut self) -> JsonResult<PageMetadata> {
        let at = self.cursor.pos();
        let value = self.cursor.read_value()?;
        serde_json::from_value(value)
            .map_err(|err| JsonError::unexpected("page metadata", err.to_string(), at))
    }
}

/// Decodes a document from a byte slice, embedded content passed through raw.
pub fn from_slice(bytes: &[u8]) -> JsonResult<Document> {
    decode_with(TokenStream::from_slice(bytes)?, &RawContent)
}

/// Decodes a document from a string, embedded content passed through raw.
pub fn from_str(s: &str) -> JsonResult<Document> {
    from_slice(s.as_bytes())
}

/// Decodes a document from a reader, embedded content passed through raw.
pub fn from_reader<R: Read>(r: &mut R) -> JsonResult<Document> {
    let value: Value = serde_json::from_reader(r)?;
    decode_with(TokenStream::from_value(value), &RawContent)
}

/// Decodes a document, validating embedded content against `T`.
pub fn from_slice_typed<T: DeserializeOwned>(bytes: &[u8]) -> JsonResult<Document> {
    decode_with(TokenStream::from_slice(bytes)?, &TypedContent::<T>::new())
}

fn decode_with<C: TokenCursor>(mut cursor: C, content: &dyn ContentDecoder) -> JsonResult<Document> {
    cursor.expect(&Token::ObjectStart)?;
    Decoder::with_content(cursor, content).decode_document()
}
