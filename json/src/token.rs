//! Token layer over parsed json values.
use crate::{JsonError, JsonResult};
use serde_json::Value;
use std::collections::VecDeque;

/// One token of a flattened json document.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// Start of an object.
    ObjectStart,
    /// End of an object.
    ObjectEnd,
    /// Start of an array.
    ArrayStart,
    /// End of an array.
    ArrayEnd,
    /// A field name inside an object.
    Field(String),
    /// A scalar value: null, bool, number or string.
    Scalar(Value),
}

impl Token {
    /// Returns a short description used in parse errors.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::ObjectStart => "object start",
            Self::ObjectEnd => "object end",
            Self::ArrayStart => "array start",
            Self::ArrayEnd => "array end",
            Self::Field(_) => "field name",
            Self::Scalar(_) => "scalar value",
        }
    }
}

/// Cursor over a token stream with one token of lookahead.
///
/// The decoder is written against this trait only, so any tokenizer that
/// can produce [`Token`]s in document order can drive it.
pub trait TokenCursor {
    /// Takes the next token, or `None` past the end of the stream.
    fn next(&mut self) -> Option<Token>;

    /// Peeks at the next token without consuming it.
    fn peek(&self) -> Option<&Token>;

    /// Returns the offset of the next token.
    fn pos(&self) -> usize;

    /// Consumes the next token, failing unless it matches `expected`.
    fn expect(&mut self, expected: &Token) -> JsonResult<()> {
        let at = self.pos();
        match self.next() {
            Some(token) if token == *expected => Ok(()),
            Some(token) => Err(JsonError::unexpected(
                expected.describe(),
                token.describe(),
                at,
            )),
            None => Err(JsonError::unexpected(
                expected.describe(),
                "end of stream",
                at,
            )),
        }
    }

    /// Reads one complete value starting at the next token.
    fn read_value(&mut self) -> JsonResult<Value> {
        let at = self.pos();
        match self.next() {
            Some(Token::Scalar(value)) => Ok(value),
            Some(Token::ArrayStart) => {
                let mut items = Vec::new();
                while !matches!(self.peek(), Some(Token::ArrayEnd)) {
                    items.push(self.read_value()?);
                }
                self.next();
                Ok(Value::Array(items))
            }
            Some(Token::ObjectStart) => {
                let mut map = serde_json::Map::new();
                loop {
                    let inner = self.pos();
                    match self.next() {
                        Some(Token::ObjectEnd) => break,
                        Some(Token::Field(name)) => {
                            map.insert(name, self.read_value()?);
                        }
                        Some(token) => {
                            return Err(JsonError::unexpected(
                                "field name",
                                token.describe(),
                                inner,
                            ))
                        }
                        None => {
                            return Err(JsonError::unexpected("field name", "end of stream", inner))
                        }
                    }
                }
                Ok(Value::Object(map))
            }
            Some(token) => Err(JsonError::unexpected("value", token.describe(), at)),
            None => Err(JsonError::unexpected("value", "end of stream", at)),
        }
    }
}

/// Token stream over an already parsed value.
#[derive(Clone, Debug)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
    consumed: usize,
}

impl TokenStream {
    /// Flattens a parsed value into a token stream.
    pub fn from_value(value: Value) -> Self {
        let mut tokens = VecDeque::new();
        push_value(&mut tokens, value);
        Self {
            tokens,
            consumed: 0,
        }
    }

    /// Parses a byte slice and flattens it into a token stream.
    pub fn from_slice(bytes: &[u8]) -> JsonResult<Self> {
        Ok(Self::from_value(serde_json::from_slice(bytes)?))
    }
}

fn push_value(tokens: &mut VecDeque<Token>, value: Value) {
    match value {
        Value::Array(items) => {
            tokens.push_back(Token::ArrayStart);
            for item in items {
                push_value(tokens, item);
            }
            tokens.push_back(Token::ArrayEnd);
        }
        Value::Object(map) => {
            tokens.push_back(Token::ObjectStart);
            for (name, item) in map {
                tokens.push_back(Token::Field(name));
                push_value(tokens, item);
            }
            tokens.push_back(Token::ObjectEnd);
        }
        scalar => tokens.push_back(Token::Scalar(scalar)),
    }
}

impl TokenCursor for TokenStream {
    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.pop_front();
        if token.is_some() {
            self.consumed += 1;
        }
        token
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    fn pos(&self) -> usize {
        self.consumed
    }
}
