//! A small streaming JSON tokenizer.
//!
//! Produces structural tokens, strings, literals and numbers; it does not
//! check that the tokens form a valid document. Beyond standard JSON, a
//! doubled quote inside a string (`""`) stands for one quote character.
//! Numbers are an optional `-`, digits and at most one fractional part; no
//! exponents.

use std::iter::Peekable;
use std::str::Chars;

use relalg_core::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    StartArray,
    EndArray,
    StartObject,
    EndObject,
    Comma,
    Colon,
    String,
    True,
    False,
    Null,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonToken {
    pub kind: JsonType,
    /// Literal text; unescaped contents for strings.
    pub text: String,
}

impl JsonToken {
    fn new(kind: JsonType, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Iterator of tokens over a string. Stops after the first error.
pub struct Tokenizer<'a> {
    input: Peekable<Chars<'a>>,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.chars().peekable(),
            failed: false,
        }
    }

    fn next_token(&mut self) -> Option<Result<JsonToken>> {
        let c = loop {
            let c = self.input.next()?;
            if !c.is_whitespace() {
                break c;
            }
        };
        Some(match c {
            '[' => Ok(JsonToken::new(JsonType::StartArray, "[")),
            ']' => Ok(JsonToken::new(JsonType::EndArray, "]")),
            '{' => Ok(JsonToken::new(JsonType::StartObject, "{")),
            '}' => Ok(JsonToken::new(JsonType::EndObject, "}")),
            ',' => Ok(JsonToken::new(JsonType::Comma, ",")),
            ':' => Ok(JsonToken::new(JsonType::Colon, ":")),
            '"' => self.read_string(),
            't' => self.expect("true", JsonType::True),
            'f' => self.expect("false", JsonType::False),
            'n' => self.expect("null", JsonType::Null),
            c if c.is_ascii_digit() || c == '-' => self.read_number(c),
            c => Err(malformed(format!("unexpected character '{}'", c))),
        })
    }

    fn expect(&mut self, word: &'static str, kind: JsonType) -> Result<JsonToken> {
        for want in word.chars().skip(1) {
            match self.input.next() {
                Some(got) if got == want => {}
                Some(got) => {
                    return Err(malformed(format!(
                        "expected '{}' but got '{}' while reading '{}'",
                        want, got, word
                    )))
                }
                None => return Err(malformed(format!("unexpected end of input while reading '{}'", word))),
            }
        }
        Ok(JsonToken::new(kind, word))
    }

    fn read_string(&mut self) -> Result<JsonToken> {
        let mut buf = String::new();
        loop {
            let c = self
                .input
                .next()
                .ok_or_else(|| malformed("expected closing quote of string but did not find one"))?;
            match c {
                '"' => {
                    if self.input.peek() != Some(&'"') {
                        return Ok(JsonToken::new(JsonType::String, buf));
                    }
                    self.input.next();
                    buf.push('"');
                }
                '\\' => {
                    let escaped = match self.input.next() {
                        Some('/') => '/',
                        Some('\\') => '\\',
                        Some('"') => '"',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        _ => return Err(malformed("expected escape sequence in string")),
                    };
                    buf.push(escaped);
                }
                '\r' | '\n' => {
                    return Err(malformed("expected closing quote of string but found end of line"))
                }
                c => buf.push(c),
            }
        }
    }

    fn read_number(&mut self, first: char) -> Result<JsonToken> {
        let mut buf = String::from(first);
        self.take_digits(&mut buf);
        if self.input.peek() != Some(&'.') {
            if buf == "-" {
                return Err(malformed("expected digits after '-'"));
            }
            return Ok(JsonToken::new(JsonType::Number, buf));
        }
        if buf == "-" {
            return Err(malformed("expected whole number part before the decimal point"));
        }
        self.input.next();
        buf.push('.');
        self.take_digits(&mut buf);
        match self.input.peek() {
            Some('.') => Err(malformed("expected fractional number part but got another decimal point")),
            _ if buf.ends_with('.') => Err(malformed("expected fractional number part after the decimal point")),
            _ => Ok(JsonToken::new(JsonType::Number, buf)),
        }
    }

    fn take_digits(&mut self, buf: &mut String) {
        while let Some(&c) = self.input.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            buf.push(c);
            self.input.next();
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<JsonToken>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let token = self.next_token();
        if matches!(token, Some(Err(_))) {
            self.failed = true;
        }
        token
    }
}

fn malformed(msg: impl Into<String>) -> Error {
    Error::MalformedInput(msg.into())
}
