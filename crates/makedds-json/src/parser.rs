//! Single-pass JSON parser.
//!
//! There is no tokenizer and no explicit stack: `top` is the innermost open
//! container and walks up to its parent when the container closes. A key
//! seen inside an object is held in `name` until the value that follows it.

use makedds_common::memchr::memchr;

use crate::error::{Error, ParseErrorKind, Result};
use crate::node::{JsonNode, JsonType, JsonValue, NodeId, Span};
use crate::pool::{append, release_tree, NodePool};

/// Parse `text` into nodes allocated from `pool`.
///
/// On failure every node allocated so far has been released.
pub(crate) fn parse<P: NodePool + ?Sized>(text: &mut [u8], pool: &mut P) -> Result<NodeId> {
    let mut parser = Parser::new(text, pool);
    match parser.run() {
        Ok(root) => Ok(root),
        Err(err) => {
            if let Some(root) = parser.root {
                release_tree(parser.pool, root);
            }
            Err(err)
        }
    }
}

struct Parser<'t, 'p, P: NodePool + ?Sized> {
    text: &'t mut [u8],
    end: usize,
    pos: usize,
    line: usize,
    pool: &'p mut P,
    root: Option<NodeId>,
    top: Option<NodeId>,
    name: Option<Span>,
}

impl<'t, 'p, P: NodePool + ?Sized> Parser<'t, 'p, P> {
    fn new(text: &'t mut [u8], pool: &'p mut P) -> Self {
        let end = memchr(0, text).unwrap_or(text.len());
        Self {
            text,
            end,
            pos: 0,
            line: 1,
            pool,
            root: None,
            top: None,
            name: None,
        }
    }

    fn run(&mut self) -> Result<NodeId> {
        self.skip_whitespace();
        while self.pos < self.end {
            match self.text[self.pos] {
                open @ (b'{' | b'[') => self.open(open)?,
                close @ (b'}' | b']') => self.close(close)?,
                b':' | b'=' => {
                    if self.top_type() != Some(JsonType::Object) {
                        return Err(self.error(ParseErrorKind::UnexpectedSeparator));
                    }
                    self.pos += 1;
                }
                b',' => {
                    if self.top.is_none() {
                        return Err(self.error(ParseErrorKind::UnexpectedSeparator));
                    }
                    if self.name.is_some() {
                        return Err(self.error(ParseErrorKind::MissingValue));
                    }
                    self.pos += 1;
                }
                quote @ (b'"' | b'\'') => self.string(quote)?,
                b'n' | b'N' | b't' | b'T' | b'f' | b'F' => self.identifier()?,
                b'-' | b'+' | b'0'..=b'9' => self.number()?,
                _ => return Err(self.error(ParseErrorKind::UnexpectedCharacter)),
            }
            self.skip_whitespace();
        }

        if self.top.is_some() {
            return Err(self.error(ParseErrorKind::Unclosed));
        }

        match self.root {
            Some(root) => Ok(root),
            None => {
                let root = self
                    .pool
                    .allocate(JsonNode::new(None, JsonValue::Null))
                    .ok_or_else(|| self.error(ParseErrorKind::OutOfMemory))?;
                Ok(root)
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.end {
            match self.text[self.pos] {
                b'\n' => self.line += 1,
                b' ' | b'\t' | b'\r' => {}
                _ => break,
            }
            self.pos += 1;
        }
    }

    fn error(&self, kind: ParseErrorKind) -> Error {
        self.error_at(kind, self.pos)
    }

    fn error_at(&self, kind: ParseErrorKind, offset: usize) -> Error {
        Error::Parse {
            kind,
            offset,
            line: self.line,
        }
    }

    fn top_type(&self) -> Option<JsonType> {
        self.top
            .and_then(|top| self.pool.get(top))
            .map(JsonNode::json_type)
    }

    /// Error for a value that appears outside any container.
    fn no_container(&self, kind: ParseErrorKind) -> Error {
        if self.root.is_some() {
            self.error(ParseErrorKind::MultipleRoots)
        } else {
            self.error(kind)
        }
    }

    /// Allocate a value node and link it under the current container.
    fn attach(&mut self, value: JsonValue, offset: usize) -> Result<NodeId> {
        let Some(top) = self.top else {
            return Err(self.no_container(ParseErrorKind::UnexpectedCharacter));
        };
        let key = self.name.take();
        if key.is_none() && self.top_type() == Some(JsonType::Object) {
            return Err(self.error_at(ParseErrorKind::MissingKey, offset));
        }
        let id = self
            .pool
            .allocate(JsonNode::new(key, value))
            .ok_or_else(|| self.error_at(ParseErrorKind::OutOfMemory, offset))?;
        append(self.pool, top, id);
        Ok(id)
    }

    fn open(&mut self, bracket: u8) -> Result<()> {
        let value = if bracket == b'{' {
            JsonValue::Object
        } else {
            JsonValue::Array
        };

        let id = if self.top.is_some() {
            self.attach(value, self.pos)?
        } else if self.root.is_none() {
            let id = self
                .pool
                .allocate(JsonNode::new(None, value))
                .ok_or_else(|| self.error(ParseErrorKind::OutOfMemory))?;
            self.root = Some(id);
            id
        } else {
            return Err(self.error(ParseErrorKind::MultipleRoots));
        };

        self.top = Some(id);
        self.pos += 1;
        Ok(())
    }

    fn close(&mut self, bracket: u8) -> Result<()> {
        let expected = if bracket == b'}' {
            JsonType::Object
        } else {
            JsonType::Array
        };
        let Some(top) = self.top.filter(|_| self.top_type() == Some(expected)) else {
            return Err(self.error(ParseErrorKind::BracketMismatch));
        };
        if self.name.is_some() {
            return Err(self.error(ParseErrorKind::MissingValue));
        }
        self.top = self.pool.get(top).and_then(|node| node.parent);
        self.pos += 1;
        Ok(())
    }

    /// Scan a quoted string, unescaping it in place.
    fn string(&mut self, quote: u8) -> Result<()> {
        if self.top.is_none() {
            return Err(self.no_container(ParseErrorKind::UnexpectedQuote));
        }
        let opening = self.pos;
        self.pos += 1;
        let start = self.pos;
        let mut write = start;

        loop {
            if self.pos >= self.end {
                return Err(self.error_at(ParseErrorKind::UnterminatedString, opening));
            }
            let ch = self.text[self.pos];
            if ch < 0x20 {
                return Err(self.error(ParseErrorKind::ControlCharacter));
            } else if ch == b'\\' {
                if self.pos + 1 >= self.end {
                    return Err(self.error_at(ParseErrorKind::UnterminatedString, opening));
                }
                let unescaped = match self.text[self.pos + 1] {
                    b'"' => b'"',
                    b'\'' => b'\'',
                    b'\\' => b'\\',
                    b'/' => b'/',
                    b'b' => 0x08,
                    b'f' => 0x0C,
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'n' => b'\n',
                    b'u' => {
                        let cp = self.hex4(self.pos + 2)?;
                        write += encode_utf8(cp, &mut self.text[write..]);
                        self.pos += 6;
                        continue;
                    }
                    _ => return Err(self.error(ParseErrorKind::InvalidEscape)),
                };
                self.text[write] = unescaped;
                write += 1;
                self.pos += 2;
            } else if ch == quote {
                self.pos += 1;
                break;
            } else {
                self.text[write] = ch;
                write += 1;
                self.pos += 1;
            }
        }

        let span = Span::new(start, write - start);
        if self.name.is_none() && self.top_type() == Some(JsonType::Object) {
            self.name = Some(span);
        } else {
            self.attach(JsonValue::String(span), opening)?;
        }
        Ok(())
    }

    fn hex4(&self, at: usize) -> Result<u32> {
        if at + 4 > self.end {
            return Err(self.error(ParseErrorKind::InvalidCodepoint));
        }
        self.text[at..at + 4].iter().try_fold(0u32, |cp, &digit| {
            let value = match digit {
                b'0'..=b'9' => digit - b'0',
                b'a'..=b'f' => digit - b'a' + 10,
                b'A'..=b'F' => digit - b'A' + 10,
                _ => return Err(self.error(ParseErrorKind::InvalidCodepoint)),
            };
            Ok((cp << 4) | u32::from(value))
        })
    }

    fn identifier(&mut self) -> Result<()> {
        if self.top.is_none() {
            return Err(self.no_container(ParseErrorKind::UnexpectedCharacter));
        }
        let rest = &self.text[self.pos..self.end];
        let matches = |word: &[u8]| rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word);

        let (value, len) = if matches(b"null") {
            (JsonValue::Null, 4)
        } else if matches(b"true") {
            (JsonValue::Boolean(true), 4)
        } else if matches(b"false") {
            (JsonValue::Boolean(false), 5)
        } else {
            return Err(self.error(ParseErrorKind::UnknownIdentifier));
        };

        self.attach(value, self.pos)?;
        self.pos += len;
        Ok(())
    }

    fn number(&mut self) -> Result<()> {
        if self.top.is_none() {
            return Err(self.no_container(ParseErrorKind::UnexpectedCharacter));
        }
        let first = self.pos;
        let mut is_float = false;
        while self.pos < self.end {
            match self.text[self.pos] {
                b' ' | b'\t' | b'\r' | b'\n' | b',' | b']' | b'}' => break,
                b'.' | b'e' | b'E' => is_float = true,
                _ => {}
            }
            self.pos += 1;
        }

        let literal = &self.text[first..self.pos];
        let value = if is_float {
            parse_f64(literal)
                .map(JsonValue::Number)
                .ok_or_else(|| self.error_at(ParseErrorKind::BadNumber, first))?
        } else {
            parse_i64(literal)
                .map(JsonValue::Integer)
                .ok_or_else(|| self.error_at(ParseErrorKind::BadInteger, first))?
        };

        self.attach(value, first)?;
        Ok(())
    }
}

/// Write `cp` as UTF-8 into `dst`, returning the byte count.
///
/// Surrogate halves are written in their three-byte form.
fn encode_utf8(cp: u32, dst: &mut [u8]) -> usize {
    if cp <= 0x7F {
        dst[0] = cp as u8;
        1
    } else if cp <= 0x7FF {
        dst[0] = 0xC0 | (cp >> 6) as u8;
        dst[1] = 0x80 | (cp & 0x3F) as u8;
        2
    } else {
        dst[0] = 0xE0 | (cp >> 12) as u8;
        dst[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
        dst[2] = 0x80 | (cp & 0x3F) as u8;
        3
    }
}

fn parse_i64(literal: &[u8]) -> Option<i64> {
    let (negative, digits) = match literal.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, literal),
    };
    if digits.is_empty() {
        return None;
    }
    digits.iter().try_fold(0i64, |acc, &digit| {
        if !digit.is_ascii_digit() {
            return None;
        }
        let digit = i64::from(digit - b'0');
        let acc = acc.checked_mul(10)?;
        if negative {
            acc.checked_sub(digit)
        } else {
            acc.checked_add(digit)
        }
    })
}

/// Accepts `[+-]digits[.digits][(e|E)[+-]digits]` with at least one mantissa digit.
fn parse_f64(literal: &[u8]) -> Option<f64> {
    let mut rest = literal;
    if let Some((b'+' | b'-', tail)) = rest.split_first() {
        rest = tail;
    }

    let leading = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    rest = &rest[leading..];
    let mut fraction = 0;
    if let Some((b'.', tail)) = rest.split_first() {
        fraction = tail.iter().take_while(|b| b.is_ascii_digit()).count();
        rest = &tail[fraction..];
    }
    if leading + fraction == 0 {
        return None;
    }

    if let Some((b'e' | b'E', tail)) = rest.split_first() {
        rest = tail;
        if let Some((b'+' | b'-', tail)) = rest.split_first() {
            rest = tail;
        }
        let exponent = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        if exponent == 0 {
            return None;
        }
        rest = &rest[exponent..];
    }
    if !rest.is_empty() {
        return None;
    }

    std::str::from_utf8(literal).ok()?.parse().ok()
}
