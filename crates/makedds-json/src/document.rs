//! Parsed JSON documents and read-only node handles.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::node::{JsonNode, JsonType, JsonValue, NodeId, Span};
use crate::parser;
use crate::pool::{append, release_tree, Arena, NodePool};

/// A JSON tree together with the text its strings point into.
///
/// Dropping the document releases every node back to its pool.
pub struct JsonDocument<P: NodePool = Arena> {
    text: Vec<u8>,
    pool: P,
    root: Option<NodeId>,
}

impl JsonDocument<Arena> {
    /// Parse a document using the default [`Arena`] pool.
    pub fn parse(text: impl Into<Vec<u8>>) -> Result<Self> {
        Self::parse_with_pool(text, Arena::new())
    }

    /// Load and parse a text file. A leading byte-order mark is ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = makedds_common::load_text(path)?;
        Self::parse(text.into_bytes())
    }
}

impl<P: NodePool> JsonDocument<P> {
    /// Parse a document, allocating nodes from `pool`.
    ///
    /// Parsing stops at the end of `text` or at the first NUL byte.
    pub fn parse_with_pool(text: impl Into<Vec<u8>>, mut pool: P) -> Result<Self> {
        let mut text = text.into();
        let root = parser::parse(&mut text, &mut pool)?;
        Ok(Self {
            text,
            pool,
            root: Some(root),
        })
    }

    /// A document with no nodes, for building trees by hand.
    pub fn new_empty(pool: P) -> Self {
        Self {
            text: Vec::new(),
            pool,
            root: None,
        }
    }

    /// Append `bytes` to the document text, returning their span.
    pub fn push_text(&mut self, bytes: &[u8]) -> Span {
        let span = Span::new(self.text.len(), bytes.len());
        self.text.extend_from_slice(bytes);
        span
    }

    /// Insert a node. With no `parent` the node becomes the root.
    pub fn insert(
        &mut self,
        parent: Option<NodeId>,
        key: Option<Span>,
        value: JsonValue,
    ) -> Result<NodeId> {
        if parent.is_none() && self.root.is_some() {
            return Err(Error::RootExists);
        }
        if let Some(parent) = parent {
            if self.pool.get(parent).is_none() {
                return Err(Error::InvalidNode(parent.raw()));
            }
        }

        let id = self
            .pool
            .allocate(JsonNode::new(key, value))
            .ok_or(Error::PoolExhausted)?;
        match parent {
            Some(parent) => {
                append(&mut self.pool, parent, id);
            }
            None => self.root = Some(id),
        }
        Ok(id)
    }

    /// The root value, if the document has one.
    pub fn root(&self) -> Option<JsonItem<'_, P>> {
        self.root.and_then(|id| self.item(id))
    }

    /// A handle to any live node.
    pub fn item(&self, id: NodeId) -> Option<JsonItem<'_, P>> {
        self.pool.get(id).map(|node| JsonItem {
            doc: self,
            id,
            node,
        })
    }

    /// The (unescaped) document text.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    fn span_bytes(&self, span: Span) -> &[u8] {
        self.text.get(span.range()).unwrap_or_default()
    }
}

impl<P: NodePool> Drop for JsonDocument<P> {
    fn drop(&mut self) {
        if let Some(root) = self.root.take() {
            release_tree(&mut self.pool, root);
        }
    }
}

impl<P: NodePool> fmt::Debug for JsonDocument<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonDocument")
            .field("text_len", &self.text.len())
            .field("root", &self.root)
            .finish()
    }
}

/// A borrowed view of one node.
pub struct JsonItem<'a, P: NodePool = Arena> {
    doc: &'a JsonDocument<P>,
    id: NodeId,
    node: &'a JsonNode,
}

impl<P: NodePool> Clone for JsonItem<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: NodePool> Copy for JsonItem<'_, P> {}

impl<P: NodePool> fmt::Debug for JsonItem<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonItem")
            .field("id", &self.id)
            .field("key", &self.key())
            .field("value", &self.node.value)
            .finish()
    }
}

impl<'a, P: NodePool> JsonItem<'a, P> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &'a JsonNode {
        self.node
    }

    pub fn value(&self) -> JsonValue {
        self.node.value
    }

    pub fn json_type(&self) -> JsonType {
        self.node.json_type()
    }

    /// Member key bytes, present for object members.
    pub fn key_bytes(&self) -> Option<&'a [u8]> {
        self.node.key.map(|span| self.doc.span_bytes(span))
    }

    pub fn key(&self) -> Option<&'a str> {
        self.key_bytes().and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Raw bytes of a string value.
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self.node.value {
            JsonValue::String(span) => Some(self.doc.span_bytes(span)),
            _ => None,
        }
    }

    /// A string value, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_bytes().and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.node.value {
            JsonValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    /// Numeric value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self.node.value {
            JsonValue::Integer(value) => Some(value as f64),
            JsonValue::Number(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.node.value {
            JsonValue::Boolean(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.node.value, JsonValue::Null)
    }

    pub fn parent(&self) -> Option<JsonItem<'a, P>> {
        self.node.parent.and_then(|id| self.doc.item(id))
    }

    pub fn children(&self) -> Children<'a, P> {
        Children {
            doc: self.doc,
            next: self.node.first_child,
        }
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children().count()
    }

    pub fn is_empty(&self) -> bool {
        self.node.first_child.is_none()
    }

    /// First member whose key equals `key`.
    pub fn get(&self, key: &str) -> Option<JsonItem<'a, P>> {
        self.children()
            .find(|child| child.key_bytes() == Some(key.as_bytes()))
    }

    /// First member whose key equals `key`, ignoring ASCII case.
    pub fn get_ignore_case(&self, key: &str) -> Option<JsonItem<'a, P>> {
        self.children().find(|child| {
            child
                .key_bytes()
                .is_some_and(|k| k.eq_ignore_ascii_case(key.as_bytes()))
        })
    }
}

/// Iterator over the children of a node, in document order.
pub struct Children<'a, P: NodePool = Arena> {
    doc: &'a JsonDocument<P>,
    next: Option<NodeId>,
}

impl<'a, P: NodePool> Iterator for Children<'a, P> {
    type Item = JsonItem<'a, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.doc.item(self.next?)?;
        self.next = item.node.next;
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::Write;
    use std::rc::Rc;

    use super::*;
    use crate::{BumpPool, ParseErrorKind};

    /// Arena that records every allocate and release call.
    struct CountingPool {
        inner: Arena,
        allocated: Rc<Cell<usize>>,
        released: Rc<Cell<usize>>,
    }

    impl CountingPool {
        fn new() -> (Self, Rc<Cell<usize>>, Rc<Cell<usize>>) {
            let allocated = Rc::new(Cell::new(0));
            let released = Rc::new(Cell::new(0));
            let pool = Self {
                inner: Arena::new(),
                allocated: Rc::clone(&allocated),
                released: Rc::clone(&released),
            };
            (pool, allocated, released)
        }
    }

    impl NodePool for CountingPool {
        fn allocate(&mut self, node: JsonNode) -> Option<NodeId> {
            let id = self.inner.allocate(node)?;
            self.allocated.set(self.allocated.get() + 1);
            Some(id)
        }

        fn release(&mut self, id: NodeId) {
            self.released.set(self.released.get() + 1);
            self.inner.release(id);
        }

        fn get(&self, id: NodeId) -> Option<&JsonNode> {
            self.inner.get(id)
        }

        fn get_mut(&mut self, id: NodeId) -> Option<&mut JsonNode> {
            self.inner.get_mut(id)
        }
    }

    fn parse_kind(text: &str) -> ParseErrorKind {
        JsonDocument::parse(text)
            .unwrap_err()
            .parse_kind()
            .unwrap()
    }

    #[test]
    fn test_value_types_follow_syntax() {
        let doc = JsonDocument::parse(
            r#"{"s": "text", "t": TRUE, "f": false, "n": Null, "i": -12, "x": 1.5e2, "a": [1, 2], "o": {}}"#,
        )
        .unwrap();
        let root = doc.root().unwrap();

        let types: Vec<_> = root.children().map(|c| c.json_type()).collect();
        assert_eq!(
            types,
            [
                JsonType::String,
                JsonType::Boolean,
                JsonType::Boolean,
                JsonType::Null,
                JsonType::Integer,
                JsonType::Number,
                JsonType::Array,
                JsonType::Object,
            ]
        );
        assert_eq!(root.get("s").unwrap().as_str(), Some("text"));
        assert_eq!(root.get("t").unwrap().as_bool(), Some(true));
        assert_eq!(root.get("i").unwrap().as_i64(), Some(-12));
        assert_eq!(root.get("i").unwrap().as_f64(), Some(-12.0));
        assert_eq!(root.get("x").unwrap().as_f64(), Some(150.0));
        assert!(root.get("n").unwrap().is_null());
        assert_eq!(root.get("a").unwrap().len(), 2);
        assert!(root.get("o").unwrap().is_empty());
    }

    #[test]
    fn test_array_children_have_no_keys() {
        let doc = JsonDocument::parse(r#"["a", 'b', 3]"#).unwrap();
        let root = doc.root().unwrap();
        assert!(root.children().all(|c| c.key().is_none()));
        let parent = root.children().last().unwrap().parent().unwrap();
        assert_eq!(parent.id(), root.id());
    }

    #[test]
    fn test_alternate_separators_and_quotes() {
        let doc = JsonDocument::parse("{'Width' = 4,\n 'Format': 'R8_UNORM'}").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.get("Width").unwrap().as_i64(), Some(4));
        assert_eq!(root.get_ignore_case("format").unwrap().as_str(), Some("R8_UNORM"));
        assert!(root.get("format").is_none());
    }

    #[test]
    fn test_escapes_are_unescaped_in_place() {
        let doc = JsonDocument::parse(r#"["a\"b\\c\/d\n\t", "Aé€"]"#).unwrap();
        let mut values = doc.root().unwrap().children();
        assert_eq!(values.next().unwrap().as_str(), Some("a\"b\\c/d\n\t"));
        assert_eq!(values.next().unwrap().as_str(), Some("Aé€"));
    }

    #[test]
    fn test_u007f_is_a_single_byte() {
        let doc = JsonDocument::parse(r#"["\u007F"]"#).unwrap();
        let value = doc.root().unwrap().children().next().unwrap();
        assert_eq!(value.as_bytes(), Some(&[0x7F][..]));
    }

    #[test]
    fn test_surrogate_escape_is_not_utf8() {
        let doc = JsonDocument::parse(r#"["\uD800"]"#).unwrap();
        let value = doc.root().unwrap().children().next().unwrap();
        assert_eq!(value.as_bytes().map(<[u8]>::len), Some(3));
        assert!(value.as_str().is_none());
    }

    #[test]
    fn test_empty_input_is_null_root() {
        for text in ["", "  \r\n\t "] {
            let doc = JsonDocument::parse(text).unwrap();
            assert!(doc.root().unwrap().is_null());
        }
    }

    #[test]
    fn test_parsing_stops_at_nul() {
        let doc = JsonDocument::parse(&b"[1]\0garbage"[..]).unwrap();
        assert_eq!(doc.root().unwrap().len(), 1);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(parse_kind("[] []"), ParseErrorKind::MultipleRoots);
        assert_eq!(parse_kind("{} 1"), ParseErrorKind::MultipleRoots);
        assert_eq!(parse_kind("[}"), ParseErrorKind::BracketMismatch);
        assert_eq!(parse_kind("]"), ParseErrorKind::BracketMismatch);
        assert_eq!(parse_kind(": 1"), ParseErrorKind::UnexpectedSeparator);
        assert_eq!(parse_kind("[1 : 2]"), ParseErrorKind::UnexpectedSeparator);
        assert_eq!(parse_kind(", []"), ParseErrorKind::UnexpectedSeparator);
        assert_eq!(parse_kind("\"root\""), ParseErrorKind::UnexpectedQuote);
        assert_eq!(parse_kind("true"), ParseErrorKind::UnexpectedCharacter);
        assert_eq!(parse_kind("[#]"), ParseErrorKind::UnexpectedCharacter);
        assert_eq!(parse_kind("[\"a\tb\"]"), ParseErrorKind::ControlCharacter);
        assert_eq!(parse_kind(r#"["\u12G4"]"#), ParseErrorKind::InvalidCodepoint);
        assert_eq!(parse_kind(r#"["\u12"]"#), ParseErrorKind::InvalidCodepoint);
        assert_eq!(parse_kind(r#"["\q"]"#), ParseErrorKind::InvalidEscape);
        assert_eq!(parse_kind("[nil]"), ParseErrorKind::UnknownIdentifier);
        assert_eq!(parse_kind("[12x]"), ParseErrorKind::BadInteger);
        assert_eq!(parse_kind("[99999999999999999999]"), ParseErrorKind::BadInteger);
        assert_eq!(parse_kind("[1.2.3]"), ParseErrorKind::BadNumber);
        assert_eq!(parse_kind("{1}"), ParseErrorKind::MissingKey);
        assert_eq!(parse_kind(r#"{"a":}"#), ParseErrorKind::MissingValue);
        assert_eq!(parse_kind(r#"{"a", "b": 1}"#), ParseErrorKind::MissingValue);
        assert_eq!(parse_kind(r#"["abc"#), ParseErrorKind::UnterminatedString);
        assert_eq!(parse_kind(r#"{"a": [1, 2]"#), ParseErrorKind::Unclosed);
    }

    #[test]
    fn test_error_position() {
        let err = JsonDocument::parse("{\n  \"a\": 1,\n  \"b\": ?\n}").unwrap_err();
        match err {
            Error::Parse { kind, offset, line } => {
                assert_eq!(kind, ParseErrorKind::UnexpectedCharacter);
                assert_eq!(offset, 19);
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_escaped_newline_does_not_count_as_line() {
        let err = JsonDocument::parse("[\"a\\nb\", #]").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_failed_parse_releases_every_node() {
        for text in [
            r#"{"a": [1, 2, {"b": "unterminated"#,
            r#"{"a": [1, 2]] "#,
            r#"{"a": {"b": [true, nope]}}"#,
            r#"[[1], [2]] [3]"#,
            r#"{"a": [1, 2, 3]"#,
        ] {
            let (pool, allocated, released) = CountingPool::new();
            assert!(JsonDocument::parse_with_pool(text, pool).is_err(), "{text}");
            assert!(allocated.get() > 0, "{text}");
            assert_eq!(allocated.get(), released.get(), "{text}");
        }
    }

    #[test]
    fn test_drop_releases_every_node() {
        let (pool, allocated, released) = CountingPool::new();
        let doc = JsonDocument::parse_with_pool(r#"{"a": [1, [2, 3]], "b": {"c": null}}"#, pool).unwrap();
        assert_eq!(allocated.get(), 8);
        assert_eq!(released.get(), 0);
        drop(doc);
        assert_eq!(released.get(), 8);
    }

    #[test]
    fn test_pool_exhaustion() {
        let err = JsonDocument::parse_with_pool("[1, 2, 3]", Arena::with_limit(2)).unwrap_err();
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::OutOfMemory));
    }

    #[test]
    fn test_bump_pool() {
        let doc = JsonDocument::parse_with_pool(r#"{"a": [1, 2]}"#, BumpPool::new()).unwrap();
        assert_eq!(doc.pool().len(), 4);
        assert_eq!(doc.root().unwrap().get("a").unwrap().len(), 2);
    }

    #[test]
    fn test_build_by_hand() {
        let mut doc = JsonDocument::new_empty(Arena::new());
        assert!(doc.root().is_none());

        let root = doc.insert(None, None, JsonValue::Object).unwrap();
        let key = doc.push_text(b"Files");
        let files = doc.insert(Some(root), Some(key), JsonValue::Array).unwrap();
        let name = doc.push_text(b"face.png");
        doc.insert(Some(files), None, JsonValue::String(name)).unwrap();

        assert!(matches!(doc.insert(None, None, JsonValue::Null), Err(Error::RootExists)));

        let files = doc.root().unwrap().get("Files").unwrap();
        assert_eq!(files.children().next().unwrap().as_str(), Some("face.png"));
    }

    #[test]
    fn test_load_with_bom() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xEF\xBB\xBF{\"Cubemap\": true}").unwrap();

        let doc = JsonDocument::load(file.path()).unwrap();
        assert_eq!(doc.root().unwrap().get("Cubemap").unwrap().as_bool(), Some(true));
    }
}
