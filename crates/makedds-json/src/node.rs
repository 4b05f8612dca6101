//! JSON document nodes.

use std::ops::Range;

/// Index of a node inside a [`NodePool`](crate::NodePool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// A byte range inside the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    #[inline]
    pub const fn end(self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub const fn range(self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// The discriminant of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
}

impl JsonType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }

    /// Whether nodes of this type own children.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

/// The payload of a node. Strings refer to the document text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonValue {
    Object,
    Array,
    String(Span),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    Null,
}

impl JsonValue {
    pub const fn json_type(&self) -> JsonType {
        match self {
            Self::Object => JsonType::Object,
            Self::Array => JsonType::Array,
            Self::String(_) => JsonType::String,
            Self::Integer(_) => JsonType::Integer,
            Self::Number(_) => JsonType::Number,
            Self::Boolean(_) => JsonType::Boolean,
            Self::Null => JsonType::Null,
        }
    }
}

/// A single value in the tree, linked to its parent, next sibling and children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsonNode {
    pub parent: Option<NodeId>,
    pub next: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    /// Present when the node is a member of an object.
    pub key: Option<Span>,
    pub value: JsonValue,
}

impl JsonNode {
    /// An unlinked node.
    pub const fn new(key: Option<Span>, value: JsonValue) -> Self {
        Self {
            parent: None,
            next: None,
            first_child: None,
            last_child: None,
            key,
            value,
        }
    }

    #[inline]
    pub const fn json_type(&self) -> JsonType {
        self.value.json_type()
    }
}
