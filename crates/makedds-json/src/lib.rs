//! JSON documents for makedds build descriptions.
//!
//! The parser is a single pass over a mutable byte buffer. String values are
//! unescaped in place and stored as [`Span`]s into that buffer, so a parsed
//! document owns exactly one copy of the text plus one fixed-size node per
//! value. Nodes are allocated from a [`NodePool`], which lets hosts supply
//! arena or bump allocation.
//!
//! # Example
//!
//! ```
//! use makedds_json::{JsonDocument, JsonType};
//!
//! let doc = JsonDocument::parse(r#"{"Width": 256, "Mipmaps": true}"#)?;
//! let root = doc.root().unwrap();
//!
//! assert_eq!(root.json_type(), JsonType::Object);
//! assert_eq!(root.get("Width").and_then(|w| w.as_i64()), Some(256));
//! assert_eq!(root.get("Mipmaps").and_then(|m| m.as_bool()), Some(true));
//! # Ok::<(), makedds_json::Error>(())
//! ```

mod document;
mod error;
mod node;
mod parser;
mod pool;

pub use document::{Children, JsonDocument, JsonItem};
pub use error::{Error, ParseErrorKind, Result};
pub use node::{JsonNode, JsonType, JsonValue, NodeId, Span};
pub use pool::{append, Arena, BumpPool, NodePool};
