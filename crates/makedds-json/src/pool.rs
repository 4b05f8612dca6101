//! Node storage.
//!
//! Every node in a document comes from a [`NodePool`]. The parser releases
//! each node it allocated exactly once, either when the document is dropped
//! or when a parse fails part way through.

use crate::node::{JsonNode, NodeId};

/// Fixed-size node allocator used by [`JsonDocument`](crate::JsonDocument).
pub trait NodePool {
    /// Store `node`, returning its id, or `None` when the pool is exhausted.
    fn allocate(&mut self, node: JsonNode) -> Option<NodeId>;

    /// Return a node to the pool.
    fn release(&mut self, id: NodeId);

    fn get(&self, id: NodeId) -> Option<&JsonNode>;

    fn get_mut(&mut self, id: NodeId) -> Option<&mut JsonNode>;
}

/// Default pool. Released slots are kept on a free list and reused.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    slots: Vec<Option<JsonNode>>,
    free: Vec<u32>,
    limit: Option<usize>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// An arena that refuses to hold more than `limit` live nodes.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Number of live nodes.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl NodePool for Arena {
    fn allocate(&mut self, node: JsonNode) -> Option<NodeId> {
        if self.limit.is_some_and(|limit| self.live() >= limit) {
            return None;
        }
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(node);
            return Some(NodeId::new(index));
        }
        let index = u32::try_from(self.slots.len()).ok()?;
        self.slots.push(Some(node));
        Some(NodeId::new(index))
    }

    fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            if slot.take().is_some() {
                self.free.push(id.raw());
            }
        }
    }

    fn get(&self, id: NodeId) -> Option<&JsonNode> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut JsonNode> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }
}

/// Allocate-only pool. `release` does nothing; storage is reclaimed when
/// the pool itself is dropped.
#[derive(Debug, Clone, Default)]
pub struct BumpPool {
    nodes: Vec<JsonNode>,
    limit: Option<usize>,
}

impl BumpPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            limit: None,
        }
    }

    /// A pool that holds at most `limit` nodes over its lifetime.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            nodes: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Number of nodes ever allocated.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl NodePool for BumpPool {
    fn allocate(&mut self, node: JsonNode) -> Option<NodeId> {
        if self.limit.is_some_and(|limit| self.nodes.len() >= limit) {
            return None;
        }
        let index = u32::try_from(self.nodes.len()).ok()?;
        self.nodes.push(node);
        Some(NodeId::new(index))
    }

    fn release(&mut self, _id: NodeId) {}

    fn get(&self, id: NodeId) -> Option<&JsonNode> {
        self.nodes.get(id.index())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut JsonNode> {
        self.nodes.get_mut(id.index())
    }
}

/// Link `child` as the last child of `parent`.
///
/// Returns `false` if either id is not live in `pool`.
pub fn append<P: NodePool + ?Sized>(pool: &mut P, parent: NodeId, child: NodeId) -> bool {
    let Some(previous_last) = pool.get(parent).map(|node| node.last_child) else {
        return false;
    };
    match pool.get_mut(child) {
        Some(node) => node.parent = Some(parent),
        None => return false,
    }
    if let Some(last) = previous_last {
        if let Some(node) = pool.get_mut(last) {
            node.next = Some(child);
        }
    }
    if let Some(node) = pool.get_mut(parent) {
        if node.first_child.is_none() {
            node.first_child = Some(child);
        }
        node.last_child = Some(child);
    }
    true
}

/// Release `root`, its siblings and every descendant.
pub(crate) fn release_tree<P: NodePool + ?Sized>(pool: &mut P, root: NodeId) {
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        let Some(node) = pool.get(id) else {
            continue;
        };
        if let Some(next) = node.next {
            pending.push(next);
        }
        if let Some(child) = node.first_child {
            pending.push(child);
        }
        pool.release(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::JsonValue;

    #[test]
    fn test_arena_reuses_released_slots() {
        let mut arena = Arena::new();
        let a = arena.allocate(JsonNode::new(None, JsonValue::Null)).unwrap();
        let b = arena.allocate(JsonNode::new(None, JsonValue::Boolean(true))).unwrap();
        assert_eq!(arena.live(), 2);

        arena.release(a);
        assert!(arena.get(a).is_none());
        assert_eq!(arena.live(), 1);

        let c = arena.allocate(JsonNode::new(None, JsonValue::Integer(3))).unwrap();
        assert_eq!(c, a);
        assert_eq!(arena.get(b).map(|n| n.value), Some(JsonValue::Boolean(true)));
    }

    #[test]
    fn test_arena_limit() {
        let mut arena = Arena::with_limit(1);
        assert!(arena.allocate(JsonNode::new(None, JsonValue::Null)).is_some());
        assert!(arena.allocate(JsonNode::new(None, JsonValue::Null)).is_none());
    }

    #[test]
    fn test_append_links_siblings() {
        let mut pool = BumpPool::new();
        let parent = pool.allocate(JsonNode::new(None, JsonValue::Array)).unwrap();
        let first = pool.allocate(JsonNode::new(None, JsonValue::Integer(1))).unwrap();
        let second = pool.allocate(JsonNode::new(None, JsonValue::Integer(2))).unwrap();

        assert!(append(&mut pool, parent, first));
        assert!(append(&mut pool, parent, second));

        let node = pool.get(parent).unwrap();
        assert_eq!(node.first_child, Some(first));
        assert_eq!(node.last_child, Some(second));
        assert_eq!(pool.get(first).unwrap().next, Some(second));
        assert_eq!(pool.get(second).unwrap().parent, Some(parent));
    }

    #[test]
    fn test_release_tree_frees_every_node() {
        let mut arena = Arena::new();
        let root = arena.allocate(JsonNode::new(None, JsonValue::Object)).unwrap();
        let inner = arena.allocate(JsonNode::new(None, JsonValue::Array)).unwrap();
        append(&mut arena, root, inner);
        for i in 0..3 {
            let leaf = arena.allocate(JsonNode::new(None, JsonValue::Integer(i))).unwrap();
            append(&mut arena, inner, leaf);
        }
        let tail = arena.allocate(JsonNode::new(None, JsonValue::Null)).unwrap();
        append(&mut arena, root, tail);
        assert_eq!(arena.live(), 6);

        release_tree(&mut arena, root);
        assert_eq!(arena.live(), 0);
    }
}
