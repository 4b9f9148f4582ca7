//! Arena allocation for the flat statement tree.
//!
//! Function bodies outlive the evaluation of the document that declared
//! them, so declared functions keep a [`SharedArena`] to the arena their
//! body nodes live in.

use crate::{LiteralKind, Name, Node, NodeId, NodeKind, Span};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Contiguous storage for all nodes of one document.
#[derive(Clone, Default, PartialEq)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node, return its ID.
    ///
    /// # Panics
    /// Panics if the arena holds more than `u32::MAX` nodes.
    #[inline]
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let index = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("node arena exceeded u32::MAX nodes"));
        self.nodes.push(Node { kind, span });
        NodeId::new(index)
    }

    /// Get node by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.get(id).span
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ===== Construction helpers =====
    //
    // Hand-built trees carry `Span::DUMMY`.

    pub fn identifier(&mut self, name: Name) -> NodeId {
        self.alloc(NodeKind::Identifier(name), Span::DUMMY)
    }

    pub fn literal(&mut self, kind: LiteralKind, text: Name) -> NodeId {
        self.alloc(NodeKind::Literal { kind, text }, Span::DUMMY)
    }

    pub fn call(&mut self, callable: NodeId, arguments: Vec<NodeId>) -> NodeId {
        self.alloc(
            NodeKind::FunctionCall {
                callable,
                arguments,
            },
            Span::DUMMY,
        )
    }

    pub fn member(&mut self, object: NodeId, member: Name) -> NodeId {
        self.alloc(NodeKind::MemberAccess { object, member }, Span::DUMMY)
    }

    pub fn assign(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.alloc(NodeKind::Assign { left, right }, Span::DUMMY)
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::Block(statements), Span::DUMMY)
    }

    /// Freeze the arena for sharing with declared functions.
    pub fn into_shared(self) -> SharedArena {
        SharedArena::new(self)
    }
}

impl fmt::Debug for NodeArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeArena")
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

/// Shared reference to a finished [`NodeArena`].
#[derive(Clone, Default)]
pub struct SharedArena(Arc<NodeArena>);

impl SharedArena {
    pub fn new(arena: NodeArena) -> Self {
        SharedArena(Arc::new(arena))
    }

    /// Whether both handles point at the same arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedArena {
    type Target = NodeArena;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for SharedArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedArena({} nodes)", self.0.len())
    }
}

#[cfg(test)]
mod tests;
