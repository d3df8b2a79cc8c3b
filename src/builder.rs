//! Flat node store for one expression's syntax tree.
//!
//! Nodes are appended to a `Vec` and linked by [`Reference`] indices in
//! first-child / next-sibling form, so the tree has no owning pointers
//! and the whole store can be cleared in one step between expressions.

use crate::{Kind, Span};

#[cfg(test)]
#[path = "./builder_tests.rs"]
mod tests;

/// Handle to a node in the [`Builder`].
///
/// Only meaningful for the expression that produced it: the store is
/// cleared at the start of every pull.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Reference(u32);

impl Reference {
    /// Sentinel meaning "no node".
    pub const INVALID: Reference = Reference(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// Position in the store, or `None` for [`Reference::INVALID`].
    #[inline]
    pub fn index(self) -> Option<usize> {
        if self.is_valid() {
            Some(self.0 as usize)
        } else {
            None
        }
    }
}

impl Default for Reference {
    fn default() -> Self {
        Self::INVALID
    }
}

/// One syntax tree element.
#[derive(Clone, Debug)]
pub struct Node<'a> {
    pub(crate) kind: Kind,
    pub(crate) raw: Span,
    pub(crate) data: &'a [u8],
    pub(crate) first_child: Reference,
    pub(crate) next_sibling: Reference,
}

impl<'a> Node<'a> {
    /// A node with no links yet.
    #[inline]
    pub fn new(kind: Kind, raw: Span, data: &'a [u8]) -> Self {
        Node {
            kind,
            raw,
            data,
            first_child: Reference::INVALID,
            next_sibling: Reference::INVALID,
        }
    }

    /// A compound node whose span is filled in once it is closed.
    #[inline]
    pub fn open(kind: Kind) -> Self {
        Node::new(kind, Span::default(), &[])
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Span of the node in the original input.
    #[inline]
    pub fn raw(&self) -> Span {
        self.raw
    }

    /// Semantic bytes: decoded string contents, literal digits, key text.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    pub fn first_child(&self) -> Reference {
        self.first_child
    }

    #[inline]
    pub fn next_sibling(&self) -> Reference {
        self.next_sibling
    }

    #[inline]
    pub fn set_raw(&mut self, raw: Span) {
        self.raw = raw;
    }
}

/// Append-only node store.
#[derive(Default)]
pub struct Builder<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> Builder<'a> {
    pub fn new() -> Self {
        Builder { nodes: Vec::new() }
    }

    /// Drop every node, keeping the allocation.
    pub fn reset(&mut self) {
        self.nodes.clear();
    }

    pub fn push(&mut self, node: Node<'a>) -> Reference {
        let index = self.nodes.len();
        debug_assert!(index < u32::MAX as usize);
        self.nodes.push(node);
        Reference(index as u32)
    }

    /// Make `child` the first child of `parent`.
    ///
    /// Later children are linked with [`Builder::chain`].
    pub fn attach_child(&mut self, parent: Reference, child: Reference) {
        let node = self.node_at(parent);
        debug_assert!(
            !node.first_child.is_valid(),
            "{} already has a first child",
            node.kind
        );
        node.first_child = child;
    }

    /// Make `next` the sibling that follows `prev`.
    pub fn chain(&mut self, prev: Reference, next: Reference) {
        let node = self.node_at(prev);
        debug_assert!(
            !node.next_sibling.is_valid(),
            "{} already has a next sibling",
            node.kind
        );
        node.next_sibling = next;
    }

    /// Link `child` as the last child of `parent`, given the previously
    /// linked child (or [`Reference::INVALID`] when `parent` has none).
    /// Returns the new last child.
    pub fn append(&mut self, parent: Reference, last: Reference, child: Reference) -> Reference {
        if last.is_valid() {
            self.chain(last, child);
        } else {
            self.attach_child(parent, child);
        }
        child
    }

    /// Mutable access, used to backfill the span of compound nodes.
    ///
    /// # Panics
    ///
    /// Panics if `reference` does not belong to the current store.
    pub fn node_at(&mut self, reference: Reference) -> &mut Node<'a> {
        &mut self.nodes[reference.0 as usize]
    }

    pub fn get(&self, reference: Reference) -> Option<&Node<'a>> {
        match reference.index() {
            Some(index) => self.nodes.get(index),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
