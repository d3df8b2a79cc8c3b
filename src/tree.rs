//! Read-only views over the nodes of a pulled expression.

use crate::builder::{Builder, Node, Reference};
use crate::decoration::{Decoration, Decorations};
use crate::{Kind, Span};
use std::fmt;

#[cfg(test)]
#[path = "./tree_tests.rs"]
mod tests;

/// A node of the current expression, together with everything needed to
/// walk to its children and siblings.
///
/// Borrows the [`Parser`](crate::Parser), so it cannot outlive the pull
/// that produced it.
#[derive(Clone, Copy)]
pub struct NodeRef<'p, 'a> {
    builder: &'p Builder<'a>,
    decorations: Option<&'p Decorations<'a>>,
    input: &'a [u8],
    reference: Reference,
    node: &'p Node<'a>,
}

impl<'p, 'a> NodeRef<'p, 'a> {
    pub(crate) fn new(
        builder: &'p Builder<'a>,
        decorations: Option<&'p Decorations<'a>>,
        input: &'a [u8],
        reference: Reference,
    ) -> Option<Self> {
        let node = builder.get(reference)?;
        Some(NodeRef {
            builder,
            decorations,
            input,
            reference,
            node,
        })
    }

    fn at(&self, reference: Reference) -> Option<Self> {
        NodeRef::new(self.builder, self.decorations, self.input, reference)
    }

    #[inline]
    pub fn reference(&self) -> Reference {
        self.reference
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.node.kind()
    }

    #[inline]
    pub fn raw(&self) -> Span {
        self.node.raw()
    }

    /// Decoded payload. For strings this is the contents after escape
    /// processing; for everything else it is the source text of the token.
    /// Compound nodes have no data.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.node.data()
    }

    /// Verbatim source text covered by [`NodeRef::raw`].
    pub fn text(&self) -> &'a [u8] {
        let raw = self.raw();
        &self.input[raw.start as usize..raw.end as usize]
    }

    /// [`NodeRef::data`] as UTF-8, when it is valid UTF-8.
    pub fn data_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.data()).ok()
    }

    pub fn first_child(&self) -> Option<Self> {
        self.at(self.node.first_child())
    }

    pub fn next_sibling(&self) -> Option<Self> {
        self.at(self.node.next_sibling())
    }

    /// Iterates the children in source order.
    pub fn children(&self) -> Children<'p, 'a> {
        Children {
            next: self.first_child(),
        }
    }

    /// The value of a [`Kind::KeyValue`].
    pub fn value(&self) -> Option<Self> {
        if self.kind() == Kind::KeyValue {
            self.first_child()
        } else {
            None
        }
    }

    /// The segments of the key of a [`Kind::KeyValue`], [`Kind::Table`] or
    /// [`Kind::ArrayTable`], in order. Empty for other kinds.
    pub fn key(&self) -> Keys<'p, 'a> {
        let first = match self.kind() {
            Kind::KeyValue => self.value().and_then(|value| value.next_sibling()),
            Kind::Table | Kind::ArrayTable => self.first_child(),
            _ => None,
        };
        Keys(Children { next: first })
    }

    /// Whitespace and comment recorded for this node in lossless mode.
    pub fn decoration(&self) -> Option<&'p Decoration<'a>> {
        self.decorations?.get(self.reference)
    }
}

impl fmt::Debug for NodeRef<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("NodeRef");
        s.field("kind", &self.kind())
            .field("raw", &self.raw())
            .field("data", &String::from_utf8_lossy(self.data()));
        if let Some(decoration) = self.decoration() {
            s.field("decoration", decoration);
        }
        if self.node.first_child().is_valid() {
            s.field("children", &self.children().collect::<Vec<_>>());
        }
        s.finish()
    }
}

/// Iterator over a node's children, see [`NodeRef::children`].
#[derive(Clone)]
pub struct Children<'p, 'a> {
    next: Option<NodeRef<'p, 'a>>,
}

impl<'p, 'a> Iterator for Children<'p, 'a> {
    type Item = NodeRef<'p, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next_sibling();
        Some(current)
    }
}

/// Iterator over key segments, see [`NodeRef::key`].
#[derive(Clone)]
pub struct Keys<'p, 'a>(Children<'p, 'a>);

impl<'p, 'a> Iterator for Keys<'p, 'a> {
    type Item = NodeRef<'p, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.find(|node| node.kind() == Kind::Key)
    }
}

/// One top-level expression: a table header, an array-table header, a
/// key/value binding, or (in lossless mode) a comment or whitespace line.
#[derive(Clone, Copy, Debug)]
pub struct Expression<'p, 'a> {
    pub(crate) root: NodeRef<'p, 'a>,
    pub(crate) newline: &'a [u8],
}

impl<'p, 'a> Expression<'p, 'a> {
    #[inline]
    pub fn root(&self) -> NodeRef<'p, 'a> {
        self.root
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.root.kind()
    }

    /// The line terminator consumed in front of this expression; empty for
    /// the first one.
    #[inline]
    pub fn newline(&self) -> &'a [u8] {
        self.newline
    }
}
