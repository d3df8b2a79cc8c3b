//! Side table of formatting trivia for lossless mode.

use crate::Reference;

#[cfg(test)]
#[path = "./decoration_tests.rs"]
mod tests;

/// Formatting around a node that carries no meaning: the whitespace in
/// front of it, the whitespace after it and a trailing comment.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Decoration<'a> {
    pub before: Option<&'a [u8]>,
    pub after: Option<&'a [u8]>,
    pub comment: Option<&'a [u8]>,
}

impl<'a> Decoration<'a> {
    /// `before`, or an empty slice.
    pub fn before_bytes(&self) -> &'a [u8] {
        self.before.unwrap_or_default()
    }

    /// `after`, or an empty slice.
    pub fn after_bytes(&self) -> &'a [u8] {
        self.after.unwrap_or_default()
    }

    /// `comment`, or an empty slice.
    pub fn comment_bytes(&self) -> &'a [u8] {
        self.comment.unwrap_or_default()
    }
}

/// Decorations keyed by node [`Reference`].
///
/// Entries are created on first write and later writes only touch the
/// field they name, so a node's leading whitespace survives a trailing
/// comment recorded for it afterwards. Empty slices are never stored.
#[derive(Default)]
pub(crate) struct Decorations<'a> {
    map: foldhash::HashMap<Reference, Decoration<'a>>,
}

impl<'a> Decorations<'a> {
    pub(crate) fn new() -> Self {
        Decorations {
            map: foldhash::HashMap::default(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }

    pub(crate) fn get(&self, reference: Reference) -> Option<&Decoration<'a>> {
        self.map.get(&reference)
    }

    pub(crate) fn set_before(&mut self, reference: Reference, ws: &'a [u8]) {
        if !ws.is_empty() {
            self.map.entry(reference).or_default().before = Some(ws);
        }
    }

    pub(crate) fn set_after(&mut self, reference: Reference, ws: &'a [u8]) {
        if !ws.is_empty() {
            self.map.entry(reference).or_default().after = Some(ws);
        }
    }

    pub(crate) fn set_comment(&mut self, reference: Reference, comment: &'a [u8]) {
        if !comment.is_empty() {
            self.map.entry(reference).or_default().comment = Some(comment);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}
