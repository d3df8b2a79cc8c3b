#![cfg_attr(docsrs, doc(cfg(feature = "serde")))]

//! Provides [`serde::Serialize`] for syntax nodes, so a pulled expression
//! can be copied out into JSON or any other serde format before the next
//! pull recycles it.
//!
//! Byte payloads are written as strings, replacing invalid UTF-8.

use crate::{Children, Decoration, Expression, Kind, NodeRef, Span};
use serde::ser::{SerializeMap, SerializeStruct};
use std::borrow::Cow;

#[cfg(test)]
#[path = "./impl_serde_tests.rs"]
mod tests;

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

impl serde::Serialize for Kind {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ser.serialize_str(self.as_str())
    }
}

impl serde::Serialize for Span {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = ser.serialize_struct("Span", 2)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

/// Only the fields that are present are written.
impl serde::Serialize for Decoration<'_> {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let fields = [
            ("before", self.before),
            ("after", self.after),
            ("comment", self.comment),
        ];
        let len = fields.iter().filter(|(_, v)| v.is_some()).count();
        let mut map = ser.serialize_map(Some(len))?;
        for (name, value) in fields {
            if let Some(bytes) = value {
                map.serialize_entry(name, &lossy(bytes))?;
            }
        }
        map.end()
    }
}

/// A map with `kind`, `raw` and `data`, plus `decoration` and `children`
/// when the node has them.
impl serde::Serialize for NodeRef<'_, '_> {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let decoration = self.decoration();
        let has_children = self.first_child().is_some();
        let len = 3 + decoration.is_some() as usize + has_children as usize;

        let mut map = ser.serialize_map(Some(len))?;
        map.serialize_entry("kind", &self.kind())?;
        map.serialize_entry("raw", &self.raw())?;
        map.serialize_entry("data", &lossy(self.data()))?;
        if let Some(decoration) = decoration {
            map.serialize_entry("decoration", decoration)?;
        }
        if has_children {
            map.serialize_entry("children", &self.children())?;
        }
        map.end()
    }
}

impl serde::Serialize for Children<'_, '_> {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ser.collect_seq(self.clone())
    }
}

impl serde::Serialize for Expression<'_, '_> {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = ser.serialize_struct("Expression", 2)?;
        s.serialize_field("newline", &lossy(self.newline()))?;
        s.serialize_field("root", &self.root())?;
        s.end()
    }
}
