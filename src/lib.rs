//! An expression-at-a-time TOML parser that builds a concrete syntax tree
//! with exact byte spans for every node.
//!
//! The [`Parser`] is reset over a complete input and then pulled for one
//! top-level expression at a time: a table header, an array-table header
//! or a key/value line. Each pull yields an [`Expression`] whose nodes can
//! be walked through [`NodeRef`] until the next pull recycles them.
//! String contents without escapes borrow from the input; decoded strings
//! are committed into a caller-supplied [`Arena`] and outlive the pull.
//!
//! In lossless mode the tree also keeps punctuation, comments and
//! whitespace, either as nodes or as [`Decoration`]s, so the input can be
//! written back byte for byte.
//!
//! # Examples
//!
//! ```
//! use toml_cst::{Arena, Kind, Parser};
//!
//! let content = r#"
//! [package]
//! name = "toml-cst"
//! authors = ["a", "b"]
//! "#;
//!
//! let arena = Arena::new();
//! let mut parser = Parser::new(&arena);
//! parser.reset(content);
//!
//! let mut keys = Vec::new();
//! while let Some(expr) = parser.next_expression() {
//!     let root = expr.root();
//!     if root.kind() == Kind::KeyValue {
//!         let key: Vec<&str> = root.key().filter_map(|k| k.data_str()).collect();
//!         let value = root.value().unwrap();
//!         keys.push((key.join("."), value.kind()));
//!     }
//! }
//! assert_eq!(
//!     keys,
//!     [("name".to_string(), Kind::String), ("authors".to_string(), Kind::Array)]
//! );
//! parser.finish()?;
//! # Ok::<(), toml_cst::Error>(())
//! ```
//!
//! Round-tripping through lossless mode:
//!
//! ```
//! use toml_cst::{Arena, Parser};
//!
//! let arena = Arena::new();
//! let mut parser = Parser::lossless(&arena);
//! parser.reset("a = 1  # one\n");
//!
//! let expr = parser.next_expression().unwrap();
//! let decoration = expr.root().decoration().unwrap();
//! assert_eq!(decoration.after, Some(&b"  "[..]));
//! assert_eq!(decoration.comment, Some(&b"# one"[..]));
//! ```

mod arena;
mod builder;
mod decoration;
mod error;
mod kind;
mod parser;
pub mod scan;
mod span;
mod tree;

pub use arena::Arena;
pub use builder::{Builder, Node, Reference};
pub use decoration::Decoration;
pub use error::{Error, ErrorKind};
pub use kind::Kind;
pub use parser::{Options, Parser, check};
pub use span::Span;
pub use tree::{Children, Expression, Keys, NodeRef};

#[cfg(feature = "serde")]
pub mod impl_serde;
