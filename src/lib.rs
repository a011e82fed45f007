//! Build a tree of XML elements from parse events.
//!
//! xtree reads an XML document and turns it into a [`Node`] tree that is
//! convenient to query. While building, it normalizes:
//!
//! - attribute names and child group keys are lower-cased;
//! - child elements are grouped by (lower-cased) tag name, keeping their
//!   order within a group;
//! - text runs are trimmed and whitespace-only runs are dropped;
//! - comments are kept as they are.
//!
//! ```rust
//! let root = xtree::parse(br#"<Feed Version="2"><Entry>one</Entry><entry>two</entry></Feed>"#)?;
//!
//! assert_eq!(root.name(), "Feed");
//! assert_eq!(root.attribute("version"), Some("2"));
//! let entries: Vec<_> = root.children_named("entry").iter().filter_map(|e| e.text()).collect();
//! assert_eq!(entries, ["one", "two"]);
//! # Ok::<(), xtree::Error>(())
//! ```
//!
//! The relative order of differently named children is not kept.
//!
//! Tokenizing is done by [`xmlparser`]; [`EventReader`] adapts it to
//! [`Event`]s, and [`TreeBuilder`] builds the tree from any event sequence,
//! so you can feed it events from another source too.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod encoding;
mod entity;
mod error;
mod event;
mod node;
mod parse;
mod reader;
mod traverse;

#[cfg(feature = "proptest")]
pub mod proptest;

pub use builder::{BuilderState, TreeBuilder};
pub use error::{Error, ParseError};
pub use event::Event;
pub use node::{Attributes, Children, Node};
pub use parse::{parse, parse_str, Parser};
pub use reader::EventReader;
pub use xmlparser::TextPos;
