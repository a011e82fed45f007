use std::thread::{self, JoinHandle};

use crate::builder::TreeBuilder;
use crate::encoding::decode;
use crate::error::Error;
use crate::node::Node;
use crate::reader::EventReader;

/// Parse XML bytes into a [`Node`] tree.
///
/// The encoding is detected from the input; UTF-8 is assumed if nothing
/// says otherwise.
///
/// ```rust
/// let root = xtree::parse(b"<level1><level2><text>text</text></level2></level1>")?;
///
/// let text = root.child("level2").and_then(|n| n.child("text")).unwrap();
/// assert_eq!(text.texts(), ["text"]);
/// # Ok::<(), xtree::Error>(())
/// ```
pub fn parse(data: &[u8]) -> Result<Node, Error> {
    Parser::new(data).parse()
}

/// Parse XML text into a [`Node`] tree.
pub fn parse_str(xml: &str) -> Result<Node, Error> {
    if xml.is_empty() {
        return Err(Error::EmptyInput);
    }
    TreeBuilder::build(EventReader::new(xml))
}

/// Parses one input buffer.
///
/// Use this instead of [`parse`] to pass an encoding hint, or to parse on
/// a background thread. A parser is used up by parsing.
///
/// ```rust
/// use xtree::Parser;
///
/// let handle = Parser::new(b"<doc>caf\xc3\xa9</doc>".to_vec()).spawn();
/// let root = handle.join().unwrap()?;
/// assert_eq!(root.texts(), ["caf\u{e9}"]);
/// # Ok::<(), xtree::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Parser<D> {
    data: D,
    encoding_hint: Option<String>,
}

impl<D: AsRef<[u8]>> Parser<D> {
    /// Create a parser for a buffer.
    pub fn new(data: D) -> Self {
        Parser {
            data,
            encoding_hint: None,
        }
    }

    /// Suggest an encoding label, used when the input itself does not
    /// declare one.
    pub fn encoding_hint(mut self, label: impl Into<String>) -> Self {
        self.encoding_hint = Some(label.into());
        self
    }

    /// Parse the buffer.
    ///
    /// An empty buffer fails with [`Error::EmptyInput`] without being
    /// looked at further.
    pub fn parse(self) -> Result<Node, Error> {
        let data = self.data.as_ref();
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        let text = decode(data, self.encoding_hint)?;
        TreeBuilder::build(EventReader::new(&text))
    }
}

impl<D: AsRef<[u8]> + Send + 'static> Parser<D> {
    /// Parse the buffer on a new thread.
    ///
    /// The parse runs exactly as [`Parser::parse`] does; its outcome is
    /// returned by joining the handle.
    pub fn spawn(self) -> JoinHandle<Result<Node, Error>> {
        thread::spawn(move || self.parse())
    }
}
