use std::borrow::Cow;

use crate::error::{Error, InvalidCDataEncoding, ParseError};
use crate::event::Event;
use crate::node::Node;

/// Where a [`TreeBuilder`] is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderState {
    /// No element has been seen yet.
    Idle,
    /// At least one element has started; the document has not ended.
    Running,
    /// The document ended with a root element. Terminal.
    Completed,
    /// An error occurred. Terminal.
    Failed,
}

/// Builds a [`Node`] tree from a sequence of parse events.
///
/// The builder keeps a stack of open elements. A node is owned by the stack
/// until its end event pops it; it then moves into its parent's children,
/// or becomes the root if the stack is empty.
///
/// Once the builder has completed or failed, further events are ignored.
/// A builder handles one document; [`TreeBuilder::finish`] consumes it.
///
/// ```rust
/// use xtree::{Event, TreeBuilder};
///
/// let mut builder = TreeBuilder::new();
/// builder.handle(Event::start("doc", [("ID", "1")]));
/// builder.handle(Event::Characters(" hello ".into()));
/// builder.handle(Event::end("doc"));
/// builder.handle(Event::EndDocument);
///
/// let root = builder.finish()?;
/// assert_eq!(root.attribute("id"), Some("1"));
/// assert_eq!(root.texts(), ["hello"]);
/// # Ok::<(), xtree::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<Node>,
    root: Option<Node>,
    root_seen: bool,
    failure: Option<Error>,
    ended: bool,
}

impl TreeBuilder {
    /// Create a builder with an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a complete event sequence.
    ///
    /// Events are consumed until the builder reaches a terminal state; if
    /// the sequence runs out first, it is treated as ending the document.
    pub fn build<'a, I>(events: I) -> Result<Node, Error>
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        let mut builder = TreeBuilder::new();
        for event in events {
            builder.handle(event);
            if builder.is_terminal() {
                break;
            }
        }
        builder.finish()
    }

    /// The current state.
    pub fn state(&self) -> BuilderState {
        if self.failure.is_some() {
            BuilderState::Failed
        } else if self.ended {
            BuilderState::Completed
        } else if self.root_seen {
            BuilderState::Running
        } else {
            BuilderState::Idle
        }
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// True once the builder has completed or failed.
    pub fn is_terminal(&self) -> bool {
        self.failure.is_some() || self.ended
    }

    /// Handle a single event.
    pub fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::StartElement { name, attributes } => self.start_element(name, attributes),
            Event::EndElement { .. } => self.end_element(),
            Event::Characters(text) => self.characters(&text),
            Event::CData(data) => self.cdata(&data),
            Event::Comment(comment) => self.comment(comment),
            Event::Error(e) => self.parse_error(e),
            Event::EndDocument => self.end_document(),
        }
    }

    /// An element starts.
    pub fn start_element<I, K, V>(&mut self, name: impl Into<String>, attributes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        if self.ignore("element start") {
            return;
        }
        let mut node = Node::new(name);
        node.add_attributes(attributes);
        if self.stack.is_empty() && self.root_seen {
            self.fail(Error::MultipleRootElements(node.name().to_string()));
            return;
        }
        self.root_seen = true;
        self.stack.push(node);
    }

    /// The innermost open element ends.
    pub fn end_element(&mut self) {
        if self.ignore("element end") {
            return;
        }
        match self.stack.pop() {
            Some(node) => self.close(node),
            None => self.fail(Error::UnbalancedEnd),
        }
    }

    /// Character data. Dropped if no element is open.
    pub fn characters(&mut self, text: &str) {
        if self.ignore("characters") {
            return;
        }
        match self.stack.last_mut() {
            Some(top) => top.add_text(text),
            None => log::trace!("dropping characters outside of any element"),
        }
    }

    /// A CDATA section. Content that is not UTF-8 is dropped; the parse
    /// carries on.
    pub fn cdata(&mut self, data: &[u8]) {
        if self.ignore("CDATA") {
            return;
        }
        match std::str::from_utf8(data).map_err(InvalidCDataEncoding::from) {
            Ok(text) => self.characters(text),
            Err(e) => log::debug!("dropping CDATA block: {}", e),
        }
    }

    /// A comment. Dropped if no element is open.
    pub fn comment<'a>(&mut self, comment: impl Into<Cow<'a, str>>) {
        if self.ignore("comment") {
            return;
        }
        match self.stack.last_mut() {
            Some(top) => top.add_comment(comment.into().into_owned()),
            None => log::trace!("dropping comment outside of any element"),
        }
    }

    /// The event source failed.
    pub fn parse_error(&mut self, error: ParseError) {
        if self.ignore("parse error") {
            return;
        }
        self.fail(Error::Parse(error));
    }

    /// The input is exhausted.
    ///
    /// Elements still open are closed first, so the root is complete.
    pub fn end_document(&mut self) {
        if self.ignore("document end") {
            return;
        }
        if !self.root_seen {
            self.fail(Error::NoRootElement);
            return;
        }
        if !self.stack.is_empty() {
            log::debug!(
                "document ended with {} open elements; closing them",
                self.stack.len()
            );
        }
        while let Some(node) = self.stack.pop() {
            self.close(node);
        }
        self.ended = true;
    }

    /// Consume the builder and return its outcome.
    ///
    /// A builder that has not seen the end of the document is ended first.
    pub fn finish(mut self) -> Result<Node, Error> {
        if !self.is_terminal() {
            self.end_document();
        }
        if let Some(e) = self.failure {
            return Err(e);
        }
        self.root.ok_or(Error::NoRootElement)
    }

    fn close(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.add_child(node),
            None => self.root = Some(node),
        }
    }

    fn fail(&mut self, error: Error) {
        match error.parse_error().and_then(ParseError::position) {
            Some(position) => log::debug!("failed to parse XML at {}: {}", position, error),
            None => log::debug!("failed to parse XML: {}", error),
        }
        self.stack.clear();
        self.root = None;
        self.failure = Some(error);
    }

    fn ignore(&self, what: &str) -> bool {
        let terminal = self.is_terminal();
        if terminal {
            log::trace!("ignoring {} after the builder finished", what);
        }
        terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ATTRIBUTES: [(&str, &str); 0] = [];

    #[test]
    fn test_states() {
        let mut builder = TreeBuilder::new();
        assert_eq!(builder.state(), BuilderState::Idle);
        builder.start_element("a", NO_ATTRIBUTES);
        assert_eq!(builder.state(), BuilderState::Running);
        builder.end_element();
        assert_eq!(builder.state(), BuilderState::Running);
        builder.end_document();
        assert_eq!(builder.state(), BuilderState::Completed);
        assert_eq!(builder.depth(), 0);
    }

    #[test]
    fn test_depth_tracks_open_elements() {
        let mut builder = TreeBuilder::new();
        builder.start_element("a", NO_ATTRIBUTES);
        builder.start_element("b", NO_ATTRIBUTES);
        builder.start_element("c", NO_ATTRIBUTES);
        assert_eq!(builder.depth(), 3);
        builder.end_element();
        assert_eq!(builder.depth(), 2);
        builder.start_element("c", NO_ATTRIBUTES);
        assert_eq!(builder.depth(), 3);
    }

    #[test]
    fn test_text_outside_element_is_dropped() {
        let mut builder = TreeBuilder::new();
        builder.characters("before");
        builder.comment("before");
        assert_eq!(builder.state(), BuilderState::Idle);
        builder.start_element("a", NO_ATTRIBUTES);
        builder.end_element();
        builder.characters("after");
        builder.comment("after");
        let root = builder.finish().unwrap();
        assert!(root.is_empty());
    }

    #[test]
    fn test_invalid_cdata_is_dropped() {
        let mut builder = TreeBuilder::new();
        builder.start_element("a", NO_ATTRIBUTES);
        builder.cdata(&[0xff, 0xfe]);
        builder.cdata(b" ok ");
        builder.end_element();
        let root = builder.finish().unwrap();
        assert_eq!(root.texts(), ["ok"]);
    }

    #[test]
    fn test_failure_clears_stack() {
        let mut builder = TreeBuilder::new();
        builder.start_element("a", NO_ATTRIBUTES);
        builder.start_element("b", NO_ATTRIBUTES);
        builder.parse_error(ParseError::MalformedEncoding { encoding: "UTF-8" });
        assert_eq!(builder.state(), BuilderState::Failed);
        assert_eq!(builder.depth(), 0);
    }

    #[test]
    fn test_events_after_failure_are_ignored() {
        let mut builder = TreeBuilder::new();
        builder.end_element();
        assert_eq!(builder.state(), BuilderState::Failed);
        builder.start_element("a", NO_ATTRIBUTES);
        builder.end_element();
        builder.end_document();
        assert_eq!(builder.depth(), 0);
        assert_eq!(builder.finish(), Err(Error::UnbalancedEnd));
    }

    #[test]
    fn test_events_after_completion_are_ignored() {
        let mut builder = TreeBuilder::new();
        builder.start_element("a", NO_ATTRIBUTES);
        builder.end_element();
        builder.end_document();
        builder.start_element("b", NO_ATTRIBUTES);
        builder.end_element();
        builder.end_element();
        assert_eq!(builder.state(), BuilderState::Completed);
        assert_eq!(builder.finish(), Ok(Node::new("a")));
    }

    #[test]
    fn test_end_document_closes_open_elements() {
        let mut builder = TreeBuilder::new();
        builder.start_element("a", NO_ATTRIBUTES);
        builder.start_element("b", NO_ATTRIBUTES);
        builder.end_document();
        let root = builder.finish().unwrap();
        assert_eq!(root.name(), "a");
        assert_eq!(root.children_named("b").len(), 1);
    }

    #[test]
    fn test_finish_without_end_document() {
        let mut builder = TreeBuilder::new();
        builder.start_element("a", NO_ATTRIBUTES);
        builder.end_element();
        assert_eq!(builder.finish(), Ok(Node::new("a")));
    }

    #[test]
    fn test_finish_without_events() {
        assert_eq!(TreeBuilder::new().finish(), Err(Error::NoRootElement));
    }
}
