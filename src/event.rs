use std::borrow::Cow;

use crate::error::ParseError;

/// A parse event, as delivered by an event source to the
/// [`TreeBuilder`](crate::TreeBuilder).
///
/// Payloads borrow from the input where they can.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// An element start tag. Attributes are in source order.
    StartElement {
        /// Tag name as written
        name: Cow<'a, str>,
        /// Attribute name/value pairs, entity-decoded
        attributes: Vec<(Cow<'a, str>, Cow<'a, str>)>,
    },
    /// An element end tag, or the end of a self-closing element.
    EndElement {
        /// Tag name as written
        name: Cow<'a, str>,
    },
    /// A run of character data.
    Characters(Cow<'a, str>),
    /// The raw content of a CDATA section.
    CData(Cow<'a, [u8]>),
    /// The body of a comment.
    Comment(Cow<'a, str>),
    /// The event source failed; no further events follow.
    Error(ParseError),
    /// The input is exhausted.
    EndDocument,
}

impl<'a> Event<'a> {
    /// Convenience constructor for a start event.
    pub fn start<I, K, V>(name: impl Into<Cow<'a, str>>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'a, str>>,
        V: Into<Cow<'a, str>>,
    {
        Event::StartElement {
            name: name.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Convenience constructor for an end event.
    pub fn end(name: impl Into<Cow<'a, str>>) -> Self {
        Event::EndElement { name: name.into() }
    }
}
