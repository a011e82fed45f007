use std::borrow::Cow;
use std::collections::VecDeque;

use xmlparser::{ElementEnd, StrSpan, TextPos, Token, Tokenizer};

use crate::entity::{decode_entities, EntityError};
use crate::error::ParseError;
use crate::event::Event;

type Attribute<'a> = (Cow<'a, str>, Cow<'a, str>);

struct PendingStart<'a> {
    name: Cow<'a, str>,
    offset: usize,
    attributes: Vec<Attribute<'a>>,
}

/// Turns XML text into a sequence of [`Event`]s.
///
/// Tokenizing is done by `xmlparser`. The reader assembles start tags with
/// their attributes, decodes entity and character references, and checks
/// that every element is closed by the end of the input. Names are reported
/// as written, including any prefix; namespaces are not resolved.
///
/// The last event is either [`Event::EndDocument`] or an [`Event::Error`].
///
/// ```rust
/// use xtree::{Event, EventReader};
///
/// let events: Vec<_> = EventReader::new("<a x='1'/>").collect();
/// assert_eq!(
///     events,
///     vec![
///         Event::start("a", [("x", "1")]),
///         Event::end("a"),
///         Event::EndDocument,
///     ]
/// );
/// ```
pub struct EventReader<'a> {
    text: &'a str,
    tokenizer: Tokenizer<'a>,
    pending: VecDeque<Event<'a>>,
    start: Option<PendingStart<'a>>,
    open: Vec<(Cow<'a, str>, usize)>,
    done: bool,
}

impl<'a> EventReader<'a> {
    /// Create a reader over XML text.
    pub fn new(text: &'a str) -> Self {
        EventReader {
            text,
            tokenizer: Tokenizer::from(text),
            pending: VecDeque::new(),
            start: None,
            open: Vec::new(),
            done: false,
        }
    }

    fn token(&mut self, token: Token<'a>) -> Result<(), ParseError> {
        match token {
            Token::ElementStart { prefix, local, span } => {
                self.start = Some(PendingStart {
                    name: self.qualified(prefix, local),
                    offset: span.start(),
                    attributes: Vec::new(),
                });
            }
            Token::Attribute {
                prefix,
                local,
                value,
                ..
            } => {
                let name = self.qualified(prefix, local);
                let value = self.decode(value)?;
                if let Some(start) = &mut self.start {
                    start.attributes.push((name, value));
                }
            }
            Token::ElementEnd { end, span } => match end {
                ElementEnd::Open => {
                    if let Some(start) = self.start.take() {
                        self.open.push((start.name.clone(), start.offset));
                        self.pending.push_back(Event::StartElement {
                            name: start.name,
                            attributes: start.attributes,
                        });
                    }
                }
                ElementEnd::Empty => {
                    if let Some(start) = self.start.take() {
                        let name = start.name.clone();
                        self.pending.push_back(Event::StartElement {
                            name: start.name,
                            attributes: start.attributes,
                        });
                        self.pending.push_back(Event::EndElement { name });
                    }
                }
                ElementEnd::Close(prefix, local) => {
                    let name = self.qualified(prefix, local);
                    if let Some((expected, _)) = self.open.pop() {
                        if expected != name {
                            return Err(ParseError::InvalidCloseTag {
                                expected: expected.into_owned(),
                                found: name.into_owned(),
                                position: self.pos_at(span.start()),
                            });
                        }
                    }
                    self.pending.push_back(Event::EndElement { name });
                }
            },
            Token::Text { text } => {
                let text = self.decode(text)?;
                self.pending.push_back(Event::Characters(text));
            }
            Token::Cdata { text, .. } => {
                self.pending
                    .push_back(Event::CData(Cow::Borrowed(text.as_str().as_bytes())));
            }
            Token::Comment { text, .. } => {
                self.pending
                    .push_back(Event::Comment(Cow::Borrowed(text.as_str())));
            }
            // declarations, DTDs and processing instructions carry nothing
            // for the tree
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self) -> Event<'a> {
        match self.open.pop() {
            Some((name, offset)) => Event::Error(ParseError::UnclosedElement {
                name: name.into_owned(),
                position: self.pos_at(offset),
            }),
            None => Event::EndDocument,
        }
    }

    // `prefix:local` is contiguous in the source, so it can be borrowed
    fn qualified(&self, prefix: StrSpan<'a>, local: StrSpan<'a>) -> Cow<'a, str> {
        if prefix.as_str().is_empty() {
            Cow::Borrowed(local.as_str())
        } else {
            Cow::Borrowed(&self.text[prefix.start()..local.end()])
        }
    }

    fn decode(&self, span: StrSpan<'a>) -> Result<Cow<'a, str>, ParseError> {
        decode_entities(span.as_str()).map_err(|e| {
            let position = self.pos_at(span.start());
            match e {
                EntityError::Unclosed(entity) => ParseError::UnclosedEntity { entity, position },
                EntityError::Invalid(entity) => ParseError::InvalidEntity { entity, position },
            }
        })
    }

    fn pos_at(&self, offset: usize) -> TextPos {
        text_pos(self.text, offset)
    }
}

impl<'a> Iterator for EventReader<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if self.done {
                return None;
            }
            match self.tokenizer.next() {
                Some(Ok(token)) => {
                    if let Err(e) = self.token(token) {
                        self.done = true;
                        return Some(Event::Error(e));
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Event::Error(e.into()));
                }
                None => {
                    self.done = true;
                    return Some(self.end());
                }
            }
        }
    }
}

/// One-based row and column of a byte offset.
fn text_pos(text: &str, offset: usize) -> TextPos {
    let before = &text[..offset];
    let row = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let col = before[line_start..].chars().count() + 1;
    TextPos::new(
        u32::try_from(row).unwrap_or(u32::MAX),
        u32::try_from(col).unwrap_or(u32::MAX),
    )
}
